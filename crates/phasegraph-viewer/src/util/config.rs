use anyhow::Context;
use directories::ProjectDirs;
use phasegraph_core::EngineConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub window_title: String,
    pub show_hud: bool,
    pub background: [f32; 3],
    pub engine: EngineConfig,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            window_title: "PhaseGraph (live)".to_string(),
            show_hud: true,
            background: [0.04, 0.04, 0.06],
            engine: EngineConfig::default(),
        }
    }
}

pub fn config_file_path() -> Option<PathBuf> {
    let proj = ProjectDirs::from("", "", "phasegraph")?;
    Some(proj.config_dir().join("viewer.toml"))
}

pub fn load_or_default() -> ViewerConfig {
    let Some(path) = config_file_path() else {
        return ViewerConfig::default();
    };
    load_or_default_from_path(&path)
}

pub fn load_or_default_from_path(path: &Path) -> ViewerConfig {
    let Ok(contents) = fs::read_to_string(path) else {
        return ViewerConfig::default();
    };
    match toml::from_str(&contents) {
        Ok(cfg) => cfg,
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "ignoring unreadable viewer config");
            ViewerConfig::default()
        }
    }
}

/// Strict variant for a path the user named explicitly.
pub fn load_from_path(path: &Path) -> anyhow::Result<ViewerConfig> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read viewer config {}", path.display()))?;
    toml::from_str(&contents)
        .with_context(|| format!("failed to parse viewer config {}", path.display()))
}

pub fn save(cfg: &ViewerConfig) -> anyhow::Result<PathBuf> {
    let Some(path) = config_file_path() else {
        return Err(anyhow::anyhow!("no config directory available"));
    };
    save_to_path(cfg, &path)?;
    Ok(path)
}

pub fn save_to_path(cfg: &ViewerConfig, path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create config directory {}", parent.display()))?;
    }
    let data = toml::to_string_pretty(cfg).context("failed to serialize viewer config")?;
    fs::write(path, data)
        .with_context(|| format!("failed to write viewer config {}", path.display()))?;
    Ok(())
}
