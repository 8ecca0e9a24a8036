use clap::Parser;
use std::path::PathBuf;

use crate::util::config::ViewerConfig;

/// Live viewer for a directory of `step_*.json` graph snapshots.
#[derive(Debug, Parser)]
#[command(author, version, about)]
pub struct Args {
    /// Directory the simulation writes snapshots into.
    #[arg(long)]
    pub dir: Option<PathBuf>,

    /// Poll interval in milliseconds.
    #[arg(long)]
    pub interval_ms: Option<u64>,

    /// Seed for layout jitter (reproducible layouts).
    #[arg(long, conflicts_with = "no_jitter")]
    pub seed: Option<u64>,

    /// Disable layout jitter entirely.
    #[arg(long)]
    pub no_jitter: bool,

    /// Read settings from this TOML file instead of the user config dir.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Write the effective settings to the user config dir and continue.
    #[arg(long)]
    pub save_config: bool,
}

impl Args {
    pub fn apply(&self, cfg: &mut ViewerConfig) {
        if let Some(dir) = &self.dir {
            cfg.engine.snapshot_dir = dir.clone();
        }
        if let Some(ms) = self.interval_ms {
            cfg.engine.poll_interval_ms = ms;
        }
        if let Some(seed) = self.seed {
            cfg.engine.jitter_seed = Some(seed);
        }
        if self.no_jitter {
            cfg.engine.jitter = 0.0;
        }
    }
}
