//! Snapshot discovery inside the watched directory.
//!
//! Snapshot files are named `step_<token>.json` and are ordered by plain string
//! comparison of their names. Producers must zero-pad the token (the simulation
//! writes `step_0042.json`) for that order to be chronological; with unpadded
//! names `step_2.json` sorts after `step_10.json`.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub const SNAPSHOT_PREFIX: &str = "step_";
pub const SNAPSHOT_SUFFIX: &str = ".json";

pub fn is_snapshot_name(name: &str) -> bool {
    name.len() >= SNAPSHOT_PREFIX.len() + SNAPSHOT_SUFFIX.len()
        && name.starts_with(SNAPSHOT_PREFIX)
        && name.ends_with(SNAPSHOT_SUFFIX)
}

/// All snapshot files in `dir`, sorted by file name ascending.
pub fn list_snapshots(dir: &Path) -> io::Result<Vec<PathBuf>> {
    let mut named: Vec<(String, PathBuf)> = Vec::new();

    for entry in fs::read_dir(dir)? {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                tracing::debug!(dir = %dir.display(), error = %err, "skipping unreadable entry");
                continue;
            }
        };
        let Ok(name) = entry.file_name().into_string() else {
            continue;
        };
        if !is_snapshot_name(&name) {
            continue;
        }
        let path = entry.path();
        // follows symlinks, like opening the file would
        if !fs::metadata(&path).map(|m| m.is_file()).unwrap_or(false) {
            continue;
        }
        named.push((name, path));
    }

    named.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(named.into_iter().map(|(_, path)| path).collect())
}

/// The newest snapshot in `dir`, or `None` when there is none yet or the
/// directory cannot be read. An unreadable directory is logged, never fatal.
pub fn find_latest(dir: &Path) -> Option<PathBuf> {
    match list_snapshots(dir) {
        Ok(mut snapshots) => snapshots.pop(),
        Err(err) => {
            tracing::warn!(dir = %dir.display(), error = %err, "snapshot directory unavailable");
            None
        }
    }
}
