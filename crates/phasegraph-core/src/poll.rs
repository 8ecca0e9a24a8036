use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use thiserror::Error;

use crate::decode::{decode, DecodeError};
use crate::locate::list_snapshots;
use crate::model::GraphState;
use crate::stats::SnapshotDiff;
use crate::store::LiveGraph;

#[derive(Debug, Error)]
pub enum PollError {
    #[error("snapshot directory {} is unavailable", path.display())]
    DirectoryUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to read snapshot {}", path.display())]
    ReadFailure {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to decode snapshot {}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: DecodeError,
    },
}

impl PollError {
    pub fn path(&self) -> &Path {
        match self {
            Self::DirectoryUnavailable { path, .. }
            | Self::ReadFailure { path, .. }
            | Self::Decode { path, .. } => path,
        }
    }

    /// Full message including the underlying cause.
    pub fn describe(&self) -> String {
        match self {
            Self::DirectoryUnavailable { source, .. } | Self::ReadFailure { source, .. } => {
                format!("{self}: {source}")
            }
            Self::Decode { source, .. } => format!("{self}: {source}"),
        }
    }
}

#[derive(Debug)]
pub enum PollOutcome {
    /// No `step_*.json` file exists yet.
    Empty,
    /// The newest file is the one already loaded.
    Unchanged,
    Updated(GraphState),
}

#[derive(Debug)]
pub enum TickReport {
    Idle,
    Swapped { version: u64, diff: SnapshotDiff },
    Failed(PollError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Fingerprint {
    path: PathBuf,
    modified: Option<SystemTime>,
    len: u64,
}

/// Poll-decode step for one snapshot directory.
///
/// Remembers what it loaded last so an idle directory is not re-decoded every
/// tick. A failed decode leaves that memory untouched: the file is retried on
/// the next tick, which covers snapshots caught half-written.
#[derive(Debug)]
pub struct SnapshotPoller {
    dir: PathBuf,
    last_loaded: Option<Fingerprint>,
    last_failure: Option<String>,
}

impl SnapshotPoller {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            last_loaded: None,
            last_failure: None,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn poll(&mut self) -> Result<PollOutcome, PollError> {
        let result = self.poll_inner();
        match &result {
            Ok(_) => {
                if self.last_failure.take().is_some() {
                    tracing::info!(dir = %self.dir.display(), "snapshot polling recovered");
                }
            }
            Err(err) => self.log_failure(err),
        }
        result
    }

    fn poll_inner(&mut self) -> Result<PollOutcome, PollError> {
        let snapshots =
            list_snapshots(&self.dir).map_err(|source| PollError::DirectoryUnavailable {
                path: self.dir.clone(),
                source,
            })?;
        let Some(latest) = snapshots.into_iter().last() else {
            return Ok(PollOutcome::Empty);
        };

        let meta = fs::metadata(&latest).map_err(|source| PollError::ReadFailure {
            path: latest.clone(),
            source,
        })?;
        let fingerprint = Fingerprint {
            path: latest.clone(),
            modified: meta.modified().ok(),
            len: meta.len(),
        };
        if self.last_loaded.as_ref() == Some(&fingerprint) {
            return Ok(PollOutcome::Unchanged);
        }

        let raw = fs::read(&latest).map_err(|source| PollError::ReadFailure {
            path: latest.clone(),
            source,
        })?;
        let mut state = decode(&raw).map_err(|source| PollError::Decode {
            path: latest.clone(),
            source,
        })?;
        state.source = Some(latest);
        self.last_loaded = Some(fingerprint);
        Ok(PollOutcome::Updated(state))
    }

    // Same failure every tick would flood the log; only changes are warnings.
    fn log_failure(&mut self, err: &PollError) {
        let message = err.describe();
        if self.last_failure.as_deref() == Some(message.as_str()) {
            tracing::debug!(error = %message, "snapshot poll still failing");
        } else {
            tracing::warn!(path = %err.path().display(), error = %message, "snapshot poll failed; keeping last frame");
            self.last_failure = Some(message);
        }
    }

    /// One complete poll-decode-swap cycle against `live`.
    pub fn tick(&mut self, live: &mut LiveGraph) -> TickReport {
        match self.poll() {
            Ok(PollOutcome::Updated(state)) => {
                let diff = live.swap_in(state);
                TickReport::Swapped {
                    version: live.version(),
                    diff,
                }
            }
            Ok(PollOutcome::Empty | PollOutcome::Unchanged) => TickReport::Idle,
            Err(err) => TickReport::Failed(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use tempfile::tempdir;

    const SNAP_A: &str = r#"{ "nodes": [ { "id": 1, "rho": 0.9, "sigma": 1 } ], "edges": [] }"#;
    const SNAP_B: &str = r#"{ "nodes": [ { "id": 1 }, { "id": 2 } ], "edges": [ { "u": 1, "v": 2 } ] }"#;

    #[test]
    fn empty_directory_is_idle() {
        let dir = tempdir().expect("tempdir");
        let mut poller = SnapshotPoller::new(dir.path());
        assert!(matches!(poller.poll(), Ok(PollOutcome::Empty)));

        let mut live = LiveGraph::new();
        assert!(matches!(poller.tick(&mut live), TickReport::Idle));
        assert_eq!(live.version(), 0);
    }

    #[test]
    fn loads_latest_then_reports_unchanged() {
        let dir = tempdir().expect("tempdir");
        fs::write(dir.path().join("step_0001.json"), SNAP_B).unwrap();
        fs::write(dir.path().join("step_0002.json"), SNAP_A).unwrap();

        let mut poller = SnapshotPoller::new(dir.path());
        match poller.poll() {
            Ok(PollOutcome::Updated(state)) => {
                assert_eq!(state.nodes.len(), 1);
                assert_eq!(state.source_name().as_deref(), Some("step_0002.json"));
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
        assert!(matches!(poller.poll(), Ok(PollOutcome::Unchanged)));
    }

    #[test]
    fn tick_swaps_newer_snapshot_and_reports_diff() {
        let dir = tempdir().expect("tempdir");
        fs::write(dir.path().join("step_0001.json"), SNAP_A).unwrap();

        let mut poller = SnapshotPoller::new(dir.path());
        let mut live = LiveGraph::new();
        assert!(matches!(
            poller.tick(&mut live),
            TickReport::Swapped { version: 1, .. }
        ));

        fs::write(dir.path().join("step_0002.json"), SNAP_B).unwrap();
        match poller.tick(&mut live) {
            TickReport::Swapped { version, diff } => {
                assert_eq!(version, 2);
                assert_eq!(diff.added, vec![2]);
                assert_eq!(diff.deactivated, 1);
            }
            other => panic!("unexpected report: {other:?}"),
        }
        assert_eq!(live.state().edges.len(), 1);
    }

    #[test]
    fn failed_decode_keeps_previous_state() {
        let dir = tempdir().expect("tempdir");
        fs::write(dir.path().join("step_0001.json"), SNAP_A).unwrap();

        let mut poller = SnapshotPoller::new(dir.path());
        let mut live = LiveGraph::new();
        poller.tick(&mut live);
        let before: Arc<GraphState> = live.current();

        fs::write(dir.path().join("step_0002.json"), r#"{ "nodes": [ { "id": 5 } ], "#).unwrap();
        match poller.tick(&mut live) {
            TickReport::Failed(PollError::Decode { source, .. }) => {
                assert!(matches!(source, DecodeError::ParseFailure { .. }))
            }
            other => panic!("unexpected report: {other:?}"),
        }
        assert!(Arc::ptr_eq(&before, &live.current()));

        fs::write(dir.path().join("step_0003.json"), r#"{ "nodes": [] }"#).unwrap();
        match poller.tick(&mut live) {
            TickReport::Failed(PollError::Decode { source, .. }) => {
                assert!(matches!(source, DecodeError::SchemaViolation(_)))
            }
            other => panic!("unexpected report: {other:?}"),
        }
        assert_eq!(*live.state(), *before);
    }

    #[test]
    fn half_written_file_is_retried() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("step_0001.json");
        fs::write(&path, r#"{ "nodes": ["#).unwrap();

        let mut poller = SnapshotPoller::new(dir.path());
        assert!(poller.poll().is_err());

        fs::write(&path, SNAP_A).unwrap();
        assert!(matches!(poller.poll(), Ok(PollOutcome::Updated(_))));
    }

    #[test]
    fn missing_directory_is_reported_not_fatal() {
        let dir = tempdir().expect("tempdir");
        let mut poller = SnapshotPoller::new(dir.path().join("gone"));
        let mut live = LiveGraph::new();

        match poller.tick(&mut live) {
            TickReport::Failed(err @ PollError::DirectoryUnavailable { .. }) => {
                assert!(err.describe().contains("unavailable"));
            }
            other => panic!("unexpected report: {other:?}"),
        }
        assert_eq!(live.version(), 0);
    }
}
