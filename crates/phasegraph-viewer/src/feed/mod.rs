//! Background snapshot polling.
//!
//! The poll-decode step runs on its own thread with a tokio interval timer and
//! hands each complete [`GraphState`] to the render thread over a channel. The
//! render thread is the only writer of the displayed state.

use anyhow::{Context, Result};
use crossbeam_channel::Sender;
use phasegraph_core::{EngineConfig, GraphState, PollOutcome, SnapshotPoller};
use std::path::PathBuf;
use std::thread::JoinHandle;
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::time::MissedTickBehavior;

#[derive(Debug)]
pub enum Incoming {
    Snapshot(Box<GraphState>),
    Failure(String),
    Recovered,
}

pub struct FeedHandle {
    stop_tx: Option<oneshot::Sender<()>>,
    thread: Option<JoinHandle<()>>,
}

impl FeedHandle {
    /// Stops the timer and waits for the polling thread to exit.
    pub fn stop(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        if let Some(tx) = self.stop_tx.take() {
            let _ = tx.send(());
        }
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                tracing::warn!("snapshot poller thread panicked");
            }
        }
    }
}

impl Drop for FeedHandle {
    fn drop(&mut self) {
        self.shutdown();
    }
}

pub fn spawn_poller(cfg: &EngineConfig, tx: Sender<Incoming>) -> Result<FeedHandle> {
    let dir = cfg.snapshot_dir.clone();
    let interval = cfg.poll_interval();
    let (stop_tx, stop_rx) = oneshot::channel();

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .context("build snapshot poller runtime")?;

    let thread = std::thread::Builder::new()
        .name("snapshot-poller".to_string())
        .spawn(move || rt.block_on(run(dir, interval, tx, stop_rx)))
        .context("spawn snapshot poller thread")?;

    Ok(FeedHandle {
        stop_tx: Some(stop_tx),
        thread: Some(thread),
    })
}

async fn run(
    dir: PathBuf,
    interval: Duration,
    tx: Sender<Incoming>,
    mut stop_rx: oneshot::Receiver<()>,
) {
    tracing::info!(dir = %dir.display(), interval_ms = interval.as_millis() as u64, "polling snapshots");

    let mut poller = SnapshotPoller::new(dir);
    let mut tick = tokio::time::interval(interval);
    tick.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut failing = false;

    loop {
        tokio::select! {
            _ = &mut stop_rx => break,
            _ = tick.tick() => {
                let msg = match poller.poll() {
                    Ok(outcome) => {
                        let was_failing = std::mem::replace(&mut failing, false);
                        match outcome {
                            PollOutcome::Updated(state) => Some(Incoming::Snapshot(Box::new(state))),
                            PollOutcome::Empty | PollOutcome::Unchanged if was_failing => Some(Incoming::Recovered),
                            PollOutcome::Empty | PollOutcome::Unchanged => None,
                        }
                    }
                    Err(err) => {
                        failing = true;
                        Some(Incoming::Failure(err.describe()))
                    }
                };
                if let Some(msg) = msg {
                    // render side gone: nothing left to feed
                    if tx.send(msg).is_err() {
                        break;
                    }
                }
            }
        }
    }

    tracing::debug!("snapshot poller stopped");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn delivers_snapshot_and_stops() {
        let dir = tempdir().expect("tempdir");
        fs::write(
            dir.path().join("step_0001.json"),
            r#"{ "nodes": [ { "id": 1 } ], "edges": [] }"#,
        )
        .unwrap();

        let cfg = EngineConfig {
            snapshot_dir: dir.path().to_path_buf(),
            poll_interval_ms: 10,
            ..EngineConfig::default()
        };
        let (tx, rx) = crossbeam_channel::unbounded();
        let handle = spawn_poller(&cfg, tx).expect("spawn");

        let msg = rx
            .recv_timeout(Duration::from_secs(5))
            .expect("snapshot delivered");
        match msg {
            Incoming::Snapshot(state) => assert!(state.nodes.contains_key(&1)),
            other => panic!("unexpected message: {other:?}"),
        }
        handle.stop();
    }

    #[test]
    fn reports_missing_directory() {
        let dir = tempdir().expect("tempdir");
        let cfg = EngineConfig {
            snapshot_dir: dir.path().join("missing"),
            poll_interval_ms: 10,
            ..EngineConfig::default()
        };
        let (tx, rx) = crossbeam_channel::unbounded();
        let handle = spawn_poller(&cfg, tx).expect("spawn");

        let msg = rx
            .recv_timeout(Duration::from_secs(5))
            .expect("failure delivered");
        assert!(matches!(msg, Incoming::Failure(_)));
        handle.stop();
    }
}
