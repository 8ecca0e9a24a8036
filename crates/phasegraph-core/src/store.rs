use std::sync::Arc;

use crate::model::GraphState;
use crate::stats::SnapshotDiff;

/// The graph currently on screen.
///
/// Replacement is a single `Arc` assignment, so a reader holding the result of
/// [`LiveGraph::current`] keeps a complete snapshot for as long as it needs it.
/// `replace` takes `&mut self`: whoever owns the store is the only writer.
#[derive(Debug)]
pub struct LiveGraph {
    current: Arc<GraphState>,
    last_version: u64,
}

impl Default for LiveGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl LiveGraph {
    pub fn new() -> Self {
        Self {
            current: Arc::new(GraphState::default()),
            last_version: 0,
        }
    }

    pub fn current(&self) -> Arc<GraphState> {
        Arc::clone(&self.current)
    }

    pub fn state(&self) -> &GraphState {
        &self.current
    }

    pub fn version(&self) -> u64 {
        self.current.version
    }

    /// Stamps `next` with a fresh version and swaps it in. Returns the state
    /// that was displayed before.
    pub fn replace(&mut self, mut next: GraphState) -> Arc<GraphState> {
        self.last_version += 1;
        next.version = self.last_version;
        std::mem::replace(&mut self.current, Arc::new(next))
    }

    /// [`LiveGraph::replace`] plus the diff against the outgoing state, logged.
    pub fn swap_in(&mut self, next: GraphState) -> SnapshotDiff {
        let diff = SnapshotDiff::between(&self.current, &next);
        self.replace(next);

        let current = &self.current;
        let file = current.source_name().unwrap_or_default();
        tracing::info!(
            file = %file,
            version = current.version,
            nodes = current.stats.node_count,
            edges = current.stats.edge_count,
            active = current.stats.active_count,
            "snapshot swapped in"
        );
        tracing::debug!(
            added = diff.added.len(),
            removed = diff.removed.len(),
            activated = diff.activated,
            deactivated = diff.deactivated,
            "snapshot diff"
        );
        diff
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::decode;

    #[test]
    fn replace_bumps_version_and_returns_previous() {
        let mut live = LiveGraph::new();
        assert_eq!(live.version(), 0);

        let first = decode(br#"{ "nodes": [ { "id": 1 } ], "edges": [] }"#).unwrap();
        let previous = live.replace(first);
        assert!(previous.is_empty());
        assert_eq!(live.version(), 1);

        let second = decode(br#"{ "nodes": [ { "id": 2 } ], "edges": [] }"#).unwrap();
        let previous = live.replace(second);
        assert!(previous.nodes.contains_key(&1));
        assert_eq!(live.version(), 2);
        assert!(live.state().nodes.contains_key(&2));
    }

    #[test]
    fn readers_keep_their_snapshot_across_a_swap() {
        let mut live = LiveGraph::new();
        live.replace(decode(br#"{ "nodes": [ { "id": 1 } ], "edges": [] }"#).unwrap());

        let held = live.current();
        live.replace(decode(br#"{ "nodes": [ { "id": 2 } ], "edges": [] }"#).unwrap());

        assert_eq!(held.version, 1);
        assert!(held.nodes.contains_key(&1));
        assert!(!held.nodes.contains_key(&2));
    }
}
