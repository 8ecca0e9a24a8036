use std::collections::BTreeMap;

use crate::model::{Edge, GraphState, Node, NodeId};

/// Per-snapshot summary, computed once at decode time.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SnapshotStats {
    pub node_count: usize,
    pub edge_count: usize,
    pub ts_edge_count: usize,
    pub active_count: usize,
    pub rho_mean: f64,
    pub rho_std: f64,
    pub dropped_edges: usize,
}

impl SnapshotStats {
    pub fn compute(nodes: &BTreeMap<NodeId, Node>, edges: &[Edge], dropped_edges: usize) -> Self {
        let node_count = nodes.len();
        let (rho_mean, rho_std) = if node_count == 0 {
            (0.0, 0.0)
        } else {
            let n = node_count as f64;
            let mean = nodes.values().map(Node::density).sum::<f64>() / n;
            let var = nodes
                .values()
                .map(|node| (node.density() - mean).powi(2))
                .sum::<f64>()
                / n;
            (mean, var.sqrt())
        };

        Self {
            node_count,
            edge_count: edges.len(),
            ts_edge_count: edges.iter().filter(|e| e.is_ts).count(),
            active_count: nodes.values().filter(|n| n.is_active()).count(),
            rho_mean,
            rho_std,
            dropped_edges,
        }
    }
}

/// What changed between two consecutively displayed snapshots.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SnapshotDiff {
    pub added: Vec<NodeId>,
    pub removed: Vec<NodeId>,
    pub activated: usize,
    pub deactivated: usize,
    pub edge_delta: i64,
}

impl SnapshotDiff {
    pub fn between(old: &GraphState, new: &GraphState) -> Self {
        let mut diff = SnapshotDiff {
            edge_delta: new.edges.len() as i64 - old.edges.len() as i64,
            ..SnapshotDiff::default()
        };

        for (id, node) in &new.nodes {
            match old.nodes.get(id) {
                None => diff.added.push(*id),
                Some(prev) => match (prev.is_active(), node.is_active()) {
                    (false, true) => diff.activated += 1,
                    (true, false) => diff.deactivated += 1,
                    _ => {}
                },
            }
        }
        diff.removed = old
            .nodes
            .keys()
            .filter(|id| !new.nodes.contains_key(id))
            .copied()
            .collect();

        diff
    }

    pub fn is_empty(&self) -> bool {
        self.added.is_empty()
            && self.removed.is_empty()
            && self.activated == 0
            && self.deactivated == 0
            && self.edge_delta == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(id: NodeId, rho: f64, sigma: i64) -> Node {
        Node {
            id,
            rho,
            sigma,
            ..Node::default()
        }
    }

    fn state(nodes: &[Node], edges: &[Edge]) -> GraphState {
        let nodes: BTreeMap<NodeId, Node> = nodes.iter().map(|n| (n.id, *n)).collect();
        let stats = SnapshotStats::compute(&nodes, edges, 0);
        GraphState {
            nodes,
            edges: edges.to_vec(),
            stats,
            ..GraphState::default()
        }
    }

    #[test]
    fn stats_use_clamped_density() {
        let st = state(&[node(1, 1.7, 1), node(2, -0.3, 0)], &[]);
        assert_eq!(st.stats.node_count, 2);
        assert_eq!(st.stats.active_count, 1);
        assert!((st.stats.rho_mean - 0.5).abs() < 1e-12);
        assert!((st.stats.rho_std - 0.5).abs() < 1e-12);
    }

    #[test]
    fn stats_of_empty_snapshot_are_zero() {
        let st = state(&[], &[]);
        assert_eq!(st.stats, SnapshotStats::default());
    }

    #[test]
    fn diff_reports_membership_and_sigma_flips() {
        let old = state(
            &[node(1, 0.5, 0), node(2, 0.5, 1), node(3, 0.5, 1)],
            &[Edge { u: 1, v: 2, is_ts: false }],
        );
        let new = state(&[node(1, 0.5, 1), node(2, 0.5, 0), node(4, 0.5, 0)], &[]);

        let diff = SnapshotDiff::between(&old, &new);
        assert_eq!(diff.added, vec![4]);
        assert_eq!(diff.removed, vec![3]);
        assert_eq!(diff.activated, 1);
        assert_eq!(diff.deactivated, 1);
        assert_eq!(diff.edge_delta, -1);
        assert!(!diff.is_empty());
        assert!(SnapshotDiff::between(&new, &new).is_empty());
    }
}
