use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::stats::SnapshotStats;

pub type NodeId = i64;

/// One node of a snapshot. Values are kept as read; `rho` is only trusted
/// through [`Node::density`].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    pub rho: f64,
    pub phi: f64,
    pub sigma: i64,
    pub x: Option<f64>,
    pub y: Option<f64>,
}

impl Node {
    pub fn density(&self) -> f64 {
        clamp_unit(self.rho)
    }

    pub fn is_active(&self) -> bool {
        self.sigma == 1
    }

    pub fn explicit_position(&self) -> Option<(f64, f64)> {
        match (self.x, self.y) {
            (Some(x), Some(y)) => Some((x, y)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    pub u: NodeId,
    pub v: NodeId,
    pub is_ts: bool,
}

/// A fully decoded snapshot. Edges always reference nodes present in `nodes`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GraphState {
    pub nodes: BTreeMap<NodeId, Node>,
    pub edges: Vec<Edge>,
    pub source: Option<PathBuf>,
    /// Assigned by [`crate::LiveGraph::replace`]; 0 means "never swapped in".
    pub version: u64,
    pub n_pot: Option<f64>,
    pub stats: SnapshotStats,
}

impl GraphState {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    pub fn source_name(&self) -> Option<String> {
        self.source
            .as_ref()
            .and_then(|p| p.file_name())
            .map(|name| name.to_string_lossy().to_string())
    }
}

pub fn clamp_unit(v: f64) -> f64 {
    if v.is_nan() {
        0.0
    } else {
        v.clamp(0.0, 1.0)
    }
}
