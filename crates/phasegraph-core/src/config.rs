use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub snapshot_dir: PathBuf,
    pub poll_interval_ms: u64,
    /// World units per layout unit.
    pub scale: f64,
    pub activity_threshold: f64,
    pub jitter: f64,
    pub jitter_seed: Option<u64>,
    pub node_radius_base: f32,
    pub node_radius_gain: f32,
    pub zoom_step: f32,
    pub zoom_min: f32,
    pub zoom_max: f32,
    pub show_normal_edges: bool,
    pub show_inactive_nodes: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            snapshot_dir: PathBuf::from("outputs/snapshots"),
            poll_interval_ms: 500,
            scale: 40.0,
            activity_threshold: 0.4,
            jitter: 0.2,
            jitter_seed: None,
            node_radius_base: 4.0,
            node_radius_gain: 8.0,
            zoom_step: 1.1,
            zoom_min: 0.05,
            zoom_max: 20.0,
            show_normal_edges: true,
            show_inactive_nodes: true,
        }
    }
}

impl EngineConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Replaces values the engine cannot work with by their defaults.
    pub fn validated(mut self) -> Self {
        let d = Self::default();

        if self.poll_interval_ms == 0 {
            self.poll_interval_ms = d.poll_interval_ms;
        }
        if !(self.scale.is_finite() && self.scale > 0.0) {
            self.scale = d.scale;
        }
        if !self.activity_threshold.is_finite() {
            self.activity_threshold = d.activity_threshold;
        }
        if !(self.jitter.is_finite() && self.jitter >= 0.0) {
            self.jitter = d.jitter;
        }
        if !(self.node_radius_base.is_finite() && self.node_radius_base >= 0.0) {
            self.node_radius_base = d.node_radius_base;
        }
        if !self.node_radius_gain.is_finite() {
            self.node_radius_gain = d.node_radius_gain;
        }
        if !(self.zoom_step.is_finite() && self.zoom_step > 1.0) {
            self.zoom_step = d.zoom_step;
        }
        if !(self.zoom_min.is_finite()
            && self.zoom_max.is_finite()
            && self.zoom_min > 0.0
            && self.zoom_min < self.zoom_max)
        {
            self.zoom_min = d.zoom_min;
            self.zoom_max = d.zoom_max;
        }

        self
    }
}
