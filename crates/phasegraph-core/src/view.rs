use std::sync::atomic::{AtomicBool, Ordering};

use crate::config::EngineConfig;

/// Viewing preferences; they survive snapshot swaps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewToggles {
    pub show_normal_edges: bool,
    pub show_inactive_nodes: bool,
}

impl Default for ViewToggles {
    fn default() -> Self {
        Self {
            show_normal_edges: true,
            show_inactive_nodes: true,
        }
    }
}

/// Input sink the host forwards key and wheel events into.
pub trait ViewEvents {
    fn on_toggle_edges(&mut self);
    fn on_toggle_nodes(&mut self);
    /// Positive `delta` zooms in, negative zooms out, zero is ignored.
    fn on_zoom(&mut self, delta: f32);
}

#[derive(Debug)]
pub struct ViewController {
    toggles: ViewToggles,
    zoom: f32,
    zoom_step: f32,
    zoom_min: f32,
    zoom_max: f32,
    needs_redraw: AtomicBool,
}

impl Default for ViewController {
    fn default() -> Self {
        Self::from_config(&EngineConfig::default())
    }
}

impl ViewController {
    pub fn from_config(cfg: &EngineConfig) -> Self {
        Self {
            toggles: ViewToggles {
                show_normal_edges: cfg.show_normal_edges,
                show_inactive_nodes: cfg.show_inactive_nodes,
            },
            zoom: 1.0_f32.clamp(cfg.zoom_min, cfg.zoom_max),
            zoom_step: cfg.zoom_step,
            zoom_min: cfg.zoom_min,
            zoom_max: cfg.zoom_max,
            needs_redraw: AtomicBool::new(true),
        }
    }

    pub fn toggles(&self) -> ViewToggles {
        self.toggles
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn request_redraw(&self) {
        self.needs_redraw.store(true, Ordering::Relaxed);
    }

    /// Consumes a pending redraw request.
    pub fn take_redraw(&self) -> bool {
        self.needs_redraw.swap(false, Ordering::Relaxed)
    }
}

impl ViewEvents for ViewController {
    fn on_toggle_edges(&mut self) {
        self.toggles.show_normal_edges = !self.toggles.show_normal_edges;
        tracing::debug!(show_normal_edges = self.toggles.show_normal_edges, "toggled edges");
        self.request_redraw();
    }

    fn on_toggle_nodes(&mut self) {
        self.toggles.show_inactive_nodes = !self.toggles.show_inactive_nodes;
        tracing::debug!(show_inactive_nodes = self.toggles.show_inactive_nodes, "toggled nodes");
        self.request_redraw();
    }

    fn on_zoom(&mut self, delta: f32) {
        if delta == 0.0 || delta.is_nan() {
            return;
        }
        let factor = if delta > 0.0 {
            self.zoom_step
        } else {
            1.0 / self.zoom_step
        };
        self.zoom = (self.zoom * factor).clamp(self.zoom_min, self.zoom_max);
        self.request_redraw();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggles_flip_and_request_redraw() {
        let mut view = ViewController::default();
        assert!(view.take_redraw());
        assert!(!view.take_redraw());

        view.on_toggle_edges();
        assert!(!view.toggles().show_normal_edges);
        assert!(view.take_redraw());

        view.on_toggle_nodes();
        assert!(!view.toggles().show_inactive_nodes);
        assert!(view.take_redraw());
    }

    #[test]
    fn double_toggle_is_identity() {
        let mut view = ViewController::default();
        let before = view.toggles();
        view.on_toggle_edges();
        view.on_toggle_edges();
        assert_eq!(view.toggles(), before);
    }

    #[test]
    fn wheel_multiplies_zoom() {
        let mut view = ViewController::default();
        view.on_zoom(1.0);
        assert!((view.zoom() - 1.1).abs() < 1e-6);
        view.on_zoom(-3.0);
        assert!((view.zoom() - 1.0).abs() < 1e-6);

        view.take_redraw();
        view.on_zoom(0.0);
        assert!(!view.take_redraw());
    }

    #[test]
    fn zoom_is_bounded() {
        let mut view = ViewController::default();
        for _ in 0..500 {
            view.on_zoom(1.0);
        }
        assert_eq!(view.zoom(), 20.0);
        for _ in 0..1000 {
            view.on_zoom(-1.0);
        }
        assert_eq!(view.zoom(), 0.05);
    }
}
