//! Visual mapping from a [`GraphState`] to draw primitives.
//!
//! Color policy: hue from `phi` (radians, wrapped onto one turn), fixed
//! saturation, value from clamped `rho` with a floor so empty nodes stay
//! visible. Radius is affine in clamped `rho`.

use std::f64::consts::TAU;

use crate::config::EngineConfig;
use crate::layout::{LayoutCache, Point2};
use crate::model::{Edge, GraphState, Node, NodeId};
use crate::view::ViewToggles;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// `h`, `s`, `v` in `[0, 1]`; `h` wraps.
    pub fn from_hsv(h: f32, s: f32, v: f32) -> Self {
        let h = h.rem_euclid(1.0) * 6.0;
        let s = s.clamp(0.0, 1.0);
        let v = v.clamp(0.0, 1.0);

        let sector = h.floor();
        let f = h - sector;
        let p = v * (1.0 - s);
        let q = v * (1.0 - s * f);
        let t = v * (1.0 - s * (1.0 - f));

        match sector as i32 % 6 {
            0 => Self::new(v, t, p),
            1 => Self::new(q, v, p),
            2 => Self::new(p, v, t),
            3 => Self::new(p, q, v),
            4 => Self::new(t, p, v),
            _ => Self::new(v, p, q),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeClass {
    Transition,
    Normal,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawPrimitive {
    Edge {
        u: NodeId,
        v: NodeId,
        from: Point2,
        to: Point2,
        class: EdgeClass,
        color: Rgb,
        width: f32,
    },
    Node {
        id: NodeId,
        center: Point2,
        radius: f32,
        color: Rgb,
        active: bool,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct DrawStyle {
    pub activity_threshold: f64,
    pub radius_base: f32,
    pub radius_gain: f32,
    pub saturation: f32,
    pub value_floor: f32,
    pub transition_color: Rgb,
    pub transition_width: f32,
    pub normal_edge_color: Rgb,
    pub normal_edge_width: f32,
}

impl Default for DrawStyle {
    fn default() -> Self {
        Self::from_config(&EngineConfig::default())
    }
}

impl DrawStyle {
    pub fn from_config(cfg: &EngineConfig) -> Self {
        Self {
            activity_threshold: cfg.activity_threshold,
            radius_base: cfg.node_radius_base,
            radius_gain: cfg.node_radius_gain,
            saturation: 0.85,
            value_floor: 0.2,
            transition_color: Rgb::new(1.0, 0.15, 0.15),
            transition_width: 1.5,
            normal_edge_color: Rgb::new(0.55, 0.55, 0.6),
            normal_edge_width: 0.5,
        }
    }

    pub fn node_color(&self, node: &Node) -> Rgb {
        let hue = (node.phi / TAU).rem_euclid(1.0) as f32;
        let value = (node.density() as f32).max(self.value_floor);
        Rgb::from_hsv(hue, self.saturation, value)
    }

    pub fn node_radius(&self, node: &Node) -> f32 {
        self.radius_base + self.radius_gain * node.density() as f32
    }

    /// `None` when the edge is filtered out of the frame.
    pub fn classify_edge(&self, edge: &Edge, state: &GraphState, toggles: ViewToggles) -> Option<EdgeClass> {
        if edge.is_ts {
            return Some(EdgeClass::Transition);
        }
        if !toggles.show_normal_edges {
            return None;
        }
        let dense = |id: NodeId| {
            state
                .node(id)
                .map(|n| n.density() > self.activity_threshold)
                .unwrap_or(false)
        };
        (dense(edge.u) && dense(edge.v)).then_some(EdgeClass::Normal)
    }

    pub fn node_visible(&self, node: &Node, toggles: ViewToggles) -> bool {
        toggles.show_inactive_nodes || node.is_active()
    }
}

/// An ordered draw list: every edge precedes every node.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Frame {
    pub version: u64,
    pub primitives: Vec<DrawPrimitive>,
    pub edge_count: usize,
    pub transition_edge_count: usize,
    pub node_count: usize,
}

impl Frame {
    pub fn edges(&self) -> impl Iterator<Item = &DrawPrimitive> {
        self.primitives
            .iter()
            .filter(|p| matches!(p, DrawPrimitive::Edge { .. }))
    }

    pub fn nodes(&self) -> impl Iterator<Item = &DrawPrimitive> {
        self.primitives
            .iter()
            .filter(|p| matches!(p, DrawPrimitive::Node { .. }))
    }
}

/// Builds the draw list for `state`. Reads only; `layout` must already be
/// synced to `state` (nodes without a position are skipped).
pub fn build_frame(
    state: &GraphState,
    toggles: ViewToggles,
    layout: &LayoutCache,
    style: &DrawStyle,
) -> Frame {
    let mut frame = Frame {
        version: state.version,
        ..Frame::default()
    };

    for edge in &state.edges {
        let Some(class) = style.classify_edge(edge, state, toggles) else {
            continue;
        };
        let (Some(from), Some(to)) = (layout.get(edge.u), layout.get(edge.v)) else {
            continue;
        };
        let (color, width) = match class {
            EdgeClass::Transition => (style.transition_color, style.transition_width),
            EdgeClass::Normal => (style.normal_edge_color, style.normal_edge_width),
        };
        if class == EdgeClass::Transition {
            frame.transition_edge_count += 1;
        }
        frame.edge_count += 1;
        frame.primitives.push(DrawPrimitive::Edge {
            u: edge.u,
            v: edge.v,
            from,
            to,
            class,
            color,
            width,
        });
    }

    for (id, node) in &state.nodes {
        if !style.node_visible(node, toggles) {
            continue;
        }
        let Some(center) = layout.get(*id) else {
            continue;
        };
        frame.node_count += 1;
        frame.primitives.push(DrawPrimitive::Node {
            id: *id,
            center,
            radius: style.node_radius(node),
            color: style.node_color(node),
            active: node.is_active(),
        });
    }

    frame
}
