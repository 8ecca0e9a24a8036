use bevy::prelude::*;
use phasegraph_core::{DrawPrimitive, Point2, Rgb};

use crate::graph::ViewerState;

// Gizmo lines have one global width; wider edges get parallel strokes.
const STROKE_SPACING: f32 = 0.6;

fn to_vec(p: Point2) -> Vec2 {
    Vec2::new(p.x, p.y)
}

fn to_color(c: Rgb) -> Color {
    Color::srgb(c.r, c.g, c.b)
}

/// Perpendicular offsets of the strokes that make up an edge of `width`.
pub(crate) fn stroke_offsets(width: f32) -> Vec<f32> {
    let count = (width.ceil() as usize).max(1);
    let mid = (count - 1) as f32 * 0.5;
    (0..count)
        .map(|i| (i as f32 - mid) * STROKE_SPACING)
        .collect()
}

pub fn draw_frame(mut st: ResMut<ViewerState>, mut gizmos: Gizmos) {
    if st.refresh_frame() {
        tracing::trace!(
            version = st.frame.version,
            edges = st.frame.edge_count,
            nodes = st.frame.node_count,
            "frame rebuilt"
        );
    }

    // Frame order is edges then nodes, so nodes paint over their links.
    for prim in &st.frame.primitives {
        match prim {
            DrawPrimitive::Edge {
                from,
                to,
                color,
                width,
                ..
            } => {
                let (a, b) = (to_vec(*from), to_vec(*to));
                let normal = (b - a).perp().normalize_or_zero();
                let color = to_color(*color);
                for offset in stroke_offsets(*width) {
                    gizmos.line_2d(a + normal * offset, b + normal * offset, color);
                }
            }
            DrawPrimitive::Node {
                center,
                radius,
                color,
                active,
                ..
            } => {
                let c = to_vec(*center);
                let color = to_color(*color);
                gizmos.circle_2d(c, *radius, color);
                if *active {
                    gizmos.circle_2d(c, *radius * 0.5, color);
                }
            }
        }
    }
}
