use bevy::prelude::Res;
use bevy_egui::{egui, EguiContexts};

use crate::graph::ViewerState;

const HUD_EDGE_PADDING: f32 = 8.0;

pub fn hud_overlay(mut contexts: EguiContexts, st: Res<ViewerState>) {
    if !st.ui.show_hud {
        return;
    }
    let ctx = contexts.ctx_mut();
    let screen = ctx.screen_rect();
    let pos = egui::pos2(
        screen.min.x + HUD_EDGE_PADDING,
        screen.min.y + HUD_EDGE_PADDING,
    );

    let graph = st.live.state();
    let stats = &graph.stats;
    let toggles = st.view.toggles();

    egui::Area::new("hud".into())
        .order(egui::Order::Foreground)
        .fixed_pos(pos)
        .show(ctx, |ui| {
            ui.group(|ui| {
                match graph.source_name() {
                    Some(file) => ui.label(format!("Snapshot: {file} (v{})", graph.version)),
                    None => ui.label("Waiting for snapshots…"),
                };
                ui.label(format!(
                    "Nodes: {} ({} active)",
                    stats.node_count, stats.active_count
                ));
                ui.label(format!(
                    "Edges: {} ({} transition)",
                    stats.edge_count, stats.ts_edge_count
                ));
                if stats.dropped_edges > 0 {
                    ui.label(format!("Dropped edges: {}", stats.dropped_edges));
                }
                ui.label(format!(
                    "rho mean/std: {:.3} / {:.3}",
                    stats.rho_mean, stats.rho_std
                ));
                if let Some(n_pot) = graph.n_pot {
                    ui.label(format!("N_pot: {n_pot:.3}"));
                }
                ui.label(format!(
                    "Drawn: {} nodes / {} edges",
                    st.frame.node_count, st.frame.edge_count
                ));
                ui.label(format!(
                    "Edges [E]: {}  Inactive [N]: {}  Zoom: {:.2}x",
                    on_off(toggles.show_normal_edges),
                    on_off(toggles.show_inactive_nodes),
                    st.view.zoom()
                ));
                if let Some(diff) = &st.last_diff {
                    if !diff.is_empty() {
                        ui.label(format!(
                            "Last change: +{} -{} nodes, {} activated, {} deactivated, edges {:+}",
                            diff.added.len(),
                            diff.removed.len(),
                            diff.activated,
                            diff.deactivated,
                            diff.edge_delta
                        ));
                    }
                }
                if let Some(err) = &st.last_error {
                    ui.colored_label(egui::Color32::LIGHT_RED, format!("Last poll failed: {err}"));
                }
            });
        });
}

fn on_off(flag: bool) -> &'static str {
    if flag {
        "on"
    } else {
        "off"
    }
}
