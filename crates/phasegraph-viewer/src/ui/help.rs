use bevy::prelude::ResMut;
use bevy_egui::{egui, EguiContexts};

use crate::graph::ViewerState;

pub fn help_overlay(mut contexts: EguiContexts, mut st: ResMut<ViewerState>) {
    if !st.ui.help_open {
        return;
    }

    let mut open = true;
    egui::Window::new("Help / Shortcuts")
        .collapsible(false)
        .resizable(false)
        .open(&mut open)
        .show(contexts.ctx_mut(), |ui| {
            ui.label("E: show/hide low-density edges (transition edges stay)");
            ui.label("N: show/hide inactive nodes");
            ui.label("Mouse wheel: zoom");
            ui.label("I: toggle HUD");
            ui.label("H / F1: toggle help");
            ui.label("Esc: close help");
            ui.separator();
            ui.label("Node hue follows phase, brightness and size follow density.");
            ui.label("Red edges are phase transitions.");
        });
    if !open {
        st.ui.help_open = false;
    }
}
