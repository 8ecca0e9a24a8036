use bevy::input::mouse::{MouseScrollUnit, MouseWheel};
use bevy::prelude::{EventReader, ResMut};
use bevy_egui::{egui, EguiContexts};
use phasegraph_core::ViewEvents;

use crate::graph::ViewerState;

pub fn handle_shortcuts(mut contexts: EguiContexts, mut st: ResMut<ViewerState>) {
    let ctx = contexts.ctx_mut();

    if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        st.ui.help_open = false;
    }
    if ctx.wants_keyboard_input() {
        return;
    }

    if ctx.input(|i| i.key_pressed(egui::Key::E)) {
        st.view.on_toggle_edges();
    }
    if ctx.input(|i| i.key_pressed(egui::Key::N)) {
        st.view.on_toggle_nodes();
    }
    if ctx.input(|i| i.key_pressed(egui::Key::H) || i.key_pressed(egui::Key::F1)) {
        st.ui.help_open = !st.ui.help_open;
    }
    if ctx.input(|i| i.key_pressed(egui::Key::I)) {
        st.ui.show_hud = !st.ui.show_hud;
    }
}

/// Each wheel notch is one zoom step; pixel scrolling (touchpads) counts as
/// one step per event.
pub fn handle_zoom(
    mut contexts: EguiContexts,
    mut wheel: EventReader<MouseWheel>,
    mut st: ResMut<ViewerState>,
) {
    if contexts.ctx_mut().wants_pointer_input() {
        wheel.clear();
        return;
    }
    for ev in wheel.read() {
        let notches = match ev.unit {
            MouseScrollUnit::Line => ev.y.abs().round().max(1.0) as usize,
            MouseScrollUnit::Pixel => 1,
        };
        for _ in 0..notches {
            st.view.on_zoom(ev.y);
        }
    }
}
