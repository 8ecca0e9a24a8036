use bevy::prelude::*;

use crate::app::resources::Background;
use crate::graph::ViewerState;

pub fn setup_scene(mut commands: Commands, background: Res<Background>) {
    let [r, g, b] = background.0;
    commands.insert_resource(ClearColor(Color::srgb(r, g, b)));
    commands.spawn(Camera2dBundle::default());
}

/// Orthographic scale is the inverse of the view zoom.
pub fn apply_zoom(st: Res<ViewerState>, mut cam_q: Query<&mut OrthographicProjection, With<Camera>>) {
    let Ok(mut projection) = cam_q.get_single_mut() else {
        return;
    };
    let scale = 1.0 / st.view.zoom();
    if projection.scale != scale {
        projection.scale = scale;
    }
}
