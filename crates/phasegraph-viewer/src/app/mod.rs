use bevy::prelude::*;
use crossbeam_channel::Receiver;

use crate::app::resources::{Background, FeedRx};
use crate::feed::Incoming;
use crate::graph::ViewerState;
use crate::util::config::ViewerConfig;

pub mod resources;

pub struct PhaseGraphViewerPlugin {
    pub cfg: ViewerConfig,
    pub rx: Receiver<Incoming>,
}

impl Plugin for PhaseGraphViewerPlugin {
    fn build(&self, app: &mut App) {
        let mut st = ViewerState::new(&self.cfg.engine);
        st.ui.show_hud = self.cfg.show_hud;

        app.insert_resource(st)
            .insert_resource(FeedRx(self.rx.clone()))
            .insert_resource(Background(self.cfg.background))
            .add_systems(Startup, crate::render::setup_scene)
            .add_systems(
                Update,
                (
                    pump_feed,
                    crate::ui::handle_shortcuts,
                    crate::ui::handle_zoom,
                    crate::ui::hud_overlay,
                    crate::ui::help_overlay,
                    crate::render::apply_zoom,
                    crate::render::draw_frame,
                )
                    .chain(),
            );
    }
}

fn pump_feed(mut st: ResMut<ViewerState>, rx: Res<FeedRx>) {
    st.apply_batch(rx.0.try_iter().take(1_000));
}
