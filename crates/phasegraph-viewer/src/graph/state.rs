use bevy::prelude::Resource;
use phasegraph_core::{
    build_frame, DrawStyle, EngineConfig, Frame, GraphState, LayoutCache, LiveGraph,
    SnapshotDiff, ViewController,
};

use crate::feed::Incoming;

#[derive(Debug, Default)]
pub struct UiState {
    pub help_open: bool,
    pub show_hud: bool,
}

/// Everything the render thread owns: the displayed graph, its layout, the
/// view toggles and the last built frame.
#[derive(Resource)]
pub struct ViewerState {
    pub live: LiveGraph,
    pub layout: LayoutCache,
    pub view: ViewController,
    pub style: DrawStyle,
    pub frame: Frame,
    pub last_diff: Option<SnapshotDiff>,
    pub last_error: Option<String>,
    /// Snapshots that arrived in the same batch as a newer one and were never shown.
    pub superseded: u64,
    pub ui: UiState,
}

impl ViewerState {
    pub fn new(cfg: &EngineConfig) -> Self {
        Self {
            live: LiveGraph::new(),
            layout: LayoutCache::from_config(cfg),
            view: ViewController::from_config(cfg),
            style: DrawStyle::from_config(cfg),
            frame: Frame::default(),
            last_diff: None,
            last_error: None,
            superseded: 0,
            ui: UiState {
                help_open: false,
                show_hud: true,
            },
        }
    }

    pub fn apply(&mut self, msg: Incoming) {
        self.apply_batch(std::iter::once(msg));
    }

    /// Drains one batch of feed messages. Only the newest snapshot in the
    /// batch is swapped in.
    pub fn apply_batch<I>(&mut self, msgs: I)
    where
        I: IntoIterator<Item = Incoming>,
    {
        let mut latest: Option<Box<GraphState>> = None;
        for msg in msgs {
            match msg {
                Incoming::Snapshot(state) => {
                    if latest.replace(state).is_some() {
                        self.superseded += 1;
                    }
                    self.last_error = None;
                }
                Incoming::Failure(message) => self.last_error = Some(message),
                Incoming::Recovered => self.last_error = None,
            }
        }

        if let Some(state) = latest {
            self.last_diff = Some(self.live.swap_in(*state));
            self.view.request_redraw();
        }
    }

    /// Rebuilds the cached frame when a redraw is pending or the displayed
    /// version moved. Returns true when it did.
    pub fn refresh_frame(&mut self) -> bool {
        let pending = self.view.take_redraw();
        if !pending && self.frame.version == self.live.version() {
            return false;
        }

        let state = self.live.current();
        self.layout.sync(&state);
        self.frame = build_frame(&state, self.view.toggles(), &self.layout, &self.style);
        true
    }
}
