use bevy::prelude::Resource;
use crossbeam_channel::Receiver;

use crate::feed::Incoming;

#[derive(Resource)]
pub struct FeedRx(pub Receiver<Incoming>);

/// Window background from the viewer config.
#[derive(Resource, Clone, Copy)]
pub struct Background(pub [f32; 3]);
