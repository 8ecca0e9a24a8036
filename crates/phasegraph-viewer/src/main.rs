mod app;
mod feed;
mod graph;
mod render;
mod ui;
mod util;

use anyhow::Context;
use bevy::log::LogPlugin;
use bevy::prelude::*;
use bevy_egui::EguiPlugin;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::app::PhaseGraphViewerPlugin;
use crate::util::cli::Args;
use crate::util::config;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let args = Args::parse();

    let mut cfg = match &args.config {
        Some(path) => config::load_from_path(path)?,
        None => config::load_or_default(),
    };
    args.apply(&mut cfg);
    cfg.engine = cfg.engine.clone().validated();

    if args.save_config {
        let path = config::save(&cfg).context("failed to save viewer config")?;
        tracing::info!(path = %path.display(), "saved viewer config");
    }

    let (tx, rx) = crossbeam_channel::unbounded();
    let feed = feed::spawn_poller(&cfg.engine, tx)?;

    let exit = App::new()
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: cfg.window_title.clone(),
                        ..default()
                    }),
                    ..default()
                })
                // tracing is already initialised above
                .disable::<LogPlugin>(),
        )
        .add_plugins(EguiPlugin)
        .add_plugins(PhaseGraphViewerPlugin { cfg, rx })
        .run();
    tracing::debug!(?exit, "viewer closed");

    feed.stop();
    Ok(())
}
