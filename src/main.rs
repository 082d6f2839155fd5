//! Cascade — email funnel explorer. Runs the funnel_diagram app.

use bevy::prelude::*;
use funnel_diagram::{
    config, diagram_plugin, hud_plugin, init_source_channel, link_plugin, summary_plugin,
    RecordBuffer,
};

fn main() {
    let _ = dotenvy::dotenv();
    let source = config::source_config();
    let theme = config::theme_config();
    let channel = init_source_channel(source);

    let mut app = App::new();
    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Cascade".into(),
            resolution: (1280., 720.).into(),
            ..default()
        }),
        ..default()
    }))
    .insert_resource(ClearColor(theme.background()))
    .insert_resource(theme)
    .insert_resource(channel)
    .add_plugins(diagram_plugin)
    .add_plugins(link_plugin)
    .add_plugins(hud_plugin)
    .add_plugins(summary_plugin);

    if let Some(path) = config::record_path() {
        app.insert_resource(RecordBuffer::new(path));
    }

    app.run();
}
