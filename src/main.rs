use bevy::prelude::*;
use bevy::window::WindowResolution;

use dsviz::camera::CameraPlugin;
use dsviz::input::InputPlugin;
use dsviz::scene::VisualizerConfig;
use dsviz::visual::plugin::VisualizerPlugin;

fn main() {
    let config = VisualizerConfig::load();
    let mut app = App::new();

    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: config.window.title.clone(),
            resolution: WindowResolution::new(config.window.width, config.window.height),
            resizable: true,
            ..default()
        }),
        ..default()
    }))
    .insert_resource(ClearColor(Color::srgb(0.08, 0.09, 0.12)))
    .insert_resource(config)
    .add_plugins(CameraPlugin)
    .add_plugins(InputPlugin)
    .add_plugins(VisualizerPlugin);

    app.run();
}
