use bevy::prelude::*;

use crate::layout::ScreenBounds;

pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<GameCamera>()
            .add_systems(Startup, setup_camera)
            .add_systems(Update, update_camera_resource);
    }
}

/// Visible world rectangle; a 2D camera maps one unit to one logical pixel
#[derive(Resource, Default)]
pub struct GameCamera {
    pub bounds: ScreenBounds,
}

#[derive(Component)]
pub struct MainCamera;

/// Orthographic 2D camera centered on the origin, y up
fn setup_camera(mut commands: Commands) {
    commands.spawn((Camera2d, MainCamera));
}

/// Update camera resource when window is resized
fn update_camera_resource(mut game_camera: ResMut<GameCamera>, windows: Query<&Window>) {
    let Ok(window) = windows.single() else {
        return;
    };

    let bounds = ScreenBounds::from_size(window.width(), window.height());
    // Only update if the size changed
    if bounds != game_camera.bounds {
        game_camera.bounds = bounds;
        info!("Camera bounds updated: {:?}", bounds);
    }
}
