use bevy::prelude::*;

use crate::camera::GameCamera;
use crate::input::{ListCommand, SceneCommand, collect_scene_commands};
use crate::scene::{ActiveScene, GraphCommand, GraphScene, ListScene, VisualizerConfig};
use crate::visual::render::{draw_graph, draw_list};
use crate::visual::ui::{spawn_hud, sync_labels, update_hud};

/// Fastest list playback speed reachable from the keyboard
const MAX_SPEED: f32 = 8.0;

pub struct VisualizerPlugin;

impl Plugin for VisualizerPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ActiveScene>()
            .add_systems(Startup, (setup_scenes, spawn_hud).chain())
            .add_systems(
                Update,
                (
                    apply_scene_commands,
                    sync_bounds,
                    // Only the visible scene advances
                    update_list_scene.run_if(resource_equals(ActiveScene::List)),
                    update_graph_scene.run_if(resource_equals(ActiveScene::Graph)),
                    draw_graph.run_if(resource_equals(ActiveScene::Graph)),
                    draw_list.run_if(resource_equals(ActiveScene::List)),
                    sync_labels,
                    update_hud,
                )
                    .chain()
                    .after(collect_scene_commands),
            );
    }
}

fn setup_scenes(mut commands: Commands, config: Res<VisualizerConfig>, camera: Res<GameCamera>) {
    let mut graph = GraphScene::with_layout(camera.bounds, config.layout, config.graph);
    graph.apply(GraphCommand::Randomize);
    commands.insert_resource(graph);

    let mut list = ListScene::new(config.list);
    list.set_center(camera.bounds.center());
    commands.insert_resource(list);

    info!("Scenes ready");
}

fn apply_scene_commands(
    mut messages: MessageReader<SceneCommand>,
    mut active: ResMut<ActiveScene>,
    mut graph: ResMut<GraphScene>,
    mut list: ResMut<ListScene>,
) {
    for command in messages.read() {
        match command {
            SceneCommand::SwitchScene => {
                *active = active.toggled();
                info!("Scene: {}", active.title());
            }
            SceneCommand::Graph(command) => graph.apply(command.clone()),
            SceneCommand::List(command) => apply_list_command(&mut list, command),
        }
    }
}

fn apply_list_command(list: &mut ListScene, command: &ListCommand) {
    match command {
        ListCommand::ToggleDialog(kind) => list.toggle_dialog(*kind),
        ListCommand::CloseDialog => list.close_dialog(),
        ListCommand::Type(c) => list.type_char(*c),
        ListCommand::Backspace => list.backspace(),
        ListCommand::Submit => {
            if let Err(err) = list.submit_dialog() {
                warn!("Rejected input: {}", err);
            }
        }
        ListCommand::Randomize => {
            let count = list.config().random_count;
            list.randomize(count);
        }
        ListCommand::Load(path) => {
            if let Err(err) = list.load_from_file(path) {
                warn!("Could not load list: {}", err);
            }
        }
        ListCommand::Clear => list.clear(),
        ListCommand::TogglePause => list.toggle_pause(),
        ListCommand::Replay => list.replay(),
        ListCommand::Skip => list.skip(),
        ListCommand::SpeedUp => {
            let speed = (list.speed() * 2.0).min(MAX_SPEED);
            list.set_speed(speed);
        }
        ListCommand::SlowDown => {
            let speed = list.speed() * 0.5;
            list.set_speed(speed);
        }
    }
}

/// Keep both scenes fitted to the window
fn sync_bounds(camera: Res<GameCamera>, mut graph: ResMut<GraphScene>, mut list: ResMut<ListScene>) {
    if !camera.is_changed() {
        return;
    }

    graph.set_bounds(camera.bounds);
    list.set_center(camera.bounds.center());
}

fn update_list_scene(time: Res<Time>, mut list: ResMut<ListScene>) {
    list.update(time.delta_secs());
}

fn update_graph_scene(time: Res<Time>, mut graph: ResMut<GraphScene>) {
    graph.update(time.delta_secs());
}
