use bevy::input::ButtonState;
use bevy::input::keyboard::{Key, KeyboardInput};
use bevy::prelude::*;

use crate::scene::{ActiveScene, DialogKind, GraphCommand, ListScene, VisualizerConfig};

pub struct InputPlugin;
impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<SceneCommand>()
            .add_systems(Update, collect_scene_commands);
    }
}

/// A user request, produced from raw keyboard input
#[derive(Message, Debug, Clone, PartialEq)]
pub enum SceneCommand {
    SwitchScene,
    Graph(GraphCommand),
    List(ListCommand),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ListCommand {
    /// Open a dialog, or close it if it is already open
    ToggleDialog(DialogKind),
    CloseDialog,
    Type(char),
    Backspace,
    Submit,
    Randomize,
    Load(String),
    Clear,
    TogglePause,
    /// Restart the running animation
    Replay,
    /// Jump to the end of the running animation
    Skip,
    SpeedUp,
    SlowDown,
}

/// Key reference shown in the HUD
pub fn help(active: ActiveScene) -> &'static str {
    match active {
        ActiveScene::Graph => {
            "[N] add node  [Backspace] remove node  [E]/[X] add/remove random edge  [R] randomize  [C] clear\n\
             [D] directed  [W] weighted  [P] layout preset  [A] attach side  [S] select next  [B] bump label  [L] load file"
        }
        ActiveScene::List => {
            "[I] insert  [A] add after  [U] update  [F] search  [X] delete  [R] random  [L] load  [C] clear\n\
             [Space] pause  [+/-] speed  [Left] replay  [Right] skip  (dialog: type a number, [Enter] submit, [Esc] cancel)"
        }
    }
}

pub fn collect_scene_commands(
    keys: Res<ButtonInput<KeyCode>>,
    mut typed: MessageReader<KeyboardInput>,
    active: Res<ActiveScene>,
    list: Res<ListScene>,
    config: Res<VisualizerConfig>,
    mut out: MessageWriter<SceneCommand>,
) {
    // An open dialog takes all keyboard input
    if *active == ActiveScene::List && list.dialog().is_some() {
        for ev in typed.read() {
            if ev.state != ButtonState::Pressed {
                continue;
            }
            match &ev.logical_key {
                Key::Character(text) => {
                    for c in text.chars() {
                        out.write(SceneCommand::List(ListCommand::Type(c)));
                    }
                }
                Key::Space => {
                    out.write(SceneCommand::List(ListCommand::Type(' ')));
                }
                _ => {}
            }
        }

        let bindings = [
            (KeyCode::Enter, ListCommand::Submit),
            (KeyCode::NumpadEnter, ListCommand::Submit),
            (KeyCode::Escape, ListCommand::CloseDialog),
            (KeyCode::Backspace, ListCommand::Backspace),
        ];
        for (key, command) in bindings {
            if keys.just_pressed(key) {
                out.write(SceneCommand::List(command));
            }
        }
        return;
    }

    // Characters only matter while a dialog is open
    typed.clear();

    if keys.just_pressed(KeyCode::Tab) {
        out.write(SceneCommand::SwitchScene);
    }

    match *active {
        ActiveScene::Graph => {
            let bindings = [
                (KeyCode::KeyN, GraphCommand::AddNode),
                (KeyCode::Backspace, GraphCommand::RemoveNode),
                (KeyCode::KeyE, GraphCommand::AddRandomEdge),
                (KeyCode::KeyX, GraphCommand::RemoveRandomEdge),
                (KeyCode::KeyR, GraphCommand::Randomize),
                (KeyCode::KeyC, GraphCommand::Clear),
                (KeyCode::KeyD, GraphCommand::ToggleDirected),
                (KeyCode::KeyW, GraphCommand::ToggleWeighted),
                (KeyCode::KeyP, GraphCommand::CyclePreset),
                (KeyCode::KeyS, GraphCommand::SelectNext),
                (KeyCode::KeyB, GraphCommand::BumpLabel),
                (KeyCode::KeyA, GraphCommand::CycleAttachSide),
                (KeyCode::KeyL, GraphCommand::Load(config.files.graph.clone())),
            ];
            for (key, command) in bindings {
                if keys.just_pressed(key) {
                    out.write(SceneCommand::Graph(command));
                }
            }
        }
        ActiveScene::List => {
            let bindings = [
                (KeyCode::KeyI, ListCommand::ToggleDialog(DialogKind::Insert)),
                (KeyCode::KeyA, ListCommand::ToggleDialog(DialogKind::AddAfter)),
                (KeyCode::KeyU, ListCommand::ToggleDialog(DialogKind::Update)),
                (KeyCode::KeyF, ListCommand::ToggleDialog(DialogKind::Search)),
                (KeyCode::KeyX, ListCommand::ToggleDialog(DialogKind::Delete)),
                (KeyCode::KeyR, ListCommand::Randomize),
                (KeyCode::KeyL, ListCommand::Load(config.files.list.clone())),
                (KeyCode::KeyC, ListCommand::Clear),
                (KeyCode::Space, ListCommand::TogglePause),
                (KeyCode::ArrowLeft, ListCommand::Replay),
                (KeyCode::ArrowRight, ListCommand::Skip),
                (KeyCode::Equal, ListCommand::SpeedUp),
                (KeyCode::NumpadAdd, ListCommand::SpeedUp),
                (KeyCode::Minus, ListCommand::SlowDown),
                (KeyCode::NumpadSubtract, ListCommand::SlowDown),
            ];
            for (key, command) in bindings {
                if keys.just_pressed(key) {
                    out.write(SceneCommand::List(command));
                }
            }
        }
    }
}
