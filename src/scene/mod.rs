//! Scene state: one struct per visualizer screen, plus the shared config

mod config;
mod dialog;
mod graph_scene;
mod list_scene;

use bevy::prelude::Resource;

pub use config::{FileSettings, GraphSettings, VisualizerConfig, WindowSettings};
pub use dialog::{Dialog, DialogKind, InputError, Stage, TextInput};
pub use graph_scene::{GraphCommand, GraphScene};
pub use list_scene::{ListConfig, ListFrame, ListOp, ListScene, ListView, Status, circular_position, circular_positions};

/// Which scene is on screen
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveScene {
    #[default]
    Graph,
    List,
}

impl ActiveScene {
    pub fn toggled(self) -> Self {
        match self {
            ActiveScene::Graph => ActiveScene::List,
            ActiveScene::List => ActiveScene::Graph,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            ActiveScene::Graph => "Graph",
            ActiveScene::List => "Circular Linked List",
        }
    }
}
