use bevy::prelude::Resource;

use super::config::GraphSettings;
use crate::graph::{AttachSide, Graph, Highlight, NodeId};
use crate::layout::{LayoutConfig, ScreenBounds, presets};

/// User-level graph operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphCommand {
    AddNode,
    RemoveNode,
    AddRandomEdge,
    RemoveRandomEdge,
    Randomize,
    Clear,
    ToggleDirected,
    ToggleWeighted,
    /// Switch to the next layout preset
    CyclePreset,
    /// Highlight the next node and its outgoing edges
    SelectNext,
    /// Add one to the selected node's label
    BumpLabel,
    CycleAttachSide,
    Load(String),
}

/// Attach sides in the order the UI cycles through them
const ATTACH_SIDES: [AttachSide; 5] = [
    AttachSide::Boundary,
    AttachSide::Left,
    AttachSide::Right,
    AttachSide::Top,
    AttachSide::Bottom,
];

/// Graph visualizer state
#[derive(Resource, Debug)]
pub struct GraphScene {
    graph: Graph,
    settings: GraphSettings,
    /// Index into `presets::ALL`, `None` while the configured layout is active
    preset: Option<usize>,
    selected: Option<NodeId>,
}

impl GraphScene {
    pub fn new(graph: Graph, settings: GraphSettings) -> Self {
        let mut graph = graph;
        graph.set_directed(settings.directed);
        graph.set_weighted(settings.weighted);

        GraphScene {
            graph,
            settings,
            preset: None,
            selected: None,
        }
    }

    pub fn with_layout(bounds: ScreenBounds, layout: LayoutConfig, settings: GraphSettings) -> Self {
        Self::new(Graph::new(bounds, layout), settings)
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn settings(&self) -> &GraphSettings {
        &self.settings
    }

    pub fn selected(&self) -> Option<NodeId> {
        self.selected
    }

    /// Name of the active layout preset
    pub fn preset_name(&self) -> &'static str {
        self.preset
            .and_then(|i| presets::ALL.get(i))
            .map_or("custom", |(name, _)| name)
    }

    pub fn set_bounds(&mut self, bounds: ScreenBounds) {
        if self.graph.bounds() != bounds {
            self.graph.set_bounds(bounds);
        }
    }

    pub fn apply(&mut self, command: GraphCommand) {
        match command {
            GraphCommand::AddNode => {
                if self.graph.add_node().is_none() {
                    log::info!("Node limit reached");
                }
            }
            GraphCommand::RemoveNode => {
                self.graph.remove_last_node();
            }
            GraphCommand::AddRandomEdge => {
                if self.graph.add_random_edge().is_none() {
                    log::debug!("Need two nodes for a random edge");
                }
            }
            GraphCommand::RemoveRandomEdge => {
                if let Some((from, to)) = self.graph.remove_random_edge() {
                    log::info!("Removed edge {} -> {}", from, to);
                }
            }
            GraphCommand::Randomize => {
                self.graph
                    .randomize(self.settings.random_nodes, self.settings.random_edges);
            }
            GraphCommand::Clear => self.graph.clear(),
            GraphCommand::ToggleDirected => {
                let directed = !self.graph.is_directed();
                self.graph.set_directed(directed);
                log::info!("Directed: {}", directed);
            }
            GraphCommand::ToggleWeighted => {
                let weighted = !self.graph.is_weighted();
                self.graph.set_weighted(weighted);
                log::info!("Weighted: {}", weighted);
            }
            GraphCommand::CyclePreset => self.cycle_preset(),
            GraphCommand::SelectNext => {
                let count = self.graph.node_count();
                self.selected = match self.selected {
                    _ if count == 0 => None,
                    Some(id) => Some(NodeId((id.index() + 1) % count)),
                    None => Some(NodeId(0)),
                };
            }
            GraphCommand::BumpLabel => {
                if let Some(node) = self.selected.and_then(|id| self.graph.node(id)) {
                    let (id, label) = (node.id(), node.int_label() + 1);
                    self.graph.relabel(id, label.to_string());
                }
            }
            GraphCommand::CycleAttachSide => {
                let current = ATTACH_SIDES
                    .iter()
                    .position(|&side| side == self.graph.attach_side())
                    .unwrap_or(0);
                let side = ATTACH_SIDES[(current + 1) % ATTACH_SIDES.len()];
                self.graph.set_attach_side(side);
                log::info!("Edges attach to {:?}", side);
            }
            GraphCommand::Load(path) => {
                if let Err(err) = self.graph.load_from_file(&path) {
                    log::warn!("Could not load graph: {}", err);
                }
            }
        }

        self.refresh_selection();
    }

    fn cycle_preset(&mut self) {
        let next = self.preset.map_or(0, |i| (i + 1) % presets::ALL.len());
        let (name, config) = presets::ALL[next];

        self.preset = Some(next);
        self.graph.set_layout_config(config);
        log::info!("Layout preset: {}", name);
    }

    /// Re-apply highlights so they follow edits to the graph
    fn refresh_selection(&mut self) {
        self.graph.clear_highlight();

        let Some(id) = self.selected else {
            return;
        };
        let Some(node) = self.graph.node(id) else {
            self.selected = None;
            return;
        };

        let targets: Vec<NodeId> = node.out_edges().iter().map(|edge| edge.to()).collect();
        for to in targets {
            if to != id {
                self.graph.highlight_node(to, Highlight::Secondary);
            }
            self.graph.highlight_edge(id, to, true);
        }
        self.graph.highlight_node(id, Highlight::Primary);
    }

    pub fn update(&mut self, dt: f32) {
        self.graph.update(dt);
    }
}
