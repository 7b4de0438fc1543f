use bevy::math::Vec2;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::f32::consts::TAU;

use super::edge::{AttachSide, Edge, EdgeType};
use super::node::{GraphNode, Highlight, NodeId};
use crate::layout::{ForceLayout, LayoutConfig, ScreenBounds};
use crate::loader::{GraphFile, LoadError, parse_graph, read_text};

/// Node cap for interactive additions
pub const MAX_NODES: usize = 10;

/// Upper bound on nodes taken from a graph file
pub const MAX_LOADED_NODES: usize = 64;
/// Upper bound for random edge weights
pub const MAX_WEIGHT: i32 = 100;
/// Initial circle radius relative to the smaller screen side
const BUILD_RADIUS_FACTOR: f32 = 0.4;

/// Logical edge record; the visual [`Edge`] lives in the source node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeTuple {
    pub from: NodeId,
    pub to: NodeId,
    pub weight: i32,
}

/// Graph with force-directed layout
///
/// Nodes are stored in index order and always removed from the back, so a
/// node's [`NodeId`] is its position in `nodes`.
#[derive(Debug, Clone)]
pub struct Graph {
    nodes: Vec<GraphNode>,
    edges: Vec<EdgeTuple>,
    layout: ForceLayout,
    /// Full screen rectangle; nodes are clamped to it minus the layout margin
    bounds: ScreenBounds,
    directed: bool,
    weighted: bool,
    /// Side new and existing edges attach to on their target
    side: AttachSide,
    rng: StdRng,
}

impl Default for Graph {
    fn default() -> Self {
        Self::new(ScreenBounds::default(), LayoutConfig::default())
    }
}

impl Graph {
    pub fn new(bounds: ScreenBounds, config: LayoutConfig) -> Self {
        Self::with_rng(bounds, config, StdRng::from_os_rng())
    }

    /// Deterministic graph for tests and replays
    pub fn with_seed(bounds: ScreenBounds, config: LayoutConfig, seed: u64) -> Self {
        Self::with_rng(bounds, config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(bounds: ScreenBounds, config: LayoutConfig, rng: StdRng) -> Self {
        Graph {
            nodes: Vec::new(),
            edges: Vec::new(),
            layout: ForceLayout::new(config),
            bounds,
            directed: true,
            weighted: false,
            side: AttachSide::default(),
            rng,
        }
    }

    pub fn nodes(&self) -> &[GraphNode] {
        &self.nodes
    }

    pub fn node(&self, id: NodeId) -> Option<&GraphNode> {
        self.nodes.get(id.index())
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edges(&self) -> &[EdgeTuple] {
        &self.edges
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_directed(&self) -> bool {
        self.directed
    }

    pub fn is_weighted(&self) -> bool {
        self.weighted
    }

    pub fn layout(&self) -> &ForceLayout {
        &self.layout
    }

    pub fn bounds(&self) -> ScreenBounds {
        self.bounds
    }

    /// Rectangle node positions are clamped to
    pub fn layout_bounds(&self) -> ScreenBounds {
        self.bounds.inset(self.layout.config().margin)
    }

    pub fn set_bounds(&mut self, bounds: ScreenBounds) {
        self.bounds = bounds;
    }

    /// Switch layout tuning and rerun the layout
    pub fn set_layout_config(&mut self, config: LayoutConfig) {
        self.layout.set_config(config);
        self.arrange();
    }

    /// Restart the layout with a random kick
    pub fn arrange(&mut self) {
        self.layout.restart(&mut self.nodes, &mut self.rng);
    }

    /// Append `count` nodes on a circle around the screen center
    pub fn build(&mut self, count: usize) {
        let center = self.bounds.center();
        let radius = self.bounds.width().min(self.bounds.height()) * BUILD_RADIUS_FACTOR;
        let start = self.nodes.len();

        for i in 0..count {
            let id = NodeId(start + i);
            let angle = i as f32 / count as f32 * TAU;

            let mut node = GraphNode::new(id, id.to_string());
            node.set_position(center + Vec2::from_angle(angle) * radius);
            self.nodes.push(node);
        }
    }

    /// Add one node near the center, up to [`MAX_NODES`]
    pub fn add_node(&mut self) -> Option<NodeId> {
        if self.nodes.len() >= MAX_NODES {
            log::debug!("Node limit {} reached", MAX_NODES);
            return None;
        }

        let id = NodeId(self.nodes.len());
        let quarter_w = self.bounds.width() * 0.25;
        let quarter_h = self.bounds.height() * 0.25;
        let offset = Vec2::new(
            self.rng.random_range(-quarter_w..=quarter_w),
            self.rng.random_range(-quarter_h..=quarter_h),
        );

        let mut node = GraphNode::new(id, id.to_string());
        node.set_position(self.bounds.center() + offset);
        self.nodes.push(node);

        self.arrange();
        Some(id)
    }

    /// Remove the highest-index node and everything that touches it
    pub fn remove_last_node(&mut self) -> Option<NodeId> {
        let last = NodeId(self.nodes.len().checked_sub(1)?);

        self.edges.retain(|t| t.from != last && t.to != last);
        self.nodes.pop();
        for node in &mut self.nodes {
            node.remove_out_edge(last);
            node.remove_adjacent(last);
            node.remove_in_edge(last);
        }

        self.arrange();
        Some(last)
    }

    fn contains(&self, id: NodeId) -> bool {
        id.index() < self.nodes.len()
    }

    fn tuple_index(&self, from: NodeId, to: NodeId) -> Option<usize> {
        self.edges.iter().position(|t| t.from == from && t.to == to)
    }

    fn edge_kind(&self) -> EdgeType {
        let mut kind = EdgeType::empty();
        kind.set(EdgeType::DIRECTED, self.directed);
        kind.set(EdgeType::WEIGHTED, self.weighted);
        kind
    }

    /// Add an edge, or update its weight if it already exists
    ///
    /// Out-of-range ids are ignored. Undirected graphs also get the mirror.
    /// A new edge restarts the layout; a weight update does not.
    pub fn add_edge(&mut self, from: NodeId, to: NodeId, weight: i32) {
        if self.insert_edge(from, to, weight) {
            self.arrange();
        }
    }

    /// Remove an edge (and its mirror in undirected graphs)
    pub fn remove_edge(&mut self, from: NodeId, to: NodeId) {
        if self.delete_edge(from, to) {
            self.arrange();
        }
    }

    /// Returns true when a tuple was created
    fn insert_edge(&mut self, from: NodeId, to: NodeId, weight: i32) -> bool {
        if !self.contains(from) || !self.contains(to) {
            log::debug!("Ignoring edge {} -> {}: no such node", from, to);
            return false;
        }

        if let Some(index) = self.tuple_index(from, to) {
            self.set_weight(index, weight);
            if !self.directed {
                if let Some(mirror) = self.tuple_index(to, from) {
                    self.set_weight(mirror, weight);
                }
            }
            return false;
        }

        self.edges.push(EdgeTuple { from, to, weight });
        self.link(from, to, weight);

        if !self.directed && self.tuple_index(to, from).is_none() {
            self.edges.push(EdgeTuple {
                from: to,
                to: from,
                weight,
            });
            self.link(to, from, weight);
        }
        true
    }

    /// Returns true when a tuple was removed
    fn delete_edge(&mut self, from: NodeId, to: NodeId) -> bool {
        if !self.contains(from) || !self.contains(to) {
            return false;
        }

        let mut removed = false;
        if let Some(index) = self.tuple_index(from, to) {
            self.edges.remove(index);
            self.unlink(from, to);
            removed = true;
        }

        if !self.directed {
            if let Some(index) = self.tuple_index(to, from) {
                self.edges.remove(index);
                self.unlink(to, from);
                removed = true;
            }
        }
        removed
    }

    fn set_weight(&mut self, index: usize, weight: i32) {
        let tuple = &mut self.edges[index];
        tuple.weight = weight;
        let (from, to) = (tuple.from, tuple.to);

        if let Some(edge) = self.nodes[from.index()].edge_to_mut(to) {
            edge.set_weight(weight);
        }
    }

    fn link(&mut self, from: NodeId, to: NodeId, weight: i32) {
        let target = &self.nodes[to.index()];
        let (to_pos, to_radius) = (target.position(), target.radius());
        let from_pos = self.nodes[from.index()].position();

        let mut edge = Edge::new(from, to, self.edge_kind(), from_pos, to_pos, to_radius);
        edge.set_weight(weight);
        edge.set_side(self.side);

        let source = &mut self.nodes[from.index()];
        source.make_adjacent(to);
        source.add_out_edge(edge);
        self.nodes[to.index()].add_in_edge(from);
    }

    fn unlink(&mut self, from: NodeId, to: NodeId) {
        let source = &mut self.nodes[from.index()];
        source.remove_out_edge(to);
        source.remove_adjacent(to);
        self.nodes[to.index()].remove_in_edge(from);
    }

    /// Connect two distinct random nodes
    pub fn add_random_edge(&mut self) -> Option<(NodeId, NodeId)> {
        let count = self.nodes.len();
        if count < 2 {
            return None;
        }

        let from = self.rng.random_range(0..count);
        let mut to = self.rng.random_range(0..count - 1);
        if to >= from {
            to += 1;
        }

        let weight = if self.weighted {
            self.rng.random_range(1..=MAX_WEIGHT)
        } else {
            1
        };

        let (from, to) = (NodeId(from), NodeId(to));
        self.insert_edge(from, to, weight);
        self.arrange();
        Some((from, to))
    }

    /// Remove one random edge (with its mirror when undirected)
    pub fn remove_random_edge(&mut self) -> Option<(NodeId, NodeId)> {
        if self.edges.is_empty() {
            return None;
        }

        let tuple = self.edges[self.rng.random_range(0..self.edges.len())];
        self.delete_edge(tuple.from, tuple.to);
        self.arrange();
        Some((tuple.from, tuple.to))
    }

    /// Change a node label; the node pulses
    pub fn relabel(&mut self, id: NodeId, label: impl Into<String>) {
        if let Some(node) = self.nodes.get_mut(id.index()) {
            node.set_label(label);
        }
    }

    pub fn attach_side(&self) -> AttachSide {
        self.side
    }

    /// Attach every edge to the given side of its target
    pub fn set_attach_side(&mut self, side: AttachSide) {
        self.side = side;
        for node in &mut self.nodes {
            for edge in node.out_edges_mut() {
                edge.set_side(side);
            }
        }
    }

    /// Replace the graph with `nodes` nodes and up to `edges` random edges
    pub fn randomize(&mut self, nodes: usize, edges: usize) {
        self.clear();
        self.build(nodes);

        let mut pairs: Vec<(usize, usize)> = (0..nodes)
            .flat_map(|i| (0..nodes).filter(move |&j| j != i).map(move |j| (i, j)))
            .collect();
        pairs.shuffle(&mut self.rng);

        for &(from, to) in pairs.iter().take(edges) {
            let weight = self.rng.random_range(1..=MAX_WEIGHT);
            self.insert_edge(NodeId(from), NodeId(to), weight);
        }

        log::info!(
            "Randomized graph: {} nodes, {} edges",
            self.node_count(),
            self.edge_count()
        );
        self.arrange();
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.edges.clear();
        self.arrange();
    }

    pub fn clear_highlight(&mut self) {
        for node in &mut self.nodes {
            node.set_highlight(Highlight::None);
            node.clear_edge_highlights();
        }
    }

    pub fn highlight_node(&mut self, id: NodeId, highlight: Highlight) {
        if let Some(node) = self.nodes.get_mut(id.index()) {
            node.set_highlight(highlight);
        }
    }

    /// Highlight an edge (both directions in undirected graphs)
    pub fn highlight_edge(&mut self, from: NodeId, to: NodeId, highlighted: bool) {
        let mut mark = |a: NodeId, b: NodeId| {
            if let Some(edge) = self.nodes.get_mut(a.index()).and_then(|n| n.edge_to_mut(b)) {
                edge.set_highlighted(highlighted);
            }
        };

        mark(from, to);
        if !self.directed {
            mark(to, from);
        }
    }

    /// Switch directedness, rebuilding every visual edge from the tuples
    ///
    /// Node positions and labels are kept.
    pub fn set_directed(&mut self, directed: bool) {
        if self.directed == directed {
            return;
        }
        self.directed = directed;

        let tuples = std::mem::take(&mut self.edges);
        for node in &mut self.nodes {
            node.clear_links();
        }

        for tuple in tuples {
            self.insert_edge(tuple.from, tuple.to, tuple.weight);
        }
        self.arrange();
    }

    /// Switch weight display, updating every edge in place
    pub fn set_weighted(&mut self, weighted: bool) {
        if self.weighted == weighted {
            return;
        }
        self.weighted = weighted;

        let kind = self.edge_kind();
        for tuple in &self.edges {
            if let Some(edge) = self.nodes[tuple.from.index()].edge_to_mut(tuple.to) {
                edge.set_kind(kind);
                edge.set_weight(tuple.weight);
            }
        }
    }

    /// Replace the graph with the contents of a graph file text
    ///
    /// On error the graph is left untouched.
    pub fn load_from_str(&mut self, text: &str) -> Result<(), LoadError> {
        let file = parse_graph(text, self.weighted)?;
        self.apply_file(file);
        Ok(())
    }

    pub fn load_from_file(&mut self, path: &str) -> Result<(), LoadError> {
        let file = parse_graph(&read_text(path)?, self.weighted)?;
        self.apply_file(file);
        log::info!("Loaded graph from {}", path);
        Ok(())
    }

    fn apply_file(&mut self, file: GraphFile) {
        let nodes = if file.nodes > MAX_LOADED_NODES {
            log::warn!(
                "Graph file has {} nodes, keeping the first {}",
                file.nodes,
                MAX_LOADED_NODES
            );
            MAX_LOADED_NODES
        } else {
            file.nodes
        };

        self.clear();
        self.build(nodes);
        for (from, to, weight) in file.edges {
            self.insert_edge(NodeId(from), NodeId(to), weight);
        }
        self.arrange();
    }

    /// One frame: layout iteration, node physics, then edge retargeting
    pub fn update(&mut self, dt: f32) {
        self.layout.step(&mut self.nodes);

        let bounds = self.layout_bounds();
        let damping = self.layout.config().damping;
        for node in &mut self.nodes {
            node.update(dt, &bounds, damping);
        }

        let anchors: Vec<(Vec2, f32)> = self
            .nodes
            .iter()
            .map(|node| (node.position(), node.radius()))
            .collect();

        for node in &mut self.nodes {
            let from_pos = node.position();
            for edge in node.out_edges_mut() {
                if let Some(&(to_pos, to_radius)) = anchors.get(edge.to().index()) {
                    edge.retarget(from_pos, to_pos, to_radius);
                }
                edge.update(dt);
            }
        }
    }
}
