use bevy::math::Vec2;
use std::fmt;

use super::edge::Edge;
use crate::layout::ScreenBounds;

/// Unscaled node radius in world units
pub const BASE_RADIUS: f32 = 30.0;
/// Scale a node jumps to when its label changes
pub const PULSE_SCALE: f32 = 1.2;
/// Scale change per second
pub const SCALE_SPEED: f32 = 5.0;

/// Node identifier, equal to the node's index in its graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl NodeId {
    pub const fn index(&self) -> usize {
        self.0
    }
}

/// Highlight state used by the renderer to pick a node color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Highlight {
    #[default]
    None,
    Primary,
    Secondary,
}

/// A graph vertex with its physics state and the edges it owns
///
/// Outgoing edges are owned here. Incoming edges are only recorded as the
/// source node id, so the owning node stays the single source of truth.
#[derive(Debug, Clone)]
pub struct GraphNode {
    id: NodeId,
    label: String,
    position: Vec2,
    velocity: Vec2,
    scale: f32,
    target_scale: f32,
    highlight: Highlight,
    /// Attraction partners for the layout
    adjacent: Vec<NodeId>,
    out_edges: Vec<Edge>,
    in_edges: Vec<NodeId>,
}

impl GraphNode {
    pub fn new(id: NodeId, label: impl Into<String>) -> Self {
        GraphNode {
            id,
            label: label.into(),
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            scale: 1.0,
            target_scale: 1.0,
            highlight: Highlight::None,
            adjacent: Vec::new(),
            out_edges: Vec::new(),
            in_edges: Vec::new(),
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Label parsed as an integer, 0 when it is not numeric
    pub fn int_label(&self) -> i32 {
        self.label.trim().parse().unwrap_or(0)
    }

    /// Replace the label and pulse the node
    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
        self.target_scale = PULSE_SCALE;
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    pub fn set_velocity(&mut self, velocity: Vec2) {
        self.velocity = velocity;
    }

    /// Effective radius including the pulse scale
    pub fn radius(&self) -> f32 {
        BASE_RADIUS * self.scale
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn highlight(&self) -> Highlight {
        self.highlight
    }

    pub fn set_highlight(&mut self, highlight: Highlight) {
        self.highlight = highlight;
    }

    pub fn adjacent(&self) -> &[NodeId] {
        &self.adjacent
    }

    pub fn is_adjacent(&self, other: NodeId) -> bool {
        self.adjacent.contains(&other)
    }

    /// Record `other` as an attraction partner (no duplicates)
    pub fn make_adjacent(&mut self, other: NodeId) {
        if !self.is_adjacent(other) {
            self.adjacent.push(other);
        }
    }

    pub fn remove_adjacent(&mut self, other: NodeId) {
        self.adjacent.retain(|&id| id != other);
    }

    pub fn out_edges(&self) -> &[Edge] {
        &self.out_edges
    }

    pub fn out_edges_mut(&mut self) -> &mut [Edge] {
        &mut self.out_edges
    }

    pub fn edge_to(&self, to: NodeId) -> Option<&Edge> {
        self.out_edges.iter().find(|edge| edge.to() == to)
    }

    pub fn edge_to_mut(&mut self, to: NodeId) -> Option<&mut Edge> {
        self.out_edges.iter_mut().find(|edge| edge.to() == to)
    }

    /// Take ownership of an outgoing edge
    ///
    /// Returns false if an edge to the same target already exists.
    pub fn add_out_edge(&mut self, edge: Edge) -> bool {
        if self.edge_to(edge.to()).is_some() {
            return false;
        }
        self.out_edges.push(edge);
        true
    }

    pub fn remove_out_edge(&mut self, to: NodeId) -> Option<Edge> {
        let index = self.out_edges.iter().position(|edge| edge.to() == to)?;
        Some(self.out_edges.remove(index))
    }

    /// Sources of the edges pointing at this node
    pub fn in_edges(&self) -> &[NodeId] {
        &self.in_edges
    }

    pub fn add_in_edge(&mut self, from: NodeId) {
        if !self.in_edges.contains(&from) {
            self.in_edges.push(from);
        }
    }

    pub fn remove_in_edge(&mut self, from: NodeId) {
        self.in_edges.retain(|&id| id != from);
    }

    /// Drop every edge, back-reference and adjacency entry
    pub fn clear_links(&mut self) {
        self.adjacent.clear();
        self.out_edges.clear();
        self.in_edges.clear();
    }

    pub fn clear_edge_highlights(&mut self) {
        for edge in &mut self.out_edges {
            edge.set_highlighted(false);
        }
    }

    /// Advance scale animation and integrate velocity
    ///
    /// Position is clamped to `bounds`; velocity is multiplied by `damping`.
    pub fn update(&mut self, dt: f32, bounds: &ScreenBounds, damping: f32) {
        self.update_scale(dt);

        self.position = bounds.clamp(self.position + self.velocity * dt);
        self.velocity *= damping;
    }

    fn update_scale(&mut self, dt: f32) {
        if self.scale == self.target_scale {
            return;
        }

        let direction = if self.target_scale > self.scale { 1.0 } else { -1.0 };
        self.scale += direction * SCALE_SPEED * dt;

        let reached = (direction > 0.0 && self.scale >= self.target_scale)
            || (direction < 0.0 && self.scale <= self.target_scale);
        if reached {
            self.scale = self.target_scale;
            // Pulse back down once the peak is hit
            if self.target_scale == PULSE_SCALE {
                self.target_scale = 1.0;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds() -> ScreenBounds {
        ScreenBounds::from_size(800.0, 600.0).inset(100.0)
    }

    #[test]
    fn test_node_id_display() {
        assert_eq!(NodeId(7).to_string(), "7");
        assert_eq!(NodeId(3).index(), 3);
    }

    #[test]
    fn test_int_label() {
        assert_eq!(GraphNode::new(NodeId(0), "42").int_label(), 42);
        assert_eq!(GraphNode::new(NodeId(0), "-3").int_label(), -3);
        assert_eq!(GraphNode::new(NodeId(0), "abc").int_label(), 0);
    }

    #[test]
    fn test_velocity_integration_and_damping() {
        let mut node = GraphNode::new(NodeId(0), "0");
        node.set_velocity(Vec2::new(10.0, 0.0));

        node.update(0.5, &bounds(), 0.95);

        assert_eq!(node.position(), Vec2::new(5.0, 0.0));
        assert!((node.velocity().x - 9.5).abs() < 1e-5);
    }

    #[test]
    fn test_position_clamped_to_bounds() {
        let mut node = GraphNode::new(NodeId(0), "0");
        node.set_velocity(Vec2::new(10_000.0, -10_000.0));

        node.update(1.0, &bounds(), 0.95);

        let b = bounds();
        assert_eq!(node.position(), Vec2::new(b.right, b.bottom));
    }

    #[test]
    fn test_label_change_pulses_then_settles() {
        let mut node = GraphNode::new(NodeId(0), "1");
        node.set_label("2");

        // 0.25 s at 5/s overshoots 1.2, so it snaps to the peak
        node.update(0.25, &bounds(), 0.95);
        assert_eq!(node.scale(), PULSE_SCALE);
        assert!((node.radius() - BASE_RADIUS * PULSE_SCALE).abs() < 1e-5);

        node.update(0.25, &bounds(), 0.95);
        assert_eq!(node.scale(), 1.0);
        assert_eq!(node.radius(), BASE_RADIUS);
    }

    #[test]
    fn test_adjacency_has_no_duplicates() {
        let mut node = GraphNode::new(NodeId(0), "0");
        node.make_adjacent(NodeId(1));
        node.make_adjacent(NodeId(1));
        assert_eq!(node.adjacent(), &[NodeId(1)]);

        node.remove_adjacent(NodeId(1));
        assert!(node.adjacent().is_empty());
    }
}
