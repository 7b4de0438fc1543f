use bevy::math::Vec2;
use bitflags::bitflags;

use super::node::NodeId;

/// Arrow head length
pub const ARROW_SIZE: f32 = 10.0;
/// Offset of a self loop's center from its node, on both axes
pub const LOOP_OFFSET: f32 = -60.0;
/// Self loop radius relative to the node radius
pub const LOOP_RADIUS_FACTOR: f32 = 0.8;
/// Self loop sweep in radians (270°)
pub const LOOP_SWEEP: f32 = 1.5 * std::f32::consts::PI;
/// Rate at which a destination follows its target
pub const SMOOTHING_SPEED: f32 = 5.0;
/// Distance under which a destination snaps onto its target
pub const SNAP_DISTANCE: f32 = 1.0;

bitflags! {
    /// How an edge is drawn
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct EdgeType: u8 {
        /// Not drawn at all
        const HIDDEN = 1 << 0;
        /// Arrow head at the destination
        const DIRECTED = 1 << 1;
        /// Weight label at the midpoint
        const WEIGHTED = 1 << 2;
        /// Self loop
        const CIRCULAR = 1 << 3;
    }
}

/// Where an edge attaches to its target node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AttachSide {
    /// Intersection of the center line with the target circle
    #[default]
    Boundary,
    Left,
    Right,
    Top,
    Bottom,
}

/// Point where an edge from `from` meets a node at `to` with radius `to_radius`
///
/// Explicit sides offset the target center along one axis (y up). Coincident
/// centers on the boundary side yield the target center.
pub fn target_point(from: Vec2, to: Vec2, to_radius: f32, side: AttachSide) -> Vec2 {
    match side {
        AttachSide::Left => to - Vec2::X * to_radius,
        AttachSide::Right => to + Vec2::X * to_radius,
        AttachSide::Top => to + Vec2::Y * to_radius,
        AttachSide::Bottom => to - Vec2::Y * to_radius,
        AttachSide::Boundary => to - (to - from).normalize_or_zero() * to_radius,
    }
}

/// Filled arrow head triangle: tip at `end`, pointing away from `start`
pub fn arrow_head(start: Vec2, end: Vec2) -> [Vec2; 3] {
    let dir = (end - start).normalize_or_zero();
    let perp = dir.perp();
    let base = end - dir * ARROW_SIZE;

    [
        end,
        base - perp * (ARROW_SIZE * 0.5),
        base + perp * (ARROW_SIZE * 0.5),
    ]
}

/// Renderer-ready edge geometry
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EdgeShape {
    Hidden,
    Line {
        start: Vec2,
        end: Vec2,
        arrow: Option<[Vec2; 3]>,
    },
    Loop {
        center: Vec2,
        radius: f32,
        start_angle: f32,
        end_angle: f32,
        arrow: [Vec2; 3],
    },
}

/// A visual edge, owned by its source node
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    from: NodeId,
    to: NodeId,
    kind: EdgeType,
    weight: i32,
    /// Point the edge is currently drawn to
    destination: Vec2,
    /// Point `destination` is converging to
    target_destination: Vec2,
    side: AttachSide,
    highlighted: bool,
}

impl Edge {
    /// Create an edge already resting on its target point
    ///
    /// An edge from a node to itself is always flagged [`EdgeType::CIRCULAR`].
    pub fn new(
        from: NodeId,
        to: NodeId,
        kind: EdgeType,
        from_pos: Vec2,
        to_pos: Vec2,
        to_radius: f32,
    ) -> Self {
        let side = AttachSide::default();
        let destination = target_point(from_pos, to_pos, to_radius, side);

        let mut edge = Edge {
            from,
            to,
            kind: EdgeType::empty(),
            weight: 0,
            destination,
            target_destination: destination,
            side,
            highlighted: false,
        };
        edge.set_kind(kind);
        edge
    }

    pub fn from(&self) -> NodeId {
        self.from
    }

    pub fn to(&self) -> NodeId {
        self.to
    }

    pub fn kind(&self) -> EdgeType {
        self.kind
    }

    /// Replace the type flags, keeping CIRCULAR on self loops
    pub fn set_kind(&mut self, kind: EdgeType) {
        self.kind = kind;
        if self.from == self.to {
            self.kind |= EdgeType::CIRCULAR;
        }
    }

    pub fn is_circular(&self) -> bool {
        self.kind.contains(EdgeType::CIRCULAR)
    }

    pub fn weight(&self) -> i32 {
        self.weight
    }

    pub fn set_weight(&mut self, weight: i32) {
        self.weight = weight;
    }

    pub fn is_highlighted(&self) -> bool {
        self.highlighted
    }

    pub fn set_highlighted(&mut self, highlighted: bool) {
        self.highlighted = highlighted;
    }

    pub fn side(&self) -> AttachSide {
        self.side
    }

    pub fn set_side(&mut self, side: AttachSide) {
        self.side = side;
    }

    pub fn destination(&self) -> Vec2 {
        self.destination
    }

    pub fn target_destination(&self) -> Vec2 {
        self.target_destination
    }

    /// Recompute the target point from the current node positions
    pub fn retarget(&mut self, from_pos: Vec2, to_pos: Vec2, to_radius: f32) {
        self.target_destination = target_point(from_pos, to_pos, to_radius, self.side);
    }

    /// Move `destination` toward its target by exponential smoothing
    pub fn update(&mut self, dt: f32) {
        if self.destination.distance(self.target_destination) > SNAP_DISTANCE {
            let t = (dt.max(0.0) * SMOOTHING_SPEED).min(1.0);
            self.destination = self.destination.lerp(self.target_destination, t);
        } else {
            self.destination = self.target_destination;
        }
    }

    /// Geometry for drawing from `start`, the source node's position
    pub fn shape(&self, start: Vec2, source_radius: f32) -> EdgeShape {
        if self.kind.contains(EdgeType::HIDDEN) {
            return EdgeShape::Hidden;
        }

        if self.is_circular() {
            let center = start + Vec2::splat(LOOP_OFFSET);
            let radius = source_radius * LOOP_RADIUS_FACTOR;
            let end_angle = LOOP_SWEEP;
            let tip = center + Vec2::from_angle(end_angle) * radius;
            let quarter = std::f32::consts::FRAC_PI_4;

            return EdgeShape::Loop {
                center,
                radius,
                start_angle: 0.0,
                end_angle,
                arrow: [
                    tip,
                    tip + Vec2::from_angle(end_angle + quarter) * ARROW_SIZE,
                    tip + Vec2::from_angle(end_angle - quarter) * ARROW_SIZE,
                ],
            };
        }

        let arrow = self
            .kind
            .contains(EdgeType::DIRECTED)
            .then(|| arrow_head(start, self.destination));

        EdgeShape::Line {
            start,
            end: self.destination,
            arrow,
        }
    }

    /// Midpoint between `start` and the destination, shifted by `offset`
    pub fn label_anchor(&self, start: Vec2, offset: Vec2) -> Vec2 {
        (start + self.destination) * 0.5 + offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edge(kind: EdgeType) -> Edge {
        Edge::new(NodeId(0), NodeId(1), kind, Vec2::new(-100.0, 0.0), Vec2::ZERO, 0.0)
    }

    #[test]
    fn test_boundary_target_point() {
        let p = target_point(Vec2::ZERO, Vec2::new(100.0, 0.0), 30.0, AttachSide::Boundary);
        assert!((p - Vec2::new(70.0, 0.0)).length() < 1e-4);

        let diagonal = target_point(Vec2::ZERO, Vec2::new(100.0, 100.0), 30.0, AttachSide::Boundary);
        assert!((diagonal.distance(Vec2::new(100.0, 100.0)) - 30.0).abs() < 1e-3);
    }

    #[test]
    fn test_explicit_sides() {
        let to = Vec2::new(50.0, 50.0);

        assert_eq!(target_point(Vec2::ZERO, to, 10.0, AttachSide::Left), Vec2::new(40.0, 50.0));
        assert_eq!(target_point(Vec2::ZERO, to, 10.0, AttachSide::Right), Vec2::new(60.0, 50.0));
        assert_eq!(target_point(Vec2::ZERO, to, 10.0, AttachSide::Top), Vec2::new(50.0, 60.0));
        assert_eq!(target_point(Vec2::ZERO, to, 10.0, AttachSide::Bottom), Vec2::new(50.0, 40.0));
    }

    #[test]
    fn test_coincident_centers() {
        let p = target_point(Vec2::ONE, Vec2::ONE, 30.0, AttachSide::Boundary);
        assert_eq!(p, Vec2::ONE);
    }

    #[test]
    fn test_destination_converges_then_snaps() {
        let mut edge = edge(EdgeType::DIRECTED);
        assert_eq!(edge.destination(), Vec2::ZERO);

        let target = Vec2::new(100.0, 100.0);
        edge.retarget(Vec2::new(-100.0, 0.0), target, 0.0);
        assert_eq!(edge.target_destination(), target);

        let mut last = edge.destination().distance(target);
        let mut frames = 0;
        while edge.destination() != target {
            edge.update(0.1);
            let distance = edge.destination().distance(target);
            assert!(distance < last, "distance must shrink every frame");
            last = distance;
            frames += 1;
            assert!(frames < 50);
        }
        assert_eq!(edge.destination(), target);
    }

    #[test]
    fn test_large_dt_does_not_overshoot() {
        let mut edge = edge(EdgeType::empty());
        edge.retarget(Vec2::new(-100.0, 0.0), Vec2::new(0.0, 200.0), 0.0);

        edge.update(10.0);
        assert_eq!(edge.destination(), Vec2::new(0.0, 200.0));
    }

    #[test]
    fn test_self_edge_is_circular() {
        let mut edge = Edge::new(NodeId(2), NodeId(2), EdgeType::DIRECTED, Vec2::ZERO, Vec2::ZERO, 30.0);
        assert!(edge.is_circular());

        edge.set_kind(EdgeType::WEIGHTED);
        assert!(edge.is_circular());
        assert!(edge.kind().contains(EdgeType::WEIGHTED));
    }

    #[test]
    fn test_hidden_shape() {
        assert_eq!(edge(EdgeType::HIDDEN | EdgeType::DIRECTED).shape(Vec2::ZERO, 30.0), EdgeShape::Hidden);
    }

    #[test]
    fn test_line_shape_and_arrow() {
        let start = Vec2::new(-100.0, 0.0);

        let EdgeShape::Line { end, arrow, .. } = edge(EdgeType::DIRECTED).shape(start, 30.0) else {
            panic!("expected a line");
        };
        assert_eq!(end, Vec2::ZERO);

        let [tip, left, right] = arrow.unwrap();
        assert_eq!(tip, Vec2::ZERO);
        assert!((left - Vec2::new(-ARROW_SIZE, -ARROW_SIZE * 0.5)).length() < 1e-4);
        assert!((right - Vec2::new(-ARROW_SIZE, ARROW_SIZE * 0.5)).length() < 1e-4);

        let EdgeShape::Line { arrow, .. } = edge(EdgeType::WEIGHTED).shape(start, 30.0) else {
            panic!("expected a line");
        };
        assert!(arrow.is_none());
    }

    #[test]
    fn test_loop_shape() {
        let edge = Edge::new(NodeId(0), NodeId(0), EdgeType::empty(), Vec2::ZERO, Vec2::ZERO, 30.0);

        let EdgeShape::Loop { center, radius, start_angle, end_angle, arrow } =
            edge.shape(Vec2::new(100.0, 100.0), 30.0)
        else {
            panic!("expected a loop");
        };
        assert_eq!(center, Vec2::new(40.0, 40.0));
        assert!((radius - 24.0).abs() < 1e-5);
        assert_eq!(start_angle, 0.0);
        assert!((end_angle - LOOP_SWEEP).abs() < 1e-6);
        // 270° lands straight below the center (y up)
        assert!((arrow[0] - Vec2::new(40.0, 16.0)).length() < 1e-3);
    }

    #[test]
    fn test_label_anchor() {
        let edge = edge(EdgeType::WEIGHTED);
        let anchor = edge.label_anchor(Vec2::new(-100.0, 0.0), Vec2::new(0.0, 5.0));
        assert_eq!(anchor, Vec2::new(-50.0, 5.0));
    }
}
