pub mod bounds;
pub mod config;
pub mod forces;

use bevy::math::Vec2;
use rand::Rng;

use crate::graph::GraphNode;

pub use bounds::ScreenBounds;
pub use config::{LayoutConfig, presets};
pub use forces::{repulsion, total_attraction};

/// Iterative force-directed layout (simulated annealing)
///
/// Each [`ForceLayout::step`] computes one velocity per node from all-pairs
/// repulsion plus attraction along adjacency, scaled by a decaying
/// `cool_down`. Positions are integrated separately by the nodes themselves.
#[derive(Debug, Clone)]
pub struct ForceLayout {
    config: LayoutConfig,
    /// Iterations run since the last restart
    time: u32,
    cool_down: f32,
    max_force: f32,
}

impl Default for ForceLayout {
    fn default() -> Self {
        Self::new(LayoutConfig::default())
    }
}

impl ForceLayout {
    pub fn new(config: LayoutConfig) -> Self {
        ForceLayout {
            config,
            time: 0,
            cool_down: config.cool_down,
            max_force: 0.0,
        }
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Swap the tuning; takes effect from the next iteration
    pub fn set_config(&mut self, config: LayoutConfig) {
        self.config = config;
    }

    pub fn iterations(&self) -> u32 {
        self.time
    }

    pub fn cool_down(&self) -> f32 {
        self.cool_down
    }

    /// Largest force seen in the last iteration
    pub fn max_force(&self) -> f32 {
        self.max_force
    }

    /// Still iterating (neither capped nor converged)
    pub fn is_active(&self) -> bool {
        self.time < self.config.max_iterations
    }

    /// Stop iterating until the next restart
    pub fn halt(&mut self) {
        self.time = self.config.max_iterations;
    }

    /// Restart after a topology change and kick every node
    pub fn restart<R: Rng + ?Sized>(&mut self, nodes: &mut [GraphNode], rng: &mut R) {
        self.time = 0;
        self.cool_down = self.config.cool_down;
        self.max_force = 0.0;

        let kick = self.config.initial_velocity.abs();
        for node in nodes.iter_mut() {
            node.set_velocity(Vec2::new(
                rng.random_range(-kick..=kick),
                rng.random_range(-kick..=kick),
            ));
        }

        log::debug!("Layout restarted for {} nodes", nodes.len());
    }

    /// Run one layout iteration, storing the result as node velocities
    ///
    /// Returns false when nothing was computed (too few nodes, capped or
    /// converged).
    pub fn step(&mut self, nodes: &mut [GraphNode]) -> bool {
        if nodes.len() <= 1 || !self.is_active() {
            return false;
        }

        self.time += 1;
        self.max_force = 0.0;

        // Collect positions first to avoid borrow issues
        let positions: Vec<Vec2> = nodes.iter().map(|node| node.position()).collect();

        for (i, node) in nodes.iter_mut().enumerate() {
            let pos = positions[i];

            let mut total = positions
                .iter()
                .enumerate()
                .filter(|&(j, _)| j != i)
                .map(|(_, &other)| repulsion(pos, other, &self.config))
                .sum::<Vec2>();

            let adjacent = node
                .adjacent()
                .iter()
                .filter_map(|id| positions.get(id.index()).copied());
            total += total_attraction(pos, adjacent, &self.config);

            total *= self.cool_down;

            self.max_force = self.max_force.max(total.length());
            node.set_velocity(total);
        }

        self.cool_down *= self.config.cool_down_decay;

        if self.max_force < self.config.force_epsilon {
            log::debug!(
                "Layout converged after {} iterations (max force {:.4})",
                self.time,
                self.max_force
            );
            self.halt();
        }

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::NodeId;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn node_at(index: usize, x: f32, y: f32) -> GraphNode {
        let mut node = GraphNode::new(NodeId(index), index.to_string());
        node.set_position(Vec2::new(x, y));
        node
    }

    fn complete_graph(rng: &mut StdRng, n: usize) -> Vec<GraphNode> {
        let mut nodes: Vec<GraphNode> = (0..n)
            .map(|i| node_at(i, rng.random_range(-300.0..300.0), rng.random_range(-200.0..200.0)))
            .collect();
        for i in 0..n {
            for j in 0..n {
                if i != j {
                    nodes[i].make_adjacent(NodeId(j));
                }
            }
        }
        nodes
    }

    #[test]
    fn test_single_node_is_skipped() {
        let mut layout = ForceLayout::default();
        let mut nodes = vec![node_at(0, 0.0, 0.0)];

        assert!(!layout.step(&mut nodes));
        assert_eq!(layout.iterations(), 0);
        assert_eq!(nodes[0].velocity(), Vec2::ZERO);
    }

    #[test]
    fn test_two_nodes_push_apart() {
        let mut layout = ForceLayout::default();
        let mut nodes = vec![node_at(0, -10.0, 0.0), node_at(1, 10.0, 0.0)];

        assert!(layout.step(&mut nodes));
        assert!(nodes[0].velocity().x < 0.0);
        assert!(nodes[1].velocity().x > 0.0);
        assert!(layout.max_force() > 0.0);
    }

    #[test]
    fn test_cool_down_decays_per_iteration() {
        let mut layout = ForceLayout::default();
        let mut nodes = vec![node_at(0, -100.0, 0.0), node_at(1, 100.0, 0.0)];

        layout.step(&mut nodes);
        layout.step(&mut nodes);

        let expected = presets::CLASSIC.cool_down * presets::CLASSIC.cool_down_decay.powi(2);
        assert!((layout.cool_down() - expected).abs() < 1e-6);
    }

    #[test]
    fn test_converges_or_hits_cap() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut nodes = complete_graph(&mut rng, 5);
        let bounds = ScreenBounds::from_size(1280.0, 720.0).inset(presets::CLASSIC.margin);
        let mut layout = ForceLayout::default();

        let mut frames = 0;
        while layout.is_active() && frames < 1000 {
            layout.step(&mut nodes);
            for node in &mut nodes {
                node.update(1.0 / 60.0, &bounds, layout.config().damping);
            }
            frames += 1;
        }

        assert!(!layout.is_active());
        assert!(
            layout.max_force() < presets::CLASSIC.force_epsilon
                || layout.iterations() == presets::CLASSIC.max_iterations
        );
        assert!(layout.iterations() <= presets::CLASSIC.max_iterations);
    }

    #[test]
    fn test_epsilon_halts_early() {
        // Far apart, unconnected: repulsion ~ 300000 / 1e8 well under epsilon
        let mut layout = ForceLayout::default();
        let mut nodes = vec![node_at(0, -5_000.0, 0.0), node_at(1, 5_000.0, 0.0)];

        assert!(layout.step(&mut nodes));
        assert!(!layout.is_active());
        assert_eq!(layout.iterations(), presets::CLASSIC.max_iterations);
        assert!(!layout.step(&mut nodes));
    }

    #[test]
    fn test_restart_resets_state_and_kicks_nodes() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut layout = ForceLayout::default();
        let mut nodes = vec![node_at(0, -100.0, 0.0), node_at(1, 100.0, 0.0)];

        layout.step(&mut nodes);
        layout.halt();
        layout.restart(&mut nodes, &mut rng);

        assert!(layout.is_active());
        assert_eq!(layout.iterations(), 0);
        assert_eq!(layout.cool_down(), presets::CLASSIC.cool_down);
        for node in &nodes {
            let v = node.velocity();
            assert!(v.x.abs() <= 50.0 && v.y.abs() <= 50.0);
        }
    }
}
