use serde::Deserialize;

/// Preset layout configurations
pub mod presets {
    use super::LayoutConfig;

    /// The classic tuning: settles a 10-node graph in well under 100 iterations
    pub const CLASSIC: LayoutConfig = LayoutConfig {
        repulse: 300_000.0,
        attract: 0.2,
        length_limit: 150.0,
        min_distance: 80.0,
        margin: 100.0,
        max_iterations: 100,
        force_epsilon: 0.01,
        cool_down: 0.95,
        cool_down_decay: 0.98,
        damping: 0.95,
        initial_velocity: 50.0,
    };

    /// Shorter edges, weaker push: dense clusters
    pub const TIGHT: LayoutConfig = LayoutConfig {
        repulse: 120_000.0,
        attract: 0.3,
        length_limit: 100.0,
        min_distance: 60.0,
        ..CLASSIC
    };

    /// Long edges, strong push: spread out over the whole screen
    pub const LOOSE: LayoutConfig = LayoutConfig {
        repulse: 600_000.0,
        attract: 0.15,
        length_limit: 220.0,
        min_distance: 100.0,
        ..CLASSIC
    };

    /// Presets in the order the UI cycles through them
    pub const ALL: [(&str, LayoutConfig); 3] = [("classic", CLASSIC), ("tight", TIGHT), ("loose", LOOSE)];
}

/// Force-directed layout tuning
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Repulsion constant (force = repulse / distance²)
    pub repulse: f32,
    /// Spring constant for edges longer than `length_limit`
    pub attract: f32,
    /// Ideal edge length; attraction is zero below it
    pub length_limit: f32,
    /// Distance under which repulsion gets the extra boost
    pub min_distance: f32,
    /// Inset from the screen edges that nodes are clamped to
    pub margin: f32,
    /// Iteration cap for one layout run
    pub max_iterations: u32,
    /// Layout stops once the largest force falls under this
    pub force_epsilon: f32,
    /// Initial force multiplier
    pub cool_down: f32,
    /// Per-iteration decay of the force multiplier
    pub cool_down_decay: f32,
    /// Per-frame velocity decay (0.0 = full stop, 1.0 = no damping)
    pub damping: f32,
    /// Random kick range (±) applied on restart
    pub initial_velocity: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        presets::CLASSIC
    }
}
