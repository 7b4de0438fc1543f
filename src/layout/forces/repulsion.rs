use bevy::math::Vec2;

use crate::layout::LayoutConfig;

/// Push node at `pos` away from node at `other`
///
/// Inverse square law with the distance floored at 1.0. Closer than
/// `min_distance` the constant gets an extra `2 * min_distance / distance`
/// boost, which makes the magnitude jump at exactly `min_distance`.
pub fn repulsion(pos: Vec2, other: Vec2, config: &LayoutConfig) -> Vec2 {
    let diff = pos - other;
    let distance = diff.length().max(1.0);

    let mut strength = config.repulse;
    if distance < config.min_distance {
        strength *= 2.0 * (config.min_distance / distance);
    }

    diff.normalize_or_zero() * (strength / (distance * distance))
}
