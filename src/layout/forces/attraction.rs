use bevy::math::Vec2;

use crate::layout::LayoutConfig;

/// Pull node at `pos` toward an adjacent node at `other`
///
/// Zero up to `length_limit`, then linear in the overshoot.
pub fn attraction(pos: Vec2, other: Vec2, config: &LayoutConfig) -> Vec2 {
    let diff = other - pos;
    let distance = diff.length();

    if distance <= config.length_limit {
        return Vec2::ZERO;
    }

    diff.normalize_or_zero() * ((distance - config.length_limit) * config.attract)
}

/// Sum of attractions toward every adjacent position
pub fn total_attraction<I>(pos: Vec2, adjacent: I, config: &LayoutConfig) -> Vec2
where
    I: IntoIterator<Item = Vec2>,
{
    adjacent
        .into_iter()
        .map(|other| attraction(pos, other, config))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::presets::CLASSIC;

    #[test]
    fn test_no_pull_inside_length_limit() {
        let force = attraction(Vec2::ZERO, Vec2::new(CLASSIC.length_limit, 0.0), &CLASSIC);
        assert_eq!(force, Vec2::ZERO);
    }

    #[test]
    fn test_pull_grows_with_overshoot() {
        let force = attraction(Vec2::ZERO, Vec2::new(0.0, 250.0), &CLASSIC);

        assert!(force.y > 0.0);
        assert!((force.length() - 100.0 * CLASSIC.attract).abs() < 1e-3);
    }

    #[test]
    fn test_total_cancels_opposite_neighbors() {
        let neighbors = [Vec2::new(300.0, 0.0), Vec2::new(-300.0, 0.0)];
        let total = total_attraction(Vec2::ZERO, neighbors, &CLASSIC);

        assert!(total.length() < 1e-3);
    }

    #[test]
    fn test_total_of_nothing_is_zero() {
        assert_eq!(total_attraction(Vec2::ONE, Vec::new(), &CLASSIC), Vec2::ZERO);
    }
}
