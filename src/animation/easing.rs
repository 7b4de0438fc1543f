//! Progress curves for list node movement

use bevy::math::Vec2;
use serde::Deserialize;

/// Named easing curve, selectable from config by its snake_case name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    /// Constant speed around the ring
    Linear,
    /// Nodes start slowly and leave their slot at full speed
    EaseInCubic,
    /// Nodes leave quickly and brake into the new slot
    EaseOutCubic,
    /// Slow departure and slow arrival
    #[default]
    EaseInOutCubic,
    /// Softer braking than `EaseOutCubic`
    EaseOutQuad,
}

impl Easing {
    /// Map linear progress onto the curve; input is clamped to [0, 1]
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        let rest = 1.0 - t;
        match self {
            Easing::Linear => t,
            Easing::EaseInCubic => t.powi(3),
            Easing::EaseOutCubic => 1.0 - rest.powi(3),
            Easing::EaseInOutCubic if t < 0.5 => 4.0 * t.powi(3),
            Easing::EaseInOutCubic => 1.0 - (2.0 * rest).powi(3) / 2.0,
            Easing::EaseOutQuad => 1.0 - rest * rest,
        }
    }

    /// Eased interpolation between two points
    pub fn lerp(self, from: Vec2, to: Vec2, t: f32) -> Vec2 {
        from.lerp(to, self.apply(t))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Easing; 5] = [
        Easing::Linear,
        Easing::EaseInCubic,
        Easing::EaseOutCubic,
        Easing::EaseInOutCubic,
        Easing::EaseOutQuad,
    ];

    #[test]
    fn test_curves_hit_endpoints() {
        for easing in ALL {
            assert!(easing.apply(0.0).abs() < 1e-6, "{:?} at 0", easing);
            assert!((easing.apply(1.0) - 1.0).abs() < 1e-6, "{:?} at 1", easing);
        }
    }

    #[test]
    fn test_curves_are_monotonic() {
        for easing in ALL {
            let mut prev = easing.apply(0.0);
            for i in 1..=100 {
                let value = easing.apply(i as f32 / 100.0);
                assert!(value >= prev - 1e-6, "{:?} decreased at step {}", easing, i);
                prev = value;
            }
        }
    }

    #[test]
    fn test_input_is_clamped() {
        assert_eq!(Easing::Linear.apply(-1.0), 0.0);
        assert_eq!(Easing::Linear.apply(2.0), 1.0);
    }

    #[test]
    fn test_in_out_is_symmetric_at_half() {
        assert!((Easing::EaseInOutCubic.apply(0.5) - 0.5).abs() < 1e-6);
        let (a, b) = (Easing::EaseInOutCubic.apply(0.2), Easing::EaseInOutCubic.apply(0.8));
        assert!((a + b - 1.0).abs() < 1e-6);
    }
}
