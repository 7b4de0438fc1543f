use bevy::math::Vec2;

/// Axis-aligned screen rectangle in world units (y up)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenBounds {
    pub left: f32,
    pub right: f32,
    pub bottom: f32,
    pub top: f32,
}

impl Default for ScreenBounds {
    fn default() -> Self {
        // Same fallback window the layout used before a real size is known
        Self::from_size(800.0, 600.0)
    }
}

impl ScreenBounds {
    /// Rectangle of the given size centered on the origin
    pub fn from_size(width: f32, height: f32) -> Self {
        let half_width = width.max(0.0) * 0.5;
        let half_height = height.max(0.0) * 0.5;

        Self {
            left: -half_width,
            right: half_width,
            bottom: -half_height,
            top: half_height,
        }
    }

    /// Get width of visible area
    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    /// Get height of visible area
    pub fn height(&self) -> f32 {
        self.top - self.bottom
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(
            (self.left + self.right) * 0.5,
            (self.bottom + self.top) * 0.5,
        )
    }

    /// Shrink every side by `margin`
    ///
    /// A margin larger than half the size collapses that axis onto the center
    /// instead of producing an inverted rectangle.
    pub fn inset(&self, margin: f32) -> ScreenBounds {
        let center = self.center();
        let half_width = (self.width() * 0.5 - margin).max(0.0);
        let half_height = (self.height() * 0.5 - margin).max(0.0);

        ScreenBounds {
            left: center.x - half_width,
            right: center.x + half_width,
            bottom: center.y - half_height,
            top: center.y + half_height,
        }
    }

    /// Clamp a point inside the rectangle (no bounce)
    pub fn clamp(&self, point: Vec2) -> Vec2 {
        Vec2::new(
            point.x.max(self.left).min(self.right),
            point.y.max(self.bottom).min(self.top),
        )
    }

    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.left && point.x <= self.right && point.y >= self.bottom && point.y <= self.top
    }
}
