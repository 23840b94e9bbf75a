//! Collision geometry for round entities on a rectangular playfield
//!
//! Everything in the garden is a circle: the player, enemies, projectiles and
//! spore pulses. The playfield is an axis-aligned rectangle used for clamping,
//! spawning and despawn checks.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle (min corner inclusive, max corner inclusive)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Rectangle anchored at the origin
    pub fn from_size(width: f32, height: f32) -> Self {
        Self::new(Vec2::ZERO, Vec2::new(width, height))
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }

    /// Shrink by `margin` on every side. Never inverts: a margin larger than
    /// half the size collapses onto the centre line.
    pub fn inset(&self, margin: f32) -> Self {
        let c = self.center();
        let min = (self.min + Vec2::splat(margin)).min(c);
        let max = (self.max - Vec2::splat(margin)).max(c);
        Self::new(min, max)
    }

    /// Grow by `margin` on every side
    pub fn expand(&self, margin: f32) -> Self {
        Self::new(self.min - Vec2::splat(margin), self.max + Vec2::splat(margin))
    }

    /// Nearest point inside the rectangle
    pub fn clamp_point(&self, point: Vec2) -> Vec2 {
        point.clamp(self.min, self.max)
    }
}

/// Circle-circle overlap: strictly closer than the sum of the radii
#[inline]
pub fn circles_overlap(a: Vec2, a_radius: f32, b: Vec2, b_radius: f32) -> bool {
    let reach = a_radius + b_radius;
    a.distance_squared(b) < reach * reach
}

/// Direction from `from` to `to`, or zero when the points coincide
#[inline]
pub fn seek_direction(from: Vec2, to: Vec2) -> Vec2 {
    (to - from).normalize_or_zero()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circles_overlap() {
        let a = Vec2::new(0.0, 0.0);
        assert!(circles_overlap(a, 10.0, Vec2::new(15.0, 0.0), 6.0));
        // Touching exactly is not an overlap
        assert!(!circles_overlap(a, 10.0, Vec2::new(16.0, 0.0), 6.0));
        assert!(!circles_overlap(a, 10.0, Vec2::new(30.0, 30.0), 6.0));
    }

    #[test]
    fn test_rect_inset_and_expand() {
        let rect = Rect::from_size(960.0, 540.0);
        let inner = rect.inset(24.0);
        assert_eq!(inner.min, Vec2::new(24.0, 24.0));
        assert_eq!(inner.max, Vec2::new(936.0, 516.0));

        let outer = rect.expand(200.0);
        assert!(outer.contains(Vec2::new(-150.0, 600.0)));
        assert!(!outer.contains(Vec2::new(-250.0, 0.0)));

        // Oversized inset collapses instead of inverting
        let collapsed = Rect::from_size(10.0, 10.0).inset(50.0);
        assert_eq!(collapsed.min, collapsed.max);
    }

    #[test]
    fn test_clamp_point() {
        let rect = Rect::from_size(960.0, 540.0).inset(24.0);
        let p = rect.clamp_point(Vec2::new(-40.0, 900.0));
        assert_eq!(p, Vec2::new(24.0, 516.0));
    }

    #[test]
    fn test_seek_direction() {
        let dir = seek_direction(Vec2::ZERO, Vec2::new(3.0, 4.0));
        assert!((dir.length() - 1.0).abs() < 1e-6);
        assert_eq!(seek_direction(Vec2::ONE, Vec2::ONE), Vec2::ZERO);
    }
}
