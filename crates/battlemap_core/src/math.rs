//! Planar geometry helpers for placement.
//!
//! Map space is a plain `f64` plane with the origin in the top-left
//! corner, x growing right and y growing down, matching the render sink.
//! Placement only ever compares distances, so nothing here depends on
//! platform-specific float behaviour beyond IEEE-754 `sqrt`.

use serde::{Deserialize, Serialize};

/// 2D point or vector in map coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec2 {
    /// X coordinate.
    pub x: f64,
    /// Y coordinate.
    pub y: f64,
}

impl Vec2 {
    /// Create a new vector.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Zero vector.
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    /// Squared distance (avoids sqrt for comparisons).
    #[must_use]
    pub fn distance_squared(self, other: Self) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    /// Euclidean distance.
    #[must_use]
    pub fn distance(self, other: Self) -> f64 {
        self.distance_squared(other).sqrt()
    }

    /// True if `other` lies strictly closer than `radius`.
    ///
    /// Touching at exactly `radius` does not count.
    #[must_use]
    pub fn within(self, other: Self, radius: f64) -> bool {
        self.distance(other) < radius
    }
}

/// Axis-aligned rectangle, inclusive on both ends.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Top-left corner.
    pub min: Vec2,
    /// Bottom-right corner.
    pub max: Vec2,
}

impl Rect {
    /// Rectangle covering `[0, width] x [0, height]` shrunk by `inset` on every side.
    ///
    /// Returns `None` when any input is not finite or the inset leaves no
    /// positive area.
    #[must_use]
    pub fn inset(width: f64, height: f64, inset: f64) -> Option<Self> {
        if !(width.is_finite() && height.is_finite() && inset.is_finite()) {
            return None;
        }
        if inset < 0.0 || width - 2.0 * inset <= 0.0 || height - 2.0 * inset <= 0.0 {
            return None;
        }
        Some(Self {
            min: Vec2::new(inset, inset),
            max: Vec2::new(width - inset, height - inset),
        })
    }

    /// Width of the rectangle.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    /// Height of the rectangle.
    #[must_use]
    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    /// True if `point` lies inside or on the border.
    #[must_use]
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec2_distance() {
        let a = Vec2::new(3.0, 0.0);
        let b = Vec2::new(0.0, 4.0);
        assert_eq!(a.distance_squared(b), 25.0);
        assert_eq!(a.distance(b), 5.0);
    }

    #[test]
    fn test_within_is_strict() {
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(10.0, 0.0);
        assert!(a.within(b, 10.5));
        assert!(!a.within(b, 10.0));
    }

    #[test]
    fn test_rect_inset() {
        let rect = Rect::inset(600.0, 400.0, 50.0).unwrap();
        assert_eq!(rect.min, Vec2::new(50.0, 50.0));
        assert_eq!(rect.max, Vec2::new(550.0, 350.0));
        assert_eq!(rect.width(), 500.0);
        assert_eq!(rect.height(), 300.0);
        assert!(rect.contains(Vec2::new(50.0, 350.0)));
        assert!(!rect.contains(Vec2::new(49.9, 100.0)));
    }

    #[test]
    fn test_rect_inset_rejects_degenerate() {
        assert!(Rect::inset(100.0, 400.0, 50.0).is_none());
        assert!(Rect::inset(600.0, 400.0, -1.0).is_none());
        assert!(Rect::inset(600.0, 400.0, 0.0).is_some());
    }

    #[test]
    fn test_rect_inset_rejects_non_finite() {
        assert!(Rect::inset(600.0, 400.0, f64::NAN).is_none());
        assert!(Rect::inset(f64::NAN, 400.0, 50.0).is_none());
        assert!(Rect::inset(600.0, f64::INFINITY, 50.0).is_none());
        assert!(Rect::inset(f64::INFINITY, f64::INFINITY, 50.0).is_none());
    }
}
