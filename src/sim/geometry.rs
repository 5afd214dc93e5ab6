//! Axis-aligned rectangle geometry for obstacles and arena bounds
//!
//! Everything here works in arena-local coordinates: the arena occupies
//! `[0, width] × [0, height]` with +y pointing down, as the host lays it out.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle given by its min and max corners
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Rectangle of the given size centered on `center`
    pub fn from_center_size(center: Vec2, width: f32, height: f32) -> Self {
        let half = Vec2::new(width, height) * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Arena bounds `[0, width] × [0, height]`
    pub fn arena(width: f32, height: f32) -> Self {
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

    /// Grow the rectangle by `amount` on every side
    pub fn expand(&self, amount: f32) -> Self {
        Self {
            min: self.min - Vec2::splat(amount),
            max: self.max + Vec2::splat(amount),
        }
    }

    /// Overlap test with a padding margin.
    ///
    /// Two rectangles count as overlapping unless one of them lies strictly
    /// more than `padding` away from the other on some axis.
    pub fn overlaps(&self, other: &Rect, padding: f32) -> bool {
        !(self.max.x + padding < other.min.x
            || self.min.x - padding > other.max.x
            || self.max.y + padding < other.min.y
            || self.min.y - padding > other.max.y)
    }

    /// Strict interior test against the rectangle grown by `padding`
    pub fn contains(&self, point: Vec2, padding: f32) -> bool {
        point.x > self.min.x - padding
            && point.x < self.max.x + padding
            && point.y > self.min.y - padding
            && point.y < self.max.y + padding
    }

    /// Clamp a point into the rectangle shrunk by `inset` on every side.
    ///
    /// Each axis is clamped independently. An axis whose inset range is
    /// inverted (rectangle narrower than `2 * inset`) collapses to the
    /// rectangle's center on that axis.
    pub fn clamp_inset(&self, point: Vec2, inset: f32) -> Vec2 {
        Vec2::new(
            clamp_axis(point.x, self.min.x + inset, self.max.x - inset),
            clamp_axis(point.y, self.min.y + inset, self.max.y - inset),
        )
    }

    /// Point at fractional coordinates (0,0 = min corner, 1,1 = max corner)
    pub fn point_at_fraction(&self, fx: f32, fy: f32) -> Vec2 {
        Vec2::new(
            self.min.x + self.width() * fx,
            self.min.y + self.height() * fy,
        )
    }
}

/// Clamp that tolerates an inverted range instead of panicking
#[inline]
pub fn clamp_axis(value: f32, lo: f32, hi: f32) -> f32 {
    if lo > hi {
        (lo + hi) * 0.5
    } else {
        value.clamp(lo, hi)
    }
}

/// True when `a` lies strictly closer than `radius` to `b`
#[inline]
pub fn within(a: Vec2, b: Vec2, radius: f32) -> bool {
    a.distance_squared(b) < radius * radius
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlap_without_padding() {
        let a = Rect::from_center_size(Vec2::new(100.0, 100.0), 40.0, 20.0);
        let b = Rect::from_center_size(Vec2::new(130.0, 100.0), 40.0, 20.0);
        let c = Rect::from_center_size(Vec2::new(200.0, 100.0), 40.0, 20.0);
        assert!(a.overlaps(&b, 0.0));
        assert!(b.overlaps(&a, 0.0));
        assert!(!a.overlaps(&c, 0.0));
    }

    #[test]
    fn test_padding_widens_overlap() {
        // Gap of 40 between edges (120 -> 160)
        let a = Rect::from_center_size(Vec2::new(100.0, 100.0), 40.0, 20.0);
        let b = Rect::from_center_size(Vec2::new(180.0, 100.0), 40.0, 20.0);
        assert!(!a.overlaps(&b, 39.0));
        // Exactly at the padding still counts as touching
        assert!(a.overlaps(&b, 40.0));
        assert!(a.overlaps(&b, 41.0));
    }

    #[test]
    fn test_contains_with_padding() {
        let r = Rect::from_center_size(Vec2::new(50.0, 50.0), 20.0, 20.0);
        assert!(r.contains(Vec2::new(50.0, 50.0), 0.0));
        assert!(!r.contains(Vec2::new(65.0, 50.0), 0.0));
        assert!(r.contains(Vec2::new(65.0, 50.0), 10.0));
    }

    #[test]
    fn test_clamp_inset() {
        let arena = Rect::arena(800.0, 600.0);
        let p = arena.clamp_inset(Vec2::new(-50.0, 700.0), 18.0);
        assert_eq!(p, Vec2::new(18.0, 582.0));
        let inside = arena.clamp_inset(Vec2::new(400.0, 300.0), 18.0);
        assert_eq!(inside, Vec2::new(400.0, 300.0));
    }

    #[test]
    fn test_clamp_inset_degenerate_axis() {
        // Too narrow for the inset: collapse to the center instead of panicking
        let thin = Rect::arena(20.0, 600.0);
        let p = thin.clamp_inset(Vec2::new(500.0, 10.0), 18.0);
        assert_eq!(p, Vec2::new(10.0, 18.0));
    }

    #[test]
    fn test_within_is_strict() {
        assert!(within(Vec2::ZERO, Vec2::new(3.0, 4.0), 5.1));
        assert!(!within(Vec2::ZERO, Vec2::new(3.0, 4.0), 5.0));
    }

    #[test]
    fn test_point_at_fraction() {
        let arena = Rect::arena(1000.0, 500.0);
        assert_eq!(arena.point_at_fraction(0.3, 0.7), Vec2::new(300.0, 350.0));
        assert_eq!(arena.center(), Vec2::new(500.0, 250.0));
    }
}
