//! Axis-aligned rectangles in logical pixel space
//!
//! Origin is top-left, +y points down (canvas convention).

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Square rectangle with its top-left corner at `pos`
    pub fn square(pos: Vec2, size: f32) -> Self {
        Self::new(pos.x, pos.y, size, size)
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    /// Strict overlap test (touching edges do not count)
    pub fn intersects(&self, other: &Rect) -> bool {
        super::aabb_intersects(self, other)
    }

    /// Rectangle shrunk by `amount` on every side
    pub fn inset(&self, amount: f32) -> Self {
        Self::new(
            self.x + amount,
            self.y + amount,
            self.w - amount * 2.0,
            self.h - amount * 2.0,
        )
    }

    /// Rectangle centered horizontally in a `width` x `height` area, snapped to whole pixels.
    ///
    /// `offset_y` is added after vertical centering.
    pub fn centered_in(width: f32, height: f32, w: f32, h: f32, offset_y: f32) -> Self {
        let x = ((width - w) / 2.0).floor();
        let y = ((height - h) / 2.0).floor() + offset_y;
        Self::new(x, y, w, h)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edges_and_center() {
        let r = Rect::new(10.0, 20.0, 200.0, 140.0);
        assert_eq!(r.right(), 210.0);
        assert_eq!(r.bottom(), 160.0);
        assert_eq!(r.center(), Vec2::new(110.0, 90.0));
    }

    #[test]
    fn test_centered_in_snaps_to_pixels() {
        let r = Rect::centered_in(320.0, 184.0, 201.0, 140.0, 10.0);
        assert_eq!(r.x, 59.0);
        assert_eq!(r.y, 32.0);
    }
}
