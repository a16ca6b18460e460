//! Collision detection for axis-aligned boxes
//!
//! Everything in the arena is an axis-aligned square, so a strict
//! separating-axis test on both axes is all the battle needs.

use super::rect::Rect;

/// Check whether two boxes overlap.
///
/// Edges that merely touch are not an overlap, so a projectile sitting flush
/// against the player does not register a hit.
#[inline]
pub fn aabb_intersects(a: &Rect, b: &Rect) -> bool {
    a.x < b.x + b.w && a.x + a.w > b.x && a.y < b.y + b.h && a.y + a.h > b.y
}

/// Check whether `inner` lies completely outside `outer` on at least one side.
///
/// Each edge is checked independently; a box straddling an edge is still inside.
#[inline]
pub fn fully_outside(inner: &Rect, outer: &Rect) -> bool {
    inner.right() < outer.x
        || inner.bottom() < outer.y
        || inner.x > outer.right()
        || inner.y > outer.bottom()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlap() {
        let a = Rect::new(0.0, 0.0, 8.0, 8.0);
        let b = Rect::new(4.0, 4.0, 8.0, 8.0);
        assert!(aabb_intersects(&a, &b));
        assert!(aabb_intersects(&b, &a));
    }

    #[test]
    fn test_touching_edges_do_not_overlap() {
        let a = Rect::new(0.0, 0.0, 8.0, 8.0);
        let right = Rect::new(8.0, 0.0, 8.0, 8.0);
        let below = Rect::new(0.0, 8.0, 8.0, 8.0);
        assert!(!aabb_intersects(&a, &right));
        assert!(!aabb_intersects(&a, &below));
    }

    #[test]
    fn test_contained_box_overlaps() {
        let outer = Rect::new(0.0, 0.0, 100.0, 100.0);
        let inner = Rect::new(40.0, 40.0, 8.0, 8.0);
        assert!(aabb_intersects(&outer, &inner));
    }

    #[test]
    fn test_fully_outside_per_edge() {
        let arena = Rect::new(60.0, 32.0, 200.0, 140.0);
        // Straddling the left edge is still inside
        assert!(!fully_outside(&Rect::new(55.0, 50.0, 8.0, 8.0), &arena));
        // Touching the left edge from outside is still inside
        assert!(!fully_outside(&Rect::new(52.0, 50.0, 8.0, 8.0), &arena));
        assert!(fully_outside(&Rect::new(51.0, 50.0, 8.0, 8.0), &arena));
        assert!(fully_outside(&Rect::new(100.0, 23.0, 8.0, 8.0), &arena));
        assert!(fully_outside(&Rect::new(260.5, 50.0, 8.0, 8.0), &arena));
        assert!(fully_outside(&Rect::new(100.0, 172.5, 8.0, 8.0), &arena));
        assert!(!fully_outside(&Rect::new(260.0, 172.0, 8.0, 8.0), &arena));
    }
}
