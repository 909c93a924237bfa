//! Axis-aligned bounding box overlap testing
//!
//! Everything in the game collides as a box: the player and obstacles use
//! their full sprite rectangles, and a coin uses a radius-sized square.
//! Boxes that merely share an edge do not count as touching.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned bounding box, anchored at its top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Aabb {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }
}

/// Strict AABB overlap test
///
/// All four comparisons are strict, so a shared edge is a miss.
#[inline]
pub fn overlaps(a: &Aabb, b: &Aabb) -> bool {
    a.left() < b.right() && a.right() > b.left() && a.top() < b.bottom() && a.bottom() > b.top()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn overlapping_boxes_hit() {
        let a = Aabb::new(0.0, 0.0, 10.0, 10.0);
        let b = Aabb::new(5.0, 5.0, 10.0, 10.0);
        assert!(overlaps(&a, &b));
        assert!(overlaps(&b, &a));
    }

    #[test]
    fn contained_box_hits() {
        let outer = Aabb::new(0.0, 0.0, 100.0, 100.0);
        let inner = Aabb::new(40.0, 40.0, 10.0, 10.0);
        assert!(overlaps(&outer, &inner));
        assert!(overlaps(&inner, &outer));
    }

    #[test]
    fn disjoint_boxes_miss() {
        let a = Aabb::new(0.0, 0.0, 10.0, 10.0);
        let b = Aabb::new(50.0, 0.0, 10.0, 10.0);
        assert!(!overlaps(&a, &b));
    }

    #[test]
    fn shared_edge_is_a_miss() {
        let a = Aabb::new(0.0, 0.0, 10.0, 10.0);
        // b starts exactly where a ends, horizontally then vertically
        let right = Aabb::new(10.0, 0.0, 10.0, 10.0);
        let below = Aabb::new(0.0, 10.0, 10.0, 10.0);
        assert!(!overlaps(&a, &right));
        assert!(!overlaps(&right, &a));
        assert!(!overlaps(&a, &below));
        assert!(!overlaps(&below, &a));
    }

    #[test]
    fn shared_corner_is_a_miss() {
        let a = Aabb::new(0.0, 0.0, 10.0, 10.0);
        let corner = Aabb::new(10.0, 10.0, 10.0, 10.0);
        assert!(!overlaps(&a, &corner));
    }

    proptest! {
        #[test]
        fn overlap_is_symmetric(
            ax in -500.0f32..500.0, ay in -500.0f32..500.0,
            aw in 0.0f32..200.0, ah in 0.0f32..200.0,
            bx in -500.0f32..500.0, by in -500.0f32..500.0,
            bw in 0.0f32..200.0, bh in 0.0f32..200.0,
        ) {
            let a = Aabb::new(ax, ay, aw, ah);
            let b = Aabb::new(bx, by, bw, bh);
            prop_assert_eq!(overlaps(&a, &b), overlaps(&b, &a));
        }

        #[test]
        fn horizontally_separated_boxes_miss(
            ax in -500.0f32..500.0, ay in -500.0f32..500.0,
            aw in 0.0f32..200.0, ah in 0.0f32..200.0,
            gap in 0.0f32..100.0,
            bw in 0.0f32..200.0, bh in 0.0f32..200.0,
        ) {
            let a = Aabb::new(ax, ay, aw, ah);
            // b starts at or past a's right edge
            let b = Aabb::new(ax + aw + gap, ay, bw, bh);
            prop_assert!(!overlaps(&a, &b));
        }
    }
}
