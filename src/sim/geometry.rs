//! Axis-aligned box tests
//!
//! Everything in the playfield is a rectangle, so collision is just interval
//! overlap on both axes. Touching edges never count as a hit.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box (top-left corner + size, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec2,
    pub size: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.min.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.min.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.min.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.min.y + self.size.y
    }

    /// Strict overlap on both axes
    pub fn intersects(&self, other: &Aabb) -> bool {
        intersects(self, other)
    }

    /// True if `other` lies entirely inside this box (shared edges allowed)
    pub fn contains(&self, other: &Aabb) -> bool {
        other.left() >= self.left()
            && other.right() <= self.right()
            && other.top() >= self.top()
            && other.bottom() <= self.bottom()
    }
}

/// True iff the boxes overlap on both axes. Edge contact is not overlap.
#[inline]
pub fn intersects(a: &Aabb, b: &Aabb) -> bool {
    a.left() < b.right() && b.left() < a.right() && a.top() < b.bottom() && b.top() < a.bottom()
}

/// True iff the box's vertical extent lies within `[gap_top, gap_bottom]`
#[inline]
pub fn vertically_clears(actor: &Aabb, gap_top: f32, gap_bottom: f32) -> bool {
    actor.top() >= gap_top && actor.bottom() <= gap_bottom
}
