//! Axis-aligned geometry on top of `glam::Vec2`
//!
//! Addition, subtraction, scaling, length and component-wise clamp come
//! straight from `Vec2`. What lives here is the part `Vec2` leaves to the
//! caller: a normalize that never yields NaN, and rectangles.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Unit vector in the direction of `v`, or zero for a zero-length/non-finite `v`
#[inline]
pub fn normalize_or_zero(v: Vec2) -> Vec2 {
    let len = v.length();
    if len.is_finite() && len > 0.0 {
        v / len
    } else {
        Vec2::ZERO
    }
}

/// Component-wise clamp that tolerates `min > max` on an axis (collapses to `min`)
#[inline]
pub fn clamp(v: Vec2, min: Vec2, max: Vec2) -> Vec2 {
    Vec2::new(v.x.min(max.x).max(min.x), v.y.min(max.y).max(min.y))
}

/// Rectangle given by its top-left corner and size (screen coordinates, y down)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
    }

    #[inline]
    pub fn min(&self) -> Vec2 {
        self.pos
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.pos + self.size
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    /// Point of the rectangle nearest to `p`
    #[inline]
    pub fn closest_point(&self, p: Vec2) -> Vec2 {
        p.clamp(self.min(), self.max())
    }
}

/// Circle/rectangle overlap via the closest point on the rectangle.
/// Touching counts as a hit.
pub fn circle_intersects_rect(center: Vec2, radius: f32, rect: &Rect) -> bool {
    let closest = rect.closest_point(center);
    center.distance_squared(closest) <= radius * radius
}
