//! Plane geometry shared by every game
//!
//! Screen coordinates: x grows right, y grows down, units are pixels.

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Euclidean distance between two points
#[inline]
pub fn distance(a: DVec2, b: DVec2) -> f64 {
    (a - b).length()
}

/// Unit vector in the direction of `v`, or zero when `v` has no length
#[inline]
pub fn normalize(v: DVec2) -> DVec2 {
    let len = v.length();
    if len == 0.0 { DVec2::ZERO } else { v / len }
}

/// Penetration depth of two circles; positive means they overlap
#[inline]
pub fn circle_overlap(c1: DVec2, r1: f64, c2: DVec2, r2: f64) -> f64 {
    r1 + r2 - distance(c1, c2)
}

/// Axis-aligned rectangle (top-left corner + size)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Square that bounds a circle
    pub fn around_circle(center: DVec2, radius: f64) -> Self {
        Self::new(center.x - radius, center.y - radius, radius * 2.0, radius * 2.0)
    }

    #[inline]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn center(&self) -> DVec2 {
        DVec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn half_extents(&self) -> DVec2 {
        DVec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Point containment (left/top edges inclusive, right/bottom exclusive)
    pub fn contains(&self, p: DVec2) -> bool {
        p.x >= self.x && p.x < self.right() && p.y >= self.y && p.y < self.bottom()
    }

    /// Strict overlap: rectangles that only share an edge do not intersect
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}

/// Playfield extents a body is reflected inside of
///
/// An open side is expressed with an infinite coordinate, e.g. pong's table
/// has no floor: `max.y == f64::INFINITY`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: DVec2,
    pub max: DVec2,
}

impl Bounds {
    pub const fn new(min: DVec2, max: DVec2) -> Self {
        Self { min, max }
    }

    /// Bounds spanning `[0, width] x [0, height]`
    pub fn from_size(width: f64, height: f64) -> Self {
        Self::new(DVec2::ZERO, DVec2::new(width, height))
    }
}
