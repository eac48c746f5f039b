//! Axis-aligned collision bodies
//!
//! Platforms only collide on their top face: a body moving down through the
//! top edge lands, anything approaching from the sides or below passes
//! through.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned box (top-left origin, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec2,
    pub size: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        Self {
            min: center - size / 2.0,
            size,
        }
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

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.min + self.size / 2.0
    }

    /// Strict overlap (touching edges do not count)
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }

    /// Horizontal extents overlap
    pub fn overlaps_x(&self, other: &Aabb) -> bool {
        self.left() < other.right() && self.right() > other.left()
    }
}

/// Which faces of a body touched something during the last physics step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Touching {
    pub down: bool,
}

/// A dynamic body: moves under gravity and its own velocity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub bounds: Aabb,
    pub vel: Vec2,
    /// Reset at the start of every physics step
    pub touching: Touching,
}

impl Body {
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        Self {
            bounds: Aabb::from_center(center, size),
            vel: Vec2::ZERO,
            touching: Touching::default(),
        }
    }

    /// Top edge (the body's y)
    #[inline]
    pub fn y(&self) -> f32 {
        self.bounds.top()
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.bounds.center()
    }

    /// Move so the body is centered on `center`
    pub fn set_center(&mut self, center: Vec2) {
        self.bounds = Aabb::from_center(center, self.bounds.size);
    }

    pub fn set_center_x(&mut self, x: f32) {
        self.bounds.min.x = x - self.bounds.size.x / 2.0;
    }
}

/// Tolerance for the landing test, in pixels
pub const LANDING_EPSILON: f32 = 0.5;

/// Did a body whose bottom was at `prev_bottom` land on the top face of
/// `platform` this step? Only downward motion counts.
pub fn lands_on_top(prev_bottom: f32, body: &Body, platform: &Aabb) -> bool {
    if body.vel.y <= 0.0 {
        return false;
    }
    if !body.bounds.overlaps_x(platform) {
        return false;
    }
    let top = platform.top();
    prev_bottom <= top + LANDING_EPSILON && body.bounds.bottom() >= top
}
