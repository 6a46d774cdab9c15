//! Axis-aligned rectangle geometry
//!
//! Every entity is a box anchored at its top-left corner. Overlap uses strict
//! inequalities on both axes, so boxes that only share an edge do not collide.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle (top-left origin, y grows downward)
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
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    /// Strict overlap test
    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.pos.x < other.right()
            && self.right() > other.pos.x
            && self.pos.y < other.bottom()
            && self.bottom() > other.pos.y
    }

    /// Clamp the top-left corner so the box stays inside `[0, bounds]`
    pub fn clamped_pos(&self, bounds: Vec2) -> Vec2 {
        let max = (bounds - self.size).max(Vec2::ZERO);
        self.pos.clamp(Vec2::ZERO, max)
    }
}

/// Anything with a collision box
pub trait Bounded {
    fn rect(&self) -> Rect;

    fn center(&self) -> Vec2 {
        self.rect().center()
    }

    fn overlaps<B: Bounded>(&self, other: &B) -> bool {
        self.rect().overlaps(&other.rect())
    }
}

impl Bounded for Rect {
    fn rect(&self) -> Rect {
        *self
    }
}
