//! Axis-aligned rectangle geometry
//!
//! Every gameplay hitbox is an axis-aligned box in screen space
//! (origin top-left, +y down).

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle given by its top-left corner and size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
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

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    /// Strict overlap test: rectangles that merely share an edge do not intersect,
    /// and a zero-area rectangle never intersects anything.
    pub fn intersects(&self, other: &Rect) -> bool {
        if self.size.x <= 0.0 || self.size.y <= 0.0 || other.size.x <= 0.0 || other.size.y <= 0.0 {
            return false;
        }
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }
}

/// Clamp a box of `size` at `pos` so it stays fully on a `bounds` sized screen
#[inline]
pub fn clamp_to_screen(pos: Vec2, size: Vec2, bounds: Vec2) -> Vec2 {
    Vec2::new(
        pos.x.clamp(0.0, (bounds.x - size.x).max(0.0)),
        pos.y.clamp(0.0, (bounds.y - size.y).max(0.0)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 5.0, 10.0, 10.0);
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
    }

    #[test]
    fn test_touching_edges_do_not_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(10.0, 0.0, 10.0, 10.0);
        assert!(!a.intersects(&b));
    }

    #[test]
    fn test_empty_rect_never_overlaps() {
        let strip = Rect::new(0.0, 0.0, 100.0, 0.0);
        let player = Rect::new(0.0, 0.0, 40.0, 20.0);
        assert!(!strip.intersects(&player));
    }

    #[test]
    fn test_clamp_to_screen() {
        let p = clamp_to_screen(Vec2::new(-5.0, 700.0), Vec2::new(40.0, 20.0), Vec2::new(800.0, 600.0));
        assert_eq!(p, Vec2::new(0.0, 580.0));
    }
}
