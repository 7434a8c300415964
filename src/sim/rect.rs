//! Integer axis-aligned rectangles
//!
//! World and screen rectangles live on whole pixels, the same grid the tile
//! map is laid out on. Edges are half-open: `right()` and `bottom()` are the
//! first pixel outside the rectangle.

use glam::Vec2;

/// An axis-aligned rectangle in whole pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[inline]
    pub fn left(&self) -> i32 {
        self.x
    }

    #[inline]
    pub fn top(&self) -> i32 {
        self.y
    }

    #[inline]
    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    /// Top-left corner as a vector
    pub fn location(&self) -> Vec2 {
        Vec2::new(self.x as f32, self.y as f32)
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }

    pub fn center(&self) -> Vec2 {
        self.location() + self.size() / 2.0
    }

    /// Strict overlap test; rectangles that only share an edge do not intersect
    pub fn intersects(&self, other: &Rect) -> bool {
        other.left() < self.right()
            && self.left() < other.right()
            && other.top() < self.bottom()
            && self.top() < other.bottom()
    }

    /// True if `other` lies entirely inside this rectangle
    pub fn contains_rect(&self, other: &Rect) -> bool {
        other.left() >= self.left()
            && other.right() <= self.right()
            && other.top() >= self.top()
            && other.bottom() <= self.bottom()
    }

    pub fn contains_point(&self, point: Vec2) -> bool {
        point.x >= self.left() as f32
            && point.x < self.right() as f32
            && point.y >= self.top() as f32
            && point.y < self.bottom() as f32
    }

    /// Same size, origin moved by (dx, dy)
    pub fn offset(&self, dx: i32, dy: i32) -> Rect {
        Rect::new(self.x + dx, self.y + dy, self.width, self.height)
    }

    /// Shrink by `pad_x` on the left and right and `pad_y` on the top and bottom
    pub fn inset(&self, pad_x: i32, pad_y: i32) -> Rect {
        Rect::new(
            self.x + pad_x,
            self.y + pad_y,
            self.width - pad_x * 2,
            self.height - pad_y * 2,
        )
    }
}
