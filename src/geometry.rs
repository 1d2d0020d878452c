// =============================================================================
// GEOMETRY.RS — Axis-aligned rectangles for a side-scrolling world
//
// Everything in the world is an AABB in world units (y grows downward):
// - Entity bounding boxes and terrain
// - Attack hitboxes and transition trigger areas
// - The camera's view rectangle
// =============================================================================

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle. `x`/`y` is the top-left corner.
///
/// Serialises as a compact `[x, y, w, h]` array.
#[derive(Copy, Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "[f32; 4]", into = "[f32; 4]")]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl From<[f32; 4]> for Rect {
    fn from([x, y, w, h]: [f32; 4]) -> Self {
        Self { x, y, w, h }
    }
}

impl From<Rect> for [f32; 4] {
    fn from(r: Rect) -> Self {
        [r.x, r.y, r.w, r.h]
    }
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w * 0.5, self.y + self.h * 0.5)
    }

    #[inline]
    pub fn top_left(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn set_left(&mut self, v: f32) {
        self.x = v;
    }

    pub fn set_right(&mut self, v: f32) {
        self.x = v - self.w;
    }

    pub fn set_top(&mut self, v: f32) {
        self.y = v;
    }

    pub fn set_bottom(&mut self, v: f32) {
        self.y = v - self.h;
    }

    /// Move the rectangle so its centre lands on `c`.
    pub fn set_center(&mut self, c: Vec2) {
        self.x = c.x - self.w * 0.5;
        self.y = c.y - self.h * 0.5;
    }

    /// Strict overlap test. Rectangles that merely share an edge do not intersect.
    #[inline]
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }

    /// True when the horizontal extents overlap (edges touching does not count).
    #[inline]
    pub fn overlaps_x(&self, other: &Rect) -> bool {
        self.left() < other.right() && other.left() < self.right()
    }

    /// Length of the vertical overlap between the two rectangles, or `0.0`.
    #[inline]
    pub fn overlap_y(&self, other: &Rect) -> f32 {
        (self.bottom().min(other.bottom()) - self.top().max(other.top())).max(0.0)
    }

    pub fn contains_point(&self, p: Vec2) -> bool {
        p.x >= self.left() && p.x < self.right() && p.y >= self.top() && p.y < self.bottom()
    }
}

// =============================================================================
// FACING
// =============================================================================

/// Horizontal facing of an entity. Renderers flip sprites facing `Left`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

impl Facing {
    /// Facing that corresponds to a movement sign. Zero keeps `self`.
    pub fn from_sign(self, sign: f32) -> Facing {
        if sign > 0.0 {
            Facing::Right
        } else if sign < 0.0 {
            Facing::Left
        } else {
            self
        }
    }

    /// Facing from `from_x` toward `to_x`. Ties face right.
    pub fn toward(from_x: f32, to_x: f32) -> Facing {
        if to_x < from_x { Facing::Left } else { Facing::Right }
    }

    pub fn sign(self) -> f32 {
        match self {
            Facing::Left => -1.0,
            Facing::Right => 1.0,
        }
    }
}

/// Rectangle of width `reach` and the owner's height, extending from the
/// owner's centre toward its facing side. Used for melee hitboxes.
pub fn facing_box(owner: &Rect, facing: Facing, reach: f32) -> Rect {
    let cx = owner.center().x;
    match facing {
        Facing::Right => Rect::new(cx, owner.y, reach, owner.h),
        Facing::Left => Rect::new(cx - reach, owner.y, reach, owner.h),
    }
}
