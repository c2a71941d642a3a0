//! Axis-aligned geometry primitives over the fixed-point algebra.
//!
//! Boundary semantics are pinned: every `intersects` uses closed
//! comparisons (a shared edge or boundary point counts), `contains` is
//! strict. The playfield the physics step clamps against and the 8x8 body
//! footprint are both [`Rect`]s.

use serde::{Deserialize, Serialize};

use crate::game::math::{as_signed, distance_squared, FixedNum, FixedNumU, FixedPoint2};

/// An unsigned width/height pair.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Size2 {
    pub width: FixedNumU,
    pub height: FixedNumU,
}

impl Size2 {
    pub const fn new(width: FixedNumU, height: FixedNumU) -> Self {
        Self { width, height }
    }

    pub const fn splat(side: FixedNumU) -> Self {
        Self { width: side, height: side }
    }
}

/// A circle described by its center and radius.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Circle {
    pub center: FixedPoint2,
    pub radius: FixedNumU,
}

impl Circle {
    pub const fn new(center: FixedPoint2, radius: FixedNumU) -> Self {
        Self { center, radius }
    }

    pub fn diameter(&self) -> FixedNumU {
        self.radius.wrapping_mul(FixedNumU::from_num(2))
    }

    pub fn radius_squared(&self) -> FixedNumU {
        self.radius.wrapping_mul(self.radius)
    }

    /// True if the point touches or lies within the circle (closed boundary).
    pub fn intersects(&self, point: FixedPoint2) -> bool {
        distance_squared(self.center, point) <= self.radius_squared()
    }

    /// True if the point lies strictly within the circle (open boundary).
    pub fn contains(&self, point: FixedPoint2) -> bool {
        distance_squared(self.center, point) < self.radius_squared()
    }

    /// True if the circles touch or overlap.
    pub fn intersects_circle(&self, other: &Circle) -> bool {
        let reach = self.radius.wrapping_add(other.radius);
        distance_squared(self.center, other.center) <= reach.wrapping_mul(reach)
    }
}

/// An axis-aligned rectangle anchored at its top-left corner.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub position: FixedPoint2,
    pub size: Size2,
}

impl Rect {
    pub const fn new(position: FixedPoint2, size: Size2) -> Self {
        Self { position, size }
    }

    pub fn left(&self) -> FixedNum {
        self.position.x
    }

    pub fn right(&self) -> FixedNum {
        self.position.x.wrapping_add(as_signed(self.size.width))
    }

    pub fn top(&self) -> FixedNum {
        self.position.y
    }

    pub fn bottom(&self) -> FixedNum {
        self.position.y.wrapping_add(as_signed(self.size.height))
    }

    /// True if the point touches or lies within the rectangle (all four
    /// edges closed).
    pub fn intersects(&self, point: FixedPoint2) -> bool {
        point.x >= self.left()
            && point.x <= self.right()
            && point.y >= self.top()
            && point.y <= self.bottom()
    }

    /// True if the rectangles touch or overlap (shared edges count).
    pub fn intersects_rect(&self, other: &Rect) -> bool {
        !(self.right() < other.left()
            || self.left() > other.right()
            || self.bottom() < other.top()
            || self.top() > other.bottom())
    }
}
