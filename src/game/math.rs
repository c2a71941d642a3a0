//! Fixed-point scalar and vector algebra for the simulation core.
//!
//! All spatial and velocity quantities are 16-bit fixed point: [`FixedNum`]
//! carries 12 integer bits, 3 fractional bits and a sign ([`FixedNumU`] is
//! the unsigned counterpart used for magnitudes). The smallest representable
//! step is [`EPSILON`] = 2^-3.
//!
//! Arithmetic here wraps at the 16-bit word boundary (`wrapping_*` ops), so
//! an out-of-range value degrades to wrong-but-deterministic motion instead
//! of a panic. Products discard sub-resolution bits (round toward negative
//! infinity); quotients round toward zero. Conversion to floating point is
//! for the render/HUD boundary only and must never feed back into the
//! simulation.

use bevy::prelude::*;
use fixed::types::{I13F3, U13F3};
use serde::{Deserialize, Serialize};

pub type FixedNum = I13F3;
pub type FixedNumU = U13F3;

/// Smallest positive representable value (one fractional-grid step).
pub const EPSILON: FixedNum = FixedNum::DELTA;

/// Reinterpret the bit pattern of a signed value as unsigned.
pub const fn as_unsigned(value: FixedNum) -> FixedNumU {
    FixedNumU::from_bits(value.to_bits() as u16)
}

/// Reinterpret the bit pattern of an unsigned value as signed.
pub const fn as_signed(value: FixedNumU) -> FixedNum {
    FixedNum::from_bits(value.to_bits() as i16)
}

/// A displacement, velocity or force.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FixedVec2 {
    pub x: FixedNum,
    pub y: FixedNum,
}

impl FixedVec2 {
    pub const ZERO: Self = Self { x: FixedNum::ZERO, y: FixedNum::ZERO };

    pub const fn new(x: FixedNum, y: FixedNum) -> Self {
        Self { x, y }
    }

    pub fn to_vec2(self) -> Vec2 {
        Vec2::new(self.x.to_num(), self.y.to_num())
    }
}

impl std::ops::Add for FixedVec2 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Self { x: self.x.wrapping_add(rhs.x), y: self.y.wrapping_add(rhs.y) }
    }
}

impl std::ops::AddAssign for FixedVec2 {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl std::ops::Sub for FixedVec2 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self::Output {
        Self { x: self.x.wrapping_sub(rhs.x), y: self.y.wrapping_sub(rhs.y) }
    }
}

impl std::ops::SubAssign for FixedVec2 {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl std::ops::Mul<FixedNum> for FixedVec2 {
    type Output = Self;
    fn mul(self, rhs: FixedNum) -> Self::Output {
        Self { x: self.x.wrapping_mul(rhs), y: self.y.wrapping_mul(rhs) }
    }
}

impl std::ops::Div<FixedNum> for FixedVec2 {
    type Output = Self;
    fn div(self, rhs: FixedNum) -> Self::Output {
        Self { x: self.x.wrapping_div(rhs), y: self.y.wrapping_div(rhs) }
    }
}

impl std::ops::Neg for FixedVec2 {
    type Output = Self;
    fn neg(self) -> Self::Output {
        Self { x: self.x.wrapping_neg(), y: self.y.wrapping_neg() }
    }
}

/// An absolute position. Translation by a [`FixedVec2`] is the only way a
/// position moves; the difference of two positions is a [`FixedVec2`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FixedPoint2 {
    pub x: FixedNum,
    pub y: FixedNum,
}

impl FixedPoint2 {
    pub const ORIGIN: Self = Self { x: FixedNum::ZERO, y: FixedNum::ZERO };

    pub const fn new(x: FixedNum, y: FixedNum) -> Self {
        Self { x, y }
    }

    pub fn to_vec2(self) -> Vec2 {
        Vec2::new(self.x.to_num(), self.y.to_num())
    }
}

impl std::ops::Add<FixedVec2> for FixedPoint2 {
    type Output = Self;
    fn add(self, rhs: FixedVec2) -> Self::Output {
        Self { x: self.x.wrapping_add(rhs.x), y: self.y.wrapping_add(rhs.y) }
    }
}

impl std::ops::AddAssign<FixedVec2> for FixedPoint2 {
    fn add_assign(&mut self, rhs: FixedVec2) {
        *self = *self + rhs;
    }
}

impl std::ops::Sub<FixedVec2> for FixedPoint2 {
    type Output = Self;
    fn sub(self, rhs: FixedVec2) -> Self::Output {
        Self { x: self.x.wrapping_sub(rhs.x), y: self.y.wrapping_sub(rhs.y) }
    }
}

impl std::ops::SubAssign<FixedVec2> for FixedPoint2 {
    fn sub_assign(&mut self, rhs: FixedVec2) {
        *self = *self - rhs;
    }
}

impl std::ops::Sub for FixedPoint2 {
    type Output = FixedVec2;
    fn sub(self, rhs: Self) -> FixedVec2 {
        FixedVec2 { x: self.x.wrapping_sub(rhs.x), y: self.y.wrapping_sub(rhs.y) }
    }
}

/// Squared distance between two positions, computed in the wrapping 16-bit
/// domain and reinterpreted unsigned. Exact for the screen-sized coordinate
/// ranges this crate works in.
pub fn distance_squared(a: FixedPoint2, b: FixedPoint2) -> FixedNumU {
    let dx = a.x.wrapping_sub(b.x);
    let dy = a.y.wrapping_sub(b.y);
    as_unsigned(dx.wrapping_mul(dx).wrapping_add(dy.wrapping_mul(dy)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn num(v: f32) -> FixedNum {
        FixedNum::from_num(v)
    }

    #[test]
    fn epsilon_is_one_eighth() {
        assert_eq!(EPSILON, num(0.125));
        assert_eq!(EPSILON.to_bits(), 1);
    }

    #[test]
    fn from_num_rounds_to_nearest_grid_step() {
        // 0.3 is not representable with 3 fractional bits; nearest is 0.25.
        assert_eq!(num(0.3), FixedNum::from_bits(2));
        // 0.95 rounds up to 1.0, which is why tuning constants must be
        // chosen on the grid.
        assert_eq!(num(0.95), FixedNum::ONE);
    }

    #[test]
    fn products_discard_sub_resolution_bits() {
        // 1.125 * 1.125 = 1.265625, which floors to 1.25 on the grid.
        let v = FixedVec2::new(num(1.125), num(1.125)) * num(1.125);
        assert_eq!(v.x, num(1.25));
        assert_eq!(v.y, num(1.25));
    }

    #[test]
    fn addition_wraps_at_the_word_boundary() {
        let v = FixedVec2::new(FixedNum::MAX, FixedNum::ZERO) + FixedVec2::new(EPSILON, EPSILON);
        assert_eq!(v.x, FixedNum::MIN);
        assert_eq!(v.y, EPSILON);
    }

    #[test]
    fn negation_is_an_involution() {
        let v = FixedVec2::new(num(2.5), num(-3.625));
        assert_eq!(-(-v), v);
    }

    #[test]
    fn point_translation_roundtrips() {
        let mut p = FixedPoint2::new(num(4.0), num(6.5));
        let d = FixedVec2::new(num(1.25), num(-0.5));
        p += d;
        assert_eq!(p, FixedPoint2::new(num(5.25), num(6.0)));
        p -= d;
        assert_eq!(p, FixedPoint2::new(num(4.0), num(6.5)));
    }

    #[test]
    fn point_difference_is_a_vector() {
        let a = FixedPoint2::new(num(5.0), num(1.0));
        let b = FixedPoint2::new(num(2.0), num(3.0));
        assert_eq!(a - b, FixedVec2::new(num(3.0), num(-2.0)));
    }

    #[test]
    fn distance_squared_is_exact_for_small_offsets() {
        let a = FixedPoint2::new(num(3.0), num(4.0));
        assert_eq!(distance_squared(a, FixedPoint2::ORIGIN), FixedNumU::from_num(25));
        // Symmetric.
        assert_eq!(distance_squared(FixedPoint2::ORIGIN, a), FixedNumU::from_num(25));
    }

    #[test]
    fn unsigned_reinterpretation_preserves_bits() {
        let v = num(-1.0);
        assert_eq!(as_signed(as_unsigned(v)), v);
        assert_eq!(as_unsigned(num(2.5)), FixedNumU::from_num(2.5));
    }
}
