//! IEEE 754 binary16 helpers.
//!
//! Thin bit-level wrappers over [`half::f16`] so the conversion code can move
//! raw `u16` words around without caring about the float type. Subnormals,
//! infinities and NaN are preserved in both directions; narrowing rounds to
//! nearest-even.

use half::f16;

/// Largest finite half value.
pub const HALF_MAX: f32 = 65504.0;

/// Decodes a binary16 bit pattern.
#[inline]
pub fn half_bits_to_f32(bits: u16) -> f32 {
    f16::from_bits(bits).to_f32()
}

/// Decodes a binary16 bit pattern to `f64` (exact).
#[inline]
pub fn half_bits_to_f64(bits: u16) -> f64 {
    f16::from_bits(bits).to_f64()
}

/// Encodes an `f32` as a binary16 bit pattern.
#[inline]
pub fn f32_to_half_bits(value: f32) -> u16 {
    f16::from_f32(value).to_bits()
}

/// Encodes an `f64` as a binary16 bit pattern with a single rounding step.
#[inline]
pub fn f64_to_half_bits(value: f64) -> u16 {
    f16::from_f64(value).to_bits()
}
