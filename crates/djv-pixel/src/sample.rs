//! Scalar sample access.
//!
//! Reading and writing single samples in a given byte order, integer
//! normalization/quantization, and the packed 10-bit word format.
//!
//! # Packed 10-bit words
//!
//! [`SampleType::U10`] stores three channels in one 32-bit word, red in the
//! most significant bits and two unused bits at the bottom (the DPX "method A"
//! packing). The word itself is stored in the buffer's byte order.
//!
//! ```text
//! bit  31        22 21        12 11         2 1  0
//!     [  R (10)    ][  G (10)    ][  B (10)    ][ 0 ]
//! ```
//!
//! ```rust
//! use djv_pixel::sample::{pack_u10, unpack_u10};
//!
//! let word = pack_u10([1023, 512, 1]);
//! assert_eq!(word, 0xFFE0_0004);
//! assert_eq!(unpack_u10(word), [1023, 512, 1]);
//! ```

use crate::descriptor::Endian;
use crate::half_float::{f64_to_half_bits, half_bits_to_f64};
use crate::layout::SampleType;
use byteorder::{BigEndian, ByteOrder, LittleEndian};

const U10_MASK: u32 = 0x3FF;

/// Packs three 10-bit values into one word. Bits above 10 are discarded.
#[inline]
pub const fn pack_u10(rgb: [u16; 3]) -> u32 {
    ((rgb[0] as u32 & U10_MASK) << 22)
        | ((rgb[1] as u32 & U10_MASK) << 12)
        | ((rgb[2] as u32 & U10_MASK) << 2)
}

/// Unpacks a word into three 10-bit values.
#[inline]
pub const fn unpack_u10(word: u32) -> [u16; 3] {
    [
        ((word >> 22) & U10_MASK) as u16,
        ((word >> 12) & U10_MASK) as u16,
        ((word >> 2) & U10_MASK) as u16,
    ]
}

/// Maps an integer sample onto [0, 1].
#[inline]
pub fn normalize(raw: u32, max: u32) -> f64 {
    raw as f64 / max as f64
}

/// Maps a normalized value onto [0, max], clamping out-of-range input and
/// rounding to nearest. NaN quantizes to 0, +inf to `max`.
#[inline]
pub fn quantize(value: f64, max: u32) -> u32 {
    if value.is_nan() {
        return 0;
    }
    (value.clamp(0.0, 1.0) * max as f64).round() as u32
}

#[inline]
pub(crate) fn read_u16(bytes: &[u8], endian: Endian) -> u16 {
    match endian {
        Endian::Lsb => LittleEndian::read_u16(bytes),
        Endian::Msb => BigEndian::read_u16(bytes),
    }
}

#[inline]
pub(crate) fn read_u32(bytes: &[u8], endian: Endian) -> u32 {
    match endian {
        Endian::Lsb => LittleEndian::read_u32(bytes),
        Endian::Msb => BigEndian::read_u32(bytes),
    }
}

#[inline]
pub(crate) fn write_u16(bytes: &mut [u8], value: u16, endian: Endian) {
    match endian {
        Endian::Lsb => LittleEndian::write_u16(bytes, value),
        Endian::Msb => BigEndian::write_u16(bytes, value),
    }
}

#[inline]
pub(crate) fn write_u32(bytes: &mut [u8], value: u32, endian: Endian) {
    match endian {
        Endian::Lsb => LittleEndian::write_u32(bytes, value),
        Endian::Msb => BigEndian::write_u32(bytes, value),
    }
}

/// Reads one byte-addressable sample as a canonical value.
///
/// Integers are normalized to [0, 1]; floats are returned as stored.
/// Must not be called with [`SampleType::U10`].
#[inline]
pub(crate) fn read_sample(bytes: &[u8], sample: SampleType, endian: Endian) -> f64 {
    match sample {
        SampleType::U8 => normalize(bytes[0] as u32, 255),
        SampleType::U16 => normalize(read_u16(bytes, endian) as u32, 65535),
        SampleType::U32 => normalize(read_u32(bytes, endian), u32::MAX),
        SampleType::F16 => half_bits_to_f64(read_u16(bytes, endian)),
        SampleType::F32 => f32::from_bits(read_u32(bytes, endian)) as f64,
        SampleType::U10 => unreachable!("packed samples are not byte addressable"),
    }
}

/// Writes one canonical value as a byte-addressable sample.
///
/// Must not be called with [`SampleType::U10`].
#[inline]
pub(crate) fn write_sample(bytes: &mut [u8], value: f64, sample: SampleType, endian: Endian) {
    match sample {
        SampleType::U8 => bytes[0] = quantize(value, 255) as u8,
        SampleType::U16 => write_u16(bytes, quantize(value, 65535) as u16, endian),
        SampleType::U32 => write_u32(bytes, quantize(value, u32::MAX), endian),
        SampleType::F16 => write_u16(bytes, f64_to_half_bits(value), endian),
        SampleType::F32 => write_u32(bytes, (value as f32).to_bits(), endian),
        SampleType::U10 => unreachable!("packed samples are not byte addressable"),
    }
}

/// Reads a packed word as three canonical values.
#[inline]
pub(crate) fn read_u10(bytes: &[u8], endian: Endian) -> [f64; 3] {
    unpack_u10(read_u32(bytes, endian)).map(|v| normalize(v as u32, 1023))
}

/// Writes three canonical values as a packed word.
#[inline]
pub(crate) fn write_u10(bytes: &mut [u8], rgb: [f64; 3], endian: Endian) {
    let word = pack_u10(rgb.map(|v| quantize(v, 1023) as u16));
    write_u32(bytes, word, endian);
}
