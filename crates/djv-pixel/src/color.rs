//! Single color values.
//!
//! A [`Color`] is one pixel of a given [`PixelLayout`], stored as raw bytes in
//! host byte order. It is used for UI swatches, fill values and color picking.
//! Converting a color runs exactly the per-pixel routine the buffer
//! [`Converter`](crate::Converter) uses, so a color converted on its own and
//! the same pixel converted inside a buffer always agree.
//!
//! # Example
//!
//! ```rust
//! use djv_pixel::{Color, PixelLayout};
//!
//! let red = Color::rgba_u8(255, 0, 0, 255);
//! let f = red.convert(PixelLayout::RGBA_F32);
//! assert_eq!(f.to_normalized(), [1.0, 0.0, 0.0, 1.0]);
//!
//! let gray = red.convert(PixelLayout::L_U8);
//! assert_eq!(gray.bytes(), &[85]);
//! ```

use crate::canonical::Canonical;
use crate::codec::{PixelCodec, convert_pixel_with};
use crate::error::{ConvertError, Result};
use crate::half_float::half_bits_to_f32;
use crate::layout::{PixelLayout, SampleType};
use crate::sample::unpack_u10;
use std::fmt;

/// One pixel value with its layout.
///
/// Bytes past the layout's pixel size are always zero, so equality compares
/// layouts and pixel bytes exactly.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    layout: PixelLayout,
    data: [u8; PixelLayout::MAX_BYTES_PER_PIXEL],
}

impl Color {
    /// Zero-filled color (black, transparent where there is alpha).
    pub fn new(layout: PixelLayout) -> Self {
        Self {
            layout,
            data: [0; PixelLayout::MAX_BYTES_PER_PIXEL],
        }
    }

    /// RGBA U8 color.
    pub fn rgba_u8(r: u8, g: u8, b: u8, a: u8) -> Self {
        let mut c = Self::new(PixelLayout::RGBA_U8);
        c.data[..4].copy_from_slice(&[r, g, b, a]);
        c
    }

    /// RGBA F32 color.
    pub fn rgba_f32(r: f32, g: f32, b: f32, a: f32) -> Self {
        let mut c = Self::new(PixelLayout::RGBA_F32);
        for (i, v) in [r, g, b, a].into_iter().enumerate() {
            c.data[i * 4..(i + 1) * 4].copy_from_slice(&v.to_ne_bytes());
        }
        c
    }

    /// L U8 color.
    pub fn gray_u8(v: u8) -> Self {
        let mut c = Self::new(PixelLayout::L_U8);
        c.data[0] = v;
        c
    }

    /// L F32 color.
    pub fn gray_f32(v: f32) -> Self {
        let mut c = Self::new(PixelLayout::L_F32);
        c.data[..4].copy_from_slice(&v.to_ne_bytes());
        c
    }

    /// Color from raw pixel bytes in host byte order. Extra bytes are ignored.
    ///
    /// # Errors
    ///
    /// [`ConvertError::SourceTooSmall`] if `bytes` is shorter than one pixel.
    pub fn from_bytes(layout: PixelLayout, bytes: &[u8]) -> Result<Self> {
        let n = layout.bytes_per_pixel();
        if bytes.len() < n {
            return Err(ConvertError::source_too_small(n, bytes.len()));
        }
        let mut c = Self::new(layout);
        c.data[..n].copy_from_slice(&bytes[..n]);
        Ok(c)
    }

    /// Color from normalized channel values.
    ///
    /// Only the first `layout.channel_count()` values are used. Integer
    /// layouts clamp to [0, 1] and round; float layouts store the values as
    /// given.
    pub fn from_normalized(layout: PixelLayout, values: [f64; 4]) -> Self {
        let mut c = Self::new(layout);
        PixelCodec::native(layout).encode(&Canonical::new(layout.channels(), values), &mut c.data);
        c
    }

    /// Normalized channel values; unused trailing slots are zero.
    pub fn to_normalized(&self) -> [f64; 4] {
        self.decode().to_array()
    }

    /// Pixel layout.
    #[inline]
    pub fn layout(&self) -> PixelLayout {
        self.layout
    }

    /// Raw pixel bytes, `layout().bytes_per_pixel()` long.
    #[inline]
    pub fn bytes(&self) -> &[u8] {
        &self.data[..self.layout.bytes_per_pixel()]
    }

    /// Normalized value of one channel, or `None` past the channel count.
    pub fn channel(&self, index: usize) -> Option<f64> {
        self.decode().values().get(index).copied()
    }

    /// Sets one channel from a normalized value.
    ///
    /// Returns `false`, leaving the color unchanged, when `index` is past the
    /// channel count.
    pub fn set_channel(&mut self, index: usize, value: f64) -> bool {
        if index >= self.layout.channel_count() {
            return false;
        }
        let mut values = self.to_normalized();
        values[index] = value;
        *self = Self::from_normalized(self.layout, values);
        true
    }

    /// Clears every channel to zero.
    pub fn zero(&mut self) {
        self.data = [0; PixelLayout::MAX_BYTES_PER_PIXEL];
    }

    /// Converts to another layout.
    pub fn convert(&self, layout: PixelLayout) -> Color {
        let mut out = Self::new(layout);
        convert_pixel_with(
            &self.data,
            &PixelCodec::native(self.layout),
            &mut out.data,
            &PixelCodec::native(layout),
        );
        out
    }

    fn decode(&self) -> Canonical {
        PixelCodec::native(self.layout).decode(&self.data)
    }

    /// Stored channel values, unnormalized.
    fn raw_channels(&self) -> Vec<RawValue> {
        let n = self.layout.channel_count();
        let d = &self.data;
        match self.layout.sample() {
            SampleType::U8 => d[..n].iter().map(|&v| RawValue::Int(v as u32)).collect(),
            SampleType::U10 => unpack_u10(u32::from_ne_bytes([d[0], d[1], d[2], d[3]]))
                .iter()
                .map(|&v| RawValue::Int(v as u32))
                .collect(),
            SampleType::U16 => d
                .chunks_exact(2)
                .take(n)
                .map(|b| RawValue::Int(u16::from_ne_bytes([b[0], b[1]]) as u32))
                .collect(),
            SampleType::U32 => d
                .chunks_exact(4)
                .take(n)
                .map(|b| RawValue::Int(u32::from_ne_bytes([b[0], b[1], b[2], b[3]])))
                .collect(),
            SampleType::F16 => d
                .chunks_exact(2)
                .take(n)
                .map(|b| RawValue::Float(half_bits_to_f32(u16::from_ne_bytes([b[0], b[1]]))))
                .collect(),
            SampleType::F32 => d
                .chunks_exact(4)
                .take(n)
                .map(|b| RawValue::Float(f32::from_ne_bytes([b[0], b[1], b[2], b[3]])))
                .collect(),
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::new(PixelLayout::default())
    }
}

#[derive(Clone, Copy)]
enum RawValue {
    Int(u32),
    Float(f32),
}

impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (", self.layout)?;
        for (i, v) in self.raw_channels().iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{v}")?;
        }
        write!(f, ")")
    }
}

impl fmt::Debug for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Color")
            .field("layout", &self.layout)
            .field("bytes", &self.bytes())
            .finish()
    }
}

/// RGB to HSV, all components in [0, 1]. Hue is 0 for grays.
pub fn rgb_to_hsv(rgb: [f32; 3]) -> [f32; 3] {
    let [r, g, b] = rgb;
    let min = r.min(g).min(b);
    let max = r.max(g).max(b);
    let s = if max != 0.0 { 1.0 - min / max } else { 0.0 };
    let d = (max - min) * 6.0;
    let h = if max == min {
        0.0
    } else if r == max {
        if g >= b {
            (g - b) / d
        } else {
            1.0 + (g - b) / d
        }
    } else if g == max {
        1.0 / 3.0 + (b - r) / d
    } else {
        2.0 / 3.0 + (r - g) / d
    };
    [h, s, max]
}

/// HSV to RGB, all components in [0, 1]. Hue wraps.
pub fn hsv_to_rgb(hsv: [f32; 3]) -> [f32; 3] {
    let [h, s, v] = hsv;
    let h = (h * 6.0).rem_euclid(6.0);
    let i = h.floor();
    let f = h - i;
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));
    match i as u32 % 6 {
        0 => [v, t, p],
        1 => [q, v, p],
        2 => [p, v, t],
        3 => [p, q, v],
        4 => [t, p, v],
        _ => [v, p, q],
    }
}
