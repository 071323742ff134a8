//! Pixel layout descriptors.
//!
//! A [`PixelLayout`] pairs a channel composition ([`Channels`]) with a numeric
//! sample representation ([`SampleType`]). It is the compact algebraic
//! description every buffer and color in this crate carries.
//!
//! # Legal combinations
//!
//! Every channel composition combines with every sample type except
//! [`SampleType::U10`], which is a packed format (three 10-bit fields in one
//! 32-bit word) and only exists as RGB:
//!
//! ```rust
//! use djv_pixel::{Channels, LayoutError, PixelLayout, SampleType};
//!
//! let dpx = PixelLayout::new(Channels::Rgb, SampleType::U10).unwrap();
//! assert_eq!(dpx.bytes_per_pixel(), 4);
//!
//! let bad = PixelLayout::new(Channels::Rgba, SampleType::U10);
//! assert!(matches!(bad, Err(LayoutError::IncompatibleSampling { .. })));
//! ```
//!
//! # Renderer hints
//!
//! [`PixelLayout::gl_format`] maps a layout to the OpenGL format/type pair a
//! texture upload would use. The mapping is lossless: distinct layouts map to
//! distinct pairs.

use crate::error::LayoutError;
use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

/// Channel composition of a pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Channels {
    /// Luminance.
    L,
    /// Luminance, alpha.
    La,
    /// Red, green, blue.
    Rgb,
    /// Red, green, blue, alpha.
    #[default]
    Rgba,
}

impl Channels {
    /// All channel compositions, in ascending channel count.
    pub const ALL: [Channels; 4] = [Self::L, Self::La, Self::Rgb, Self::Rgba];

    /// Number of channels (1-4).
    #[inline]
    pub const fn count(&self) -> usize {
        match self {
            Self::L => 1,
            Self::La => 2,
            Self::Rgb => 3,
            Self::Rgba => 4,
        }
    }

    /// Returns the composition with the given channel count.
    #[inline]
    pub const fn from_count(count: usize) -> Option<Self> {
        match count {
            1 => Some(Self::L),
            2 => Some(Self::La),
            3 => Some(Self::Rgb),
            4 => Some(Self::Rgba),
            _ => None,
        }
    }

    /// Whether the last channel is alpha.
    #[inline]
    pub const fn has_alpha(&self) -> bool {
        matches!(self, Self::La | Self::Rgba)
    }

    /// Whether the pixel carries separate red, green and blue channels.
    #[inline]
    pub const fn is_color(&self) -> bool {
        matches!(self, Self::Rgb | Self::Rgba)
    }

    /// Short label ("L", "LA", "RGB", "RGBA").
    pub const fn name(&self) -> &'static str {
        match self {
            Self::L => "L",
            Self::La => "LA",
            Self::Rgb => "RGB",
            Self::Rgba => "RGBA",
        }
    }
}

impl fmt::Display for Channels {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Numeric representation of one sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SampleType {
    /// 8-bit unsigned integer [0, 255].
    #[default]
    U8,
    /// 10-bit unsigned integer [0, 1023], three channels packed per 32-bit word.
    U10,
    /// 16-bit unsigned integer [0, 65535].
    U16,
    /// 32-bit unsigned integer [0, 4294967295].
    U32,
    /// 16-bit IEEE half float.
    F16,
    /// 32-bit IEEE float.
    F32,
}

/// How samples of a [`SampleType`] are laid out in memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SampleLayout {
    /// Each channel occupies its own run of this many bytes.
    PerChannelBytes(usize),
    /// Three 10-bit channels share one 32-bit word.
    Packed10In32,
}

impl SampleType {
    /// All sample types.
    pub const ALL: [SampleType; 6] = [
        Self::U8,
        Self::U10,
        Self::U16,
        Self::U32,
        Self::F16,
        Self::F32,
    ];

    /// Number of significant bits per channel.
    #[inline]
    pub const fn bits(&self) -> u32 {
        match self {
            Self::U8 => 8,
            Self::U10 => 10,
            Self::U16 | Self::F16 => 16,
            Self::U32 | Self::F32 => 32,
        }
    }

    /// Bytes per channel. Zero for packed [`U10`](Self::U10), whose channels
    /// are not byte addressable.
    #[inline]
    pub const fn bytes_per_channel(&self) -> usize {
        match self.layout() {
            SampleLayout::PerChannelBytes(n) => n,
            SampleLayout::Packed10In32 => 0,
        }
    }

    /// Memory layout of the samples.
    #[inline]
    pub const fn layout(&self) -> SampleLayout {
        match self {
            Self::U8 => SampleLayout::PerChannelBytes(1),
            Self::U10 => SampleLayout::Packed10In32,
            Self::U16 | Self::F16 => SampleLayout::PerChannelBytes(2),
            Self::U32 | Self::F32 => SampleLayout::PerChannelBytes(4),
        }
    }

    /// Whether this is a floating-point type.
    #[inline]
    pub const fn is_float(&self) -> bool {
        matches!(self, Self::F16 | Self::F32)
    }

    /// Whether samples are wider than one byte (and therefore byte-order
    /// sensitive).
    #[inline]
    pub const fn is_multi_byte(&self) -> bool {
        !matches!(self, Self::U8)
    }

    /// Maximum integer value, `None` for float types.
    #[inline]
    pub const fn max_value(&self) -> Option<u32> {
        match self {
            Self::U8 => Some(255),
            Self::U10 => Some(1023),
            Self::U16 => Some(65535),
            Self::U32 => Some(u32::MAX),
            Self::F16 | Self::F32 => None,
        }
    }

    /// Representable integer span, `None` for float types.
    ///
    /// Float samples are normalized to [0.0, 1.0] instead; values outside
    /// that range are legal in memory and clamp when quantized to integers.
    #[inline]
    pub fn int_range(&self) -> Option<RangeInclusive<u32>> {
        self.max_value().map(|max| 0..=max)
    }

    /// Short label ("U8", "F16", ...).
    pub const fn name(&self) -> &'static str {
        match self {
            Self::U8 => "U8",
            Self::U10 => "U10",
            Self::U16 => "U16",
            Self::U32 => "U32",
            Self::F16 => "F16",
            Self::F32 => "F32",
        }
    }

    /// Returns the sample type with the given bit depth and numeric kind.
    pub const fn from_depth(bits: u32, float: bool) -> Option<Self> {
        match (bits, float) {
            (8, false) => Some(Self::U8),
            (10, false) => Some(Self::U10),
            (16, false) => Some(Self::U16),
            (32, false) => Some(Self::U32),
            (16, true) => Some(Self::F16),
            (32, true) => Some(Self::F32),
            _ => None,
        }
    }
}

impl fmt::Display for SampleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// OpenGL enumerants used by [`PixelLayout::gl_format`].
pub mod gl {
    /// `GL_LUMINANCE`
    pub const LUMINANCE: u32 = 0x1909;
    /// `GL_LUMINANCE_ALPHA`
    pub const LUMINANCE_ALPHA: u32 = 0x190A;
    /// `GL_RGB`
    pub const RGB: u32 = 0x1907;
    /// `GL_RGBA`
    pub const RGBA: u32 = 0x1908;
    /// `GL_UNSIGNED_BYTE`
    pub const UNSIGNED_BYTE: u32 = 0x1401;
    /// `GL_UNSIGNED_SHORT`
    pub const UNSIGNED_SHORT: u32 = 0x1403;
    /// `GL_UNSIGNED_INT`
    pub const UNSIGNED_INT: u32 = 0x1405;
    /// `GL_FLOAT`
    pub const FLOAT: u32 = 0x1406;
    /// `GL_HALF_FLOAT`
    pub const HALF_FLOAT: u32 = 0x140B;
    /// `GL_UNSIGNED_INT_10_10_10_2`
    pub const UNSIGNED_INT_10_10_10_2: u32 = 0x8036;
}

/// OpenGL format/type pair for uploading a layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GlFormat {
    /// Pixel format (`GL_RGB`, ...).
    pub format: u32,
    /// Component type (`GL_UNSIGNED_BYTE`, ...).
    pub kind: u32,
}

/// Channel composition plus sample type.
///
/// Immutable once constructed; equality is structural. Use
/// [`PixelLayout::new`] or one of the associated constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawLayout", into = "RawLayout"))]
pub struct PixelLayout {
    channels: Channels,
    sample: SampleType,
}

macro_rules! layout_consts {
    ($($name:ident = $channels:ident, $sample:ident;)*) => {
        impl PixelLayout {
            $(
                #[doc = concat!("`", stringify!($channels), "` channels, `", stringify!($sample), "` samples.")]
                pub const $name: PixelLayout = PixelLayout {
                    channels: Channels::$channels,
                    sample: SampleType::$sample,
                };
            )*

            /// Every legal layout.
            pub const ALL: [PixelLayout; 21] = [$(Self::$name),*];
        }
    };
}

layout_consts! {
    L_U8 = L, U8;
    L_U16 = L, U16;
    L_U32 = L, U32;
    L_F16 = L, F16;
    L_F32 = L, F32;
    LA_U8 = La, U8;
    LA_U16 = La, U16;
    LA_U32 = La, U32;
    LA_F16 = La, F16;
    LA_F32 = La, F32;
    RGB_U8 = Rgb, U8;
    RGB_U10 = Rgb, U10;
    RGB_U16 = Rgb, U16;
    RGB_U32 = Rgb, U32;
    RGB_F16 = Rgb, F16;
    RGB_F32 = Rgb, F32;
    RGBA_U8 = Rgba, U8;
    RGBA_U16 = Rgba, U16;
    RGBA_U32 = Rgba, U32;
    RGBA_F16 = Rgba, F16;
    RGBA_F32 = Rgba, F32;
}

impl PixelLayout {
    /// Largest pixel in bytes (RGBA with 4-byte samples).
    pub const MAX_BYTES_PER_PIXEL: usize = 16;

    /// Creates a layout, rejecting packed 10-bit samples on anything but RGB.
    pub const fn new(channels: Channels, sample: SampleType) -> Result<Self, LayoutError> {
        if matches!(sample, SampleType::U10) && !matches!(channels, Channels::Rgb) {
            return Err(LayoutError::IncompatibleSampling { channels, sample });
        }
        Ok(Self { channels, sample })
    }

    /// Nearest legal layout: U10 on a non-RGB composition becomes U16.
    pub const fn closest(channels: Channels, sample: SampleType) -> Self {
        let sample = match (channels, sample) {
            (ch, SampleType::U10) if !matches!(ch, Channels::Rgb) => SampleType::U16,
            _ => sample,
        };
        Self { channels, sample }
    }

    /// Looks a layout up from a file header's channel count, bit depth and
    /// numeric kind.
    ///
    /// ```rust
    /// use djv_pixel::PixelLayout;
    ///
    /// assert_eq!(PixelLayout::from_channels_and_depth(4, 16, true), Some(PixelLayout::RGBA_F16));
    /// assert_eq!(PixelLayout::from_channels_and_depth(3, 10, false), Some(PixelLayout::RGB_U10));
    /// assert_eq!(PixelLayout::from_channels_and_depth(1, 10, false), None);
    /// ```
    pub fn from_channels_and_depth(channels: usize, bits: u32, float: bool) -> Option<Self> {
        let channels = Channels::from_count(channels)?;
        let sample = SampleType::from_depth(bits, float)?;
        Self::new(channels, sample).ok()
    }

    /// Iterates over every legal layout.
    pub fn all() -> impl Iterator<Item = PixelLayout> {
        Self::ALL.into_iter()
    }

    /// Channel composition.
    #[inline]
    pub const fn channels(&self) -> Channels {
        self.channels
    }

    /// Sample type.
    #[inline]
    pub const fn sample(&self) -> SampleType {
        self.sample
    }

    /// Number of channels (1-4).
    #[inline]
    pub const fn channel_count(&self) -> usize {
        self.channels.count()
    }

    /// Bytes per channel, zero for packed U10.
    #[inline]
    pub const fn bytes_per_channel(&self) -> usize {
        self.sample.bytes_per_channel()
    }

    /// Bytes per pixel. Packed U10 RGB occupies one 32-bit word.
    #[inline]
    pub const fn bytes_per_pixel(&self) -> usize {
        match self.sample.layout() {
            SampleLayout::PerChannelBytes(n) => n * self.channels.count(),
            SampleLayout::Packed10In32 => 4,
        }
    }

    /// Whether samples are floating point.
    #[inline]
    pub const fn is_float(&self) -> bool {
        self.sample.is_float()
    }

    /// Whether the layout carries alpha.
    #[inline]
    pub const fn has_alpha(&self) -> bool {
        self.channels.has_alpha()
    }

    /// Same sample type with another channel composition.
    pub const fn with_channels(&self, channels: Channels) -> Result<Self, LayoutError> {
        Self::new(channels, self.sample)
    }

    /// Same channels with another sample type.
    pub const fn with_sample(&self, sample: SampleType) -> Result<Self, LayoutError> {
        Self::new(self.channels, sample)
    }

    /// OpenGL format/type pair for this layout.
    pub const fn gl_format(&self) -> GlFormat {
        let format = match self.channels {
            Channels::L => gl::LUMINANCE,
            Channels::La => gl::LUMINANCE_ALPHA,
            Channels::Rgb => gl::RGB,
            Channels::Rgba => gl::RGBA,
        };
        let kind = match self.sample {
            SampleType::U8 => gl::UNSIGNED_BYTE,
            SampleType::U10 => gl::UNSIGNED_INT_10_10_10_2,
            SampleType::U16 => gl::UNSIGNED_SHORT,
            SampleType::U32 => gl::UNSIGNED_INT,
            SampleType::F16 => gl::HALF_FLOAT,
            SampleType::F32 => gl::FLOAT,
        };
        GlFormat { format, kind }
    }
}

impl Default for PixelLayout {
    fn default() -> Self {
        Self::RGBA_U8
    }
}

impl fmt::Display for PixelLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.channels, self.sample)
    }
}

impl FromStr for PixelLayout {
    type Err = LayoutError;

    /// Parses "RGB U10", "rgb_u10" or "RGBA-F16" style labels.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s
            .split(|c: char| c.is_whitespace() || c == '_' || c == '-')
            .filter(|p| !p.is_empty());
        let (Some(channels), Some(sample), None) = (parts.next(), parts.next(), parts.next())
        else {
            return Err(LayoutError::unknown(s));
        };
        let channels = Channels::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(channels))
            .ok_or_else(|| LayoutError::unknown(s))?;
        let sample = SampleType::ALL
            .into_iter()
            .find(|t| t.name().eq_ignore_ascii_case(sample))
            .ok_or_else(|| LayoutError::unknown(s))?;
        Self::new(channels, sample)
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct RawLayout {
    channels: Channels,
    sample: SampleType,
}

#[cfg(feature = "serde")]
impl TryFrom<RawLayout> for PixelLayout {
    type Error = LayoutError;

    fn try_from(raw: RawLayout) -> Result<Self, Self::Error> {
        Self::new(raw.channels, raw.sample)
    }
}

#[cfg(feature = "serde")]
impl From<PixelLayout> for RawLayout {
    fn from(layout: PixelLayout) -> Self {
        Self {
            channels: layout.channels,
            sample: layout.sample,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_u10_only_rgb() {
        for channels in Channels::ALL {
            let result = PixelLayout::new(channels, SampleType::U10);
            if channels == Channels::Rgb {
                assert_eq!(result, Ok(PixelLayout::RGB_U10));
            } else {
                assert_eq!(
                    result,
                    Err(LayoutError::incompatible(channels, SampleType::U10))
                );
            }
        }
    }

    #[test]
    fn test_bytes_per_channel() {
        assert_eq!(SampleType::U8.bytes_per_channel(), 1);
        assert_eq!(SampleType::U10.bytes_per_channel(), 0);
        assert_eq!(SampleType::U16.bytes_per_channel(), 2);
        assert_eq!(SampleType::F16.bytes_per_channel(), 2);
        assert_eq!(SampleType::U32.bytes_per_channel(), 4);
        assert_eq!(SampleType::F32.bytes_per_channel(), 4);
    }

    #[test]
    fn test_bytes_per_pixel() {
        assert_eq!(PixelLayout::L_U8.bytes_per_pixel(), 1);
        assert_eq!(PixelLayout::LA_U16.bytes_per_pixel(), 4);
        assert_eq!(PixelLayout::RGB_U8.bytes_per_pixel(), 3);
        assert_eq!(PixelLayout::RGB_U10.bytes_per_pixel(), 4);
        assert_eq!(PixelLayout::RGB_F32.bytes_per_pixel(), 12);
        assert_eq!(PixelLayout::RGBA_F16.bytes_per_pixel(), 8);
        assert_eq!(PixelLayout::RGBA_U32.bytes_per_pixel(), 16);
        let max = PixelLayout::all().map(|l| l.bytes_per_pixel()).max();
        assert_eq!(max, Some(PixelLayout::MAX_BYTES_PER_PIXEL));
    }

    #[test]
    fn test_int_range() {
        assert_eq!(SampleType::U8.int_range(), Some(0..=255));
        assert_eq!(SampleType::U10.int_range(), Some(0..=1023));
        assert_eq!(SampleType::U16.int_range(), Some(0..=65535));
        assert_eq!(SampleType::U32.int_range(), Some(0..=u32::MAX));
        assert_eq!(SampleType::F16.int_range(), None);
        assert!(SampleType::F32.is_float());
        assert!(!SampleType::U10.is_float());
    }

    #[test]
    fn test_all_layouts_legal_and_unique() {
        let set: HashSet<_> = PixelLayout::all().collect();
        assert_eq!(set.len(), 21);
        for layout in PixelLayout::all() {
            assert_eq!(PixelLayout::new(layout.channels(), layout.sample()), Ok(layout));
        }
    }

    #[test]
    fn test_closest() {
        assert_eq!(
            PixelLayout::closest(Channels::Rgba, SampleType::U10),
            PixelLayout::RGBA_U16
        );
        assert_eq!(
            PixelLayout::closest(Channels::Rgb, SampleType::U10),
            PixelLayout::RGB_U10
        );
        assert_eq!(
            PixelLayout::closest(Channels::L, SampleType::F16),
            PixelLayout::L_F16
        );
    }

    #[test]
    fn test_from_channels_and_depth() {
        assert_eq!(
            PixelLayout::from_channels_and_depth(1, 8, false),
            Some(PixelLayout::L_U8)
        );
        assert_eq!(
            PixelLayout::from_channels_and_depth(2, 32, true),
            Some(PixelLayout::LA_F32)
        );
        assert_eq!(PixelLayout::from_channels_and_depth(5, 8, false), None);
        assert_eq!(PixelLayout::from_channels_and_depth(3, 12, false), None);
        assert_eq!(PixelLayout::from_channels_and_depth(4, 8, true), None);
    }

    #[test]
    fn test_display_and_parse() {
        for layout in PixelLayout::all() {
            let label = layout.to_string();
            assert_eq!(label.parse::<PixelLayout>(), Ok(layout));
        }
        assert_eq!("rgba_f16".parse(), Ok(PixelLayout::RGBA_F16));
        assert_eq!("LA-U32".parse(), Ok(PixelLayout::LA_U32));
        assert!(matches!(
            "L U10".parse::<PixelLayout>(),
            Err(LayoutError::IncompatibleSampling { .. })
        ));
        assert!(matches!(
            "XYZ F32".parse::<PixelLayout>(),
            Err(LayoutError::UnknownLayout(_))
        ));
        assert!("RGB".parse::<PixelLayout>().is_err());
    }

    #[test]
    fn test_gl_format_lossless() {
        let pairs: HashSet<_> = PixelLayout::all().map(|l| l.gl_format()).collect();
        assert_eq!(pairs.len(), 21);
        assert_eq!(
            PixelLayout::RGBA_F16.gl_format(),
            GlFormat {
                format: gl::RGBA,
                kind: gl::HALF_FLOAT
            }
        );
        assert_eq!(
            PixelLayout::RGB_U10.gl_format().kind,
            gl::UNSIGNED_INT_10_10_10_2
        );
    }

    #[test]
    fn test_with_channels_and_sample() {
        let rgb = PixelLayout::RGB_U10;
        assert_eq!(
            rgb.with_channels(Channels::Rgba),
            Err(LayoutError::incompatible(Channels::Rgba, SampleType::U10))
        );
        assert_eq!(rgb.with_sample(SampleType::F16), Ok(PixelLayout::RGB_F16));
        assert_eq!(
            PixelLayout::L_U16.with_sample(SampleType::U10),
            Err(LayoutError::incompatible(Channels::L, SampleType::U10))
        );
        assert_eq!(
            PixelLayout::LA_U8.with_channels(Channels::Rgb),
            Ok(PixelLayout::RGB_U8)
        );
        assert_eq!(
            PixelLayout::RGB_U16.with_sample(SampleType::U10),
            Ok(PixelLayout::RGB_U10)
        );
    }

    #[test]
    fn test_multi_byte() {
        let multi: Vec<_> = SampleType::ALL
            .into_iter()
            .filter(|t| t.is_multi_byte())
            .collect();
        assert!(!SampleType::U8.is_multi_byte());
        assert_eq!(multi.len(), SampleType::ALL.len() - 1);
    }
}
