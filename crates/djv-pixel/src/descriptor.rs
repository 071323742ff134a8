//! Buffer descriptors.
//!
//! A [`BufferDescriptor`] is the "header" for a raw pixel buffer: it pairs a
//! [`PixelLayout`] with the image extent and the storage details needed to
//! address bytes (scanline alignment, mirroring, byte order, BGR order).
//!
//! Descriptors are small `Copy` values. They are never mutated in place; the
//! `with_*` methods return a modified copy.
//!
//! # Memory Layout
//!
//! Scanlines are stored one after another. Each scanline is padded so its
//! byte length is a multiple of the alignment:
//!
//! ```text
//! |<------- width * bytes_per_pixel ------->|<- pad ->|
//! [ px0 ][ px1 ][ px2 ] ...          [ pxN ][ ...... ]  <- row 0
//! [ px0 ][ px1 ][ px2 ] ...          [ pxN ][ ...... ]  <- row 1
//! ```
//!
//! ```rust
//! use djv_pixel::{BufferDescriptor, PixelLayout};
//!
//! let desc = BufferDescriptor::new(PixelLayout::RGB_U8, 5, 2).with_alignment(4);
//! assert_eq!(desc.scanline_byte_count().unwrap(), 16); // 15 rounded up to 16
//! assert_eq!(desc.total_byte_count().unwrap(), 32);
//! ```
//!
//! # Mirroring
//!
//! `mirror_x` / `mirror_y` state that the stored buffer is flipped relative to
//! logical top-left-origin reading order. The converter compares the flags of
//! source and destination and reverses pixel or scanline order where they
//! differ.

use crate::error::{ConvertError, Result};
use crate::layout::PixelLayout;
use std::fmt;

/// Byte order of multi-byte samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Endian {
    /// Least significant byte first (little endian).
    Lsb,
    /// Most significant byte first (big endian).
    Msb,
}

impl Endian {
    /// Byte order of the host.
    #[inline]
    pub const fn native() -> Self {
        if cfg!(target_endian = "big") {
            Self::Msb
        } else {
            Self::Lsb
        }
    }

    /// Whether this is the host byte order.
    #[inline]
    pub fn is_native(&self) -> bool {
        *self == Self::native()
    }

    /// The other byte order.
    #[inline]
    pub const fn swapped(&self) -> Self {
        match self {
            Self::Lsb => Self::Msb,
            Self::Msb => Self::Lsb,
        }
    }
}

impl Default for Endian {
    fn default() -> Self {
        Self::native()
    }
}

impl fmt::Display for Endian {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lsb => write!(f, "lsb"),
            Self::Msb => write!(f, "msb"),
        }
    }
}

/// Layout, extent and storage details of a pixel buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "RawDescriptor", into = "RawDescriptor"))]
pub struct BufferDescriptor {
    layout: PixelLayout,
    width: u32,
    height: u32,
    alignment: u32,
    mirror_x: bool,
    mirror_y: bool,
    endian: Endian,
    bgr: bool,
}

impl BufferDescriptor {
    /// Creates a descriptor with byte alignment, no mirroring, host byte order
    /// and RGB channel order.
    ///
    /// Zero-sized descriptors may be constructed as placeholders but are
    /// rejected by byte-accounting queries.
    pub fn new(layout: PixelLayout, width: u32, height: u32) -> Self {
        Self {
            layout,
            width,
            height,
            alignment: 1,
            mirror_x: false,
            mirror_y: false,
            endian: Endian::native(),
            bgr: false,
        }
    }

    /// Pixel layout.
    #[inline]
    pub fn layout(&self) -> PixelLayout {
        self.layout
    }

    /// Width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// (width, height).
    #[inline]
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Scanline alignment in bytes (always at least 1).
    #[inline]
    pub fn alignment(&self) -> u32 {
        self.alignment
    }

    /// Whether pixels within a scanline are stored right to left.
    #[inline]
    pub fn mirror_x(&self) -> bool {
        self.mirror_x
    }

    /// Whether scanlines are stored bottom to top.
    #[inline]
    pub fn mirror_y(&self) -> bool {
        self.mirror_y
    }

    /// Byte order of multi-byte samples.
    #[inline]
    pub fn endian(&self) -> Endian {
        self.endian
    }

    /// Whether color channels are stored B, G, R (, A).
    #[inline]
    pub fn bgr(&self) -> bool {
        self.bgr
    }

    /// Returns `true` when both dimensions are non-zero.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.width > 0 && self.height > 0
    }

    /// Number of pixels.
    #[inline]
    pub fn pixel_count(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// Bytes per pixel of the layout.
    #[inline]
    pub fn pixel_byte_count(&self) -> usize {
        self.layout.bytes_per_pixel()
    }

    /// Bytes per scanline including alignment padding.
    ///
    /// # Errors
    ///
    /// [`ConvertError::InvalidSize`] when width or height is zero, or the
    /// byte count overflows.
    pub fn scanline_byte_count(&self) -> Result<usize> {
        if !self.is_valid() {
            return Err(ConvertError::invalid_size(self.width, self.height));
        }
        let align = self.alignment as usize;
        (self.width as usize)
            .checked_mul(self.layout.bytes_per_pixel())
            .and_then(|n| n.checked_next_multiple_of(align))
            .ok_or_else(|| ConvertError::invalid_size(self.width, self.height))
    }

    /// Bytes for the whole buffer: scanline byte count times height.
    pub fn total_byte_count(&self) -> Result<usize> {
        self.scanline_byte_count()?
            .checked_mul(self.height as usize)
            .ok_or_else(|| ConvertError::invalid_size(self.width, self.height))
    }

    /// Returns a copy with another extent.
    #[must_use]
    pub fn with_size(&self, width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..*self
        }
    }

    /// Returns a copy with another pixel layout.
    #[must_use]
    pub fn with_layout(&self, layout: PixelLayout) -> Self {
        Self { layout, ..*self }
    }

    /// Returns a copy with another scanline alignment. Zero is treated as 1.
    #[must_use]
    pub fn with_alignment(&self, alignment: u32) -> Self {
        Self {
            alignment: alignment.max(1),
            ..*self
        }
    }

    /// Returns a copy with other mirror flags.
    #[must_use]
    pub fn with_mirror(&self, mirror_x: bool, mirror_y: bool) -> Self {
        Self {
            mirror_x,
            mirror_y,
            ..*self
        }
    }

    /// Returns a copy with another byte order.
    #[must_use]
    pub fn with_endian(&self, endian: Endian) -> Self {
        Self { endian, ..*self }
    }

    /// Returns a copy with another channel order.
    #[must_use]
    pub fn with_bgr(&self, bgr: bool) -> Self {
        Self { bgr, ..*self }
    }
}

impl fmt::Display for BufferDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}x{} {} (align {}, {}",
            self.width, self.height, self.layout, self.alignment, self.endian
        )?;
        if self.mirror_x {
            write!(f, ", mirror x")?;
        }
        if self.mirror_y {
            write!(f, ", mirror y")?;
        }
        if self.bgr {
            write!(f, ", bgr")?;
        }
        write!(f, ")")
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct RawDescriptor {
    layout: PixelLayout,
    width: u32,
    height: u32,
    alignment: u32,
    mirror_x: bool,
    mirror_y: bool,
    endian: Endian,
    bgr: bool,
}

#[cfg(feature = "serde")]
impl From<RawDescriptor> for BufferDescriptor {
    fn from(raw: RawDescriptor) -> Self {
        Self::new(raw.layout, raw.width, raw.height)
            .with_alignment(raw.alignment)
            .with_mirror(raw.mirror_x, raw.mirror_y)
            .with_endian(raw.endian)
            .with_bgr(raw.bgr)
    }
}

#[cfg(feature = "serde")]
impl From<BufferDescriptor> for RawDescriptor {
    fn from(desc: BufferDescriptor) -> Self {
        Self {
            layout: desc.layout,
            width: desc.width,
            height: desc.height,
            alignment: desc.alignment,
            mirror_x: desc.mirror_x,
            mirror_y: desc.mirror_y,
            endian: desc.endian,
            bgr: desc.bgr,
        }
    }
}
