//! Buffer conversion.
//!
//! The [`Converter`] takes a source buffer with its [`BufferDescriptor`] and
//! produces (or fills) a destination buffer described by another descriptor.
//! In one pass it handles:
//!
//! - sample type conversion (integer rescale, float quantization with clamping)
//! - channel remapping (L, LA, RGB, RGBA in any direction)
//! - mirroring, when source and destination mirror flags disagree
//! - byte order and BGR order
//! - scanline alignment padding
//! - proxy subsampling
//!
//! Every pixel goes through the same routine as [`Color::convert`](crate::Color::convert),
//! so single-pixel and full-buffer results always agree.
//!
//! # Example
//!
//! ```rust
//! use djv_pixel::{convert, BufferDescriptor, PixelLayout};
//!
//! let src = [0u8, 255];
//! let src_desc = BufferDescriptor::new(PixelLayout::L_U8, 2, 1);
//! let dst_desc = src_desc.with_layout(PixelLayout::RGBA_U8);
//!
//! let dst = convert(&src, &src_desc, &dst_desc).unwrap();
//! assert_eq!(dst, [0, 0, 0, 255, 255, 255, 255, 255]);
//! ```
//!
//! # Parallelism
//!
//! With the `parallel` feature, buffers of at least
//! [`ConvertOptions::parallel_min_rows`] scanlines are converted row by row on
//! the rayon pool. Rows are independent, so the output is byte-identical to
//! the serial loop.

use crate::codec::{PixelCodec, convert_pixel_with};
use crate::descriptor::BufferDescriptor;
use crate::error::{ConvertError, Result};
use crate::layout::PixelLayout;
use crate::proxy::Proxy;
use tracing::{debug, trace};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Default for [`ConvertOptions::parallel_min_rows`].
pub const DEFAULT_PARALLEL_MIN_ROWS: usize = 64;

/// Converter settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ConvertOptions {
    /// Minimum number of destination scanlines before rows are converted in
    /// parallel. Ignored without the `parallel` feature.
    pub parallel_min_rows: usize,
    /// Subsampling applied while converting.
    pub proxy: Proxy,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            parallel_min_rows: DEFAULT_PARALLEL_MIN_ROWS,
            proxy: Proxy::None,
        }
    }
}

impl ConvertOptions {
    /// Options that never take the parallel path.
    pub fn serial() -> Self {
        Self {
            parallel_min_rows: usize::MAX,
            ..Self::default()
        }
    }

    /// Returns a copy with another proxy level.
    #[must_use]
    pub fn with_proxy(self, proxy: Proxy) -> Self {
        Self { proxy, ..self }
    }
}

/// Pixel buffer converter.
///
/// Stateless apart from its options: any number of conversions may run
/// concurrently on independent buffers through a shared `Converter`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Converter {
    options: ConvertOptions,
}

impl Converter {
    /// Creates a converter with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a converter with the given options.
    pub fn with_options(options: ConvertOptions) -> Self {
        Self { options }
    }

    /// Current options.
    #[inline]
    pub fn options(&self) -> &ConvertOptions {
        &self.options
    }

    /// Converts `src` into a newly allocated buffer described by `dst_desc`.
    ///
    /// Alignment padding in the result is zeroed. Degenerate (zero-sized)
    /// images produce an empty buffer.
    ///
    /// # Errors
    ///
    /// - [`ConvertError::DimensionMismatch`] if `dst_desc` does not have the
    ///   (proxy-scaled) source extent
    /// - [`ConvertError::SourceTooSmall`] if `src` is shorter than
    ///   `src_desc.total_byte_count()`
    pub fn convert(
        &self,
        src: &[u8],
        src_desc: &BufferDescriptor,
        dst_desc: &BufferDescriptor,
    ) -> Result<Vec<u8>> {
        self.check_extent(src_desc, dst_desc)?;
        if !src_desc.is_valid() {
            return Ok(Vec::new());
        }
        let mut dst = vec![0u8; dst_desc.total_byte_count()?];
        self.convert_into(src, src_desc, &mut dst, dst_desc)?;
        Ok(dst)
    }

    /// Converts `src` into caller-provided storage.
    ///
    /// Only the first `dst_desc.total_byte_count()` bytes of `dst` are
    /// written; alignment padding within them is left unspecified. Nothing is
    /// written when an error is returned.
    ///
    /// # Errors
    ///
    /// As [`convert`](Self::convert), plus [`ConvertError::SizeMismatch`] if
    /// `dst` is smaller than `dst_desc.total_byte_count()`.
    pub fn convert_into(
        &self,
        src: &[u8],
        src_desc: &BufferDescriptor,
        dst: &mut [u8],
        dst_desc: &BufferDescriptor,
    ) -> Result<()> {
        trace!(
            width = src_desc.width(),
            height = src_desc.height(),
            src = %src_desc.layout(),
            dst = %dst_desc.layout(),
            proxy = %self.options.proxy,
            "convert"
        );
        self.check_extent(src_desc, dst_desc)?;
        if !src_desc.is_valid() {
            return Ok(());
        }

        let src_total = src_desc.total_byte_count()?;
        if src.len() < src_total {
            return Err(ConvertError::source_too_small(src_total, src.len()));
        }
        let dst_total = dst_desc.total_byte_count()?;
        if dst.len() < dst_total {
            return Err(ConvertError::size_mismatch(dst_total, dst.len()));
        }

        let plan = ScanlinePlan::new(src_desc, dst_desc, self.options.proxy)?;
        plan.log_path();
        let dst = &mut dst[..dst_total];

        if self.runs_parallel(plan.dst_height) {
            debug!(rows = plan.dst_height, "Converting scanlines in parallel");
            plan.convert_rows_parallel(src, dst);
        } else {
            plan.convert_rows(src, dst);
        }
        Ok(())
    }

    /// Converts a single scanline.
    ///
    /// `src_row` holds one stored source row and `dst_row` receives one
    /// destination row. Horizontal mirroring, proxy subsampling along the
    /// row, and every per-pixel conversion apply; vertical mirroring and
    /// alignment do not.
    ///
    /// # Errors
    ///
    /// [`ConvertError::DimensionMismatch`] if the destination width is not
    /// the proxy-scaled source width; [`ConvertError::SourceTooSmall`] /
    /// [`ConvertError::SizeMismatch`] if a row slice is too short.
    pub fn convert_scanline(
        &self,
        src_row: &[u8],
        src_desc: &BufferDescriptor,
        dst_row: &mut [u8],
        dst_desc: &BufferDescriptor,
    ) -> Result<()> {
        let (expected, _) = self.options.proxy.scale_size(src_desc.width(), 1);
        if dst_desc.width() != expected {
            return Err(ConvertError::dimension_mismatch(
                (expected, 1),
                (dst_desc.width(), 1),
            ));
        }
        if src_desc.width() == 0 {
            return Ok(());
        }
        let src_desc = src_desc.with_size(src_desc.width(), 1);
        let dst_desc = dst_desc.with_size(dst_desc.width(), 1);
        let plan = ScanlinePlan::new(&src_desc, &dst_desc, self.options.proxy)?;
        if src_row.len() < plan.src_row_bytes {
            return Err(ConvertError::source_too_small(
                plan.src_row_bytes,
                src_row.len(),
            ));
        }
        if dst_row.len() < plan.dst_row_bytes {
            return Err(ConvertError::size_mismatch(plan.dst_row_bytes, dst_row.len()));
        }
        plan.convert_pixels(src_row, dst_row);
        Ok(())
    }

    #[cfg(feature = "parallel")]
    fn runs_parallel(&self, rows: usize) -> bool {
        rows > 1 && rows >= self.options.parallel_min_rows
    }

    #[cfg(not(feature = "parallel"))]
    fn runs_parallel(&self, _rows: usize) -> bool {
        false
    }

    fn check_extent(&self, src: &BufferDescriptor, dst: &BufferDescriptor) -> Result<()> {
        let expected = self.options.proxy.scale_size(src.width(), src.height());
        if dst.size() != expected {
            return Err(ConvertError::dimension_mismatch(expected, dst.size()));
        }
        Ok(())
    }
}

/// Per-call conversion plan: codecs, strides and index mapping.
#[derive(Debug, Clone, Copy)]
struct ScanlinePlan {
    src: PixelCodec,
    dst: PixelCodec,
    src_stride: usize,
    src_row_bytes: usize,
    dst_stride: usize,
    dst_row_bytes: usize,
    src_width: usize,
    src_height: usize,
    dst_width: usize,
    dst_height: usize,
    src_mirror: (bool, bool),
    dst_mirror: (bool, bool),
    scale: usize,
    copy_rows: bool,
}

impl ScanlinePlan {
    fn new(src: &BufferDescriptor, dst: &BufferDescriptor, proxy: Proxy) -> Result<Self> {
        let src_codec = PixelCodec::from_descriptor(src);
        let dst_codec = PixelCodec::from_descriptor(dst);
        let scale = proxy.scale() as usize;
        let copy_rows =
            src_codec == dst_codec && scale == 1 && src.mirror_x() == dst.mirror_x();
        Ok(Self {
            src: src_codec,
            dst: dst_codec,
            src_stride: src.scanline_byte_count()?,
            src_row_bytes: src.width() as usize * src.pixel_byte_count(),
            dst_stride: dst.scanline_byte_count()?,
            dst_row_bytes: dst.width() as usize * dst.pixel_byte_count(),
            src_width: src.width() as usize,
            src_height: src.height() as usize,
            dst_width: dst.width() as usize,
            dst_height: dst.height() as usize,
            src_mirror: (src.mirror_x(), src.mirror_y()),
            dst_mirror: (dst.mirror_x(), dst.mirror_y()),
            scale,
            copy_rows,
        })
    }

    fn log_path(&self) {
        if self.copy_rows {
            debug!("Identical storage, copying rows");
        } else if self.src.layout == self.dst.layout {
            debug!(layout = %self.src.layout, "Same layout, shuffling bytes");
        }
    }

    /// Maps a stored destination index to the stored source index.
    #[inline]
    fn source_index(
        stored: usize,
        dst_len: usize,
        dst_mirror: bool,
        src_len: usize,
        src_mirror: bool,
        scale: usize,
    ) -> usize {
        let logical = if dst_mirror { dst_len - 1 - stored } else { stored };
        let src_logical = logical * scale;
        if src_mirror {
            src_len - 1 - src_logical
        } else {
            src_logical
        }
    }

    fn convert_rows(&self, src: &[u8], dst: &mut [u8]) {
        dst.chunks_mut(self.dst_stride)
            .enumerate()
            .for_each(|(y, row)| self.convert_row(src, y, row));
    }

    #[cfg(feature = "parallel")]
    fn convert_rows_parallel(&self, src: &[u8], dst: &mut [u8]) {
        dst.par_chunks_mut(self.dst_stride)
            .enumerate()
            .for_each(|(y, row)| self.convert_row(src, y, row));
    }

    #[cfg(not(feature = "parallel"))]
    fn convert_rows_parallel(&self, src: &[u8], dst: &mut [u8]) {
        self.convert_rows(src, dst);
    }

    /// Fills stored destination row `y` from the whole source buffer.
    fn convert_row(&self, src: &[u8], y: usize, dst_row: &mut [u8]) {
        let sy = Self::source_index(
            y,
            self.dst_height,
            self.dst_mirror.1,
            self.src_height,
            self.src_mirror.1,
            self.scale,
        );
        let start = sy * self.src_stride;
        self.convert_pixels(&src[start..start + self.src_row_bytes], dst_row);
    }

    /// Converts the pixels of one stored row.
    fn convert_pixels(&self, src_row: &[u8], dst_row: &mut [u8]) {
        if self.copy_rows {
            dst_row[..self.dst_row_bytes].copy_from_slice(&src_row[..self.src_row_bytes]);
            return;
        }
        let sbpp = self.src.bytes_per_pixel();
        let dbpp = self.dst.bytes_per_pixel();
        for (x, out) in dst_row[..self.dst_row_bytes]
            .chunks_exact_mut(dbpp)
            .enumerate()
        {
            let sx = Self::source_index(
                x,
                self.dst_width,
                self.dst_mirror.0,
                self.src_width,
                self.src_mirror.0,
                self.scale,
            );
            convert_pixel_with(&src_row[sx * sbpp..], &self.src, out, &self.dst);
        }
    }
}

/// Converts one pixel between two layouts in host byte order.
///
/// `src` must hold at least `src_layout.bytes_per_pixel()` bytes and `dst` at
/// least `dst_layout.bytes_per_pixel()`; extra bytes are ignored.
///
/// ```rust
/// use djv_pixel::{convert_pixel, PixelLayout};
///
/// let mut l = [0u8; 1];
/// convert_pixel(&[60, 90, 150], PixelLayout::RGB_U8, &mut l, PixelLayout::L_U8).unwrap();
/// assert_eq!(l, [100]);
/// ```
pub fn convert_pixel(
    src: &[u8],
    src_layout: PixelLayout,
    dst: &mut [u8],
    dst_layout: PixelLayout,
) -> Result<()> {
    let s = PixelCodec::native(src_layout);
    let d = PixelCodec::native(dst_layout);
    if src.len() < s.bytes_per_pixel() {
        return Err(ConvertError::source_too_small(s.bytes_per_pixel(), src.len()));
    }
    if dst.len() < d.bytes_per_pixel() {
        return Err(ConvertError::size_mismatch(d.bytes_per_pixel(), dst.len()));
    }
    convert_pixel_with(src, &s, dst, &d);
    Ok(())
}

/// Converts a buffer with default options. See [`Converter::convert`].
pub fn convert(
    src: &[u8],
    src_desc: &BufferDescriptor,
    dst_desc: &BufferDescriptor,
) -> Result<Vec<u8>> {
    Converter::new().convert(src, src_desc, dst_desc)
}

/// Converts a buffer into caller storage with default options. See
/// [`Converter::convert_into`].
pub fn convert_into(
    src: &[u8],
    src_desc: &BufferDescriptor,
    dst: &mut [u8],
    dst_desc: &BufferDescriptor,
) -> Result<()> {
    Converter::new().convert_into(src, src_desc, dst, dst_desc)
}
