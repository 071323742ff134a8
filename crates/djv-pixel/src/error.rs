//! Error types for layout construction and pixel conversion.
//!
//! Two families of failure exist:
//!
//! - [`LayoutError`] - a [`PixelLayout`](crate::PixelLayout) could not be built
//!   (an illegal channel/sample pairing, or an unknown label).
//! - [`ConvertError`] - a byte-accounting query or a buffer conversion was
//!   rejected (zero-sized descriptor, short buffers, mismatched extents).
//!
//! All of them are plain values returned to the immediate caller. Codec code
//! is expected to map them onto its own "unsupported pixel format in file X"
//! style reporting and skip the frame.
//!
//! # Usage
//!
//! ```rust
//! use djv_pixel::{BufferDescriptor, ConvertError, PixelLayout};
//!
//! let desc = BufferDescriptor::new(PixelLayout::RGB_U8, 0, 16);
//! let err = desc.total_byte_count().unwrap_err();
//! assert!(matches!(err, ConvertError::InvalidSize { width: 0, height: 16 }));
//! ```

use crate::layout::{Channels, PixelLayout, SampleType};
use thiserror::Error;

/// Result type alias defaulting to [`ConvertError`].
pub type Result<T, E = ConvertError> = std::result::Result<T, E>;

/// Errors raised while constructing or parsing a [`PixelLayout`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    /// The sample type cannot be paired with this channel composition.
    ///
    /// Packed 10-bit samples only exist as three-channel RGB.
    #[error("sample type {sample} is not compatible with {channels} channels")]
    IncompatibleSampling {
        /// Requested channel composition
        channels: Channels,
        /// Requested sample type
        sample: SampleType,
    },

    /// A label did not name any known layout.
    #[error("unknown pixel layout: {0:?}")]
    UnknownLayout(String),
}

impl LayoutError {
    /// Creates a [`LayoutError::IncompatibleSampling`] error.
    #[inline]
    pub fn incompatible(channels: Channels, sample: SampleType) -> Self {
        Self::IncompatibleSampling { channels, sample }
    }

    /// Creates a [`LayoutError::UnknownLayout`] error.
    #[inline]
    pub fn unknown(label: impl Into<String>) -> Self {
        Self::UnknownLayout(label.into())
    }
}

/// Errors raised by descriptor byte accounting and buffer conversion.
///
/// # Categories
///
/// - **Layout errors**: [`UnsupportedLayout`](ConvertError::UnsupportedLayout),
///   [`Layout`](ConvertError::Layout)
/// - **Capacity errors**: [`SizeMismatch`](ConvertError::SizeMismatch),
///   [`SourceTooSmall`](ConvertError::SourceTooSmall)
/// - **Dimension errors**: [`InvalidSize`](ConvertError::InvalidSize),
///   [`DimensionMismatch`](ConvertError::DimensionMismatch)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConvertError {
    /// The operation cannot act on this layout.
    #[error("unsupported pixel layout {layout}: {reason}")]
    UnsupportedLayout {
        /// Offending layout
        layout: PixelLayout,
        /// Why it was rejected
        reason: String,
    },

    /// Caller-provided destination storage is smaller than required.
    ///
    /// Nothing is written when this is returned.
    #[error("destination holds {available} bytes, {required} required")]
    SizeMismatch {
        /// Bytes required by the destination descriptor
        required: usize,
        /// Bytes actually available
        available: usize,
    },

    /// Source storage is shorter than its descriptor claims.
    #[error("source holds {available} bytes, descriptor requires {required}")]
    SourceTooSmall {
        /// Bytes required by the source descriptor
        required: usize,
        /// Bytes actually available
        available: usize,
    },

    /// A byte-accounting query was made on a zero-sized (or overflowing)
    /// descriptor.
    #[error("invalid buffer size {width}x{height}")]
    InvalidSize {
        /// Descriptor width
        width: u32,
        /// Descriptor height
        height: u32,
    },

    /// Source and destination extents disagree.
    #[error("dimension mismatch: {}x{} vs {}x{}", src.0, src.1, dst.0, dst.1)]
    DimensionMismatch {
        /// Expected (width, height) derived from the source
        src: (u32, u32),
        /// Destination (width, height)
        dst: (u32, u32),
    },

    /// Layout construction failed.
    #[error(transparent)]
    Layout(#[from] LayoutError),
}

impl ConvertError {
    /// Creates a [`ConvertError::UnsupportedLayout`] error.
    #[inline]
    pub fn unsupported_layout(layout: PixelLayout, reason: impl Into<String>) -> Self {
        Self::UnsupportedLayout {
            layout,
            reason: reason.into(),
        }
    }

    /// Creates a [`ConvertError::SizeMismatch`] error.
    #[inline]
    pub fn size_mismatch(required: usize, available: usize) -> Self {
        Self::SizeMismatch {
            required,
            available,
        }
    }

    /// Creates a [`ConvertError::SourceTooSmall`] error.
    #[inline]
    pub fn source_too_small(required: usize, available: usize) -> Self {
        Self::SourceTooSmall {
            required,
            available,
        }
    }

    /// Creates a [`ConvertError::InvalidSize`] error.
    #[inline]
    pub fn invalid_size(width: u32, height: u32) -> Self {
        Self::InvalidSize { width, height }
    }

    /// Creates a [`ConvertError::DimensionMismatch`] error.
    #[inline]
    pub fn dimension_mismatch(src: (u32, u32), dst: (u32, u32)) -> Self {
        Self::DimensionMismatch { src, dst }
    }

    /// Returns `true` for buffer capacity failures.
    #[inline]
    pub fn is_capacity_error(&self) -> bool {
        matches!(self, Self::SizeMismatch { .. } | Self::SourceTooSmall { .. })
    }

    /// Returns `true` for layout failures.
    #[inline]
    pub fn is_layout_error(&self) -> bool {
        matches!(self, Self::UnsupportedLayout { .. } | Self::Layout(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_incompatible_sampling_message() {
        let err = LayoutError::incompatible(Channels::La, SampleType::U10);
        let msg = err.to_string();
        assert!(msg.contains("U10"));
        assert!(msg.contains("LA"));
    }

    #[test]
    fn test_size_mismatch() {
        let err = ConvertError::size_mismatch(1024, 10);
        let msg = err.to_string();
        assert!(msg.contains("1024"));
        assert!(msg.contains("10"));
        assert!(err.is_capacity_error());
        assert!(!err.is_layout_error());
    }

    #[test]
    fn test_layout_error_conversion() {
        let err: ConvertError = LayoutError::unknown("XYZ").into();
        assert!(err.is_layout_error());
        assert!(err.to_string().contains("XYZ"));
    }

    #[test]
    fn test_dimension_mismatch() {
        let err = ConvertError::dimension_mismatch((100, 100), (200, 50));
        let msg = err.to_string();
        assert!(msg.contains("100x100"));
        assert!(msg.contains("200x50"));
    }
}
