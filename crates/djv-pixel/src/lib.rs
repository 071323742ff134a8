//! # djv-pixel
//!
//! Pixel formats and pixel format conversion for image and sequence viewers.
//!
//! Every codec hands decoded frames to the viewer as raw bytes plus a
//! description of how to read them, and every save path asks for bytes in
//! the layout its file format demands. This crate is that shared vocabulary:
//!
//! - [`PixelLayout`] - channel composition (L, LA, RGB, RGBA) and sample type
//!   (U8, packed U10, U16, U32, F16, F32)
//! - [`BufferDescriptor`] - layout plus extent, scanline alignment, mirroring,
//!   byte order and channel order; computes strides and byte counts
//! - [`Color`] - a single pixel value with its layout
//! - [`Converter`] - converts pixels, scanlines and whole buffers between any
//!   two descriptors in one pass
//!
//! ## Conversion model
//!
//! Conversions decode each source pixel into a canonical form (up to four
//! `f64` channels), remap the channel composition, then encode into the
//! destination sample type. Integer samples are normalized to [0, 1] and
//! quantized back with clamping and round-to-nearest; float samples pass
//! through unclamped. See [`canonical`] for the channel mapping table.
//!
//! ```rust
//! use djv_pixel::prelude::*;
//!
//! let src = [60u8, 90, 150];
//! let src_desc = BufferDescriptor::new(PixelLayout::RGB_U8, 1, 1);
//! let dst_desc = src_desc.with_layout(PixelLayout::L_U8);
//! assert_eq!(convert(&src, &src_desc, &dst_desc)?, [100]);
//! # Ok::<(), ConvertError>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `parallel` - Convert large buffers on the rayon pool (enabled by default)
//! - `serde` - Enable serialization for layouts, descriptors and options

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod canonical;
mod codec;
pub mod color;
pub mod convert;
pub mod descriptor;
pub mod error;
pub mod half_float;
pub mod layout;
pub mod proxy;
pub mod sample;
pub mod util;

// Re-exports for convenience
pub use canonical::Canonical;
pub use color::{Color, hsv_to_rgb, rgb_to_hsv};
pub use convert::{
    ConvertOptions, Converter, DEFAULT_PARALLEL_MIN_ROWS, convert, convert_into, convert_pixel,
};
pub use descriptor::{BufferDescriptor, Endian};
pub use error::{ConvertError, LayoutError, Result};
pub use half_float::{HALF_MAX, f32_to_half_bits, half_bits_to_f32};
pub use layout::{Channels, GlFormat, PixelLayout, SampleLayout, SampleType};
pub use proxy::{Proxy, proxy_scale};
pub use util::{gradient, planar_deinterleave, planar_interleave};

/// Prelude module for convenient imports.
///
/// # Usage
///
/// ```
/// use djv_pixel::prelude::*;
/// ```
pub mod prelude {
    pub use crate::color::Color;
    pub use crate::convert::{ConvertOptions, Converter, convert, convert_into, convert_pixel};
    pub use crate::descriptor::{BufferDescriptor, Endian};
    pub use crate::error::{ConvertError, LayoutError, Result};
    pub use crate::layout::{Channels, PixelLayout, SampleType};
    pub use crate::proxy::Proxy;
}
