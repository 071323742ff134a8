//! Proxy (subsampled) conversion.
//!
//! Playback of large frames often runs at a reduced "proxy" resolution. A
//! proxy conversion keeps every `scale`-th pixel of every `scale`-th logical
//! scanline and converts it in the same pass as the layout change.

use crate::convert::{ConvertOptions, Converter};
use crate::descriptor::BufferDescriptor;
use crate::error::Result;
use std::fmt;

/// Proxy subsampling level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Proxy {
    /// Full resolution.
    #[default]
    None,
    /// 1/2 resolution.
    Half,
    /// 1/4 resolution.
    Quarter,
    /// 1/8 resolution.
    Eighth,
}

impl Proxy {
    /// All proxy levels.
    pub const ALL: [Proxy; 4] = [Self::None, Self::Half, Self::Quarter, Self::Eighth];

    /// Subsampling step (1, 2, 4 or 8).
    #[inline]
    pub const fn scale(&self) -> u32 {
        match self {
            Self::None => 1,
            Self::Half => 2,
            Self::Quarter => 4,
            Self::Eighth => 8,
        }
    }

    /// Extent of a proxy image, rounding up.
    ///
    /// ```rust
    /// use djv_pixel::Proxy;
    ///
    /// assert_eq!(Proxy::Quarter.scale_size(1921, 1080), (481, 270));
    /// ```
    #[inline]
    pub const fn scale_size(&self, width: u32, height: u32) -> (u32, u32) {
        let s = self.scale();
        (width.div_ceil(s), height.div_ceil(s))
    }

    /// Descriptor of the proxy image; only the extent changes.
    #[must_use]
    pub fn scale_descriptor(&self, desc: &BufferDescriptor) -> BufferDescriptor {
        let (w, h) = self.scale_size(desc.width(), desc.height());
        desc.with_size(w, h)
    }
}

impl fmt::Display for Proxy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "none"),
            Self::Half => write!(f, "1/2"),
            Self::Quarter => write!(f, "1/4"),
            Self::Eighth => write!(f, "1/8"),
        }
    }
}

/// Subsamples and converts `src` into a freshly allocated proxy image.
///
/// The destination keeps every storage detail of `dst` except its extent,
/// which is derived from the source and the proxy level.
pub fn proxy_scale(
    src: &[u8],
    src_desc: &BufferDescriptor,
    dst: &BufferDescriptor,
    proxy: Proxy,
) -> Result<(Vec<u8>, BufferDescriptor)> {
    let (w, h) = proxy.scale_size(src_desc.width(), src_desc.height());
    let dst_desc = dst.with_size(w, h);
    let converter = Converter::with_options(ConvertOptions {
        proxy,
        ..ConvertOptions::default()
    });
    let data = converter.convert(src, src_desc, &dst_desc)?;
    Ok((data, dst_desc))
}
