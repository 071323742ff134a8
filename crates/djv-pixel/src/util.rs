//! Pixel data utilities: planar storage and test images.

use crate::descriptor::BufferDescriptor;
use crate::error::{ConvertError, Result};
use crate::layout::{PixelLayout, SampleLayout};
use crate::proxy::Proxy;
use tracing::trace;

/// Byte size of a planar image: one `width * height` plane per channel.
fn planar_byte_count(desc: &BufferDescriptor, channel_bytes: usize) -> Result<usize> {
    (desc.width() as usize)
        .checked_mul(desc.height() as usize)
        .and_then(|n| n.checked_mul(desc.layout().channel_count()))
        .and_then(|n| n.checked_mul(channel_bytes))
        .ok_or_else(|| ConvertError::invalid_size(desc.width(), desc.height()))
}

fn channel_bytes(layout: PixelLayout) -> Result<usize> {
    match layout.sample().layout() {
        SampleLayout::PerChannelBytes(n) => Ok(n),
        SampleLayout::Packed10In32 => Err(ConvertError::unsupported_layout(
            layout,
            "packed samples have no planar form",
        )),
    }
}

/// Interleaves channel-planar data.
///
/// `planes` holds each channel as a contiguous, unpadded `width * height`
/// plane, in channel order, for an image of `desc`'s extent and layout. The
/// result is laid out per `desc` (alignment included) at the proxy-scaled
/// extent. Samples are copied bytewise, so byte order is preserved; mirror
/// and BGR flags are not applied.
///
/// # Errors
///
/// [`ConvertError::UnsupportedLayout`] for packed U10,
/// [`ConvertError::InvalidSize`] for a zero-sized descriptor and
/// [`ConvertError::SourceTooSmall`] when `planes` is short.
pub fn planar_interleave(
    planes: &[u8],
    desc: &BufferDescriptor,
    proxy: Proxy,
) -> Result<(Vec<u8>, BufferDescriptor)> {
    trace!(width = desc.width(), height = desc.height(), layout = %desc.layout(), "planar_interleave");
    let cb = channel_bytes(desc.layout())?;
    let required = planar_byte_count(desc, cb)?;
    if planes.len() < required {
        return Err(ConvertError::source_too_small(required, planes.len()));
    }

    let out_desc = proxy.scale_descriptor(desc);
    let stride = out_desc.scanline_byte_count()?;
    let mut out = vec![0u8; out_desc.total_byte_count()?];

    let (in_w, in_h) = (desc.width() as usize, desc.height() as usize);
    let channels = desc.layout().channel_count();
    let bpp = desc.layout().bytes_per_pixel();
    let scale = proxy.scale() as usize;

    for (y, row) in out.chunks_mut(stride).enumerate() {
        let sy = y * scale;
        for c in 0..channels {
            let plane_row = &planes[(c * in_h + sy) * in_w * cb..][..in_w * cb];
            for (x, px) in row[..out_desc.width() as usize * bpp]
                .chunks_exact_mut(bpp)
                .enumerate()
            {
                let sx = x * scale * cb;
                px[c * cb..(c + 1) * cb].copy_from_slice(&plane_row[sx..sx + cb]);
            }
        }
    }
    Ok((out, out_desc))
}

/// Splits interleaved data into contiguous channel planes.
///
/// Inverse of [`planar_interleave`] without proxy scaling.
///
/// # Errors
///
/// As [`planar_interleave`].
pub fn planar_deinterleave(data: &[u8], desc: &BufferDescriptor) -> Result<Vec<u8>> {
    trace!(width = desc.width(), height = desc.height(), layout = %desc.layout(), "planar_deinterleave");
    let cb = channel_bytes(desc.layout())?;
    let total = desc.total_byte_count()?;
    if data.len() < total {
        return Err(ConvertError::source_too_small(total, data.len()));
    }

    let stride = desc.scanline_byte_count()?;
    let (w, h) = (desc.width() as usize, desc.height() as usize);
    let channels = desc.layout().channel_count();
    let bpp = desc.layout().bytes_per_pixel();
    let mut planes = vec![0u8; planar_byte_count(desc, cb)?];

    for (y, row) in data[..total].chunks(stride).enumerate() {
        for c in 0..channels {
            let plane_row = &mut planes[(c * h + y) * w * cb..][..w * cb];
            for (px, out) in row[..w * bpp]
                .chunks_exact(bpp)
                .zip(plane_row.chunks_exact_mut(cb))
            {
                out.copy_from_slice(&px[c * cb..(c + 1) * cb]);
            }
        }
    }
    Ok(planes)
}

/// Horizontal luminance ramp from 0.0 at the left edge to 1.0 at the right.
///
/// A one pixel wide image is all zero.
///
/// ```rust
/// use djv_pixel::{gradient, PixelLayout};
///
/// let (data, desc) = gradient(3, 1).unwrap();
/// assert_eq!(desc.layout(), PixelLayout::L_F32);
/// let v: Vec<f32> = data
///     .chunks_exact(4)
///     .map(|b| f32::from_ne_bytes([b[0], b[1], b[2], b[3]]))
///     .collect();
/// assert_eq!(v, [0.0, 0.5, 1.0]);
/// ```
pub fn gradient(width: u32, height: u32) -> Result<(Vec<u8>, BufferDescriptor)> {
    let desc = BufferDescriptor::new(PixelLayout::L_F32, width, height);
    let stride = desc.scanline_byte_count()?;
    let mut data = vec![0u8; desc.total_byte_count()?];
    let denom = width.saturating_sub(1).max(1) as f32;
    for row in data.chunks_mut(stride) {
        for (x, px) in row.chunks_exact_mut(4).enumerate() {
            px.copy_from_slice(&(x as f32 / denom).to_ne_bytes());
        }
    }
    Ok((data, desc))
}
