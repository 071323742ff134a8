//! Per-pixel decode/encode.
//!
//! A [`PixelCodec`] binds a layout to the storage details that affect single
//! pixels (byte order, BGR order). The single-pixel entry point
//! [`convert_pixel_with`] is what both [`Color::convert`](crate::Color::convert)
//! and the full-buffer scanline loop call, so the two paths cannot drift.

use crate::canonical::Canonical;
use crate::descriptor::{BufferDescriptor, Endian};
use crate::layout::{PixelLayout, SampleLayout};
use crate::sample::{read_sample, read_u10, read_u32, write_sample, write_u10, write_u32};

/// Layout plus per-pixel storage details.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct PixelCodec {
    pub layout: PixelLayout,
    pub endian: Endian,
    bgr: bool,
}

impl PixelCodec {
    /// Host byte order, RGB channel order.
    #[inline]
    pub fn native(layout: PixelLayout) -> Self {
        Self {
            layout,
            endian: Endian::native(),
            bgr: false,
        }
    }

    #[inline]
    pub fn from_descriptor(desc: &BufferDescriptor) -> Self {
        Self {
            layout: desc.layout(),
            // Byte order is meaningless for single-byte samples
            endian: if desc.layout().sample().is_multi_byte() {
                desc.endian()
            } else {
                Endian::native()
            },
            // BGR only means something for color layouts
            bgr: desc.bgr() && desc.layout().channels().is_color(),
        }
    }

    #[inline]
    pub fn bytes_per_pixel(&self) -> usize {
        self.layout.bytes_per_pixel()
    }

    /// Decodes one pixel from the start of `src`.
    pub fn decode(&self, src: &[u8]) -> Canonical {
        let channels = self.layout.channels();
        let sample = self.layout.sample();
        let mut values = [0.0; 4];
        match sample.layout() {
            SampleLayout::PerChannelBytes(n) => {
                for (i, v) in values.iter_mut().take(channels.count()).enumerate() {
                    *v = read_sample(&src[i * n..], sample, self.endian);
                }
            }
            SampleLayout::Packed10In32 => {
                let [r, g, b] = read_u10(src, self.endian);
                values = [r, g, b, 0.0];
            }
        }
        if self.bgr {
            values.swap(0, 2);
        }
        Canonical::new(channels, values)
    }

    /// Encodes one pixel to the start of `dst`. The pixel must already have
    /// this codec's channel composition.
    pub fn encode(&self, px: &Canonical, dst: &mut [u8]) {
        debug_assert_eq!(px.channels(), self.layout.channels());
        let sample = self.layout.sample();
        let mut values = px.to_array();
        if self.bgr {
            values.swap(0, 2);
        }
        match sample.layout() {
            SampleLayout::PerChannelBytes(n) => {
                for (i, &v) in values.iter().take(px.channels().count()).enumerate() {
                    write_sample(&mut dst[i * n..], v, sample, self.endian);
                }
            }
            SampleLayout::Packed10In32 => {
                write_u10(dst, [values[0], values[1], values[2]], self.endian);
            }
        }
    }
}

/// Converts one pixel from `src` (described by `s`) into `dst` (described by
/// `d`).
///
/// Identical codecs copy bytes; codecs that share a layout but differ in byte
/// or channel order shuffle bytes without a numeric round trip. Everything
/// else goes through the canonical form.
#[inline]
pub(crate) fn convert_pixel_with(src: &[u8], s: &PixelCodec, dst: &mut [u8], d: &PixelCodec) {
    if s.layout == d.layout {
        if s == d {
            let n = s.bytes_per_pixel();
            dst[..n].copy_from_slice(&src[..n]);
        } else {
            reorder_pixel(src, s, dst, d);
        }
    } else {
        d.encode(&s.decode(src).remap(d.layout.channels()), dst);
    }
}

/// Byte-level endian/BGR reorder between two codecs of the same layout.
fn reorder_pixel(src: &[u8], s: &PixelCodec, dst: &mut [u8], d: &PixelCodec) {
    let swap_rb = s.bgr != d.bgr;
    let swap_bytes = s.endian != d.endian;
    match s.layout.sample().layout() {
        SampleLayout::PerChannelBytes(n) => {
            for i in 0..s.layout.channel_count() {
                let si = match i {
                    0 if swap_rb => 2,
                    2 if swap_rb => 0,
                    _ => i,
                };
                let out = &mut dst[i * n..(i + 1) * n];
                out.copy_from_slice(&src[si * n..(si + 1) * n]);
                if swap_bytes {
                    out.reverse();
                }
            }
        }
        SampleLayout::Packed10In32 => {
            let mut word = read_u32(src, s.endian);
            if swap_rb {
                let r = (word >> 22) & 0x3FF;
                let b = (word >> 2) & 0x3FF;
                word = (word & !((0x3FF << 22) | (0x3FF << 2))) | (b << 22) | (r << 2);
            }
            write_u32(dst, word, d.endian);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample::pack_u10;

    fn codec(layout: PixelLayout, endian: Endian, bgr: bool) -> PixelCodec {
        PixelCodec::from_descriptor(
            &BufferDescriptor::new(layout, 1, 1)
                .with_endian(endian)
                .with_bgr(bgr),
        )
    }

    #[test]
    fn test_identity_copies_bytes() {
        let c = PixelCodec::native(PixelLayout::RGBA_F16);
        // NaN payloads survive an identity conversion
        let src = [0x01, 0x7E, 0x02, 0x7E, 0x03, 0x7E, 0x00, 0x3C];
        let mut dst = [0u8; 8];
        convert_pixel_with(&src, &c, &mut dst, &c);
        assert_eq!(src, dst);
    }

    #[test]
    fn test_endian_swap_bytes() {
        let s = codec(PixelLayout::RGB_U16, Endian::Lsb, false);
        let d = codec(PixelLayout::RGB_U16, Endian::Msb, false);
        let src = [1, 2, 3, 4, 5, 6];
        let mut dst = [0u8; 6];
        convert_pixel_with(&src, &s, &mut dst, &d);
        assert_eq!(dst, [2, 1, 4, 3, 6, 5]);
    }

    #[test]
    fn test_bgr_swap() {
        let s = codec(PixelLayout::RGBA_U8, Endian::Lsb, true);
        let d = codec(PixelLayout::RGBA_U8, Endian::Lsb, false);
        let mut dst = [0u8; 4];
        convert_pixel_with(&[10, 20, 30, 40], &s, &mut dst, &d);
        assert_eq!(dst, [30, 20, 10, 40]);

        // Also applied across a numeric conversion
        let d = codec(PixelLayout::RGB_U16, Endian::Msb, false);
        let mut dst = [0u8; 6];
        convert_pixel_with(&[255, 0, 0, 7], &s, &mut dst, &d);
        assert_eq!(dst, [0, 0, 0, 0, 0xFF, 0xFF]);
    }

    #[test]
    fn test_bgr_ignored_for_luminance() {
        let s = codec(PixelLayout::LA_U8, Endian::Lsb, true);
        let d = codec(PixelLayout::LA_U8, Endian::Lsb, false);
        assert_eq!(s, d);
    }

    #[test]
    fn test_u8_ignores_endian() {
        let s = codec(PixelLayout::RGB_U8, Endian::Lsb, false);
        let d = codec(PixelLayout::RGB_U8, Endian::Msb, false);
        assert_eq!(s, d);
        assert_ne!(
            codec(PixelLayout::RGB_U16, Endian::Lsb, false),
            codec(PixelLayout::RGB_U16, Endian::Msb, false)
        );
    }

    #[test]
    fn test_u10_reorder() {
        let s = codec(PixelLayout::RGB_U10, Endian::Msb, true);
        let d = codec(PixelLayout::RGB_U10, Endian::Lsb, false);
        let word = pack_u10([1, 2, 3]);
        let src = word.to_be_bytes();
        let mut dst = [0u8; 4];
        convert_pixel_with(&src, &s, &mut dst, &d);
        assert_eq!(u32::from_le_bytes(dst), pack_u10([3, 2, 1]));
    }

    #[test]
    fn test_decode_encode_u10() {
        let c = PixelCodec::native(PixelLayout::RGB_U10);
        let rgb = codec(PixelLayout::RGB_U16, Endian::native(), false);
        let src = pack_u10([1023, 0, 512]);
        let px = c.decode(&src.to_ne_bytes());
        assert_eq!(px.values()[0], 1.0);
        assert_eq!(px.values()[1], 0.0);
        let mut dst = [0u8; 6];
        rgb.encode(&px, &mut dst);
        let b = u16::from_ne_bytes([dst[4], dst[5]]);
        assert_eq!(b, 32800); // round(512 * 65535 / 1023)
    }
}
