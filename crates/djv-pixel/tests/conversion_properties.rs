//! Numeric properties of pixel conversion.
//!
//! Round trips through float layouts, agreement between the single-pixel and
//! full-buffer paths, packed 10-bit integrity, clamping, and the reference
//! scenarios for channel remapping and integer rescaling.

use djv_pixel::sample::{pack_u10, unpack_u10};
use djv_pixel::{BufferDescriptor, Color, PixelLayout, convert, f32_to_half_bits};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn row(layout: PixelLayout, width: u32) -> BufferDescriptor {
    BufferDescriptor::new(layout, width, 1)
}

fn f32_bytes(values: &[f32]) -> Vec<u8> {
    values.iter().flat_map(|v| v.to_ne_bytes()).collect()
}

fn u16_values(bytes: &[u8]) -> Vec<u16> {
    bytes
        .chunks_exact(2)
        .map(|b| u16::from_ne_bytes([b[0], b[1]]))
        .collect()
}

/// Converts `src` to `via` and back, returning the final bytes.
fn round_trip(src: &[u8], desc: &BufferDescriptor, via: PixelLayout) -> Vec<u8> {
    let mid_desc = desc.with_layout(via);
    let mid = convert(src, desc, &mid_desc).unwrap();
    convert(&mid, &mid_desc, desc).unwrap()
}

// ============================================================================
// Round trips
// ============================================================================

#[test]
fn test_u8_round_trip_through_float() {
    let src: Vec<u8> = (0..=255).collect();
    let desc = row(PixelLayout::L_U8, 256);
    assert_eq!(round_trip(&src, &desc, PixelLayout::L_F32), src);
    assert_eq!(round_trip(&src, &desc, PixelLayout::L_F16), src);
}

#[test]
fn test_u16_round_trip_through_f32() {
    let src: Vec<u8> = (0..=u16::MAX).flat_map(|v| v.to_ne_bytes()).collect();
    let desc = BufferDescriptor::new(PixelLayout::L_U16, 256, 256);
    assert_eq!(round_trip(&src, &desc, PixelLayout::L_F32), src);
}

#[test]
fn test_u10_round_trip_through_float() {
    let src: Vec<u8> = (0..1024u16)
        .map(|v| pack_u10([v, 1023 - v, v / 2]))
        .flat_map(|w| w.to_ne_bytes())
        .collect();
    let desc = row(PixelLayout::RGB_U10, 1024);
    assert_eq!(round_trip(&src, &desc, PixelLayout::RGB_F32), src);
    assert_eq!(round_trip(&src, &desc, PixelLayout::RGB_F16), src);
}

#[test]
fn test_u32_extremes_survive_f32() {
    let src: Vec<u8> = [0u32, u32::MAX]
        .iter()
        .flat_map(|v| v.to_ne_bytes())
        .collect();
    let desc = row(PixelLayout::L_U32, 2);
    assert_eq!(round_trip(&src, &desc, PixelLayout::L_F32), src);
}

#[test]
fn test_f16_to_f32_is_exact() {
    let bits: Vec<u16> = (0..=u16::MAX).collect();
    let src: Vec<u8> = bits.iter().flat_map(|v| v.to_ne_bytes()).collect();
    let desc = BufferDescriptor::new(PixelLayout::L_F16, 256, 256);
    let back = u16_values(&round_trip(&src, &desc, PixelLayout::L_F32));
    for (&orig, &got) in bits.iter().zip(&back) {
        let is_nan = (orig & 0x7C00) == 0x7C00 && (orig & 0x03FF) != 0;
        if is_nan {
            assert!((got & 0x7C00) == 0x7C00 && (got & 0x03FF) != 0, "{orig:#06x}");
        } else {
            assert_eq!(orig, got, "{orig:#06x}");
        }
    }
}

#[test]
fn test_f32_to_f16_rounds() {
    let src = f32_bytes(&[1.0, 1.0e6, -0.0, 1.0e-8]);
    let desc = row(PixelLayout::L_F32, 4);
    let dst = convert(&src, &desc, &desc.with_layout(PixelLayout::L_F16)).unwrap();
    assert_eq!(
        u16_values(&dst),
        vec![
            f32_to_half_bits(1.0),
            0x7C00, // overflow to +inf
            0x8000,
            0x0000, // underflow to zero
        ]
    );
}

// ============================================================================
// Pixel path vs buffer path
// ============================================================================

#[test]
fn test_color_matches_buffer_for_every_pair() {
    let mut rng = StdRng::seed_from_u64(0x5EED);
    for src_layout in PixelLayout::all() {
        for _ in 0..8 {
            let mut bytes = [0u8; PixelLayout::MAX_BYTES_PER_PIXEL];
            rng.fill(&mut bytes[..]);
            let color = Color::from_bytes(src_layout, &bytes).unwrap();
            let src_desc = row(src_layout, 1);

            for dst_layout in PixelLayout::all() {
                let from_color = color.convert(dst_layout);
                let from_buffer =
                    convert(color.bytes(), &src_desc, &src_desc.with_layout(dst_layout)).unwrap();
                assert_eq!(
                    from_color.bytes(),
                    &from_buffer[..],
                    "{src_layout} -> {dst_layout}"
                );
            }
        }
    }
}

#[test]
fn test_color_matches_buffer_for_typical_values() {
    let colors = [
        Color::rgba_u8(0, 0, 0, 0),
        Color::rgba_u8(255, 128, 1, 254),
        Color::rgba_f32(0.25, 0.5, 0.75, 1.0),
        Color::rgba_f32(-0.5, 1.5, f32::NAN, f32::INFINITY),
        Color::gray_u8(77),
        Color::gray_f32(0.3),
    ];
    for color in colors {
        let src_desc = row(color.layout(), 1);
        for layout in PixelLayout::all() {
            let buffer = convert(color.bytes(), &src_desc, &src_desc.with_layout(layout)).unwrap();
            assert_eq!(color.convert(layout).bytes(), &buffer[..], "{color} -> {layout}");
        }
    }
}

// ============================================================================
// Packed 10-bit
// ============================================================================

const U10_BOUNDARY: [u16; 6] = [0, 1, 511, 512, 1022, 1023];

#[test]
fn test_u10_boundary_pack_unpack() {
    let mut cases = 0;
    for r in U10_BOUNDARY {
        for g in U10_BOUNDARY {
            for b in U10_BOUNDARY {
                let word = pack_u10([r, g, b]);
                assert_eq!(word & 0b11, 0);
                assert_eq!(unpack_u10(word), [r, g, b]);
                cases += 1;
            }
        }
    }
    assert_eq!(cases, 216);
}

#[test]
fn test_u10_random_pack_unpack() {
    let mut rng = StdRng::seed_from_u64(1023);
    for _ in 0..10_000 {
        let rgb = [
            rng.gen_range(0..1024u16),
            rng.gen_range(0..1024u16),
            rng.gen_range(0..1024u16),
        ];
        assert_eq!(unpack_u10(pack_u10(rgb)), rgb);
    }
}

#[test]
fn test_u10_boundary_through_u16() {
    let src: Vec<u8> = U10_BOUNDARY
        .iter()
        .flat_map(|&r| U10_BOUNDARY.iter().map(move |&g| (r, g)))
        .flat_map(|(r, g)| U10_BOUNDARY.iter().map(move |&b| pack_u10([r, g, b])))
        .flat_map(|w| w.to_ne_bytes())
        .collect();
    let desc = BufferDescriptor::new(PixelLayout::RGB_U10, 36, 6);
    assert_eq!(round_trip(&src, &desc, PixelLayout::RGB_U16), src);
    assert_eq!(round_trip(&src, &desc, PixelLayout::RGBA_F32), src);
}

#[test]
fn test_u10_from_u8() {
    let desc = row(PixelLayout::RGB_U8, 1);
    let dst = convert(&[255, 0, 128], &desc, &desc.with_layout(PixelLayout::RGB_U10)).unwrap();
    let word = u32::from_ne_bytes([dst[0], dst[1], dst[2], dst[3]]);
    // round(128 * 1023 / 255) = 514
    assert_eq!(unpack_u10(word), [1023, 0, 514]);
}

// ============================================================================
// Clamping and scenarios
// ============================================================================

#[test]
fn test_float_to_u8_clamps() {
    let src = f32_bytes(&[-1.0, 0.0, 1.0, 2.0, f32::NAN, f32::INFINITY]);
    let desc = row(PixelLayout::L_F32, 6);
    let dst = convert(&src, &desc, &desc.with_layout(PixelLayout::L_U8)).unwrap();
    assert_eq!(dst, vec![0, 0, 255, 255, 0, 255]);
}

#[test]
fn test_f16_to_integer_clamps() {
    // -1.0, NaN, +inf, -inf, 2.0
    let bits = [0xBC00u16, 0x7E00, 0x7C00, 0xFC00, 0x4000];
    let src: Vec<u8> = bits.iter().flat_map(|v| v.to_ne_bytes()).collect();
    let desc = row(PixelLayout::L_F16, 5);

    let u8_dst = convert(&src, &desc, &desc.with_layout(PixelLayout::L_U8)).unwrap();
    assert_eq!(u8_dst, vec![0, 0, 255, 0, 255]);

    let u16_dst = convert(&src, &desc, &desc.with_layout(PixelLayout::L_U16)).unwrap();
    assert_eq!(u16_values(&u16_dst), vec![0, 0, 65535, 0, 65535]);
}

#[test]
fn test_float_to_float_is_unclamped() {
    let src = f32_bytes(&[-1.0, 2.0, f32::INFINITY]);
    let desc = row(PixelLayout::RGB_F32, 1);
    let dst = convert(&src, &desc, &desc.with_layout(PixelLayout::RGBA_F16)).unwrap();
    let half = u16_values(&dst);
    assert_eq!(
        half,
        vec![
            f32_to_half_bits(-1.0),
            f32_to_half_bits(2.0),
            0x7C00,
            f32_to_half_bits(1.0),
        ]
    );
}

#[test]
fn test_luminance_to_rgba_scenario() {
    let desc = row(PixelLayout::L_U8, 2);
    let dst = convert(&[0, 255], &desc, &desc.with_layout(PixelLayout::RGBA_U8)).unwrap();
    assert_eq!(&dst[..4], &[0, 0, 0, 255]);
    assert_eq!(&dst[4..], &[255, 255, 255, 255]);
}

#[test]
fn test_rgb_to_luminance_scenario() {
    let desc = row(PixelLayout::RGB_U8, 1);
    let dst = convert(&[60, 90, 150], &desc, &desc.with_layout(PixelLayout::L_U8)).unwrap();
    assert_eq!(dst, vec![100]);
}

#[test]
fn test_u8_to_u16_scenario() {
    let desc = row(PixelLayout::L_U8, 2);
    let dst = convert(&[255, 128], &desc, &desc.with_layout(PixelLayout::L_U16)).unwrap();
    assert_eq!(u16_values(&dst), vec![65535, 32896]);
}

#[test]
fn test_alpha_dropped_and_added() {
    let desc = row(PixelLayout::RGBA_U16, 1);
    let src: Vec<u8> = [0u16, 65535, 0, 1000]
        .iter()
        .flat_map(|v| v.to_ne_bytes())
        .collect();
    let la = convert(&src, &desc, &desc.with_layout(PixelLayout::LA_U8)).unwrap();
    // mean(0, 1, 0) = 1/3 -> 85, alpha 1000/65535 -> 4
    assert_eq!(la, vec![85, 4]);

    let rgb = convert(&src, &desc, &desc.with_layout(PixelLayout::RGB_U8)).unwrap();
    assert_eq!(rgb, vec![0, 255, 0]);
}
