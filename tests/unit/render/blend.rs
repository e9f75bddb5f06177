use super::*;

#[test]
fn over_alpha_0_is_noop() {
    let dst = [1, 2, 3, 4];
    assert_eq!(over(dst, Rgba8::WHITE, 0), dst);
}

#[test]
fn over_full_alpha_replaces_dst() {
    let dst = [10, 20, 30, 255];
    assert_eq!(over(dst, Rgba8::rgb(255, 0, 0), 255), [255, 0, 0, 255]);
}

#[test]
fn over_opaque_dst_matches_linear_mix() {
    // 200 * (1 - 0.5) + 0 * 0.5 with 8-bit rounding.
    let out = over([200, 100, 50, 255], Rgba8::BLACK, 128);
    assert_eq!(out[3], 255);
    for (got, base) in out[..3].iter().zip([200u32, 100, 50]) {
        let expect = (base * 127 + 127) / 255;
        assert!((i32::from(*got) - expect as i32).abs() <= 1, "{got} vs {expect}");
    }
}

#[test]
fn over_transparent_dst_takes_color_and_alpha() {
    let out = over([0, 0, 0, 0], Rgba8::rgb(40, 80, 120), 100);
    assert_eq!(out, [40, 80, 120, 100]);
}

#[test]
fn paint_alpha_multiplies_factors() {
    assert_eq!(paint_alpha(255, Rgba8::WHITE, 255), 255);
    assert_eq!(paint_alpha(0, Rgba8::WHITE, 255), 0);
    assert_eq!(paint_alpha(255, Rgba8::rgba(0, 0, 0, 0), 255), 0);
    assert_eq!(paint_alpha(255, Rgba8::WHITE, 128), 128);
}

#[test]
fn unit_to_u8_clamps() {
    assert_eq!(unit_to_u8(1.5), 255);
    assert_eq!(unit_to_u8(-0.2), 0);
    assert_eq!(unit_to_u8(f32::NAN), 0);
    assert_eq!(unit_to_u8(0.5), 128);
}

#[test]
fn mask_blend_clips_to_image_bounds() {
    let (w, h) = (4u32, 3u32);
    let mut dst = [0u8, 0, 0, 255].repeat((w * h) as usize);
    let mask = vec![255u8; 9];

    blend_mask_in_place(&mut dst, w, h, &mask, 3, 3, 2, 1, Rgba8::WHITE, 255).unwrap();

    let painted: Vec<(u32, u32)> = (0..h)
        .flat_map(|y| (0..w).map(move |x| (x, y)))
        .filter(|&(x, y)| dst[((y * w + x) * 4) as usize] == 255)
        .collect();
    assert_eq!(painted, vec![(2, 1), (3, 1), (2, 2), (3, 2)]);
}

#[test]
fn mask_blend_fully_outside_is_noop() {
    let (w, h) = (2u32, 2u32);
    let mut dst = [9u8, 9, 9, 255].repeat(4);
    let before = dst.clone();
    blend_mask_in_place(&mut dst, w, h, &[255; 4], 2, 2, -5, 7, Rgba8::WHITE, 255).unwrap();
    assert_eq!(dst, before);
}

#[test]
fn mask_blend_rejects_mismatched_buffers() {
    let mut dst = vec![0u8; 15];
    assert!(blend_mask_in_place(&mut dst, 2, 2, &[0; 4], 2, 2, 0, 0, Rgba8::WHITE, 255).is_err());

    let mut dst = vec![0u8; 16];
    assert!(blend_mask_in_place(&mut dst, 2, 2, &[0; 3], 2, 2, 0, 0, Rgba8::WHITE, 255).is_err());
}

#[test]
fn mask_blend_at_extreme_positions_is_noop() {
    let mut dst = [9u8, 9, 9, 255].repeat(4);
    let before = dst.clone();
    for (x, y) in [(i64::MAX, 0), (0, i64::MAX), (i64::MIN, 0), (i64::MAX - 1, i64::MAX - 1)] {
        blend_mask_in_place(&mut dst, 2, 2, &[255; 4], 2, 2, x, y, Rgba8::WHITE, 255).unwrap();
    }
    assert_eq!(dst, before);
}
