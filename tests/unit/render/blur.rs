use super::*;

#[test]
fn radius_0_is_identity() {
    let src = vec![1u8, 2, 3, 4, 5, 6];
    assert_eq!(blur_a8(&src, 3, 2, 0, 1.0).unwrap(), src);
}

#[test]
fn constant_buffer_is_identity() {
    let src = vec![77u8; 4 * 3];
    assert_eq!(blur_a8(&src, 4, 3, 3, 2.0).unwrap(), src);
}

#[test]
fn blur_spreads_energy_from_single_pixel() {
    let (w, h) = (5u32, 5u32);
    let mut src = vec![0u8; (w * h) as usize];
    src[(2 * w + 2) as usize] = 255;

    let out = blur_a8(&src, w, h, 2, 1.2).unwrap();

    assert!(out.iter().filter(|&&c| c != 0).count() > 1);
    let sum: u32 = out.iter().map(|&c| u32::from(c)).sum();
    assert!((sum as i32 - 255).abs() <= 4);
}

#[test]
fn bad_sigma_is_rejected() {
    let src = vec![0u8; 4];
    assert!(blur_a8(&src, 2, 2, 1, 0.0).is_err());
    assert!(blur_a8(&src, 2, 2, 1, f32::NAN).is_err());
}

#[test]
fn length_mismatch_is_rejected() {
    assert!(blur_a8(&[0u8; 3], 2, 2, 1, 1.0).is_err());
}

#[test]
fn blur_coverage_grows_mask_and_keeps_mass() {
    let mask = CoverageMask::from_parts(1, 1, 0, 0, vec![255]).unwrap();
    let blurred = blur_coverage(&mask, 3, 1.5).unwrap();
    assert_eq!((blurred.width, blurred.height), (7, 7));
    assert_eq!((blurred.offset_x, blurred.offset_y), (-3, -3));
    assert!(blurred.get(3, 3) < 255);
    assert!(blurred.get(2, 3) > 0);
    let sum: u32 = blurred.data.iter().map(|&c| u32::from(c)).sum();
    assert!((sum as i32 - 255).abs() <= 8);
}
