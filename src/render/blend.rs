use crate::foundation::core::Rgba8;
use crate::foundation::error::{SignetError, SignetResult};

/// Straight-alpha RGBA8 pixel.
pub type StraightRgba8 = [u8; 4];

/// Convert a unit-interval factor to 0..=255. NaN reads as 0.
pub fn unit_to_u8(x: f32) -> u8 {
    if x.is_nan() {
        return 0;
    }
    ((x.clamp(0.0, 1.0) * 255.0).round() as i32).clamp(0, 255) as u8
}

/// Effective per-pixel alpha for `coverage` painted with `color` at `opacity` (0..=255).
pub fn paint_alpha(coverage: u8, color: Rgba8, opacity: u8) -> u8 {
    mul_div255(
        u16::from(mul_div255(u16::from(coverage), u16::from(opacity))),
        u16::from(color.a),
    )
}

/// Composite an opaque `color` over a straight-alpha `dst` pixel with weight `alpha`.
///
/// For an opaque destination this is `dst * (1 - a) + color * a`, rounded. A zero `alpha`
/// returns `dst` untouched.
pub fn over(dst: StraightRgba8, color: Rgba8, alpha: u8) -> StraightRgba8 {
    if alpha == 0 {
        return dst;
    }
    if dst[3] == 0 {
        return [color.r, color.g, color.b, alpha];
    }

    let da = u16::from(dst[3]);
    let inv = 255u16 - u16::from(alpha);
    let out_a = add_sat_u8(alpha, mul_div255(da, inv));
    if out_a == 0 {
        return [0, 0, 0, 0];
    }

    let src = [color.r, color.g, color.b];
    let mut out = [0u8; 4];
    out[3] = out_a;
    for i in 0..3 {
        // Premultiplied over, then back to straight alpha.
        let sc = mul_div255(u16::from(src[i]), u16::from(alpha));
        let dc = mul_div255(u16::from(mul_div255(u16::from(dst[i]), da)), inv);
        let pc = add_sat_u8(sc, dc);
        out[i] = unpremul(pc, out_a);
    }
    out
}

/// Blend `color` through an 8-bit coverage mask into an RGBA8 image buffer.
///
/// The mask's `(0, 0)` lands on image pixel `(at_x, at_y)`; mask pixels outside the image
/// are skipped.
#[allow(clippy::too_many_arguments)]
pub fn blend_mask_in_place(
    dst: &mut [u8],
    width: u32,
    height: u32,
    mask: &[u8],
    mask_width: u32,
    mask_height: u32,
    at_x: i64,
    at_y: i64,
    color: Rgba8,
    opacity: u8,
) -> SignetResult<()> {
    if dst.len() != width as usize * height as usize * 4 {
        return Err(SignetError::render(
            "blend_mask_in_place expects dst matching width*height*4",
        ));
    }
    if mask.len() != mask_width as usize * mask_height as usize {
        return Err(SignetError::render(
            "blend_mask_in_place expects mask matching mask_width*mask_height",
        ));
    }
    if opacity == 0 || color.a == 0 {
        return Ok(());
    }

    let (w, h) = (i64::from(width), i64::from(height));
    let y0 = at_y.max(0);
    let y1 = at_y.saturating_add(i64::from(mask_height)).min(h);
    let x0 = at_x.max(0);
    let x1 = at_x.saturating_add(i64::from(mask_width)).min(w);

    for y in y0..y1 {
        let my = (y - at_y) as usize;
        for x in x0..x1 {
            let mx = (x - at_x) as usize;
            let coverage = mask[my * mask_width as usize + mx];
            let alpha = paint_alpha(coverage, color, opacity);
            if alpha == 0 {
                continue;
            }
            let idx = ((y * w + x) as usize) * 4;
            let px = over(
                [dst[idx], dst[idx + 1], dst[idx + 2], dst[idx + 3]],
                color,
                alpha,
            );
            dst[idx..idx + 4].copy_from_slice(&px);
        }
    }
    Ok(())
}

fn mul_div255(x: u16, y: u16) -> u8 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u8
}

fn unpremul(c: u8, a: u8) -> u8 {
    if a == 0 {
        return 0;
    }
    let v = (u32::from(c) * 255 + u32::from(a) / 2) / u32::from(a);
    v.min(255) as u8
}

fn add_sat_u8(a: u8, b: u8) -> u8 {
    a.saturating_add(b)
}

#[cfg(test)]
#[path = "../../tests/unit/render/blend.rs"]
mod tests;
