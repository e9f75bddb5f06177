use crate::foundation::core::{Point, Rect, Size};
use crate::signature::model::Anchor;

/// Clamp `v` into `[lo, hi]`, falling back to `lo` when the range is inverted or any input
/// is NaN. Never panics.
pub fn clamp_or_lower(v: f64, lo: f64, hi: f64) -> f64 {
    if v.is_nan() || hi.is_nan() || hi < lo {
        return lo;
    }
    v.clamp(lo, hi)
}

/// Resolve the top-left draw origin of a `text`-sized box anchored inside an `image`-sized
/// canvas.
///
/// | anchor       | x                      | y                       |
/// |--------------|------------------------|-------------------------|
/// | TopLeft      | `pad`                  | `pad`                   |
/// | TopRight     | `W - pad - w`          | `pad`                   |
/// | BottomLeft   | `pad`                  | `H - pad - h`           |
/// | BottomRight  | `W - pad - w`          | `H - pad - h`           |
/// | Center       | `(W - w) / 2`          | `(H - h) / 2`           |
///
/// The result is then clamped to `[0, W - w] x [0, H - h]`. When the box is larger than the
/// image on an axis the clamp range inverts and that coordinate falls back to `0`.
pub fn resolve_origin(image: Size, text: Size, padding_px: f64, anchor: Anchor) -> Point {
    let pad = if padding_px.is_nan() {
        0.0
    } else {
        padding_px.max(0.0)
    };
    let (iw, ih) = (image.width, image.height);
    let (tw, th) = (text.width, text.height);

    let (x, y) = match anchor {
        Anchor::TopLeft => (pad, pad),
        Anchor::TopRight => (iw - pad - tw, pad),
        Anchor::BottomLeft => (pad, ih - pad - th),
        Anchor::BottomRight => (iw - pad - tw, ih - pad - th),
        Anchor::Center => ((iw - tw) / 2.0, (ih - th) / 2.0),
    };

    Point::new(
        clamp_or_lower(x, 0.0, iw - tw),
        clamp_or_lower(y, 0.0, ih - th),
    )
}

/// Text box placed inside the image.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Placement {
    /// Anchor the placement was resolved from.
    pub anchor: Anchor,
    /// Top-left corner of the text box.
    pub origin: Point,
    /// Measured text box size.
    pub extent: Size,
}

impl Placement {
    /// Resolve a placement; see [`resolve_origin`].
    pub fn resolve(image: Size, text: Size, padding_px: f64, anchor: Anchor) -> Self {
        Self {
            anchor,
            origin: resolve_origin(image, text, padding_px, anchor),
            extent: text,
        }
    }

    /// Text box rectangle in image coordinates. May extend past the image when the text is
    /// wider or taller than the image itself.
    pub fn rect(&self) -> Rect {
        Rect::from_origin_size(self.origin, self.extent)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/anchor.rs"]
mod tests;
