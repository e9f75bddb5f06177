use crate::foundation::core::Rgba8;
use crate::foundation::error::{SignetError, SignetResult};
use crate::signature::model::{Anchor, Scaling, ShadowSpec, SignatureSpec};

/// Shadow parameters after scaling and clamping.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResolvedShadow {
    /// Blur radius in pixels, `>= 0`.
    pub blur_px: f64,
    /// Horizontal offset in pixels.
    pub offset_x_px: f64,
    /// Vertical offset in pixels.
    pub offset_y_px: f64,
    /// Shadow color.
    pub color: Rgba8,
    /// Shadow strength in `[0, 1]`.
    pub alpha: f32,
}

/// A [`SignatureSpec`] with trimmed text and every number validated, clamped and scaled
/// for one concrete image width.
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedSignature {
    /// Trimmed, non-empty text.
    pub text: String,
    /// Effective font size in pixels, finite and `> 0`.
    pub font_size_px: f64,
    /// Opacity in `[0, 1]`.
    pub opacity: f32,
    /// Effective padding in pixels, `>= 0`.
    pub padding_px: f64,
    /// Text color.
    pub color: Rgba8,
    /// Anchor.
    pub anchor: Anchor,
    /// Effective shadow, if any.
    pub shadow: Option<ResolvedShadow>,
}

/// Clamp a unit-interval parameter; NaN reads as fully transparent.
pub fn clamp_unit(x: f32) -> f32 {
    if x.is_nan() { 0.0 } else { x.clamp(0.0, 1.0) }
}

fn non_negative(x: f64) -> f64 {
    if x.is_nan() { 0.0 } else { x.max(0.0) }
}

fn finite_or_zero(x: f64) -> f64 {
    if x.is_finite() { x } else { 0.0 }
}

impl Scaling {
    /// Multiplier applied to every size-like parameter for an image of `image_width` pixels.
    pub fn factor(self, image_width: u32) -> f64 {
        match self {
            Scaling::Fixed => 1.0,
            Scaling::ResolutionAdaptive {
                reference_width_px, ..
            } => {
                if !reference_width_px.is_finite() || reference_width_px <= 0.0 {
                    return 1.0;
                }
                f64::from(image_width) / reference_width_px
            }
        }
    }

    fn min_font_px(self) -> f64 {
        match self {
            Scaling::Fixed => 0.0,
            Scaling::ResolutionAdaptive { min_font_px, .. } => non_negative(min_font_px),
        }
    }
}

impl SignatureSpec {
    /// Validate, clamp and scale this spec for an image `image_width` pixels wide.
    ///
    /// Returns `Ok(None)` when the trimmed text is empty. Font size is the only rejected
    /// input; every other parameter is clamped into range. Under
    /// [`Scaling::ResolutionAdaptive`] the same factor is applied to the font size, padding,
    /// shadow blur and both shadow offsets.
    pub fn resolve(&self, image_width: u32) -> SignetResult<Option<ResolvedSignature>> {
        let text = self.text.trim();
        if text.is_empty() {
            return Ok(None);
        }

        if !self.font_size_px.is_finite() || self.font_size_px <= 0.0 {
            return Err(SignetError::validation(
                "font_size_px must be finite and > 0",
            ));
        }

        let k = self.scaling.factor(image_width);
        let font_size_px = (self.font_size_px * k).max(self.scaling.min_font_px());
        if !font_size_px.is_finite() {
            return Err(SignetError::validation("scaled font size is not finite"));
        }
        let padding_px = non_negative(self.padding_px) * k;

        let shadow = self.shadow.map(|s: ShadowSpec| ResolvedShadow {
            blur_px: non_negative(s.blur_px) * k,
            offset_x_px: finite_or_zero(s.offset_x_px) * k,
            offset_y_px: finite_or_zero(s.offset_y_px) * k,
            color: s.color,
            alpha: clamp_unit(s.alpha),
        });

        Ok(Some(ResolvedSignature {
            text: text.to_owned(),
            font_size_px,
            opacity: clamp_unit(self.opacity),
            padding_px,
            color: self.color,
            anchor: self.anchor,
            shadow,
        }))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/signature/scaling.rs"]
mod tests;
