use crate::assets::decode::SourceImage;
use crate::assets::encode::RenderedImage;
use crate::foundation::core::{ImageSize, Rect, Rgba8};
use crate::foundation::error::SignetResult;
use crate::layout::anchor::Placement;
use crate::render::blend::{blend_mask_in_place, unit_to_u8};
use crate::render::blur::blur_coverage;
use crate::signature::model::SignatureSpec;
use crate::signature::scaling::ResolvedSignature;
use crate::text::engine::ParleyTextEngine;
use crate::text::metrics::{CoverageMask, TextRasterizer};

/// Upper bound on the shadow blur kernel radius.
pub const MAX_SHADOW_BLUR_PX: u32 = 256;

/// Everything the compositor decided about one signature, before any pixel is touched.
#[derive(Clone, Debug, PartialEq)]
pub struct SignaturePlan {
    /// Validated, clamped and scaled parameters.
    pub signature: ResolvedSignature,
    /// Where the text box goes.
    pub placement: Placement,
}

/// Draws a [`SignatureSpec`] onto a copy of a [`SourceImage`].
///
/// Layout always works on a top-left text box whose top edge is the text's top
/// (`textBaseline = top`); the `Center` anchor yields a top-left box too.
#[derive(Debug)]
pub struct Compositor<T = ParleyTextEngine> {
    text: T,
}

impl Default for Compositor<ParleyTextEngine> {
    fn default() -> Self {
        Self::new()
    }
}

impl Compositor<ParleyTextEngine> {
    /// Compositor backed by system fonts.
    pub fn new() -> Self {
        Self::with_text_engine(ParleyTextEngine::new())
    }
}

impl<T: TextRasterizer> Compositor<T> {
    /// Compositor backed by a custom text rasterizer.
    pub fn with_text_engine(text: T) -> Self {
        Self { text }
    }

    /// Borrow the text engine.
    pub fn text_engine_mut(&mut self) -> &mut T {
        &mut self.text
    }

    /// Resolve, measure and lay out `spec` for an image of `size`.
    ///
    /// `Ok(None)` means the text is blank and nothing will be drawn.
    pub fn plan(
        &mut self,
        size: ImageSize,
        spec: &SignatureSpec,
    ) -> SignetResult<Option<SignaturePlan>> {
        let Some(signature) = spec.resolve(size.width)? else {
            return Ok(None);
        };

        let extent = self.text.measure(&signature.text, signature.font_size_px)?;
        let placement = Placement::resolve(
            size.as_size(),
            extent.as_size(),
            signature.padding_px,
            signature.anchor,
        );
        tracing::debug!(
            anchor = %signature.anchor,
            x = placement.origin.x,
            y = placement.origin.y,
            text_w = extent.width,
            text_h = extent.height,
            "resolved signature placement"
        );

        Ok(Some(SignaturePlan {
            signature,
            placement,
        }))
    }

    /// Composite `spec` onto a fresh copy of `source`.
    ///
    /// The output always has the source's dimensions. Blank text, or zero opacity, yields a
    /// pixel-identical copy.
    #[tracing::instrument(
        skip_all,
        fields(width = source.width(), height = source.height(), anchor = %spec.anchor)
    )]
    pub fn composite(
        &mut self,
        source: &SourceImage,
        spec: &SignatureSpec,
    ) -> SignetResult<RenderedImage> {
        let (width, height) = (source.width(), source.height());
        let mut data = source.rgba8().to_vec();

        if let Some(plan) = self.plan(source.size(), spec)? {
            self.draw(&mut data, width, height, &plan)?;
        }

        Ok(RenderedImage {
            width,
            height,
            data,
        })
    }

    /// [`Compositor::composite`] followed by PNG encoding.
    pub fn composite_png(
        &mut self,
        source: &SourceImage,
        spec: &SignatureSpec,
    ) -> SignetResult<Vec<u8>> {
        self.composite(source, spec)?.encode_png()
    }

    fn draw(
        &mut self,
        data: &mut [u8],
        width: u32,
        height: u32,
        plan: &SignaturePlan,
    ) -> SignetResult<()> {
        let sig = &plan.signature;
        let opacity = unit_to_u8(sig.opacity);
        if opacity == 0 {
            return Ok(());
        }

        let ox = plan.placement.origin.x.round() as i64;
        let oy = plan.placement.origin.y.round() as i64;
        let text_clip = visible_rect(width, height, ox, oy, 0);

        let shadow = sig.shadow.and_then(|shadow| {
            let shadow_opacity = unit_to_u8(shadow.alpha * sig.opacity);
            (shadow_opacity > 0).then(|| {
                let radius = (shadow.blur_px.ceil() as u32).min(MAX_SHADOW_BLUR_PX);
                let sx = ox.saturating_add(shadow.offset_x_px.round() as i64);
                let sy = oy.saturating_add(shadow.offset_y_px.round() as i64);
                (shadow, shadow_opacity, radius, sx, sy)
            })
        });

        let Some((shadow, shadow_opacity, radius, sx, sy)) = shadow else {
            let mask = self.text.rasterize(&sig.text, sig.font_size_px, text_clip)?;
            return blit(data, width, height, &mask, ox, oy, sig.color, opacity);
        };

        // One mask serves both passes when their visible regions overlap.
        let shadow_clip = visible_rect(width, height, sx, sy, radius);
        let (shadow_mask, mask) = if text_clip.intersect(shadow_clip).area() > 0.0 {
            let mask = self.text.rasterize(
                &sig.text,
                sig.font_size_px,
                text_clip.union(shadow_clip),
            )?;
            (mask.clone(), mask)
        } else {
            (
                self.text.rasterize(&sig.text, sig.font_size_px, shadow_clip)?,
                self.text.rasterize(&sig.text, sig.font_size_px, text_clip)?,
            )
        };

        if !shadow_mask.is_blank() {
            let shadow_mask = if radius > 0 {
                let blur_px = shadow.blur_px.min(f64::from(MAX_SHADOW_BLUR_PX));
                let sigma = (blur_px / 2.0).max(0.5) as f32;
                blur_coverage(&shadow_mask, radius, sigma)?
            } else {
                shadow_mask
            };
            blit(
                data,
                width,
                height,
                &shadow_mask,
                sx,
                sy,
                shadow.color,
                shadow_opacity,
            )?;
        }

        blit(data, width, height, &mask, ox, oy, sig.color, opacity)
    }
}

/// The image rectangle in coordinates local to a box whose top-left sits at `(x, y)`, grown by
/// `margin` on every side.
fn visible_rect(width: u32, height: u32, x: i64, y: i64, margin: u32) -> Rect {
    let (x, y) = (x as f64, y as f64);
    let m = f64::from(margin);
    Rect::new(-x, -y, f64::from(width) - x, f64::from(height) - y).inflate(m, m)
}

#[allow(clippy::too_many_arguments)]
fn blit(
    data: &mut [u8],
    width: u32,
    height: u32,
    mask: &CoverageMask,
    box_x: i64,
    box_y: i64,
    color: Rgba8,
    opacity: u8,
) -> SignetResult<()> {
    if mask.is_blank() {
        return Ok(());
    }
    blend_mask_in_place(
        data,
        width,
        height,
        &mask.data,
        mask.width,
        mask.height,
        box_x.saturating_add(i64::from(mask.offset_x)),
        box_y.saturating_add(i64::from(mask.offset_y)),
        color,
        opacity,
    )
}

#[cfg(test)]
#[path = "../../tests/unit/render/compositor.rs"]
mod tests;
