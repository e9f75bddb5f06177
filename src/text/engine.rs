use std::borrow::Cow;
use std::collections::HashMap;

use crate::foundation::core::Rect;
use crate::foundation::error::{SignetError, SignetResult};
use crate::text::metrics::{CoverageMask, TextExtent, TextRasterizer};

/// Family stack used for every signature. Resolved against the system font collection.
pub const FONT_FAMILY_STACK: &str = "ui-sans-serif, system-ui, -apple-system, \"Segoe UI\", \
     Roboto, \"Noto Sans JP\", \"Hiragino Sans\", \"Helvetica Neue\", Arial, sans-serif";

// Room around the layout box for antialiasing and glyph overhang.
const MASK_MARGIN: u32 = 2;

/// Production [`TextRasterizer`]: Parley shapes the line, `vello_cpu` fills the glyphs.
pub struct ParleyTextEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<()>,
    font_cache: HashMap<(u64, u32), vello_cpu::peniko::FontData>,
}

impl Default for ParleyTextEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ParleyTextEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParleyTextEngine")
            .field("cached_fonts", &self.font_cache.len())
            .finish_non_exhaustive()
    }
}

impl ParleyTextEngine {
    /// Construct a new engine with fresh Parley contexts over the system font collection.
    pub fn new() -> Self {
        Self {
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
            font_cache: HashMap::new(),
        }
    }

    fn layout_line(&mut self, text: &str, font_size_px: f64) -> SignetResult<parley::Layout<()>> {
        if !font_size_px.is_finite() || font_size_px <= 0.0 {
            return Err(SignetError::validation(
                "text font size must be finite and > 0",
            ));
        }

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(Cow::Borrowed(FONT_FAMILY_STACK)),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(font_size_px as f32));

        let mut layout: parley::Layout<()> = builder.build(text);
        layout.break_all_lines(None);
        Ok(layout)
    }
}

fn has_glyphs(layout: &parley::Layout<()>) -> bool {
    layout.lines().any(|line| {
        line.items().any(|item| match item {
            parley::layout::PositionedLayoutItem::GlyphRun(run) => {
                run.positioned_glyphs().next().is_some()
            }
            _ => false,
        })
    })
}

// Region sides are whole pixels already; images wider than u16::MAX are cut at that size.
fn dim_u16(px: f64) -> u16 {
    px.ceil().clamp(0.0, f64::from(u16::MAX)) as u16
}

impl TextRasterizer for ParleyTextEngine {
    fn measure(&mut self, text: &str, font_size_px: f64) -> SignetResult<TextExtent> {
        let layout = self.layout_line(text, font_size_px)?;
        if !text.trim().is_empty() && !has_glyphs(&layout) {
            tracing::warn!(
                families = FONT_FAMILY_STACK,
                "no font face resolved for signature text"
            );
        }
        Ok(TextExtent {
            width: f64::from(layout.width()).max(0.0),
            height: font_size_px,
        })
    }

    fn rasterize(
        &mut self,
        text: &str,
        font_size_px: f64,
        clip: Rect,
    ) -> SignetResult<CoverageMask> {
        let layout = self.layout_line(text, font_size_px)?;
        let margin = f64::from(MASK_MARGIN);
        let bounds = Rect::new(
            -margin,
            -margin,
            f64::from(layout.width()).max(0.0) + margin,
            f64::from(layout.height()).max(font_size_px) + margin,
        );
        let region = bounds.intersect(clip).expand();
        // NaN clips fail this too.
        if !(region.area() > 0.0) {
            return Ok(CoverageMask::empty(0, 0, 0, 0));
        }
        let width = dim_u16(region.width());
        let height = dim_u16(region.height());

        let mut ctx = vello_cpu::RenderContext::new(width, height);
        ctx.set_transform(vello_cpu::kurbo::Affine::translate((-region.x0, -region.y0)));
        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(255, 255, 255, 255));

        for line in layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };

                let run_font = run.run().font();
                let font = self
                    .font_cache
                    .entry((run_font.data.id(), run_font.index))
                    .or_insert_with(|| {
                        vello_cpu::peniko::FontData::new(
                            vello_cpu::peniko::Blob::from(run_font.data.data().to_vec()),
                            run_font.index,
                        )
                    })
                    .clone();
                let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                ctx.glyph_run(&font)
                    .font_size(run.run().font_size())
                    .fill_glyphs(glyphs);
            }
        }

        ctx.flush();
        let mut pixmap = vello_cpu::Pixmap::new(width, height);
        ctx.render_to_pixmap(&mut pixmap);

        // White paint: premultiplied alpha is the coverage.
        let data = pixmap
            .data_as_u8_slice()
            .chunks_exact(4)
            .map(|px| px[3])
            .collect();

        CoverageMask::from_parts(
            u32::from(width),
            u32::from(height),
            region.x0 as i32,
            region.y0 as i32,
            data,
        )
    }
}
