//! Signet stamps a styled text signature onto raster images.
//!
//! A request is a decoded [`SourceImage`] plus a [`SignatureSpec`] (text, size, opacity,
//! padding, color, anchor and an optional legibility shadow). The [`Compositor`] turns it
//! into a [`RenderedImage`] of the same dimensions, ready for PNG export.
//!
//! # Pipeline overview
//!
//! 1. **Resolve**: `SignatureSpec + image width -> ResolvedSignature` (trim, clamp, optional
//!    resolution-adaptive scaling)
//! 2. **Measure**: a [`TextRasterizer`] reports the single-line text box
//! 3. **Lay out**: the anchor resolves to a top-left origin clamped inside the image
//! 4. **Render**: shadow then glyph coverage is blended over a copy of the source
//!
//! Interactive callers go through [`RenderSession`], which tags requests with a
//! [`Generation`] so results of superseded requests are dropped.
//!
//! Key constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic**: the same source and spec always produce byte-identical output.
//! - **Copy-on-render**: source pixels are never mutated.
//! - **Straight RGBA8** end-to-end, so an untouched image exports losslessly.
#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod assets;
mod foundation;
mod layout;
mod render;
mod session;
mod signature;
mod text;

pub use assets::decode::{SourceImage, decode_image, decode_image_async};
pub use assets::encode::RenderedImage;
pub use foundation::core::{ImageSize, Point, Rect, Rgba8, Size};
pub use foundation::error::{SignetError, SignetResult};
pub use layout::anchor::{Placement, clamp_or_lower, resolve_origin};
pub use render::blend::{over, paint_alpha};
pub use render::blur::{blur_a8, blur_coverage};
pub use render::compositor::{Compositor, MAX_SHADOW_BLUR_PX, SignaturePlan};
pub use session::render_session::{Generation, RenderOutcome, RenderSession};
pub use signature::color::parse_color;
pub use signature::model::{Anchor, Scaling, ShadowSpec, SignatureSpec};
pub use signature::scaling::{ResolvedShadow, ResolvedSignature, clamp_unit};
pub use text::engine::{FONT_FAMILY_STACK, ParleyTextEngine};
pub use text::metrics::{CoverageMask, TextExtent, TextRasterizer};
