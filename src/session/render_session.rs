use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use crate::assets::decode::{SourceImage, decode_image_async};
use crate::assets::encode::RenderedImage;
use crate::foundation::error::{SignetError, SignetResult};
use crate::render::compositor::Compositor;
use crate::signature::model::SignatureSpec;
use crate::text::engine::ParleyTextEngine;
use crate::text::metrics::TextRasterizer;

/// Monotonically increasing request identifier. Larger is newer.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct Generation(pub u64);

/// Result of a compositing request.
#[derive(Clone, Debug)]
pub enum RenderOutcome {
    /// The request was still current and produced a new render.
    Rendered {
        /// Request that produced the image.
        generation: Generation,
        /// The composited image.
        image: Arc<RenderedImage>,
    },
    /// A newer request started while this one was decoding; its result was dropped.
    Superseded {
        /// Request that was dropped.
        generation: Generation,
        /// Newest request at the time of the check.
        current: Generation,
    },
}

impl RenderOutcome {
    /// The rendered image, if the request was still current.
    pub fn image(&self) -> Option<&Arc<RenderedImage>> {
        match self {
            RenderOutcome::Rendered { image, .. } => Some(image),
            RenderOutcome::Superseded { .. } => None,
        }
    }
}

/// Serializes compositing requests from an interactive editor.
///
/// Every request is tagged with a [`Generation`]. Decoding is the only await point; once a
/// decode completes the request is dropped if a newer generation has started, otherwise it
/// is composited synchronously and stored as the last valid render.
pub struct RenderSession<T = ParleyTextEngine> {
    compositor: Mutex<Compositor<T>>,
    latest: AtomicU64,
    last_rendered: Mutex<Option<(Generation, Arc<RenderedImage>)>>,
}

impl Default for RenderSession<ParleyTextEngine> {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderSession<ParleyTextEngine> {
    /// Session backed by system fonts.
    pub fn new() -> Self {
        Self::with_compositor(Compositor::new())
    }
}

impl<T: TextRasterizer> RenderSession<T> {
    /// Session around an existing compositor.
    pub fn with_compositor(compositor: Compositor<T>) -> Self {
        Self {
            compositor: Mutex::new(compositor),
            latest: AtomicU64::new(0),
            last_rendered: Mutex::new(None),
        }
    }

    /// Start a new request, superseding every earlier one.
    pub fn begin(&self) -> Generation {
        Generation(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Newest generation handed out so far (`Generation(0)` before the first request).
    pub fn current(&self) -> Generation {
        Generation(self.latest.load(Ordering::SeqCst))
    }

    /// Whether `generation` is still the newest request.
    pub fn is_current(&self, generation: Generation) -> bool {
        self.current() == generation
    }

    /// [`RenderSession::begin`] followed by [`RenderSession::render`].
    pub async fn submit(
        &self,
        bytes: Vec<u8>,
        spec: SignatureSpec,
    ) -> SignetResult<RenderOutcome> {
        let generation = self.begin();
        self.render(generation, bytes, spec).await
    }

    /// Decode `bytes`, then composite `spec` if `generation` is still current.
    ///
    /// A decode failure is returned as [`SignetError::Decode`] and leaves the last valid
    /// render in place.
    #[tracing::instrument(skip(self, bytes, spec), fields(len = bytes.len()))]
    pub async fn render(
        &self,
        generation: Generation,
        bytes: Vec<u8>,
        spec: SignatureSpec,
    ) -> SignetResult<RenderOutcome> {
        let source = match decode_image_async(bytes).await {
            Ok(source) => source,
            // Nobody is waiting on a stale request's failure either.
            Err(err) => return self.superseded(generation).map(Ok).unwrap_or(Err(err)),
        };
        self.rerender(generation, &source, &spec)
    }

    /// Composite `spec` onto an already-decoded `source` if `generation` is still current.
    pub fn rerender(
        &self,
        generation: Generation,
        source: &SourceImage,
        spec: &SignatureSpec,
    ) -> SignetResult<RenderOutcome> {
        if let Some(outcome) = self.superseded(generation) {
            return Ok(outcome);
        }

        let image = {
            let mut compositor = self
                .compositor
                .lock()
                .map_err(|_| SignetError::render("compositor lock poisoned"))?;
            Arc::new(compositor.composite(source, spec)?)
        };

        let mut slot = self
            .last_rendered
            .lock()
            .map_err(|_| SignetError::render("render slot lock poisoned"))?;
        // A newer request may have started while compositing.
        if let Some(outcome) = self.superseded(generation) {
            return Ok(outcome);
        }
        *slot = Some((generation, Arc::clone(&image)));
        Ok(RenderOutcome::Rendered { generation, image })
    }

    /// Last valid render, if any.
    pub fn last_rendered(&self) -> Option<Arc<RenderedImage>> {
        self.last_rendered
            .lock()
            .ok()
            .and_then(|slot| slot.as_ref().map(|(_, img)| Arc::clone(img)))
    }

    /// PNG bytes of the last valid render.
    ///
    /// Refused up front with [`SignetError::NoSource`] when nothing has been rendered yet.
    pub fn export_png(&self) -> SignetResult<Vec<u8>> {
        let image = self.last_rendered().ok_or(SignetError::NoSource)?;
        image.encode_png()
    }

    fn superseded(&self, generation: Generation) -> Option<RenderOutcome> {
        let current = self.current();
        if current == generation {
            return None;
        }
        tracing::debug!(
            generation = generation.0,
            current = current.0,
            "dropping superseded render"
        );
        Some(RenderOutcome::Superseded {
            generation,
            current,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/render_session.rs"]
mod tests;
