use std::sync::Arc;

use crate::foundation::core::ImageSize;
use crate::foundation::error::{SignetError, SignetResult};

/// Immutable decoded bitmap supplied by the caller.
///
/// Pixels are straight (non-premultiplied) RGBA8, row-major and tightly packed. The buffer is
/// shared behind an [`Arc`] and never written to; every render works on its own copy.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceImage {
    width: u32,
    height: u32,
    rgba8: Arc<Vec<u8>>,
}

impl SourceImage {
    /// Wrap raw straight RGBA8 pixels. Both dimensions must be at least 1.
    pub fn from_rgba8(width: u32, height: u32, rgba8: Vec<u8>) -> SignetResult<Self> {
        if width == 0 || height == 0 {
            return Err(SignetError::decode("image dimensions must be >= 1"));
        }
        let expected = ImageSize::new(width, height)
            .rgba8_len()
            .ok_or_else(|| SignetError::decode("image buffer size overflow"))?;
        if rgba8.len() != expected {
            return Err(SignetError::decode(format!(
                "expected {expected} bytes of RGBA8, got {}",
                rgba8.len()
            )));
        }
        Ok(Self {
            width,
            height,
            rgba8: Arc::new(rgba8),
        })
    }

    /// Wrap an `image` crate RGBA buffer.
    pub fn from_rgba_image(img: image::RgbaImage) -> SignetResult<Self> {
        let (width, height) = img.dimensions();
        Self::from_rgba8(width, height, img.into_raw())
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Width and height.
    pub fn size(&self) -> ImageSize {
        ImageSize::new(self.width, self.height)
    }

    /// Raw straight RGBA8 pixels.
    pub fn rgba8(&self) -> &[u8] {
        &self.rgba8
    }

    /// Pixel at `(x, y)`, or `None` outside the image.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        Some([
            self.rgba8[i],
            self.rgba8[i + 1],
            self.rgba8[i + 2],
            self.rgba8[i + 3],
        ])
    }
}

/// Decode any format the `image` crate recognises (sniffed from the bytes) into RGBA8.
#[tracing::instrument(skip(bytes), fields(len = bytes.len()))]
pub fn decode_image(bytes: &[u8]) -> SignetResult<SourceImage> {
    if bytes.is_empty() {
        return Err(SignetError::decode("image bytes are empty"));
    }
    let dyn_img =
        image::load_from_memory(bytes).map_err(|e| SignetError::decode(e.to_string()))?;
    SourceImage::from_rgba_image(dyn_img.to_rgba8())
}

/// Decode on a helper thread and resolve when the bitmap is ready.
///
/// This is the only suspension point of a compositing request.
pub async fn decode_image_async(bytes: Vec<u8>) -> SignetResult<SourceImage> {
    let (tx, rx) = futures::channel::oneshot::channel();
    std::thread::Builder::new()
        .name("signet-decode".to_owned())
        .spawn(move || {
            // Receiver gone means the request was abandoned.
            let _ = tx.send(decode_image(&bytes));
        })
        .map_err(|e| SignetError::decode(format!("spawn decode thread: {e}")))?;

    rx.await
        .map_err(|_| SignetError::decode("decode worker exited without a result"))?
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
