use std::io::Cursor;
use std::path::Path;

use anyhow::Context as _;
use image::ImageEncoder as _;

use crate::foundation::core::ImageSize;
use crate::foundation::error::{SignetError, SignetResult};

/// Owned compositing output: straight RGBA8 with the source image's dimensions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderedImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Straight RGBA8 pixels, row-major, tightly packed.
    pub data: Vec<u8>,
}

impl RenderedImage {
    /// Width and height.
    pub fn size(&self) -> ImageSize {
        ImageSize::new(self.width, self.height)
    }

    /// Pixel at `(x, y)`, or `None` outside the image.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        self.data
            .get(i..i + 4)
            .map(|px| [px[0], px[1], px[2], px[3]])
    }

    /// Encode as a lossless PNG with alpha.
    pub fn encode_png(&self) -> SignetResult<Vec<u8>> {
        let expected = self
            .size()
            .rgba8_len()
            .ok_or_else(|| SignetError::encode("image buffer size overflow"))?;
        if self.data.len() != expected {
            return Err(SignetError::encode(
                "rendered buffer does not match width*height*4",
            ));
        }

        let mut out = Vec::new();
        image::codecs::png::PngEncoder::new(Cursor::new(&mut out))
            .write_image(
                &self.data,
                self.width,
                self.height,
                image::ExtendedColorType::Rgba8,
            )
            .map_err(|e| SignetError::encode(e.to_string()))?;
        Ok(out)
    }

    /// Encode as PNG and write to `path`, creating parent directories as needed.
    pub fn write_png(&self, path: &Path) -> SignetResult<()> {
        let png = self.encode_png()?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create output dir '{}'", parent.display()))?;
        }
        std::fs::write(path, png).with_context(|| format!("write png '{}'", path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/encode.rs"]
mod tests;
