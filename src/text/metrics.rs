use crate::foundation::core::{Rect, Size};
use crate::foundation::error::{SignetError, SignetResult};

/// Measured box of a single line of signature text.
///
/// `height` is the font size, not the true ascent + descent; vertical layout only needs a
/// stable box height.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextExtent {
    /// Advance width of the laid-out line in pixels.
    pub width: f64,
    /// Box height in pixels (equal to the font size).
    pub height: f64,
}

impl TextExtent {
    /// Extent as a kurbo [`Size`].
    pub fn as_size(self) -> Size {
        Size::new(self.width, self.height)
    }
}

/// 8-bit glyph coverage for one line of text.
///
/// Mask pixel `(0, 0)` sits at `(offset_x, offset_y)` relative to the text box's top-left
/// corner; offsets are usually negative to leave room for antialiasing and glyph overhang.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CoverageMask {
    /// Mask width in pixels.
    pub width: u32,
    /// Mask height in pixels.
    pub height: u32,
    /// Horizontal position of the mask origin relative to the text box.
    pub offset_x: i32,
    /// Vertical position of the mask origin relative to the text box.
    pub offset_y: i32,
    /// Row-major coverage values, `width * height` bytes.
    pub data: Vec<u8>,
}

impl CoverageMask {
    /// Zero-coverage mask of the given size.
    pub fn empty(width: u32, height: u32, offset_x: i32, offset_y: i32) -> Self {
        Self {
            width,
            height,
            offset_x,
            offset_y,
            data: vec![0; width as usize * height as usize],
        }
    }

    /// Build a mask from raw coverage bytes.
    pub fn from_parts(
        width: u32,
        height: u32,
        offset_x: i32,
        offset_y: i32,
        data: Vec<u8>,
    ) -> SignetResult<Self> {
        if data.len() != width as usize * height as usize {
            return Err(SignetError::render(
                "coverage mask expects width*height bytes",
            ));
        }
        Ok(Self {
            width,
            height,
            offset_x,
            offset_y,
            data,
        })
    }

    /// Coverage at mask coordinates, 0 outside the mask.
    #[cfg(test)]
    pub(crate) fn get(&self, x: i64, y: i64) -> u8 {
        if x < 0 || y < 0 || x >= i64::from(self.width) || y >= i64::from(self.height) {
            return 0;
        }
        self.data[y as usize * self.width as usize + x as usize]
    }

    /// True when no pixel has any coverage.
    pub fn is_blank(&self) -> bool {
        self.data.iter().all(|&c| c == 0)
    }

    /// Copy of this mask with `margin` empty pixels added on every side.
    pub fn padded(&self, margin: u32) -> Self {
        let m = margin as usize;
        let w = self.width as usize + 2 * m;
        let h = self.height as usize + 2 * m;
        let mut data = vec![0u8; w * h];
        for y in 0..self.height as usize {
            let src = &self.data[y * self.width as usize..(y + 1) * self.width as usize];
            let start = (y + m) * w + m;
            data[start..start + src.len()].copy_from_slice(src);
        }
        let shift = i32::try_from(margin).unwrap_or(i32::MAX);
        Self {
            width: w as u32,
            height: h as u32,
            offset_x: self.offset_x.saturating_sub(shift),
            offset_y: self.offset_y.saturating_sub(shift),
            data,
        }
    }
}

/// Text measurement and glyph rasterization for a fixed font family stack.
///
/// Implementations lay out `text` on a single unbroken line.
pub trait TextRasterizer {
    /// Measure `text` at `font_size_px`.
    fn measure(&mut self, text: &str, font_size_px: f64) -> SignetResult<TextExtent>;

    /// Rasterize `text` at `font_size_px` into a coverage mask positioned relative to the
    /// top-left of the box reported by [`TextRasterizer::measure`].
    ///
    /// Only coverage inside `clip` (box-local pixels) is needed. Implementations should keep
    /// the mask within it so huge text on a small image stays cheap; a larger mask is still
    /// drawn correctly.
    fn rasterize(
        &mut self,
        text: &str,
        font_size_px: f64,
        clip: Rect,
    ) -> SignetResult<CoverageMask>;
}

impl<T: TextRasterizer + ?Sized> TextRasterizer for &mut T {
    fn measure(&mut self, text: &str, font_size_px: f64) -> SignetResult<TextExtent> {
        (**self).measure(text, font_size_px)
    }

    fn rasterize(
        &mut self,
        text: &str,
        font_size_px: f64,
        clip: Rect,
    ) -> SignetResult<CoverageMask> {
        (**self).rasterize(text, font_size_px, clip)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/metrics.rs"]
mod tests;
