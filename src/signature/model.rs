use std::fmt;
use std::io::Read;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::foundation::core::Rgba8;
use crate::foundation::error::{SignetError, SignetResult};

/// Named reference point used to position the signature box inside the image.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Anchor {
    /// Top-left corner, inset by the padding.
    #[serde(alias = "tl")]
    TopLeft,
    /// Top-right corner, inset by the padding.
    #[serde(alias = "tr")]
    TopRight,
    /// Bottom-left corner, inset by the padding.
    #[serde(alias = "bl")]
    BottomLeft,
    /// Bottom-right corner, inset by the padding.
    #[default]
    #[serde(alias = "br")]
    BottomRight,
    /// Exact center of the image; padding is ignored.
    #[serde(alias = "c")]
    Center,
}

impl Anchor {
    /// All supported anchors, corners first.
    pub const ALL: [Anchor; 5] = [
        Anchor::TopLeft,
        Anchor::TopRight,
        Anchor::BottomLeft,
        Anchor::BottomRight,
        Anchor::Center,
    ];

    /// Stable snake_case name.
    pub fn as_str(self) -> &'static str {
        match self {
            Anchor::TopLeft => "top_left",
            Anchor::TopRight => "top_right",
            Anchor::BottomLeft => "bottom_left",
            Anchor::BottomRight => "bottom_right",
            Anchor::Center => "center",
        }
    }
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Anchor {
    type Err = SignetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let norm = s.trim().to_ascii_lowercase().replace('-', "_");
        match norm.as_str() {
            "top_left" | "topleft" | "tl" => Ok(Anchor::TopLeft),
            "top_right" | "topright" | "tr" => Ok(Anchor::TopRight),
            "bottom_left" | "bottomleft" | "bl" => Ok(Anchor::BottomLeft),
            "bottom_right" | "bottomright" | "br" => Ok(Anchor::BottomRight),
            "center" | "centre" | "c" => Ok(Anchor::Center),
            _ => Err(SignetError::validation(format!("unknown anchor \"{s}\""))),
        }
    }
}

/// Blurred, offset copy of the text drawn beneath it for legibility.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ShadowSpec {
    /// Blur radius in pixels.
    pub blur_px: f64,
    /// Horizontal offset in pixels (positive is right).
    pub offset_x_px: f64,
    /// Vertical offset in pixels (positive is down).
    pub offset_y_px: f64,
    /// Shadow color.
    pub color: Rgba8,
    /// Shadow strength in `[0, 1]`, clamped at use time.
    pub alpha: f32,
}

impl Default for ShadowSpec {
    fn default() -> Self {
        Self {
            blur_px: 4.0,
            offset_x_px: 2.0,
            offset_y_px: 2.0,
            color: Rgba8::BLACK,
            alpha: 0.5,
        }
    }
}

/// How size-like parameters relate to the source image resolution.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scaling {
    /// Sizes are absolute pixels.
    #[default]
    Fixed,
    /// Sizes are relative to an image `reference_width_px` wide.
    ResolutionAdaptive {
        /// Image width at which sizes apply unscaled.
        reference_width_px: f64,
        /// Lower bound for the scaled font size.
        min_font_px: f64,
    },
}

impl Scaling {
    /// Reference width used by [`Scaling::adaptive`].
    pub const REFERENCE_WIDTH_PX: f64 = 1200.0;
    /// Font size floor used by [`Scaling::adaptive`].
    pub const MIN_FONT_PX: f64 = 12.0;

    /// Resolution-adaptive scaling against a 1200 px reference with a 12 px font floor.
    pub fn adaptive() -> Self {
        Scaling::ResolutionAdaptive {
            reference_width_px: Self::REFERENCE_WIDTH_PX,
            min_font_px: Self::MIN_FONT_PX,
        }
    }
}

/// Text plus style and anchor, rebuilt by the caller for every compositing request.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SignatureSpec {
    /// Signature text; whitespace-only text renders nothing.
    pub text: String,
    /// Font size in pixels.
    pub font_size_px: f64,
    /// Global opacity in `[0, 1]`, clamped at use time.
    pub opacity: f32,
    /// Distance from the image edge to the text box edge.
    pub padding_px: f64,
    /// Text color.
    pub color: Rgba8,
    /// Where the text box is placed.
    pub anchor: Anchor,
    /// Optional legibility shadow.
    pub shadow: Option<ShadowSpec>,
    /// Fixed or resolution-adaptive sizing.
    pub scaling: Scaling,
}

impl Default for SignatureSpec {
    fn default() -> Self {
        Self {
            text: String::new(),
            font_size_px: 32.0,
            opacity: 0.7,
            padding_px: 24.0,
            color: Rgba8::WHITE,
            anchor: Anchor::BottomRight,
            shadow: None,
            scaling: Scaling::Fixed,
        }
    }
}

impl SignatureSpec {
    /// Spec with the given text and default styling.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// Set the font size in pixels.
    pub fn with_font_size(mut self, px: f64) -> Self {
        self.font_size_px = px;
        self
    }

    /// Set the global opacity.
    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }

    /// Set the edge padding in pixels.
    pub fn with_padding(mut self, px: f64) -> Self {
        self.padding_px = px;
        self
    }

    /// Set the text color.
    pub fn with_color(mut self, color: Rgba8) -> Self {
        self.color = color;
        self
    }

    /// Set the anchor.
    pub fn with_anchor(mut self, anchor: Anchor) -> Self {
        self.anchor = anchor;
        self
    }

    /// Attach a legibility shadow.
    pub fn with_shadow(mut self, shadow: ShadowSpec) -> Self {
        self.shadow = Some(shadow);
        self
    }

    /// Choose fixed or resolution-adaptive sizing.
    pub fn with_scaling(mut self, scaling: Scaling) -> Self {
        self.scaling = scaling;
        self
    }

    /// Parse a spec from JSON text. Missing fields take their defaults.
    pub fn from_json_str(s: &str) -> SignetResult<Self> {
        serde_json::from_str(s).map_err(|e| SignetError::serde(e.to_string()))
    }

    /// Parse a spec from a JSON reader.
    pub fn from_json_reader(r: impl Read) -> SignetResult<Self> {
        serde_json::from_reader(r).map_err(|e| SignetError::serde(e.to_string()))
    }

    /// Serialize as pretty-printed JSON.
    pub fn to_json_pretty(&self) -> SignetResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| SignetError::serde(e.to_string()))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/signature/model.rs"]
mod tests;
