use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::foundation::core::Rgba8;
use crate::foundation::error::{SignetError, SignetResult};

const NAMED: &[(&str, Rgba8)] = &[
    ("white", Rgba8::rgb(255, 255, 255)),
    ("black", Rgba8::rgb(0, 0, 0)),
    ("red", Rgba8::rgb(255, 0, 0)),
    ("green", Rgba8::rgb(0, 128, 0)),
    ("lime", Rgba8::rgb(0, 255, 0)),
    ("blue", Rgba8::rgb(0, 0, 255)),
    ("yellow", Rgba8::rgb(255, 255, 0)),
    ("cyan", Rgba8::rgb(0, 255, 255)),
    ("aqua", Rgba8::rgb(0, 255, 255)),
    ("magenta", Rgba8::rgb(255, 0, 255)),
    ("fuchsia", Rgba8::rgb(255, 0, 255)),
    ("gray", Rgba8::rgb(128, 128, 128)),
    ("grey", Rgba8::rgb(128, 128, 128)),
    ("silver", Rgba8::rgb(192, 192, 192)),
    ("orange", Rgba8::rgb(255, 165, 0)),
    ("pink", Rgba8::rgb(255, 192, 203)),
    ("hotpink", Rgba8::rgb(255, 105, 180)),
    ("purple", Rgba8::rgb(128, 0, 128)),
    ("navy", Rgba8::rgb(0, 0, 128)),
    ("teal", Rgba8::rgb(0, 128, 128)),
    ("maroon", Rgba8::rgb(128, 0, 0)),
    ("olive", Rgba8::rgb(128, 128, 0)),
    ("transparent", Rgba8::rgba(0, 0, 0, 0)),
];

/// Parse a CSS-style color: `#rgb`, `#rrggbb`, `#rrggbbaa` or a basic named color.
pub fn parse_color(s: &str) -> SignetResult<Rgba8> {
    let s = s.trim();
    if let Some(hex) = s.strip_prefix('#') {
        return parse_hex(hex).map_err(SignetError::validation);
    }

    let lower = s.to_ascii_lowercase();
    if let Some((_, c)) = NAMED.iter().find(|(name, _)| *name == lower) {
        return Ok(*c);
    }

    // Bare hex digits are accepted too ("ff4da6").
    if matches!(s.len(), 3 | 6 | 8) && s.chars().all(|c| c.is_ascii_hexdigit()) {
        return parse_hex(s).map_err(SignetError::validation);
    }

    Err(SignetError::validation(format!("unknown color \"{s}\"")))
}

fn parse_hex(s: &str) -> Result<Rgba8, String> {
    fn hex_byte(pair: &str) -> Result<u8, String> {
        u8::from_str_radix(pair, 16).map_err(|_| format!("invalid hex byte \"{pair}\""))
    }

    if !s.is_ascii() {
        return Err(format!("invalid hex color \"#{s}\""));
    }

    match s.len() {
        3 => {
            let mut ch = [0u8; 3];
            for (i, c) in s.chars().enumerate() {
                let nib = hex_byte(&c.to_string())?;
                ch[i] = nib * 17;
            }
            Ok(Rgba8::rgb(ch[0], ch[1], ch[2]))
        }
        6 => Ok(Rgba8::rgb(
            hex_byte(&s[0..2])?,
            hex_byte(&s[2..4])?,
            hex_byte(&s[4..6])?,
        )),
        8 => Ok(Rgba8::rgba(
            hex_byte(&s[0..2])?,
            hex_byte(&s[2..4])?,
            hex_byte(&s[4..6])?,
            hex_byte(&s[6..8])?,
        )),
        _ => Err("hex color must be #RGB, #RRGGBB or #RRGGBBAA (case-insensitive)".to_owned()),
    }
}

fn unit_to_u8(x: f64) -> u8 {
    if x.is_nan() {
        return 0;
    }
    (x.clamp(0.0, 1.0) * 255.0).round() as u8
}

impl FromStr for Rgba8 {
    type Err = SignetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_color(s)
    }
}

impl Serialize for Rgba8 {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Rgba8 {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Css(String),
            RgbaObj {
                r: f64,
                g: f64,
                b: f64,
                #[serde(default = "one")]
                a: f64,
            },
            Arr(Vec<f64>),
        }

        fn one() -> f64 {
            1.0
        }

        match Repr::deserialize(deserializer)? {
            Repr::Css(s) => parse_color(&s).map_err(serde::de::Error::custom),
            Repr::RgbaObj { r, g, b, a } => Ok(Rgba8::rgba(
                unit_to_u8(r),
                unit_to_u8(g),
                unit_to_u8(b),
                unit_to_u8(a),
            )),
            Repr::Arr(v) => match v.as_slice() {
                [r, g, b] => Ok(Rgba8::rgb(unit_to_u8(*r), unit_to_u8(*g), unit_to_u8(*b))),
                [r, g, b, a] => Ok(Rgba8::rgba(
                    unit_to_u8(*r),
                    unit_to_u8(*g),
                    unit_to_u8(*b),
                    unit_to_u8(*a),
                )),
                _ => Err(serde::de::Error::custom(
                    "rgba array must have len 3 ([r,g,b]) or 4 ([r,g,b,a])",
                )),
            },
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/signature/color.rs"]
mod tests;
