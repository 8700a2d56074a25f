//! Foundational color types used by the progress arc.
//!
//! Colors arrive as untrusted attribute strings. [`HexColor`] is the only way
//! a string becomes a stroke/fill color, so every color held by a validated
//! configuration is known to match `#RGB` or `#RRGGBB`.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Strict `#RGB` / `#RRGGBB` pattern (case-insensitive hex digits)
static HEX_COLOR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^#(?:[0-9a-fA-F]{3}){1,2}$").expect("hex color pattern is valid")
});

/// A validated hex color string.
///
/// The original spelling is preserved (`#FF0000` stays `#FF0000`), so the
/// rendered stroke matches what the host set.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct HexColor(String);

impl HexColor {
    /// Parse a hex color, returning `None` for anything outside the strict pattern.
    pub fn parse(raw: &str) -> Option<Self> {
        if HEX_COLOR_RE.is_match(raw) {
            Some(Self(raw.to_string()))
        } else {
            None
        }
    }

    /// Build from a literal known to be valid. Used for defaults.
    pub(crate) fn from_static(raw: &'static str) -> Self {
        debug_assert!(HEX_COLOR_RE.is_match(raw), "invalid built-in color {raw}");
        Self(raw.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert to an RGBA color (fully opaque)
    pub fn to_color(&self) -> Color {
        let digits = &self.0[1..];
        let channel = |s: &str| u8::from_str_radix(s, 16).unwrap_or(0);
        let (r, g, b) = if digits.len() == 3 {
            // #RGB expands each nibble: #f80 == #ff8800
            let expand = |i: usize| channel(&digits[i..i + 1]) * 17;
            (expand(0), expand(1), expand(2))
        } else {
            (
                channel(&digits[0..2]),
                channel(&digits[2..4]),
                channel(&digits[4..6]),
            )
        };
        Color::from_rgba8(r, g, b, 255)
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for HexColor {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        HexColor::parse(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid hex color: {raw}")))
    }
}

/// RGBA color with alpha channel
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Color {
    pub fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    pub fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            r: r as f64 / 255.0,
            g: g as f64 / 255.0,
            b: b as f64 / 255.0,
            a: a as f64 / 255.0,
        }
    }

    pub fn to_rgba8(&self) -> (u8, u8, u8, u8) {
        (
            (self.r * 255.0).round() as u8,
            (self.g * 255.0).round() as u8,
            (self.b * 255.0).round() as u8,
            (self.a * 255.0).round() as u8,
        )
    }

    /// Same color with a different alpha
    pub fn with_alpha(self, a: f64) -> Self {
        Self {
            a: a.clamp(0.0, 1.0),
            ..self
        }
    }

    /// Apply to Cairo context
    #[cfg(feature = "cairo")]
    pub fn apply_to_cairo(&self, cr: &cairo::Context) {
        cr.set_source_rgba(self.r, self.g, self.b, self.a);
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::new(0.0, 0.0, 0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_short_and_long_forms() {
        assert!(HexColor::parse("#fff").is_some());
        assert!(HexColor::parse("#7c3aed").is_some());
        assert!(HexColor::parse("#FF0000").is_some());
    }

    #[test]
    fn test_rejects_malformed_colors() {
        for raw in ["invalid", "", "#", "#ff", "#ffff", "#fffffff", "fff", "#ggg", " #fff", "red"] {
            assert!(HexColor::parse(raw).is_none(), "{raw:?} should be rejected");
        }
    }

    #[test]
    fn test_preserves_spelling() {
        assert_eq!(HexColor::parse("#FF0000").unwrap().as_str(), "#FF0000");
    }

    #[test]
    fn test_to_color_expands_short_form() {
        let short = HexColor::parse("#f80").unwrap().to_color();
        let long = HexColor::parse("#ff8800").unwrap().to_color();
        assert_eq!(short, long);
        assert_eq!(long.to_rgba8(), (255, 136, 0, 255));
    }

    #[test]
    fn test_deserialize_rejects_invalid() {
        assert!(serde_json::from_str::<HexColor>("\"#00ff00\"").is_ok());
        assert!(serde_json::from_str::<HexColor>("\"green\"").is_err());
    }
}
