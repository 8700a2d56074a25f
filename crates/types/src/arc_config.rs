//! Progress arc configuration types

use serde::{Deserialize, Serialize};

use crate::color::HexColor;

/// Direction the filled arc grows from the start angle
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum Direction {
    #[serde(rename = "clockwise")]
    #[default]
    Clockwise,
    #[serde(rename = "counterclockwise")]
    Counterclockwise,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Clockwise => "clockwise",
            Direction::Counterclockwise => "counterclockwise",
        }
    }
}

/// Placement of the label or value text relative to the ring
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum TextPosition {
    #[serde(rename = "inside")]
    #[default]
    Inside,
    #[serde(rename = "top")]
    Top,
    #[serde(rename = "bottom")]
    Bottom,
    #[serde(rename = "left")]
    Left,
    #[serde(rename = "right")]
    Right,
}

impl TextPosition {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "inside" => Some(TextPosition::Inside),
            "top" => Some(TextPosition::Top),
            "bottom" => Some(TextPosition::Bottom),
            "left" => Some(TextPosition::Left),
            "right" => Some(TextPosition::Right),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TextPosition::Inside => "inside",
            TextPosition::Top => "top",
            TextPosition::Bottom => "bottom",
            TextPosition::Left => "left",
            TextPosition::Right => "right",
        }
    }
}

/// Progress arc end cap style (maps to `stroke-linecap`)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum ProgressCap {
    #[serde(rename = "round")]
    #[default]
    Round,
    #[serde(rename = "butt")]
    Butt, // Square/flat end at the arc boundary
    #[serde(rename = "square")]
    Square, // Flat end extended by half the thickness
}

impl ProgressCap {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "round" => Some(ProgressCap::Round),
            "butt" => Some(ProgressCap::Butt),
            "square" => Some(ProgressCap::Square),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ProgressCap::Round => "round",
            ProgressCap::Butt => "butt",
            ProgressCap::Square => "square",
        }
    }
}

/// Validated progress arc configuration.
///
/// Every field holds an already clamped value; the validator in
/// `progress-arc-core` is the only writer that starts from raw attributes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ArcConfig {
    // Value
    #[serde(default)]
    pub percentage: f64, // 0.0 to 100.0
    #[serde(default)]
    pub decimal_places: u32,

    // Geometry
    #[serde(default = "default_size")]
    pub size: f64, // Diameter in px
    #[serde(default = "default_thickness")]
    pub thickness: f64, // Stroke width in px, at most size / 2
    #[serde(default = "default_start_angle")]
    pub start_angle: f64, // Degrees (0 = right, -90 = top)
    #[serde(default)]
    pub direction: Direction,
    #[serde(default)]
    pub progress_cap: ProgressCap,

    // Colors
    #[serde(default = "default_color")]
    pub color: HexColor,
    #[serde(default = "default_background_color")]
    pub background_color: HexColor,
    #[serde(default = "default_background_opacity")]
    pub background_opacity: f64, // 0.0 to 1.0
    #[serde(default = "default_text_color")]
    pub label_color: HexColor,
    #[serde(default = "default_text_color")]
    pub value_color: HexColor,

    // Text
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub label_position: TextPosition,
    #[serde(default)]
    pub value_position: TextPosition,
    #[serde(default = "default_label_size")]
    pub label_size: f64,
    #[serde(default = "default_value_size")]
    pub value_size: f64,
    #[serde(default = "default_font_family")]
    pub font_family: String,
    #[serde(default = "default_font_weight")]
    pub font_weight: String,

    // Animation
    #[serde(default = "default_duration")]
    pub duration: f64, // Milliseconds, 0 disables animation
}

pub fn default_size() -> f64 {
    200.0
}

pub fn default_thickness() -> f64 {
    20.0
}

pub fn default_start_angle() -> f64 {
    -90.0 // Top
}

pub fn default_color() -> HexColor {
    HexColor::from_static("#7c3aed")
}

pub fn default_background_color() -> HexColor {
    HexColor::from_static("#e0e0e0")
}

pub fn default_background_opacity() -> f64 {
    1.0
}

pub fn default_text_color() -> HexColor {
    HexColor::from_static("#000000")
}

pub fn default_label_size() -> f64 {
    14.0
}

pub fn default_value_size() -> f64 {
    36.0
}

pub fn default_font_family() -> String {
    "Arial, sans-serif".to_string()
}

pub fn default_font_weight() -> String {
    "bold".to_string()
}

pub fn default_duration() -> f64 {
    1500.0
}

impl Default for ArcConfig {
    fn default() -> Self {
        Self {
            percentage: 0.0,
            decimal_places: 0,
            size: default_size(),
            thickness: default_thickness(),
            start_angle: default_start_angle(),
            direction: Direction::default(),
            progress_cap: ProgressCap::default(),
            color: default_color(),
            background_color: default_background_color(),
            background_opacity: default_background_opacity(),
            label_color: default_text_color(),
            value_color: default_text_color(),
            label: String::new(),
            label_position: TextPosition::default(),
            value_position: TextPosition::default(),
            label_size: default_label_size(),
            value_size: default_value_size(),
            font_family: default_font_family(),
            font_weight: default_font_weight(),
            duration: default_duration(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_documented_values() {
        let config = ArcConfig::default();
        assert_eq!(config.size, 200.0);
        assert_eq!(config.thickness, 20.0);
        assert_eq!(config.color.as_str(), "#7c3aed");
        assert_eq!(config.background_color.as_str(), "#e0e0e0");
        assert_eq!(config.start_angle, -90.0);
        assert_eq!(config.direction, Direction::Clockwise);
        assert_eq!(config.duration, 1500.0);
        assert_eq!(config.progress_cap, ProgressCap::Round);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config: ArcConfig =
            serde_json::from_str(r#"{"percentage": 42.0, "direction": "counterclockwise"}"#)
                .unwrap();
        assert_eq!(config.percentage, 42.0);
        assert_eq!(config.direction, Direction::Counterclockwise);
        assert_eq!(config.size, default_size());
        assert_eq!(config.font_family, "Arial, sans-serif");
    }

    #[test]
    fn test_text_position_parse() {
        assert_eq!(TextPosition::parse("Top"), Some(TextPosition::Top));
        assert_eq!(TextPosition::parse(" right "), Some(TextPosition::Right));
        assert_eq!(TextPosition::parse("middle"), None);
    }
}
