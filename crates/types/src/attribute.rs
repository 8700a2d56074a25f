//! Attribute names understood by the progress arc

use serde::{Deserialize, Serialize};
use std::fmt;

/// One entry of the fixed attribute table.
///
/// Each variant owns exactly one parse + clamp rule in the validator.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Attribute {
    Percentage,
    Label,
    Size,
    Thickness,
    Color,
    BgColor,
    LabelSize,
    ValueSize,
    StartAngle,
    Direction,
    FontFamily,
    FontWeight,
    ProgressCap,
    BackgroundOpacity,
    Duration,
    DecimalPlaces,
    LabelColor,
    ValueColor,
    LabelPosition,
    ValuePosition,
}

impl Attribute {
    /// All attributes in table order.
    /// `Size` precedes `Thickness`, matching the order a batch is resolved in.
    pub const ALL: [Attribute; 20] = [
        Attribute::Percentage,
        Attribute::Label,
        Attribute::Size,
        Attribute::Thickness,
        Attribute::Color,
        Attribute::BgColor,
        Attribute::LabelSize,
        Attribute::ValueSize,
        Attribute::StartAngle,
        Attribute::Direction,
        Attribute::FontFamily,
        Attribute::FontWeight,
        Attribute::ProgressCap,
        Attribute::BackgroundOpacity,
        Attribute::Duration,
        Attribute::DecimalPlaces,
        Attribute::LabelColor,
        Attribute::ValueColor,
        Attribute::LabelPosition,
        Attribute::ValuePosition,
    ];

    /// Look up an attribute by its markup name.
    ///
    /// `animation-duration` is accepted as an alias of `duration`.
    pub fn from_name(name: &str) -> Option<Self> {
        let attribute = match name.trim().to_ascii_lowercase().as_str() {
            "percentage" => Attribute::Percentage,
            "label" => Attribute::Label,
            "size" => Attribute::Size,
            "thickness" => Attribute::Thickness,
            "color" => Attribute::Color,
            "bg-color" => Attribute::BgColor,
            "label-size" => Attribute::LabelSize,
            "value-size" => Attribute::ValueSize,
            "start-angle" => Attribute::StartAngle,
            "direction" => Attribute::Direction,
            "font-family" => Attribute::FontFamily,
            "font-weight" => Attribute::FontWeight,
            "progress-cap" => Attribute::ProgressCap,
            "background-opacity" => Attribute::BackgroundOpacity,
            "duration" | "animation-duration" => Attribute::Duration,
            "decimal-places" => Attribute::DecimalPlaces,
            "label-color" => Attribute::LabelColor,
            "value-color" => Attribute::ValueColor,
            "label-position" => Attribute::LabelPosition,
            "value-position" => Attribute::ValuePosition,
            _ => return None,
        };
        Some(attribute)
    }

    /// Canonical markup name
    pub fn name(&self) -> &'static str {
        match self {
            Attribute::Percentage => "percentage",
            Attribute::Label => "label",
            Attribute::Size => "size",
            Attribute::Thickness => "thickness",
            Attribute::Color => "color",
            Attribute::BgColor => "bg-color",
            Attribute::LabelSize => "label-size",
            Attribute::ValueSize => "value-size",
            Attribute::StartAngle => "start-angle",
            Attribute::Direction => "direction",
            Attribute::FontFamily => "font-family",
            Attribute::FontWeight => "font-weight",
            Attribute::ProgressCap => "progress-cap",
            Attribute::BackgroundOpacity => "background-opacity",
            Attribute::Duration => "duration",
            Attribute::DecimalPlaces => "decimal-places",
            Attribute::LabelColor => "label-color",
            Attribute::ValueColor => "value-color",
            Attribute::LabelPosition => "label-position",
            Attribute::ValuePosition => "value-position",
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_round_trip() {
        for attribute in Attribute::ALL {
            assert_eq!(Attribute::from_name(attribute.name()), Some(attribute));
        }
    }

    #[test]
    fn test_legacy_duration_alias() {
        assert_eq!(
            Attribute::from_name("animation-duration"),
            Some(Attribute::Duration)
        );
    }

    #[test]
    fn test_unknown_name() {
        assert_eq!(Attribute::from_name("stroke"), None);
    }

    #[test]
    fn test_size_applied_before_thickness() {
        let size = Attribute::ALL.iter().position(|a| *a == Attribute::Size);
        let thickness = Attribute::ALL.iter().position(|a| *a == Attribute::Thickness);
        assert!(size < thickness);
    }
}
