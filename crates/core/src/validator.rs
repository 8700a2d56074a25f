//! Attribute validation
//!
//! Maps raw attribute strings onto clamped, typed configuration values. Every
//! rule is total: a bad input never fails, it falls back (to the field's
//! current value, or to a documented default) and reports a
//! [`ValidationWarning`] the caller may log.
//!
//! Fallback policy per error class:
//! - parse errors keep the last known good value (`percentage` falls back to 0)
//! - range violations are clamped
//! - malformed colors are rejected and the previous color is kept
//!
//! `thickness` is bounded by the *current* `size`, so within one batch `size`
//! is always resolved first (see [`apply_batch`]).

use progress_arc_types::arc_config::{
    default_background_color, default_background_opacity, default_color, default_duration,
    default_font_family, default_font_weight, default_label_size, default_size,
    default_start_angle, default_text_color, default_thickness, default_value_size,
};
use progress_arc_types::{ArcConfig, Attribute, Direction, HexColor, ProgressCap, TextPosition};
use thiserror::Error;

use crate::constants::{
    MAX_DECIMAL_PLACES, MAX_PERCENTAGE, MAX_SIZE, MIN_FONT_SIZE, MIN_PERCENTAGE, MIN_SIZE,
    MIN_THICKNESS,
};

/// Non-fatal diagnostic produced while normalizing an attribute
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationWarning {
    #[error("{attribute}: {raw:?} is not a number, using {kept}")]
    NotANumber {
        attribute: Attribute,
        raw: String,
        kept: f64,
    },
    #[error("{attribute}: {requested} is out of range, clamped to {clamped}")]
    Clamped {
        attribute: Attribute,
        requested: f64,
        clamped: f64,
    },
    #[error("{attribute}: {raw:?} is not a #RGB or #RRGGBB color, keeping {kept}")]
    InvalidColor {
        attribute: Attribute,
        raw: String,
        kept: HexColor,
    },
    #[error("{attribute}: unrecognised value {raw:?}, using {fallback}")]
    UnknownKeyword {
        attribute: Attribute,
        raw: String,
        fallback: &'static str,
    },
    #[error("{attribute}: removed unsafe characters from {raw:?}")]
    Sanitized { attribute: Attribute, raw: String },
}

/// A typed value ready to be stored in the configuration
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Number(f64),
    Integer(u32),
    Color(HexColor),
    Text(String),
    Direction(Direction),
    Position(TextPosition),
    Cap(ProgressCap),
}

/// Result of normalizing one attribute
#[derive(Debug, Clone, PartialEq)]
pub struct Normalized {
    pub value: FieldValue,
    pub warning: Option<ValidationWarning>,
}

impl Normalized {
    fn clean(value: FieldValue) -> Self {
        Self {
            value,
            warning: None,
        }
    }
}

/// Result of applying one or more attribute changes
#[derive(Debug, Clone, PartialEq)]
pub struct Change {
    pub config: ArcConfig,
    pub warnings: Vec<ValidationWarning>,
}

/// Parse the longest leading decimal number, ignoring surrounding whitespace.
///
/// `"200px"` parses as 200 and `" 12.5 "` as 12.5. Returns `None` when no
/// digits lead the string or the result is not finite.
pub fn parse_leading_number(raw: &str) -> Option<f64> {
    let s = raw.trim();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end += 1;
    }
    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        end = frac_end;
    }
    if digits == 0 {
        return None;
    }

    // Exponent only counts when followed by at least one digit
    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && (bytes[exp_end] == b'+' || bytes[exp_end] == b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    let value: f64 = s[..end].parse().ok()?;
    value.is_finite().then_some(value)
}

/// Parse the leading integer (digits only, optional sign), truncating any fraction.
pub fn parse_leading_integer(raw: &str) -> Option<i64> {
    let s = raw.trim();
    let bytes = s.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end += 1;
    }
    let digits_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    if end == digits_start {
        return None;
    }
    s[..end].parse().ok()
}

fn clamp_reported(attribute: Attribute, value: f64, min: f64, max: f64) -> Normalized {
    let clamped = value.clamp(min, max);
    let warning = (clamped != value).then(|| ValidationWarning::Clamped {
        attribute,
        requested: value,
        clamped,
    });
    Normalized {
        value: FieldValue::Number(clamped),
        warning,
    }
}

/// Numeric rule: parse, fall back to `fallback` on failure, then clamp.
fn number_rule(
    attribute: Attribute,
    raw: &str,
    fallback: f64,
    min: f64,
    max: f64,
) -> Normalized {
    match parse_leading_number(raw) {
        Some(value) => clamp_reported(attribute, value, min, max),
        None => {
            // Fallback values are already in range
            let kept = fallback.clamp(min, max);
            let warning = (!raw.trim().is_empty()).then(|| ValidationWarning::NotANumber {
                attribute,
                raw: raw.to_string(),
                kept,
            });
            Normalized {
                value: FieldValue::Number(kept),
                warning,
            }
        }
    }
}

fn color_rule(attribute: Attribute, raw: Option<&str>, current: &HexColor, default: HexColor) -> Normalized {
    let Some(raw) = raw else {
        return Normalized::clean(FieldValue::Color(default));
    };
    match HexColor::parse(raw) {
        Some(color) => Normalized::clean(FieldValue::Color(color)),
        None => Normalized {
            value: FieldValue::Color(current.clone()),
            warning: Some(ValidationWarning::InvalidColor {
                attribute,
                raw: raw.to_string(),
                kept: current.clone(),
            }),
        },
    }
}

/// Strip characters that could escape a CSS declaration
fn css_rule(attribute: Attribute, raw: Option<&str>, default: String) -> Normalized {
    let Some(raw) = raw else {
        return Normalized::clean(FieldValue::Text(default));
    };
    let cleaned: String = raw
        .chars()
        .filter(|c| !matches!(c, ';' | '{' | '}' | '<' | '>' | '"' | '\\'))
        .collect();
    let cleaned = cleaned.trim().to_string();
    let warning = (cleaned != raw.trim()).then(|| ValidationWarning::Sanitized {
        attribute,
        raw: raw.to_string(),
    });
    let value = if cleaned.is_empty() { default } else { cleaned };
    Normalized {
        value: FieldValue::Text(value),
        warning,
    }
}

fn position_rule(attribute: Attribute, raw: Option<&str>) -> Normalized {
    let Some(raw) = raw else {
        return Normalized::clean(FieldValue::Position(TextPosition::default()));
    };
    match TextPosition::parse(raw) {
        Some(position) => Normalized::clean(FieldValue::Position(position)),
        None => Normalized {
            value: FieldValue::Position(TextPosition::default()),
            warning: Some(ValidationWarning::UnknownKeyword {
                attribute,
                raw: raw.to_string(),
                fallback: TextPosition::default().as_str(),
            }),
        },
    }
}

/// Upper bound for thickness given a ring diameter
pub fn max_thickness(size: f64) -> f64 {
    (size / 2.0).max(MIN_THICKNESS)
}

/// Normalize one raw attribute value against the current configuration.
///
/// `raw == None` means the attribute is absent and resolves to its default.
pub fn normalize(attribute: Attribute, raw: Option<&str>, current: &ArcConfig) -> Normalized {
    match attribute {
        Attribute::Percentage => match raw {
            None => Normalized::clean(FieldValue::Number(0.0)),
            // Unlike other numeric fields, an unparseable percentage means 0
            Some(raw) => number_rule(attribute, raw, 0.0, MIN_PERCENTAGE, MAX_PERCENTAGE),
        },
        Attribute::Size => match raw {
            None => Normalized::clean(FieldValue::Number(default_size())),
            Some(raw) => number_rule(attribute, raw, current.size, MIN_SIZE, MAX_SIZE),
        },
        Attribute::Thickness => {
            let max = max_thickness(current.size);
            match raw {
                None => clamp_reported(attribute, default_thickness(), MIN_THICKNESS, max),
                Some(raw) => number_rule(attribute, raw, current.thickness, MIN_THICKNESS, max),
            }
        }
        Attribute::StartAngle => match raw {
            None => Normalized::clean(FieldValue::Number(default_start_angle())),
            Some(raw) => number_rule(attribute, raw, current.start_angle, f64::MIN, f64::MAX),
        },
        Attribute::BackgroundOpacity => match raw {
            None => Normalized::clean(FieldValue::Number(default_background_opacity())),
            Some(raw) => number_rule(attribute, raw, current.background_opacity, 0.0, 1.0),
        },
        Attribute::Duration => match raw {
            None => Normalized::clean(FieldValue::Number(default_duration())),
            Some(raw) => number_rule(attribute, raw, current.duration, 0.0, f64::MAX),
        },
        Attribute::LabelSize => match raw {
            None => Normalized::clean(FieldValue::Number(default_label_size())),
            Some(raw) => number_rule(attribute, raw, current.label_size, MIN_FONT_SIZE, f64::MAX),
        },
        Attribute::ValueSize => match raw {
            None => Normalized::clean(FieldValue::Number(default_value_size())),
            Some(raw) => number_rule(attribute, raw, current.value_size, MIN_FONT_SIZE, f64::MAX),
        },
        Attribute::DecimalPlaces => {
            let Some(raw) = raw else {
                return Normalized::clean(FieldValue::Integer(0));
            };
            match parse_leading_integer(raw) {
                Some(places) => {
                    let clamped = places.clamp(0, MAX_DECIMAL_PLACES as i64);
                    let warning = (clamped != places).then(|| ValidationWarning::Clamped {
                        attribute,
                        requested: places as f64,
                        clamped: clamped as f64,
                    });
                    Normalized {
                        value: FieldValue::Integer(clamped as u32),
                        warning,
                    }
                }
                None => Normalized {
                    value: FieldValue::Integer(current.decimal_places),
                    warning: (!raw.trim().is_empty()).then(|| ValidationWarning::NotANumber {
                        attribute,
                        raw: raw.to_string(),
                        kept: current.decimal_places as f64,
                    }),
                },
            }
        }
        Attribute::Color => color_rule(attribute, raw, &current.color, default_color()),
        Attribute::BgColor => color_rule(
            attribute,
            raw,
            &current.background_color,
            default_background_color(),
        ),
        Attribute::LabelColor => {
            color_rule(attribute, raw, &current.label_color, default_text_color())
        }
        Attribute::ValueColor => {
            color_rule(attribute, raw, &current.value_color, default_text_color())
        }
        Attribute::Direction => {
            let Some(raw) = raw else {
                return Normalized::clean(FieldValue::Direction(Direction::Clockwise));
            };
            match raw.trim().to_ascii_lowercase().as_str() {
                "counterclockwise" | "ccw" => {
                    Normalized::clean(FieldValue::Direction(Direction::Counterclockwise))
                }
                "clockwise" | "cw" | "" => Normalized::clean(FieldValue::Direction(Direction::Clockwise)),
                _ => Normalized {
                    value: FieldValue::Direction(Direction::Clockwise),
                    warning: Some(ValidationWarning::UnknownKeyword {
                        attribute,
                        raw: raw.to_string(),
                        fallback: Direction::Clockwise.as_str(),
                    }),
                },
            }
        }
        Attribute::LabelPosition | Attribute::ValuePosition => position_rule(attribute, raw),
        Attribute::ProgressCap => {
            let Some(raw) = raw else {
                return Normalized::clean(FieldValue::Cap(ProgressCap::default()));
            };
            match ProgressCap::parse(raw) {
                Some(cap) => Normalized::clean(FieldValue::Cap(cap)),
                None => Normalized {
                    value: FieldValue::Cap(ProgressCap::default()),
                    warning: Some(ValidationWarning::UnknownKeyword {
                        attribute,
                        raw: raw.to_string(),
                        fallback: ProgressCap::default().as_str(),
                    }),
                },
            }
        }
        Attribute::Label => Normalized::clean(FieldValue::Text(raw.unwrap_or_default().to_string())),
        Attribute::FontFamily => css_rule(attribute, raw, default_font_family()),
        Attribute::FontWeight => css_rule(attribute, raw, default_font_weight()),
    }
}

/// Store a normalized value into its field.
///
/// Mismatched attribute/value pairs cannot come out of [`normalize`] and are ignored.
fn store(config: &mut ArcConfig, attribute: Attribute, value: FieldValue) {
    match (attribute, value) {
        (Attribute::Percentage, FieldValue::Number(v)) => config.percentage = v,
        (Attribute::Size, FieldValue::Number(v)) => config.size = v,
        (Attribute::Thickness, FieldValue::Number(v)) => config.thickness = v,
        (Attribute::StartAngle, FieldValue::Number(v)) => config.start_angle = v,
        (Attribute::BackgroundOpacity, FieldValue::Number(v)) => config.background_opacity = v,
        (Attribute::Duration, FieldValue::Number(v)) => config.duration = v,
        (Attribute::LabelSize, FieldValue::Number(v)) => config.label_size = v,
        (Attribute::ValueSize, FieldValue::Number(v)) => config.value_size = v,
        (Attribute::DecimalPlaces, FieldValue::Integer(v)) => config.decimal_places = v,
        (Attribute::Color, FieldValue::Color(c)) => config.color = c,
        (Attribute::BgColor, FieldValue::Color(c)) => config.background_color = c,
        (Attribute::LabelColor, FieldValue::Color(c)) => config.label_color = c,
        (Attribute::ValueColor, FieldValue::Color(c)) => config.value_color = c,
        (Attribute::Direction, FieldValue::Direction(d)) => config.direction = d,
        (Attribute::LabelPosition, FieldValue::Position(p)) => config.label_position = p,
        (Attribute::ValuePosition, FieldValue::Position(p)) => config.value_position = p,
        (Attribute::ProgressCap, FieldValue::Cap(c)) => config.progress_cap = c,
        (Attribute::Label, FieldValue::Text(s)) => config.label = s,
        (Attribute::FontFamily, FieldValue::Text(s)) => config.font_family = s,
        (Attribute::FontWeight, FieldValue::Text(s)) => config.font_weight = s,
        (attribute, value) => {
            log::error!("validator produced {value:?} for {attribute}, ignoring");
        }
    }
}

/// Apply one attribute change, returning the new configuration.
///
/// A `size` change re-clamps the current thickness against the new bound.
pub fn apply_change(config: &ArcConfig, attribute: Attribute, raw: Option<&str>) -> Change {
    let mut next = config.clone();
    let mut warnings = Vec::new();

    let normalized = normalize(attribute, raw, config);
    warnings.extend(normalized.warning);
    store(&mut next, attribute, normalized.value);

    if attribute == Attribute::Size {
        let max = max_thickness(next.size);
        if next.thickness > max {
            warnings.push(ValidationWarning::Clamped {
                attribute: Attribute::Thickness,
                requested: next.thickness,
                clamped: max,
            });
            next.thickness = max;
        }
    }

    Change {
        config: next,
        warnings,
    }
}

/// Apply several changes at once.
///
/// All `size` changes are resolved before anything else so the `thickness`
/// bound is computed from the final size; remaining changes keep their order.
/// When the batch also sets `thickness`, it is normalized against that final
/// bound and the interim re-clamp from the size change is not reported.
pub fn apply_batch(config: &ArcConfig, changes: &[(Attribute, Option<&str>)]) -> Change {
    let ordered = changes
        .iter()
        .filter(|(attribute, _)| *attribute == Attribute::Size)
        .chain(
            changes
                .iter()
                .filter(|(attribute, _)| *attribute != Attribute::Size),
        );

    let sets_thickness = changes
        .iter()
        .any(|(attribute, _)| *attribute == Attribute::Thickness);

    let mut current = config.clone();
    let mut warnings = Vec::new();
    for (attribute, raw) in ordered {
        let change = apply_change(&current, *attribute, *raw);
        current = change.config;
        if *attribute == Attribute::Size && sets_thickness {
            warnings.extend(change.warnings.into_iter().filter(|w| {
                !matches!(
                    w,
                    ValidationWarning::Clamped {
                        attribute: Attribute::Thickness,
                        ..
                    }
                )
            }));
        } else {
            warnings.extend(change.warnings);
        }
    }

    Change {
        config: current,
        warnings,
    }
}
