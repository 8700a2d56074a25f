//! What a render surface consumes

use progress_arc_core::{compute_geometry, format_percentage, ArcConfig, Geometry};
use serde::Serialize;

/// The value currently on screen.
///
/// `text` and `dash_offset` are always derived from the same `value`, so a
/// surface can never show a label that disagrees with the arc.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayState {
    pub value: f64,
    pub text: String,
    pub dash_offset: f64,
}

impl DisplayState {
    pub fn new(value: f64, decimal_places: u32, geometry: &Geometry) -> Self {
        Self {
            value,
            text: format_percentage(value, decimal_places),
            dash_offset: geometry.dash_offset_at(value),
        }
    }

    /// The in-place update for this display value
    pub fn patch(&self) -> FramePatch {
        FramePatch {
            dash_offset: self.dash_offset,
            text: self.text.clone(),
        }
    }
}

/// Per-frame update pushed to an already rendered surface
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FramePatch {
    pub dash_offset: f64,
    pub text: String,
}

impl FramePatch {
    /// `(selector, attribute, value)` triples to apply to the rendered markup
    pub fn to_attributes(&self) -> Vec<(&'static str, &'static str, String)> {
        vec![
            (
                ".progress",
                "stroke-dashoffset",
                progress_arc_core::format_number(self.dash_offset),
            ),
            (".value", "textContent", self.text.clone()),
        ]
    }
}

/// Validated configuration + derived geometry + current display
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderState {
    pub config: ArcConfig,
    pub geometry: Geometry,
    pub display: DisplayState,
}

impl RenderState {
    /// Build a state showing `value` for `config`
    pub fn new(config: ArcConfig, value: f64) -> Self {
        let geometry = compute_geometry(&config);
        let display = DisplayState::new(value, config.decimal_places, &geometry);
        Self {
            config,
            geometry,
            display,
        }
    }
}
