//! Ring geometry
//!
//! All functions here are pure and total. A configuration that would produce
//! an impossible ring (thickness at or above the diameter, non-finite input)
//! yields a degenerate zero-radius arc instead of an error. So does a ring so
//! large its circumference overflows.
//!
//! The ring is drawn as a closed circle whose visible length is controlled by
//! `stroke-dashoffset`. Direction never changes the offset formula: a
//! counterclockwise ring is the clockwise ring mirrored across the start-angle
//! axis. [`Geometry::arc_path`] describes the same arc as an explicit path for
//! surfaces that cannot use dashes.

use progress_arc_types::{ArcConfig, Direction};
use serde::Serialize;
use std::f64::consts::{PI, TAU};

use crate::constants::{MAX_PERCENTAGE, MIN_PERCENTAGE};
use crate::format::format_number;

/// Derived ring geometry. Recomputed from the configuration, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Geometry {
    /// Diameter in px (also the width/height of the drawing)
    pub size: f64,
    /// Center coordinate on both axes
    pub center: f64,
    pub radius: f64,
    pub thickness: f64,
    pub circumference: f64,
    /// Dash offset for the configured percentage
    pub dash_offset: f64,
    /// Rotation applied to the whole arc, in degrees
    pub rotation_deg: f64,
    /// SVG sweep flag: 1 = clockwise on screen, 0 = counterclockwise
    pub sweep_flag: u8,
    /// SVG large-arc flag for the configured percentage
    pub large_arc_flag: u8,
    pub direction: Direction,
}

/// Clamp to the percentage range, mapping NaN to 0
fn clamp_percentage(percentage: f64) -> f64 {
    if percentage.is_nan() {
        return MIN_PERCENTAGE;
    }
    percentage.clamp(MIN_PERCENTAGE, MAX_PERCENTAGE)
}

/// Ring radius for a diameter and stroke width: `max(0, (size - thickness) / 2)`
pub fn radius(size: f64, thickness: f64) -> f64 {
    let r = (size - thickness) / 2.0;
    if r.is_finite() && r > 0.0 {
        r
    } else {
        0.0
    }
}

/// Offset that leaves `percentage` of the circumference visible
pub fn dash_offset(circumference: f64, percentage: f64) -> f64 {
    circumference * (1.0 - clamp_percentage(percentage) / MAX_PERCENTAGE)
}

/// Angle swept by the filled arc, in radians
pub fn swept_angle(percentage: f64) -> f64 {
    clamp_percentage(percentage) / MAX_PERCENTAGE * TAU
}

/// SVG large-arc flag: 1 when the swept angle exceeds a half turn
pub fn large_arc_flag(percentage: f64) -> u8 {
    if swept_angle(percentage) > PI {
        1
    } else {
        0
    }
}

/// Point on a circle at `angle` radians (0 = right, positive = clockwise on screen)
pub fn polar_to_cartesian(center: f64, radius: f64, angle: f64) -> (f64, f64) {
    (center + radius * angle.cos(), center + radius * angle.sin())
}

/// Compute the ring geometry for a configuration
pub fn compute_geometry(config: &ArcConfig) -> Geometry {
    let size = if config.size.is_finite() && config.size > 0.0 {
        config.size
    } else {
        0.0
    };
    let thickness = if config.thickness.is_finite() {
        config.thickness.max(0.0)
    } else {
        0.0
    };
    let (radius, circumference) = match radius(size, thickness) {
        r if (TAU * r).is_finite() => (r, TAU * r),
        _ => (0.0, 0.0),
    };
    let rotation_deg = if config.start_angle.is_finite() {
        config.start_angle
    } else {
        0.0
    };

    Geometry {
        size,
        center: size / 2.0,
        radius,
        thickness,
        circumference,
        dash_offset: dash_offset(circumference, config.percentage),
        rotation_deg,
        sweep_flag: match config.direction {
            Direction::Clockwise => 1,
            Direction::Counterclockwise => 0,
        },
        large_arc_flag: large_arc_flag(config.percentage),
        direction: config.direction,
    }
}

impl Geometry {
    /// Dash offset for an arbitrary (e.g. animated) percentage
    pub fn dash_offset_at(&self, percentage: f64) -> f64 {
        dash_offset(self.circumference, percentage)
    }

    /// Whether the ring is too small to draw anything
    pub fn is_degenerate(&self) -> bool {
        self.radius <= 0.0
    }

    /// Whether the drawing is mirrored for counterclockwise growth
    pub fn mirrored(&self) -> bool {
        self.direction == Direction::Counterclockwise
    }

    fn direction_sign(&self) -> f64 {
        match self.direction {
            Direction::Clockwise => 1.0,
            Direction::Counterclockwise => -1.0,
        }
    }

    /// Where the filled arc starts (the rotated start angle)
    pub fn arc_start_point(&self) -> (f64, f64) {
        polar_to_cartesian(self.center, self.radius, self.rotation_deg.to_radians())
    }

    /// Where the filled arc ends for `percentage`
    pub fn arc_end_point(&self, percentage: f64) -> (f64, f64) {
        let angle = self.rotation_deg.to_radians() + self.direction_sign() * swept_angle(percentage);
        polar_to_cartesian(self.center, self.radius, angle)
    }

    /// Explicit SVG path for the filled arc, with rotation and direction applied.
    ///
    /// A full ring is two half-turn arcs, since a single arc with identical
    /// endpoints draws nothing. Returns `None` for an empty or degenerate arc.
    pub fn arc_path(&self, percentage: f64) -> Option<String> {
        let percentage = clamp_percentage(percentage);
        if self.is_degenerate() || percentage <= MIN_PERCENTAGE {
            return None;
        }

        let r = format_number(self.radius);
        let (sx, sy) = self.arc_start_point();
        let start = format!("{} {}", format_number(sx), format_number(sy));

        if percentage >= MAX_PERCENTAGE {
            let (mx, my) = self.arc_end_point(MAX_PERCENTAGE / 2.0);
            return Some(format!(
                "M {start} A {r} {r} 0 0 {sweep} {mx} {my} A {r} {r} 0 0 {sweep} {start} Z",
                sweep = self.sweep_flag,
                mx = format_number(mx),
                my = format_number(my),
            ));
        }

        let (ex, ey) = self.arc_end_point(percentage);
        Some(format!(
            "M {start} A {r} {r} 0 {large} {sweep} {ex} {ey}",
            large = large_arc_flag(percentage),
            sweep = self.sweep_flag,
            ex = format_number(ex),
            ey = format_number(ey),
        ))
    }
}
