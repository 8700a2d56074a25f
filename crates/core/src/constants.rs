//! Shared constants for the progress arc

use std::time::Duration;

/// Animation frame interval for smooth 60fps animations (16ms)
pub const ANIMATION_FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Animation frame interval in milliseconds (useful for calculations)
pub const ANIMATION_FRAME_MS: u64 = 16;

/// Smallest ring diameter in px
pub const MIN_SIZE: f64 = 100.0;

/// Largest ring diameter in px. Keeps the circumference finite.
pub const MAX_SIZE: f64 = 100_000.0;

/// Thinnest ring stroke in px. Thickness is an open interval at zero.
pub const MIN_THICKNESS: f64 = 1.0;

/// Most decimal places the value label will show
pub const MAX_DECIMAL_PLACES: u32 = 2;

/// Smallest label/value font size in px
pub const MIN_FONT_SIZE: f64 = 1.0;

/// Percentage bounds
pub const MIN_PERCENTAGE: f64 = 0.0;
pub const MAX_PERCENTAGE: f64 = 100.0;
