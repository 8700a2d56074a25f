//! progress-arc-core: validation, geometry and animation for the progress arc.
//!
//! This crate holds the only real logic of the widget: normalizing untrusted
//! attribute strings, deriving ring geometry, and driving the eased
//! transition of the displayed value. Nothing here touches a display.

pub mod animation;
pub mod constants;
pub mod format;
pub mod geometry;
pub mod validator;

pub use animation::{
    ease_out_cubic, AnimationDriver, AnimationSession, DriverState, FrameControl, FrameScheduler,
    FrameTicket, Retarget,
};
pub use constants::{
    ANIMATION_FRAME_INTERVAL, ANIMATION_FRAME_MS, MAX_DECIMAL_PLACES, MAX_SIZE, MIN_SIZE,
    MIN_THICKNESS,
};
pub use format::{format_number, format_percentage, to_fixed};
pub use geometry::{compute_geometry, Geometry};
pub use validator::{
    apply_batch, apply_change, normalize, Change, FieldValue, Normalized, ValidationWarning,
};

// Re-export types used in public signatures for convenience
pub use progress_arc_types::{ArcConfig, Attribute, Direction, HexColor};
