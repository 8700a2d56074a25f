//! progress-arc: an attribute-configurable circular progress indicator.
//!
//! This library provides:
//! - The [`ProgressArc`] widget, driven by string attributes
//! - A deterministic frame host for running animations without a display
//! - Application configuration for the `progress-arc` command line tool
//!
//! Validation, geometry and animation live in `progress-arc-core`; markup
//! and Cairo output in `progress-arc-render`.

pub mod config;
pub mod host;
pub mod widget;

// Re-export commonly used types
pub use config::AppConfig;
pub use host::SimulatedHost;
pub use widget::ProgressArc;

pub use progress_arc_core::{
    ArcConfig, Attribute, DriverState, FrameScheduler, FrameTicket, Geometry, ValidationWarning,
};
pub use progress_arc_render::{DisplayState, FramePatch, RenderState};
