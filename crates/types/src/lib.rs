//! progress-arc-types: Shared data types for the progress arc.
//!
//! This crate contains pure data types (configuration, colors, attribute
//! names) shared by the validator, the renderer and the widget. The Cairo
//! conveniences on [`Color`] are behind the optional `cairo` feature.

pub mod arc_config;
pub mod attribute;
pub mod color;

// Re-export commonly used types at the crate root for convenience
pub use arc_config::{ArcConfig, Direction, ProgressCap, TextPosition};
pub use attribute::Attribute;
pub use color::{Color, HexColor};
