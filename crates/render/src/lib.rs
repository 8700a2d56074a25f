//! progress-arc-render: render surfaces for the progress arc.
//!
//! The markup renderer rebuilds the whole fragment from a [`RenderState`];
//! animation frames are applied in place through a [`FramePatch`]. With the
//! `cairo` feature the same ring can be rasterised to PNG.

pub mod state;
pub mod svg_display;

#[cfg(feature = "cairo")]
pub mod cairo_display;

pub use state::{DisplayState, FramePatch, RenderState};
pub use svg_display::{escape_html, render_markup};

#[cfg(feature = "cairo")]
pub use cairo_display::{render_png, render_ring};
