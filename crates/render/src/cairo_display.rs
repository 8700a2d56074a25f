//! Cairo raster backend for the progress arc.
//!
//! Draws the same ring as the markup renderer: a closed circle stroked with a
//! `[circumference, circumference]` dash at the display's offset, rotated to
//! the start angle and mirrored for counterclockwise growth.

use anyhow::{Context as _, Result};
use cairo::{Context, FontSlant, FontWeight, Format, ImageSurface, LineCap};
use std::f64::consts::TAU;
use std::fs::File;
use std::path::Path;

use progress_arc_types::{ProgressCap, TextPosition};

use crate::state::RenderState;

/// Vertical anchor (fraction of the size) of the label and value text
fn text_anchor(position: TextPosition, is_label: bool, has_label: bool) -> (f64, f64) {
    if !is_label && !has_label {
        return (0.5, 0.5);
    }
    let (near, far) = if is_label { (0.1, 0.4) } else { (0.3, 0.6) };
    match position {
        TextPosition::Top => (0.5, near),
        TextPosition::Bottom => (0.5, 1.0 - near),
        TextPosition::Left => (near, 0.5),
        TextPosition::Right => (1.0 - near, 0.5),
        TextPosition::Inside => (0.5, far),
    }
}

fn font_weight(weight: &str) -> FontWeight {
    match weight.trim() {
        "bold" | "bolder" => FontWeight::Bold,
        other => match other.parse::<u32>() {
            Ok(n) if n >= 600 => FontWeight::Bold,
            _ => FontWeight::Normal,
        },
    }
}

/// First family of a CSS font list, without quotes
fn primary_family(families: &str) -> &str {
    families
        .split(',')
        .next()
        .map(|f| f.trim().trim_matches('\''))
        .filter(|f| !f.is_empty())
        .unwrap_or("sans-serif")
}

fn draw_centered_text(
    cr: &Context,
    text: &str,
    family: &str,
    weight: FontWeight,
    font_size: f64,
    x: f64,
    y: f64,
) -> Result<(), cairo::Error> {
    cr.select_font_face(family, FontSlant::Normal, weight);
    cr.set_font_size(font_size);
    let extents = cr.text_extents(text)?;
    cr.move_to(
        x - extents.width() / 2.0 - extents.x_bearing(),
        y - extents.height() / 2.0 - extents.y_bearing(),
    );
    cr.show_text(text)
}

/// Render the ring and its text onto a Cairo context sized `geometry.size` square
pub fn render_ring(cr: &Context, state: &RenderState) -> Result<(), cairo::Error> {
    let config = &state.config;
    let geometry = &state.geometry;
    let c = geometry.center;

    if !geometry.is_degenerate() {
        // Background ring
        cr.save()?;
        config
            .background_color
            .to_color()
            .with_alpha(config.background_opacity)
            .apply_to_cairo(cr);
        cr.set_line_width(geometry.thickness);
        cr.new_path();
        cr.arc(c, c, geometry.radius, 0.0, TAU);
        cr.stroke()?;
        cr.restore()?;

        // Progress ring
        if state.display.value > 0.0 {
            cr.save()?;
            cr.translate(c, c);
            cr.rotate(geometry.rotation_deg.to_radians());
            if geometry.mirrored() {
                cr.scale(1.0, -1.0);
            }
            cr.translate(-c, -c);

            config.color.to_color().apply_to_cairo(cr);
            cr.set_line_width(geometry.thickness);
            cr.set_line_cap(match config.progress_cap {
                ProgressCap::Round => LineCap::Round,
                ProgressCap::Butt => LineCap::Butt,
                ProgressCap::Square => LineCap::Square,
            });
            cr.set_dash(
                &[geometry.circumference, geometry.circumference],
                state.display.dash_offset,
            );
            cr.new_path();
            cr.arc(c, c, geometry.radius, 0.0, TAU);
            cr.stroke()?;
            cr.restore()?;
        }
    }

    let has_label = !config.label.is_empty();
    let family = primary_family(&config.font_family);
    let weight = font_weight(&config.font_weight);
    let size = geometry.size;

    if has_label {
        let (fx, fy) = text_anchor(config.label_position, true, true);
        config.label_color.to_color().apply_to_cairo(cr);
        draw_centered_text(cr, &config.label, family, weight, config.label_size, fx * size, fy * size)?;
    }

    let (fx, fy) = text_anchor(config.value_position, false, has_label);
    config.value_color.to_color().apply_to_cairo(cr);
    draw_centered_text(
        cr,
        &state.display.text,
        family,
        weight,
        config.value_size,
        fx * size,
        fy * size,
    )
}

/// Rasterise a state to a PNG file
pub fn render_png(state: &RenderState, path: &Path) -> Result<()> {
    let side = state.geometry.size.ceil().max(1.0) as i32;
    let surface = ImageSurface::create(Format::ARgb32, side, side)
        .context("Failed to create image surface")?;
    {
        let cr = Context::new(&surface).context("Failed to create Cairo context")?;
        render_ring(&cr, state).context("Failed to draw progress arc")?;
    }

    let mut file =
        File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    surface
        .write_to_png(&mut file)
        .with_context(|| format!("Failed to write PNG to {}", path.display()))?;
    log::info!("Wrote {}x{} PNG to {}", side, side, path.display());
    Ok(())
}
