//! Markup for the progress arc: a style block, an SVG ring and the text overlay

use std::fmt::Write as _;

use progress_arc_core::format_number;
use progress_arc_types::TextPosition;

use crate::state::RenderState;

/// Escape text for HTML element content and attribute values
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// CSS placement of the label
pub fn label_position_style(position: TextPosition) -> &'static str {
    match position {
        TextPosition::Top => "top: 10%;",
        TextPosition::Bottom => "bottom: 10%;",
        TextPosition::Left => "top: 50%; left: 10%;",
        TextPosition::Right => "top: 50%; right: 10%; transform: translate(50%, -50%);",
        TextPosition::Inside => "top: 40%;",
    }
}

/// CSS placement of the value; centred whenever there is no label
pub fn value_position_style(position: TextPosition, has_label: bool) -> &'static str {
    if !has_label {
        return "top: 50%;";
    }
    match position {
        TextPosition::Top => "top: 30%;",
        TextPosition::Bottom => "bottom: 30%;",
        TextPosition::Left => "top: 50%; left: 30%;",
        TextPosition::Right => "top: 50%; right: 30%; transform: translate(50%, -50%);",
        TextPosition::Inside => "top: 60%;",
    }
}

/// Transform of the progress circle: start-angle rotation, plus a mirror
/// across the start axis for counterclockwise growth
pub fn progress_transform(state: &RenderState) -> String {
    let geometry = &state.geometry;
    let center = format_number(geometry.center);
    let mut transform = format!(
        "rotate({} {center} {center})",
        format_number(geometry.rotation_deg)
    );
    if geometry.mirrored() {
        let _ = write!(
            transform,
            " translate(0 {}) scale(1, -1)",
            format_number(geometry.size)
        );
    }
    transform
}

/// Render the full markup for a state. Used whenever configuration changes;
/// animation frames only apply a [`crate::FramePatch`].
pub fn render_markup(state: &RenderState) -> String {
    let config = &state.config;
    let geometry = &state.geometry;
    let has_label = !config.label.is_empty();

    let size = format_number(geometry.size);
    let center = format_number(geometry.center);
    let radius = format_number(geometry.radius);
    let thickness = format_number(geometry.thickness);
    let circumference = format_number(geometry.circumference);
    let opacity = format_number(config.background_opacity);
    // Raw text inside <style>: entities are not decoded there. The validator
    // already stripped everything that could end the declaration or element.
    let font_family = &config.font_family;
    let font_weight = &config.font_weight;

    let mut html = String::with_capacity(2048);

    let _ = write!(
        html,
        r#"<style>
  .progress-container {{
    position: relative;
    width: {size}px;
    height: {size}px;
  }}
  .background {{
    fill: none;
    stroke: {bg};
    opacity: {opacity};
  }}
  .progress {{
    fill: none;
    stroke: {color};
    stroke-linecap: {cap};
  }}
  .label, .value {{
    position: absolute;
    text-align: center;
    line-height: 1.2;
    font-family: {font_family};
    font-weight: {font_weight};
    transform: translate(-50%, -50%);
    left: 50%;
  }}
  .label {{
    font-size: {label_size}px;
    color: {label_color};
    display: {label_display};
    {label_position}
  }}
  .value {{
    font-size: {value_size}px;
    color: {value_color};
    {value_position}
  }}
</style>
"#,
        bg = config.background_color,
        color = config.color,
        cap = config.progress_cap.as_str(),
        label_size = format_number(config.label_size),
        label_color = config.label_color,
        label_display = if has_label { "block" } else { "none" },
        label_position = label_position_style(config.label_position),
        value_size = format_number(config.value_size),
        value_color = config.value_color,
        value_position = value_position_style(config.value_position, has_label),
    );

    let _ = write!(
        html,
        r#"<div class="progress-container">
  <svg class="svg-container" width="{size}" height="{size}" viewBox="0 0 {size} {size}">
    <circle class="background" cx="{center}" cy="{center}" r="{radius}" stroke="{bg}" stroke-width="{thickness}" fill="none" opacity="{opacity}" />
    <circle class="progress" cx="{center}" cy="{center}" r="{radius}" stroke="{color}" stroke-width="{thickness}" fill="none" stroke-linecap="{cap}" stroke-dasharray="{circumference} {circumference}" stroke-dashoffset="{offset}" transform="{transform}" />
  </svg>
"#,
        bg = config.background_color,
        color = config.color,
        cap = config.progress_cap.as_str(),
        offset = format_number(state.display.dash_offset),
        transform = progress_transform(state),
    );

    if has_label {
        let _ = writeln!(
            html,
            r#"  <div class="label">{}</div>"#,
            escape_html(&config.label)
        );
    }
    let _ = write!(
        html,
        r#"  <div class="value">{}</div>
</div>
"#,
        escape_html(&state.display.text)
    );

    html
}
