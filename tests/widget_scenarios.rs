//! End-to-end behaviour of the widget driven through the simulated host

use progress_arc::{DriverState, FrameScheduler, ProgressArc, SimulatedHost};
use std::time::Duration;

fn connected(attributes: &[(&str, &str)]) -> (ProgressArc, SimulatedHost) {
    let mut host = SimulatedHost::default();
    let mut widget = ProgressArc::new();
    let changes: Vec<(&str, Option<&str>)> =
        attributes.iter().map(|(n, v)| (*n, Some(*v))).collect();
    widget.set_attributes(&changes, &mut host);
    widget.connect(&mut host);
    (widget, host)
}

fn settle(widget: &mut ProgressArc, host: &mut SimulatedHost) -> String {
    host.run_until_idle(widget);
    widget.display().text.clone()
}

#[test]
fn test_renders_defaults() {
    let (mut widget, mut host) = connected(&[]);
    assert_eq!(settle(&mut widget, &mut host), "0%");
    let html = widget.render();
    assert!(html.contains(r#"class="progress-container""#));
    assert!(!html.contains(r#"<div class="label">"#));
}

#[test]
fn test_percentage_is_clamped() {
    let (mut widget, mut host) = connected(&[("percentage", "150")]);
    assert_eq!(settle(&mut widget, &mut host), "100%");

    widget.set_attribute("percentage", "-20", &mut host);
    assert_eq!(settle(&mut widget, &mut host), "0%");
}

#[test]
fn test_decimal_places() {
    let (mut widget, mut host) = connected(&[("percentage", "33.333")]);
    assert_eq!(settle(&mut widget, &mut host), "33%");

    widget.set_attribute("decimal-places", "2", &mut host);
    assert_eq!(widget.display().text, "33.33%");
}

#[test]
fn test_final_value_matches_clamped_input() {
    for (raw, expected) in [("0", "0%"), ("12.5", "13%"), ("99.4", "99%"), ("abc", "0%"), ("1e3", "100%")] {
        let (mut widget, mut host) = connected(&[("percentage", raw)]);
        assert_eq!(settle(&mut widget, &mut host), expected, "percentage={raw}");
    }
}

#[test]
fn test_zero_duration_is_synchronous() {
    let (mut widget, mut host) = connected(&[("duration", "0")]);
    let offset_before = widget.display().dash_offset;

    widget.set_attribute("percentage", "75", &mut host);
    // Arc and label reach the final state in the same update, no frames queued
    assert_eq!(host.pending(), 0);
    assert_eq!(widget.display().text, "75%");
    assert_eq!(widget.display().dash_offset, widget.geometry().dash_offset_at(75.0));
    assert_ne!(widget.display().dash_offset, offset_before);
    assert!(host.run_until_idle(&mut widget).is_empty());
}

#[test]
fn test_label_and_arc_agree_every_frame() {
    let (mut widget, mut host) = connected(&[("percentage", "80"), ("decimal-places", "1")]);
    while host.pending() > 0 {
        for patch in host.step(&mut widget) {
            let display = widget.display();
            assert_eq!(patch.text, display.text);
            assert_eq!(patch.dash_offset, widget.geometry().dash_offset_at(display.value));
            let shown: f64 = display.text.trim_end_matches('%').parse().unwrap();
            assert!((shown - display.value).abs() <= 0.05, "{} for {}", display.text, display.value);
        }
    }
    assert_eq!(widget.display().text, "80.0%");
}

#[test]
fn test_frames_are_monotonic_toward_target() {
    let (mut widget, mut host) = connected(&[("percentage", "90"), ("duration", "400")]);
    let mut previous = 0.0;
    let mut frames = 0;
    while host.pending() > 0 {
        host.step(&mut widget);
        let value = widget.display().value;
        assert!(value >= previous && value <= 90.0, "{value} after {previous}");
        previous = value;
        frames += 1;
    }
    assert!(frames > 1);
    assert_eq!(previous, 90.0);
}

#[test]
fn test_retarget_mid_flight_continues_from_display() {
    let (mut widget, mut host) = connected(&[("percentage", "100"), ("duration", "1000")]);
    for _ in 0..10 {
        host.step(&mut widget);
    }
    let shown = widget.display().value;
    assert!(shown > 0.0 && shown < 100.0);

    widget.set_attribute("percentage", "0", &mut host);
    // No snap: the display stays where it was until the next frame
    assert_eq!(widget.display().value, shown);

    let mut previous = shown;
    while host.pending() > 0 {
        for patch in host.step(&mut widget) {
            let value = widget.display().value;
            assert!(value <= previous, "old session leaked a frame: {}", patch.text);
            previous = value;
        }
    }
    assert_eq!(widget.display().text, "0%");
    assert_eq!(widget.driver_state(), DriverState::Idle);
}

#[test]
fn test_invalid_color_keeps_last_valid() {
    let (mut widget, mut host) = connected(&[("color", "#FF0000"), ("bg-color", "#00FF00")]);
    widget.set_attribute("color", "invalid", &mut host);
    widget.set_attribute("bg-color", "invalid", &mut host);
    assert_eq!(widget.config().color.as_str(), "#FF0000");
    assert_eq!(widget.config().background_color.as_str(), "#00FF00");

    let html = widget.render();
    assert!(!html.contains("invalid"));
    assert!(html.contains(r##"stroke="#FF0000""##));
}

#[test]
fn test_invalid_text_colors_keep_last_valid() {
    let (mut widget, mut host) = connected(&[("label-color", "#112233"), ("value-color", "#abc")]);
    widget.set_attribute("label-color", "red", &mut host);
    widget.set_attribute("value-color", "#12345", &mut host);
    assert_eq!(widget.config().label_color.as_str(), "#112233");
    assert_eq!(widget.config().value_color.as_str(), "#abc");

    let html = widget.render();
    assert!(html.contains("color: #112233;"));
    assert!(html.contains("color: #abc;"));
    assert!(!html.contains("#12345"));
}

#[test]
fn test_thickness_independent_of_update_order() {
    let mut host = SimulatedHost::default();
    let mut stepwise = ProgressArc::new();
    stepwise.set_attributes(&[("size", Some("300")), ("thickness", Some("400"))], &mut host);
    assert_eq!(stepwise.config().thickness, 150.0);
    stepwise.set_attribute("size", "1000", &mut host);

    let (at_once, _) = connected(&[("size", "1000"), ("thickness", "400")]);
    assert_eq!(stepwise.config().thickness, 400.0);
    assert_eq!(stepwise.config(), at_once.config());

    // Shrinking again clamps against the new bound
    stepwise.set_attribute("size", "200", &mut host);
    assert_eq!(stepwise.config().thickness, 100.0);
    assert_eq!(stepwise.attribute("thickness"), Some("400"));
}

#[test]
fn test_huge_size_still_renders_a_valid_ring() {
    let (widget, _) = connected(&[("size", "1e308"), ("duration", "0"), ("percentage", "100")]);
    let display = widget.display();
    assert!(widget.geometry().circumference.is_finite());
    assert!(display.dash_offset.is_finite());
    assert_eq!(display.text, "100%");
    assert!(!widget.render().contains("NaN"));
}

#[test]
fn test_size_and_thickness_bounds() {
    let (widget, _) = connected(&[("thickness", "90"), ("size", "50")]);
    assert_eq!(widget.config().size, 100.0);
    assert_eq!(widget.config().thickness, 50.0);

    let (widget, _) = connected(&[("size", "300"), ("thickness", "400")]);
    assert_eq!(widget.config().thickness, 150.0);
}

#[test]
fn test_repeated_attribute_is_noop() {
    let (mut widget, mut host) = connected(&[("size", "240")]);
    settle(&mut widget, &mut host);
    let revision = widget.revision();
    let state = widget.render_state();

    let warnings = widget.set_attribute("size", "240", &mut host);
    assert!(warnings.is_empty());
    assert_eq!(widget.revision(), revision);
    assert_eq!(widget.render_state(), state);
    assert_eq!(host.pending(), 0);
}

#[test]
fn test_structural_change_rebuilds_but_target_change_does_not() {
    let (mut widget, mut host) = connected(&[]);
    let revision = widget.revision();

    widget.set_attribute("percentage", "30", &mut host);
    assert_eq!(widget.revision(), revision);

    widget.set_attribute("thickness", "10", &mut host);
    assert_eq!(widget.revision(), revision + 1);
    assert!(widget.render().contains(r#"stroke-width="10""#));
}

#[test]
fn test_direction_and_start_angle_markup() {
    let (mut widget, mut host) = connected(&[("start-angle", "90"), ("direction", "ccw")]);
    settle(&mut widget, &mut host);
    let html = widget.render();
    assert!(html.contains("rotate(90 100 100)"));
    assert!(html.contains("scale(1, -1)"));

    widget.set_attribute("direction", "clockwise", &mut host);
    assert!(!widget.render().contains("scale(1, -1)"));
}

#[test]
fn test_legacy_animation_duration_alias() {
    let (widget, _) = connected(&[("animation-duration", "2000")]);
    assert_eq!(widget.config().duration, 2000.0);
}

#[test]
fn test_animation_takes_configured_duration() {
    let mut host = SimulatedHost::new(Duration::from_millis(20));
    let mut widget = ProgressArc::new();
    widget.set_attributes(&[("percentage", Some("50")), ("duration", Some("200"))], &mut host);
    widget.connect(&mut host);
    host.run_until_idle(&mut widget);
    assert_eq!(host.frames_delivered(), 10);
    assert_eq!(host.now_ms(), 200.0);
}

#[test]
fn test_from_value_animates_down() {
    let mut host = SimulatedHost::default();
    let mut widget = ProgressArc::new();
    widget.set_attribute("percentage", "10", &mut host);
    widget.jump_to(60.0);
    assert_eq!(widget.display().text, "60%");
    widget.connect(&mut host);
    let patches = host.run_until_idle(&mut widget);
    assert!(patches.len() > 1);
    assert_eq!(patches.last().map(|p| p.text.as_str()), Some("10%"));
}
