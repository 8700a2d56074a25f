//! The progress arc widget.
//!
//! Wires the pieces together: raw attribute strings go through the validator,
//! the validated configuration drives the geometry, and a change of target
//! percentage (re)starts the animation driver from whatever is on screen.
//!
//! Configuration changes rebuild the whole markup; animation frames only
//! produce a [`FramePatch`] for the arc offset and the value text.

use std::collections::BTreeMap;

use log::{debug, warn};
use progress_arc_core::{
    apply_batch, compute_geometry, AnimationDriver, ArcConfig, Attribute, DriverState,
    FrameControl, FrameScheduler, FrameTicket, Geometry, Retarget, ValidationWarning,
};
use progress_arc_render::{render_markup, DisplayState, FramePatch, RenderState};

/// A circular progress indicator driven by string attributes
#[derive(Debug, Clone)]
pub struct ProgressArc {
    /// Raw attribute values as last set by the host
    attributes: BTreeMap<Attribute, String>,
    config: ArcConfig,
    geometry: Geometry,
    driver: AnimationDriver,
    display: DisplayState,
    connected: bool,
    /// Incremented on every full rebuild of the markup
    revision: u64,
}

impl ProgressArc {
    pub fn new() -> Self {
        let config = ArcConfig::default();
        let geometry = compute_geometry(&config);
        let display = DisplayState::new(0.0, config.decimal_places, &geometry);
        Self {
            attributes: BTreeMap::new(),
            config,
            geometry,
            driver: AnimationDriver::new(),
            display,
            connected: false,
            revision: 0,
        }
    }

    pub fn config(&self) -> &ArcConfig {
        &self.config
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub fn display(&self) -> &DisplayState {
        &self.display
    }

    pub fn driver_state(&self) -> DriverState {
        self.driver.state()
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    /// Number of full markup rebuilds so far
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Raw value of an attribute, if set
    pub fn attribute(&self, name: &str) -> Option<&str> {
        let attribute = Attribute::from_name(name)?;
        self.attributes.get(&attribute).map(String::as_str)
    }

    /// Set one attribute, like a host `setAttribute` call
    pub fn set_attribute<S>(&mut self, name: &str, value: &str, scheduler: &mut S) -> Vec<ValidationWarning>
    where
        S: FrameScheduler + ?Sized,
    {
        self.set_attributes(&[(name, Some(value))], scheduler)
    }

    /// Remove one attribute; the field returns to its default
    pub fn remove_attribute<S>(&mut self, name: &str, scheduler: &mut S) -> Vec<ValidationWarning>
    where
        S: FrameScheduler + ?Sized,
    {
        self.set_attributes(&[(name, None)], scheduler)
    }

    /// Attribute change notification from the host.
    ///
    /// Identical old and new values are a no-op.
    pub fn attribute_changed<S>(
        &mut self,
        name: &str,
        old: Option<&str>,
        new: Option<&str>,
        scheduler: &mut S,
    ) -> Vec<ValidationWarning>
    where
        S: FrameScheduler + ?Sized,
    {
        if old == new {
            return Vec::new();
        }
        self.set_attributes(&[(name, new)], scheduler)
    }

    /// Apply several attribute changes as one update.
    ///
    /// `size` is always resolved before `thickness`, whatever the input order.
    pub fn set_attributes<S>(
        &mut self,
        changes: &[(&str, Option<&str>)],
        scheduler: &mut S,
    ) -> Vec<ValidationWarning>
    where
        S: FrameScheduler + ?Sized,
    {
        let mut batch = Vec::with_capacity(changes.len());
        for (name, raw) in changes {
            let Some(attribute) = Attribute::from_name(name) else {
                debug!("Ignoring unknown attribute {name:?}");
                continue;
            };
            if self.attributes.get(&attribute).map(String::as_str) == *raw {
                continue;
            }
            match raw {
                Some(raw) => self.attributes.insert(attribute, raw.to_string()),
                None => self.attributes.remove(&attribute),
            };
            batch.push((attribute, *raw));
        }
        if batch.is_empty() {
            return Vec::new();
        }
        // A new size moves the thickness bound, so re-derive thickness from its raw value
        let has_size = batch.iter().any(|(a, _)| *a == Attribute::Size);
        let has_thickness = batch.iter().any(|(a, _)| *a == Attribute::Thickness);
        if has_size && !has_thickness {
            let raw = self.attributes.get(&Attribute::Thickness).map(String::as_str);
            batch.push((Attribute::Thickness, raw));
        }

        let change = apply_batch(&self.config, &batch);
        for warning in &change.warnings {
            warn!("progress-arc: {warning}");
        }
        self.apply_config(change.config, scheduler);
        change.warnings
    }

    /// Attach to the host and perform the first render.
    ///
    /// Missing attributes resolve to their defaults; the configured percentage
    /// is animated in from the value currently displayed.
    pub fn connect<S>(&mut self, scheduler: &mut S)
    where
        S: FrameScheduler + ?Sized,
    {
        if self.connected {
            return;
        }
        self.connected = true;
        self.rebuild();
        self.retarget(scheduler);
    }

    /// Detach from the host. Frames still in flight become no-ops.
    pub fn disconnect(&mut self) {
        self.connected = false;
        let value = self.driver.displayed_value();
        self.driver.jump_to(value);
    }

    /// Show `value` immediately without animating, cancelling any session
    pub fn jump_to(&mut self, value: f64) {
        let value = self.driver.jump_to(value);
        self.refresh_display(value);
    }

    /// Frame callback from the host.
    ///
    /// Returns the in-place update for this frame, or `None` for a stale frame.
    pub fn on_frame<S>(&mut self, ticket: FrameTicket, scheduler: &mut S) -> Option<FramePatch>
    where
        S: FrameScheduler + ?Sized,
    {
        if !self.connected {
            return None;
        }
        match self.driver.tick(ticket, scheduler) {
            FrameControl::Continue(value) | FrameControl::Finished(value) => {
                self.refresh_display(value);
                Some(self.display.patch())
            }
            FrameControl::Stale => None,
        }
    }

    /// Validated configuration, geometry and current display
    pub fn render_state(&self) -> RenderState {
        RenderState {
            config: self.config.clone(),
            geometry: self.geometry,
            display: self.display.clone(),
        }
    }

    /// Full markup for the current state
    pub fn render(&self) -> String {
        render_markup(&self.render_state())
    }

    fn apply_config<S>(&mut self, config: ArcConfig, scheduler: &mut S)
    where
        S: FrameScheduler + ?Sized,
    {
        let target_changed = config.percentage != self.config.percentage;
        // A new target alone is animated, not rebuilt
        let structural = ArcConfig {
            percentage: self.config.percentage,
            ..config.clone()
        } != self.config;
        self.config = config;
        self.geometry = compute_geometry(&self.config);
        self.refresh_display(self.driver.displayed_value());

        if self.connected {
            if structural {
                self.rebuild();
            }
            if target_changed {
                self.retarget(scheduler);
            }
        }
    }

    fn retarget<S>(&mut self, scheduler: &mut S)
    where
        S: FrameScheduler + ?Sized,
    {
        match self
            .driver
            .retarget(self.config.percentage, self.config.duration, scheduler)
        {
            Retarget::Immediate(value) => self.refresh_display(value),
            Retarget::Started(ticket) => {
                debug!("progress-arc: animating to {} (frame {})", self.config.percentage, ticket.generation());
            }
        }
    }

    /// Derive text and offset together from one value
    fn refresh_display(&mut self, value: f64) {
        self.display = DisplayState::new(value, self.config.decimal_places, &self.geometry);
    }

    fn rebuild(&mut self) {
        self.revision += 1;
        debug!("progress-arc: rebuilding markup (revision {})", self.revision);
    }
}

impl Default for ProgressArc {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::SimulatedHost;

    #[test]
    fn test_unconnected_widget_does_not_animate() {
        let mut host = SimulatedHost::default();
        let mut widget = ProgressArc::new();
        widget.set_attribute("percentage", "50", &mut host);
        assert_eq!(widget.config().percentage, 50.0);
        assert_eq!(widget.display().text, "0%");
        assert_eq!(host.pending(), 0);
    }

    #[test]
    fn test_connect_animates_from_zero() {
        let mut host = SimulatedHost::default();
        let mut widget = ProgressArc::new();
        widget.set_attribute("percentage", "50", &mut host);
        widget.connect(&mut host);
        assert_eq!(widget.driver_state(), DriverState::Running);
        assert_eq!(widget.revision(), 1);
        host.run_until_idle(&mut widget);
        assert_eq!(widget.display().text, "50%");
    }

    #[test]
    fn test_attribute_changed_same_value_is_noop() {
        let mut host = SimulatedHost::default();
        let mut widget = ProgressArc::new();
        widget.connect(&mut host);
        let revision = widget.revision();
        widget.attribute_changed("size", Some("300"), Some("300"), &mut host);
        assert_eq!(widget.revision(), revision);
        assert_eq!(widget.config().size, 200.0);
    }

    #[test]
    fn test_unknown_attribute_ignored() {
        let mut host = SimulatedHost::default();
        let mut widget = ProgressArc::new();
        let warnings = widget.set_attribute("stroke", "red", &mut host);
        assert!(warnings.is_empty());
        assert_eq!(widget.config(), &ArcConfig::default());
    }

    #[test]
    fn test_remove_attribute_restores_default() {
        let mut host = SimulatedHost::default();
        let mut widget = ProgressArc::new();
        widget.set_attribute("color", "#ff0000", &mut host);
        assert_eq!(widget.attribute("color"), Some("#ff0000"));
        widget.remove_attribute("color", &mut host);
        assert_eq!(widget.attribute("color"), None);
        assert_eq!(widget.config().color.as_str(), "#7c3aed");
    }

    #[test]
    fn test_disconnect_makes_frames_stale() {
        let mut host = SimulatedHost::default();
        let mut widget = ProgressArc::new();
        widget.set_attribute("percentage", "80", &mut host);
        widget.connect(&mut host);
        widget.disconnect();
        assert_eq!(host.run_until_idle(&mut widget).len(), 0);
        assert_eq!(widget.driver_state(), DriverState::Idle);
    }
}
