//! Deterministic frame host.
//!
//! Stands in for a display's frame clock: it keeps a simulated time, queues
//! frame requests, and delivers them one frame interval apart. Used by the CLI
//! to run animations without a window, and by tests.

use std::collections::VecDeque;
use std::time::Duration;

use progress_arc_core::{FrameScheduler, FrameTicket, ANIMATION_FRAME_INTERVAL};
use progress_arc_render::FramePatch;

use crate::widget::ProgressArc;

/// Upper bound on frames delivered by [`SimulatedHost::run_until_idle`]
const MAX_FRAMES: usize = 100_000;

/// Frame host with a simulated clock
#[derive(Debug, Clone)]
pub struct SimulatedHost {
    now_ms: f64,
    frame_interval_ms: f64,
    pending: VecDeque<FrameTicket>,
    frames_delivered: u64,
}

impl SimulatedHost {
    pub fn new(frame_interval: Duration) -> Self {
        Self {
            now_ms: 0.0,
            frame_interval_ms: frame_interval.as_micros() as f64 / 1000.0,
            pending: VecDeque::new(),
            frames_delivered: 0,
        }
    }

    /// Number of frame requests waiting for delivery
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    pub fn frames_delivered(&self) -> u64 {
        self.frames_delivered
    }

    /// Move the clock forward without delivering frames
    pub fn advance(&mut self, elapsed: Duration) {
        self.now_ms += elapsed.as_micros() as f64 / 1000.0;
    }

    /// Advance one frame interval and deliver every request queued before it.
    ///
    /// Requests made while delivering go to the next frame.
    pub fn step(&mut self, widget: &mut ProgressArc) -> Vec<FramePatch> {
        self.now_ms += self.frame_interval_ms;
        let due: Vec<FrameTicket> = self.pending.drain(..).collect();
        let mut patches = Vec::new();
        for ticket in due {
            self.frames_delivered += 1;
            if let Some(patch) = widget.on_frame(ticket, self) {
                patches.push(patch);
            }
        }
        patches
    }

    /// Deliver frames until nothing is pending, returning every patch produced
    pub fn run_until_idle(&mut self, widget: &mut ProgressArc) -> Vec<FramePatch> {
        let mut patches = Vec::new();
        let mut frames = 0;
        while !self.pending.is_empty() {
            if frames >= MAX_FRAMES {
                log::warn!("Simulated host: giving up after {MAX_FRAMES} frames");
                break;
            }
            patches.extend(self.step(widget));
            frames += 1;
        }
        patches
    }
}

impl Default for SimulatedHost {
    fn default() -> Self {
        Self::new(ANIMATION_FRAME_INTERVAL)
    }
}

impl FrameScheduler for SimulatedHost {
    fn now_ms(&self) -> f64 {
        self.now_ms
    }

    fn request_frame(&mut self, ticket: FrameTicket) {
        self.pending.push_back(ticket);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frames_are_one_interval_apart() {
        let mut host = SimulatedHost::new(Duration::from_millis(10));
        let mut widget = ProgressArc::new();
        widget.set_attribute("duration", "100", &mut host);
        widget.set_attribute("percentage", "100", &mut host);
        widget.connect(&mut host);

        let patches = host.run_until_idle(&mut widget);
        // 10 frames of 10ms cover the 100ms duration exactly
        assert_eq!(patches.len(), 10);
        assert_eq!(host.frames_delivered(), 10);
        assert_eq!(host.now_ms(), 100.0);
        assert_eq!(patches.last().map(|p| p.text.as_str()), Some("100%"));
    }

    #[test]
    fn test_clock_jump_finishes_animation() {
        let mut host = SimulatedHost::new(Duration::from_millis(10));
        let mut widget = ProgressArc::new();
        widget.set_attribute("duration", "100", &mut host);
        widget.set_attribute("percentage", "60", &mut host);
        widget.connect(&mut host);

        host.step(&mut widget);
        assert_ne!(widget.display().text, "60%");

        // A stalled host catches up in one frame instead of replaying the gap
        host.advance(Duration::from_millis(500));
        let patches = host.step(&mut widget);
        assert_eq!(patches.last().map(|p| p.text.as_str()), Some("60%"));
        assert_eq!(host.pending(), 0);
        assert_eq!(host.now_ms(), 520.0);
    }

    #[test]
    fn test_idle_host_does_nothing() {
        let mut host = SimulatedHost::default();
        let mut widget = ProgressArc::new();
        assert!(host.run_until_idle(&mut widget).is_empty());
        assert_eq!(host.now_ms(), 0.0);
    }
}
