//! Animation driver for the displayed percentage.
//!
//! The driver interpolates from the value currently on screen to a new target
//! with an ease-out-cubic curve. It never owns a timer: the host supplies a
//! [`FrameScheduler`] that reports the time and delivers frame callbacks. Each
//! running frame requests the next one and returns immediately.
//!
//! Every session is tagged with a generation number. Retargeting bumps the
//! generation, so a frame scheduled by a preempted session arrives with a stale
//! [`FrameTicket`] and is ignored instead of racing the new session.

use serde::Serialize;

use crate::constants::{MAX_PERCENTAGE, MIN_PERCENTAGE};

/// Cubic ease-out: fast start, smooth settle. `t` is clamped to [0, 1].
pub fn ease_out_cubic(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(3)
}

fn clamp_percentage(value: f64) -> f64 {
    if value.is_nan() {
        MIN_PERCENTAGE
    } else {
        value.clamp(MIN_PERCENTAGE, MAX_PERCENTAGE)
    }
}

/// Token handed to the host with each frame request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct FrameTicket {
    generation: u64,
}

impl FrameTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Host seam: a clock plus a "call me on the next frame" mechanism.
///
/// The host must eventually hand every requested ticket back to the widget.
pub trait FrameScheduler {
    /// Current time in milliseconds (monotonic, arbitrary origin)
    fn now_ms(&self) -> f64;

    /// Ask for one frame callback carrying `ticket`
    fn request_frame(&mut self, ticket: FrameTicket);
}

/// One transition between two displayed values
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AnimationSession {
    pub start_value: f64,
    pub end_value: f64,
    pub start_time: f64,
    pub duration: f64,
    pub generation: u64,
    /// Highest progress reached so far; keeps the curve monotonic
    last_progress: f64,
}

/// Driver state machine: `Idle -> Running -> Idle`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DriverState {
    Idle,
    Running,
}

/// Outcome of a retarget
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Retarget {
    /// End state applied synchronously (zero duration or nothing to animate)
    Immediate(f64),
    /// A session started and its first frame was requested
    Started(FrameTicket),
}

/// Outcome of a frame callback
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FrameControl {
    /// Still running; the next frame has been requested
    Continue(f64),
    /// Final frame, exactly the target value
    Finished(f64),
    /// Ticket from a preempted or finished session; nothing changed
    Stale,
}

/// Interpolates the displayed percentage over time
#[derive(Debug, Clone, Default, Serialize)]
pub struct AnimationDriver {
    displayed: f64,
    generation: u64,
    session: Option<AnimationSession>,
}

impl AnimationDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Value currently on screen, always within [0, 100]
    pub fn displayed_value(&self) -> f64 {
        self.displayed
    }

    pub fn state(&self) -> DriverState {
        if self.session.is_some() {
            DriverState::Running
        } else {
            DriverState::Idle
        }
    }

    pub fn session(&self) -> Option<&AnimationSession> {
        self.session.as_ref()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Invalidate any in-flight session
    fn cancel(&mut self) {
        self.generation += 1;
        if let Some(session) = self.session.take() {
            log::debug!(
                "Animation driver: preempting session {} at {:.3} (target {:.3})",
                session.generation,
                self.displayed,
                session.end_value
            );
        }
    }

    /// Show `value` immediately, cancelling any running session
    pub fn jump_to(&mut self, value: f64) -> f64 {
        self.cancel();
        self.displayed = clamp_percentage(value);
        self.displayed
    }

    /// Start animating towards `target` from the value currently displayed.
    ///
    /// A zero (or invalid) duration, or a target equal to the displayed value,
    /// applies the end state synchronously without requesting a frame.
    pub fn retarget<S>(&mut self, target: f64, duration_ms: f64, scheduler: &mut S) -> Retarget
    where
        S: FrameScheduler + ?Sized,
    {
        let target = clamp_percentage(target);
        self.cancel();

        if !(duration_ms.is_finite() && duration_ms > 0.0) || self.displayed == target {
            self.displayed = target;
            return Retarget::Immediate(target);
        }

        let session = AnimationSession {
            start_value: self.displayed,
            end_value: target,
            start_time: scheduler.now_ms(),
            duration: duration_ms,
            generation: self.generation,
            last_progress: 0.0,
        };
        log::debug!(
            "Animation driver: session {} from {:.3} to {:.3} over {}ms",
            session.generation,
            session.start_value,
            session.end_value,
            session.duration
        );
        self.session = Some(session);

        let ticket = FrameTicket {
            generation: self.generation,
        };
        scheduler.request_frame(ticket);
        Retarget::Started(ticket)
    }

    /// Handle one frame callback.
    ///
    /// Stale tickets are no-ops. A running frame updates the displayed value
    /// and requests the next frame; the last frame snaps exactly to the target.
    pub fn tick<S>(&mut self, ticket: FrameTicket, scheduler: &mut S) -> FrameControl
    where
        S: FrameScheduler + ?Sized,
    {
        let Some(session) = self.session.as_mut() else {
            log::trace!("Animation driver: frame {} after idle, ignoring", ticket.generation);
            return FrameControl::Stale;
        };
        if ticket.generation != self.generation || session.generation != ticket.generation {
            log::debug!(
                "Animation driver: removing stale frame (gen {} vs current {})",
                ticket.generation,
                self.generation
            );
            return FrameControl::Stale;
        }

        let elapsed = (scheduler.now_ms() - session.start_time).max(0.0);
        let progress = (elapsed / session.duration).min(1.0).max(session.last_progress);
        session.last_progress = progress;

        if progress >= 1.0 {
            let end = session.end_value;
            self.displayed = end;
            self.session = None;
            log::trace!("Animation driver: session {} finished at {:.3}", ticket.generation, end);
            return FrameControl::Finished(end);
        }

        let eased = ease_out_cubic(progress);
        let value = session.start_value + (session.end_value - session.start_value) * eased;
        self.displayed = clamp_percentage(value);
        log::trace!(
            "Animation driver: t={:.3} eased={:.3} value={:.3}",
            progress,
            eased,
            self.displayed
        );

        scheduler.request_frame(ticket);
        FrameControl::Continue(self.displayed)
    }
}
