//! Animated camera flights between two poses.
//!
//! A flight is clocked by frame timestamps: the first `step` after `start`
//! pins its start time, so flights requested from input handlers begin on
//! the next frame.

use foundation::math::ease_in_out_quad;
use foundation::time::{Time, TimeSpan};
use tracing::debug;

use crate::pose::CameraPose;

pub const DEFAULT_FLIGHT_DURATION_S: f64 = 1.5;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CameraFlight {
    pub from: CameraPose,
    pub to: CameraPose,
    duration_s: f64,
    span: Option<TimeSpan>,
}

impl CameraFlight {
    pub fn new(from: CameraPose, to: CameraPose, duration_s: f64) -> Self {
        Self {
            from,
            to,
            duration_s: duration_s.max(0.0),
            span: None,
        }
    }

    pub fn duration_s(&self) -> f64 {
        self.duration_s
    }

    pub fn is_started(&self) -> bool {
        self.span.is_some()
    }

    /// Eased pose at normalized progress `t`; `t >= 1` yields `to` exactly.
    pub fn pose_at(&self, t: f64) -> CameraPose {
        if t >= 1.0 {
            return self.to;
        }
        self.from.lerp(&self.to, ease_in_out_quad(t))
    }

    fn progress(&mut self, now: Time) -> f64 {
        let span = *self
            .span
            .get_or_insert_with(|| TimeSpan::starting_at(now, self.duration_s));
        span.progress(now)
    }
}

/// One frame of an active flight.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FlightStep {
    pub pose: CameraPose,
    pub finished: bool,
}

/// Owns at most one flight; a new flight replaces the current one.
#[derive(Debug, Clone)]
pub struct CameraAnimator {
    active: Option<CameraFlight>,
    duration_s: f64,
}

impl Default for CameraAnimator {
    fn default() -> Self {
        Self::new(DEFAULT_FLIGHT_DURATION_S)
    }
}

impl CameraAnimator {
    pub fn new(duration_s: f64) -> Self {
        Self {
            active: None,
            duration_s,
        }
    }

    pub fn duration_s(&self) -> f64 {
        self.duration_s
    }

    pub fn set_duration_s(&mut self, duration_s: f64) {
        self.duration_s = duration_s;
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Destination of the active flight.
    pub fn goal(&self) -> Option<CameraPose> {
        self.active.map(|f| f.to)
    }

    pub fn start(&mut self, from: CameraPose, to: CameraPose) {
        if self.active.is_some() {
            debug!("camera flight replaced");
        }
        debug!(?to, duration_s = self.duration_s, "camera flight started");
        self.active = Some(CameraFlight::new(from, to, self.duration_s));
    }

    /// Advances the active flight to `now`. The finishing step returns the
    /// goal pose exactly and clears the flight.
    pub fn step(&mut self, now: Time) -> Option<FlightStep> {
        let flight = self.active.as_mut()?;
        let t = flight.progress(now);
        let pose = flight.pose_at(t);
        let finished = t >= 1.0;
        if finished {
            debug!("camera flight finished");
            self.active = None;
        }
        Some(FlightStep { pose, finished })
    }

    pub fn cancel(&mut self) {
        self.active = None;
    }
}
