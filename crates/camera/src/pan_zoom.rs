//! Map-style pan and zoom with inertia.
//!
//! - Dragging translates the camera across the ground plane (x/z); the drag
//!   speed scales with camera height so panning feels the same at any zoom.
//! - Releasing a drag keeps the last velocity, damped every frame.
//! - Wheel and pinch feed a zoom velocity applied to camera height, also
//!   damped every frame.
//!
//! Velocities snap to exactly zero once below `epsilon`, so motion always
//! ends after a finite number of frames.

use foundation::math::{Vec2, Vec3};
use serde::Deserialize;

use crate::pose::CameraPose;

/// Pixel delta to world delta at the reference height.
const PAN_PIXEL_SCALE: f64 = 0.01;
const WHEEL_ZOOM_SCALE: f64 = 0.5;
const PINCH_DISTANCE_SCALE: f64 = 0.1;
const PINCH_ZOOM_SCALE: f64 = 0.03;

#[derive(Debug, Copy, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PanZoomConfig {
    pub base_pan_speed: f64,
    /// Camera height at which `base_pan_speed` applies unscaled.
    pub reference_height: f64,
    /// Per-frame multiplier applied to pan velocity after release.
    pub pan_damping: f64,
    pub zoom_speed: f64,
    /// Per-frame multiplier applied to zoom velocity.
    pub zoom_damping: f64,
    pub min_height: f64,
    pub max_height: f64,
    pub epsilon: f64,
}

impl Default for PanZoomConfig {
    fn default() -> Self {
        Self {
            base_pan_speed: 5.0,
            reference_height: 40.0,
            pan_damping: 0.9,
            zoom_speed: 0.5,
            zoom_damping: 0.85,
            min_height: 2.0,
            max_height: 50.0,
            epsilon: 0.001,
        }
    }
}

/// In-progress drag: the last pointer position seen.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct DragSession {
    pub anchor: Vec2,
}

/// In-progress two-finger pinch.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PinchSession {
    pub start_distance: f64,
}

#[derive(Debug, Clone)]
pub struct PanZoomController {
    config: PanZoomConfig,
    enabled: bool,
    drag: Option<DragSession>,
    pinch: Option<PinchSession>,
    pan_velocity: Vec2,
    zoom_velocity: f64,
}

impl Default for PanZoomController {
    fn default() -> Self {
        Self::new(PanZoomConfig::default())
    }
}

impl PanZoomController {
    pub fn new(config: PanZoomConfig) -> Self {
        Self {
            config,
            enabled: true,
            drag: None,
            pinch: None,
            pan_velocity: Vec2::ZERO,
            zoom_velocity: 0.0,
        }
    }

    pub fn config(&self) -> &PanZoomConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: PanZoomConfig) {
        self.config = config;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn pan_velocity(&self) -> Vec2 {
        self.pan_velocity
    }

    pub fn zoom_velocity(&self) -> f64 {
        self.zoom_velocity
    }

    /// No session open and no residual motion.
    pub fn is_idle(&self) -> bool {
        self.drag.is_none()
            && self.pinch.is_none()
            && self.pan_velocity == Vec2::ZERO
            && self.zoom_velocity == 0.0
    }

    pub fn on_press(&mut self, pos: Vec2) {
        if !self.enabled {
            return;
        }
        self.drag = Some(DragSession { anchor: pos });
        self.pan_velocity = Vec2::ZERO;
    }

    pub fn on_move(&mut self, pose: &mut CameraPose, pos: Vec2) {
        if !self.enabled {
            return;
        }
        self.drag_to(pose, pos);
    }

    pub fn on_release(&mut self) {
        self.drag = None;
    }

    /// Wheel input; only the sign of `delta_y` matters.
    pub fn on_wheel(&mut self, delta_y: f64) {
        if !self.enabled || delta_y == 0.0 || !delta_y.is_finite() {
            return;
        }
        let direction = delta_y.signum();
        self.zoom_velocity += direction * self.config.zoom_speed * WHEEL_ZOOM_SCALE;
    }

    pub fn on_touch_start(&mut self, touches: &[Vec2]) {
        if !self.enabled {
            return;
        }
        match touches {
            [one] => {
                self.drag = Some(DragSession { anchor: *one });
                self.pan_velocity = Vec2::ZERO;
            }
            [a, b, ..] => {
                self.pinch = Some(PinchSession {
                    start_distance: a.distance(*b),
                });
            }
            [] => {}
        }
    }

    pub fn on_touch_move(&mut self, pose: &mut CameraPose, touches: &[Vec2]) {
        if !self.enabled {
            return;
        }
        match touches {
            [one] => self.drag_to(pose, *one),
            [a, b, ..] => {
                let Some(pinch) = self.pinch else {
                    return;
                };
                let zoom_delta = (pinch.start_distance - a.distance(*b)) * PINCH_DISTANCE_SCALE;
                self.zoom_velocity += zoom_delta * self.config.zoom_speed * PINCH_ZOOM_SCALE;
            }
            [] => {}
        }
    }

    /// `remaining` are the touches still down after the end event.
    pub fn on_touch_end(&mut self, remaining: &[Vec2]) {
        self.drag = None;
        if remaining.len() < 2 {
            self.pinch = None;
        }
    }

    /// Per-frame integration of zoom and pan inertia.
    pub fn update(&mut self, pose: &mut CameraPose) {
        if !self.enabled {
            return;
        }
        let eps = self.config.epsilon;

        if self.zoom_velocity.abs() > eps {
            let y = pose.position.y;
            let next = (y + self.zoom_velocity).clamp(self.config.min_height, self.config.max_height);
            pose.position.y = next;
            pose.target.y += next - y;
            self.zoom_velocity *= self.config.zoom_damping;
        } else {
            self.zoom_velocity = 0.0;
        }

        if self.drag.is_none() {
            if self.pan_velocity.is_near_zero(eps) {
                self.pan_velocity = Vec2::ZERO;
            } else {
                pose.translate(Vec3::new(self.pan_velocity.x, 0.0, self.pan_velocity.y));
                self.pan_velocity = self.pan_velocity * self.config.pan_damping;
            }
        }
    }

    /// Drops residual motion and any open session; stays enabled.
    pub fn stop(&mut self) {
        self.drag = None;
        self.pinch = None;
        self.pan_velocity = Vec2::ZERO;
        self.zoom_velocity = 0.0;
    }

    /// Teardown: stops all motion and disables input processing.
    pub fn detach(&mut self) {
        self.stop();
        self.enabled = false;
    }

    fn drag_to(&mut self, pose: &mut CameraPose, pos: Vec2) {
        let Some(drag) = self.drag.as_mut() else {
            return;
        };
        let zoom_factor = pose.position.y / self.config.reference_height;
        let delta = (pos - drag.anchor) * (self.config.base_pan_speed * zoom_factor * PAN_PIXEL_SCALE);

        self.pan_velocity = -delta;
        pose.translate(Vec3::new(self.pan_velocity.x, 0.0, self.pan_velocity.y));
        drag.anchor = pos;
    }
}
