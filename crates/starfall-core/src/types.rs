//! Fundamental geometric and simulation types.

use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

use crate::constants::DIRECTION_EPSILON;

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

impl SimTime {
    /// Advance by one tick of `dt` seconds.
    pub fn advance(&mut self, dt: f32) {
        self.tick += 1;
        self.elapsed_secs += dt as f64;
    }

    /// Elapsed seconds as f32, the precision used by gameplay timers.
    pub fn now(&self) -> f32 {
        self.elapsed_secs as f32
    }
}

/// A point in normalized device coordinates. Both axes lie in [-1, 1]
/// once produced by the projector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScreenPoint {
    pub x: f32,
    pub y: f32,
}

impl ScreenPoint {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance in screen space.
    pub fn distance_to(&self, other: &ScreenPoint) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Read-only camera data supplied by the host each frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraView {
    /// Combined view-projection matrix.
    pub view_projection: Mat4,
    /// Camera eye position in world space.
    pub eye: Vec3,
}

impl CameraView {
    /// Perspective camera looking at the origin.
    pub fn looking_at_origin(eye: Vec3, fov_y_radians: f32, aspect: f32) -> Self {
        let view = Mat4::look_at_rh(eye, Vec3::ZERO, Vec3::Y);
        let projection = Mat4::perspective_rh(fov_y_radians, aspect, 0.1, 100.0);
        Self {
            view_projection: projection * view,
            eye,
        }
    }
}

impl Default for CameraView {
    fn default() -> Self {
        Self::looking_at_origin(Vec3::new(0.0, 0.0, 6.0), 60f32.to_radians(), 16.0 / 9.0)
    }
}

/// Unit vector from `from` toward `to`, or zero when the points coincide.
pub fn direction_to(from: Vec3, to: Vec3) -> Vec3 {
    let delta = to - from;
    let len = delta.length();
    if len > DIRECTION_EPSILON && len.is_finite() {
        delta / len
    } else {
        Vec3::ZERO
    }
}
