use crate::camera::EYE_HEIGHT;
use glam::{Mat4, Vec2, Vec3};
use std::f32::consts::FRAC_PI_2;

pub const ORBIT_MIN_DISTANCE: f32 = 2.0;
pub const ORBIT_MAX_DISTANCE: f32 = 15.0;
const ORBIT_SENSITIVITY: f32 = 0.005;
const ZOOM_STEP: f32 = 0.1;
const ELEVATION_LIMIT: f32 = FRAC_PI_2 - 0.05;

/// Inspection camera circling a target point, used before walk mode starts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitCamera {
    pub target: Vec3,
    distance: f32,
    /// Rotation about +Y; 0 puts the camera on +Z looking at the shop.
    azimuth: f32,
    elevation: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self {
            target: Vec3::new(0.0, EYE_HEIGHT, 0.0),
            distance: 6.0,
            azimuth: 0.0,
            elevation: 0.0,
        }
    }
}

impl OrbitCamera {
    pub fn distance(&self) -> f32 {
        self.distance
    }

    /// Orbit by a pointer drag in pixels.
    pub fn rotate(&mut self, delta: Vec2) {
        if !delta.is_finite() {
            return;
        }
        self.azimuth -= delta.x * ORBIT_SENSITIVITY;
        self.elevation =
            (self.elevation + delta.y * ORBIT_SENSITIVITY).clamp(-ELEVATION_LIMIT, ELEVATION_LIMIT);
    }

    /// Positive `scroll` moves closer.
    pub fn zoom(&mut self, scroll: f32) {
        if !scroll.is_finite() {
            return;
        }
        let factor = (1.0 - scroll * ZOOM_STEP).max(0.1);
        self.distance = (self.distance * factor).clamp(ORBIT_MIN_DISTANCE, ORBIT_MAX_DISTANCE);
    }

    pub fn position(&self) -> Vec3 {
        let (sa, ca) = self.azimuth.sin_cos();
        let (se, ce) = self.elevation.sin_cos();
        self.target + Vec3::new(sa * ce, se, ca * ce) * self.distance
    }

    pub fn forward(&self) -> Vec3 {
        (self.target - self.position()).normalize_or(Vec3::NEG_Z)
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position(), self.target, Vec3::Y)
    }
}
