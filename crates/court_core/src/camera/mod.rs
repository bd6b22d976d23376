//! # Follow Camera
//!
//! Orbits the character at the yaw, pitch and distance the input layer
//! supplies, easing toward the desired placement each tick. Projection and
//! viewport are left to the renderer; the core only produces the view.

use nalgebra::Point3;

use crate::config::CameraConfig;
use crate::foundation::math::{up, Mat4, Vec3};
use crate::input::CameraOrbit;

/// Third-person camera that follows the character
#[derive(Debug, Clone)]
pub struct CameraController {
    /// Camera position in world space
    eye: Vec3,
    /// Point the camera looks at
    look_at: Vec3,
    smoothing: f32,
    look_height: f32,
    initialized: bool,
    trace: bool,
}

impl CameraController {
    /// Create a camera that snaps to its target on the first update
    pub fn new(config: &CameraConfig) -> Self {
        Self {
            eye: Vec3::zeros(),
            look_at: Vec3::zeros(),
            smoothing: config.smoothing,
            look_height: config.look_height,
            initialized: false,
            trace: false,
        }
    }

    /// Enable per-tick trace logging
    pub fn with_trace(mut self, enabled: bool) -> Self {
        self.trace = enabled;
        self
    }

    /// Whether per-tick tracing is on
    pub fn is_tracing(&self) -> bool {
        self.trace
    }

    /// Desired eye and look-at point for a character position and orbit.
    ///
    /// At yaw zero the camera sits on the +Z side of the character looking
    /// toward -Z; positive pitch raises it.
    pub fn desired(&self, target: &Vec3, orbit: &CameraOrbit) -> (Vec3, Vec3) {
        let look_at = target + up() * self.look_height;
        let (sin_yaw, cos_yaw) = orbit.yaw.sin_cos();
        let (sin_pitch, cos_pitch) = orbit.pitch.sin_cos();
        let offset = Vec3::new(sin_yaw * cos_pitch, sin_pitch, cos_yaw * cos_pitch) * orbit.distance;
        (look_at + offset, look_at)
    }

    /// Move toward the desired placement.
    ///
    /// Uses exponential smoothing so the result does not depend on the frame
    /// rate. A smoothing rate of zero snaps every frame.
    pub fn update(&mut self, target: &Vec3, orbit: &CameraOrbit, delta: f32) {
        let (eye, look_at) = self.desired(target, orbit);

        if !self.initialized || self.smoothing <= 0.0 {
            self.eye = eye;
            self.look_at = look_at;
            self.initialized = true;
            return;
        }

        let alpha = 1.0 - (-self.smoothing * delta.max(0.0)).exp();
        self.eye = self.eye.lerp(&eye, alpha);
        self.look_at = self.look_at.lerp(&look_at, alpha);
        if self.trace {
            log::trace!("Camera eye {:?} look_at {:?}", self.eye, self.look_at);
        }
    }

    /// Snap to the desired placement on the next update
    pub fn reset(&mut self) {
        self.initialized = false;
    }

    /// Camera position
    pub fn eye(&self) -> Vec3 {
        self.eye
    }

    /// Look-at point
    pub fn look_at(&self) -> Vec3 {
        self.look_at
    }

    /// Right-handed, Y-up view matrix
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(&Point3::from(self.eye), &Point3::from(self.look_at), &up())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_first_update_snaps() {
        let config = CameraConfig::default();
        let mut camera = CameraController::new(&config);
        let orbit = CameraOrbit::new(0.0, 0.0, 5.0);
        camera.update(&Vec3::zeros(), &orbit, 0.016);

        assert_relative_eq!(camera.look_at(), Vec3::new(0.0, 1.5, 0.0));
        assert_relative_eq!(camera.eye(), Vec3::new(0.0, 1.5, 5.0), epsilon = 1.0e-5);
    }

    #[test]
    fn test_smoothing_converges() {
        let config = CameraConfig::default();
        let mut camera = CameraController::new(&config);
        let orbit = CameraOrbit::new(0.0, 0.3, 4.0);
        camera.update(&Vec3::zeros(), &orbit, 0.016);

        let target = Vec3::new(3.0, 0.0, -2.0);
        camera.update(&target, &orbit, 0.016);
        let (eye, _) = camera.desired(&target, &orbit);
        assert!((camera.eye() - eye).magnitude() > 0.1);

        for _ in 0..300 {
            camera.update(&target, &orbit, 0.016);
        }
        assert_relative_eq!(camera.eye(), eye, epsilon = 1.0e-3);
    }

    #[test]
    fn test_view_matrix_maps_target_ahead() {
        let config = CameraConfig::default();
        let mut camera = CameraController::new(&config);
        camera.update(&Vec3::zeros(), &CameraOrbit::new(0.7, 0.2, 5.0), 0.016);

        let view = camera.view_matrix();
        let target = view.transform_point(&Point3::from(camera.look_at()));
        // Right-handed view space looks down -Z.
        assert_relative_eq!(target.z, -5.0, epsilon = 1.0e-4);
        assert_relative_eq!(target.x, 0.0, epsilon = 1.0e-4);
    }
}
