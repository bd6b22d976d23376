//! Math utilities and types
//!
//! Provides the vector aliases and the handful of yaw/easing helpers the
//! simulation needs. Y is up; a yaw of zero faces +Z.

pub use nalgebra::{Matrix4, Rotation3, Vector2, Vector3};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// World up axis
pub fn up() -> Vec3 {
    Vec3::new(0.0, 1.0, 0.0)
}

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// Degrees to radians conversion factor
    pub const DEG_TO_RAD: f32 = PI / 180.0;

    /// Radians to degrees conversion factor
    pub const RAD_TO_DEG: f32 = 180.0 / PI;
}

/// Math utility functions
pub mod utils {
    use super::{constants, Rotation3, Vec3};

    /// Convert degrees to radians
    pub fn deg_to_rad(degrees: f32) -> f32 {
        degrees * constants::DEG_TO_RAD
    }

    /// Convert radians to degrees
    pub fn rad_to_deg(radians: f32) -> f32 {
        radians * constants::RAD_TO_DEG
    }

    /// Linear interpolation
    pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
        a + (b - a) * t
    }

    /// Smoothstep easing on `t` clamped to [0, 1]
    pub fn ease_in_out(t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        t * t * (3.0 - 2.0 * t)
    }

    /// Rotate a vector about the world Y axis by `yaw` radians.
    ///
    /// A local +Z offset ends up pointing along [`yaw_to_direction`] of the same yaw.
    pub fn rotate_by_yaw(v: &Vec3, yaw: f32) -> Vec3 {
        Rotation3::from_axis_angle(&Vec3::y_axis(), yaw) * v
    }

    /// Yaw that faces along the horizontal part of `direction`
    pub fn direction_to_yaw(direction: &Vec3) -> f32 {
        direction.x.atan2(direction.z)
    }

    /// Unit horizontal direction for a yaw angle
    pub fn yaw_to_direction(yaw: f32) -> Vec3 {
        Vec3::new(yaw.sin(), 0.0, yaw.cos())
    }

    /// Normalize `v`, or return `None` when it is (nearly) zero length
    pub fn try_normalize(v: &Vec3) -> Option<Vec3> {
        v.try_normalize(1.0e-6)
    }
}

#[cfg(test)]
mod tests {
    use super::utils::*;
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_yaw_round_trip() {
        let direction = Vec3::new(1.0, 0.0, 1.0).normalize();
        let yaw = direction_to_yaw(&direction);
        assert_relative_eq!(yaw_to_direction(yaw), direction, epsilon = 1.0e-6);
    }

    #[test]
    fn test_rotate_forward_matches_yaw_direction() {
        let yaw = 0.7;
        let rotated = rotate_by_yaw(&Vec3::new(0.0, 0.0, 1.0), yaw);
        assert_relative_eq!(rotated, yaw_to_direction(yaw), epsilon = 1.0e-6);
    }

    #[test]
    fn test_ease_in_out_endpoints() {
        assert_relative_eq!(ease_in_out(0.0), 0.0);
        assert_relative_eq!(ease_in_out(1.0), 1.0);
        assert_relative_eq!(ease_in_out(0.5), 0.5);
        assert_relative_eq!(ease_in_out(4.0), 1.0);
    }

    #[test]
    fn test_try_normalize_zero() {
        assert!(try_normalize(&Vec3::zeros()).is_none());
    }
}
