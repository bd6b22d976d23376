//! # Simulation Configuration
//!
//! Groups the tunable parameters by subsystem. The defaults are the values the
//! demo was tuned with by feel; they are kept exactly for behavioral parity.

use serde::{Deserialize, Serialize};

use super::{Config, ConfigError};
use crate::animation::AnimationClipDescriptor;
use crate::foundation::math::{utils, Vec3};
use crate::input::CameraOrbit;

/// # Physics Configuration
///
/// Integration and collision response constants for the ball.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Vertical acceleration in m/s² (negative is down)
    pub gravity: f32,
    /// Scale applied to the reflected velocity component on a box hit
    pub bounce_strength: f32,
    /// Scale applied to every velocity component on a box hit
    pub collision_damping: f32,
    /// Height of the ground plane
    pub ground_y: f32,
    /// Scale applied to the reflected vertical speed on a ground bounce
    pub ground_bounce: f32,
    /// Scale applied to horizontal velocity on every ground contact
    pub ground_friction: f32,
    /// Incoming vertical speed at or below which a ground contact comes to rest
    pub rest_speed_threshold: f32,
    /// Residual speed above which a held ball is not snapped to the hand
    pub held_velocity_epsilon: f32,
    /// Depth below the ground that triggers a safety reset
    pub reset_depth: f32,
    /// Distance from the origin that triggers a safety reset
    pub reset_radius: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: -9.81,
            bounce_strength: 0.8,
            collision_damping: 0.9,
            ground_y: 0.0,
            ground_bounce: 0.7,
            ground_friction: 0.8,
            rest_speed_threshold: 0.5,
            held_velocity_epsilon: 0.01,
            reset_depth: 10.0,
            reset_radius: 50.0,
        }
    }
}

/// # Throw Configuration
///
/// Shape of the hand path during the throw clip, expressed against the
/// normalized clip progress `p`, plus the release impulse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThrowConfig {
    /// End of the wind-up phase
    pub windup_end: f32,
    /// End of the release swing
    pub swing_end: f32,
    /// Progress past which the ball leaves the hand
    pub release_progress: f32,
    /// How far the hand drops during the wind-up
    pub windup_drop: f32,
    /// How far the hand pulls back toward the body during the wind-up
    pub windup_pull_back: f32,
    /// Height gained above the hold offset at the top of the swing
    pub swing_rise: f32,
    /// Forward reach added at the top of the swing
    pub swing_reach: f32,
    /// Distance the hand sweeps back while held elevated
    pub sweep_back: f32,
    /// Exponent applied to the swing sub-progress
    pub swing_exponent: f32,
    /// Horizontal launch speed along the character's facing
    pub forward_speed: f32,
    /// Vertical launch speed
    pub upward_speed: f32,
}

impl Default for ThrowConfig {
    fn default() -> Self {
        Self {
            windup_end: 0.3,
            swing_end: 0.55,
            release_progress: 0.6,
            windup_drop: 0.25,
            windup_pull_back: 0.1,
            swing_rise: 0.7,
            swing_reach: 0.25,
            sweep_back: 0.15,
            swing_exponent: 0.3,
            forward_speed: 5.0,
            upward_speed: 6.0,
        }
    }
}

/// # Ball Configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BallConfig {
    /// Ball radius
    pub radius: f32,
    /// Spawn and safety-reset position
    pub rest_position: Vec3,
    /// Hand offset in character space (x lateral, y up, z forward) while holding
    pub hold_offset: Vec3,
    /// Throw curve and impulse
    pub throw: ThrowConfig,
}

impl Default for BallConfig {
    fn default() -> Self {
        let radius = 0.12;
        Self {
            radius,
            rest_position: Vec3::new(3.0, radius, 0.0),
            hold_offset: Vec3::new(0.25, 1.1, 0.35),
            throw: ThrowConfig::default(),
        }
    }
}

/// # Character Configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CharacterConfig {
    /// Walking speed in m/s
    pub walk_speed: f32,
    /// Speed while the sprint modifier is held
    pub sprint_speed: f32,
    /// Radius of the body probe sphere
    pub radius: f32,
    /// Height of the body probe above the character's feet
    pub probe_height: f32,
    /// Maximum distance from which the ball can be picked up
    pub pickup_distance: f32,
    /// Spawn position
    pub spawn_position: Vec3,
    /// Spawn facing
    pub spawn_yaw: f32,
}

impl Default for CharacterConfig {
    fn default() -> Self {
        Self {
            walk_speed: 2.0,
            sprint_speed: 5.0,
            radius: 0.3,
            probe_height: 1.0,
            pickup_distance: 1.5,
            spawn_position: Vec3::zeros(),
            spawn_yaw: 0.0,
        }
    }
}

/// # Animation Configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// Cross-fade duration used by every `play`
    pub fade_duration: f32,
    /// Clip table, one entry per animation state
    pub clips: Vec<AnimationClipDescriptor>,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            fade_duration: 0.3,
            clips: AnimationClipDescriptor::default_table(),
        }
    }
}

/// # Camera Configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Exponential smoothing rate (1/s)
    pub smoothing: f32,
    /// Height of the look-at point above the character's feet
    pub look_height: f32,
    /// Orbit used before the first input arrives
    pub initial_orbit: CameraOrbit,
    /// Lowest allowed pitch in radians
    pub min_pitch: f32,
    /// Highest allowed pitch in radians
    pub max_pitch: f32,
    /// Closest allowed orbit distance
    pub min_distance: f32,
    /// Farthest allowed orbit distance
    pub max_distance: f32,
    /// Radians of orbit per pixel of mouse drag
    pub drag_sensitivity: f32,
    /// Distance change per unit of wheel delta
    pub zoom_sensitivity: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            smoothing: 8.0,
            look_height: 1.5,
            initial_orbit: CameraOrbit::new(0.0, 0.35, 5.0),
            min_pitch: utils::deg_to_rad(-60.0),
            max_pitch: utils::deg_to_rad(60.0),
            min_distance: 1.0,
            max_distance: 10.0,
            drag_sensitivity: 0.005,
            zoom_sensitivity: 0.01,
        }
    }
}

/// # Debug Configuration
///
/// Gates per-tick trace logging. Nothing here changes simulation results.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugConfig {
    /// Trace ball integration every tick
    pub trace_physics: bool,
    /// Trace animation time and cross-fades every tick
    pub trace_animation: bool,
    /// Trace the smoothed camera placement every tick
    pub trace_camera: bool,
}

/// # Complete Simulation Configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Default log filter for binaries that host the simulation
    pub log_level: String,
    /// Largest delta a single tick may consume
    pub max_frame_delta: f32,
    /// Ball physics
    pub physics: PhysicsConfig,
    /// Ball geometry and throw
    pub ball: BallConfig,
    /// Character movement
    pub character: CharacterConfig,
    /// Animation clips
    pub animation: AnimationConfig,
    /// Follow camera
    pub camera: CameraConfig,
    /// Diagnostics
    pub debug: DebugConfig,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            max_frame_delta: 0.25,
            physics: PhysicsConfig::default(),
            ball: BallConfig::default(),
            character: CharacterConfig::default(),
            animation: AnimationConfig::default(),
            camera: CameraConfig::default(),
            debug: DebugConfig::default(),
        }
    }
}

fn check(condition: bool, message: impl FnOnce() -> String) -> Result<(), ConfigError> {
    if condition {
        Ok(())
    } else {
        Err(ConfigError::Invalid(message()))
    }
}

fn check_factor(name: &str, value: f32) -> Result<(), ConfigError> {
    check((0.0..=1.0).contains(&value), || {
        format!("{name} must be within [0, 1], got {value}")
    })
}

fn check_positive(name: &str, value: f32) -> Result<(), ConfigError> {
    check(value.is_finite() && value > 0.0, || {
        format!("{name} must be positive, got {value}")
    })
}

fn check_finite(name: &str, v: &Vec3) -> Result<(), ConfigError> {
    check(v.iter().all(|c| c.is_finite()), || {
        format!("{name} must be finite, got {v:?}")
    })
}

impl SimulationConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_positive("max_frame_delta", self.max_frame_delta)?;

        let physics = &self.physics;
        check(physics.gravity.is_finite(), || "gravity must be finite".to_string())?;
        check(physics.ground_y.is_finite(), || "ground_y must be finite".to_string())?;
        check_factor("bounce_strength", physics.bounce_strength)?;
        check_factor("collision_damping", physics.collision_damping)?;
        check_factor("ground_bounce", physics.ground_bounce)?;
        check_factor("ground_friction", physics.ground_friction)?;
        check(physics.rest_speed_threshold >= 0.0, || {
            "rest_speed_threshold must not be negative".to_string()
        })?;
        check(physics.held_velocity_epsilon >= 0.0, || {
            "held_velocity_epsilon must not be negative".to_string()
        })?;
        check_positive("reset_depth", physics.reset_depth)?;
        check_positive("reset_radius", physics.reset_radius)?;

        check_positive("ball.radius", self.ball.radius)?;
        check_finite("ball.rest_position", &self.ball.rest_position)?;
        check_finite("ball.hold_offset", &self.ball.hold_offset)?;
        let throw = &self.ball.throw;
        check(
            0.0 < throw.windup_end
                && throw.windup_end < throw.swing_end
                && throw.swing_end < throw.release_progress
                && throw.release_progress < 1.0,
            || {
                format!(
                    "throw breakpoints must satisfy 0 < {} < {} < {} < 1",
                    throw.windup_end, throw.swing_end, throw.release_progress
                )
            },
        )?;
        check_positive("throw.swing_exponent", throw.swing_exponent)?;

        let character = &self.character;
        check(character.walk_speed >= 0.0, || "walk_speed must not be negative".to_string())?;
        check(character.sprint_speed >= 0.0, || {
            "sprint_speed must not be negative".to_string()
        })?;
        check_positive("character.radius", character.radius)?;
        check(character.pickup_distance >= 0.0, || {
            "pickup_distance must not be negative".to_string()
        })?;
        check_finite("character.spawn_position", &character.spawn_position)?;

        check(self.animation.fade_duration >= 0.0, || {
            "fade_duration must not be negative".to_string()
        })?;

        let camera = &self.camera;
        check(camera.smoothing >= 0.0, || "camera smoothing must not be negative".to_string())?;
        check(camera.min_pitch <= camera.max_pitch, || {
            "camera pitch limits are inverted".to_string()
        })?;
        check(
            0.0 < camera.min_distance && camera.min_distance <= camera.max_distance,
            || "camera distance limits are invalid".to_string(),
        )?;

        Ok(())
    }
}

impl Config for SimulationConfig {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(SimulationConfig::default().validate().is_ok());
    }

    #[test]
    fn test_default_constants_preserved() {
        let config = SimulationConfig::default();
        assert_eq!(config.physics.gravity, -9.81);
        assert_eq!(config.physics.bounce_strength, 0.8);
        assert_eq!(config.physics.collision_damping, 0.9);
        assert_eq!(config.physics.ground_bounce, 0.7);
        assert_eq!(config.physics.ground_friction, 0.8);
        assert_eq!(config.ball.throw.swing_exponent, 0.3);
        assert_eq!(config.animation.fade_duration, 0.3);
    }

    #[test]
    fn test_out_of_order_breakpoints_rejected() {
        let mut config = SimulationConfig::default();
        config.ball.throw.swing_end = 0.2;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_factor_out_of_range_rejected() {
        let mut config = SimulationConfig::default();
        config.physics.ground_bounce = 1.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let text = "[physics]\ngravity = -5.0\n";
        let config = SimulationConfig::from_str_with_format(text, "sim.toml").unwrap();
        assert_eq!(config.physics.gravity, -5.0);
        assert_eq!(config.physics.bounce_strength, 0.8);
        assert_eq!(config.character, CharacterConfig::default());
    }

    #[test]
    fn test_ron_round_trip() {
        let config = SimulationConfig::default();
        let text = ron::ser::to_string(&config).unwrap();
        let parsed = SimulationConfig::from_str_with_format(&text, "sim.ron").unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_unsupported_extension() {
        let result = SimulationConfig::from_str_with_format("", "sim.json");
        assert!(matches!(result, Err(ConfigError::UnsupportedFormat(_))));
    }
}
