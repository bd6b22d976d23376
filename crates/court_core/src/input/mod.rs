//! Input snapshot consumed by the simulation each tick
//!
//! The DOM/window layer translates raw events into an [`InputSnapshot`]; the
//! core only reads it.

use std::collections::HashMap;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::config::CameraConfig;
use crate::foundation::math::Vec2;

bitflags! {
    /// Set of currently held logical keys
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct KeySet: u8 {
        /// Move away from the camera (W / ArrowUp)
        const FORWARD = 1 << 0;
        /// Move toward the camera (S / ArrowDown)
        const BACKWARD = 1 << 1;
        /// Strafe left (A / ArrowLeft)
        const LEFT = 1 << 2;
        /// Strafe right (D / ArrowRight)
        const RIGHT = 1 << 3;
        /// Sprint modifier (Shift)
        const SPRINT = 1 << 4;
        /// Pick the ball up (E)
        const PICKUP = 1 << 5;
        /// Throw the ball (R)
        const THROW = 1 << 6;

        /// All four movement directions
        const MOVEMENT = Self::FORWARD.bits()
            | Self::BACKWARD.bits()
            | Self::LEFT.bits()
            | Self::RIGHT.bits();
    }
}

impl KeySet {
    /// Map a key name from the window layer to a logical key
    pub fn from_key_name(name: &str) -> Option<Self> {
        let key = match name.to_ascii_lowercase().as_str() {
            "w" | "arrowup" => Self::FORWARD,
            "s" | "arrowdown" => Self::BACKWARD,
            "a" | "arrowleft" => Self::LEFT,
            "d" | "arrowright" => Self::RIGHT,
            "shift" | "shiftleft" | "shiftright" => Self::SPRINT,
            "e" => Self::PICKUP,
            "r" => Self::THROW,
            _ => return None,
        };
        Some(key)
    }

    /// Build a key set from a key-name → pressed mapping.
    ///
    /// Unknown names are ignored.
    pub fn from_key_map<S: AsRef<str>>(map: &HashMap<S, bool>) -> Self {
        map.iter()
            .filter(|(_, pressed)| **pressed)
            .filter_map(|(name, _)| Self::from_key_name(name.as_ref()))
            .fold(Self::empty(), |keys, key| keys | key)
    }
}

/// Camera orbit around the character
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraOrbit {
    /// Rotation about the world Y axis in radians
    pub yaw: f32,
    /// Elevation in radians (positive looks down from above)
    pub pitch: f32,
    /// Distance from the look-at point
    pub distance: f32,
}

impl CameraOrbit {
    /// Create an orbit
    pub fn new(yaw: f32, pitch: f32, distance: f32) -> Self {
        Self { yaw, pitch, distance }
    }

    /// Apply a mouse-drag delta in pixels.
    ///
    /// Yaw is unbounded; pitch is clamped to the configured limits.
    pub fn apply_drag(&mut self, drag: Vec2, config: &CameraConfig) {
        self.yaw -= drag.x * config.drag_sensitivity;
        self.pitch = (self.pitch + drag.y * config.drag_sensitivity)
            .clamp(config.min_pitch, config.max_pitch);
    }

    /// Apply a wheel delta, clamping distance to the configured range
    pub fn apply_zoom(&mut self, wheel: f32, config: &CameraConfig) {
        self.distance = (self.distance + wheel * config.zoom_sensitivity)
            .clamp(config.min_distance, config.max_distance);
    }
}

impl Default for CameraOrbit {
    fn default() -> Self {
        CameraConfig::default().initial_orbit
    }
}

/// Everything the simulation reads from the input layer for one tick
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct InputSnapshot {
    /// Held logical keys
    pub keys: KeySet,
    /// Camera orbit after the input layer applied its deltas
    pub orbit: CameraOrbit,
    /// Mouse drag accumulated this frame, in pixels, not yet applied to `orbit`
    pub drag_delta: Vec2,
}

impl InputSnapshot {
    /// Snapshot with the given keys held and the default orbit
    pub fn with_keys(keys: KeySet) -> Self {
        Self { keys, ..Self::default() }
    }

    /// Replace the orbit
    pub fn with_orbit(mut self, orbit: CameraOrbit) -> Self {
        self.orbit = orbit;
        self
    }

    /// Record this frame's mouse drag
    pub fn with_drag(mut self, drag: Vec2) -> Self {
        self.drag_delta = drag;
        self
    }

    /// Fold the pending drag into the orbit and clear it
    pub fn apply_drag(&mut self, config: &CameraConfig) {
        self.orbit.apply_drag(self.drag_delta, config);
        self.drag_delta = Vec2::zeros();
    }

    /// Whether `key` is held
    pub fn is_held(&self, key: KeySet) -> bool {
        self.keys.contains(key)
    }
}

/// Turns held-key sets into key-down edges
#[derive(Debug, Clone, Copy, Default)]
pub struct KeyTracker {
    previous: KeySet,
}

impl KeyTracker {
    /// Create a tracker with nothing held
    pub fn new() -> Self {
        Self::default()
    }

    /// Record this tick's keys and return those that went down since the last call
    pub fn update(&mut self, held: KeySet) -> KeySet {
        let pressed = held.difference(self.previous);
        self.previous = held;
        pressed
    }

    /// Keys held at the last update
    pub fn held(&self) -> KeySet {
        self.previous
    }
}
