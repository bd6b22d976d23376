//! Animation clip descriptors
//!
//! The core never sees clip content, only each clip's duration and loop mode.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::SimulationError;

/// Named animation states the character can be in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnimationStateId {
    /// Standing still
    Idle,
    /// Walking forward or strafing
    WalkForward,
    /// Walking straight backward
    WalkBackward,
    /// Sprinting
    Run,
    /// Carrying the ball
    HoldingBall,
    /// Bending down to pick the ball up
    CrouchDown,
    /// Throwing the ball
    Throw,
}

impl AnimationStateId {
    /// Every state, in declaration order
    pub const ALL: [Self; 7] = [
        Self::Idle,
        Self::WalkForward,
        Self::WalkBackward,
        Self::Run,
        Self::HoldingBall,
        Self::CrouchDown,
        Self::Throw,
    ];

    /// Clip name used by the asset layer
    pub fn name(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::WalkForward => "walk-forward",
            Self::WalkBackward => "walk-backward",
            Self::Run => "run",
            Self::HoldingBall => "holding-ball",
            Self::CrouchDown => "crouch-down",
            Self::Throw => "throw",
        }
    }
}

impl fmt::Display for AnimationStateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How a clip behaves when its time reaches the end
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoopMode {
    /// Wraps back to the start
    Repeating,
    /// Runs once, clamps on the final frame and signals completion
    PlayOnceClamped,
}

/// Duration and loop mode of one clip
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnimationClipDescriptor {
    /// State this clip plays for
    pub name: AnimationStateId,
    /// Length in seconds
    pub duration: f32,
    /// Loop behaviour
    pub loop_mode: LoopMode,
}

impl AnimationClipDescriptor {
    /// Create a repeating clip descriptor
    pub fn repeating(name: AnimationStateId, duration: f32) -> Self {
        Self { name, duration, loop_mode: LoopMode::Repeating }
    }

    /// Create a play-once clip descriptor
    pub fn play_once(name: AnimationStateId, duration: f32) -> Self {
        Self { name, duration, loop_mode: LoopMode::PlayOnceClamped }
    }

    /// Whether this clip fires a completion when it ends
    pub fn is_play_once(&self) -> bool {
        self.loop_mode == LoopMode::PlayOnceClamped
    }

    /// The clip table the demo ships with
    pub fn default_table() -> Vec<Self> {
        use AnimationStateId::*;
        vec![
            Self::repeating(Idle, 2.0),
            Self::repeating(WalkForward, 1.0),
            Self::repeating(WalkBackward, 1.0),
            Self::repeating(Run, 0.8),
            Self::repeating(HoldingBall, 2.0),
            Self::play_once(CrouchDown, 1.0),
            Self::play_once(Throw, 1.2),
        ]
    }
}

/// Immutable lookup from state to clip descriptor
#[derive(Debug, Clone)]
pub struct ClipTable {
    clips: HashMap<AnimationStateId, AnimationClipDescriptor>,
}

impl ClipTable {
    /// Build a table, requiring exactly one valid clip for every state
    pub fn new(descriptors: &[AnimationClipDescriptor]) -> Result<Self, SimulationError> {
        let mut clips = HashMap::with_capacity(descriptors.len());
        for descriptor in descriptors {
            if !descriptor.duration.is_finite() || descriptor.duration < 0.0 {
                return Err(SimulationError::InvalidClip {
                    name: descriptor.name,
                    reason: format!("duration {} is not a finite, non-negative value", descriptor.duration),
                });
            }
            if clips.insert(descriptor.name, *descriptor).is_some() {
                return Err(SimulationError::InvalidClip {
                    name: descriptor.name,
                    reason: "declared more than once".to_string(),
                });
            }
        }

        if let Some(missing) = AnimationStateId::ALL.iter().find(|id| !clips.contains_key(*id)) {
            return Err(SimulationError::MissingClip(*missing));
        }

        Ok(Self { clips })
    }

    /// Look up a clip
    pub fn get(&self, id: AnimationStateId) -> &AnimationClipDescriptor {
        // Construction guarantees every state is present.
        &self.clips[&id]
    }
}

impl Default for ClipTable {
    fn default() -> Self {
        let clips = AnimationClipDescriptor::default_table()
            .into_iter()
            .map(|clip| (clip.name, clip))
            .collect();
        Self { clips }
    }
}
