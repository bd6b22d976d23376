//! Character data

use crate::animation::AnimationStateId;
use crate::foundation::math::Vec3;

/// Position plus facing. No pitch or roll is simulated.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Pose {
    /// Feet position in world space
    pub position: Vec3,
    /// Facing angle about +Y in radians; zero faces +Z
    pub yaw: f32,
}

impl Pose {
    /// Create a pose
    pub fn new(position: Vec3, yaw: f32) -> Self {
        Self { position, yaw }
    }
}

/// Who holds the ball and which scripted transition is running.
///
/// One value, handed by exclusive reference to whichever phase of the tick is
/// running: the completion handler, then the controller, then ball physics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CharacterBallState {
    /// The ball is in (or being thrown from) the character's hand
    pub has_ball: bool,
    /// Set when a pickup completes, cleared when a throw completes
    pub is_crouched: bool,
    /// A play-once transition is running; movement and abilities are locked
    pub is_transitioning: bool,
    /// The throw clip is running
    pub is_throwing_ball: bool,
    /// The ball left the hand during the current throw
    pub ball_was_thrown: bool,
}

/// The player character
#[derive(Debug, Clone, PartialEq)]
pub struct Character {
    /// Current pose
    pub pose: Pose,
    /// Animation state last applied by the simulation
    pub animation: AnimationStateId,
    /// Ball ownership and transition flags
    pub ball_state: CharacterBallState,
}

impl Character {
    /// Spawn an idle character without the ball
    pub fn new(pose: Pose) -> Self {
        Self {
            pose,
            animation: AnimationStateId::Idle,
            ball_state: CharacterBallState::default(),
        }
    }

    /// Whether the ball is in hand
    pub fn has_ball(&self) -> bool {
        self.ball_state.has_ball
    }

    /// Whether input is locked by a scripted transition
    pub fn is_transitioning(&self) -> bool {
        self.ball_state.is_transitioning
    }
}
