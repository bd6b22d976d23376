//! Notable things that happened during a tick
//!
//! Collected in order and handed back in the frame output so the host can
//! play sounds or update a HUD without polling flags.

use crate::animation::AnimationStateId;
use crate::foundation::math::Vec3;
use crate::physics::collision::Face;

/// Simulation event
#[derive(Debug, Clone, PartialEq)]
pub enum SimulationEvent {
    /// The controller switched the active clip
    AnimationChanged {
        /// Previous state
        from: AnimationStateId,
        /// New state
        to: AnimationStateId,
    },
    /// The crouch-down transition started
    PickupStarted,
    /// A pickup was requested out of reach
    PickupRejected {
        /// Distance between character and ball
        distance: f32,
    },
    /// The crouch-down transition finished and the ball is in hand
    PickupCompleted,
    /// The throw transition started
    ThrowStarted,
    /// The ball left the hand
    BallReleased {
        /// Release point
        position: Vec3,
        /// Launch velocity
        velocity: Vec3,
    },
    /// The throw transition finished
    ThrowCompleted,
    /// The ball bounced off a box face
    BallHitBox {
        /// Label of the box
        box_label: String,
        /// Contact face
        face: Face,
    },
    /// The ball left the playable area and was put back at rest
    BallReset {
        /// Position the ball escaped to
        escaped_at: Vec3,
    },
}
