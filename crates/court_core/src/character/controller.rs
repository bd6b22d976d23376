//! Character controller
//!
//! Turns held keys into camera-relative movement, picks the locomotion clip,
//! and starts the pickup and throw transitions. While a transition runs,
//! movement and abilities are locked until its clip completes.

use super::state::Character;
use crate::animation::{AnimationStateId, AnimationStateMachine};
use crate::config::CharacterConfig;
use crate::events::SimulationEvent;
use crate::foundation::math::{up, utils, Vec3};
use crate::input::{InputSnapshot, KeySet, KeyTracker};
use crate::physics::{Ball, BallPhysics, CollisionWorld};

/// Camera-relative forward on the ground plane for a camera yaw
pub fn camera_forward(camera_yaw: f32) -> Vec3 {
    Vec3::new(-camera_yaw.sin(), 0.0, -camera_yaw.cos())
}

/// Camera-relative right on the ground plane for a camera yaw
pub fn camera_right(camera_yaw: f32) -> Vec3 {
    Vec3::new(camera_yaw.cos(), 0.0, -camera_yaw.sin())
}

/// Unit movement direction for the held keys, `None` when they cancel out
pub fn movement_direction(keys: KeySet, camera_yaw: f32) -> Option<Vec3> {
    let axis = |positive: KeySet, negative: KeySet| {
        match (keys.contains(positive), keys.contains(negative)) {
            (true, false) => 1.0,
            (false, true) => -1.0,
            _ => 0.0,
        }
    };
    let forward = axis(KeySet::FORWARD, KeySet::BACKWARD);
    let right = axis(KeySet::RIGHT, KeySet::LEFT);
    utils::try_normalize(&(camera_forward(camera_yaw) * forward + camera_right(camera_yaw) * right))
}

/// Locomotion clip for the current state.
///
/// Holding the ball overrides everything. Walking backward is only used for
/// pure backward input; sprint selects the run clip in any direction.
pub fn select_locomotion(has_ball: bool, keys: KeySet, moving: bool) -> AnimationStateId {
    if has_ball {
        AnimationStateId::HoldingBall
    } else if !moving {
        AnimationStateId::Idle
    } else if keys.contains(KeySet::SPRINT) {
        AnimationStateId::Run
    } else if keys.intersection(KeySet::MOVEMENT) == KeySet::BACKWARD {
        AnimationStateId::WalkBackward
    } else {
        AnimationStateId::WalkForward
    }
}

/// Drives the character from input
#[derive(Debug, Clone)]
pub struct CharacterController {
    config: CharacterConfig,
    keys: KeyTracker,
}

impl CharacterController {
    /// Create a controller
    pub fn new(config: CharacterConfig) -> Self {
        Self {
            config,
            keys: KeyTracker::new(),
        }
    }

    /// Movement parameters
    pub fn config(&self) -> &CharacterConfig {
        &self.config
    }

    /// Spawn a character at the configured position
    pub fn spawn(&self) -> Character {
        Character::new(super::Pose::new(self.config.spawn_position, self.config.spawn_yaw))
    }

    /// Run one controller tick.
    ///
    /// Key edges are recorded even while a transition locks input, so a key
    /// held through the lockout does not fire when it ends.
    pub fn tick(
        &mut self,
        character: &mut Character,
        ball: Option<&mut Ball>,
        input: &InputSnapshot,
        world: &CollisionWorld,
        animator: &mut AnimationStateMachine,
        delta: f32,
        events: &mut Vec<SimulationEvent>,
    ) {
        let pressed = self.keys.update(input.keys);
        if character.ball_state.is_transitioning {
            return;
        }

        let direction = movement_direction(input.keys, input.orbit.yaw);
        if let Some(direction) = direction {
            self.step(character, &direction, input.is_held(KeySet::SPRINT), world, delta);
        }

        let locomotion =
            select_locomotion(character.ball_state.has_ball, input.keys, direction.is_some());
        Self::switch_to(character, animator, locomotion, events);

        if pressed.contains(KeySet::PICKUP) {
            self.try_pickup(character, ball, animator, events);
        }
        if pressed.contains(KeySet::THROW) {
            Self::try_throw(character, animator, events);
        }
    }

    fn step(
        &self,
        character: &mut Character,
        direction: &Vec3,
        sprinting: bool,
        world: &CollisionWorld,
        delta: f32,
    ) {
        let speed = if sprinting {
            self.config.sprint_speed
        } else {
            self.config.walk_speed
        };
        let candidate = character.pose.position + direction * speed * delta;
        let probe = candidate + up() * self.config.probe_height;

        match world.query_sphere(&probe, self.config.radius) {
            Some(hit) => log::trace!("Movement blocked by {} ({:?})", hit.box_label, hit.face),
            None => character.pose.position = candidate,
        }
        // Facing follows input even when blocked.
        character.pose.yaw = utils::direction_to_yaw(direction);
    }

    fn switch_to(
        character: &mut Character,
        animator: &mut AnimationStateMachine,
        state: AnimationStateId,
        events: &mut Vec<SimulationEvent>,
    ) {
        let from = character.animation;
        if from == state {
            return;
        }
        animator.play(state);
        character.animation = state;
        events.push(SimulationEvent::AnimationChanged { from, to: state });
    }

    fn try_pickup(
        &self,
        character: &mut Character,
        ball: Option<&mut Ball>,
        animator: &mut AnimationStateMachine,
        events: &mut Vec<SimulationEvent>,
    ) {
        if character.ball_state.has_ball || character.ball_state.is_transitioning {
            return;
        }
        let Some(ball) = ball else {
            log::debug!("Pickup ignored: no ball in the scene");
            return;
        };

        let distance = (ball.position - character.pose.position).magnitude();
        if distance > self.config.pickup_distance {
            log::debug!(
                "Ball out of reach ({:.2} > {:.2})",
                distance,
                self.config.pickup_distance
            );
            events.push(SimulationEvent::PickupRejected { distance });
            return;
        }

        ball.velocity = Vec3::zeros();
        character.ball_state.is_transitioning = true;
        Self::switch_to(character, animator, AnimationStateId::CrouchDown, events);
        log::debug!("Picking up ball");
        events.push(SimulationEvent::PickupStarted);
    }

    fn try_throw(
        character: &mut Character,
        animator: &mut AnimationStateMachine,
        events: &mut Vec<SimulationEvent>,
    ) {
        let state = &mut character.ball_state;
        if !state.has_ball || state.is_transitioning {
            return;
        }
        state.is_transitioning = true;
        state.is_throwing_ball = true;
        state.ball_was_thrown = false;
        Self::switch_to(character, animator, AnimationStateId::Throw, events);
        log::debug!("Throwing ball");
        events.push(SimulationEvent::ThrowStarted);
    }

    /// Handle a play-once clip finishing.
    ///
    /// A throw that completes before the ball physics saw the release point
    /// releases the ball here, so every throw releases exactly once.
    pub fn on_animation_complete(
        &self,
        finished: AnimationStateId,
        character: &mut Character,
        ball: Option<&mut Ball>,
        animator: &mut AnimationStateMachine,
        physics: &BallPhysics,
        events: &mut Vec<SimulationEvent>,
    ) {
        match finished {
            AnimationStateId::CrouchDown => {
                let state = &mut character.ball_state;
                state.has_ball = true;
                state.is_crouched = true;
                state.is_transitioning = false;
                state.ball_was_thrown = false;
                if let Some(ball) = ball {
                    physics.attach_to_hand(ball, character);
                }
                Self::switch_to(character, animator, AnimationStateId::HoldingBall, events);
                log::debug!("Ball picked up");
                events.push(SimulationEvent::PickupCompleted);
            }
            AnimationStateId::Throw => {
                if let Some(ball) = ball {
                    if physics.release(ball, character, events) {
                        log::debug!("Throw finished before the release point, released late");
                    }
                }
                let state = &mut character.ball_state;
                state.has_ball = false;
                state.is_crouched = false;
                state.is_throwing_ball = false;
                state.is_transitioning = false;
                Self::switch_to(character, animator, AnimationStateId::Idle, events);
                log::debug!("Throw complete");
                events.push(SimulationEvent::ThrowCompleted);
            }
            other => log::trace!("No completion handler for {other}"),
        }
    }
}
