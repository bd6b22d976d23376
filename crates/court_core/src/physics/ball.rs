//! Ball physics
//!
//! The ball is kinematic while held: it is placed at the hand every tick with
//! zero velocity. Once released it integrates under gravity, bounces off box
//! faces and the ground plane, and is put back at rest if it escapes.

use super::collision::CollisionWorld;
use super::throw_curve;
use crate::character::{Character, CharacterBallState};
use crate::config::{BallConfig, PhysicsConfig};
use crate::events::SimulationEvent;
use crate::foundation::math::{utils, Vec3};

/// The ball body
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ball {
    /// Center position
    pub position: Vec3,
    /// Linear velocity in m/s
    pub velocity: Vec3,
    /// Whether the ball is rendered
    pub visible: bool,
}

impl Ball {
    /// A visible ball at rest
    pub fn at_rest(position: Vec3) -> Self {
        Self {
            position,
            velocity: Vec3::zeros(),
            visible: true,
        }
    }

    /// Current speed
    pub fn speed(&self) -> f32 {
        self.velocity.magnitude()
    }
}

/// Steps the ball each tick
#[derive(Debug, Clone)]
pub struct BallPhysics {
    physics: PhysicsConfig,
    ball: BallConfig,
    trace: bool,
}

impl BallPhysics {
    /// Create the stepper
    pub fn new(physics: PhysicsConfig, ball: BallConfig) -> Self {
        Self {
            physics,
            ball,
            trace: false,
        }
    }

    /// Enable per-tick trace logging
    pub fn with_trace(mut self, trace: bool) -> Self {
        self.trace = trace;
        self
    }

    /// Ball geometry and throw parameters
    pub fn ball_config(&self) -> &BallConfig {
        &self.ball
    }

    /// A new ball at the rest position
    pub fn spawn(&self) -> Ball {
        Ball::at_rest(self.ball.rest_position)
    }

    /// Advance the ball by `delta` seconds.
    ///
    /// `throw_progress` is the throw clip's normalized progress when that clip
    /// is the current animation, `None` otherwise. Without a character the
    /// ball always flies free.
    pub fn tick(
        &self,
        ball: &mut Ball,
        mut character: Option<&mut Character>,
        world: &CollisionWorld,
        throw_progress: Option<f32>,
        delta: f32,
        events: &mut Vec<SimulationEvent>,
    ) {
        if let Some(character) = character.as_deref_mut() {
            if self.follows_hand(ball, &character.ball_state) {
                let progress = throw_progress.filter(|_| character.ball_state.is_throwing_ball);
                ball.position = throw_curve::hand_position(&self.ball, &character.pose, progress);
                ball.velocity = Vec3::zeros();

                if progress.is_some_and(|p| throw_curve::is_past_release(&self.ball, p)) {
                    self.release(ball, character, events);
                }
                return;
            }
        }

        self.integrate(ball, world, delta, events);

        if self.has_escaped(ball) {
            let escaped_at = ball.position;
            self.reset(ball, character.map(|character| &mut character.ball_state));
            events.push(SimulationEvent::BallReset { escaped_at });
        }
    }

    fn follows_hand(&self, ball: &Ball, state: &CharacterBallState) -> bool {
        if !state.has_ball || state.ball_was_thrown {
            return false;
        }
        // Residual velocity outside a throw means something else owns the ball.
        state.is_throwing_ball || ball.speed() <= self.physics.held_velocity_epsilon
    }

    /// Put the ball in the character's hand with zero velocity
    pub fn attach_to_hand(&self, ball: &mut Ball, character: &Character) {
        ball.position = throw_curve::hand_position(&self.ball, &character.pose, None);
        ball.velocity = Vec3::zeros();
        ball.visible = true;
    }

    /// Release the ball from the hand along the character's facing.
    ///
    /// Does nothing and returns `false` unless the character holds the ball,
    /// so it runs at most once per throw however it is reached.
    pub fn release(
        &self,
        ball: &mut Ball,
        character: &mut Character,
        events: &mut Vec<SimulationEvent>,
    ) -> bool {
        let state = &mut character.ball_state;
        if !state.has_ball {
            return false;
        }
        state.has_ball = false;
        state.ball_was_thrown = true;

        let throw = &self.ball.throw;
        let release_progress = Some(throw.release_progress);
        ball.position = throw_curve::hand_position(&self.ball, &character.pose, release_progress);
        ball.velocity = utils::yaw_to_direction(character.pose.yaw) * throw.forward_speed
            + Vec3::new(0.0, throw.upward_speed, 0.0);

        log::debug!(
            "Ball released at {:?} with velocity {:?}",
            ball.position,
            ball.velocity
        );
        events.push(SimulationEvent::BallReleased {
            position: ball.position,
            velocity: ball.velocity,
        });
        true
    }

    fn integrate(
        &self,
        ball: &mut Ball,
        world: &CollisionWorld,
        delta: f32,
        events: &mut Vec<SimulationEvent>,
    ) {
        let physics = &self.physics;
        ball.velocity.y += physics.gravity * delta;
        let candidate = ball.position + ball.velocity * delta;

        match world.query_sphere(&candidate, self.ball.radius) {
            Some(hit) => {
                let axis = hit.face.axis();
                let mut next = candidate;
                next[axis] = ball.position[axis];

                ball.velocity[axis] =
                    hit.face.outward_sign() * ball.velocity[axis].abs() * physics.bounce_strength;
                ball.velocity *= physics.collision_damping;
                ball.position = next;

                if self.trace {
                    log::trace!("Ball hit {} on {:?}", hit.box_label, hit.face);
                }
                events.push(SimulationEvent::BallHitBox {
                    box_label: hit.box_label,
                    face: hit.face,
                });
            }
            None => ball.position = candidate,
        }

        self.ground_contact(ball, delta);

        if self.trace {
            log::trace!("Ball at {:?} moving {:?}", ball.position, ball.velocity);
        }
    }

    fn ground_contact(&self, ball: &mut Ball, delta: f32) {
        let physics = &self.physics;
        let floor = physics.ground_y + self.ball.radius;
        if ball.position.y >= floor {
            return;
        }

        ball.position.y = floor;
        // Gravity gained this tick alone never counts as an impact.
        let incoming = -ball.velocity.y;
        let threshold = physics.rest_speed_threshold.max(-physics.gravity * delta);
        ball.velocity.y = if incoming > threshold {
            incoming * physics.ground_bounce
        } else {
            0.0
        };
        ball.velocity.x *= physics.ground_friction;
        ball.velocity.z *= physics.ground_friction;
    }

    fn has_escaped(&self, ball: &Ball) -> bool {
        let physics = &self.physics;
        !ball.position.iter().all(|c| c.is_finite())
            || ball.position.y < physics.ground_y - physics.reset_depth
            || ball.position.magnitude() > physics.reset_radius
    }

    /// Put the ball back at rest and clear the character's ball flags
    pub fn reset(&self, ball: &mut Ball, state: Option<&mut CharacterBallState>) {
        log::warn!(
            "Ball escaped to {:?}, resetting to {:?}",
            ball.position,
            self.ball.rest_position
        );
        *ball = self.spawn();
        if let Some(state) = state {
            state.has_ball = false;
            state.is_throwing_ball = false;
            state.ball_was_thrown = false;
        }
    }
}
