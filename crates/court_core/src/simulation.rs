//! # Simulation Loop
//!
//! Owns every subsystem and runs them in a fixed order each tick:
//!
//! 1. animation advance, dispatching a play-once completion to the controller
//! 2. character controller
//! 3. ball physics, given the throw progress while the throw clip plays
//! 4. follow camera
//!
//! The character and the ball are optional until the host spawns them; a
//! phase whose entity is missing does nothing.

use crate::animation::{AnimationStateId, AnimationStateMachine, ClipTable, CrossFade};
use crate::camera::CameraController;
use crate::character::{Character, CharacterController, Pose};
use crate::config::SimulationConfig;
use crate::error::SimulationError;
use crate::events::SimulationEvent;
use crate::foundation::math::Vec3;
use crate::foundation::time::FrameClock;
use crate::input::InputSnapshot;
use crate::level::LevelGeometry;
use crate::physics::{Ball, BallPhysics, CollisionWorld};

/// Character state handed to the renderer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CharacterFrame {
    /// Pose after this tick
    pub pose: Pose,
    /// Clip to sample
    pub animation: AnimationStateId,
    /// Seconds into the clip
    pub clip_time: f32,
    /// Cross-fade from the previous clip, if still running
    pub fade: Option<CrossFade>,
}

/// Ball state handed to the renderer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BallFrame {
    /// Center position
    pub position: Vec3,
    /// Whether to draw it
    pub visible: bool,
}

/// Everything one tick produced
#[derive(Debug, Clone, PartialEq)]
pub struct FrameOutput {
    /// Index of this tick, starting at 1
    pub frame: u64,
    /// Delta actually simulated after clamping
    pub delta: f32,
    /// Character, when spawned
    pub character: Option<CharacterFrame>,
    /// Ball, when spawned
    pub ball: Option<BallFrame>,
    /// Camera position
    pub camera_eye: Vec3,
    /// Camera look-at point
    pub camera_look_at: Vec3,
    /// Events in the order they happened
    pub events: Vec<SimulationEvent>,
}

/// The whole simulation core
#[derive(Debug)]
pub struct Simulation {
    config: SimulationConfig,
    world: CollisionWorld,
    animator: AnimationStateMachine,
    controller: CharacterController,
    physics: BallPhysics,
    camera: CameraController,
    clock: FrameClock,
    character: Option<Character>,
    ball: Option<Ball>,
}

impl Simulation {
    /// Build a simulation with no character or ball spawned yet
    pub fn new(config: SimulationConfig, level: &LevelGeometry) -> Result<Self, SimulationError> {
        config.validate()?;

        let world = CollisionWorld::build(level)?;
        let clips = ClipTable::new(&config.animation.clips)?;
        let animator = AnimationStateMachine::new(clips, config.animation.fade_duration)
            .with_trace(config.debug.trace_animation);
        let controller = CharacterController::new(config.character.clone());
        let physics = BallPhysics::new(config.physics.clone(), config.ball.clone())
            .with_trace(config.debug.trace_physics);
        let camera =
            CameraController::new(&config.camera).with_trace(config.debug.trace_camera);
        let clock = FrameClock::new(config.max_frame_delta);

        log::info!(
            "Simulation ready: {} collision boxes, {} clips",
            world.len(),
            config.animation.clips.len()
        );

        Ok(Self {
            config,
            world,
            animator,
            controller,
            physics,
            camera,
            clock,
            character: None,
            ball: None,
        })
    }

    /// Build with default configuration and both entities spawned
    pub fn with_defaults(level: &LevelGeometry) -> Result<Self, SimulationError> {
        let mut simulation = Self::new(SimulationConfig::default(), level)?;
        simulation.spawn_character();
        simulation.spawn_ball();
        Ok(simulation)
    }

    /// Spawn (or respawn) the character at its configured position
    pub fn spawn_character(&mut self) -> &mut Character {
        log::debug!("Spawning character at {:?}", self.config.character.spawn_position);
        if self.animator.current() != AnimationStateId::Idle {
            self.animator.play(AnimationStateId::Idle);
        }
        self.camera.reset();
        self.character.insert(self.controller.spawn())
    }

    /// Spawn (or respawn) the ball at its rest position
    pub fn spawn_ball(&mut self) -> &mut Ball {
        log::debug!("Spawning ball at {:?}", self.config.ball.rest_position);
        self.ball.insert(self.physics.spawn())
    }

    /// Remove the character
    pub fn despawn_character(&mut self) -> Option<Character> {
        self.character.take()
    }

    /// Remove the ball, dropping the character's hold on it
    pub fn despawn_ball(&mut self) -> Option<Ball> {
        if let Some(character) = &mut self.character {
            character.ball_state.has_ball = false;
            character.ball_state.ball_was_thrown = false;
        }
        self.ball.take()
    }

    /// Run one tick
    pub fn tick(&mut self, input: &InputSnapshot, delta: f32) -> FrameOutput {
        let delta = self.clock.advance(delta);
        let mut events = Vec::new();

        if let Some(finished) = self.animator.advance(delta) {
            match self.character.as_mut() {
                Some(character) => self.controller.on_animation_complete(
                    finished,
                    character,
                    self.ball.as_mut(),
                    &mut self.animator,
                    &self.physics,
                    &mut events,
                ),
                None => log::debug!("Clip {finished} completed with no character"),
            }
        }

        if let Some(character) = self.character.as_mut() {
            self.controller.tick(
                character,
                self.ball.as_mut(),
                input,
                &self.world,
                &mut self.animator,
                delta,
                &mut events,
            );
        }

        let throw_progress = (self.animator.current() == AnimationStateId::Throw)
            .then(|| self.animator.progress());
        if let Some(ball) = self.ball.as_mut() {
            self.physics.tick(
                ball,
                self.character.as_mut(),
                &self.world,
                throw_progress,
                delta,
                &mut events,
            );
        }

        if let Some(character) = &self.character {
            self.camera.update(&character.pose.position, &input.orbit, delta);
        }

        self.frame_output(delta, events)
    }

    fn frame_output(&self, delta: f32, events: Vec<SimulationEvent>) -> FrameOutput {
        FrameOutput {
            frame: self.clock.frame_count(),
            delta,
            character: self.character.as_ref().map(|character| CharacterFrame {
                pose: character.pose,
                animation: self.animator.current(),
                clip_time: self.animator.time(),
                fade: self.animator.fade().copied(),
            }),
            ball: self.ball.as_ref().map(|ball| BallFrame {
                position: ball.position,
                visible: ball.visible,
            }),
            camera_eye: self.camera.eye(),
            camera_look_at: self.camera.look_at(),
            events,
        }
    }

    /// Active configuration
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Static collision world
    pub fn world(&self) -> &CollisionWorld {
        &self.world
    }

    /// Animation state machine
    pub fn animator(&self) -> &AnimationStateMachine {
        &self.animator
    }

    /// Follow camera
    pub fn camera(&self) -> &CameraController {
        &self.camera
    }

    /// Frame clock
    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }

    /// The character, if spawned
    pub fn character(&self) -> Option<&Character> {
        self.character.as_ref()
    }

    /// Mutable character access for hosts that teleport it
    pub fn character_mut(&mut self) -> Option<&mut Character> {
        self.character.as_mut()
    }

    /// The ball, if spawned
    pub fn ball(&self) -> Option<&Ball> {
        self.ball.as_ref()
    }

    /// Mutable ball access
    pub fn ball_mut(&mut self) -> Option<&mut Ball> {
        self.ball.as_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    #[test]
    fn test_empty_simulation_ticks() {
        let mut simulation =
            Simulation::new(SimulationConfig::default(), &LevelGeometry::court()).unwrap();
        let output = simulation.tick(&InputSnapshot::default(), DT);

        assert_eq!(output.frame, 1);
        assert!(output.character.is_none());
        assert!(output.ball.is_none());
        assert!(output.events.is_empty());
    }

    #[test]
    fn test_ball_without_character_falls() {
        let mut simulation =
            Simulation::new(SimulationConfig::default(), &LevelGeometry::empty()).unwrap();
        simulation.spawn_ball().position.y = 2.0;

        for _ in 0..10 {
            simulation.tick(&InputSnapshot::default(), DT);
        }
        assert!(simulation.ball().unwrap().position.y < 2.0);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = SimulationConfig::default();
        config.ball.radius = 0.0;
        assert!(matches!(
            Simulation::new(config, &LevelGeometry::court()),
            Err(SimulationError::Config(_))
        ));
    }

    #[test]
    fn test_camera_trace_follows_debug_config() {
        let simulation = Simulation::with_defaults(&LevelGeometry::court()).unwrap();
        assert!(!simulation.camera().is_tracing());

        let mut config = SimulationConfig::default();
        config.debug.trace_camera = true;
        let simulation = Simulation::new(config, &LevelGeometry::court()).unwrap();
        assert!(simulation.camera().is_tracing());
    }

    #[test]
    fn test_delta_is_clamped() {
        let mut simulation = Simulation::with_defaults(&LevelGeometry::court()).unwrap();
        let output = simulation.tick(&InputSnapshot::default(), 3.0);
        assert_eq!(output.delta, 0.25);

        let output = simulation.tick(&InputSnapshot::default(), f32::NAN);
        assert_eq!(output.delta, 0.0);
    }

    #[test]
    fn test_despawn_ball_drops_hold() {
        let mut simulation = Simulation::with_defaults(&LevelGeometry::court()).unwrap();
        simulation.character_mut().unwrap().ball_state.has_ball = true;
        assert!(simulation.despawn_ball().is_some());
        assert!(!simulation.character().unwrap().has_ball());

        // Input with no ball present is harmless.
        let output = simulation.tick(&InputSnapshot::with_keys(crate::input::KeySet::PICKUP), DT);
        assert!(output.ball.is_none());
    }
}
