//! # Court Core
//!
//! Simulation core for a third-person ball court demo: a character walks a
//! flat court, picks up a ball and throws it, and the ball bounces off the
//! level's boxes and the ground.
//!
//! ## Features
//!
//! - **Collision World**: Static axis-aligned boxes queried with spheres, with
//!   per-box solid faces
//! - **Animation Gating**: Play-once clips lock input until they complete
//! - **Ball Physics**: Kinematic while held, Euler-integrated once released
//! - **Follow Camera**: Frame-rate independent orbit camera
//! - **Configuration**: Every tuned constant loadable from TOML or RON
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use court_core::prelude::*;
//!
//! fn main() -> Result<(), SimulationError> {
//!     let mut simulation = Simulation::with_defaults(&LevelGeometry::court())?;
//!     let input = InputSnapshot::with_keys(KeySet::FORWARD);
//!     let output = simulation.tick(&input, 1.0 / 60.0);
//!     println!("{:?}", output.character.map(|c| c.pose.position));
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod foundation;
pub mod config;
pub mod input;
pub mod animation;
pub mod physics;
pub mod character;
pub mod camera;
pub mod level;
pub mod events;

mod error;
mod simulation;

pub use error::SimulationError;
pub use simulation::{BallFrame, CharacterFrame, FrameOutput, Simulation};

#[cfg(test)]
mod tests;

/// Common imports for simulation hosts
pub mod prelude {
    pub use crate::{
        Simulation, SimulationError, FrameOutput,
        animation::AnimationStateId,
        character::{Character, Pose},
        config::{Config, SimulationConfig},
        events::SimulationEvent,
        foundation::math::{Vec2, Vec3},
        input::{CameraOrbit, InputSnapshot, KeySet},
        level::LevelGeometry,
        physics::Ball,
    };
}
