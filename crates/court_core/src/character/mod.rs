//! Player character
//!
//! # Module Organization
//!
//! - [`state`] - Pose, ball flags and the character record
//! - [`controller`] - Input-driven movement and the pickup/throw transitions

pub mod controller;
pub mod state;

pub use controller::CharacterController;
pub use state::{Character, CharacterBallState, Pose};
