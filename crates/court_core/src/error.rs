//! Construction-time errors
//!
//! Ticks never fail; only building a world, a clip table or a whole
//! simulation from external data can.

use thiserror::Error;

use crate::animation::AnimationStateId;
use crate::config::ConfigError;

/// Errors raised while assembling the simulation from level and clip data
#[derive(Error, Debug)]
pub enum SimulationError {
    /// A collision box has non-finite or inverted bounds
    #[error("Invalid collision box '{label}': {reason}")]
    InvalidBox {
        /// Label of the offending box
        label: String,
        /// What is wrong with it
        reason: String,
    },

    /// Two collision boxes share a label
    #[error("Duplicate collision box label '{0}'")]
    DuplicateBoxLabel(String),

    /// The clip table has no entry for a state
    #[error("No animation clip for state '{0}'")]
    MissingClip(AnimationStateId),

    /// A clip entry is unusable
    #[error("Invalid animation clip '{name}': {reason}")]
    InvalidClip {
        /// State the clip belongs to
        name: AnimationStateId,
        /// What is wrong with it
        reason: String,
    },

    /// Configuration failed to load or validate
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}
