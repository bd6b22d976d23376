//! Animation state machine and clip table
//!
//! Clip content is owned by the render layer; here only durations, loop modes
//! and the completion of play-once clips matter.

pub mod clip;
pub mod state_machine;

pub use clip::{AnimationClipDescriptor, AnimationStateId, ClipTable, LoopMode};
pub use state_machine::{AnimationStateMachine, CrossFade};
