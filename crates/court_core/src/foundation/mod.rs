//! Foundation module - Core utilities and types
//!
//! This module provides fundamental utilities used throughout the simulation:
//! - Math types and operations
//! - Frame time management
//! - Logging utilities

pub mod math;
pub mod time;
pub mod logging;
