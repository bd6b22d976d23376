//! Sphere-vs-box collision detection
//!
//! # Module Organization
//!
//! - [`primitives`] - Bounding sphere and axis-aligned box
//! - [`face`] - Contact face classification and face masks
//! - [`world`] - The static collision world built from level data

pub mod primitives;
pub mod face;
pub mod world;

// Re-export commonly used types
pub use primitives::{Aabb, BoundingSphere};
pub use face::{Face, FaceMask};
pub use world::{CollisionBox, CollisionWorld, FaceHit};
