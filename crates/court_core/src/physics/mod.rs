//! Ball physics and static collision
//!
//! The collision world is hand-rolled: a flat list of boxes queried with a
//! sphere. The ball integrates with explicit Euler and resolves at most one
//! box contact per tick.

pub mod ball;
pub mod collision;
pub mod throw_curve;

pub use ball::{Ball, BallPhysics};
pub use collision::{Aabb, BoundingSphere, CollisionBox, CollisionWorld, Face, FaceHit, FaceMask};
