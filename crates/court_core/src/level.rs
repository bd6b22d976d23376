//! Static level geometry
//!
//! The asset layer derives one box per collidable object after the level
//! loads. The same data can be written by hand as a RON or TOML file.

use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::foundation::math::Vec3;
use crate::physics::collision::{Aabb, CollisionBox, Face, FaceMask};

/// One collidable object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxDescriptor {
    /// Identifying label
    pub label: String,
    /// Minimum corner in world space
    pub min: Vec3,
    /// Maximum corner in world space
    pub max: Vec3,
    /// Solid faces; `None` means every face is solid
    #[serde(default)]
    pub faces: Option<Vec<Face>>,
}

impl BoxDescriptor {
    /// Create a descriptor with every face solid
    pub fn new(label: impl Into<String>, min: Vec3, max: Vec3) -> Self {
        Self {
            label: label.into(),
            min,
            max,
            faces: None,
        }
    }

    /// Restrict the solid faces
    pub fn with_faces(mut self, faces: &[Face]) -> Self {
        self.faces = Some(faces.to_vec());
        self
    }

    /// Convert to a collision box
    pub fn to_collision_box(&self) -> CollisionBox {
        let collision_box = CollisionBox::new(self.label.clone(), Aabb::new(self.min, self.max));
        match &self.faces {
            Some(faces) => collision_box.with_faces(FaceMask::from_faces(faces)),
            None => collision_box,
        }
    }
}

/// Every collidable object of a level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelGeometry {
    /// Boxes in query order
    pub boxes: Vec<BoxDescriptor>,
}

impl LevelGeometry {
    /// Level with no geometry
    pub fn empty() -> Self {
        Self { boxes: Vec::new() }
    }

    /// The outdoor half court the demo ships with.
    ///
    /// The backboard is solid only on its two broad faces so a ball clipping
    /// its thin edges passes through.
    pub fn court() -> Self {
        Self {
            boxes: vec![
                BoxDescriptor::new(
                    "hoop_pole",
                    Vec3::new(-0.15, 0.0, -8.15),
                    Vec3::new(0.15, 3.05, -7.85),
                ),
                BoxDescriptor::new(
                    "backboard",
                    Vec3::new(-0.9, 2.9, -7.6),
                    Vec3::new(0.9, 4.0, -7.55),
                )
                .with_faces(&[Face::Front, Face::Back]),
                BoxDescriptor::new(
                    "scorer_table",
                    Vec3::new(-2.0, 0.0, 6.0),
                    Vec3::new(2.0, 1.1, 6.8),
                ),
                BoxDescriptor::new(
                    "equipment_rack",
                    Vec3::new(6.0, 0.0, -3.0),
                    Vec3::new(6.5, 1.2, 3.0),
                ),
            ],
        }
    }
}

impl Default for LevelGeometry {
    fn default() -> Self {
        Self::court()
    }
}

impl Config for LevelGeometry {}
