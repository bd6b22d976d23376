//! Static collision world
//!
//! Built once from level geometry and never mutated afterwards. Both the
//! character controller and the ball physics query it read-only.

use std::collections::HashSet;

use super::face::{Face, FaceMask};
use super::primitives::{Aabb, BoundingSphere};
use crate::error::SimulationError;
use crate::foundation::math::Vec3;
use crate::level::LevelGeometry;

/// A labelled static box
#[derive(Debug, Clone, PartialEq)]
pub struct CollisionBox {
    /// Identifying label from the level data
    pub label: String,
    /// World-space bounds
    pub aabb: Aabb,
    /// Faces that take part in collision response
    pub faces: FaceMask,
}

impl CollisionBox {
    /// Create a box where every face is solid
    pub fn new(label: impl Into<String>, aabb: Aabb) -> Self {
        Self {
            label: label.into(),
            aabb,
            faces: FaceMask::all(),
        }
    }

    /// Restrict collision response to `faces`
    pub fn with_faces(mut self, faces: FaceMask) -> Self {
        self.faces = faces;
        self
    }

    /// Whether only a subset of faces is solid
    pub fn is_restricted(&self) -> bool {
        self.faces != FaceMask::all()
    }

    /// Classify a sphere against this box, ignoring face restrictions.
    ///
    /// The sphere hits when its center is inside the box grown by the radius
    /// but not inside the box itself. The face is taken from the axis with the
    /// smallest penetration into the grown box; ties go to X, then Y, then Z.
    pub fn classify(&self, sphere: &BoundingSphere) -> Option<Face> {
        let center = &sphere.center;
        let expanded = self.aabb.expanded(sphere.radius);
        if !expanded.contains(center) || self.aabb.contains(center) {
            return None;
        }

        let mut best_axis = 0;
        let mut best_penetration = f32::INFINITY;
        for axis in 0..3 {
            let penetration =
                (center[axis] - expanded.min[axis]).min(expanded.max[axis] - center[axis]);
            if penetration < best_penetration {
                best_penetration = penetration;
                best_axis = axis;
            }
        }

        let offset = center[best_axis] - self.aabb.center()[best_axis];
        Some(Face::from_axis_offset(best_axis, offset))
    }
}

/// Result of a sphere query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FaceHit {
    /// Label of the box that was hit
    pub box_label: String,
    /// Contact face
    pub face: Face,
}

/// Static set of collision boxes
#[derive(Debug, Clone, Default)]
pub struct CollisionWorld {
    boxes: Vec<CollisionBox>,
}

impl CollisionWorld {
    /// Build the world from level geometry
    pub fn build(geometry: &LevelGeometry) -> Result<Self, SimulationError> {
        let boxes = geometry.boxes.iter().map(|descriptor| descriptor.to_collision_box()).collect();
        Self::from_boxes(boxes)
    }

    /// Build the world from already constructed boxes
    pub fn from_boxes(boxes: Vec<CollisionBox>) -> Result<Self, SimulationError> {
        let mut labels = HashSet::with_capacity(boxes.len());
        for collision_box in &boxes {
            if !collision_box.aabb.is_valid() {
                return Err(SimulationError::InvalidBox {
                    label: collision_box.label.clone(),
                    reason: format!(
                        "bounds {:?}..{:?} are not finite or inverted",
                        collision_box.aabb.min, collision_box.aabb.max
                    ),
                });
            }
            if collision_box.faces.is_empty() {
                log::warn!("Collision box '{}' has no solid faces", collision_box.label);
            }
            if !labels.insert(collision_box.label.as_str()) {
                return Err(SimulationError::DuplicateBoxLabel(collision_box.label.clone()));
            }
        }

        log::info!("Collision world built with {} boxes", boxes.len());
        Ok(Self { boxes })
    }

    /// Find the first box the sphere hits on one of its solid faces.
    ///
    /// A hit on a face the box does not allow is skipped and the scan goes on.
    pub fn query_sphere(&self, center: &Vec3, radius: f32) -> Option<FaceHit> {
        self.query_sphere_filtered(center, radius, |_| None)
    }

    /// Query with a per-box face mask override.
    ///
    /// `mask_fn` returns the mask to use for a box, or `None` to use the box's
    /// own faces.
    pub fn query_sphere_filtered<F>(&self, center: &Vec3, radius: f32, mask_fn: F) -> Option<FaceHit>
    where
        F: Fn(&CollisionBox) -> Option<FaceMask>,
    {
        let sphere = BoundingSphere::new(*center, radius);
        self.boxes.iter().find_map(|collision_box| {
            let face = collision_box.classify(&sphere)?;
            let mask = mask_fn(collision_box).unwrap_or(collision_box.faces);
            mask.allows(face).then(|| FaceHit {
                box_label: collision_box.label.clone(),
                face,
            })
        })
    }

    /// All boxes in insertion order
    pub fn boxes(&self) -> &[CollisionBox] {
        &self.boxes
    }

    /// Look up a box by label
    pub fn get(&self, label: &str) -> Option<&CollisionBox> {
        self.boxes.iter().find(|collision_box| collision_box.label == label)
    }

    /// Number of boxes
    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    /// Whether the world has no boxes
    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_box(label: &str) -> CollisionBox {
        CollisionBox::new(label, Aabb::new(Vec3::new(-1.0, -1.0, -1.0), Vec3::new(1.0, 1.0, 1.0)))
    }

    fn world_with(boxes: Vec<CollisionBox>) -> CollisionWorld {
        CollisionWorld::from_boxes(boxes).unwrap()
    }

    #[test]
    fn test_sphere_below_box_hits_top() {
        let world = world_with(vec![unit_box("crate")]);
        let hit = world.query_sphere(&Vec3::new(0.0, -1.2, 0.0), 0.5).unwrap();
        assert_eq!(hit.box_label, "crate");
        assert_eq!(hit.face, Face::Top);
    }

    #[test]
    fn test_sphere_outside_reach_misses() {
        let world = world_with(vec![unit_box("crate")]);
        assert!(world.query_sphere(&Vec3::new(0.0, 2.0, 0.0), 0.5).is_none());
    }

    #[test]
    fn test_embedded_center_is_not_a_hit() {
        let world = world_with(vec![unit_box("crate")]);
        assert!(world.query_sphere(&Vec3::new(0.2, 0.1, 0.0), 0.5).is_none());
    }

    #[test]
    fn test_each_axis_classifies() {
        let world = world_with(vec![unit_box("crate")]);
        let face = |c: Vec3| world.query_sphere(&c, 0.5).map(|hit| hit.face);

        assert_eq!(face(Vec3::new(1.3, 0.0, 0.0)), Some(Face::Left));
        assert_eq!(face(Vec3::new(-1.3, 0.0, 0.0)), Some(Face::Right));
        assert_eq!(face(Vec3::new(0.0, 1.3, 0.0)), Some(Face::Bottom));
        assert_eq!(face(Vec3::new(0.0, 0.0, 1.3)), Some(Face::Back));
        assert_eq!(face(Vec3::new(0.0, 0.0, -1.3)), Some(Face::Front));
    }

    #[test]
    fn test_ties_prefer_x_then_y() {
        let world = world_with(vec![unit_box("crate")]);
        // Equal penetration on X and Y.
        let hit = world.query_sphere(&Vec3::new(1.2, 1.2, 0.0), 0.5).unwrap();
        assert_eq!(hit.face.axis(), 0);

        // Equal penetration on Y and Z.
        let hit = world.query_sphere(&Vec3::new(0.0, 1.2, 1.2), 0.5).unwrap();
        assert_eq!(hit.face.axis(), 1);
    }

    #[test]
    fn test_restricted_box_ignores_side_faces() {
        let backboard = unit_box("backboard").with_faces(FaceMask::FRONT | FaceMask::BACK);
        assert!(backboard.is_restricted());
        let world = world_with(vec![backboard]);

        // Approaching from the -X side is a side contact: passes through.
        assert!(world.query_sphere(&Vec3::new(-1.3, 0.0, 0.0), 0.5).is_none());
        // The Z faces are solid.
        assert!(world.query_sphere(&Vec3::new(0.0, 0.0, 1.3), 0.5).is_some());
    }

    #[test]
    fn test_disallowed_face_continues_scan() {
        let side_only = unit_box("first").with_faces(FaceMask::TOP);
        let solid = CollisionBox::new(
            "second",
            Aabb::new(Vec3::new(1.5, -1.0, -1.0), Vec3::new(3.0, 1.0, 1.0)),
        );
        let world = world_with(vec![side_only, solid]);

        let hit = world.query_sphere(&Vec3::new(1.25, 0.0, 0.0), 0.5).unwrap();
        assert_eq!(hit.box_label, "second");
    }

    #[test]
    fn test_filtered_query_overrides_mask() {
        let world = world_with(vec![unit_box("crate")]);
        let center = Vec3::new(1.3, 0.0, 0.0);

        let hit = world.query_sphere_filtered(&center, 0.5, |b| {
            (b.label == "crate").then_some(FaceMask::FRONT)
        });
        assert!(hit.is_none());
        assert!(world.query_sphere(&center, 0.5).is_some());
    }

    #[test]
    fn test_invalid_boxes_rejected() {
        let inverted = CollisionBox::new("bad", Aabb::new(Vec3::repeat(1.0), Vec3::zeros()));
        assert!(matches!(
            CollisionWorld::from_boxes(vec![inverted]),
            Err(SimulationError::InvalidBox { .. })
        ));

        assert!(matches!(
            CollisionWorld::from_boxes(vec![unit_box("a"), unit_box("a")]),
            Err(SimulationError::DuplicateBoxLabel(_))
        ));
    }
}
