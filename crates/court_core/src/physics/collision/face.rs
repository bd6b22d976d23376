//! Face classification for sphere-vs-box contacts

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

/// Side of a sphere-vs-box contact.
///
/// Faces are named from the moving sphere's point of view: `Top` means the
/// sphere's top struck the box (the sphere is below it), `Left` means its left
/// side struck (the sphere is on the box's +X side). Each face therefore says
/// which way the response pushes: away from the box along its axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Face {
    /// Contact on +Y of the sphere
    Top,
    /// Contact on -Y of the sphere
    Bottom,
    /// Contact on -X of the sphere
    Left,
    /// Contact on +X of the sphere
    Right,
    /// Contact on +Z of the sphere
    Front,
    /// Contact on -Z of the sphere
    Back,
}

impl Face {
    /// Classify a contact on `axis` (0 = X, 1 = Y, 2 = Z) given the sign of
    /// `sphere center - box center` along that axis
    pub fn from_axis_offset(axis: usize, offset: f32) -> Self {
        let positive_side = offset >= 0.0;
        match (axis, positive_side) {
            (0, true) => Self::Left,
            (0, false) => Self::Right,
            (1, true) => Self::Bottom,
            (1, false) => Self::Top,
            (_, true) => Self::Back,
            (_, false) => Self::Front,
        }
    }

    /// Axis index the face is perpendicular to
    pub fn axis(self) -> usize {
        match self {
            Self::Left | Self::Right => 0,
            Self::Top | Self::Bottom => 1,
            Self::Front | Self::Back => 2,
        }
    }

    /// Sign the velocity along [`Face::axis`] takes after the response
    pub fn outward_sign(self) -> f32 {
        match self {
            Self::Left | Self::Bottom | Self::Back => 1.0,
            Self::Right | Self::Top | Self::Front => -1.0,
        }
    }

    /// Single-face mask
    pub fn mask(self) -> FaceMask {
        match self {
            Self::Top => FaceMask::TOP,
            Self::Bottom => FaceMask::BOTTOM,
            Self::Left => FaceMask::LEFT,
            Self::Right => FaceMask::RIGHT,
            Self::Front => FaceMask::FRONT,
            Self::Back => FaceMask::BACK,
        }
    }
}

bitflags! {
    /// Set of faces that take part in collision response
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct FaceMask: u8 {
        /// See [`Face::Top`]
        const TOP = 1 << 0;
        /// See [`Face::Bottom`]
        const BOTTOM = 1 << 1;
        /// See [`Face::Left`]
        const LEFT = 1 << 2;
        /// See [`Face::Right`]
        const RIGHT = 1 << 3;
        /// See [`Face::Front`]
        const FRONT = 1 << 4;
        /// See [`Face::Back`]
        const BACK = 1 << 5;
    }
}

impl FaceMask {
    /// Whether `face` is in the mask
    pub fn allows(self, face: Face) -> bool {
        self.contains(face.mask())
    }

    /// Build a mask from a list of faces
    pub fn from_faces(faces: &[Face]) -> Self {
        faces.iter().fold(Self::empty(), |mask, face| mask | face.mask())
    }
}

impl Default for FaceMask {
    fn default() -> Self {
        Self::all()
    }
}
