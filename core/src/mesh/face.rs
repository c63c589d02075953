//! Face topology records.

use crate::error::MeshError;

/// Fixed face arity used for generated faces and as lowering target.
///
/// Faces stored in a [`Mesh`](super::Mesh) may have any arity; this enum only
/// names the arities the engine knows how to build and lower.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FaceType {
    /// One corner.
    Point,
    /// Two corners.
    Line,
    /// Three corners.
    #[default]
    Triangle,
    /// Four corners. Corners `1` and `2` share the split diagonal, see
    /// [`Mesh::to_primitive`](super::Mesh::to_primitive).
    Quad,
}

impl FaceType {
    /// Number of corners of a face of this type.
    pub fn arity(&self) -> usize {
        match self {
            Self::Point => 1,
            Self::Line => 2,
            Self::Triangle => 3,
            Self::Quad => 4,
        }
    }

    /// Face type for a corner count. N-gons have no face type.
    pub fn from_arity(arity: usize) -> Result<Self, MeshError> {
        match arity {
            1 => Ok(Self::Point),
            2 => Ok(Self::Line),
            3 => Ok(Self::Triangle),
            4 => Ok(Self::Quad),
            other => Err(MeshError::UnsupportedFaceArity(other)),
        }
    }
}

/// A face: a span of the mesh's shared index array plus a material tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Face {
    /// Offset of the first corner in the mesh index array.
    pub start_index: usize,
    /// Number of corners.
    pub count: usize,
    /// Material the face is rendered with.
    pub material_id: u32,
}

impl Face {
    /// Create a face record.
    pub fn new(start_index: usize, count: usize, material_id: u32) -> Self {
        Self {
            start_index,
            count,
            material_id,
        }
    }

    /// One past the last index slot used by this face.
    pub fn end_index(&self) -> usize {
        self.start_index + self.count
    }

    /// Range of index slots used by this face.
    pub fn index_range(&self) -> std::ops::Range<usize> {
        self.start_index..self.end_index()
    }

    /// One corner.
    pub fn is_point(&self) -> bool {
        self.count == 1
    }

    /// Two corners.
    pub fn is_line(&self) -> bool {
        self.count == 2
    }

    /// Three corners.
    pub fn is_triangle(&self) -> bool {
        self.count == 3
    }

    /// Four corners.
    pub fn is_quad(&self) -> bool {
        self.count == 4
    }

    /// More than four corners.
    pub fn is_ngon(&self) -> bool {
        self.count > 4
    }

    /// The face type matching this face's arity, if any.
    pub fn face_type(&self) -> Option<FaceType> {
        FaceType::from_arity(self.count).ok()
    }
}
