//! Mesh error types.

use std::fmt;

use crate::mesh::{Capabilities, ComponentKind, FaceType};

/// Errors raised while building, viewing or lowering a mesh.
///
/// All of these describe malformed mesh definitions or API misuse. They are
/// reported immediately and never retried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MeshError {
    /// A face cannot be lowered to the requested arity.
    UnsupportedTopology {
        /// Corner count of the offending face.
        face_arity: usize,
        /// Requested output arity.
        target: FaceType,
    },
    /// A corner count has no fixed face type (n-gon or zero).
    UnsupportedFaceArity(usize),
    /// The mesh's components do not exactly match any output vertex struct.
    IncompatibleVertexLayout(Capabilities),
    /// No output vertex struct corresponds to the requested description.
    UnsupportedVertexStruct(String),
    /// A view or conversion needs components the mesh does not declare.
    MissingCapability {
        /// Components the caller asked for.
        required: Capabilities,
        /// Components the mesh declares.
        available: Capabilities,
    },
    /// A component with the same semantic is already declared.
    ConflictingComponent {
        /// Kind already present in the mesh.
        existing: ComponentKind,
        /// Kind that was requested.
        requested: ComponentKind,
    },
    /// A value or source column does not match the column kind.
    ComponentMismatch {
        /// Kind of the destination column.
        expected: ComponentKind,
        /// Description of what was supplied.
        found: String,
    },
    /// An index array cannot be split into faces of the given arity.
    IndexCountMismatch {
        /// Number of indices (or vertices) supplied.
        count: usize,
        /// Face arity requested.
        arity: usize,
    },
    /// A vertex index is outside the vertex range.
    VertexOutOfRange {
        /// Offending index.
        index: usize,
        /// Number of vertices available.
        vertex_count: usize,
    },
    /// A face spans index slots that do not exist.
    InvalidFace {
        /// Face position in the face list.
        face: usize,
        /// First index slot.
        start: usize,
        /// Corner count.
        count: usize,
        /// Length of the index array.
        index_count: usize,
    },
    /// A component column is not as long as the mesh.
    ComponentLengthMismatch {
        /// Kind of the column.
        kind: ComponentKind,
        /// Column length.
        len: usize,
        /// Mesh vertex count.
        vertex_count: usize,
    },
    /// The mesh has faces but an empty index array.
    FacesWithoutIndices,
    /// Too many vertices for 16-bit indices.
    IndexOverflow {
        /// Number of vertices that needed indexing.
        vertex_count: usize,
    },
}

impl fmt::Display for MeshError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedTopology { face_arity, target } => write!(
                f,
                "unsupported topology: cannot lower a {face_arity}-corner face to {target:?}"
            ),
            Self::UnsupportedFaceArity(arity) => {
                write!(f, "unsupported topology: no face type has {arity} corners")
            }
            Self::IncompatibleVertexLayout(caps) => {
                write!(f, "incompatible vertex layout: no vertex struct matches {caps:?}")
            }
            Self::UnsupportedVertexStruct(desc) => write!(f, "unsupported vertex struct: {desc}"),
            Self::MissingCapability {
                required,
                available,
            } => write!(
                f,
                "missing capability: requires {required:?}, mesh declares {available:?}"
            ),
            Self::ConflictingComponent {
                existing,
                requested,
            } => write!(
                f,
                "cannot add {requested:?} component, mesh already declares {existing:?}"
            ),
            Self::ComponentMismatch { expected, found } => {
                write!(f, "component mismatch: {expected:?} column cannot take {found}")
            }
            Self::IndexCountMismatch { count, arity } => write!(
                f,
                "{count} indices cannot be split into faces of {arity} corners"
            ),
            Self::VertexOutOfRange {
                index,
                vertex_count,
            } => write!(
                f,
                "vertex index {index} out of range ({vertex_count} vertices)"
            ),
            Self::InvalidFace {
                face,
                start,
                count,
                index_count,
            } => write!(
                f,
                "face {face} spans indices {start}..{} but only {index_count} exist",
                start + count
            ),
            Self::ComponentLengthMismatch {
                kind,
                len,
                vertex_count,
            } => write!(
                f,
                "{kind:?} component has {len} values, mesh has {vertex_count} vertices"
            ),
            Self::FacesWithoutIndices => write!(f, "mesh has faces but no indices"),
            Self::IndexOverflow { vertex_count } => write!(
                f,
                "{vertex_count} vertices exceed the 16-bit index range"
            ),
        }
    }
}

impl std::error::Error for MeshError {}
