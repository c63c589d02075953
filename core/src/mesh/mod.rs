//! Columnar mesh model and lowering.
//!
//! This module provides GPU-agnostic mesh data structures:
//!
//! - [`AttributeComponent`] - One growable column per vertex attribute
//! - [`Mesh`] - Attribute columns plus a shared index array and mixed-arity faces
//! - [`VertexView`], [`VertexViewMut`], [`FaceView`] - Capability-typed views
//! - [`MeshData`] - Interleaved vertices and 16-bit indices for one material
//! - [`VertexLayoutDefinition`] - Attribute offsets/stride and shader binding
//! - Generators for common shapes (cube, sphere, grid, quad)

mod capability;
mod component;
mod data;
mod face;
pub mod generators;
mod layout;
mod lowering;
mod normals;
mod vertex;
mod view;

pub use capability::{
    Capabilities, HasColor, HasNormal, HasPosition2, HasPosition3, HasUv, Positions3,
    Positions3Normals, VertexFormat,
};
pub use component::{AttributeComponent, ComponentKind, ComponentValue};
pub use data::Mesh;
pub use face::{Face, FaceType};
pub use layout::{
    BoundAttribute, BoundVertexLayout, ScalarType, ShaderInputLocations, VertexAttribute,
    VertexLayoutDefinition,
};
pub use lowering::{MeshData, PrimitiveArity};
pub use vertex::{
    DestinationVertexKind, Position2Uv, PositionColor, PositionNormalColor, PositionNormalUv,
    VertexBuffer, VertexStruct,
};
pub use view::{AttributeSlices, FaceHandle, FaceView, VertexRef, VertexView, VertexViewMut};

static_assertions::assert_impl_all!(Mesh: Send, Sync);
static_assertions::assert_impl_all!(MeshData: Send, Sync);
