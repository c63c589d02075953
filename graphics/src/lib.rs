//! # Lattice Graphics
//!
//! Renderer boundary for meshes lowered by `lattice-core`.
//!
//! ## Overview
//!
//! This crate provides:
//! - [`ShaderInterface`] - Vertex inputs reflected from WGSL with `naga`
//! - [`MeshUpload`] - Buffer descriptors, bound layout and draw arguments for one [`MeshData`]
//! - [`types`] - Buffer usage flags, descriptors and draw argument structs
//!
//! No GPU device is created here; a backend consumes the upload package.
//!
//! ## Example
//!
//! ```
//! use lattice_core::mesh::generators::create_cube;
//! use lattice_graphics::{MeshUpload, ShaderInterface};
//!
//! let data = create_cube(1.0).get_mesh_data(0)?;
//! let shader = ShaderInterface::from_locations("vs_main", [("position", 0), ("normal", 1)])?;
//! let upload = MeshUpload::prepare(&data, &shader)?;
//! assert_eq!(upload.draw.index_count, 36);
//! # Ok::<(), lattice_graphics::GraphicsError>(())
//! ```
//!
//! [`MeshData`]: lattice_core::mesh::MeshData

pub mod error;
pub mod mesh;
pub mod shader;
pub mod types;

pub use error::GraphicsError;
pub use mesh::MeshUpload;
pub use shader::{ShaderInput, ShaderInterface};
pub use types::{
    BufferDescriptor, BufferUsage, DrawIndexedArgs, IndexFormat, PrimitiveTopology,
};

/// Graphics library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
