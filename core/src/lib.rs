//! # Lattice Core
//!
//! Columnar mesh model and its lowering to GPU-ready vertex and index
//! buffers. Nothing here talks to a GPU; the `lattice-graphics` crate binds
//! the produced layouts to shader inputs.

pub mod buffer;
pub mod error;
pub mod math;
pub mod mesh;
pub mod profiling;

pub use error::MeshError;

/// Core library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
