//! Graphics error types.

use std::fmt;

use lattice_core::MeshError;

/// Errors that can occur at the renderer boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphicsError {
    /// WGSL source failed to parse.
    ShaderParse(String),
    /// The requested vertex entry point does not exist.
    EntryPointNotFound(String),
    /// An invalid parameter was provided.
    InvalidParameter(String),
    /// The mesh layer rejected the data.
    Mesh(MeshError),
}

impl fmt::Display for GraphicsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ShaderParse(msg) => write!(f, "shader parse failed: {msg}"),
            Self::EntryPointNotFound(name) => {
                write!(f, "vertex entry point '{name}' not found")
            }
            Self::InvalidParameter(msg) => write!(f, "invalid parameter: {msg}"),
            Self::Mesh(err) => write!(f, "mesh error: {err}"),
        }
    }
}

impl std::error::Error for GraphicsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Mesh(err) => Some(err),
            _ => None,
        }
    }
}

impl From<MeshError> for GraphicsError {
    fn from(err: MeshError) -> Self {
        Self::Mesh(err)
    }
}
