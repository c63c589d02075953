//! Interleaved vertex layouts.
//!
//! A [`VertexLayoutDefinition`] lists attributes in interleaving order and
//! keeps every attribute's byte offset and the shared stride up to date as
//! attributes are appended. [`bind_to_shader`](VertexLayoutDefinition::bind_to_shader)
//! resolves attribute names to shader input locations, producing the
//! [`BoundVertexLayout`] a renderer uses to set up vertex fetch.
//!
//! # Example
//!
//! ```
//! use lattice_core::mesh::{ScalarType, VertexLayoutDefinition};
//!
//! let layout = VertexLayoutDefinition::new()
//!     .with_attribute("position", ScalarType::Float32, 3)
//!     .with_attribute("uv", ScalarType::Float32, 2);
//!
//! assert_eq!(layout.stride(), 20);
//! assert_eq!(layout.attributes()[1].offset, 12);
//! assert_eq!(layout.attributes()[0].stride, 20);
//! ```

use std::collections::{BTreeMap, HashMap};

use super::component::ComponentKind;

/// Scalar type of one attribute element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScalarType {
    /// 32-bit float.
    Float32,
    /// 32-bit signed integer.
    Sint32,
    /// 32-bit unsigned integer.
    Uint32,
}

impl ScalarType {
    /// Size in bytes of one scalar.
    pub fn size(&self) -> u32 {
        match self {
            Self::Float32 | Self::Sint32 | Self::Uint32 => 4,
        }
    }
}

/// One attribute of an interleaved layout.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VertexAttribute {
    /// Shader input name.
    pub name: String,
    /// Scalar type.
    pub scalar: ScalarType,
    /// Number of scalars (1 to 4).
    pub components: u32,
    /// Byte offset inside one vertex.
    pub offset: u32,
    /// Byte distance between consecutive vertices.
    pub stride: u32,
}

impl VertexAttribute {
    /// Size in bytes of this attribute.
    pub fn size(&self) -> u32 {
        self.scalar.size() * self.components
    }
}

/// Ordered attribute list with computed offsets and stride.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VertexLayoutDefinition {
    attributes: Vec<VertexAttribute>,
    stride: u32,
}

impl VertexLayoutDefinition {
    /// Create an empty layout.
    pub fn new() -> Self {
        Self::default()
    }

    /// Layout of float attributes matching a list of component kinds.
    pub fn from_components(kinds: &[ComponentKind]) -> Self {
        kinds.iter().fold(Self::new(), |layout, kind| {
            layout.with_attribute(
                kind.attribute_name(),
                ScalarType::Float32,
                kind.component_count(),
            )
        })
    }

    /// Append an attribute (builder form).
    pub fn with_attribute(
        mut self,
        name: impl Into<String>,
        scalar: ScalarType,
        components: u32,
    ) -> Self {
        self.push_attribute(name, scalar, components);
        self
    }

    /// Append an attribute after the existing ones.
    ///
    /// The new attribute starts at the current stride; every attribute's
    /// stride is updated to the new total immediately.
    pub fn push_attribute(
        &mut self,
        name: impl Into<String>,
        scalar: ScalarType,
        components: u32,
    ) {
        let offset = self.stride;
        self.attributes.push(VertexAttribute {
            name: name.into(),
            scalar,
            components,
            offset,
            stride: 0,
        });
        self.stride = offset + scalar.size() * components;
        for attribute in &mut self.attributes {
            attribute.stride = self.stride;
        }
    }

    /// Attributes in interleaving order.
    pub fn attributes(&self) -> &[VertexAttribute] {
        &self.attributes
    }

    /// Look up an attribute by name.
    pub fn attribute(&self, name: &str) -> Option<&VertexAttribute> {
        self.attributes.iter().find(|a| a.name == name)
    }

    /// Size in bytes of one vertex.
    pub fn stride(&self) -> u32 {
        self.stride
    }

    /// Resolve every attribute against a shader's inputs.
    ///
    /// Attributes the shader does not declare are kept with no location.
    pub fn bind_to_shader(
        &self,
        shader: &(impl ShaderInputLocations + ?Sized),
    ) -> BoundVertexLayout {
        let attributes = self
            .attributes
            .iter()
            .map(|attribute| {
                let location = shader.input_location(&attribute.name);
                if location.is_none() {
                    log::debug!(
                        "vertex attribute '{}' is not consumed by shader {}",
                        attribute.name,
                        shader.label().unwrap_or("<unnamed>")
                    );
                }
                BoundAttribute {
                    attribute: attribute.clone(),
                    location,
                }
            })
            .collect();

        BoundVertexLayout {
            attributes,
            stride: self.stride,
        }
    }
}

/// Source of shader input locations, usually a reflected shader program.
pub trait ShaderInputLocations {
    /// Location of the vertex input with the given name.
    fn input_location(&self, name: &str) -> Option<u32>;

    /// Name used in diagnostics.
    fn label(&self) -> Option<&str> {
        None
    }
}

impl ShaderInputLocations for HashMap<String, u32> {
    fn input_location(&self, name: &str) -> Option<u32> {
        self.get(name).copied()
    }
}

impl ShaderInputLocations for BTreeMap<String, u32> {
    fn input_location(&self, name: &str) -> Option<u32> {
        self.get(name).copied()
    }
}

impl ShaderInputLocations for [(&str, u32)] {
    fn input_location(&self, name: &str) -> Option<u32> {
        self.iter().find(|(n, _)| *n == name).map(|(_, loc)| *loc)
    }
}

/// An attribute with its resolved shader location.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BoundAttribute {
    /// Attribute description.
    pub attribute: VertexAttribute,
    /// Shader location, or `None` if the shader does not read it.
    pub location: Option<u32>,
}

/// A layout resolved against one shader.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BoundVertexLayout {
    attributes: Vec<BoundAttribute>,
    stride: u32,
}

impl BoundVertexLayout {
    /// All attributes, bound or not, in interleaving order.
    pub fn attributes(&self) -> &[BoundAttribute] {
        &self.attributes
    }

    /// Attributes the shader consumes, with their locations.
    pub fn bound(&self) -> impl Iterator<Item = (&VertexAttribute, u32)> {
        self.attributes
            .iter()
            .filter_map(|b| b.location.map(|loc| (&b.attribute, loc)))
    }

    /// Names of attributes the shader does not consume.
    pub fn unbound(&self) -> impl Iterator<Item = &str> {
        self.attributes
            .iter()
            .filter(|b| b.location.is_none())
            .map(|b| b.attribute.name.as_str())
    }

    /// Location bound to an attribute name.
    pub fn location_of(&self, name: &str) -> Option<u32> {
        self.attributes
            .iter()
            .find(|b| b.attribute.name == name)
            .and_then(|b| b.location)
    }

    /// Size in bytes of one vertex.
    pub fn stride(&self) -> u32 {
        self.stride
    }
}
