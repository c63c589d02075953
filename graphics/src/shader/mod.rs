//! Vertex input reflection.
//!
//! A [`ShaderInterface`] records the `@location` inputs of one vertex entry
//! point. It is what a mesh layout gets bound against: attribute names are
//! matched to argument names (or struct member names) of the entry point.
//!
//! # Example
//!
//! ```
//! use lattice_graphics::shader::ShaderInterface;
//!
//! let source = r#"
//! struct VertexInput {
//!     @location(0) position: vec3<f32>,
//!     @location(2) uv: vec2<f32>,
//! }
//!
//! @vertex
//! fn vs_main(input: VertexInput) -> @builtin(position) vec4<f32> {
//!     return vec4<f32>(input.position, 1.0);
//! }
//! "#;
//!
//! let shader = ShaderInterface::from_wgsl(source, "vs_main").unwrap();
//! assert_eq!(shader.location("uv"), Some(2));
//! ```

use lattice_core::mesh::ShaderInputLocations;
use lattice_core::profiling::profile_function;

use crate::error::GraphicsError;

/// One `@location` input of a vertex entry point.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ShaderInput {
    /// Argument or struct member name.
    pub name: String,
    /// Input location.
    pub location: u32,
}

/// The vertex inputs of one shader entry point.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ShaderInterface {
    label: Option<String>,
    entry_point: String,
    inputs: Vec<ShaderInput>,
}

impl ShaderInterface {
    /// Parse WGSL source and reflect the inputs of vertex entry point `entry_point`.
    ///
    /// Builtin inputs such as `@builtin(vertex_index)` are skipped.
    pub fn from_wgsl(source: &str, entry_point: &str) -> Result<Self, GraphicsError> {
        profile_function!();

        let module = naga::front::wgsl::parse_str(source)
            .map_err(|e| GraphicsError::ShaderParse(e.emit_to_string(source)))?;

        let entry = module
            .entry_points
            .iter()
            .find(|ep| ep.name == entry_point && ep.stage == naga::ShaderStage::Vertex)
            .ok_or_else(|| GraphicsError::EntryPointNotFound(entry_point.to_string()))?;

        let mut inputs = Vec::new();
        for argument in &entry.function.arguments {
            match (&argument.binding, &module.types[argument.ty].inner) {
                (Some(binding), _) => {
                    if let (Some(name), Some(location)) = (&argument.name, location_of(binding)) {
                        inputs.push(ShaderInput {
                            name: name.clone(),
                            location,
                        });
                    }
                }
                (None, naga::TypeInner::Struct { members, .. }) => {
                    inputs.extend(members.iter().filter_map(|member| {
                        Some(ShaderInput {
                            name: member.name.clone()?,
                            location: location_of(member.binding.as_ref()?)?,
                        })
                    }));
                }
                (None, _) => {}
            }
        }
        inputs.sort_by_key(|input| input.location);

        log::debug!(
            "reflected vertex entry point '{entry_point}': {:?}",
            inputs
                .iter()
                .map(|input| (input.name.as_str(), input.location))
                .collect::<Vec<_>>()
        );

        Ok(Self {
            label: None,
            entry_point: entry_point.to_string(),
            inputs,
        })
    }

    /// Build an interface by hand from `(name, location)` pairs.
    ///
    /// Names and locations must each be unique.
    pub fn from_locations<'a>(
        entry_point: &str,
        locations: impl IntoIterator<Item = (&'a str, u32)>,
    ) -> Result<Self, GraphicsError> {
        let mut inputs: Vec<ShaderInput> = Vec::new();
        for (name, location) in locations {
            if let Some(clash) = inputs
                .iter()
                .find(|input| input.name == name || input.location == location)
            {
                return Err(GraphicsError::InvalidParameter(format!(
                    "input '{name}' at location {location} clashes with '{}' at location {}",
                    clash.name, clash.location
                )));
            }
            inputs.push(ShaderInput {
                name: name.to_string(),
                location,
            });
        }
        inputs.sort_by_key(|input| input.location);

        Ok(Self {
            label: None,
            entry_point: entry_point.to_string(),
            inputs,
        })
    }

    /// Set the debug label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Name of the reflected entry point.
    pub fn entry_point(&self) -> &str {
        &self.entry_point
    }

    /// Inputs sorted by location.
    pub fn inputs(&self) -> &[ShaderInput] {
        &self.inputs
    }

    /// Location of the input with the given name.
    pub fn location(&self, name: &str) -> Option<u32> {
        self.inputs
            .iter()
            .find(|input| input.name == name)
            .map(|input| input.location)
    }
}

impl ShaderInputLocations for ShaderInterface {
    fn input_location(&self, name: &str) -> Option<u32> {
        self.location(name)
    }

    fn label(&self) -> Option<&str> {
        self.label.as_deref().or(Some(self.entry_point.as_str()))
    }
}

fn location_of(binding: &naga::Binding) -> Option<u32> {
    match binding {
        naga::Binding::Location { location, .. } => Some(*location),
        naga::Binding::BuiltIn(_) => None,
    }
}
