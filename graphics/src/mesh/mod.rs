//! Upload packages for lowered meshes.
//!
//! [`MeshUpload`] pairs the bytes of a [`MeshData`] with the descriptors,
//! bound layout and draw arguments a backend needs to create and draw it.
//! Nothing is copied: the byte slices borrow from the `MeshData`.

use lattice_core::mesh::{BoundVertexLayout, MeshData};
use lattice_core::profiling::profile_function;

use crate::error::GraphicsError;
use crate::shader::ShaderInterface;
use crate::types::{BufferDescriptor, BufferUsage, DrawIndexedArgs, IndexFormat, PrimitiveTopology};

/// Everything needed to upload and draw one material of a mesh.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshUpload<'a> {
    /// Interleaved vertex bytes.
    pub vertex_bytes: &'a [u8],
    /// Index bytes.
    pub index_bytes: &'a [u8],
    /// Descriptor for the vertex buffer.
    pub vertex_buffer: BufferDescriptor,
    /// Descriptor for the index buffer.
    pub index_buffer: BufferDescriptor,
    /// Vertex layout resolved against the shader.
    pub layout: BoundVertexLayout,
    /// Primitive assembly for the draw.
    pub topology: PrimitiveTopology,
    /// Width of the indices in `index_bytes`.
    pub index_format: IndexFormat,
    /// Arguments for a single-instance draw of every index.
    pub draw: DrawIndexedArgs,
}

impl<'a> MeshUpload<'a> {
    /// Prepare `data` for drawing with `shader`.
    ///
    /// Fails if there is nothing to draw, or if the shader reads an input
    /// that the vertex layout does not provide. Layout attributes the shader
    /// ignores are fine and stay unbound.
    pub fn prepare(data: &'a MeshData, shader: &ShaderInterface) -> Result<Self, GraphicsError> {
        profile_function!();

        if data.index_count() == 0 {
            return Err(GraphicsError::InvalidParameter(format!(
                "material {} has no primitives to draw",
                data.material_id
            )));
        }

        let layout = data.layout.bind_to_shader(shader);
        if let Some(missing) = shader
            .inputs()
            .iter()
            .find(|input| layout.location_of(&input.name).is_none())
        {
            return Err(GraphicsError::InvalidParameter(format!(
                "shader input '{}' at location {} has no matching attribute in {:?}",
                missing.name,
                missing.location,
                data.vertex_kind()
            )));
        }

        let index_count = u32::try_from(data.index_count()).map_err(|_| {
            GraphicsError::InvalidParameter(format!("{} indices", data.index_count()))
        })?;

        let vertex_bytes = data.vertex_bytes();
        let index_bytes = data.index_bytes();
        let vertex_buffer = BufferDescriptor::new(
            vertex_bytes.len() as u64,
            BufferUsage::VERTEX | BufferUsage::COPY_DST,
        )
        .with_label(format!("material {} vertices", data.material_id));
        let index_buffer = BufferDescriptor::new(
            index_bytes.len() as u64,
            BufferUsage::INDEX | BufferUsage::COPY_DST,
        )
        .with_label(format!("material {} indices", data.material_id));

        log::trace!(
            "prepared upload for material {}: {} + {} bytes, {} unbound attributes",
            data.material_id,
            vertex_buffer.size,
            index_buffer.size,
            layout.unbound().count()
        );

        Ok(Self {
            vertex_bytes,
            index_bytes,
            vertex_buffer,
            index_buffer,
            layout,
            topology: data.arity.into(),
            index_format: IndexFormat::Uint16,
            draw: DrawIndexedArgs::new(index_count),
        })
    }

    /// Number of primitives the draw produces.
    pub fn primitive_count(&self) -> u32 {
        match self.topology {
            PrimitiveTopology::LineList => self.draw.index_count / 2,
            PrimitiveTopology::TriangleList => self.draw.index_count / 3,
        }
    }
}
