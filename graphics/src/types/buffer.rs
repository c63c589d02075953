//! Buffer types and descriptors.

use bitflags::bitflags;
use lattice_core::mesh::PrimitiveArity;

bitflags! {
    /// Usage flags for buffers.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct BufferUsage: u32 {
        /// Buffer can be used as a vertex buffer.
        const VERTEX = 1 << 0;
        /// Buffer can be used as an index buffer.
        const INDEX = 1 << 1;
        /// Buffer can be copied from.
        const COPY_SRC = 1 << 2;
        /// Buffer can be copied to.
        const COPY_DST = 1 << 3;
    }
}

impl Default for BufferUsage {
    fn default() -> Self {
        Self::empty()
    }
}

/// Buffer sizes are rounded up to this many bytes so queue writes stay aligned.
pub const COPY_BUFFER_ALIGNMENT: u64 = 4;

/// Descriptor for creating a buffer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct BufferDescriptor {
    /// Debug label for the buffer.
    pub label: Option<String>,
    /// Size in bytes, a multiple of [`COPY_BUFFER_ALIGNMENT`].
    pub size: u64,
    /// Usage flags.
    pub usage: BufferUsage,
}

impl BufferDescriptor {
    /// Create a descriptor large enough for `content_len` bytes.
    pub fn new(content_len: u64, usage: BufferUsage) -> Self {
        Self {
            label: None,
            size: content_len.next_multiple_of(COPY_BUFFER_ALIGNMENT),
            usage,
        }
    }

    /// Set the debug label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

/// Width of the values in an index buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum IndexFormat {
    /// `u16` indices.
    #[default]
    Uint16,
}

impl IndexFormat {
    /// Bytes per index.
    pub fn size(&self) -> u64 {
        match self {
            Self::Uint16 => 2,
        }
    }
}

/// How indices are assembled into primitives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveTopology {
    /// Every two indices form a line.
    LineList,
    /// Every three indices form a triangle.
    TriangleList,
}

impl From<PrimitiveArity> for PrimitiveTopology {
    fn from(arity: PrimitiveArity) -> Self {
        match arity {
            PrimitiveArity::Lines => Self::LineList,
            PrimitiveArity::Triangles => Self::TriangleList,
        }
    }
}

/// Arguments for an indexed draw call.
///
/// Matches the GPU layout of an indexed indirect draw (20 bytes), so the
/// same value can be passed directly or written to an indirect buffer.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, bytemuck::Pod, bytemuck::Zeroable)]
pub struct DrawIndexedArgs {
    /// Number of indices to draw.
    pub index_count: u32,
    /// Number of instances to draw.
    pub instance_count: u32,
    /// Index of the first index to draw.
    pub first_index: u32,
    /// Value added to each index before reading from the vertex buffer.
    pub base_vertex: i32,
    /// Instance ID of the first instance to draw.
    pub first_instance: u32,
}

static_assertions::const_assert_eq!(std::mem::size_of::<DrawIndexedArgs>(), 20);

impl DrawIndexedArgs {
    /// Size of the struct in bytes.
    pub const SIZE: u64 = std::mem::size_of::<Self>() as u64;

    /// Draw `index_count` indices once.
    pub fn new(index_count: u32) -> Self {
        Self {
            index_count,
            instance_count: 1,
            ..Default::default()
        }
    }

    /// Set the number of instances.
    pub fn with_instance_count(mut self, instance_count: u32) -> Self {
        self.instance_count = instance_count;
        self
    }

    /// Set the first index.
    pub fn with_first_index(mut self, first_index: u32) -> Self {
        self.first_index = first_index;
        self
    }

    /// Set the base vertex offset.
    pub fn with_base_vertex(mut self, base_vertex: i32) -> Self {
        self.base_vertex = base_vertex;
        self
    }

    /// Set the first instance index.
    pub fn with_first_instance(mut self, first_instance: u32) -> Self {
        self.first_instance = first_instance;
        self
    }

    /// Convert to bytes for uploading to an indirect buffer.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }
}
