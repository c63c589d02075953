//! Typed views over a mesh's attribute columns.
//!
//! A view is requested with a [`VertexFormat`] type `T`. Creating it checks
//! once that the mesh declares every component `T` needs; after that the
//! accessors on [`VertexRef`] and [`VertexViewMut`] are gated at compile time
//! by the capability marker traits, so `view.get(i)?.normal()` only exists
//! when `T: HasNormal`.
//!
//! Views never copy vertex data. [`VertexRef`] and [`FaceHandle`] are small
//! `Copy` cursors holding a borrowed column set plus an index.

use std::marker::PhantomData;

use crate::error::MeshError;

use super::capability::{
    Capabilities, HasColor, HasNormal, HasPosition2, HasPosition3, HasUv, VertexFormat,
};
use super::component::{ComponentKind, ComponentValue};
use super::data::Mesh;
use super::face::Face;
use super::vertex::{
    DestinationVertexKind, Position2Uv, PositionColor, PositionNormalColor, PositionNormalUv,
    VertexBuffer, VertexStruct,
};

/// Borrowed columns of a mesh, resolved by kind.
#[derive(Debug, Clone, Copy, Default)]
pub struct AttributeSlices<'a> {
    /// 2D positions.
    pub position2: Option<&'a [[f32; 2]]>,
    /// 3D positions.
    pub position3: Option<&'a [[f32; 3]]>,
    /// Normals.
    pub normal: Option<&'a [[f32; 3]]>,
    /// Texture coordinates.
    pub uv: Option<&'a [[f32; 2]]>,
    /// Colors.
    pub color: Option<&'a [[f32; 4]]>,
}

impl<'a> AttributeSlices<'a> {
    /// Resolve the columns of a mesh.
    pub fn from_mesh(mesh: &'a Mesh) -> Self {
        Self {
            position2: mesh.positions_2d(),
            position3: mesh.positions(),
            normal: mesh.normals(),
            uv: mesh.uvs(),
            color: mesh.colors(),
        }
    }

    /// Kinds that resolved to a column.
    pub fn capabilities(&self) -> Capabilities {
        let mut caps = Capabilities::empty();
        caps.set(Capabilities::POSITION2, self.position2.is_some());
        caps.set(Capabilities::POSITION3, self.position3.is_some());
        caps.set(Capabilities::NORMAL, self.normal.is_some());
        caps.set(Capabilities::UV, self.uv.is_some());
        caps.set(Capabilities::COLOR, self.color.is_some());
        caps
    }

    // Absent columns and out-of-range indices read as zero.

    /// 2D position of vertex `index`.
    pub fn position2_at(&self, index: usize) -> [f32; 2] {
        at(self.position2, index)
    }

    /// 3D position of vertex `index`.
    pub fn position3_at(&self, index: usize) -> [f32; 3] {
        at(self.position3, index)
    }

    /// Normal of vertex `index`.
    pub fn normal_at(&self, index: usize) -> [f32; 3] {
        at(self.normal, index)
    }

    /// Texture coordinate of vertex `index`.
    pub fn uv_at(&self, index: usize) -> [f32; 2] {
        at(self.uv, index)
    }

    /// Color of vertex `index`.
    pub fn color_at(&self, index: usize) -> [f32; 4] {
        at(self.color, index)
    }
}

fn at<T: Copy + Default>(column: Option<&[T]>, index: usize) -> T {
    column
        .and_then(|values| values.get(index))
        .copied()
        .unwrap_or_default()
}

fn require(required: Capabilities, available: Capabilities) -> Result<(), MeshError> {
    if available.contains(required) {
        Ok(())
    } else {
        Err(MeshError::MissingCapability {
            required,
            available,
        })
    }
}

// ============================================================================
// Read-only vertex view
// ============================================================================

/// Read-only, index-addressable view of a mesh's vertices as format `T`.
pub struct VertexView<'a, T: VertexFormat> {
    slices: AttributeSlices<'a>,
    len: usize,
    _format: PhantomData<fn() -> T>,
}

impl<'a, T: VertexFormat> VertexView<'a, T> {
    fn new(mesh: &'a Mesh) -> Result<Self, MeshError> {
        require(T::capabilities(), mesh.capabilities())?;
        Ok(Self {
            slices: AttributeSlices::from_mesh(mesh),
            len: mesh.vertex_count(),
            _format: PhantomData,
        })
    }

    /// Number of vertices.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if the view has no vertices.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The underlying columns.
    pub fn slices(&self) -> &AttributeSlices<'a> {
        &self.slices
    }

    /// Cursor at vertex `index`.
    pub fn get(&self, index: usize) -> Option<VertexRef<'_, T>> {
        (index < self.len).then(|| VertexRef::new(&self.slices, index))
    }

    /// Iterate over all vertices with one cursor per step.
    pub fn iter(&self) -> impl Iterator<Item = VertexRef<'_, T>> + '_ {
        (0..self.len).map(|index| VertexRef::new(&self.slices, index))
    }

    /// Copy every vertex into a destination struct.
    ///
    /// Exactly the fields `D` declares are copied; the mesh must declare
    /// all of them.
    pub fn to_array<D: VertexStruct>(&self) -> Result<Vec<D>, MeshError> {
        require(D::capabilities(), self.slices.capabilities())?;
        Ok((0..self.len).map(|i| D::read(&self.slices, i)).collect())
    }

    /// Copy every vertex into the struct named by `kind`.
    pub fn to_vertex_buffer(&self, kind: DestinationVertexKind) -> Result<VertexBuffer, MeshError> {
        Ok(match kind {
            DestinationVertexKind::PositionNormalUv => {
                VertexBuffer::PositionNormalUv(self.to_array::<PositionNormalUv>()?.into())
            }
            DestinationVertexKind::PositionNormalColor => {
                VertexBuffer::PositionNormalColor(self.to_array::<PositionNormalColor>()?.into())
            }
            DestinationVertexKind::PositionColor => {
                VertexBuffer::PositionColor(self.to_array::<PositionColor>()?.into())
            }
            DestinationVertexKind::Position2Uv => {
                VertexBuffer::Position2Uv(self.to_array::<Position2Uv>()?.into())
            }
        })
    }
}

/// Cursor over one vertex of a [`VertexView`].
pub struct VertexRef<'v, T> {
    slices: &'v AttributeSlices<'v>,
    index: usize,
    _format: PhantomData<fn() -> T>,
}

impl<T> Clone for VertexRef<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for VertexRef<'_, T> {}

impl<T> std::fmt::Debug for VertexRef<'_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VertexRef").field("index", &self.index).finish()
    }
}

impl<'v, T: VertexFormat> VertexRef<'v, T> {
    fn new(slices: &'v AttributeSlices<'v>, index: usize) -> Self {
        Self {
            slices,
            index,
            _format: PhantomData,
        }
    }

    /// Vertex index in the mesh.
    pub fn index(&self) -> usize {
        self.index
    }

    /// 3D position.
    pub fn position(&self) -> [f32; 3]
    where
        T: HasPosition3,
    {
        self.slices.position3_at(self.index)
    }

    /// 2D position.
    pub fn position_2d(&self) -> [f32; 2]
    where
        T: HasPosition2,
    {
        self.slices.position2_at(self.index)
    }

    /// Normal.
    pub fn normal(&self) -> [f32; 3]
    where
        T: HasNormal,
    {
        self.slices.normal_at(self.index)
    }

    /// Texture coordinate.
    pub fn uv(&self) -> [f32; 2]
    where
        T: HasUv,
    {
        self.slices.uv_at(self.index)
    }

    /// Color.
    pub fn color(&self) -> [f32; 4]
    where
        T: HasColor,
    {
        self.slices.color_at(self.index)
    }

    /// Copy this vertex into the format's own struct.
    pub fn read(&self) -> T
    where
        T: VertexStruct,
    {
        T::read(self.slices, self.index)
    }
}

// ============================================================================
// Mutable vertex view
// ============================================================================

/// Mutable, appendable view of a mesh's vertices as format `T`.
///
/// Writing past the end grows every component of the mesh, not just the
/// written one, so all columns stay the same length.
pub struct VertexViewMut<'a, T: VertexFormat> {
    mesh: &'a mut Mesh,
    _format: PhantomData<fn() -> T>,
}

impl<'a, T: VertexFormat> VertexViewMut<'a, T> {
    fn new(mesh: &'a mut Mesh) -> Result<Self, MeshError> {
        require(T::capabilities(), mesh.capabilities())?;
        Ok(Self {
            mesh,
            _format: PhantomData,
        })
    }

    /// Number of vertices.
    pub fn len(&self) -> usize {
        self.mesh.vertex_count()
    }

    /// Check if the mesh has no vertices.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Read-only view of the current state.
    pub fn as_view(&self) -> VertexView<'_, T> {
        VertexView {
            slices: AttributeSlices::from_mesh(&*self.mesh),
            len: self.mesh.vertex_count(),
            _format: PhantomData,
        }
    }

    /// Append a zeroed vertex and return its index.
    pub fn push(&mut self) -> usize {
        let index = self.len();
        self.mesh.set_vertex_count(index + 1);
        index
    }

    /// Append a vertex and return its index.
    pub fn push_vertex(&mut self, vertex: &T) -> usize
    where
        T: VertexStruct,
    {
        let index = self.len();
        self.set(index, vertex);
        index
    }

    /// Overwrite every field of vertex `index`.
    pub fn set(&mut self, index: usize, vertex: &T)
    where
        T: VertexStruct,
    {
        for (kind, value) in vertex.attribute_values() {
            match value {
                ComponentValue::Float2(v) => self.write2(kind, index, v),
                ComponentValue::Float3(v) => self.write3(kind, index, v),
                ComponentValue::Float4(v) => self.write4(kind, index, v),
            }
        }
    }

    /// Write the 3D position of vertex `index`.
    pub fn set_position(&mut self, index: usize, position: [f32; 3])
    where
        T: HasPosition3,
    {
        self.write3(ComponentKind::Position3, index, position);
    }

    /// Write the 2D position of vertex `index`.
    pub fn set_position_2d(&mut self, index: usize, position: [f32; 2])
    where
        T: HasPosition2,
    {
        self.write2(ComponentKind::Position2, index, position);
    }

    /// Write the normal of vertex `index`.
    pub fn set_normal(&mut self, index: usize, normal: [f32; 3])
    where
        T: HasNormal,
    {
        self.write3(ComponentKind::Normal, index, normal);
    }

    /// Write the texture coordinate of vertex `index`.
    pub fn set_uv(&mut self, index: usize, uv: [f32; 2])
    where
        T: HasUv,
    {
        self.write2(ComponentKind::Uv, index, uv);
    }

    /// Write the color of vertex `index`.
    pub fn set_color(&mut self, index: usize, color: [f32; 4])
    where
        T: HasColor,
    {
        self.write4(ComponentKind::Color, index, color);
    }

    fn write2(&mut self, kind: ComponentKind, index: usize, value: [f32; 2]) {
        self.mesh.set_vertex_count(index + 1);
        if let Some(slot) = self
            .mesh
            .component_mut(kind)
            .and_then(|c| c.as_float2_mut())
            .and_then(|v| v.get_mut(index))
        {
            *slot = value;
        }
    }

    fn write3(&mut self, kind: ComponentKind, index: usize, value: [f32; 3]) {
        self.mesh.set_vertex_count(index + 1);
        if let Some(slot) = self
            .mesh
            .component_mut(kind)
            .and_then(|c| c.as_float3_mut())
            .and_then(|v| v.get_mut(index))
        {
            *slot = value;
        }
    }

    fn write4(&mut self, kind: ComponentKind, index: usize, value: [f32; 4]) {
        self.mesh.set_vertex_count(index + 1);
        if let Some(slot) = self
            .mesh
            .component_mut(kind)
            .and_then(|c| c.as_float4_mut())
            .and_then(|v| v.get_mut(index))
        {
            *slot = value;
        }
    }
}

// ============================================================================
// Face view
// ============================================================================

/// Read-only sequence of faces whose corners read as format `T`.
pub struct FaceView<'a, T: VertexFormat> {
    faces: &'a [Face],
    indices: &'a [u32],
    vertices: VertexView<'a, T>,
}

impl<'a, T: VertexFormat> FaceView<'a, T> {
    /// Number of faces.
    pub fn len(&self) -> usize {
        self.faces.len()
    }

    /// Check if the mesh has no faces.
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// The vertex view corners are read from.
    pub fn vertices(&self) -> &VertexView<'a, T> {
        &self.vertices
    }

    /// Handle for face `index`.
    pub fn get(&self, index: usize) -> Option<FaceHandle<'_, T>> {
        self.faces.get(index).map(|face| self.handle(*face))
    }

    /// Iterate over face handles.
    pub fn iter(&self) -> impl Iterator<Item = FaceHandle<'_, T>> + '_ {
        self.faces.iter().map(|face| self.handle(*face))
    }

    fn handle(&self, face: Face) -> FaceHandle<'_, T> {
        FaceHandle {
            face,
            // Spans were checked by `Mesh::validate` in `face_view`.
            corners: self.indices.get(face.index_range()).unwrap_or_default(),
            vertices: &self.vertices,
        }
    }
}

/// A face of a [`FaceView`]: its record plus access to its corners.
pub struct FaceHandle<'v, T: VertexFormat> {
    face: Face,
    corners: &'v [u32],
    vertices: &'v VertexView<'v, T>,
}

impl<T: VertexFormat> Clone for FaceHandle<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: VertexFormat> Copy for FaceHandle<'_, T> {}

impl<'v, T: VertexFormat> FaceHandle<'v, T> {
    /// The face record.
    pub fn face(&self) -> Face {
        self.face
    }

    /// Number of corners.
    pub fn count(&self) -> usize {
        self.face.count
    }

    /// Material id of the face.
    pub fn material_id(&self) -> u32 {
        self.face.material_id
    }

    /// One corner.
    pub fn is_point(&self) -> bool {
        self.face.is_point()
    }

    /// Two corners.
    pub fn is_line(&self) -> bool {
        self.face.is_line()
    }

    /// Three corners.
    pub fn is_triangle(&self) -> bool {
        self.face.is_triangle()
    }

    /// Four corners.
    pub fn is_quad(&self) -> bool {
        self.face.is_quad()
    }

    /// More than four corners.
    pub fn is_ngon(&self) -> bool {
        self.face.is_ngon()
    }

    /// Vertex indices of the corners.
    pub fn vertex_indices(&self) -> &'v [u32] {
        self.corners
    }

    /// Vertex at corner `corner`.
    pub fn corner(&self, corner: usize) -> Option<VertexRef<'v, T>> {
        let index = *self.corners.get(corner)?;
        self.vertices.get(index as usize)
    }

    /// Iterate over the corner vertices.
    pub fn corners(&self) -> impl Iterator<Item = VertexRef<'v, T>> + use<'v, T> {
        let vertices = self.vertices;
        self.corners
            .iter()
            .filter_map(move |&index| vertices.get(index as usize))
    }
}

// ============================================================================
// Mesh entry points
// ============================================================================

impl Mesh {
    /// Read-only view of the vertices as format `T`.
    pub fn view<T: VertexFormat>(&self) -> Result<VertexView<'_, T>, MeshError> {
        VertexView::new(self)
    }

    /// Mutable view of the vertices as format `T`.
    pub fn view_mut<T: VertexFormat>(&mut self) -> Result<VertexViewMut<'_, T>, MeshError> {
        VertexViewMut::new(self)
    }

    /// Faces whose corners read as format `T`.
    ///
    /// The mesh is validated first, so every handle sees all of its corners.
    pub fn face_view<T: VertexFormat>(&self) -> Result<FaceView<'_, T>, MeshError> {
        let vertices = VertexView::new(self)?;
        self.validate()?;
        Ok(FaceView {
            faces: self.faces(),
            indices: self.indices(),
            vertices,
        })
    }

    /// Copy every vertex into destination struct `D`.
    pub fn to_array<D: VertexStruct>(&self) -> Result<Vec<D>, MeshError> {
        self.view::<D>()?.to_array::<D>()
    }

    /// Copy every vertex into the struct named by `kind`.
    pub fn to_vertex_buffer(&self, kind: DestinationVertexKind) -> Result<VertexBuffer, MeshError> {
        VertexView::<NoComponents>::new(self)?.to_vertex_buffer(kind)
    }
}

/// Format requiring nothing; used where the destination struct does the check.
struct NoComponents;

impl VertexFormat for NoComponents {
    const COMPONENTS: &'static [ComponentKind] = &[];
}
