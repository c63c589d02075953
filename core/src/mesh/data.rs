//! The columnar mesh.
//!
//! This module provides [`Mesh`]: an ordered set of attribute columns that
//! share one vertex count, a flat index array, and a list of variable-arity
//! [`Face`] records pointing into that array.

use std::collections::BTreeSet;

use crate::error::MeshError;

use super::capability::{Capabilities, VertexFormat};
use super::component::{AttributeComponent, ComponentKind};
use super::face::{Face, FaceType};

/// A mesh with run-time chosen attributes and mixed-arity faces.
///
/// Vertex data lives in one [`AttributeComponent`] per declared attribute;
/// all columns always have the same length, which is the vertex count.
/// Faces do not own their corners: each [`Face`] is a span of the shared
/// index array, so merging meshes only appends to both arrays.
///
/// # Example
///
/// ```
/// use lattice_core::mesh::{ComponentKind, Mesh};
///
/// let mut mesh = Mesh::new().with_label("triangle");
/// mesh.add_component(ComponentKind::Position3).unwrap();
/// {
///     let mut positions = mesh.view_mut::<lattice_core::mesh::Positions3>().unwrap();
///     positions.set_position(0, [0.0, 0.0, 0.0]);
///     positions.set_position(1, [1.0, 0.0, 0.0]);
///     positions.set_position(2, [0.0, 1.0, 0.0]);
/// }
/// mesh.add_face(&[0, 1, 2]).unwrap();
///
/// assert_eq!(mesh.vertex_count(), 3);
/// assert_eq!(mesh.face_count(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Mesh {
    components: Vec<AttributeComponent>,
    indices: Vec<u32>,
    faces: Vec<Face>,
    material_ids: BTreeSet<u32>,
    primitive_type: FaceType,
    label: Option<String>,
}

impl Mesh {
    /// Create an empty mesh with no components and triangle primitive type.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a debug label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Set the default primitive type used by [`get_mesh_data`](Self::get_mesh_data).
    pub fn with_primitive_type(mut self, primitive_type: FaceType) -> Self {
        self.primitive_type = primitive_type;
        self
    }

    /// Assemble a mesh from prepared columns of equal length.
    pub(crate) fn from_columns(components: Vec<AttributeComponent>, primitive_type: FaceType) -> Self {
        Self {
            components,
            primitive_type,
            ..Self::default()
        }
    }

    /// Create an empty mesh declaring the same components, primitive type and label.
    pub fn empty_like(&self) -> Self {
        Self {
            components: self
                .components
                .iter()
                .map(AttributeComponent::clone_empty)
                .collect(),
            indices: Vec::new(),
            faces: Vec::new(),
            material_ids: BTreeSet::new(),
            primitive_type: self.primitive_type,
            label: self.label.clone(),
        }
    }

    /// Get the debug label.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Get the default primitive type.
    pub fn primitive_type(&self) -> FaceType {
        self.primitive_type
    }

    /// Change the default primitive type.
    pub fn set_primitive_type(&mut self, primitive_type: FaceType) {
        self.primitive_type = primitive_type;
    }

    // ------------------------------------------------------------------------
    // Components
    // ------------------------------------------------------------------------

    /// Declare an attribute component and return its slot.
    ///
    /// Declaring a kind that already exists is a no-op. The new column is
    /// zero-filled up to the current vertex count.
    pub fn add_component(&mut self, kind: ComponentKind) -> Result<usize, MeshError> {
        if let Some(slot) = self.component_slot(kind) {
            return Ok(slot);
        }
        if let Some(existing) = self
            .components
            .iter()
            .map(AttributeComponent::kind)
            .find(|existing| existing.conflicts_with(kind))
        {
            return Err(MeshError::ConflictingComponent {
                existing,
                requested: kind,
            });
        }

        let mut component = AttributeComponent::new(kind);
        component.set_len(self.vertex_count());
        self.components.push(component);
        Ok(self.components.len() - 1)
    }

    /// Declare every component a vertex format needs.
    pub fn add_components<T: VertexFormat>(&mut self) -> Result<(), MeshError> {
        for kind in T::COMPONENTS {
            self.add_component(*kind)?;
        }
        Ok(())
    }

    /// Components in declaration (interleaving) order.
    pub fn components(&self) -> &[AttributeComponent] {
        &self.components
    }

    /// Get the column for a kind.
    pub fn component(&self, kind: ComponentKind) -> Option<&AttributeComponent> {
        self.components.iter().find(|c| c.kind() == kind)
    }

    pub(crate) fn component_mut(&mut self, kind: ComponentKind) -> Option<&mut AttributeComponent> {
        self.components.iter_mut().find(|c| c.kind() == kind)
    }

    /// Slot index of a kind in [`components`](Self::components).
    pub fn component_slot(&self, kind: ComponentKind) -> Option<usize> {
        self.components.iter().position(|c| c.kind() == kind)
    }

    /// Check if a component kind is declared.
    pub fn has_component(&self, kind: ComponentKind) -> bool {
        self.component_slot(kind).is_some()
    }

    /// Set of declared component kinds.
    pub fn capabilities(&self) -> Capabilities {
        self.components
            .iter()
            .fold(Capabilities::empty(), |caps, c| caps | Capabilities::of(c.kind()))
    }

    /// 3D positions, if declared.
    pub fn positions(&self) -> Option<&[[f32; 3]]> {
        match self.component(ComponentKind::Position3)? {
            AttributeComponent::Position3(values) => Some(values),
            _ => None,
        }
    }

    /// 2D positions, if declared.
    pub fn positions_2d(&self) -> Option<&[[f32; 2]]> {
        match self.component(ComponentKind::Position2)? {
            AttributeComponent::Position2(values) => Some(values),
            _ => None,
        }
    }

    /// Normals, if declared.
    pub fn normals(&self) -> Option<&[[f32; 3]]> {
        match self.component(ComponentKind::Normal)? {
            AttributeComponent::Normal(values) => Some(values),
            _ => None,
        }
    }

    /// Texture coordinates, if declared.
    pub fn uvs(&self) -> Option<&[[f32; 2]]> {
        match self.component(ComponentKind::Uv)? {
            AttributeComponent::Uv(values) => Some(values),
            _ => None,
        }
    }

    /// Colors, if declared.
    pub fn colors(&self) -> Option<&[[f32; 4]]> {
        match self.component(ComponentKind::Color)? {
            AttributeComponent::Color(values) => Some(values),
            _ => None,
        }
    }

    // ------------------------------------------------------------------------
    // Vertices
    // ------------------------------------------------------------------------

    /// Number of vertices (length of every component).
    pub fn vertex_count(&self) -> usize {
        self.components.first().map_or(0, AttributeComponent::len)
    }

    /// Grow every component to `count` vertices. Never shrinks.
    pub fn set_vertex_count(&mut self, count: usize) {
        for component in &mut self.components {
            component.set_len(count);
        }
    }

    /// Copy one vertex from `source` and return its index in this mesh.
    ///
    /// Components present in `source` but not declared here are skipped;
    /// components declared here but absent from `source` are zero-filled.
    pub fn add_vertex(&mut self, source: &Mesh, index: usize) -> Result<usize, MeshError> {
        self.add_vertices(source, index, 1)
    }

    /// Copy `count` consecutive vertices from `source` and return the first new index.
    ///
    /// A mesh without components cannot store vertices and fails with
    /// [`MeshError::MissingCapability`].
    pub fn add_vertices(
        &mut self,
        source: &Mesh,
        start: usize,
        count: usize,
    ) -> Result<usize, MeshError> {
        let source_count = source.vertex_count();
        if start + count > source_count {
            return Err(MeshError::VertexOutOfRange {
                index: (start + count).saturating_sub(1),
                vertex_count: source_count,
            });
        }

        if count > 0 && self.components.is_empty() {
            return Err(MeshError::MissingCapability {
                required: source.capabilities(),
                available: Capabilities::empty(),
            });
        }

        let first = self.vertex_count();
        for component in &mut self.components {
            if let Some(source_component) = source.component(component.kind()) {
                component.extend_from(source_component, start, count)?;
            }
        }
        self.set_vertex_count(first + count);
        Ok(first)
    }

    // ------------------------------------------------------------------------
    // Faces
    // ------------------------------------------------------------------------

    /// Number of faces.
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Face records.
    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    /// The shared index array.
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Corner indices of one face, or `None` if the face spans past the index array.
    pub fn face_indices(&self, face: &Face) -> Option<&[u32]> {
        self.indices.get(face.index_range())
    }

    /// Corner indices of the face at `position` in [`faces`](Self::faces).
    pub fn face_corners(&self, position: usize) -> Result<&[u32], MeshError> {
        let face = self.faces.get(position).ok_or(MeshError::InvalidFace {
            face: position,
            start: 0,
            count: 0,
            index_count: self.indices.len(),
        })?;
        self.face_indices(face).ok_or(MeshError::InvalidFace {
            face: position,
            start: face.start_index,
            count: face.count,
            index_count: self.indices.len(),
        })
    }

    /// Material ids used by at least one face.
    pub fn material_ids(&self) -> &BTreeSet<u32> {
        &self.material_ids
    }

    /// Append a face with material 0 and return its position.
    pub fn add_face(&mut self, indices: &[u32]) -> Result<usize, MeshError> {
        self.add_face_with_material(0, indices)
    }

    /// Append a face with the given material and return its position.
    pub fn add_face_with_material(
        &mut self,
        material_id: u32,
        indices: &[u32],
    ) -> Result<usize, MeshError> {
        let vertex_count = self.vertex_count();
        if let Some(&bad) = indices.iter().find(|&&i| i as usize >= vertex_count) {
            return Err(MeshError::VertexOutOfRange {
                index: bad as usize,
                vertex_count,
            });
        }

        let face = Face::new(self.indices.len(), indices.len(), material_id);
        self.indices.extend_from_slice(indices);
        self.faces.push(face);
        self.material_ids.insert(material_id);
        Ok(self.faces.len() - 1)
    }

    /// Add a face made of the last `arity` vertices.
    ///
    /// Only point, line, triangle and quad arities are accepted.
    pub fn add_face_from_tail(&mut self, arity: usize) -> Result<usize, MeshError> {
        let face_type = FaceType::from_arity(arity)?;
        let vertex_count = self.vertex_count();
        let start = vertex_count
            .checked_sub(face_type.arity())
            .ok_or(MeshError::IndexCountMismatch {
                count: vertex_count,
                arity,
            })?;
        self.add_face_from_vertices(start, arity)
    }

    /// Add a face made of `arity` consecutive vertices starting at `start`.
    pub fn add_face_from_vertices(&mut self, start: usize, arity: usize) -> Result<usize, MeshError> {
        let face_type = FaceType::from_arity(arity)?;
        let out_of_range = || MeshError::VertexOutOfRange {
            index: start,
            vertex_count: self.vertex_count(),
        };
        let first = u32::try_from(start).map_err(|_| out_of_range())?;
        let last = first
            .checked_add(face_type.arity() as u32)
            .ok_or_else(out_of_range)?;
        let corners: Vec<u32> = (first..last).collect();
        self.add_face(&corners)
    }

    /// Rebuild the face list by reading the index array as back-to-back faces.
    ///
    /// Existing faces are discarded; all new faces use material 0.
    pub fn create_faces_from_indices(&mut self, face_type: FaceType) -> Result<(), MeshError> {
        let arity = face_type.arity();
        if self.indices.len() % arity != 0 {
            return Err(MeshError::IndexCountMismatch {
                count: self.indices.len(),
                arity,
            });
        }
        let vertex_count = self.vertex_count();
        if let Some(&bad) = self.indices.iter().find(|&&i| i as usize >= vertex_count) {
            return Err(MeshError::VertexOutOfRange {
                index: bad as usize,
                vertex_count,
            });
        }

        self.faces = (0..self.indices.len() / arity)
            .map(|i| Face::new(i * arity, arity, 0))
            .collect();
        self.material_ids.clear();
        if !self.faces.is_empty() {
            self.material_ids.insert(0);
        }
        self.primitive_type = face_type;
        Ok(())
    }

    /// Rebuild indices and faces assuming vertices are stored in face order.
    ///
    /// Every vertex is used by exactly one face; nothing is shared.
    pub fn create_faces_and_indices(&mut self, face_type: FaceType) -> Result<(), MeshError> {
        let arity = face_type.arity();
        let vertex_count = self.vertex_count();
        if vertex_count % arity != 0 {
            return Err(MeshError::IndexCountMismatch {
                count: vertex_count,
                arity,
            });
        }
        self.indices = (0..vertex_count as u32).collect();
        self.create_faces_from_indices(face_type)
    }

    /// Replace the index array. Faces are left untouched; call
    /// [`create_faces_from_indices`](Self::create_faces_from_indices) to rebuild them.
    pub fn set_indices(&mut self, indices: Vec<u32>) {
        self.indices = indices;
    }

    // ------------------------------------------------------------------------
    // Whole-mesh operations
    // ------------------------------------------------------------------------

    /// Merge the faces of `other` into this mesh.
    ///
    /// With `filter_material` set, only faces of that material are copied.
    /// With `new_material` set, copied faces are re-tagged. Vertices shared by
    /// several copied faces stay shared. A face-less `other` contributes all of
    /// its vertices when no filter is given.
    pub fn add_mesh(
        &mut self,
        other: &Mesh,
        filter_material: Option<u32>,
        new_material: Option<u32>,
    ) -> Result<(), MeshError> {
        if other.faces.is_empty() {
            if filter_material.is_none() && other.vertex_count() > 0 {
                self.add_vertices(other, 0, other.vertex_count())?;
            }
            return Ok(());
        }
        other.validate()?;

        let mut remap: Vec<Option<u32>> = vec![None; other.vertex_count()];
        let mut corners = Vec::new();
        let selected = other
            .faces
            .iter()
            .enumerate()
            .filter(|(_, face)| filter_material.is_none_or(|id| face.material_id == id));

        for (position, face) in selected {
            corners.clear();
            for &index in other.face_corners(position)? {
                let mapped = match remap[index as usize] {
                    Some(mapped) => mapped,
                    None => {
                        let mapped = self.add_vertex(other, index as usize)? as u32;
                        remap[index as usize] = Some(mapped);
                        mapped
                    }
                };
                corners.push(mapped);
            }
            self.add_face_with_material(new_material.unwrap_or(face.material_id), &corners)?;
        }
        Ok(())
    }

    /// Split into one mesh per material id, in ascending id order.
    pub fn split_by_material(&self) -> Result<Vec<(u32, Mesh)>, MeshError> {
        let mut parts = Vec::with_capacity(self.material_ids.len());
        for &material_id in &self.material_ids {
            let mut part = self.empty_like();
            part.add_mesh(self, Some(material_id), None)?;
            parts.push((material_id, part));
        }
        Ok(parts)
    }

    /// Offset every position. 2D positions use the `x` and `y` of `offset`.
    pub fn translate(&mut self, offset: [f32; 3]) {
        for component in &mut self.components {
            match component {
                AttributeComponent::Position3(values) => {
                    for p in values.iter_mut() {
                        p[0] += offset[0];
                        p[1] += offset[1];
                        p[2] += offset[2];
                    }
                }
                AttributeComponent::Position2(values) => {
                    for p in values.iter_mut() {
                        p[0] += offset[0];
                        p[1] += offset[1];
                    }
                }
                _ => {}
            }
        }
    }

    /// Axis-aligned bounds of the 3D positions as `(min, max)`.
    pub fn bounds(&self) -> Option<([f32; 3], [f32; 3])> {
        let positions = self.positions()?;
        let first = *positions.first()?;
        Some(positions.iter().fold((first, first), |(mut min, mut max), p| {
            for axis in 0..3 {
                min[axis] = min[axis].min(p[axis]);
                max[axis] = max[axis].max(p[axis]);
            }
            (min, max)
        }))
    }

    /// Check the mesh invariants.
    ///
    /// Every component has the same length, every face spans existing index
    /// slots, and every index addresses an existing vertex.
    pub fn validate(&self) -> Result<(), MeshError> {
        let vertex_count = self.vertex_count();
        for component in &self.components {
            if component.len() != vertex_count {
                return Err(MeshError::ComponentLengthMismatch {
                    kind: component.kind(),
                    len: component.len(),
                    vertex_count,
                });
            }
        }

        if !self.faces.is_empty() && self.indices.is_empty() {
            return Err(MeshError::FacesWithoutIndices);
        }
        for (i, face) in self.faces.iter().enumerate() {
            if face.end_index() > self.indices.len() {
                return Err(MeshError::InvalidFace {
                    face: i,
                    start: face.start_index,
                    count: face.count,
                    index_count: self.indices.len(),
                });
            }
        }
        if let Some(&bad) = self.indices.iter().find(|&&i| i as usize >= vertex_count) {
            return Err(MeshError::VertexOutOfRange {
                index: bad as usize,
                vertex_count,
            });
        }
        Ok(())
    }

    pub(crate) fn push_face_unchecked(&mut self, material_id: u32, indices: &[u32]) {
        self.faces
            .push(Face::new(self.indices.len(), indices.len(), material_id));
        self.indices.extend_from_slice(indices);
        self.material_ids.insert(material_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::PositionNormalUv;

    fn triangle_strip_mesh() -> Mesh {
        let mut mesh = Mesh::new();
        mesh.add_component(ComponentKind::Position3).unwrap();
        mesh.add_component(ComponentKind::Uv).unwrap();
        let positions = [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [1.0, 1.0, 0.0]];
        for (i, p) in positions.iter().enumerate() {
            mesh.component_mut(ComponentKind::Position3)
                .unwrap()
                .set(i, *p)
                .unwrap();
            mesh.component_mut(ComponentKind::Uv)
                .unwrap()
                .set(i, [p[0], p[1]])
                .unwrap();
        }
        mesh.add_face_with_material(0, &[0, 1, 2]).unwrap();
        mesh.add_face_with_material(1, &[2, 1, 3]).unwrap();
        mesh
    }

    fn assert_lengths_synced(mesh: &Mesh) {
        for component in mesh.components() {
            assert_eq!(component.len(), mesh.vertex_count());
        }
    }

    #[test]
    fn test_add_component_is_idempotent() {
        let mut mesh = Mesh::new();
        let first = mesh.add_component(ComponentKind::Normal).unwrap();
        let second = mesh.add_component(ComponentKind::Normal).unwrap();
        assert_eq!(first, second);
        assert_eq!(mesh.components().len(), 1);
    }

    #[test]
    fn test_add_component_conflict() {
        let mut mesh = Mesh::new();
        mesh.add_component(ComponentKind::Position3).unwrap();
        let err = mesh.add_component(ComponentKind::Position2).unwrap_err();
        assert_eq!(
            err,
            MeshError::ConflictingComponent {
                existing: ComponentKind::Position3,
                requested: ComponentKind::Position2,
            }
        );
    }

    #[test]
    fn test_add_component_after_vertices_is_zero_filled() {
        let mut mesh = triangle_strip_mesh();
        mesh.add_component(ComponentKind::Color).unwrap();
        assert_lengths_synced(&mesh);
        assert!(mesh.colors().unwrap().iter().all(|c| *c == [0.0; 4]));
    }

    #[test]
    fn test_add_components_from_format() {
        let mut mesh = Mesh::new();
        mesh.add_components::<PositionNormalUv>().unwrap();
        assert_eq!(
            mesh.capabilities(),
            Capabilities::POSITION3 | Capabilities::NORMAL | Capabilities::UV
        );
        let order: Vec<_> = mesh.components().iter().map(|c| c.kind()).collect();
        assert_eq!(
            order,
            vec![ComponentKind::Position3, ComponentKind::Normal, ComponentKind::Uv]
        );
    }

    #[test]
    fn test_add_vertices_skips_and_fills_components() {
        let source = triangle_strip_mesh();
        let mut dest = Mesh::new();
        dest.add_component(ComponentKind::Position3).unwrap();
        dest.add_component(ComponentKind::Normal).unwrap();

        let first = dest.add_vertices(&source, 1, 2).unwrap();
        assert_eq!(first, 0);
        assert_eq!(dest.vertex_count(), 2);
        assert_lengths_synced(&dest);
        assert_eq!(dest.positions().unwrap()[0], [1.0, 0.0, 0.0]);
        assert_eq!(dest.normals().unwrap()[1], [0.0; 3]);
    }

    #[test]
    fn test_add_vertices_out_of_range() {
        let source = triangle_strip_mesh();
        let mut dest = source.empty_like();
        assert!(matches!(
            dest.add_vertices(&source, 3, 2),
            Err(MeshError::VertexOutOfRange { .. })
        ));
        assert_eq!(dest.vertex_count(), 0);
    }

    #[test]
    fn test_add_face_rejects_bad_index() {
        let mut mesh = triangle_strip_mesh();
        assert!(matches!(
            mesh.add_face(&[0, 1, 9]),
            Err(MeshError::VertexOutOfRange { index: 9, .. })
        ));
        assert_eq!(mesh.face_count(), 2);
    }

    #[test]
    fn test_add_face_records_material() {
        let mesh = triangle_strip_mesh();
        assert_eq!(mesh.material_ids().iter().copied().collect::<Vec<_>>(), vec![0, 1]);
        assert_eq!(mesh.faces()[1], Face::new(3, 3, 1));
        assert_eq!(mesh.indices(), &[0, 1, 2, 2, 1, 3]);
    }

    #[test]
    fn test_add_face_from_tail() {
        let mut mesh = triangle_strip_mesh();
        mesh.add_face_from_tail(3).unwrap();
        let face = mesh.faces()[2];
        assert_eq!(mesh.face_indices(&face), Some(&[1, 2, 3][..]));
    }

    #[test]
    fn test_add_face_from_tail_rejects_ngon() {
        let mut mesh = triangle_strip_mesh();
        assert!(matches!(
            mesh.add_face_from_tail(5),
            Err(MeshError::UnsupportedFaceArity(5))
        ));
    }

    #[test]
    fn test_create_faces_from_indices() {
        let mut mesh = triangle_strip_mesh();
        mesh.create_faces_from_indices(FaceType::Line).unwrap();
        assert_eq!(mesh.face_count(), 3);
        assert!(mesh.faces().iter().all(|f| f.is_line() && f.material_id == 0));
        assert_eq!(mesh.primitive_type(), FaceType::Line);
    }

    #[test]
    fn test_create_faces_from_indices_count_mismatch() {
        let mut mesh = triangle_strip_mesh();
        assert_eq!(
            mesh.create_faces_from_indices(FaceType::Quad),
            Err(MeshError::IndexCountMismatch { count: 6, arity: 4 })
        );
    }

    #[test]
    fn test_create_faces_and_indices() {
        let mut mesh = triangle_strip_mesh();
        mesh.create_faces_and_indices(FaceType::Quad).unwrap();
        assert_eq!(mesh.indices(), &[0, 1, 2, 3]);
        assert_eq!(mesh.face_count(), 1);
        assert!(mesh.faces()[0].is_quad());
    }

    #[test]
    fn test_add_mesh_filters_material() {
        let source = triangle_strip_mesh();
        let mut dest = source.empty_like();
        dest.add_mesh(&source, Some(1), None).unwrap();
        assert_eq!(dest.face_count(), 1);
        assert_eq!(dest.vertex_count(), 3);
        assert_eq!(dest.material_ids().iter().copied().collect::<Vec<_>>(), vec![1]);
        dest.validate().unwrap();
    }

    #[test]
    fn test_add_mesh_keeps_sharing_and_retags() {
        let source = triangle_strip_mesh();
        let mut dest = source.empty_like();
        dest.add_mesh(&source, None, Some(7)).unwrap();
        assert_eq!(dest.vertex_count(), 4);
        assert_eq!(dest.face_count(), 2);
        assert!(dest.faces().iter().all(|f| f.material_id == 7));
        assert_eq!(dest.indices(), source.indices());
    }

    #[test]
    fn test_clone_is_deep() {
        let original = triangle_strip_mesh();
        let mut copy = original.clone();
        copy.translate([1.0, 0.0, 0.0]);
        copy.add_face(&[3, 2, 1]).unwrap();

        assert_eq!(copy.vertex_count(), original.vertex_count());
        assert_eq!(original.positions().unwrap()[0], [0.0, 0.0, 0.0]);
        assert_eq!(original.face_count(), 2);
        assert_eq!(original.indices().len(), 6);
    }

    #[test]
    fn test_split_by_material() {
        let mesh = triangle_strip_mesh();
        let parts = mesh.split_by_material().unwrap();
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0].0, 0);
        assert_eq!(parts[1].1.face_count(), 1);
    }

    #[test]
    fn test_bounds() {
        let mesh = triangle_strip_mesh();
        assert_eq!(mesh.bounds(), Some(([0.0, 0.0, 0.0], [1.0, 1.0, 0.0])));
        assert_eq!(Mesh::new().bounds(), None);
    }

    #[test]
    fn test_translate_2d_positions() {
        let mut mesh = Mesh::new();
        mesh.add_component(ComponentKind::Position2).unwrap();
        mesh.component_mut(ComponentKind::Position2)
            .unwrap()
            .push([1.0, 1.0])
            .unwrap();
        mesh.translate([2.0, 3.0, 4.0]);
        assert_eq!(mesh.positions_2d().unwrap()[0], [3.0, 4.0]);
    }

    #[test]
    fn test_add_vertices_needs_components() {
        let source = triangle_strip_mesh();
        let mut dest = Mesh::new();
        assert_eq!(
            dest.add_vertices(&source, 0, 2),
            Err(MeshError::MissingCapability {
                required: Capabilities::POSITION3 | Capabilities::UV,
                available: Capabilities::empty(),
            })
        );
        assert!(matches!(
            dest.add_mesh(&source, None, None),
            Err(MeshError::MissingCapability { .. })
        ));
        assert_eq!(dest.face_count(), 0);
        // Copying nothing is still fine.
        assert_eq!(dest.add_vertices(&source, 0, 0), Ok(0));
    }

    #[test]
    fn test_add_face_from_vertices_rejects_start_beyond_u32() {
        let mut mesh = triangle_strip_mesh();
        assert!(matches!(
            mesh.add_face_from_vertices(u32::MAX as usize + 1, 3),
            Err(MeshError::VertexOutOfRange { .. })
        ));
        assert!(matches!(
            mesh.add_face_from_vertices(u32::MAX as usize - 1, 3),
            Err(MeshError::VertexOutOfRange { .. })
        ));
        assert_eq!(mesh.face_count(), 2);
    }

    #[test]
    fn test_face_indices_past_index_array() {
        let mut mesh = triangle_strip_mesh();
        mesh.set_indices(vec![0]);
        let face = mesh.faces()[0];
        assert_eq!(mesh.face_indices(&face), None);
        assert_eq!(
            mesh.face_corners(1),
            Err(MeshError::InvalidFace {
                face: 1,
                start: 3,
                count: 3,
                index_count: 1,
            })
        );
        assert!(mesh.face_corners(9).is_err());
    }

    #[test]
    fn test_validate_detects_faces_without_indices() {
        let mut mesh = triangle_strip_mesh();
        mesh.set_indices(Vec::new());
        assert_eq!(mesh.validate(), Err(MeshError::FacesWithoutIndices));
    }
}
