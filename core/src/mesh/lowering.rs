//! Lowering meshes to GPU-ready buffers.
//!
//! [`Mesh::to_primitive`] rewrites the faces of one material as fixed-arity
//! primitives with private vertices. [`Mesh::get_mesh_data`] then picks an
//! output vertex struct by exact capability match and packs everything into
//! a [`MeshData`].

use crate::buffer::Buffer1D;
use crate::error::MeshError;
use crate::profiling::{profile_function, profile_plot, profile_scope};

use super::data::Mesh;
use super::face::FaceType;
use super::layout::VertexLayoutDefinition;
use super::vertex::{DestinationVertexKind, VertexBuffer};

/// Primitive arity of a [`MeshData`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveArity {
    /// Index pairs.
    Lines,
    /// Index triples.
    Triangles,
}

impl PrimitiveArity {
    /// Indices per primitive.
    pub fn indices_per_primitive(&self) -> usize {
        match self {
            Self::Lines => 2,
            Self::Triangles => 3,
        }
    }

    /// Face type emitted by lowering for this arity.
    pub fn face_type(&self) -> FaceType {
        match self {
            Self::Lines => FaceType::Line,
            Self::Triangles => FaceType::Triangle,
        }
    }
}

/// Interleaved vertices and 16-bit indices for one material of a mesh.
///
/// Always a fresh copy: it never aliases the mesh it was built from.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshData {
    /// Interleaved vertices.
    pub vertex_buffer: VertexBuffer,
    /// Indices into `vertex_buffer`.
    pub index_buffer: Buffer1D<u16>,
    /// How `index_buffer` groups into primitives.
    pub arity: PrimitiveArity,
    /// Layout of one vertex of `vertex_buffer`.
    pub layout: VertexLayoutDefinition,
    /// Material the faces were selected by.
    pub material_id: u32,
}

impl MeshData {
    /// Number of vertices in `vertex_buffer`.
    pub fn vertex_count(&self) -> usize {
        self.vertex_buffer.len()
    }

    /// Number of indices in `index_buffer`.
    pub fn index_count(&self) -> usize {
        self.index_buffer.len()
    }

    /// Number of lines or triangles.
    pub fn primitive_count(&self) -> usize {
        self.index_buffer.len() / self.arity.indices_per_primitive()
    }

    /// The output struct used for vertices.
    pub fn vertex_kind(&self) -> DestinationVertexKind {
        self.vertex_buffer.kind()
    }

    /// Raw vertex bytes.
    pub fn vertex_bytes(&self) -> &[u8] {
        self.vertex_buffer.as_bytes()
    }

    /// Raw index bytes.
    pub fn index_bytes(&self) -> &[u8] {
        self.index_buffer.as_bytes()
    }
}

impl Mesh {
    /// Rewrite the faces of `material_id` as faces of `face_type`.
    ///
    /// Faces whose arity equals the target pass through; quads split into
    /// `(v0, v1, v2)` and `(v2, v3, v1)` when triangles are requested. Every
    /// output corner gets its own vertex. Any other combination fails with
    /// [`MeshError::UnsupportedTopology`].
    pub fn to_primitive(&self, face_type: FaceType, material_id: u32) -> Result<Mesh, MeshError> {
        profile_function!();
        self.validate()?;

        let mut result = self.empty_like();
        result.set_primitive_type(face_type);

        let mut corners = Vec::with_capacity(4);
        let mut faces_in = 0usize;
        for (position, face) in self
            .faces()
            .iter()
            .enumerate()
            .filter(|(_, f)| f.material_id == material_id)
        {
            faces_in += 1;
            let indices = self.face_corners(position)?;
            match (face.count, face_type) {
                (4, FaceType::Triangle) => {
                    for triangle in [
                        [indices[0], indices[1], indices[2]],
                        [indices[2], indices[3], indices[1]],
                    ] {
                        result.copy_face(self, material_id, &triangle, &mut corners)?;
                    }
                }
                (count, target) if count == target.arity() => {
                    result.copy_face(self, material_id, indices, &mut corners)?;
                }
                (count, target) => {
                    return Err(MeshError::UnsupportedTopology {
                        face_arity: count,
                        target,
                    });
                }
            }
        }

        log::trace!(
            "to_primitive({face_type:?}, material {material_id}): {faces_in} faces in, {} faces out, {} vertices",
            result.face_count(),
            result.vertex_count()
        );
        Ok(result)
    }

    fn copy_face(
        &mut self,
        source: &Mesh,
        material_id: u32,
        source_corners: &[u32],
        corners: &mut Vec<u32>,
    ) -> Result<(), MeshError> {
        corners.clear();
        for &index in source_corners {
            corners.push(self.add_vertex(source, index as usize)? as u32);
        }
        self.push_face_unchecked(material_id, corners);
        Ok(())
    }

    /// Copy of the mesh in which no two faces share a vertex.
    ///
    /// A mesh without faces is returned as a plain clone. Faces without
    /// indices are rejected with [`MeshError::FacesWithoutIndices`].
    pub fn expanded(&self) -> Result<Mesh, MeshError> {
        profile_function!();
        if self.faces().is_empty() {
            return Ok(self.clone());
        }
        if self.indices().is_empty() {
            return Err(MeshError::FacesWithoutIndices);
        }
        self.validate()?;

        let mut result = self.empty_like();
        let mut corners = Vec::new();
        for (position, face) in self.faces().iter().enumerate() {
            result.copy_face(self, face.material_id, self.face_corners(position)?, &mut corners)?;
        }
        Ok(result)
    }

    /// Expand in place, see [`expanded`](Self::expanded).
    pub fn expand(&mut self) -> Result<(), MeshError> {
        *self = self.expanded()?;
        Ok(())
    }

    /// Lower the faces of `material_id` into interleaved GPU buffers.
    ///
    /// Triangle and quad meshes produce triangles, line meshes produce
    /// lines. The vertex struct is the first of
    /// [`DestinationVertexKind::PRIORITY`] whose components equal the mesh's.
    pub fn get_mesh_data(&self, material_id: u32) -> Result<MeshData, MeshError> {
        profile_function!();
        let kind = DestinationVertexKind::select(self.capabilities())?;
        let arity = match self.primitive_type() {
            FaceType::Triangle | FaceType::Quad => PrimitiveArity::Triangles,
            FaceType::Line => PrimitiveArity::Lines,
            FaceType::Point => {
                return Err(MeshError::UnsupportedTopology {
                    face_arity: FaceType::Point.arity(),
                    target: FaceType::Point,
                });
            }
        };

        let primitive = self.to_primitive(arity.face_type(), material_id)?;
        let vertex_count = primitive.vertex_count();
        if vertex_count > usize::from(u16::MAX) + 1 {
            return Err(MeshError::IndexOverflow { vertex_count });
        }

        let (vertex_buffer, index_buffer) = {
            profile_scope!("interleave");
            let vertex_buffer = primitive.to_vertex_buffer(kind)?;
            let index_buffer: Buffer1D<u16> =
                primitive.indices().iter().map(|&i| i as u16).collect();
            (vertex_buffer, index_buffer)
        };
        profile_plot!("lowered vertices", vertex_count);

        log::debug!(
            "mesh {}: material {material_id} lowered to {kind:?} ({vertex_count} vertices, {} indices)",
            self.label().unwrap_or("<unnamed>"),
            index_buffer.len()
        );

        Ok(MeshData {
            vertex_buffer,
            index_buffer,
            arity,
            layout: kind.layout(),
            material_id,
        })
    }

    /// Lower every material, in ascending material id order.
    pub fn get_all_mesh_data(&self) -> Result<Vec<MeshData>, MeshError> {
        self.material_ids()
            .iter()
            .map(|&material_id| self.get_mesh_data(material_id))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::{ComponentKind, Positions3};

    fn positions_mesh(points: &[[f32; 3]]) -> Mesh {
        let mut mesh = Mesh::new();
        mesh.add_component(ComponentKind::Position3).unwrap();
        let mut view = mesh.view_mut::<Positions3>().unwrap();
        for (i, p) in points.iter().enumerate() {
            view.set_position(i, *p);
        }
        mesh
    }

    fn unit_quad() -> Mesh {
        let mut mesh = positions_mesh(&[
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [1.0, 1.0, 0.0],
            [0.0, 1.0, 0.0],
        ]);
        mesh.add_face(&[0, 1, 2, 3]).unwrap();
        mesh
    }

    #[test]
    fn test_quad_split_uses_fixed_diagonal() {
        let mesh = unit_quad();
        let lowered = mesh.to_primitive(FaceType::Triangle, 0).unwrap();
        assert_eq!(lowered.face_count(), 2);
        assert_eq!(lowered.vertex_count(), 6);

        let positions = lowered.positions().unwrap();
        let corner = |face: usize, k: usize| {
            positions[lowered.face_corners(face).unwrap()[k] as usize]
        };
        // (a, b, c)
        assert_eq!(corner(0, 0), [0.0, 0.0, 0.0]);
        assert_eq!(corner(0, 1), [1.0, 0.0, 0.0]);
        assert_eq!(corner(0, 2), [1.0, 1.0, 0.0]);
        // (c, d, b)
        assert_eq!(corner(1, 0), [1.0, 1.0, 0.0]);
        assert_eq!(corner(1, 1), [0.0, 1.0, 0.0]);
        assert_eq!(corner(1, 2), [1.0, 0.0, 0.0]);
    }

    #[test]
    fn test_to_primitive_filters_material() {
        let mut mesh = unit_quad();
        mesh.add_face_with_material(3, &[0, 1, 2]).unwrap();
        let lowered = mesh.to_primitive(FaceType::Triangle, 3).unwrap();
        assert_eq!(lowered.face_count(), 1);
        assert_eq!(lowered.vertex_count(), 3);
        assert!(lowered.faces().iter().all(|f| f.material_id == 3));
    }

    #[test]
    fn test_to_primitive_rejects_ngon() {
        let mut mesh = positions_mesh(&[[0.0; 3]; 5]);
        mesh.add_face(&[0, 1, 2, 3, 4]).unwrap();
        assert_eq!(
            mesh.to_primitive(FaceType::Triangle, 0).err(),
            Some(MeshError::UnsupportedTopology {
                face_arity: 5,
                target: FaceType::Triangle
            })
        );
    }

    #[test]
    fn test_to_primitive_rejects_lines_as_triangles() {
        let mut mesh = positions_mesh(&[[0.0; 3]; 2]);
        mesh.add_face(&[0, 1]).unwrap();
        assert!(matches!(
            mesh.to_primitive(FaceType::Triangle, 0),
            Err(MeshError::UnsupportedTopology { face_arity: 2, .. })
        ));
        assert_eq!(mesh.to_primitive(FaceType::Line, 0).unwrap().face_count(), 1);
    }

    #[test]
    fn test_quad_passes_through_as_quad() {
        let mesh = unit_quad();
        let lowered = mesh.to_primitive(FaceType::Quad, 0).unwrap();
        assert_eq!(lowered.face_count(), 1);
        assert!(lowered.faces()[0].is_quad());
    }

    #[test]
    fn test_expanded_unshares_vertices() {
        let mut mesh = unit_quad();
        mesh.add_face(&[0, 2, 3]).unwrap();
        let expanded = mesh.expanded().unwrap();
        assert_eq!(expanded.vertex_count(), 7);
        assert_eq!(expanded.indices(), &[0, 1, 2, 3, 4, 5, 6]);

        let twice = expanded.expanded().unwrap();
        assert_eq!(twice.vertex_count(), expanded.vertex_count());
        assert_eq!(twice.face_count(), expanded.face_count());
    }

    #[test]
    fn test_expanded_without_faces_is_clone() {
        let mesh = positions_mesh(&[[1.0, 2.0, 3.0]]);
        assert_eq!(mesh.expanded().unwrap(), mesh);
    }

    #[test]
    fn test_expanded_faces_without_indices() {
        let mut mesh = unit_quad();
        mesh.set_indices(Vec::new());
        assert_eq!(mesh.expanded(), Err(MeshError::FacesWithoutIndices));
    }

    #[test]
    fn test_expand_in_place() {
        let mut mesh = unit_quad();
        mesh.add_face(&[3, 2, 1]).unwrap();
        mesh.expand().unwrap();
        assert_eq!(mesh.vertex_count(), 7);
    }

    #[test]
    fn test_point_mesh_has_no_mesh_data() {
        let mut mesh = Mesh::new().with_primitive_type(FaceType::Point);
        mesh.add_component(ComponentKind::Position3).unwrap();
        mesh.add_component(ComponentKind::Color).unwrap();
        assert!(matches!(
            mesh.get_mesh_data(0),
            Err(MeshError::UnsupportedTopology { .. })
        ));
    }

    #[test]
    fn test_mesh_data_byte_views() {
        let mut mesh = unit_quad();
        mesh.add_component(ComponentKind::Color).unwrap();
        let data = mesh.get_mesh_data(0).unwrap();
        assert_eq!(data.vertex_kind(), DestinationVertexKind::PositionColor);
        assert_eq!(data.vertex_bytes().len(), 6 * 28);
        assert_eq!(data.index_bytes().len(), 6 * 2);
        assert_eq!(data.primitive_count(), 2);
    }
}
