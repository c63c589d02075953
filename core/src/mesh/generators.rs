//! Mesh generators for common shapes.
//!
//! Generated quads store their corners in Z order (bottom-left, bottom-right,
//! top-left, top-right) so that the fixed split in
//! [`Mesh::to_primitive`](super::Mesh::to_primitive) divides them along the
//! 1-2 diagonal and the first triangle faces outwards.

use std::f32::consts::{PI, TAU};

use crate::error::MeshError;
use crate::math::{Vec3, vec3_to_array};
use crate::profiling::profile_function;

use super::component::AttributeComponent;
use super::data::Mesh;
use super::face::FaceType;
use super::vertex::VertexStruct;

/// Build a mesh from an array of vertex structs.
///
/// With an empty `indices` slice the vertices are taken to be in face order
/// (every `face_type.arity()` vertices form one face). Otherwise `indices`
/// is split into back-to-back faces of `face_type`.
pub fn create_from_vertices<T: VertexStruct>(
    vertices: &[T],
    indices: &[u32],
    face_type: FaceType,
) -> Result<Mesh, MeshError> {
    profile_function!();
    let mut mesh = Mesh::new().with_primitive_type(face_type);
    mesh.add_components::<T>()?;
    {
        let mut view = mesh.view_mut::<T>()?;
        for vertex in vertices {
            view.push_vertex(vertex);
        }
    }

    if indices.is_empty() {
        mesh.create_faces_and_indices(face_type)?;
    } else {
        mesh.set_indices(indices.to_vec());
        mesh.create_faces_from_indices(face_type)?;
    }
    Ok(mesh)
}

/// Position/normal/uv columns under construction.
#[derive(Default)]
struct Columns {
    positions: Vec<[f32; 3]>,
    normals: Vec<[f32; 3]>,
    uvs: Vec<[f32; 2]>,
}

impl Columns {
    fn push(&mut self, position: Vec3, normal: Vec3, uv: [f32; 2]) -> u32 {
        self.positions.push(vec3_to_array(position));
        self.normals.push(vec3_to_array(normal));
        self.uvs.push(uv);
        (self.positions.len() - 1) as u32
    }

    fn into_mesh(self, primitive_type: FaceType) -> Mesh {
        Mesh::from_columns(
            vec![
                AttributeComponent::Position3(self.positions),
                AttributeComponent::Normal(self.normals),
                AttributeComponent::Uv(self.uvs),
            ],
            primitive_type,
        )
    }
}

/// Generate an axis-aligned cube centered at the origin.
///
/// Each side is its own quad with four private vertices (24 in total), so
/// normals stay flat per side.
pub fn create_cube(size: f32) -> Mesh {
    profile_function!();
    let half = size * 0.5;
    // (normal, right, up) with right x up == normal.
    let sides = [
        (Vec3::x(), -Vec3::z(), Vec3::y()),
        (-Vec3::x(), Vec3::z(), Vec3::y()),
        (Vec3::y(), Vec3::x(), -Vec3::z()),
        (-Vec3::y(), Vec3::x(), Vec3::z()),
        (Vec3::z(), Vec3::x(), Vec3::y()),
        (-Vec3::z(), -Vec3::x(), Vec3::y()),
    ];

    let mut columns = Columns::default();
    let mut faces = Vec::with_capacity(sides.len());
    for (normal, right, up) in sides {
        let mut corners = [0u32; 4];
        for (slot, (r, u, uv)) in corners.iter_mut().zip([
            (-1.0, -1.0, [0.0, 1.0]),
            (1.0, -1.0, [1.0, 1.0]),
            (-1.0, 1.0, [0.0, 0.0]),
            (1.0, 1.0, [1.0, 0.0]),
        ]) {
            *slot = columns.push((normal + right * r + up * u) * half, normal, uv);
        }
        faces.push(corners);
    }

    let mut mesh = columns.into_mesh(FaceType::Quad).with_label("cube");
    for corners in faces {
        mesh.push_face_unchecked(0, &corners);
    }
    mesh
}

/// Generate a UV sphere.
///
/// `segments` run around the equator and `rings` from pole to pole. The cap
/// rings are triangles, every other cell is a quad. Seam and pole vertices
/// are duplicated for texturing but share exact positions.
pub fn create_sphere(radius: f32, segments: u32, rings: u32) -> Mesh {
    profile_function!();
    let segments = segments.max(3);
    let rings = rings.max(2);

    let mut columns = Columns::default();
    for ring in 0..=rings {
        let (sin_theta, cos_theta) = if ring == 0 {
            (0.0, 1.0)
        } else if ring == rings {
            (0.0, -1.0)
        } else {
            (ring as f32 * PI / rings as f32).sin_cos()
        };

        for segment in 0..=segments {
            let phi = (segment % segments) as f32 * TAU / segments as f32;
            let (sin_phi, cos_phi) = phi.sin_cos();
            let direction = Vec3::new(sin_theta * cos_phi, cos_theta, sin_theta * sin_phi);
            columns.push(
                direction * radius,
                direction,
                [segment as f32 / segments as f32, ring as f32 / rings as f32],
            );
        }
    }

    let mut mesh = columns.into_mesh(FaceType::Triangle).with_label("sphere");
    for ring in 0..rings {
        for segment in 0..segments {
            let current = ring * (segments + 1) + segment;
            let next = current + segments + 1;
            if ring == 0 {
                mesh.push_face_unchecked(0, &[current, next + 1, next]);
            } else if ring == rings - 1 {
                mesh.push_face_unchecked(0, &[current, current + 1, next]);
            } else {
                mesh.push_face_unchecked(0, &[current, current + 1, next, next + 1]);
            }
        }
    }
    mesh
}

/// Generate a grid on the XZ plane, facing +Y, centered at the origin.
pub fn create_grid(width: f32, depth: f32, cells_x: u32, cells_z: u32) -> Mesh {
    profile_function!();
    let cells_x = cells_x.max(1);
    let cells_z = cells_z.max(1);

    let mut columns = Columns::default();
    for j in 0..=cells_z {
        for i in 0..=cells_x {
            let u = i as f32 / cells_x as f32;
            let v = j as f32 / cells_z as f32;
            columns.push(
                Vec3::new((u - 0.5) * width, 0.0, (v - 0.5) * depth),
                Vec3::y(),
                [u, v],
            );
        }
    }

    let mut mesh = columns.into_mesh(FaceType::Quad).with_label("grid");
    let row = cells_x + 1;
    for j in 0..cells_z {
        for i in 0..cells_x {
            let near = j * row + i;
            let far = near + row;
            mesh.push_face_unchecked(0, &[far, far + 1, near, near + 1]);
        }
    }
    mesh
}

/// Generate a single quad on the XY plane, facing +Z.
///
/// UV coordinates go from (0,0) at top-left to (1,1) at bottom-right.
pub fn create_quad(half_width: f32, half_height: f32) -> Mesh {
    let mut columns = Columns::default();
    let corners = [
        ([-half_width, -half_height], [0.0, 1.0]),
        ([half_width, -half_height], [1.0, 1.0]),
        ([-half_width, half_height], [0.0, 0.0]),
        ([half_width, half_height], [1.0, 0.0]),
    ]
    .map(|([x, y], uv)| columns.push(Vec3::new(x, y, 0.0), Vec3::z(), uv));

    let mut mesh = columns.into_mesh(FaceType::Quad).with_label("quad");
    mesh.push_face_unchecked(0, &corners);
    mesh
}
