//! Smoothing-angle normal recalculation.

use std::collections::HashMap;

use crate::error::MeshError;
use crate::math::{
    Vec3, corner_angle, normalize_or_zero, polygon_normal, triangle_normal, vec3_from_array,
    vec3_to_array,
};
use crate::profiling::profile_function;

use super::capability::Capabilities;
use super::component::ComponentKind;
use super::data::Mesh;
use super::face::Face;

/// One face corner contributing to vertex normals.
struct Corner {
    vertex: usize,
    face: usize,
    weight: f32,
}

impl Mesh {
    /// Recompute the Normal component from positions and faces.
    ///
    /// Each vertex normal is the corner-angle weighted average of the normals
    /// of faces touching any vertex at the same position, restricted to faces
    /// within `angle_degrees` of a face that uses the vertex itself. Faces with
    /// fewer than three corners are ignored; vertices no face uses keep their
    /// normal. The Normal component is added if missing.
    ///
    /// The result only depends on positions and faces, so repeating the call
    /// gives the same normals.
    pub fn recalculate_normals(&mut self, angle_degrees: f32) -> Result<(), MeshError> {
        profile_function!();
        if !self.has_component(ComponentKind::Position3) {
            return Err(MeshError::MissingCapability {
                required: Capabilities::POSITION3,
                available: self.capabilities(),
            });
        }
        self.validate()?;

        let normals = self.solve_normals(angle_degrees)?;
        self.add_component(ComponentKind::Normal)?;
        if let Some(column) = self
            .component_mut(ComponentKind::Normal)
            .and_then(|c| c.as_float3_mut())
        {
            for (vertex, normal) in normals.into_iter().enumerate() {
                if let Some(normal) = normal {
                    column[vertex] = normal;
                }
            }
        }
        Ok(())
    }

    fn solve_normals(&self, angle_degrees: f32) -> Result<Vec<Option<[f32; 3]>>, MeshError> {
        let positions: Vec<Vec3> = self
            .positions()
            .unwrap_or_default()
            .iter()
            .copied()
            .map(vec3_from_array)
            .collect();

        let face_normals = (0..self.face_count())
            .map(|position| Ok(face_normal(&positions, self.face_corners(position)?)))
            .collect::<Result<Vec<Vec3>, MeshError>>()?;

        let mut corners = Vec::new();
        for (face_index, face) in self.faces().iter().enumerate() {
            if face.count < 3 {
                continue;
            }
            let indices = self.face_corners(face_index)?;
            for k in 0..face.count {
                let (a, b) = corner_neighbours(face, k);
                let here = positions[indices[k] as usize];
                corners.push(Corner {
                    vertex: indices[k] as usize,
                    face: face_index,
                    weight: corner_angle(
                        positions[indices[a] as usize] - here,
                        positions[indices[b] as usize] - here,
                    ),
                });
            }
        }

        // Corners grouped by exact position, and by vertex.
        let mut by_position: HashMap<[u32; 3], Vec<usize>> = HashMap::new();
        let mut by_vertex: Vec<Vec<usize>> = vec![Vec::new(); positions.len()];
        for (i, corner) in corners.iter().enumerate() {
            by_position
                .entry(position_key(&positions[corner.vertex]))
                .or_default()
                .push(i);
            by_vertex[corner.vertex].push(i);
        }

        let cos_limit = angle_degrees.to_radians().cos() - 1e-4;
        Ok(by_vertex
            .iter()
            .enumerate()
            .map(|(vertex, own)| {
                if own.is_empty() {
                    return None;
                }
                let group = by_position.get(&position_key(&positions[vertex]))?;
                let mut sum = Vec3::zeros();
                for &c in group {
                    let candidate = face_normals[corners[c].face];
                    let smooth = own
                        .iter()
                        .any(|&o| face_normals[corners[o].face].dot(&candidate) >= cos_limit);
                    if smooth {
                        sum += candidate * corners[c].weight;
                    }
                }
                Some(vec3_to_array(normalize_or_zero(sum)))
            })
            .collect())
    }
}

/// Face normal consistent with how lowering triangulates the face.
fn face_normal(positions: &[Vec3], indices: &[u32]) -> Vec3 {
    let at = |k: usize| positions[indices[k] as usize];
    match indices.len() {
        0..=2 => Vec3::zeros(),
        3 | 4 => triangle_normal(at(0), at(1), at(2)),
        _ => {
            let corners: Vec<Vec3> = (0..indices.len()).map(at).collect();
            polygon_normal(&corners)
        }
    }
}

/// Geometric neighbours of corner `k`. Quads are stored with corners 1 and 2
/// on the split diagonal, so their outline is 0-1-3-2.
fn corner_neighbours(face: &Face, k: usize) -> (usize, usize) {
    if face.is_quad() {
        const QUAD: [(usize, usize); 4] = [(2, 1), (0, 3), (3, 0), (1, 2)];
        return QUAD[k];
    }
    let n = face.count;
    ((k + n - 1) % n, (k + 1) % n)
}

fn position_key(p: &Vec3) -> [u32; 3] {
    // Fold -0.0 into 0.0 so mirrored seams match.
    [(p.x + 0.0).to_bits(), (p.y + 0.0).to_bits(), (p.z + 0.0).to_bits()]
}
