//! Math type aliases and helper functions.
//!
//! Mesh storage keeps plain `[f32; N]` arrays so columns can be cast to bytes;
//! algorithms convert to these nalgebra aliases to do vector math.

pub use nalgebra;

/// 3D vector (f32).
pub type Vec3 = nalgebra::Vector3<f32>;

/// Tolerance used to treat lengths as zero.
pub const EPSILON: f32 = 1e-6;

/// Create a vector from a `[x, y, z]` array.
pub fn vec3_from_array(a: [f32; 3]) -> Vec3 {
    Vec3::new(a[0], a[1], a[2])
}

/// Convert a vector to a `[x, y, z]` array.
pub fn vec3_to_array(v: Vec3) -> [f32; 3] {
    [v.x, v.y, v.z]
}

/// Normalize, returning zero for degenerate vectors.
pub fn normalize_or_zero(v: Vec3) -> Vec3 {
    v.try_normalize(EPSILON).unwrap_or_else(Vec3::zeros)
}

/// Normal of a planar polygon by Newell's method.
///
/// Works for any corner count and tolerates slightly non-planar quads.
/// Counter-clockwise corners give a normal facing the viewer.
pub fn polygon_normal(corners: &[Vec3]) -> Vec3 {
    let mut normal = Vec3::zeros();
    for (i, current) in corners.iter().enumerate() {
        let next = &corners[(i + 1) % corners.len()];
        normal.x += (current.y - next.y) * (current.z + next.z);
        normal.y += (current.z - next.z) * (current.x + next.x);
        normal.z += (current.x - next.x) * (current.y + next.y);
    }
    normalize_or_zero(normal)
}

/// Normal of triangle `(a, b, c)`; counter-clockwise faces the viewer.
pub fn triangle_normal(a: Vec3, b: Vec3, c: Vec3) -> Vec3 {
    normalize_or_zero((b - a).cross(&(c - a)))
}

/// Angle in radians between two edges leaving the same corner.
pub fn corner_angle(to_previous: Vec3, to_next: Vec3) -> f32 {
    let a = normalize_or_zero(to_previous);
    let b = normalize_or_zero(to_next);
    if a == Vec3::zeros() || b == Vec3::zeros() {
        return 0.0;
    }
    a.dot(&b).clamp(-1.0, 1.0).acos()
}
