use crate::math::{Point, Real};

/// Signed volume of the tetrahedron formed by the origin and the triangle `(a, b, c)`,
/// multiplied by six.
#[inline]
pub fn origin_tetrahedron_det(a: &Point<Real>, b: &Point<Real>, c: &Point<Real>) -> Real {
    a.coords.dot(&b.coords.cross(&c.coords))
}

/// Computes the signed volume enclosed by a closed triangle mesh.
///
/// The result is positive if the triangles are oriented counter-clockwise when seen
/// from the outside of the mesh. For an open mesh, the result depends on the position
/// of the origin and is mostly meaningless.
pub fn signed_mesh_volume(vertices: &[Point<Real>], triangles: &[[u32; 3]]) -> Real {
    let det_sum: Real = triangles
        .iter()
        .map(|t| {
            origin_tetrahedron_det(
                &vertices[t[0] as usize],
                &vertices[t[1] as usize],
                &vertices[t[2] as usize],
            )
        })
        .sum();

    det_sum / 6.0
}

/// Computes the absolute volume enclosed by a closed triangle mesh.
pub fn mesh_volume(vertices: &[Point<Real>], triangles: &[[u32; 3]]) -> Real {
    signed_mesh_volume(vertices, triangles).abs()
}
