//! Estimation of the volume between a mesh and its convex hull.

use crate::math::{Point, Real};
use crate::query::Ray;
use crate::shape::{ConvexHull, MeshFragment, Triangle};
use crate::utils;

/// Triangles of the wedge spanned by a triangle `(0, 1, 2)` and its projection `(3, 4, 5)`.
#[rustfmt::skip]
const WEDGE_TRIANGLES: [[u32; 3]; 8] = [
    [0, 2, 1], [3, 4, 5],
    [0, 1, 4], [0, 4, 3],
    [1, 2, 5], [1, 5, 4],
    [2, 0, 3], [2, 3, 5],
];

/// The volume between the triangles of `fragment` and the boundary of `hull`.
///
/// Each triangle is projected along its normal onto the hull, and the volume of the wedge
/// between the triangle and its projection is accumulated. This approximates the gap
/// between the fragment surface and its convex hull. Rays missing the hull make the
/// estimate smaller, never larger.
pub fn concavity_volume(fragment: &MeshFragment, hull: &ConvexHull) -> Real {
    fragment
        .triangle_points()
        .map(|tri| projected_volume(&tri, hull))
        .sum()
}

/// The volume of the wedge between `tri` and its projection along its normal onto `hull`.
///
/// Returns zero for degenerate triangles, or if no vertex projects onto the hull.
pub fn projected_volume(tri: &[Point<Real>; 3], hull: &ConvexHull) -> Real {
    let triangle = Triangle::new(tri[0], tri[1], tri[2]);

    if triangle.area() <= 0.0 {
        return 0.0;
    }

    let normal = match triangle.normal() {
        Some(n) => n,
        None => return 0.0,
    };

    let mut hit = false;
    let projected = tri.map(|pt| {
        let ray = Ray::new(pt, normal);
        match hull.cast_ray(&ray) {
            Some(toi) => {
                hit = true;
                ray.point_at(toi)
            }
            None => pt,
        }
    });

    if !hit {
        return 0.0;
    }

    let vertices = [
        tri[0],
        tri[1],
        tri[2],
        projected[0],
        projected[1],
        projected[2],
    ];

    utils::mesh_volume(&vertices, &WEDGE_TRIANGLES)
}
