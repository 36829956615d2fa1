use crate::math::{Point, Real};
use crate::query::Ray;

/// Below this value, the ray is considered parallel to the triangle plane.
pub const RAY_TRIANGLE_PARALLEL_EPSILON: Real = 1.0e-5;

/// Computes the time of impact of a ray with a triangle, using the Möller–Trumbore
/// algorithm.
///
/// Both faces of the triangle can be hit. Only hits with a strictly positive time of
/// impact are reported; rays (almost) parallel to the triangle never hit it.
pub fn ray_triangle_toi(
    a: &Point<Real>,
    b: &Point<Real>,
    c: &Point<Real>,
    ray: &Ray,
) -> Option<Real> {
    let e1 = b - a;
    let e2 = c - a;
    let h = ray.dir.cross(&e2);
    let det = e1.dot(&h);

    if det.abs() < RAY_TRIANGLE_PARALLEL_EPSILON {
        return None;
    }

    let inv_det = 1.0 / det;
    let s = ray.origin - a;
    let u = inv_det * s.dot(&h);

    if u < 0.0 || u > 1.0 {
        return None;
    }

    let q = s.cross(&e1);
    let v = inv_det * ray.dir.dot(&q);

    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let toi = inv_det * e2.dot(&q);
    (toi > 0.0).then_some(toi)
}
