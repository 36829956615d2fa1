use crate::math::{Point, Real};
use crate::query::{ray_triangle_toi, Ray};
use crate::shape::Triangle;

/// A convex polyhedron described by its vertices and its outward-oriented triangles.
///
/// This is what the hull builder produces for each fragment, and what the convex
/// decomposition returns. The hull owns both of its buffers: handing it over moves them.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ConvexHull {
    vertices: Vec<Point<Real>>,
    indices: Vec<[u32; 3]>,
}

impl ConvexHull {
    /// Creates a convex hull from its vertex and index buffers.
    ///
    /// The buffers are assumed to describe a closed convex polyhedron with triangles
    /// oriented counter-clockwise when seen from the outside. This is not checked.
    pub fn new(vertices: Vec<Point<Real>>, indices: Vec<[u32; 3]>) -> Self {
        Self { vertices, indices }
    }

    /// The vertices of this hull.
    pub fn vertices(&self) -> &[Point<Real>] {
        &self.vertices
    }

    /// The triangles of this hull.
    pub fn indices(&self) -> &[[u32; 3]] {
        &self.indices
    }

    /// The number of vertices of this hull.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// The number of triangles of this hull.
    pub fn triangle_count(&self) -> usize {
        self.indices.len()
    }

    /// The `i`-th triangle of this hull.
    pub fn triangle(&self, i: usize) -> Triangle {
        let [a, b, c] = self.indices[i].map(|id| self.vertices[id as usize]);
        Triangle::new(a, b, c)
    }

    /// Iterates through the triangles of this hull.
    pub fn triangles(&self) -> impl ExactSizeIterator<Item = Triangle> + '_ {
        (0..self.indices.len()).map(|i| self.triangle(i))
    }

    /// The volume of this hull.
    pub fn volume(&self) -> Real {
        crate::utils::mesh_volume(&self.vertices, &self.indices)
    }

    /// Tests if `pt` is inside of this hull, or outside of it by at most `epsilon`.
    ///
    /// Degenerate triangles are ignored.
    pub fn contains_point(&self, pt: &Point<Real>, epsilon: Real) -> bool {
        self.triangles().all(|tri| match tri.normal() {
            Some(n) => n.dot(&(pt - tri.a)) <= epsilon,
            None => true,
        })
    }

    /// The smallest strictly positive time of impact of `ray` with the boundary of this hull.
    pub fn cast_ray(&self, ray: &Ray) -> Option<Real> {
        self.triangles()
            .filter_map(|tri| ray_triangle_toi(&tri.a, &tri.b, &tri.c, ray))
            .min_by(|a, b| a.total_cmp(b))
    }

    /// Approximate heap memory used by the buffers of this hull, in bytes.
    pub fn buffer_size(&self) -> usize {
        self.vertices.capacity() * core::mem::size_of::<Point<Real>>()
            + self.indices.capacity() * core::mem::size_of::<[u32; 3]>()
    }

    /// Consumes this hull and returns its vertex and index buffers.
    pub fn into_parts(self) -> (Vec<Point<Real>>, Vec<[u32; 3]>) {
        (self.vertices, self.indices)
    }
}
