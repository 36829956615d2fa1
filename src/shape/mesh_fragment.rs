use crate::math::{Point, Real};
use crate::partitioning::VertexIndex;
use crate::shape::{Plane, Triangle};

/// Maximum deviation between the normals of two triangles considered coplanar.
pub const COPLANAR_NORMAL_EPSILON: Real = 0.01;
/// Maximum difference between the plane offsets of two triangles considered coplanar.
pub const COPLANAR_OFFSET_EPSILON: Real = 0.001;

/// A piece of triangle mesh, owning its vertex and index buffers.
///
/// Fragments are the unit of work of the convex decomposition: the input mesh is the
/// first fragment, and every split produces two new fragments that never share a
/// buffer with their parent or with each other.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MeshFragment {
    vertices: Vec<Point<Real>>,
    triangles: Vec<[u32; 3]>,
}

impl MeshFragment {
    /// Creates a fragment from its vertex and index buffers.
    ///
    /// Indices are not checked. Every index must be smaller than `vertices.len()`.
    pub fn new(vertices: Vec<Point<Real>>, triangles: Vec<[u32; 3]>) -> Self {
        Self {
            vertices,
            triangles,
        }
    }

    /// The vertex buffer of this fragment.
    pub fn vertices(&self) -> &[Point<Real>] {
        &self.vertices
    }

    /// The index buffer of this fragment.
    pub fn triangles(&self) -> &[[u32; 3]] {
        &self.triangles
    }

    /// The number of vertices of this fragment.
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// The number of triangles of this fragment.
    pub fn num_triangles(&self) -> usize {
        self.triangles.len()
    }

    /// Does this fragment have no triangle?
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// The `i`-th triangle of this fragment.
    pub fn triangle(&self, i: usize) -> Triangle {
        let [a, b, c] = self.triangle_points_at(i);
        Triangle::new(a, b, c)
    }

    /// Iterates through the vertex positions of each triangle.
    pub fn triangle_points(&self) -> impl ExactSizeIterator<Item = [Point<Real>; 3]> + '_ {
        (0..self.triangles.len()).map(|i| self.triangle_points_at(i))
    }

    fn triangle_points_at(&self, i: usize) -> [Point<Real>; 3] {
        self.triangles[i].map(|id| self.vertices[id as usize])
    }

    /// The total area of the triangles of this fragment.
    pub fn area(&self) -> Real {
        (0..self.triangles.len())
            .map(|i| self.triangle(i).area())
            .sum()
    }

    /// The volume enclosed by this fragment, assuming it is closed.
    pub fn volume(&self) -> Real {
        crate::utils::mesh_volume(&self.vertices, &self.triangles)
    }

    /// Tests if every non-degenerate triangle of this fragment lies on the same plane.
    ///
    /// Triangle planes are compared with [`Plane::is_coincident_with`] in double-sided
    /// mode. A fragment without any non-degenerate triangle is considered coplanar.
    pub fn is_coplanar(&self) -> bool {
        let mut planes = self
            .triangle_points()
            .filter_map(|[a, b, c]| Plane::from_triangle(&a, &b, &c));

        let Some(reference) = planes.next() else {
            return true;
        };

        planes.all(|plane| {
            reference.is_coincident_with(
                &plane,
                COPLANAR_NORMAL_EPSILON,
                COPLANAR_OFFSET_EPSILON,
                true,
            )
        })
    }

    /// Returns a copy of this fragment where vertices closer than `tolerance` are merged.
    ///
    /// Triangles that collapse because two of their vertices were merged are removed.
    /// Unreferenced vertices are dropped too.
    pub fn welded(&self, tolerance: Real) -> Self {
        let mut index = VertexIndex::new(tolerance);
        let mut triangles = Vec::with_capacity(self.triangles.len());

        for pts in self.triangle_points() {
            let [a, b, c] = pts.map(|pt| index.weld(&pt).0);

            if a != b && b != c && c != a {
                triangles.push([a, b, c]);
            }
        }

        let mut vertices = index.into_vertices();
        crate::utils::remove_unused_points(&mut vertices, &mut triangles);
        Self::new(vertices, triangles)
    }

    /// Approximate heap memory used by the buffers of this fragment, in bytes.
    pub fn buffer_size(&self) -> usize {
        self.vertices.capacity() * core::mem::size_of::<Point<Real>>()
            + self.triangles.capacity() * core::mem::size_of::<[u32; 3]>()
    }

    /// Consumes this fragment and returns its vertex and index buffers.
    pub fn into_parts(self) -> (Vec<Point<Real>>, Vec<[u32; 3]>) {
        (self.vertices, self.triangles)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn unit_cube() -> MeshFragment {
        let vertices = (0..8)
            .map(|i| Point::new((i & 1) as Real, ((i >> 1) & 1) as Real, ((i >> 2) & 1) as Real))
            .collect();
        #[rustfmt::skip]
        let triangles = vec![
            [0, 2, 1], [1, 2, 3], // z = 0
            [4, 5, 6], [5, 7, 6], // z = 1
            [0, 1, 4], [1, 5, 4], // y = 0
            [2, 6, 3], [3, 6, 7], // y = 1
            [0, 4, 2], [2, 4, 6], // x = 0
            [1, 3, 5], [3, 7, 5], // x = 1
        ];
        MeshFragment::new(vertices, triangles)
    }

    #[test]
    fn cube_volume_and_area() {
        let cube = unit_cube();
        assert_relative_eq!(cube.volume(), 1.0, epsilon = 1.0e-6);
        assert_relative_eq!(cube.area(), 6.0, epsilon = 1.0e-5);
        assert!(!cube.is_coplanar());
    }

    #[test]
    fn flat_fragment_is_coplanar() {
        let vertices = vec![
            Point::new(0.0, 0.0, 1.0),
            Point::new(1.0, 0.0, 1.0),
            Point::new(1.0, 1.0, 1.0),
            Point::new(0.0, 1.0, 1.0),
        ];
        // Both windings: the test is double-sided.
        let flat = MeshFragment::new(vertices, vec![[0, 1, 2], [0, 3, 2]]);
        assert!(flat.is_coplanar());
        assert!(MeshFragment::default().is_coplanar());
    }

    #[test]
    fn welding_removes_duplicates_and_collapsed_triangles() {
        let vertices = vec![
            Point::new(0.0, 0.0, 0.0),
            Point::new(1.0, 0.0, 0.0),
            Point::new(0.0, 1.0, 0.0),
            Point::new(1.0, 0.0, 0.0),
            Point::new(1.0, 1.0, 0.0),
            Point::new(1.0, 1.0e-7, 0.0),
        ];
        let fragment = MeshFragment::new(vertices, vec![[0, 1, 2], [3, 4, 2], [1, 5, 4]]);
        let welded = fragment.welded(1.0e-5);

        assert_eq!(welded.num_vertices(), 4);
        assert_eq!(welded.num_triangles(), 2);
        assert_relative_eq!(welded.area(), 1.0, epsilon = 1.0e-6);
    }
}
