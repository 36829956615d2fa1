use super::ConvexHullError;
use crate::math::{Point, Real, Vector, DEFAULT_EPSILON};
use crate::shape::Triangle;

/// Minimum distance for a point to be considered above a facet.
const VISIBILITY_THRESHOLD: Real = DEFAULT_EPSILON * 100.0;

#[derive(Debug)]
pub struct TriangleFacet {
    pub valid: bool,
    pub affinely_dependent: bool,
    pub normal: Vector<Real>,
    pub adj: [usize; 3],
    pub indirect_adj_id: [usize; 3],
    pub pts: [usize; 3],
    pub visible_points: Vec<usize>,
}

impl TriangleFacet {
    pub fn new(p1: usize, p2: usize, p3: usize, points: &[Point<Real>]) -> TriangleFacet {
        let tri = Triangle::new(points[p1], points[p2], points[p3]);
        let affinely_dependent = tri.is_affinely_dependent();

        TriangleFacet {
            valid: true,
            affinely_dependent,
            normal: tri.scaled_normal().normalize(),
            adj: [0, 0, 0],
            indirect_adj_id: [0, 0, 0],
            pts: [p1, p2, p3],
            visible_points: Vec::new(),
        }
    }

    pub fn add_visible_point(&mut self, pid: usize, points: &[Point<Real>]) {
        debug_assert!(self.distance_to_point(pid, points) > DEFAULT_EPSILON);
        self.visible_points.push(pid);
    }

    pub fn distance_to_point(&self, point: usize, points: &[Point<Real>]) -> Real {
        self.normal.dot(&(points[point] - points[self.pts[0]]))
    }

    /// Sets the three neighbors of this facet, and the index of the shared edge in each one.
    pub fn set_facets_adjacency(&mut self, adj: [usize; 3], indirect_adj_id: [usize; 3]) {
        self.adj = adj;
        self.indirect_adj_id = indirect_adj_id;
    }

    pub fn first_point_from_edge(&self, id: usize) -> usize {
        self.pts[id]
    }

    pub fn second_point_from_edge(&self, id: usize) -> usize {
        self.pts[(id + 1) % 3]
    }

    pub fn can_see_point(&self, point: usize, points: &[Point<Real>]) -> bool {
        // An affinely-dependent triangle cannot see any point.
        !self.affinely_dependent && self.distance_to_point(point, points) >= VISIBILITY_THRESHOLD
    }

    /// Checks that a given point can see this triangle, making sure that the order of the
    /// three indices of this triangle doesn't affect the result.
    pub fn order_independent_can_be_seen_by_point(
        &self,
        point: usize,
        points: &[Point<Real>],
    ) -> bool {
        // An affinely-dependent triangle can be seen by any point.
        self.affinely_dependent
            || self
                .pts
                .iter()
                .any(|p| (points[point] - points[*p]).dot(&self.normal) >= 0.0)
    }

    /// Checks the adjacency links between the facet `ifacet` and its neighbors.
    pub fn check_links(ifacet: usize, facets: &[TriangleFacet]) -> Result<(), ConvexHullError> {
        let facet = &facets[ifacet];

        for i in 0..3 {
            let adj_facet = &facets[facet.adj[i]];
            let adj_id = facet.indirect_adj_id[i];

            let consistent = adj_facet.valid
                && adj_facet.adj[adj_id] == ifacet
                && adj_facet.indirect_adj_id[adj_id] == i
                && adj_facet.first_point_from_edge(adj_id) == facet.second_point_from_edge(i)
                && adj_facet.second_point_from_edge(adj_id) == facet.first_point_from_edge(i);

            if !consistent {
                return Err(ConvexHullError::InternalError(
                    "inconsistent facet adjacency",
                ));
            }
        }

        Ok(())
    }
}
