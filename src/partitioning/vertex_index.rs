use crate::math::{Point, Real};
use rstar::primitives::GeomWithData;
use rstar::RTree;

type IndexedPoint = GeomWithData<[Real; 3], u32>;

/// Welds nearly identical vertex positions into a single stable index.
///
/// Every distinct position (up to the welding `tolerance`) is assigned the next
/// sequential id the first time it is seen. Ids are dense (`0..self.len()`) and never
/// reassigned. Nearest-neighbor lookups are backed by an R*-tree so welding stays
/// logarithmic on well distributed inputs.
///
/// Two positions are welded if their Euclidean distance is at most `tolerance`, so a
/// zero tolerance only merges exact duplicates. If grid snapping is enabled, each
/// coordinate is first truncated to a multiple of the tolerance.
///
/// # Example
///
/// ```
/// # #[cfg(all(feature = "dim3", feature = "f32"))] {
/// use cleave3d::math::Point;
/// use cleave3d::partitioning::VertexIndex;
///
/// let mut index = VertexIndex::new(1.0e-3);
/// assert_eq!(index.weld(&Point::new(1.0, 2.0, 3.0)), (0, true));
/// assert_eq!(index.weld(&Point::new(5.0, 2.0, 3.0)), (1, true));
/// assert_eq!(index.weld(&Point::new(1.0, 2.0, 3.0005)), (0, false));
/// assert_eq!(index.len(), 2);
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct VertexIndex {
    tolerance: Real,
    snap_to_grid: bool,
    vertices: Vec<Point<Real>>,
    tree: RTree<IndexedPoint>,
}

impl Default for VertexIndex {
    fn default() -> Self {
        Self::new(0.0)
    }
}

impl VertexIndex {
    /// Creates an empty index welding positions closer than `tolerance`.
    pub fn new(tolerance: Real) -> Self {
        Self {
            tolerance: tolerance.max(0.0),
            snap_to_grid: false,
            vertices: Vec::new(),
            tree: RTree::new(),
        }
    }

    /// Creates an empty index that snaps positions to a grid of cell size `tolerance`
    /// before welding them.
    pub fn with_grid_snapping(tolerance: Real) -> Self {
        let mut result = Self::new(tolerance);
        result.snap_to_grid = result.tolerance > 0.0;
        result
    }

    /// The welding tolerance.
    pub fn tolerance(&self) -> Real {
        self.tolerance
    }

    /// Is grid snapping enabled?
    pub fn snaps_to_grid(&self) -> bool {
        self.snap_to_grid
    }

    /// Returns the id of `point`, inserting it if no stored position is close enough.
    ///
    /// The boolean is `true` if a new entry was created.
    pub fn weld(&mut self, point: &Point<Real>) -> (u32, bool) {
        let point = self.snapped(point);
        let key = [point.x, point.y, point.z];

        if let Some(nearest) = self.tree.nearest_neighbor(&key) {
            let stored = &self.vertices[nearest.data as usize];
            if na::distance_squared(stored, &point) <= self.tolerance * self.tolerance {
                return (nearest.data, false);
            }
        }

        let id = self.vertices.len() as u32;
        self.vertices.push(point);
        self.tree.insert(GeomWithData::new(key, id));
        (id, true)
    }

    /// Returns the id of the stored position welded with `point`, without inserting it.
    pub fn find(&self, point: &Point<Real>) -> Option<u32> {
        let point = self.snapped(point);
        let nearest = self.tree.nearest_neighbor(&[point.x, point.y, point.z])?;
        let stored = &self.vertices[nearest.data as usize];

        (na::distance_squared(stored, &point) <= self.tolerance * self.tolerance)
            .then_some(nearest.data)
    }

    /// The number of distinct positions stored.
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Is this index empty?
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// The position with the given id.
    pub fn vertex(&self, id: u32) -> &Point<Real> {
        &self.vertices[id as usize]
    }

    /// All the stored positions, ordered by id.
    pub fn vertices(&self) -> &[Point<Real>] {
        &self.vertices
    }

    /// Consumes the index and returns its positions, ordered by id.
    pub fn into_vertices(self) -> Vec<Point<Real>> {
        self.vertices
    }

    fn snapped(&self, point: &Point<Real>) -> Point<Real> {
        if self.snap_to_grid {
            point.map(|e| e - e % self.tolerance)
        } else {
            *point
        }
    }
}
