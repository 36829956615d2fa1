use super::{check_convex_hull, try_convex_hull, ConvexHullError};
use crate::math::{Point, Real};
use crate::shape::ConvexHull;

/// A convex hull construction algorithm.
///
/// The decomposition calls the builder once per fragment, with the fragment vertices. A
/// builder may be shared by several threads when the decomposition runs in parallel.
pub trait HullBuilder: Sync {
    /// Builds the convex hull of `points`.
    fn build_convex_hull(&self, points: &[Point<Real>]) -> Result<ConvexHull, ConvexHullError>;
}

/// The default hull builder, based on the incremental quickhull algorithm.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct QuickHullBuilder {
    /// If `true`, the topology of each output hull is checked before it is returned.
    pub validate: bool,
}

impl QuickHullBuilder {
    /// A builder that checks the topology of every hull it outputs.
    pub fn validating() -> Self {
        Self { validate: true }
    }
}

impl HullBuilder for QuickHullBuilder {
    fn build_convex_hull(&self, points: &[Point<Real>]) -> Result<ConvexHull, ConvexHullError> {
        let (vertices, indices) = try_convex_hull(points)?;

        if self.validate {
            check_convex_hull(&vertices, &indices)?;
        }

        Ok(ConvexHull::new(vertices, indices))
    }
}

impl<F> HullBuilder for F
where
    F: Fn(&[Point<Real>]) -> Result<ConvexHull, ConvexHullError> + Sync,
{
    fn build_convex_hull(&self, points: &[Point<Real>]) -> Result<ConvexHull, ConvexHullError> {
        self(points)
    }
}
