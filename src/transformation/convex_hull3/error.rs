/// Errors that can occur during convex hull computation.
///
/// The incremental hull algorithm can fail if the input is degenerate (too few points,
/// coincident, collinear or coplanar points), if it contains invalid data (NaN or
/// infinite coordinates), or because of numerical issues on nearly degenerate inputs.
///
/// The convex decomposition treats all of these as a failure to build the hull of one
/// fragment: the fragment is discarded and the decomposition goes on.
///
/// ```
/// # #[cfg(all(feature = "dim3", feature = "f32"))] {
/// use cleave3d::math::Point;
/// use cleave3d::transformation::{ConvexHullError, HullBuilder, QuickHullBuilder};
///
/// let flat = [
///     Point::new(0.0, 0.0, 0.0),
///     Point::new(1.0, 0.0, 0.0),
///     Point::new(0.0, 1.0, 0.0),
///     Point::new(1.0, 1.0, 0.0),
/// ];
///
/// assert_eq!(
///     QuickHullBuilder::default().build_convex_hull(&flat),
///     Err(ConvexHullError::Degenerate { dimension: 2 })
/// );
/// # }
/// ```
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ConvexHullError {
    /// An internal error occurred during convex hull computation.
    ///
    /// This is usually caused by floating-point round-off on nearly degenerate inputs
    /// that left the hull topology in an inconsistent state.
    #[error("Internal error: {0}")]
    InternalError(&'static str),

    /// The algorithm could not find a valid support point.
    ///
    /// This happens if the input contains points with NaN or infinite coordinates.
    #[error("Input points are either invalid (NaN) or are almost coplanar.")]
    MissingSupportPoint,

    /// Less than four points were given to the convex hull algorithm.
    #[error("Less than 4 points were given to the convex-hull algorithm.")]
    IncompleteInput,

    /// The input points do not span a 3-dimensional volume.
    ///
    /// `dimension` is 0 if all the points are coincident, 1 if they are collinear, and 2
    /// if they are coplanar.
    #[error("The input points only span a {dimension}-dimensional subspace.")]
    Degenerate {
        /// The dimension of the subspace spanned by the points.
        dimension: usize,
    },

    /// A triangle in the hull was not properly constructed: one of its edges has no
    /// adjacent triangle.
    #[error("Detected unfinished triangle")]
    UnfinishedTriangle,

    /// An edge of the hull is shared by more than two triangles.
    ///
    /// The error reports the index of the triangle where the t-junction was detected and
    /// the vertex indices of the problematic edge.
    #[error("Detected t-junction for triangle {0}, edge: ({1}, {2})")]
    TJunction(usize, u32, u32),

    /// Two vertices of the hull have the same position.
    #[error("Detected duplicate points {0} and {1}")]
    DuplicatePoints(usize, usize),

    /// The hull does not have the Euler characteristic of a closed polyhedron.
    #[error("Invalid Euler characteristic: {0}")]
    InvalidEulerCharacteristic(isize),
}
