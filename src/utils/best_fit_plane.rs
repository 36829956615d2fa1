use crate::math::{Point, Real};
use crate::shape::Plane;
use crate::utils::SymmetricEigen3;

/// Computes the plane minimizing the sum of squared distances to a weighted point set.
///
/// The plane passes through the weighted centroid of the points, and its normal is the
/// eigenvector associated to the smallest eigenvalue of their weighted covariance
/// matrix. If `weights` is `None`, every point has a weight of `1.0`.
///
/// Returns `None` if `points` is empty or the total weight is not strictly positive.
/// Degenerate sets (a single point, or collinear points) still return a plane
/// containing every point, with an arbitrary but deterministic orientation.
pub fn best_fit_plane(points: &[Point<Real>], weights: Option<&[Real]>) -> Option<Plane> {
    let (center, cov) = crate::utils::weighted_center_cov(points, weights)?;
    let eig = SymmetricEigen3::new(&cov);

    if !eig.converged {
        log::debug!("best-fit plane eigen solver hit its iteration cap");
    }

    Some(Plane::from_point_and_normal(
        &center,
        eig.smallest_eigenvector(),
    ))
}
