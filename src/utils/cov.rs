use crate::math::{Matrix, Point, Real};

/// Computes the covariance matrix of a set of points.
pub fn cov(pts: &[Point<Real>]) -> Matrix<Real> {
    center_cov(pts).1
}

/// Computes the center and the covariance matrix of a set of points.
pub fn center_cov(pts: &[Point<Real>]) -> (Point<Real>, Matrix<Real>) {
    let center = crate::utils::center(pts);
    let mut cov: Matrix<Real> = na::zero();
    let normalizer: Real = 1.0 / pts.len() as Real;

    for p in pts.iter() {
        let cp = *p - center;
        // NOTE: this is more numerically stable than using cov.syger.
        cov += cp * (cp * normalizer).transpose();
    }

    (center, cov)
}

/// Computes the weighted centroid and the weighted covariance matrix of a set of points.
///
/// Each deviation from the centroid is scaled by its point's weight before being
/// accumulated, and the sums are normalized by the total weight. Returns `None` if the
/// set is empty or has a non-positive total weight.
pub fn weighted_center_cov(
    pts: &[Point<Real>],
    weights: Option<&[Real]>,
) -> Option<(Point<Real>, Matrix<Real>)> {
    let (center, total) = crate::utils::weighted_center(pts, weights)?;
    let mut cov: Matrix<Real> = na::zero();

    for (i, p) in pts.iter().enumerate() {
        let w = weights.map(|w| w[i]).unwrap_or(1.0);
        let cp = (*p - center) * w;
        cov += cp * cp.transpose();
    }

    Some((center, cov * (1.0 / total)))
}
