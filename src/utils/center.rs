use crate::math::{Point, Real};
use num::Zero;

/// Computes the geometric center (centroid) of a set of points.
///
/// All points are weighted equally.
///
/// # Panics
///
/// Panics if the input slice is empty.
///
/// # Example
///
/// ```
/// # #[cfg(all(feature = "dim3", feature = "f32"))] {
/// use cleave3d::utils::center;
/// use cleave3d::math::Point;
///
/// let points = vec![
///     Point::new(0.0, 0.0, 0.0),
///     Point::new(4.0, 0.0, 0.0),
///     Point::new(0.0, 4.0, 0.0),
/// ];
///
/// let c = center(&points);
/// assert!((c.x - 4.0 / 3.0).abs() < 1e-6);
/// assert!((c.y - 4.0 / 3.0).abs() < 1e-6);
/// assert!(c.z.abs() < 1e-6);
/// # }
/// ```
#[inline]
pub fn center(pts: &[Point<Real>]) -> Point<Real> {
    assert!(
        !pts.is_empty(),
        "Cannot compute the center of less than 1 point."
    );

    let denom: Real = na::convert::<f64, Real>(1.0 / (pts.len() as f64));
    pts.iter()
        .fold(Point::origin(), |acc, pt| acc + pt.coords * denom)
}

/// Computes the weighted centroid of a set of points.
///
/// If `weights` is `None`, every point has a weight of `1.0`. Otherwise `weights` must
/// have the same length as `pts`.
///
/// Returns the centroid together with the sum of the weights, or `None` if the set is
/// empty or if the total weight is not strictly positive.
pub fn weighted_center(pts: &[Point<Real>], weights: Option<&[Real]>) -> Option<(Point<Real>, Real)> {
    if pts.is_empty() {
        return None;
    }

    let mut total = Real::zero();
    let mut acc = Point::origin();

    for (i, pt) in pts.iter().enumerate() {
        let w = weights.map(|w| w[i]).unwrap_or(1.0);
        acc += pt.coords * w;
        total += w;
    }

    if total <= Real::zero() {
        None
    } else {
        Some((acc * (1.0 / total), total))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn weighted_center_favors_heavy_points() {
        let pts = [Point::new(0.0, 0.0, 0.0), Point::new(4.0, 0.0, 0.0)];
        let (c, total) = weighted_center(&pts, Some(&[1.0, 3.0])).unwrap();
        assert_relative_eq!(c, Point::new(3.0, 0.0, 0.0));
        assert_relative_eq!(total, 4.0);
    }

    #[test]
    fn weighted_center_rejects_empty_and_massless_sets() {
        assert!(weighted_center(&[], None).is_none());
        let pts = [Point::new(1.0, 2.0, 3.0)];
        assert!(weighted_center(&pts, Some(&[0.0])).is_none());
    }
}
