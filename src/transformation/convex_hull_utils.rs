use crate::math::{Point, Real, Vector};

/// Returns the index of the support point of a list of points.
pub fn support_point_id(direction: &Vector<Real>, points: &[Point<Real>]) -> Option<usize> {
    indexed_support_point_id(direction, points, 0..points.len())
}

/// Returns the index of the support point of an indexed list of points.
pub fn indexed_support_point_id<I>(
    direction: &Vector<Real>,
    points: &[Point<Real>],
    idx: I,
) -> Option<usize>
where
    I: IntoIterator<Item = usize>,
{
    indexed_support_point_nth(direction, points, idx.into_iter()).map(|(_, id)| id)
}

/// Returns the position `n` in `idx` of the support point, together with its index.
pub fn indexed_support_point_nth<I>(
    direction: &Vector<Real>,
    points: &[Point<Real>],
    idx: I,
) -> Option<(usize, usize)>
where
    I: Iterator<Item = usize>,
{
    let mut argmax = None;
    let mut max = -Real::MAX;

    for (k, i) in idx.enumerate() {
        let dot = direction.dot(&points[i].coords);

        if dot > max {
            argmax = Some((k, i));
            max = dot;
        }
    }

    argmax
}

/// Scale and center the given set of point depending on their AABB.
///
/// Returns the center and the diagonal length of the AABB before normalization.
pub fn normalize(coords: &mut [Point<Real>]) -> (Point<Real>, Real) {
    let mut mins = Vector::repeat(Real::MAX);
    let mut maxs = Vector::repeat(-Real::MAX);

    for pt in coords.iter() {
        mins = mins.inf(&pt.coords);
        maxs = maxs.sup(&pt.coords);
    }

    let diag = (maxs - mins).norm();
    let center = Point::from((mins + maxs) * 0.5);

    if diag > 0.0 {
        for c in coords.iter_mut() {
            *c = Point::from((*c - center) / diag);
        }
    }

    (center, diag)
}
