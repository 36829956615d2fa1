use super::{ConvexHullError, TriangleFacet};
use crate::math::{Point, Real};
use crate::shape::Triangle;
use crate::transformation::convex_hull_utils::support_point_id;
use crate::utils::SymmetricEigen3;

/// Eigenvalues of the normalized covariance below this are considered zero.
const FLAT_EIGENVALUE_EPSILON: Real = 1.0e-7;

/// Builds the two initial facets of the hull, and assigns each point to a facet it can see.
///
/// Points that cannot be assigned yet are pushed to `undecidable`. Fails with
/// [`ConvexHullError::Degenerate`] if the points do not span a volume.
pub fn try_get_initial_mesh(
    normalized_points: &mut [Point<Real>],
    undecidable: &mut Vec<usize>,
) -> Result<Vec<TriangleFacet>, ConvexHullError> {
    /*
     * Compute the eigenvectors to see if the input data live on a subspace.
     */
    let cov_mat = crate::utils::cov(normalized_points);
    let eig = SymmetricEigen3::new(&cov_mat);

    /*
     * Count the dimension the data lives in. Eigenvalues are sorted in decreasing order.
     */
    let dimension = eig
        .eigenvalues
        .iter()
        .take_while(|val| !relative_eq!(**val, 0.0, epsilon = FLAT_EIGENVALUE_EPSILON))
        .count();

    if dimension < 3 {
        return Err(ConvexHullError::Degenerate { dimension });
    }

    // Find an initial triangle lying on the principal plane…
    let center = crate::utils::center(normalized_points);
    let scale = eig.eigenvalues.amax();

    for point in normalized_points.iter_mut() {
        *point = Point::from((*point - center) / scale);
    }

    let principal = eig.largest_eigenvector();
    let p1 = support_point_id(&principal, normalized_points)
        .ok_or(ConvexHullError::MissingSupportPoint)?;
    let p2 = support_point_id(&-principal, normalized_points)
        .ok_or(ConvexHullError::MissingSupportPoint)?;

    let mut max_area = 0.0;
    let mut p3 = None;

    for (i, point) in normalized_points.iter().enumerate() {
        let area = Triangle::new(normalized_points[p1], normalized_points[p2], *point).area();

        if area > max_area {
            max_area = area;
            p3 = Some(i);
        }
    }

    let p3 = p3.ok_or(ConvexHullError::InternalError("no initial triangle found"))?;

    // Build two facets with opposite normals, linked together.
    let mut f1 = TriangleFacet::new(p1, p2, p3, normalized_points);
    let mut f2 = TriangleFacet::new(p2, p1, p3, normalized_points);
    f1.set_facets_adjacency([1, 1, 1], [0, 2, 1]);
    f2.set_facets_adjacency([0, 0, 0], [0, 2, 1]);

    let mut facets = vec![f1, f2];

    // … and attribute visible points to each one of them.
    let (a, b, c) = (
        normalized_points[p1],
        normalized_points[p2],
        normalized_points[p3],
    );

    for point in 0..normalized_points.len() {
        let pt = normalized_points[point];
        if pt == a || pt == b || pt == c {
            continue;
        }

        let furthest = facets
            .iter()
            .enumerate()
            .filter(|(_, facet)| facet.can_see_point(point, normalized_points))
            .map(|(i, facet)| (i, facet.distance_to_point(point, normalized_points)))
            .filter(|(_, dist)| *dist > 0.0)
            .max_by(|x, y| x.1.total_cmp(&y.1));

        match furthest {
            Some((i, _)) => facets[i].add_visible_point(point, normalized_points),
            // Coplanar with the initial triangle: the points will be handled later.
            None => undecidable.push(point),
        }
    }

    TriangleFacet::check_links(0, &facets)?;
    TriangleFacet::check_links(1, &facets)?;

    Ok(facets)
}
