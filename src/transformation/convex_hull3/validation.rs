use super::ConvexHullError;
use crate::math::{Point, Real};
use hashbrown::hash_map::{Entry, HashMap};

/// Checks if a convex-hull is properly formed.
///
/// A well-formed hull has no duplicate vertices, no degenerate triangles, and every
/// edge shared by exactly two triangles. Its Euler characteristic must be 2.
pub fn check_convex_hull(
    points: &[Point<Real>],
    triangles: &[[u32; 3]],
) -> Result<(), ConvexHullError> {
    let mut edges: HashMap<(u32, u32), [usize; 2]> = HashMap::new();

    for i in 0..points.len() {
        for j in i + 1..points.len() {
            if points[i] == points[j] {
                return Err(ConvexHullError::DuplicatePoints(i, j));
            }
        }
    }

    for (itri, tri) in triangles.iter().enumerate() {
        if tri[0] == tri[1] || tri[0] == tri[2] || tri[1] == tri[2] {
            return Err(ConvexHullError::InternalError("degenerate hull triangle"));
        }

        for i in 0..3 {
            let ivtx1 = tri[i];
            let ivtx2 = tri[(i + 1) % 3];
            let edge_key = if ivtx1 < ivtx2 {
                (ivtx1, ivtx2)
            } else {
                (ivtx2, ivtx1)
            };

            match edges.entry(edge_key) {
                Entry::Vacant(e) => {
                    let _ = e.insert([itri, usize::MAX]);
                }
                Entry::Occupied(mut e) => {
                    if e.get()[1] != usize::MAX {
                        return Err(ConvexHullError::TJunction(itri, ivtx1, ivtx2));
                    }

                    e.get_mut()[1] = itri;
                }
            }
        }
    }

    if edges.values().any(|adj| adj[1] == usize::MAX) {
        return Err(ConvexHullError::UnfinishedTriangle);
    }

    let euler = points.len() as isize + triangles.len() as isize - edges.len() as isize;
    if euler != 2 {
        return Err(ConvexHullError::InvalidEulerCharacteristic(euler));
    }

    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    fn tetrahedron() -> (Vec<Point<Real>>, Vec<[u32; 3]>) {
        let points = vec![
            Point::new(0.0, 0.0, 0.0),
            Point::new(1.0, 0.0, 0.0),
            Point::new(0.0, 1.0, 0.0),
            Point::new(0.0, 0.0, 1.0),
        ];
        (points, vec![[0, 2, 1], [0, 1, 3], [1, 2, 3], [0, 3, 2]])
    }

    #[test]
    fn valid_tetrahedron() {
        let (points, triangles) = tetrahedron();
        assert_eq!(check_convex_hull(&points, &triangles), Ok(()));
    }

    #[test]
    fn open_mesh_is_unfinished() {
        let (points, triangles) = tetrahedron();
        assert_eq!(
            check_convex_hull(&points, &triangles[..3]),
            Err(ConvexHullError::UnfinishedTriangle)
        );
    }

    #[test]
    fn duplicate_points_and_t_junctions() {
        let (mut points, mut triangles) = tetrahedron();
        triangles.push([0, 1, 2]);
        assert_eq!(
            check_convex_hull(&points, &triangles),
            Err(ConvexHullError::TJunction(4, 0, 1))
        );

        points.push(points[1]);
        assert_eq!(
            check_convex_hull(&points, &triangles),
            Err(ConvexHullError::DuplicatePoints(1, 4))
        );
    }
}
