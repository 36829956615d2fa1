use crate::math::{Point, Real};

/// Given an index buffer, remove from `points` every point that is not indexed.
///
/// The relative order of the remaining points is preserved and `idx` is remapped
/// accordingly.
pub fn remove_unused_points(points: &mut Vec<Point<Real>>, idx: &mut [[u32; 3]]) {
    let mut remap = vec![u32::MAX; points.len()];

    for tri in idx.iter() {
        for &i in tri {
            remap[i as usize] = 0;
        }
    }

    let mut kept = 0u32;
    for slot in remap.iter_mut() {
        if *slot == 0 {
            *slot = kept;
            kept += 1;
        }
    }

    let mut i = 0;
    points.retain(|_| {
        let keep = remap[i] != u32::MAX;
        i += 1;
        keep
    });

    for tri in idx.iter_mut() {
        for i in tri.iter_mut() {
            *i = remap[*i as usize];
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn unused_points_are_removed_in_order() {
        let mut points = vec![
            Point::new(0.0, 0.0, 0.0),
            Point::new(9.0, 9.0, 9.0),
            Point::new(1.0, 0.0, 0.0),
            Point::new(0.0, 1.0, 0.0),
        ];
        let mut idx = [[0, 2, 3]];
        remove_unused_points(&mut points, &mut idx);

        assert_eq!(points.len(), 3);
        assert_eq!(idx, [[0, 1, 2]]);
        assert_eq!(points[1], Point::new(1.0, 0.0, 0.0));
    }
}
