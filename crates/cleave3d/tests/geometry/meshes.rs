use cleave3d::math::{Point, Real, Vector};

/// The 12 triangles of a box whose corner `i` is at `(i & 1, (i >> 1) & 1, (i >> 2) & 1)`.
#[rustfmt::skip]
const BOX_TRIANGLES: [[u32; 3]; 12] = [
    [0, 2, 1], [1, 2, 3], [4, 5, 6], [5, 7, 6],
    [0, 1, 4], [1, 5, 4], [2, 6, 3], [3, 6, 7],
    [0, 4, 2], [2, 4, 6], [1, 3, 5], [3, 7, 5],
];

/// An axis-aligned box, with outward-oriented triangles.
pub fn cuboid(mins: Point<Real>, maxs: Point<Real>) -> (Vec<Point<Real>>, Vec<[u32; 3]>) {
    let vertices = (0..8)
        .map(|i| {
            Point::new(
                if i & 1 == 0 { mins.x } else { maxs.x },
                if (i >> 1) & 1 == 0 { mins.y } else { maxs.y },
                if (i >> 2) & 1 == 0 { mins.z } else { maxs.z },
            )
        })
        .collect();
    (vertices, BOX_TRIANGLES.to_vec())
}

pub fn unit_cube() -> (Vec<Point<Real>>, Vec<[u32; 3]>) {
    cuboid(Point::origin(), Point::new(1.0, 1.0, 1.0))
}

/// Concatenates several meshes into one.
pub fn merge_meshes(
    meshes: impl IntoIterator<Item = (Vec<Point<Real>>, Vec<[u32; 3]>)>,
) -> (Vec<Point<Real>>, Vec<[u32; 3]>) {
    let mut vertices = Vec::new();
    let mut triangles = Vec::new();

    for (vtx, idx) in meshes {
        let base = vertices.len() as u32;
        vertices.extend(vtx);
        triangles.extend(idx.into_iter().map(|t| t.map(|i| i + base)));
    }

    (vertices, triangles)
}

/// Two unit cubes, 2 units apart along `x`, joined by a thin bar.
pub fn dumbbell() -> (Vec<Point<Real>>, Vec<[u32; 3]>) {
    merge_meshes([
        cuboid(Point::new(0.0, 0.0, 0.0), Point::new(1.0, 1.0, 1.0)),
        cuboid(Point::new(1.0, 0.4, 0.4), Point::new(3.0, 0.6, 0.6)),
        cuboid(Point::new(3.0, 0.0, 0.0), Point::new(4.0, 1.0, 1.0)),
    ])
}

/// `n` random points on the unit sphere.
pub fn sphere_points(rng: &mut oorandom::Rand32, n: usize) -> Vec<Point<Real>> {
    let mut points = Vec::with_capacity(n);

    while points.len() < n {
        let v = Vector::new(
            rng.rand_float() as Real * 2.0 - 1.0,
            rng.rand_float() as Real * 2.0 - 1.0,
            rng.rand_float() as Real * 2.0 - 1.0,
        );

        if let Some(dir) = v.try_normalize(0.1) {
            points.push(Point::from(dir));
        }
    }

    points
}
