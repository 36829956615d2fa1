use cleave3d::math::{Point, Real};
use cleave3d::transformation::decomposition::{Decomposer, DecompositionParameters};

fn random_triangle_soup(
    rng: &mut oorandom::Rand32,
    num_vertices: usize,
    num_triangles: usize,
) -> (Vec<Point<Real>>, Vec<[u32; 3]>) {
    let vertices = (0..num_vertices)
        .map(|_| {
            Point::new(
                rng.rand_float() as Real * 4.0,
                rng.rand_float() as Real * 2.0,
                rng.rand_float() as Real,
            )
        })
        .collect();
    let triangles = (0..num_triangles)
        .map(|_| {
            [
                rng.rand_range(0..num_vertices as u32),
                rng.rand_range(0..num_vertices as u32),
                rng.rand_range(0..num_vertices as u32),
            ]
        })
        .collect();

    (vertices, triangles)
}

#[test]
fn decomposition_terminates_on_random_meshes() {
    let mut rng = oorandom::Rand32::new(0xdecaf);

    for max_depth in [1, 3, 6, 20] {
        let (vertices, triangles) = random_triangle_soup(&mut rng, 60, 40);
        let params = DecompositionParameters {
            max_depth,
            concavity_percent: 0.0,
            max_hulls: 16,
            ..Default::default()
        };

        let result = Decomposer::new()
            .decompose(&vertices, &triangles, &params)
            .unwrap();

        assert!(!result.was_cancelled());
        assert!(result.len() <= 16);
        assert!(result.stats().max_depth_reached <= params.effective_max_depth());
        assert!(result.hulls().all(|h| h.volume() >= 0.0));
        assert!(result
            .hulls()
            .all(|h| h.vertices().iter().all(|v| v.coords.iter().all(|e| e.is_finite()))));
    }
}

#[test]
fn degenerate_triangles_are_tolerated() {
    let vertices = vec![
        Point::new(0.0, 0.0, 0.0),
        Point::new(1.0, 0.0, 0.0),
        Point::new(0.0, 1.0, 0.0),
        Point::new(0.0, 0.0, 1.0),
        Point::new(0.5, 0.0, 0.0),
    ];
    // Two degenerate triangles, one of them collinear.
    let triangles = vec![
        [0, 2, 1],
        [0, 1, 3],
        [1, 2, 3],
        [0, 3, 2],
        [0, 0, 1],
        [0, 4, 1],
    ];

    let hulls = cleave3d::transformation::decomposition::decompose(
        &vertices,
        &triangles,
        &DecompositionParameters::default(),
    )
    .unwrap();

    assert_eq!(hulls.len(), 1);
    approx::assert_relative_eq!(hulls[0].volume(), 1.0 / 6.0, epsilon = 1.0e-5);
}
