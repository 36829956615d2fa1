use crate::meshes;
use cleave3d::transformation::decomposition::{decompose, DecompositionParameters};
use cleave3d::transformation::{HullBuilder, QuickHullBuilder};
use cleave3d::utils;

#[test]
fn convex_meshes_are_contained_in_their_decomposition() {
    let mut rng = oorandom::Rand32::new(1234);
    let params = DecompositionParameters::default();

    for _ in 0..10 {
        let points = meshes::sphere_points(&mut rng, 100);
        let mesh = QuickHullBuilder::default()
            .build_convex_hull(&points)
            .unwrap();
        let (vertices, triangles) = mesh.into_parts();

        let hulls = decompose(&vertices, &triangles, &params).unwrap();
        assert_eq!(hulls.len(), 1);

        let hull = &hulls[0];
        assert!(vertices.iter().all(|pt| hull.contains_point(pt, 1.0e-4)));
        assert!(hull.volume() >= utils::mesh_volume(&vertices, &triangles) - 1.0e-4);
    }
}

#[test]
fn hull_volume_bounds_closed_mesh_volume() {
    // A non-convex closed mesh: the hull of each fragment is at least as large as the
    // volume it encloses, so the hulls of the whole decomposition are too.
    let (vertices, triangles) = meshes::dumbbell();
    let enclosed = utils::mesh_volume(&vertices, &triangles);
    let hulls = decompose(
        &vertices,
        &triangles,
        &DecompositionParameters {
            max_hulls: 64,
            ..Default::default()
        },
    )
    .unwrap();

    let total: cleave3d::math::Real = hulls.iter().map(|h| h.volume()).sum();
    assert!(total >= enclosed - 1.0e-3);
}
