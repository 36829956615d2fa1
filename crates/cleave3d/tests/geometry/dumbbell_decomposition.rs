use crate::meshes;
use cleave3d::transformation::decomposition::{
    AcceptReason, Decomposer, DecompositionParameters,
};

fn dumbbell_params() -> DecompositionParameters {
    DecompositionParameters {
        concavity_percent: 10.0,
        max_depth: 6,
        max_hulls: 64,
        ..Default::default()
    }
}

#[test]
fn dumbbell_is_split() {
    let (vertices, triangles) = meshes::dumbbell();
    let params = dumbbell_params();
    let result = Decomposer::new()
        .decompose(&vertices, &triangles, &params)
        .unwrap();

    assert!(result.len() >= 2);
    assert!(result.stats().splits >= 1);
    assert!(!result.stats().merged);
    assert!(!result.was_cancelled());

    for accepted in result.accepted() {
        if accepted.reason == AcceptReason::ConcavityBelowThreshold {
            let concavity = accepted.concavity_percent.unwrap();
            assert!(concavity < params.concavity_percent);
        }

        assert!(accepted.depth <= params.max_depth);
    }
}

#[test]
fn dumbbell_hulls_cover_both_lobes() {
    let (vertices, triangles) = meshes::dumbbell();
    let result = Decomposer::new()
        .decompose(&vertices, &triangles, &dumbbell_params())
        .unwrap();

    // Way less than the volume of the convex hull of the whole dumbbell.
    let total = result.total_volume();
    assert!(total >= 2.0 - 1.0e-3);
    assert!(total < 3.0);

    // Every vertex of the lobes is a vertex of, or is inside, one of the hulls.
    for pt in &vertices {
        assert!(result.hulls().any(|h| h.contains_point(pt, 1.0e-4)));
    }
}

#[cfg(feature = "parallel")]
#[test]
fn parallel_decomposition_matches_sequential_hull_count() {
    // With the `parallel` feature, both children of a split are processed concurrently,
    // but the set of hulls must not depend on the scheduling.
    let (vertices, triangles) = meshes::dumbbell();
    let params = dumbbell_params();

    let first = Decomposer::new()
        .decompose(&vertices, &triangles, &params)
        .unwrap();
    let second = Decomposer::new()
        .decompose(&vertices, &triangles, &params)
        .unwrap();

    assert_eq!(first.len(), second.len());
    approx::assert_relative_eq!(first.total_volume(), second.total_volume(), epsilon = 1.0e-4);
}
