use crate::meshes;
use cleave3d::math::{Point, Real};
use cleave3d::shape::ConvexHull;
use cleave3d::transformation::decomposition::{
    AcceptReason, Decomposer, DecompositionParameters, HullMerger,
};
use std::sync::atomic::{AtomicUsize, Ordering};

#[test]
fn hull_count_budget_is_enforced() {
    let (vertices, triangles) = meshes::dumbbell();
    let unbounded = Decomposer::new()
        .decompose(
            &vertices,
            &triangles,
            &DecompositionParameters {
                concavity_percent: 10.0,
                max_hulls: 64,
                ..Default::default()
            },
        )
        .unwrap();
    assert!(unbounded.len() > 2);

    let merged = Decomposer::new()
        .decompose(
            &vertices,
            &triangles,
            &DecompositionParameters {
                concavity_percent: 10.0,
                max_hulls: 2,
                ..Default::default()
            },
        )
        .unwrap();

    assert_eq!(merged.len(), 2);
    assert!(merged.stats().merged);
    assert!(merged
        .accepted()
        .iter()
        .all(|a| a.reason == AcceptReason::Merged));
    // Every vertex of the input is still covered.
    for pt in &vertices {
        assert!(merged.hulls().any(|h| h.contains_point(pt, 1.0e-4)));
    }
}

#[test]
fn vertex_budget_is_enforced() {
    let mut rng = oorandom::Rand32::new(77);
    let points = meshes::sphere_points(&mut rng, 300);
    let (vertices, triangles) = cleave3d::transformation::try_convex_hull(&points).unwrap();

    let params = DecompositionParameters {
        max_hull_vertices: 24,
        ..Default::default()
    };
    let result = Decomposer::new()
        .decompose(&vertices, &triangles, &params)
        .unwrap();

    assert!(result.stats().merged);
    assert!(!result.is_empty());
    assert!(result.hulls().all(|h| h.vertex_count() <= 24));
}

#[test]
fn default_parameters_keep_every_hull_vertex() {
    let mut rng = oorandom::Rand32::new(4321);
    let points = meshes::sphere_points(&mut rng, 200);
    let (vertices, triangles) = cleave3d::transformation::try_convex_hull(&points).unwrap();
    assert!(vertices.len() > 64);

    let result = Decomposer::new()
        .decompose(&vertices, &triangles, &DecompositionParameters::default())
        .unwrap();

    assert_eq!(result.len(), 1);
    assert!(!result.stats().merged);
    assert_ne!(result.accepted()[0].reason, AcceptReason::Merged);

    let hull = result.hull(0).unwrap();
    assert_eq!(hull.vertex_count(), vertices.len());
    assert!(vertices.iter().all(|pt| hull.contains_point(pt, 1.0e-4)));
}

/// A merger that only records how it was called.
#[derive(Default)]
struct RecordingMerger {
    calls: AtomicUsize,
}

impl HullMerger for RecordingMerger {
    fn merge_hulls(
        &self,
        mut hulls: Vec<ConvexHull>,
        target_count: u32,
        _: Real,
        _: u32,
    ) -> Vec<ConvexHull> {
        let _ = self.calls.fetch_add(1, Ordering::SeqCst);
        hulls.truncate(target_count as usize);
        hulls
    }
}

#[test]
fn custom_merger_is_only_called_over_budget() {
    let (vertices, triangles) = meshes::dumbbell();
    let merger = RecordingMerger::default();
    let decomposer = Decomposer::new().with_hull_merger(&merger);

    let params = DecompositionParameters {
        concavity_percent: 10.0,
        max_hulls: 64,
        ..Default::default()
    };
    let result = decomposer.decompose(&vertices, &triangles, &params).unwrap();
    assert_eq!(merger.calls.load(Ordering::SeqCst), 0);
    assert!(!result.stats().merged);

    let params = DecompositionParameters {
        max_hulls: 1,
        ..params
    };
    let result = decomposer.decompose(&vertices, &triangles, &params).unwrap();
    assert_eq!(merger.calls.load(Ordering::SeqCst), 1);
    assert_eq!(result.len(), 1);
}

#[test]
fn single_tetrahedron_never_merged() {
    let vertices = vec![
        Point::new(0.0, 0.0, 0.0),
        Point::new(1.0, 0.0, 0.0),
        Point::new(0.0, 1.0, 0.0),
        Point::new(0.0, 0.0, 1.0),
    ];
    let triangles = vec![[0, 2, 1], [0, 1, 3], [1, 2, 3], [0, 3, 2]];
    let result = Decomposer::new()
        .decompose(
            &vertices,
            &triangles,
            &DecompositionParameters {
                max_hulls: 1,
                max_hull_vertices: 4,
                ..Default::default()
            },
        )
        .unwrap();

    assert_eq!(result.len(), 1);
    assert!(!result.stats().merged);
}
