use crate::meshes;
use approx::assert_relative_eq;
use cleave3d::math::{Point, Real};
use cleave3d::transformation::decomposition::{
    decompose, AcceptReason, Decomposer, DecompositionParameters,
};
use cleave3d::transformation::QuickHullBuilder;

#[test]
fn unit_cube_is_a_single_hull() {
    let (vertices, triangles) = meshes::unit_cube();
    let params = DecompositionParameters {
        concavity_percent: 5.0,
        max_depth: 5,
        ..Default::default()
    };
    let builder = QuickHullBuilder::validating();
    let result = Decomposer::new()
        .with_hull_builder(&builder)
        .decompose(&vertices, &triangles, &params)
        .unwrap();

    assert_eq!(result.len(), 1);
    assert_eq!(result.stats().splits, 0);
    assert_eq!(result.stats().fragments_evaluated, 1);

    let accepted = &result.accepted()[0];
    assert_eq!(accepted.reason, AcceptReason::ConcavityBelowThreshold);
    assert_relative_eq!(accepted.concavity_percent.unwrap(), 0.0, epsilon = 1.0e-3);

    let hull = &accepted.hull;
    assert_eq!(hull.vertex_count(), 8);
    assert_eq!(hull.triangle_count(), 12);
    assert_relative_eq!(hull.volume(), 1.0, epsilon = 1.0e-5);

    for corner in &vertices {
        assert!(hull
            .vertices()
            .iter()
            .any(|v| cleave3d::na::distance(v, corner) < 1.0e-6));
    }
}

#[test]
fn cube_with_split_vertices_is_welded() {
    // Each face has its own four vertices.
    let (cube_vertices, cube_triangles) = meshes::unit_cube();
    let mut vertices = Vec::new();
    let mut triangles = Vec::new();

    for tri in &cube_triangles {
        let base = vertices.len() as u32;
        vertices.extend(tri.iter().map(|i| cube_vertices[*i as usize]));
        triangles.push([base, base + 1, base + 2]);
    }

    let hulls = decompose(&vertices, &triangles, &DecompositionParameters::default()).unwrap();
    assert_eq!(hulls.len(), 1);
    assert_eq!(hulls[0].vertex_count(), 8);
    assert_relative_eq!(hulls[0].volume(), 1.0, epsilon = 1.0e-5);
}

#[test]
fn scaled_and_translated_cube() {
    let (vertices, triangles) =
        meshes::cuboid(Point::new(-2.0, 1.0, 3.0), Point::new(4.0, 3.0, 4.5));
    let hulls = decompose(&vertices, &triangles, &DecompositionParameters::default()).unwrap();
    let expected: Real = 6.0 * 2.0 * 1.5;

    assert_eq!(hulls.len(), 1);
    assert_relative_eq!(hulls[0].volume(), expected, max_relative = 1.0e-4);
}
