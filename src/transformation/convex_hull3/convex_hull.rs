use super::{try_get_initial_mesh, ConvexHullError, TriangleFacet};
use crate::math::{Point, Real};
use crate::transformation::convex_hull_utils::{
    indexed_support_point_id, indexed_support_point_nth, normalize,
};
use crate::utils;

/// Computes the convex hull of a set of 3d points.
///
/// Returns the hull vertices and its triangles, oriented counter-clockwise when seen
/// from the outside. Only the input points that are vertices of the hull are kept.
pub fn try_convex_hull(
    points: &[Point<Real>],
) -> Result<(Vec<Point<Real>>, Vec<[u32; 3]>), ConvexHullError> {
    if points.len() < 4 {
        return Err(ConvexHullError::IncompleteInput);
    }

    if points.iter().any(|pt| !pt.coords.iter().all(|e| e.is_finite())) {
        return Err(ConvexHullError::MissingSupportPoint);
    }

    let mut normalized_points = points.to_vec();
    let _ = normalize(&mut normalized_points[..]);

    let mut undecidable_points = Vec::new();
    let mut silhouette_loop_facets_and_idx = Vec::new();
    let mut removed_facets = Vec::new();

    let mut triangles = try_get_initial_mesh(&mut normalized_points, &mut undecidable_points)?;

    let mut i = 0;
    while i != triangles.len() {
        silhouette_loop_facets_and_idx.clear();

        if !triangles[i].valid || triangles[i].affinely_dependent {
            i += 1;
            continue;
        }

        let pt_id = indexed_support_point_id(
            &triangles[i].normal,
            &normalized_points,
            triangles[i].visible_points.iter().copied(),
        );

        if let Some(point) = pt_id {
            triangles[i].valid = false;

            removed_facets.clear();
            removed_facets.push(i);

            for j in 0usize..3 {
                compute_silhouette(
                    triangles[i].adj[j],
                    triangles[i].indirect_adj_id[j],
                    point,
                    &mut silhouette_loop_facets_and_idx,
                    &normalized_points,
                    &mut removed_facets,
                    &mut triangles,
                );
            }

            // In some degenerate cases (because of float rounding problems), the silhouette may:
            // 1. Contain self-intersections (i.e. a single vertex is used by more than two edges).
            // 2. Contain multiple disjoint (but nested) loops.
            fix_silhouette_topology(
                &normalized_points,
                &mut silhouette_loop_facets_and_idx,
                &mut removed_facets,
                &mut triangles,
            )?;

            if silhouette_loop_facets_and_idx.is_empty() {
                // Due to inaccuracies, the silhouette could not be computed
                // (the point seems to be visible from… every triangle).
                let any_valid = triangles[i + 1..]
                    .iter()
                    .any(|t| t.valid && !t.affinely_dependent);

                if any_valid {
                    return Err(ConvexHullError::InternalError(
                        "empty silhouette with facets left to process",
                    ));
                }

                triangles[i].valid = true;
                break;
            }

            attach_and_push_facets(
                &silhouette_loop_facets_and_idx,
                point,
                &normalized_points,
                &mut triangles,
                &removed_facets,
                &mut undecidable_points,
            )?;
        }

        i += 1;
    }

    let mut idx: Vec<[u32; 3]> = triangles
        .iter()
        .filter(|facet| facet.valid)
        .map(|facet| facet.pts.map(|p| p as u32))
        .collect();

    let mut points = points.to_vec();
    utils::remove_unused_points(&mut points, &mut idx);

    if points.is_empty() || idx.is_empty() {
        return Err(ConvexHullError::InternalError("empty output mesh"));
    }

    Ok((points, idx))
}

fn compute_silhouette(
    facet: usize,
    indirect_id: usize,
    point: usize,
    out_facets_and_idx: &mut Vec<(usize, usize)>,
    points: &[Point<Real>],
    removed_facets: &mut Vec<usize>,
    triangles: &mut [TriangleFacet],
) {
    if !triangles[facet].valid {
        return;
    }

    if !triangles[facet].order_independent_can_be_seen_by_point(point, points) {
        out_facets_and_idx.push((facet, indirect_id));
    } else {
        // The facet must be removed from the convex hull.
        triangles[facet].valid = false;
        removed_facets.push(facet);

        for k in [1, 2] {
            compute_silhouette(
                triangles[facet].adj[(indirect_id + k) % 3],
                triangles[facet].indirect_adj_id[(indirect_id + k) % 3],
                point,
                out_facets_and_idx,
                points,
                removed_facets,
                triangles,
            );
        }
    }
}

fn fix_silhouette_topology(
    points: &[Point<Real>],
    out_facets_and_idx: &mut Vec<(usize, usize)>,
    removed_facets: &mut Vec<usize>,
    triangles: &mut [TriangleFacet],
) -> Result<(), ConvexHullError> {
    let mut workspace = vec![0; points.len()];
    let mut needs_fixing = false;

    // NOTE: we work with the second_point_from_edge instead
    // of the first one, because when we traverse the silhouette
    // we see the second edge point before the first.
    for (facet, adj_id) in out_facets_and_idx.iter() {
        let p = triangles[*facet].second_point_from_edge(*adj_id);
        workspace[p] += 1;
        needs_fixing |= workspace[p] > 1;
    }

    if !needs_fixing {
        return Ok(());
    }

    // We detected multiple loops. First, we need to know which loop is the one we
    // need to keep.
    let mut loop_start = 0;
    for (facet, adj_id) in out_facets_and_idx.iter() {
        let p1 = points[triangles[*facet].second_point_from_edge(*adj_id)];
        let p2 = points[triangles[*facet].first_point_from_edge(*adj_id)];
        let (supp, _) = indexed_support_point_nth(
            &(p2 - p1),
            points,
            out_facets_and_idx
                .iter()
                .map(|(f, ai)| triangles[*f].second_point_from_edge(*ai)),
        )
        .ok_or(ConvexHullError::MissingSupportPoint)?;

        let selected = &out_facets_and_idx[supp];
        if workspace[triangles[selected.0].second_point_from_edge(selected.1)] == 1 {
            // This is a valid point to start with.
            loop_start = supp;
            break;
        }
    }

    let mut removing = None;
    let old_facets_and_idx = core::mem::take(out_facets_and_idx);

    for i in 0..old_facets_and_idx.len() {
        let facet_id = (loop_start + i) % old_facets_and_idx.len();
        let (facet, adj_id) = old_facets_and_idx[facet_id];
        let p1 = triangles[facet].second_point_from_edge(adj_id);

        match removing {
            Some(p) if p == p1 => removing = None,
            Some(_) => {}
            None if workspace[p1] > 1 => removing = Some(p1),
            None => {}
        }

        if removing.is_some() {
            if triangles[facet].valid {
                triangles[facet].valid = false;
                removed_facets.push(facet);
            }
        } else {
            out_facets_and_idx.push((facet, adj_id));
        }
    }

    Ok(())
}

/// Returns the index of the facet of `facets` furthest from `point` among those
/// satisfying `filter`.
fn furthest_facet(
    facets: &[TriangleFacet],
    point: usize,
    points: &[Point<Real>],
    filter: impl Fn(&TriangleFacet) -> bool,
) -> Option<usize> {
    let mut furthest = None;
    let mut furthest_dist = 0.0;

    for (i, facet) in facets.iter().enumerate() {
        if filter(facet) {
            let distance = facet.distance_to_point(point, points);

            if distance > furthest_dist {
                furthest = Some(i);
                furthest_dist = distance;
            }
        }
    }

    furthest
}

fn attach_and_push_facets(
    silhouette_loop_facets_and_idx: &[(usize, usize)],
    point: usize,
    points: &[Point<Real>],
    triangles: &mut Vec<TriangleFacet>,
    removed_facets: &[usize],
    undecidable: &mut Vec<usize>,
) -> Result<(), ConvexHullError> {
    // The silhouette is built to be in CCW order.
    let mut new_facets: Vec<_> = silhouette_loop_facets_and_idx
        .iter()
        .map(|(adj_facet, indirect_id)| {
            TriangleFacet::new(
                point,
                triangles[*adj_facet].second_point_from_edge(*indirect_id),
                triangles[*adj_facet].first_point_from_edge(*indirect_id),
                points,
            )
        })
        .collect();

    // Link the facets together.
    let num_new = silhouette_loop_facets_and_idx.len();
    let first_new = triangles.len();

    for (i, (middle_facet, middle_id)) in silhouette_loop_facets_and_idx.iter().enumerate() {
        let prev_facet = first_new + (i + num_new - 1) % num_new;
        let next_facet = first_new + (i + 1) % num_new;

        new_facets[i].set_facets_adjacency([prev_facet, *middle_facet, next_facet], [2, *middle_id, 0]);

        // Check that we are not overwriting a valid link.
        if triangles[triangles[*middle_facet].adj[*middle_id]].valid {
            return Err(ConvexHullError::InternalError(
                "silhouette edge adjacent to a valid facet",
            ));
        }

        triangles[*middle_facet].adj[*middle_id] = first_new + i;
        triangles[*middle_facet].indirect_adj_id[*middle_id] = 1;
    }

    // Assign to each facets some of the points which can see it.
    for curr_facet in removed_facets.iter() {
        for visible_point in triangles[*curr_facet].visible_points.iter() {
            if points[*visible_point] == points[point] {
                continue;
            }

            let furthest = furthest_facet(&new_facets, *visible_point, points, |f| {
                !f.affinely_dependent
            });

            if let Some(furthest) = furthest {
                if new_facets[furthest].can_see_point(*visible_point, points) {
                    new_facets[furthest].add_visible_point(*visible_point, points);
                }
            }

            // If none of the facet can be seen from the point, it is implicitly
            // deleted because it won't be referenced by any facet.
        }
    }

    // Try to assign collinear points to one of the new facets.
    let mut i = 0;

    while i != undecidable.len() {
        let undecidable_point = undecidable[i];
        let furthest = furthest_facet(&new_facets, undecidable_point, points, |f| {
            f.can_see_point(undecidable_point, points)
        });

        if let Some(furthest) = furthest {
            new_facets[furthest].add_visible_point(undecidable_point, points);
            let _ = undecidable.swap_remove(i);
        } else {
            i += 1;
        }
    }

    triangles.append(&mut new_facets);
    Ok(())
}
