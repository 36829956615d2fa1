use crate::math::{Point, Real};
use crate::shape::ConvexHull;
use crate::transformation::{HullBuilder, QuickHullBuilder};
use core::cmp::Reverse;
use ordered_float::OrderedFloat;
use std::collections::BinaryHeap;

/// A post-process reducing a set of convex hulls to a hull budget.
pub trait HullMerger: Sync {
    /// Reduces `hulls` to at most `target_count` hulls, each with at most
    /// `max_hull_vertices` vertices.
    ///
    /// Hulls with a volume smaller than `small_cluster_threshold` times the total volume
    /// should be merged first.
    fn merge_hulls(
        &self,
        hulls: Vec<ConvexHull>,
        target_count: u32,
        small_cluster_threshold: Real,
        max_hull_vertices: u32,
    ) -> Vec<ConvexHull>;
}

/// Greedy bottom-up merging of convex hulls.
///
/// The pair of hulls whose merged hull adds the least volume is merged first, until the
/// hull count fits the budget. Then each hull with too many vertices is rebuilt from a
/// subset of its vertices picked by farthest-point sampling.
#[derive(Copy, Clone, Debug, Default)]
pub struct GreedyHullMerger {
    /// The builder used to compute the merged hulls.
    pub hull_builder: QuickHullBuilder,
}

/// A candidate pair of clusters, with the versions of the clusters it was computed for.
type MergeCandidate = Reverse<(OrderedFloat<Real>, usize, usize, usize, usize)>;

struct Cluster {
    hull: ConvexHull,
    volume: Real,
    version: usize,
}

impl GreedyHullMerger {
    fn merged_hull(&self, a: &ConvexHull, b: &ConvexHull) -> Option<ConvexHull> {
        let points: Vec<_> = a.vertices().iter().chain(b.vertices()).copied().collect();
        self.hull_builder.build_convex_hull(&points).ok()
    }

    fn merge_cost(
        &self,
        a: &Cluster,
        b: &Cluster,
        total_volume: Real,
        small_cluster_volume: Real,
    ) -> Option<Real> {
        if a.volume < small_cluster_volume || b.volume < small_cluster_volume {
            return Some(0.0);
        }

        let merged = self.merged_hull(&a.hull, &b.hull)?;
        let added = (merged.volume() - a.volume - b.volume).max(0.0);
        Some(added / total_volume)
    }

    fn merge_clusters(
        &self,
        hulls: Vec<ConvexHull>,
        target_count: usize,
        small_cluster_threshold: Real,
    ) -> Vec<ConvexHull> {
        let mut clusters: Vec<Option<Cluster>> = hulls
            .into_iter()
            .map(|hull| {
                let volume = hull.volume();
                Some(Cluster {
                    hull,
                    volume,
                    version: 0,
                })
            })
            .collect();

        let total_volume: Real = clusters.iter().flatten().map(|c| c.volume).sum();
        if total_volume <= 0.0 {
            log::debug!("Skipping hull merge: the hulls have no volume.");
            return clusters.into_iter().flatten().map(|c| c.hull).collect();
        }

        let small_cluster_volume = small_cluster_threshold * total_volume;
        let mut num_clusters = clusters.len();
        let mut queue = BinaryHeap::new();

        let push_pair = |queue: &mut BinaryHeap<MergeCandidate>,
                         clusters: &[Option<Cluster>],
                         i: usize,
                         j: usize| {
            if let (Some(a), Some(b)) = (&clusters[i], &clusters[j]) {
                if let Some(cost) = self.merge_cost(a, b, total_volume, small_cluster_volume) {
                    queue.push(Reverse((OrderedFloat(cost), i, j, a.version, b.version)));
                }
            }
        };

        for i in 0..clusters.len() {
            for j in i + 1..clusters.len() {
                push_pair(&mut queue, &clusters, i, j);
            }
        }

        while num_clusters > target_count {
            let Some(Reverse((cost, i, j, version_i, version_j))) = queue.pop() else {
                log::warn!(
                    "Could not merge the convex hulls down to {} (stopped at {}).",
                    target_count,
                    num_clusters
                );
                break;
            };

            let up_to_date = matches!((&clusters[i], &clusters[j]), (Some(a), Some(b))
                if a.version == version_i && b.version == version_j);

            if !up_to_date {
                continue;
            }

            let merged = match (&clusters[i], &clusters[j]) {
                (Some(a), Some(b)) => self.merged_hull(&a.hull, &b.hull),
                _ => None,
            };

            let Some(merged) = merged else {
                continue;
            };

            log::debug!("Merging hulls {} and {} (cost: {}).", i, j, cost.0);

            let version = version_i.max(version_j) + 1;
            clusters[i] = Some(Cluster {
                volume: merged.volume(),
                hull: merged,
                version,
            });
            clusters[j] = None;
            num_clusters -= 1;

            for k in 0..clusters.len() {
                if k != i {
                    push_pair(&mut queue, &clusters, i.min(k), i.max(k));
                }
            }
        }

        clusters.into_iter().flatten().map(|c| c.hull).collect()
    }

    fn reduce_vertices(&self, hull: ConvexHull, max_vertices: usize) -> ConvexHull {
        if hull.vertex_count() <= max_vertices {
            return hull;
        }

        let selected = farthest_point_sampling(hull.vertices(), max_vertices);
        let points: Vec<_> = selected.iter().map(|i| hull.vertices()[*i]).collect();

        match self.hull_builder.build_convex_hull(&points) {
            Ok(reduced) => reduced,
            Err(err) => {
                log::warn!("Could not reduce the vertex count of a hull: {}", err);
                hull
            }
        }
    }
}

impl HullMerger for GreedyHullMerger {
    fn merge_hulls(
        &self,
        hulls: Vec<ConvexHull>,
        target_count: u32,
        small_cluster_threshold: Real,
        max_hull_vertices: u32,
    ) -> Vec<ConvexHull> {
        let target_count = (target_count as usize).max(1);
        let hulls = if hulls.len() > target_count {
            self.merge_clusters(hulls, target_count, small_cluster_threshold)
        } else {
            hulls
        };

        hulls
            .into_iter()
            .map(|hull| self.reduce_vertices(hull, max_hull_vertices as usize))
            .collect()
    }
}

/// Picks `count` points of `points`, each as far as possible from the ones already picked.
///
/// The first point picked is the one farthest from the centroid.
fn farthest_point_sampling(points: &[Point<Real>], count: usize) -> Vec<usize> {
    if points.len() <= count {
        return (0..points.len()).collect();
    }

    let center = crate::utils::center(points);
    let mut min_dists: Vec<Real> = points
        .iter()
        .map(|pt| na::distance_squared(pt, &center))
        .collect();
    let mut selected = Vec::with_capacity(count);

    while selected.len() < count {
        let Some((best, _)) = min_dists
            .iter()
            .enumerate()
            .max_by_key(|(_, d)| OrderedFloat(**d))
        else {
            break;
        };

        selected.push(best);

        for (i, pt) in points.iter().enumerate() {
            let d = na::distance_squared(pt, &points[best]);
            min_dists[i] = min_dists[i].min(d);
        }

        // Never pick the same point twice, even if all the others are duplicates.
        min_dists[best] = -1.0;
    }

    selected
}
