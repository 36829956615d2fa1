use super::callback::{STAGE_HULL_CONSTRUCTION_FAILED, STAGE_MERGING_HULLS, STAGE_SPLITTING_MESH};
use super::collector::HullCollector;
use super::{
    concavity_volume, AcceptReason, AcceptedHull, AllocationTracker, ConvexDecomposition,
    DecompositionError, DecompositionParameters, GreedyHullMerger, HullMerger,
    NoAllocationTracking,
};
use crate::bounding_volume::compute_split_plane;
use crate::math::{Point, Real};
use crate::query::split_fragment;
use crate::shape::{ConvexHull, MeshFragment, Plane};
use crate::transformation::{HullBuilder, QuickHullBuilder};
use core::sync::atomic::{AtomicBool, Ordering};

static DEFAULT_HULL_BUILDER: QuickHullBuilder = QuickHullBuilder { validate: false };
static DEFAULT_HULL_MERGER: GreedyHullMerger = GreedyHullMerger {
    hull_builder: QuickHullBuilder { validate: false },
};
static DEFAULT_ALLOCATION_TRACKER: NoAllocationTracking = NoAllocationTracking;

/// Computes an approximate convex decomposition of a triangle mesh.
///
/// This is a shortcut for `Decomposer::new().decompose(...)` returning only the hulls.
///
/// # Errors
/// See [`Decomposer::decompose`].
pub fn decompose(
    vertices: &[Point<Real>],
    triangles: &[[u32; 3]],
    params: &DecompositionParameters,
) -> Result<Vec<ConvexHull>, DecompositionError> {
    Decomposer::new()
        .decompose(vertices, triangles, params)
        .map(ConvexDecomposition::into_hulls)
}

/// Recursive approximate convex decomposition of triangle meshes.
///
/// The mesh is recursively split in two halves by a plane perpendicular to the longest
/// axis of the oriented bounding box of its convex hull, until each piece is close enough
/// to its own convex hull. The convex hulls of all the pieces form the decomposition.
///
/// The collaborators of the decomposition can be replaced:
/// - the [`HullBuilder`] computing the convex hull of each piece (default: [`QuickHullBuilder`]),
/// - the [`HullMerger`] enforcing the hull budget (default: [`GreedyHullMerger`]),
/// - the [`AllocationTracker`] receiving buffer allocations (default: [`NoAllocationTracking`]).
///
/// ```
/// # #[cfg(all(feature = "dim3", feature = "f32"))] {
/// use cleave3d::math::Point;
/// use cleave3d::transformation::decomposition::{
///     CountingAllocationTracker, Decomposer, DecompositionParameters,
/// };
///
/// let vertices: Vec<_> = (0..8)
///     .map(|i| Point::new((i & 1) as f32, ((i >> 1) & 1) as f32, ((i >> 2) & 1) as f32))
///     .collect();
/// let triangles = [
///     [0, 2, 1], [1, 2, 3], [4, 5, 6], [5, 7, 6], [0, 1, 4], [1, 5, 4],
///     [2, 6, 3], [3, 6, 7], [0, 4, 2], [2, 4, 6], [1, 3, 5], [3, 7, 5],
/// ];
///
/// let tracker = CountingAllocationTracker::new();
/// let decomposition = Decomposer::new()
///     .with_allocation_tracker(&tracker)
///     .decompose(&vertices, &triangles, &DecompositionParameters::default())
///     .unwrap();
///
/// assert_eq!(decomposition.len(), 1);
/// assert_eq!(decomposition.stats().splits, 0);
/// assert!(tracker.peak_bytes() > 0);
/// # }
/// ```
#[derive(Copy, Clone)]
pub struct Decomposer<'a> {
    hull_builder: &'a dyn HullBuilder,
    hull_merger: &'a dyn HullMerger,
    allocation_tracker: &'a dyn AllocationTracker,
}

impl Default for Decomposer<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> Decomposer<'a> {
    /// A decomposer with the default collaborators.
    pub fn new() -> Self {
        Self {
            hull_builder: &DEFAULT_HULL_BUILDER,
            hull_merger: &DEFAULT_HULL_MERGER,
            allocation_tracker: &DEFAULT_ALLOCATION_TRACKER,
        }
    }

    /// Sets the algorithm computing the convex hull of each fragment.
    pub fn with_hull_builder(mut self, hull_builder: &'a dyn HullBuilder) -> Self {
        self.hull_builder = hull_builder;
        self
    }

    /// Sets the post-process enforcing the hull budget.
    pub fn with_hull_merger(mut self, hull_merger: &'a dyn HullMerger) -> Self {
        self.hull_merger = hull_merger;
        self
    }

    /// Sets the tracker notified of each buffer allocated by the decomposition.
    pub fn with_allocation_tracker(mut self, allocation_tracker: &'a dyn AllocationTracker) -> Self {
        self.allocation_tracker = allocation_tracker;
        self
    }

    /// Computes the convex decomposition of the triangle mesh `(vertices, triangles)`.
    ///
    /// The triangles are expected to be oriented counter-clockwise when seen from the
    /// outside of the mesh. The mesh does not need to be closed or connected.
    ///
    /// If the decomposition is cancelled through the callback of `params`, the hulls
    /// accepted so far are returned and [`ConvexDecomposition::was_cancelled`] is `true`.
    ///
    /// # Errors
    /// Fails if the parameters are invalid, if the mesh is empty, or if it references
    /// non-existent or non-finite vertices. Nothing is computed in that case.
    pub fn decompose(
        &self,
        vertices: &[Point<Real>],
        triangles: &[[u32; 3]],
        params: &DecompositionParameters,
    ) -> Result<ConvexDecomposition, DecompositionError> {
        params.validate()?;
        check_input_mesh(vertices, triangles)?;

        let mut root = MeshFragment::new(vertices.to_vec(), triangles.to_vec());

        if params.remove_duplicate_vertices {
            let num_vertices = root.num_vertices();
            root = root.welded(params.weld_tolerance);
            log::debug!(
                "Welded the input mesh from {} to {} vertices.",
                num_vertices,
                root.num_vertices()
            );
        }

        let max_depth = params.effective_max_depth();
        let context = DecompositionContext {
            decomposer: self,
            params,
            max_depth,
            progress_budget: (1u32 << max_depth) as Real,
            collector: HullCollector::default(),
            cancelled: AtomicBool::new(false),
        };

        if root.is_empty() {
            log::debug!("The input mesh has no valid triangle left after welding.");
        } else {
            self.allocation_tracker.on_allocate(root.buffer_size());
            context.evaluate(root, 0, None);
        }

        let cancelled = context.cancelled.load(Ordering::Relaxed);
        let (mut accepted, mut stats) = context.collector.into_parts();

        let needs_merge = accepted.len() > params.max_hulls as usize
            || accepted
                .iter()
                .any(|a| a.hull.vertex_count() > params.max_hull_vertices as usize);

        if needs_merge && !cancelled {
            log::debug!(
                "Merging {} hulls (budget: {} hulls of at most {} vertices).",
                accepted.len(),
                params.max_hulls,
                params.max_hull_vertices
            );

            if let Some(callback) = &params.callback {
                callback.report_progress(STAGE_MERGING_HULLS, 1.0);
            }

            let hulls: Vec<_> = accepted
                .into_iter()
                .map(|a| {
                    self.allocation_tracker.on_release(a.hull.buffer_size());
                    a.hull
                })
                .collect();
            let merged = self.hull_merger.merge_hulls(
                hulls,
                params.max_hulls,
                params.small_cluster_threshold,
                params.max_hull_vertices,
            );

            accepted = merged
                .into_iter()
                .map(|hull| {
                    self.allocation_tracker.on_allocate(hull.buffer_size());
                    AcceptedHull {
                        hull,
                        depth: 0,
                        concavity_percent: None,
                        reason: AcceptReason::Merged,
                    }
                })
                .collect();
            stats.merged = true;
        }

        Ok(ConvexDecomposition::new(accepted, cancelled, stats))
    }
}

fn check_input_mesh(
    vertices: &[Point<Real>],
    triangles: &[[u32; 3]],
) -> Result<(), DecompositionError> {
    if vertices.is_empty() || triangles.is_empty() {
        return Err(DecompositionError::EmptyMesh);
    }

    for (triangle, tri) in triangles.iter().enumerate() {
        if let Some(index) = tri.iter().find(|i| **i as usize >= vertices.len()) {
            return Err(DecompositionError::IndexOutOfBounds {
                triangle,
                index: *index,
                num_vertices: vertices.len(),
            });
        }
    }

    if let Some(i) = vertices
        .iter()
        .position(|pt| !pt.coords.iter().all(|e| e.is_finite()))
    {
        return Err(DecompositionError::NonFiniteVertex(i));
    }

    Ok(())
}

enum SplitDecision {
    Accept {
        reason: AcceptReason,
        concavity_percent: Option<Real>,
    },
    Split(Plane),
}

struct DecompositionContext<'a> {
    decomposer: &'a Decomposer<'a>,
    params: &'a DecompositionParameters,
    max_depth: u32,
    progress_budget: Real,
    collector: HullCollector,
    cancelled: AtomicBool,
}

impl DecompositionContext<'_> {
    fn is_cancelled(&self) -> bool {
        if self.cancelled.load(Ordering::Relaxed) {
            return true;
        }

        let cancelled = self
            .params
            .callback
            .as_ref()
            .is_some_and(|callback| callback.is_cancelled());

        if cancelled {
            log::debug!("Convex decomposition cancelled.");
            self.cancelled.store(true, Ordering::Relaxed);
        }

        cancelled
    }

    fn report_progress(&self, stage: &str, num_accepted: usize) {
        if let Some(callback) = &self.params.callback {
            let fraction = (num_accepted as Real / self.progress_budget).min(1.0);
            callback.report_progress(stage, fraction);
        }
    }

    fn release_fragment(&self, fragment: MeshFragment) {
        self.decomposer
            .allocation_tracker
            .on_release(fragment.buffer_size());
    }

    /// Processes one fragment: builds its hull, then either accepts it or splits the
    /// fragment and processes both halves.
    ///
    /// `master_volume` is the hull volume of the root fragment, `None` for the root itself.
    fn evaluate(&self, fragment: MeshFragment, depth: u32, master_volume: Option<Real>) {
        if self.is_cancelled() {
            self.release_fragment(fragment);
            return;
        }

        self.collector.fragment_evaluated(depth);

        if fragment.is_coplanar() {
            log::debug!(
                "Discarding flat fragment at depth {} ({} triangles).",
                depth,
                fragment.num_triangles()
            );
            self.collector.coplanar_discarded();
            self.release_fragment(fragment);
            return;
        }

        let hull = match self
            .decomposer
            .hull_builder
            .build_convex_hull(fragment.vertices())
        {
            Ok(hull) => hull,
            Err(err) => {
                log::warn!(
                    "Discarding fragment at depth {} ({} vertices): {}",
                    depth,
                    fragment.num_vertices(),
                    err
                );
                self.collector.hull_failed();
                let num_accepted = self.collector.num_accepted();
                self.report_progress(STAGE_HULL_CONSTRUCTION_FAILED, num_accepted);
                self.release_fragment(fragment);
                return;
            }
        };

        self.decomposer
            .allocation_tracker
            .on_allocate(hull.buffer_size());

        let hull_volume = hull.volume();
        let master_volume = master_volume.unwrap_or(hull_volume);

        match self.decide_split(&fragment, &hull, hull_volume, master_volume, depth) {
            SplitDecision::Accept {
                reason,
                concavity_percent,
            } => {
                self.release_fragment(fragment);
                self.finalize(hull, depth, reason, concavity_percent);
            }
            SplitDecision::Split(plane) => {
                self.decomposer
                    .allocation_tracker
                    .on_release(hull.buffer_size());
                drop(hull);

                let (front, back) = split_fragment(&fragment, &plane);
                self.collector.split_performed();
                self.release_fragment(fragment);

                log::debug!(
                    "Split at depth {}: {} front and {} back triangles.",
                    depth,
                    front.num_triangles(),
                    back.num_triangles()
                );

                self.evaluate_children(front, back, depth + 1, master_volume);
            }
        }
    }

    #[cfg(not(feature = "parallel"))]
    fn evaluate_children(
        &self,
        front: MeshFragment,
        back: MeshFragment,
        depth: u32,
        master_volume: Real,
    ) {
        self.evaluate_child(front, depth, master_volume);
        self.evaluate_child(back, depth, master_volume);
    }

    #[cfg(feature = "parallel")]
    fn evaluate_children(
        &self,
        front: MeshFragment,
        back: MeshFragment,
        depth: u32,
        master_volume: Real,
    ) {
        let _ = rayon::join(
            || self.evaluate_child(front, depth, master_volume),
            || self.evaluate_child(back, depth, master_volume),
        );
    }

    fn evaluate_child(&self, child: MeshFragment, depth: u32, master_volume: Real) {
        if !child.is_empty() {
            self.decomposer
                .allocation_tracker
                .on_allocate(child.buffer_size());
            self.evaluate(child, depth, Some(master_volume));
        }
    }

    fn decide_split(
        &self,
        fragment: &MeshFragment,
        hull: &ConvexHull,
        hull_volume: Real,
        master_volume: Real,
        depth: u32,
    ) -> SplitDecision {
        let accept = |reason, concavity_percent| SplitDecision::Accept {
            reason,
            concavity_percent,
        };

        if depth >= self.max_depth {
            return accept(AcceptReason::MaxDepthReached, None);
        }

        let volume_percent = if master_volume > 0.0 {
            hull_volume * 100.0 / master_volume
        } else {
            0.0
        };

        if volume_percent <= self.params.min_volume_percent {
            log::debug!(
                "Fragment at depth {} is too small to split ({}% of the mesh).",
                depth,
                volume_percent
            );
            return accept(AcceptReason::BelowMinVolume, None);
        }

        let Some(plane) = compute_split_plane(hull.vertices()) else {
            return accept(AcceptReason::NoSplitPlane, None);
        };

        let concavity_percent = if hull_volume > 0.0 {
            concavity_volume(fragment, hull) * 100.0 / hull_volume
        } else {
            0.0
        };

        if concavity_percent < self.params.concavity_percent {
            log::debug!(
                "Fragment at depth {} is convex enough ({}% concavity).",
                depth,
                concavity_percent
            );
            return accept(AcceptReason::ConcavityBelowThreshold, Some(concavity_percent));
        }

        SplitDecision::Split(plane)
    }

    fn finalize(
        &self,
        hull: ConvexHull,
        depth: u32,
        reason: AcceptReason,
        concavity_percent: Option<Real>,
    ) {
        let num_accepted = self.collector.accept(AcceptedHull {
            hull,
            depth,
            concavity_percent,
            reason,
        });
        self.report_progress(STAGE_SPLITTING_MESH, num_accepted);
    }
}
