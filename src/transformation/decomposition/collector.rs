use crate::math::Real;
use crate::shape::ConvexHull;
use core::sync::atomic::{AtomicU32, AtomicUsize, Ordering};
use std::sync::Mutex;

/// Why a fragment was not split further.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum AcceptReason {
    /// The fragment is close enough to its convex hull.
    ConcavityBelowThreshold,
    /// The fragment reached the maximum recursion depth.
    MaxDepthReached,
    /// The fragment is too small, relative to the whole mesh, to be split.
    BelowMinVolume,
    /// No split plane could be computed for the fragment.
    NoSplitPlane,
    /// The hull results from the merge pass.
    Merged,
}

/// A convex hull output by the decomposition, with the circumstances of its acceptance.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AcceptedHull {
    /// The convex hull.
    pub hull: ConvexHull,
    /// The recursion depth of the fragment this hull was built from.
    pub depth: u32,
    /// The measured concavity of the fragment, as a percentage of the hull volume.
    ///
    /// This is `None` if the concavity was not measured before the fragment got accepted.
    pub concavity_percent: Option<Real>,
    /// Why this hull was accepted.
    pub reason: AcceptReason,
}

/// Counters describing the course of a decomposition.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DecompositionStats {
    /// The number of fragments evaluated, the input mesh included.
    pub fragments_evaluated: usize,
    /// The number of fragments discarded because they are flat.
    pub discarded_coplanar: usize,
    /// The number of fragments discarded because their hull could not be built.
    pub discarded_hull_failures: usize,
    /// The number of plane splits performed.
    pub splits: usize,
    /// The deepest recursion level reached.
    pub max_depth_reached: u32,
    /// Did the merge pass run?
    pub merged: bool,
}

/// The result of a convex decomposition.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ConvexDecomposition {
    accepted: Vec<AcceptedHull>,
    cancelled: bool,
    stats: DecompositionStats,
}

impl ConvexDecomposition {
    pub(crate) fn new(
        accepted: Vec<AcceptedHull>,
        cancelled: bool,
        stats: DecompositionStats,
    ) -> Self {
        Self {
            accepted,
            cancelled,
            stats,
        }
    }

    /// The number of convex hulls.
    pub fn len(&self) -> usize {
        self.accepted.len()
    }

    /// Is this decomposition empty?
    pub fn is_empty(&self) -> bool {
        self.accepted.is_empty()
    }

    /// The `i`-th convex hull, if it exists.
    pub fn hull(&self, i: usize) -> Option<&ConvexHull> {
        self.accepted.get(i).map(|a| &a.hull)
    }

    /// Iterates through the convex hulls.
    pub fn hulls(&self) -> impl ExactSizeIterator<Item = &ConvexHull> + '_ {
        self.accepted.iter().map(|a| &a.hull)
    }

    /// The convex hulls, with the circumstances of their acceptance.
    pub fn accepted(&self) -> &[AcceptedHull] {
        &self.accepted
    }

    /// Consumes this decomposition and returns its convex hulls.
    pub fn into_hulls(self) -> Vec<ConvexHull> {
        self.accepted.into_iter().map(|a| a.hull).collect()
    }

    /// Was the decomposition cancelled before completion?
    ///
    /// The hulls of a cancelled decomposition are valid, but do not cover the whole mesh.
    pub fn was_cancelled(&self) -> bool {
        self.cancelled
    }

    /// Statistics about the decomposition.
    pub fn stats(&self) -> &DecompositionStats {
        &self.stats
    }

    /// The total volume of the convex hulls.
    pub fn total_volume(&self) -> Real {
        self.hulls().map(|h| h.volume()).sum()
    }
}

/// Accumulates the hulls accepted by the decomposition, possibly from several threads.
#[derive(Debug, Default)]
pub(crate) struct HullCollector {
    accepted: Mutex<Vec<AcceptedHull>>,
    num_accepted: AtomicUsize,
    fragments_evaluated: AtomicUsize,
    discarded_coplanar: AtomicUsize,
    discarded_hull_failures: AtomicUsize,
    splits: AtomicUsize,
    max_depth_reached: AtomicU32,
}

impl HullCollector {
    /// Stores an accepted hull and returns the number of hulls accepted before it.
    pub fn accept(&self, accepted: AcceptedHull) -> usize {
        self.accepted
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(accepted);
        self.num_accepted.fetch_add(1, Ordering::Relaxed)
    }

    pub fn num_accepted(&self) -> usize {
        self.num_accepted.load(Ordering::Relaxed)
    }

    pub fn fragment_evaluated(&self, depth: u32) {
        let _ = self.fragments_evaluated.fetch_add(1, Ordering::Relaxed);
        let _ = self.max_depth_reached.fetch_max(depth, Ordering::Relaxed);
    }

    pub fn coplanar_discarded(&self) {
        let _ = self.discarded_coplanar.fetch_add(1, Ordering::Relaxed);
    }

    pub fn hull_failed(&self) {
        let _ = self.discarded_hull_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn split_performed(&self) {
        let _ = self.splits.fetch_add(1, Ordering::Relaxed);
    }

    /// Consumes this collector, returning the accepted hulls and the statistics.
    pub fn into_parts(self) -> (Vec<AcceptedHull>, DecompositionStats) {
        let stats = DecompositionStats {
            fragments_evaluated: self.fragments_evaluated.into_inner(),
            discarded_coplanar: self.discarded_coplanar.into_inner(),
            discarded_hull_failures: self.discarded_hull_failures.into_inner(),
            splits: self.splits.into_inner(),
            max_depth_reached: self.max_depth_reached.into_inner(),
            merged: false,
        };
        let accepted = self
            .accepted
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        (accepted, stats)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::math::Point;

    fn accepted(depth: u32) -> AcceptedHull {
        let hull = ConvexHull::new(
            vec![
                Point::new(0.0, 0.0, 0.0),
                Point::new(1.0, 0.0, 0.0),
                Point::new(0.0, 1.0, 0.0),
                Point::new(0.0, 0.0, 1.0),
            ],
            vec![[0, 2, 1], [0, 1, 3], [1, 2, 3], [0, 3, 2]],
        );

        AcceptedHull {
            hull,
            depth,
            concavity_percent: Some(0.0),
            reason: AcceptReason::ConcavityBelowThreshold,
        }
    }

    #[test]
    fn collector_counts_and_keeps_order() {
        let collector = HullCollector::default();
        collector.fragment_evaluated(0);
        collector.split_performed();
        collector.fragment_evaluated(1);
        collector.fragment_evaluated(1);
        collector.coplanar_discarded();
        assert_eq!(collector.accept(accepted(1)), 0);
        assert_eq!(collector.accept(accepted(2)), 1);
        assert_eq!(collector.num_accepted(), 2);

        let (hulls, stats) = collector.into_parts();
        assert_eq!(hulls.len(), 2);
        assert_eq!(hulls[1].depth, 2);
        assert_eq!(stats.fragments_evaluated, 3);
        assert_eq!(stats.discarded_coplanar, 1);
        assert_eq!(stats.splits, 1);
        assert_eq!(stats.max_depth_reached, 1);
        assert!(!stats.merged);

        let decomposition = ConvexDecomposition::new(hulls, false, stats);
        assert_eq!(decomposition.len(), 2);
        assert!(decomposition.hull(2).is_none());
        assert_relative_eq!(decomposition.total_volume(), 2.0 / 6.0, epsilon = 1.0e-6);
        assert_eq!(decomposition.into_hulls().len(), 2);
    }
}
