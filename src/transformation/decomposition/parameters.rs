use super::{DecompositionError, ProgressCallback};
use crate::math::Real;
use std::sync::Arc;

/// The recursion depth is clamped to this value, whatever [`DecompositionParameters::max_depth`] says.
pub const MAX_DECOMPOSITION_DEPTH: u32 = 10;

/// Parameters controlling the convex decomposition.
#[derive(Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DecompositionParameters {
    /// Maximum number of recursive splits of a fragment.
    ///
    /// Clamped to [`MAX_DECOMPOSITION_DEPTH`]. Must be at least 1.
    ///
    /// Default: `5`
    pub max_depth: u32,
    /// A fragment is accepted as convex if its concavity, as a percentage of the volume of
    /// its convex hull, is below this value.
    ///
    /// Default: `5.0`
    pub concavity_percent: Real,
    /// A fragment whose hull volume, as a percentage of the hull volume of the whole input
    /// mesh, is at most this value is never split.
    ///
    /// Default: `1.0`
    pub min_volume_percent: Real,
    /// The maximum number of hulls to output. If the decomposition produces more hulls
    /// than this, they are merged by the hull merger.
    ///
    /// Default: `32`
    pub max_hulls: u32,
    /// The maximum number of vertices of each output hull. Hulls with more vertices are
    /// reduced by the hull merger. Must be at least 4.
    ///
    /// Reducing a hull drops some of its vertices, so the reduced hull no longer
    /// contains every point of the fragment it was built from.
    ///
    /// Default: `u32::MAX` (no vertex budget)
    pub max_hull_vertices: u32,
    /// Should input vertices closer than [`Self::weld_tolerance`] be merged before the
    /// decomposition starts?
    ///
    /// Default: `true`
    pub remove_duplicate_vertices: bool,
    /// The distance under which two input vertices are considered duplicates.
    ///
    /// Default: `0.0` (only exact duplicates are merged)
    pub weld_tolerance: Real,
    /// During the merge pass, hulls whose volume is smaller than this fraction of the
    /// total volume are merged first, whatever the volume they add.
    ///
    /// Default: `0.0`
    pub small_cluster_threshold: Real,
    /// Receives progress reports, and may cancel the decomposition.
    ///
    /// Default: `None`
    #[cfg_attr(feature = "serde", serde(skip))]
    pub callback: Option<Arc<dyn ProgressCallback>>,
}

impl Default for DecompositionParameters {
    fn default() -> Self {
        Self {
            max_depth: 5,
            concavity_percent: 5.0,
            min_volume_percent: 1.0,
            max_hulls: 32,
            max_hull_vertices: u32::MAX,
            remove_duplicate_vertices: true,
            weld_tolerance: 0.0,
            small_cluster_threshold: 0.0,
            callback: None,
        }
    }
}

impl core::fmt::Debug for DecompositionParameters {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DecompositionParameters")
            .field("max_depth", &self.max_depth)
            .field("concavity_percent", &self.concavity_percent)
            .field("min_volume_percent", &self.min_volume_percent)
            .field("max_hulls", &self.max_hulls)
            .field("max_hull_vertices", &self.max_hull_vertices)
            .field("remove_duplicate_vertices", &self.remove_duplicate_vertices)
            .field("weld_tolerance", &self.weld_tolerance)
            .field("small_cluster_threshold", &self.small_cluster_threshold)
            .field("callback", &self.callback.is_some())
            .finish()
    }
}

impl DecompositionParameters {
    /// Sets the callback receiving progress reports.
    pub fn with_callback(mut self, callback: impl ProgressCallback + 'static) -> Self {
        self.callback = Some(Arc::new(callback));
        self
    }

    /// The maximum depth actually used by the decomposition.
    pub fn effective_max_depth(&self) -> u32 {
        self.max_depth.min(MAX_DECOMPOSITION_DEPTH)
    }

    /// Checks that every parameter is in its valid range.
    pub fn validate(&self) -> Result<(), DecompositionError> {
        fn invalid(name: &'static str, reason: &'static str) -> Result<(), DecompositionError> {
            Err(DecompositionError::InvalidParameter { name, reason })
        }

        if self.max_depth == 0 {
            return invalid("max_depth", "must be at least 1");
        }

        for (name, value) in [
            ("concavity_percent", self.concavity_percent),
            ("min_volume_percent", self.min_volume_percent),
            ("small_cluster_threshold", self.small_cluster_threshold),
            ("weld_tolerance", self.weld_tolerance),
        ] {
            if !value.is_finite() {
                return invalid(name, "must be finite");
            }

            if value < 0.0 {
                return invalid(name, "must not be negative");
            }
        }

        if self.max_hulls == 0 {
            return invalid("max_hulls", "must be at least 1");
        }

        if self.max_hull_vertices < 4 {
            return invalid("max_hull_vertices", "must be at least 4");
        }

        Ok(())
    }
}
