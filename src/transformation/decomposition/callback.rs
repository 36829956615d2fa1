use crate::math::Real;

/// Stage reported each time a hull is accepted.
pub const STAGE_SPLITTING_MESH: &str = "SplittingMesh";
/// Stage reported when the hull of a fragment could not be built.
pub const STAGE_HULL_CONSTRUCTION_FAILED: &str = "HullConstructionFailed";
/// Stage reported when the optional merge pass starts.
pub const STAGE_MERGING_HULLS: &str = "MergingHulls";

/// Receives progress notifications from a decomposition, and may cancel it.
///
/// When the decomposition runs in parallel, both methods may be called concurrently from
/// several threads.
///
/// Any closure `Fn(&str, Real)` is a callback that never cancels:
///
/// ```
/// # #[cfg(all(feature = "dim3", feature = "f32"))] {
/// use cleave3d::transformation::decomposition::ProgressCallback;
///
/// let callback = |stage: &str, fraction: f32| println!("{stage}: {fraction}");
/// callback.report_progress("SplittingMesh", 0.5);
/// assert!(!callback.is_cancelled());
/// # }
/// ```
pub trait ProgressCallback: Send + Sync {
    /// Reports that the decomposition reached `stage`, with an estimated completion in `[0, 1]`.
    fn report_progress(&self, stage: &str, fraction: Real);

    /// Returns `true` if the decomposition should stop as soon as possible.
    ///
    /// This is polled before each fragment is evaluated.
    fn is_cancelled(&self) -> bool {
        false
    }
}

impl<F> ProgressCallback for F
where
    F: Fn(&str, Real) + Send + Sync,
{
    fn report_progress(&self, stage: &str, fraction: Real) {
        self(stage, fraction)
    }
}
