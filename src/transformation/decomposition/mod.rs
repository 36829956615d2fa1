//! Recursive approximate convex decomposition of triangle meshes.
//!
//! The input mesh is recursively cut in two halves by planes fitted to the oriented
//! bounding box of its convex hull. Recursion on a piece stops once it is close enough to
//! its own convex hull, or once it is too small or too deep in the recursion. The convex
//! hulls of the final pieces make up the decomposition, and are optionally merged down to
//! a hull budget.
//!
//! Use [`decompose`] for the common case, or a [`Decomposer`] to replace the hull
//! builder, the hull merger, or to track the allocated buffers.

pub use self::alloc_tracking::{AllocationTracker, CountingAllocationTracker, NoAllocationTracking};
pub use self::callback::{
    ProgressCallback, STAGE_HULL_CONSTRUCTION_FAILED, STAGE_MERGING_HULLS, STAGE_SPLITTING_MESH,
};
pub use self::collector::{AcceptReason, AcceptedHull, ConvexDecomposition, DecompositionStats};
pub use self::concavity::{concavity_volume, projected_volume};
pub use self::decomposer::{decompose, Decomposer};
pub use self::error::DecompositionError;
pub use self::merge::{GreedyHullMerger, HullMerger};
pub use self::parameters::{DecompositionParameters, MAX_DECOMPOSITION_DEPTH};

mod alloc_tracking;
mod callback;
mod collector;
pub mod concavity;
mod decomposer;
mod error;
mod merge;
mod parameters;
