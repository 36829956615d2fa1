//! Convex hull computation and convex decomposition of meshes.

pub use self::convex_hull3::{
    check_convex_hull, try_convex_hull, ConvexHullError, HullBuilder, QuickHullBuilder,
};

mod convex_hull3;
pub(crate) mod convex_hull_utils;
pub mod decomposition;

#[cfg(feature = "wavefront")]
mod wavefront;
