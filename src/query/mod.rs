//! Geometric queries: ray casting and plane splitting.

pub use self::ray::{ray_triangle_toi, Ray, RAY_TRIANGLE_PARALLEL_EPSILON};
pub use self::split::{classify_triangle, split_fragment, TriangleSplit, SPLIT_EPSILON};

pub mod ray;
pub mod split;
