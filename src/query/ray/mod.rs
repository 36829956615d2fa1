//! Ray-casting related definitions and implementations.

pub use self::ray::Ray;
pub use self::ray_triangle::{ray_triangle_toi, RAY_TRIANGLE_PARALLEL_EPSILON};

mod ray;
mod ray_triangle;
