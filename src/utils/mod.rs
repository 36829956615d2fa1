//! Various unsorted geometrical and logical operators.

pub use self::best_fit_plane::best_fit_plane;
pub use self::center::{center, weighted_center};
pub use self::cleanup::remove_unused_points;
pub use self::cov::{center_cov, cov, weighted_center_cov};
pub use self::mesh_volume::{mesh_volume, origin_tetrahedron_det, signed_mesh_volume};
pub use self::symmetric_eigen3::{SymmetricEigen3, MAX_QL_ITERATIONS};

mod best_fit_plane;
mod center;
mod cleanup;
mod cov;
mod mesh_volume;
mod symmetric_eigen3;
