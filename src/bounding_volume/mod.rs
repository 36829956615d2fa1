//! Bounding volumes.

pub use self::obb::{compute_split_plane, plane_frame, Obb, BRUTE_FORCE_ANGLE_STEP};

mod obb;
