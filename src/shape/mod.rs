//! Shapes manipulated by the convex decomposition.

pub use self::convex_hull::ConvexHull;
pub use self::mesh_fragment::{MeshFragment, COPLANAR_NORMAL_EPSILON, COPLANAR_OFFSET_EPSILON};
pub use self::plane::{Plane, PlaneSide};
pub use self::triangle::Triangle;

mod convex_hull;
mod mesh_fragment;
mod plane;
mod triangle;
