//! Cutting mesh fragments with planes.

pub use self::split_fragment::{
    classify_triangle, split_fragment, ClippedPolygon, TriangleSplit, SPLIT_EPSILON,
};

mod split_fragment;
