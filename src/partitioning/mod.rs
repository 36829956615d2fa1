//! Spatial partitioning tools.

pub use self::vertex_index::VertexIndex;

mod vertex_index;
