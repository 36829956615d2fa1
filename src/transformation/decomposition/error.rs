/// Errors preventing a convex decomposition from starting.
///
/// These are all detected before any fragment is processed. Failures happening on
/// individual fragments during the decomposition (like a hull that cannot be built) are
/// recovered from and never surface as errors.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum DecompositionError {
    /// The input mesh has no vertex or no triangle.
    #[error("The input mesh has no vertices or no triangles.")]
    EmptyMesh,

    /// A triangle references a vertex that does not exist.
    #[error("Triangle {triangle} references vertex {index}, but the mesh only has {num_vertices} vertices.")]
    IndexOutOfBounds {
        /// Index of the faulty triangle.
        triangle: usize,
        /// The out-of-bounds vertex index.
        index: u32,
        /// The number of vertices of the input mesh.
        num_vertices: usize,
    },

    /// A vertex has a NaN or infinite coordinate.
    #[error("Vertex {0} has a non-finite coordinate.")]
    NonFiniteVertex(usize),

    /// One of the decomposition parameters is out of its valid range.
    #[error("Invalid decomposition parameter `{name}`: {reason}")]
    InvalidParameter {
        /// The name of the parameter.
        name: &'static str,
        /// Why the value was rejected.
        reason: &'static str,
    },
}
