use thiserror::Error;

use super::types::GuardedOperation;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A guarded operation was attempted while deferred relaxations are still pending.
    #[error("Distance matrix is stale; call solve() before {0}.")]
    StaleMatrix(GuardedOperation),

    /// Indicates an attempt to access a vertex index that exceeds the graph size (N).
    #[error("Vertex index {vertex} is out of bounds for a graph of {num_vertices} vertices.")]
    VertexOutOfBounds { vertex: usize, num_vertices: usize },

    /// Edge weights must compare strictly below the infinity sentinel (NaN never does).
    #[error("Edge weight must be strictly below the infinity sentinel.")]
    WeightNotBelowInfinity,

    #[error("Infinity sentinel must be strictly positive.")]
    InvalidInfinity,

    #[error("A {0}x{0} distance matrix cannot be allocated.")]
    MatrixTooLarge(usize),
}
