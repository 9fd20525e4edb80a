//! Incremental all-pairs shortest paths.
//!
//! [`FloydWarshall`] keeps an `n x n` distance matrix for a directed graph that
//! only gains edges or has edge weights lowered. Edges are either recorded and
//! batched into one O(n^3) `solve()`, or folded into an up-to-date matrix in
//! O(n^2) each.

pub mod engine;
pub mod matrix;
pub mod state;
pub mod traits;

pub use engine::FloydWarshall;
pub use matrix::DistanceMatrix;
pub use state::MatrixState;
pub use traits::AllPairsSolver;
