use super::matrix::DistanceMatrix;
use super::state::MatrixState;
use common::{error::Error, numeric_kernel::Weight};

/// Trait for engines that maintain all-pairs shortest-path distances under
/// monotone relaxation (edge insertion / weight decrease only).
pub trait AllPairsSolver<W: Weight> {
    fn num_vertices(&self) -> usize;

    /// The unreachable sentinel.
    fn inf(&self) -> W;

    fn state(&self) -> MatrixState;

    /// Records `u -> v` with `weight` without propagating it.
    ///
    /// Returns `Ok(true)` if the direct distance improved, which leaves the
    /// matrix stale until the next `solve()`. `Ok(false)` means a no-op.
    fn add_edge(&mut self, u: usize, v: usize, weight: W) -> Result<bool, Error>;

    /// Records `u -> v` with `weight` and propagates it to every pair.
    ///
    /// Requires a consistent matrix; the matrix stays consistent afterwards.
    fn add_edge_and_update(&mut self, u: usize, v: usize, weight: W) -> Result<bool, Error>;

    /// Brings the matrix up to date and returns it.
    fn solve(&mut self) -> &DistanceMatrix<W>;

    /// Returns the matrix, or `Err` if it is stale.
    fn dist(&self) -> Result<&DistanceMatrix<W>, Error>;

    /// Returns `Ok(true)` if a negative cycle exists, or `Err` if the matrix is stale.
    fn has_negative_cycle(&self) -> Result<bool, Error>;
}
