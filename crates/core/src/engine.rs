use log::{debug, trace};

use super::matrix::DistanceMatrix;
use super::state::MatrixState;
use super::traits::AllPairsSolver;
use common::{
    error::Error,
    numeric_kernel::{Weight, relax},
    types::GuardedOperation,
};

/// Floyd-Warshall all-pairs shortest paths for a weighted directed graph that
/// only ever gains edges or lowers edge weights.
///
/// Edges can be folded in two ways:
/// - `add_edge` records the direct distance in O(1) and leaves the matrix stale;
///   a later `solve()` recomputes everything in O(n^3).
/// - `add_edge_and_update` keeps an up-to-date matrix up to date in O(n^2).
///
/// While the matrix is stale, reading it, checking for negative cycles and
/// incremental updates all fail with `Error::StaleMatrix`.
///
/// Memory: O(n^2), fixed at construction.
#[derive(Debug, Clone)]
pub struct FloydWarshall<W: Weight> {
    num_vertices: usize,
    inf: W,
    dist: DistanceMatrix<W>,
    state: MatrixState,
}

impl<W: Weight> FloydWarshall<W> {
    /// Creates an engine for `num_vertices` vertices using `W::INFINITY` as the sentinel.
    pub fn new(num_vertices: usize) -> Result<Self, Error> {
        Self::with_infinity(num_vertices, W::INFINITY)
    }

    /// Creates an engine with a caller-chosen unreachable sentinel.
    ///
    /// A finite `inf` must be strictly larger than any reachable shortest-path
    /// distance, including intermediate sums. The engine does not verify this.
    ///
    /// # Errors
    /// - `Error::InvalidInfinity` if `inf` is not strictly positive.
    /// - `Error::MatrixTooLarge` if the `n x n` matrix cannot be sized.
    pub fn with_infinity(num_vertices: usize, inf: W) -> Result<Self, Error> {
        if !(inf > W::ZERO) {
            return Err(Error::InvalidInfinity);
        }

        Ok(Self {
            num_vertices,
            inf,
            dist: DistanceMatrix::new(num_vertices, inf)?,
            state: MatrixState::Consistent,
        })
    }

    /// Distance from `u` to `v`, or `None` if `v` is unreachable from `u`.
    ///
    /// # Errors
    /// `Error::StaleMatrix` if the matrix is stale, `Error::VertexOutOfBounds`
    /// for a bad index.
    pub fn distance(&self, u: usize, v: usize) -> Result<Option<W>, Error> {
        let dist = self.dist()?;
        self.check_vertex(u)?;
        self.check_vertex(v)?;

        let d = dist[(u, v)];
        Ok(if d >= self.inf { None } else { Some(d) })
    }

    fn check_vertex(&self, vertex: usize) -> Result<(), Error> {
        if vertex >= self.num_vertices {
            return Err(Error::VertexOutOfBounds {
                vertex,
                num_vertices: self.num_vertices,
            });
        }
        Ok(())
    }

    /// Validates an insertion and reports whether it would improve `D[u][v]`.
    ///
    /// Nothing is mutated here, so a failed call leaves the engine untouched.
    fn check_edge(
        &self,
        u: usize,
        v: usize,
        weight: W,
        update_dists: bool,
    ) -> Result<bool, Error> {
        self.check_vertex(u)?;
        self.check_vertex(v)?;

        if !(weight < self.inf) {
            return Err(Error::WeightNotBelowInfinity);
        }

        if update_dists {
            self.state
                .ensure_consistent(GuardedOperation::IncrementalUpdate)?;
        }

        Ok(weight < self.dist[(u, v)])
    }

    /// One O(n^2) sweep routing every pair through the new edge `u -> v`.
    ///
    /// `D[i][u]` and `D[v][j]` are taken from the matrix as it was before the
    /// edge arrived. On a consistent matrix the only new shortest paths are
    /// those that use the edge exactly once, so a single sweep suffices.
    fn propagate(&mut self, u: usize, v: usize, weight: W) {
        let inf = self.inf;

        let mut into_u = Vec::with_capacity(self.num_vertices);
        self.dist.copy_column_into(u, &mut into_u);
        let from_v = self.dist.row(v).to_vec();

        self.dist.set(u, v, weight);

        let mut improved = 0usize;
        for (i, &d_iu) in into_u.iter().enumerate() {
            if d_iu >= inf {
                continue;
            }
            let through = d_iu.saturating_sum(weight, inf);
            if through >= inf {
                continue;
            }

            for (cell, &d_vj) in self.dist.row_mut(i).iter_mut().zip(&from_v) {
                if d_vj >= inf {
                    continue;
                }
                if relax(cell, through.saturating_sum(d_vj, inf)) {
                    improved += 1;
                }
            }
        }

        trace!("Incremental pass for {u} -> {v} lowered {improved} entries");
    }
}

impl<W: Weight> AllPairsSolver<W> for FloydWarshall<W> {
    fn num_vertices(&self) -> usize {
        self.num_vertices
    }

    fn inf(&self) -> W {
        self.inf
    }

    fn state(&self) -> MatrixState {
        self.state
    }

    /// O(1). Parallel edges collapse to the minimum weight seen.
    fn add_edge(&mut self, u: usize, v: usize, weight: W) -> Result<bool, Error> {
        if !self.check_edge(u, v, weight, false)? {
            return Ok(false);
        }

        self.dist.set(u, v, weight);
        self.state.mark_inconsistent();
        Ok(true)
    }

    /// O(n^2). A non-improving edge is a no-op.
    fn add_edge_and_update(&mut self, u: usize, v: usize, weight: W) -> Result<bool, Error> {
        if !self.check_edge(u, v, weight, true)? {
            return Ok(false);
        }

        self.propagate(u, v, weight);
        Ok(true)
    }

    /// Computes APSP distances with Floyd-Warshall in O(n^3).
    ///
    /// Returns immediately when the matrix is already up to date. The loop
    /// order is fixed: intermediate `k` outermost, then source `i`, then
    /// destination `j`.
    fn solve(&mut self) -> &DistanceMatrix<W> {
        if self.state.is_consistent() {
            return &self.dist;
        }

        let n = self.num_vertices;
        let inf = self.inf;
        debug!("Solving {n}x{n} distance matrix");

        let mut pivot_row = vec![inf; n];
        for k in 0..n {
            pivot_row.copy_from_slice(self.dist.row(k));

            for i in 0..n {
                let d_ik = self.dist[(i, k)];
                if d_ik >= inf {
                    continue;
                }

                for (cell, &d_kj) in self.dist.row_mut(i).iter_mut().zip(&pivot_row) {
                    if d_kj >= inf {
                        continue;
                    }
                    relax(cell, d_ik.saturating_sum(d_kj, inf));
                }
            }
        }

        self.state.mark_consistent();
        debug!("Distance matrix is up to date");
        &self.dist
    }

    fn dist(&self) -> Result<&DistanceMatrix<W>, Error> {
        self.state
            .ensure_consistent(GuardedOperation::ReadDistances)?;
        Ok(&self.dist)
    }

    /// A negative self-distance in a relaxed matrix can only come from a closed
    /// walk of negative total weight. O(n).
    fn has_negative_cycle(&self) -> Result<bool, Error> {
        self.state
            .ensure_consistent(GuardedOperation::NegativeCycleCheck)?;
        Ok(self.dist.diagonal().any(|d| d < W::ZERO))
    }
}
