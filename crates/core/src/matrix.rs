use std::ops::Index;

use common::error::Error;
use common::numeric_kernel::Weight;

/// Dense `n x n` distance matrix stored row-major in one contiguous buffer.
///
/// - `cells[i * n + j]` -> current best distance from `i` to `j`
///
/// Callers only ever get a shared reference; all writes go through the engine.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix<W> {
    num_vertices: usize,
    cells: Vec<W>,
}

impl<W: Weight> DistanceMatrix<W> {
    /// Builds the matrix of an edgeless graph: `0` on the diagonal, `inf` elsewhere.
    ///
    /// # Errors
    /// Returns `Error::MatrixTooLarge` if `num_vertices^2` overflows `usize`.
    pub(crate) fn new(num_vertices: usize, inf: W) -> Result<Self, Error> {
        let len = num_vertices
            .checked_mul(num_vertices)
            .ok_or(Error::MatrixTooLarge(num_vertices))?;

        let mut cells = vec![inf; len];
        for i in 0..num_vertices {
            cells[i * num_vertices + i] = W::ZERO;
        }

        Ok(Self {
            num_vertices,
            cells,
        })
    }

    pub fn num_vertices(&self) -> usize {
        self.num_vertices
    }

    /// Bounds-checked lookup of `D[i][j]`.
    pub fn get(&self, i: usize, j: usize) -> Option<W> {
        if i >= self.num_vertices || j >= self.num_vertices {
            return None;
        }
        Some(self.cells[i * self.num_vertices + j])
    }

    /// Distances from `i` to every vertex.
    ///
    /// # Panics
    /// Panics if `i` is out of bounds, like slice indexing.
    pub fn row(&self, i: usize) -> &[W] {
        let start = i * self.num_vertices;
        &self.cells[start..start + self.num_vertices]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[W]> {
        // chunks_exact(0) panics; an empty buffer yields no rows either way.
        self.cells.chunks_exact(self.num_vertices.max(1))
    }

    pub fn diagonal(&self) -> impl Iterator<Item = W> + '_ {
        (0..self.num_vertices).map(move |i| self.cells[i * self.num_vertices + i])
    }

    /// Owned copy as nested rows.
    pub fn to_rows(&self) -> Vec<Vec<W>> {
        self.rows().map(<[W]>::to_vec).collect()
    }

    pub(crate) fn set(&mut self, i: usize, j: usize, value: W) {
        self.cells[i * self.num_vertices + j] = value;
    }

    pub(crate) fn row_mut(&mut self, i: usize) -> &mut [W] {
        let start = i * self.num_vertices;
        &mut self.cells[start..start + self.num_vertices]
    }

    /// Copies column `j` into `out` (distances from every vertex into `j`).
    pub(crate) fn copy_column_into(&self, j: usize, out: &mut Vec<W>) {
        out.clear();
        out.extend(self.rows().map(|row| row[j]));
    }
}

impl<W: Weight> Index<(usize, usize)> for DistanceMatrix<W> {
    type Output = W;

    fn index(&self, (i, j): (usize, usize)) -> &W {
        assert!(
            i < self.num_vertices && j < self.num_vertices,
            "index ({i}, {j}) out of bounds for a {n}x{n} distance matrix",
            n = self.num_vertices
        );
        &self.cells[i * self.num_vertices + j]
    }
}
