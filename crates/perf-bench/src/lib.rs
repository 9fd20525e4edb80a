use apsp_core::DistanceMatrix;
use common::types::Edge;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

pub const NUM_VERTICES: usize = 300;
pub const NUM_EDGES: usize = 3_000;
/// Edges held back from the initial solve and folded in one at a time.
pub const NUM_LATE_EDGES: usize = 300;
pub const INF: i64 = 1 << 50;

/// Seed shared by both benchmark binaries so their runs stay comparable.
pub const SEED: u64 = 0x2545_F491_4F6C_DD1D;

/// Generates the benchmark edge set with weights in `1..=1000`.
pub fn generate_benchmark_edges() -> Vec<Edge<i64>> {
    generate_edges(SEED)
}

pub fn generate_edges(seed: u64) -> Vec<Edge<i64>> {
    let mut rng = SmallRng::seed_from_u64(seed);

    (0..NUM_EDGES)
        .map(|_| {
            let from = rng.random_range(0..NUM_VERTICES);
            let to = rng.random_range(0..NUM_VERTICES);
            let weight = rng.random_range(1..=1_000i64);
            (from, to, weight)
        })
        .collect()
}

/// Sum of all finite distances, so the solve cannot be optimized away.
pub fn checksum(matrix: &DistanceMatrix<i64>) -> i64 {
    matrix
        .rows()
        .flatten()
        .filter(|&&d| d < INF)
        .fold(0i64, |acc, &d| acc.wrapping_add(d))
}
