use std::hint::black_box;
use std::time::Instant;

use apsp_core::{AllPairsSolver, FloydWarshall};
use perf_bench::*;

fn main() {
    let edges = generate_benchmark_edges();
    let (base, late) = edges.split_at(NUM_EDGES - NUM_LATE_EDGES);

    let mut engine = FloydWarshall::with_infinity(NUM_VERTICES, INF).expect("valid engine");
    for &(u, v, w) in base {
        engine.add_edge(u, v, w).expect("valid edge");
    }
    engine.solve();

    let start_time = Instant::now();

    // Each late edge costs one O(n^2) pass over the already solved matrix.
    let mut improving = 0;
    for &(u, v, w) in late {
        if engine.add_edge_and_update(u, v, w).expect("valid edge") {
            improving += 1;
        }
    }

    let elapsed_time = start_time.elapsed();

    let final_checksum = black_box(checksum(engine.dist().expect("consistent matrix")));

    println!(
        "--- Incremental Benchmark Results ({} Vertices, {} Late Edges) ---",
        NUM_VERTICES, NUM_LATE_EDGES
    );
    println!("Improving Edges: {}", improving);
    println!("Checksum: {}", final_checksum);
    println!("Elapsed Time: {:?}", elapsed_time);
}
