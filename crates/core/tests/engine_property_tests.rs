use apsp_core::{AllPairsSolver, FloydWarshall, MatrixState};
use proptest::prelude::*;
use proptest::strategy::Strategy;

type Edge = (usize, usize, i64);

const NUM_NODES_STRATEGY: std::ops::Range<usize> = 1usize..9;

/// Arbitrary digraph (self-loops and parallel edges included) with non-negative weights.
fn non_negative_graph_strategy() -> impl Strategy<Value = (usize, Vec<Edge>)> {
    NUM_NODES_STRATEGY.prop_flat_map(|num_nodes| {
        let edge_generator = (0usize..num_nodes, 0usize..num_nodes, 0i64..100);
        let edges_generator = prop::collection::vec(edge_generator, 0..40);

        (Just(num_nodes), edges_generator)
    })
}

/// DAG (edges only go from lower to higher index, plus non-negative self-loops)
/// with weights of either sign.
fn dag_strategy() -> impl Strategy<Value = (usize, Vec<Edge>)> {
    NUM_NODES_STRATEGY.prop_flat_map(|num_nodes| {
        let edge_generator = (0usize..num_nodes, 0usize..num_nodes, -50i64..50).prop_map(|(u, v, w)| {
            if u == v {
                // Self-loops must stay non-negative to keep the graph free of negative cycles.
                (u, v, w.abs())
            } else {
                (u.min(v), u.max(v), w)
            }
        });
        let edges_generator = prop::collection::vec(edge_generator, 0..40);

        (Just(num_nodes), edges_generator)
    })
}

/// Graphs without negative cycles.
fn acyclic_negative_strategy() -> impl Strategy<Value = (usize, Vec<Edge>)> {
    prop_oneof![non_negative_graph_strategy(), dag_strategy()]
}

/// Reference answer: Bellman-Ford from every source. `None` marks unreachable.
fn brute_force(num_nodes: usize, edges: &[Edge]) -> Vec<Vec<Option<i64>>> {
    (0..num_nodes)
        .map(|source| {
            let mut dist: Vec<Option<i64>> = vec![None; num_nodes];
            dist[source] = Some(0);
            for _ in 0..num_nodes {
                for &(u, v, w) in edges {
                    if let Some(du) = dist[u] {
                        if dist[v].is_none_or(|dv| du + w < dv) {
                            dist[v] = Some(du + w);
                        }
                    }
                }
            }
            dist
        })
        .collect()
}

fn solved(num_nodes: usize, edges: &[Edge]) -> FloydWarshall<i64> {
    let mut fw = FloydWarshall::new(num_nodes).unwrap();
    for &(u, v, w) in edges {
        fw.add_edge(u, v, w).unwrap();
    }
    fw.solve();
    fw
}

fn as_options(fw: &FloydWarshall<i64>) -> Vec<Vec<Option<i64>>> {
    let n = fw.num_vertices();
    (0..n)
        .map(|u| (0..n).map(|v| fw.distance(u, v).unwrap()).collect())
        .collect()
}

proptest! {
    /// Property: solve() agrees with per-source Bellman-Ford on every pair
    #[test]
    fn solve_matches_brute_force((num_nodes, edges) in acyclic_negative_strategy()) {
        let fw = solved(num_nodes, &edges);

        prop_assert!(!fw.has_negative_cycle().unwrap());
        prop_assert_eq!(as_options(&fw), brute_force(num_nodes, &edges));
    }

    /// Property: one incremental insert equals a deferred insert followed by solve()
    #[test]
    fn incremental_insert_matches_full_solve(
        (num_nodes, edges) in non_negative_graph_strategy(),
        extra in (0usize..8, 0usize..8, -3i64..100),
    ) {
        let (u, v, w) = (extra.0 % num_nodes, extra.1 % num_nodes, extra.2);
        let base = solved(num_nodes, &edges);

        let mut deferred = base.clone();
        deferred.add_edge(u, v, w).unwrap();
        deferred.solve();
        // A negative edge closing a cycle leaves distances ill-defined.
        prop_assume!(!deferred.has_negative_cycle().unwrap());

        let mut incremental = base;
        incremental.add_edge_and_update(u, v, w).unwrap();

        prop_assert_eq!(incremental.state(), MatrixState::Consistent);
        prop_assert_eq!(incremental.dist().unwrap(), deferred.dist().unwrap());
    }

    /// Property: folding every edge in incrementally from the empty graph equals one batch solve
    #[test]
    fn incremental_build_matches_batch_solve((num_nodes, edges) in acyclic_negative_strategy()) {
        let mut incremental = FloydWarshall::<i64>::new(num_nodes).unwrap();
        for &(u, v, w) in &edges {
            incremental.add_edge_and_update(u, v, w).unwrap();
        }

        let batch = solved(num_nodes, &edges);
        prop_assert_eq!(incremental.dist().unwrap(), batch.dist().unwrap());
    }

    /// Property: a second solve() is a no-op on an already consistent matrix
    #[test]
    fn solve_is_idempotent((num_nodes, edges) in acyclic_negative_strategy()) {
        let mut fw = solved(num_nodes, &edges);
        let first = fw.dist().unwrap().clone();

        prop_assert_eq!(fw.state(), MatrixState::Consistent);
        prop_assert_eq!(fw.solve(), &first);
        prop_assert_eq!(fw.state(), MatrixState::Consistent);
    }

    /// Property: an edge no shorter than the current direct distance changes nothing
    #[test]
    fn non_improving_edge_is_noop(
        (num_nodes, edges) in non_negative_graph_strategy(),
        pick in (0usize..8, 0usize..8, 0i64..50),
        incremental in any::<bool>(),
    ) {
        let (u, v, slack) = (pick.0 % num_nodes, pick.1 % num_nodes, pick.2);
        let mut fw = solved(num_nodes, &edges);
        let before = fw.dist().unwrap().clone();

        let current = fw.distance(u, v).unwrap();
        prop_assume!(current.is_some());
        let w = current.unwrap() + slack;

        let improved = if incremental {
            fw.add_edge_and_update(u, v, w).unwrap()
        } else {
            fw.add_edge(u, v, w).unwrap()
        };

        prop_assert!(!improved);
        prop_assert_eq!(fw.state(), MatrixState::Consistent);
        prop_assert_eq!(fw.dist().unwrap(), &before);
    }

    /// Property: without negative cycles every self-distance stays 0
    #[test]
    fn diagonal_stays_zero((num_nodes, edges) in acyclic_negative_strategy()) {
        let fw = solved(num_nodes, &edges);
        prop_assert!(fw.dist().unwrap().diagonal().all(|d| d == 0));
    }

    /// Property: a ring whose weights sum below zero is always reported
    #[test]
    fn negative_ring_is_detected(len in 1usize..8, weights in prop::collection::vec(-20i64..20, 8)) {
        let mut ring: Vec<Edge> = (0..len).map(|i| (i, (i + 1) % len, weights[i])).collect();
        let total: i64 = ring.iter().map(|e| e.2).sum();
        // Push the closing edge down until the ring is strictly negative.
        ring[len - 1].2 -= total.max(0) + 1;

        let fw = solved(len, &ring);
        prop_assert!(fw.has_negative_cycle().unwrap());
    }
}
