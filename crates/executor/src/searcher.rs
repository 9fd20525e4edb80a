use log::{info, warn};
use tokio::select;
use tokio::sync::watch;
use tokio::time::{self, Duration};

use super::{
    error::Error,
    types::{Distance, SharedEngine},
};
use apsp_core::{AllPairsSolver, DistanceMatrix};
use common::error::Error as EngineError;

/// Aggregate view of one consistent distance matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DistanceSummary {
    pub num_vertices: usize,
    /// Ordered pairs `(i, j)`, `i != j`, with `j` reachable from `i`.
    pub reachable_pairs: usize,
    /// Largest finite off-diagonal distance, if any pair is reachable.
    pub max_distance: Option<Distance>,
    /// When set, distances are not shortest distances.
    pub negative_cycle: bool,
}

impl DistanceSummary {
    pub fn from_matrix(matrix: &DistanceMatrix<Distance>, inf: Distance, negative_cycle: bool) -> Self {
        let finite = matrix.rows().enumerate().flat_map(|(i, row)| {
            row.iter()
                .enumerate()
                .filter(move |&(j, &d)| j != i && d < inf)
                .map(|(_, &d)| d)
        });

        let (reachable_pairs, max_distance) =
            finite.fold((0, None), |(count, max): (usize, Option<Distance>), d| {
                (count + 1, Some(max.map_or(d, |m| m.max(d))))
            });

        DistanceSummary {
            num_vertices: matrix.num_vertices(),
            reachable_pairs,
            max_distance,
            negative_cycle,
        }
    }

    /// Summarizes the engine's current matrix.
    ///
    /// # Errors
    /// Fails with `StaleMatrix` if the engine has unpropagated relaxations.
    pub fn capture<S: AllPairsSolver<Distance>>(engine: &S) -> Result<Self, EngineError> {
        Ok(Self::from_matrix(
            engine.dist()?,
            engine.inf(),
            engine.has_negative_cycle()?,
        ))
    }
}

/// Periodically reports on the shared distance matrix.
pub struct Searcher<S> {
    engine: SharedEngine<S>,
    interval: u64, // interval in seconds
    shutdown: watch::Receiver<()>,
}

impl<S> Searcher<S>
where
    S: AllPairsSolver<Distance> + Send + Sync + 'static,
{
    pub fn new(engine: SharedEngine<S>, interval: u64, shutdown: watch::Receiver<()>) -> Self {
        Searcher {
            engine,
            interval,
            shutdown,
        }
    }

    pub async fn report_periodically(mut self) -> Result<(), Error> {
        info!("Searcher ready.");

        let mut interval = time::interval(Duration::from_secs(self.interval));

        // The first tick occurs immediately, but we skip it to wait the full duration
        interval.tick().await;

        loop {
            select! {
                _ = interval.tick() => {}
                _ = self.shutdown.changed() => {
                    info!("Shutdown signal received, stopping searcher.");
                    return Ok(());
                }
            }

            // Summarize under the read lock; the writer waits at most one O(n^2) scan.
            let summary = {
                let engine_guard = self.engine.read().await;
                DistanceSummary::capture(&*engine_guard)
            };

            match summary {
                Ok(summary) if summary.negative_cycle => {
                    warn!("Negative cycle present; distances are not well-defined. {:?}", summary);
                }
                Ok(summary) => {
                    info!("{:?}", summary);
                }
                Err(e) => {
                    warn!("Searcher skipped a snapshot: {}. Continuing.", e);
                }
            }
        }
    }

    pub fn spawn_task(self) -> tokio::task::JoinHandle<Result<(), Error>> {
        tokio::spawn(self.report_periodically())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use apsp_core::FloydWarshall;
    use std::sync::Arc;
    use tokio::sync::RwLock;
    use tokio::time::timeout;

    const INF: Distance = 1_000;

    fn solved(n: usize, edges: &[(usize, usize, Distance)]) -> FloydWarshall<Distance> {
        let mut fw = FloydWarshall::with_infinity(n, INF).unwrap();
        for &(u, v, w) in edges {
            fw.add_edge(u, v, w).unwrap();
        }
        fw.solve();
        fw
    }

    #[test]
    fn summary_of_empty_graph() {
        let fw = solved(3, &[]);
        let summary = DistanceSummary::capture(&fw).unwrap();

        assert_eq!(
            summary,
            DistanceSummary {
                num_vertices: 3,
                reachable_pairs: 0,
                max_distance: None,
                negative_cycle: false,
            }
        );
    }

    #[test]
    fn summary_counts_reachable_pairs() {
        // 0 -> 1 -> 2: reachable (0,1), (1,2), (0,2).
        let fw = solved(3, &[(0, 1, 4), (1, 2, 6)]);
        let summary = DistanceSummary::capture(&fw).unwrap();

        assert_eq!(summary.reachable_pairs, 3);
        assert_eq!(summary.max_distance, Some(10));
        assert!(!summary.negative_cycle);
    }

    #[test]
    fn summary_flags_negative_cycle() {
        let fw = solved(3, &[(0, 1, 1), (1, 2, 1), (2, 0, -3)]);
        assert!(DistanceSummary::capture(&fw).unwrap().negative_cycle);
    }

    #[test]
    fn capture_fails_on_stale_engine() {
        let mut fw = solved(2, &[]);
        fw.add_edge(0, 1, 1).unwrap();
        assert!(DistanceSummary::capture(&fw).is_err());
    }

    #[tokio::test]
    async fn searcher_stops_on_shutdown_signal() {
        let shared = Arc::new(RwLock::new(solved(2, &[(0, 1, 1)])));
        let (shutdown_tx, shutdown_rx) = watch::channel(());

        let handle = Searcher::new(shared, 60, shutdown_rx).spawn_task();
        shutdown_tx.send(()).unwrap();

        let result = timeout(Duration::from_secs(1), handle)
            .await
            .expect("searcher did not stop")
            .expect("searcher panicked");
        assert!(result.is_ok());
    }
}
