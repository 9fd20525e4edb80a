use log::{debug, info, warn};
use tokio::select;
use tokio::sync::mpsc::Receiver;
use tokio::sync::watch;

use super::error::Error;
use super::types::{Distance, EdgeBatch, JoinHandleResult, SharedEngine};
use apsp_core::AllPairsSolver;
use common::types::Edge;

/// How a batch was folded into the distance matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateMode {
    /// One O(n^2) pass per edge.
    Incremental,
    /// Deferred inserts followed by a single O(n^3) solve.
    FullSolve,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchOutcome {
    pub mode: UpdateMode,
    /// Edges that lowered their direct distance.
    pub improved: usize,
    /// Edges rejected by the engine (bad vertex, weight at or above the sentinel).
    pub rejected: usize,
}

/// Folds one batch into `engine`, leaving it consistent.
///
/// Batches of at least `rebuild_limit` edges (or any batch arriving at a stale
/// engine) are recorded without propagation and solved once; smaller batches
/// go through the incremental pass edge by edge. Rejected edges are logged and
/// skipped; they never abort the rest of the batch.
pub fn apply_batch<S>(engine: &mut S, batch: &[Edge<Distance>], rebuild_limit: usize) -> BatchOutcome
where
    S: AllPairsSolver<Distance>,
{
    let mode = if batch.len() >= rebuild_limit || !engine.state().is_consistent() {
        UpdateMode::FullSolve
    } else {
        UpdateMode::Incremental
    };

    let mut outcome = BatchOutcome {
        mode,
        improved: 0,
        rejected: 0,
    };

    for &(u, v, w) in batch {
        let result = match mode {
            UpdateMode::FullSolve => engine.add_edge(u, v, w),
            UpdateMode::Incremental => engine.add_edge_and_update(u, v, w),
        };

        match result {
            Ok(true) => outcome.improved += 1,
            Ok(false) => {}
            Err(e) => {
                warn!("Rejected edge ({u}, {v}, {w}): {e}");
                outcome.rejected += 1;
            }
        }
    }

    if mode == UpdateMode::FullSolve {
        engine.solve();
    }

    outcome
}

/// Async consumer that applies edge batches to the shared engine.
pub struct Writer<S> {
    engine: SharedEngine<S>,
    receiver: Receiver<EdgeBatch>,
    shutdown: watch::Receiver<()>, // signal for graceful shutdown
    rebuild_limit: usize,
}

impl<S> Writer<S>
where
    S: AllPairsSolver<Distance> + Send + Sync + 'static,
{
    pub fn new(
        engine: SharedEngine<S>,
        receiver: Receiver<EdgeBatch>,
        shutdown: watch::Receiver<()>,
        rebuild_limit: usize,
    ) -> Self {
        Self {
            engine,
            receiver,
            shutdown,
            rebuild_limit,
        }
    }

    /// Run the writer asynchronously.
    ///
    /// Holds the write lock for exactly one batch at a time.
    /// Exits gracefully when the receiver is closed or shutdown signal is received.
    pub async fn process_updates(mut self) -> Result<(), Error> {
        info!("Writer ready.");

        loop {
            select! {
                updates = self.receiver.recv() => {
                    match updates {
                        Some(updates) => {
                            let outcome = {
                                let mut engine_guard = self.engine.write().await;
                                apply_batch(&mut *engine_guard, &updates, self.rebuild_limit)
                            };
                            debug!(
                                "Applied {} edges via {:?}: {} improved, {} rejected",
                                updates.len(),
                                outcome.mode,
                                outcome.improved,
                                outcome.rejected
                            );
                        }
                        None => {
                            info!("Receiver closed, shutting down writer.");
                            break;
                        }
                    }
                }

                _ = self.shutdown.changed() => {
                    info!("Shutdown signal received, stopping writer.");
                    break;
                }
            }
        }

        Ok(())
    }

    /// Spawns the Writer task onto the Tokio runtime.
    pub fn spawn_task(self) -> JoinHandleResult {
        tokio::spawn(self.process_updates())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use apsp_core::{FloydWarshall, MatrixState};
    use std::sync::Arc;
    use tokio::sync::{RwLock, mpsc};
    use tokio::time::{Duration, timeout};

    fn engine(n: usize) -> FloydWarshall<Distance> {
        FloydWarshall::with_infinity(n, 1_000_000).unwrap()
    }

    #[test]
    fn small_batch_is_applied_incrementally() {
        let mut fw = engine(3);
        let outcome = apply_batch(&mut fw, &[(0, 1, 5), (1, 2, -2)], 3);

        assert_eq!(outcome.mode, UpdateMode::Incremental);
        assert_eq!(outcome.improved, 2);
        assert_eq!(fw.distance(0, 2), Ok(Some(3)));
    }

    #[test]
    fn large_batch_is_solved_once() {
        let mut fw = engine(3);
        let outcome = apply_batch(&mut fw, &[(0, 1, 5), (1, 2, -2), (0, 1, 9)], 3);

        assert_eq!(outcome.mode, UpdateMode::FullSolve);
        assert_eq!(outcome.improved, 2);
        assert_eq!(fw.state(), MatrixState::Consistent);
        assert_eq!(fw.distance(0, 2), Ok(Some(3)));
    }

    #[test]
    fn stale_engine_forces_full_solve() {
        let mut fw = engine(3);
        fw.add_edge(0, 1, 1).unwrap();

        let outcome = apply_batch(&mut fw, &[(1, 2, 1)], 10);
        assert_eq!(outcome.mode, UpdateMode::FullSolve);
        assert_eq!(fw.distance(0, 2), Ok(Some(2)));
    }

    #[test]
    fn rejected_edges_do_not_abort_the_batch() {
        let mut fw = engine(3);
        let outcome = apply_batch(&mut fw, &[(0, 7, 1), (0, 1, 2_000_000), (0, 1, 4)], 10);

        assert_eq!(outcome.rejected, 2);
        assert_eq!(outcome.improved, 1);
        assert_eq!(fw.distance(0, 1), Ok(Some(4)));
    }

    #[tokio::test]
    async fn writer_drains_channel_then_exits() {
        let shared = Arc::new(RwLock::new(engine(4)));
        let (tx, rx) = mpsc::channel(4);
        let (_shutdown_tx, shutdown_rx) = watch::channel(());

        let handle = Writer::new(shared.clone(), rx, shutdown_rx, 2).spawn_task();

        tx.send(vec![(0, 1, 1)]).await.unwrap();
        tx.send(vec![(1, 2, 1), (2, 3, 1)]).await.unwrap();
        drop(tx);

        timeout(Duration::from_secs(1), handle)
            .await
            .expect("writer did not stop")
            .expect("writer panicked")
            .expect("writer failed");

        let fw = shared.read().await;
        assert_eq!(fw.distance(0, 3), Ok(Some(3)));
    }

    #[tokio::test]
    async fn writer_stops_on_shutdown_signal() {
        let shared = Arc::new(RwLock::new(engine(2)));
        let (_tx, rx) = mpsc::channel::<EdgeBatch>(1);
        let (shutdown_tx, shutdown_rx) = watch::channel(());

        let handle = Writer::new(shared, rx, shutdown_rx, 2).spawn_task();
        shutdown_tx.send(()).unwrap();

        let result = timeout(Duration::from_secs(1), handle)
            .await
            .expect("writer did not stop");
        assert!(result.is_ok());
    }
}
