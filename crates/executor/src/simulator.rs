use async_trait::async_trait;
use log::{debug, info};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::ops::RangeInclusive;
use tokio::sync::mpsc::Sender;
use tokio::time::{self, Duration};

use super::config::SimulatorConfig;
use super::error::Error;
use super::types::{Distance, EdgeBatch, UpdateStreamer};

/// Produces synthetic edge insertions for simulation purposes.
///
/// Generates batches of random directed edges with weights drawn from
/// `weight_range` and sends them over a Tokio bounded channel. Most of
/// them will not improve anything once the graph is dense; the writer
/// treats those as no-ops.
pub struct SimulatorStreamer {
    pub total_nodes: usize, // total vertices in the graph
    pub batch_size: usize,  // number of edges per batch
    pub interval_ms: u64,
    pub weight_range: RangeInclusive<Distance>,
    pub seed: Option<u64>,
}

impl SimulatorStreamer {
    pub fn new(total_nodes: usize, batch_size: usize, config: &SimulatorConfig) -> Self {
        SimulatorStreamer {
            total_nodes,
            batch_size,
            interval_ms: config.interval_ms,
            weight_range: config.min_weight..=config.max_weight,
            seed: config.seed,
        }
    }
}

#[async_trait]
impl UpdateStreamer for SimulatorStreamer {
    /// Runs the simulation asynchronously.
    ///
    /// Backpressure is handled naturally via awaiting on `sender.send()`.
    /// Exits once the receiver is dropped.
    async fn run_stream(self, sender: Sender<EdgeBatch>) -> Result<(), Error> {
        let mut interval = time::interval(Duration::from_millis(self.interval_ms));

        let mut rng: SmallRng = match self.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_os_rng(),
        };

        let node_range = 0..self.total_nodes;

        loop {
            interval.tick().await;

            let updates: EdgeBatch = (0..self.batch_size)
                .map(|_| {
                    let from = rng.random_range(node_range.clone());
                    let to = rng.random_range(node_range.clone());
                    let weight = rng.random_range(self.weight_range.clone());

                    (from, to, weight)
                })
                .collect();

            debug!("Simulator sent {} edges.", updates.len());
            if sender.send(updates).await.is_err() {
                info!("Simulator shutting down: Writer receiver dropped.");
                return Err(Error::ChannelSendFailed);
            }
        }
    }
}
