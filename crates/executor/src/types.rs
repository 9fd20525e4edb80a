use std::path::PathBuf;
use std::sync::Arc;

use clap::Subcommand;
use tokio::sync::RwLock;
use tokio::sync::mpsc::Sender;
use tokio::task::JoinHandle;

use super::error::Error;
use common::types::Edge;

/// Distance type the pipeline runs the engine with.
pub type Distance = i64;

/// A batch of edge insertions travelling from a producer to the writer.
pub type EdgeBatch = Vec<Edge<Distance>>;

/// Engine shared between the single writer and the read-only searcher.
pub type SharedEngine<S> = Arc<RwLock<S>>;

pub type JoinHandleResult = JoinHandle<Result<(), Error>>;

/// A trait defining the contract for any source that generates and streams edge
/// insertions into the main processing pipeline.
///
/// The trait bounds (`Send`, `Sync`, `'static`) let implementations run on the
/// multi-threaded Tokio runtime.
#[async_trait::async_trait]
pub trait UpdateStreamer: Send + Sync + 'static {
    async fn run_stream(self, sender: Sender<EdgeBatch>) -> Result<(), Error>;
}

/// Where edge insertions come from.
#[derive(Debug, Clone, Subcommand)]
pub enum DataSource {
    /// Stream random edges forever (until Ctrl-C).
    Sim,
    /// Stream edges from a CSV file with `from,to,weight` columns.
    Csv { path: PathBuf },
}
