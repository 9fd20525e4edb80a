pub mod config;
pub mod csv_streamer;
pub mod error;
pub mod producer;
pub mod report;
pub mod searcher;
pub mod simulator;
pub mod types;
pub mod writer;

use clap::Parser;
use log::{error, info, warn};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::{RwLock, mpsc, mpsc::Sender, watch};

use apsp_core::{AllPairsSolver, FloydWarshall};
use csv_streamer::CsvStreamer;
use error::Error;
use producer::Producer;
use searcher::{DistanceSummary, Searcher};
use simulator::SimulatorStreamer;
use types::{DataSource, Distance, EdgeBatch, JoinHandleResult};
use writer::Writer;

/// Streams edge insertions into an incremental all-pairs shortest-path engine.
#[derive(Debug, Parser)]
#[command(name = "executor", version)]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(long, default_value = "crates/executor/Config.toml")]
    config: PathBuf,

    /// Write the final reachable distances as CSV to this path.
    #[arg(long)]
    output: Option<PathBuf>,

    #[command(subcommand)]
    source: DataSource,
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Stderr)
        .init();

    if let Err(e) = run().await {
        error!("Pipeline failed: {e}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Error> {
    let cli = Cli::parse();
    let config = config::load_config(&cli.config)?;

    let engine = FloydWarshall::<Distance>::with_infinity(
        config.engine.num_vertices,
        config.engine.infinity,
    )?;
    let shared_engine = Arc::new(RwLock::new(engine));

    let (sender, receiver) = mpsc::channel::<EdgeBatch>(config.producer.channel_capacity);
    let (shutdown_tx, shutdown_rx) = watch::channel(());

    // Spawn tasks
    let producer_handle = spawn_producer(&cli.source, sender, &config);
    let mut writer_handle = Writer::new(
        shared_engine.clone(),
        receiver,
        shutdown_rx.clone(),
        config.writer.rebuild_limit,
    )
    .spawn_task();
    let searcher_handle = Searcher::new(
        shared_engine.clone(),
        config.searcher.interval_seconds,
        shutdown_rx,
    )
    .spawn_task();

    // The writer finishes on its own once a finite source is drained.
    let writer_result = tokio::select! {
        result = &mut writer_handle => result,
        _ = tokio::signal::ctrl_c() => {
            info!("Ctrl-C received, shutting down pipeline.");
            let _ = shutdown_tx.send(());
            (&mut writer_handle).await
        }
    };
    let _ = shutdown_tx.send(());

    writer_result??;
    searcher_handle.await??;

    producer_handle.abort();
    match producer_handle.await {
        // The writer hung up first; expected for the endless simulator.
        Ok(Err(Error::ChannelSendFailed)) | Ok(Ok(())) => {}
        Ok(Err(e)) => return Err(e),
        Err(e) if e.is_panic() => return Err(e.into()),
        Err(_) => {}
    }

    let engine = shared_engine.read().await;
    let summary = DistanceSummary::capture(&*engine)?;
    if summary.negative_cycle {
        warn!("Final matrix contains a negative cycle; distances are not well-defined.");
    }
    info!("Final {:?}", summary);

    if let Some(path) = &cli.output {
        let rows = report::write_report_file(path, engine.dist()?, engine.inf())?;
        info!("Wrote {} reachable pairs to {}", rows, path.display());
    }

    info!("Pipeline shut down.");
    Ok(())
}

pub fn spawn_producer(
    source: &DataSource,
    sender: Sender<EdgeBatch>,
    config: &config::Config,
) -> JoinHandleResult {
    match source {
        DataSource::Sim => {
            info!("Starting SimulatorStreamer producer task...");
            let streamer = SimulatorStreamer::new(
                config.engine.num_vertices,
                config.producer.batch_size,
                &config.simulator,
            );
            Producer::new(streamer).spawn(sender)
        }
        DataSource::Csv { path } => {
            info!("Starting CsvStreamer producer task...");
            let streamer = CsvStreamer::new(path.clone(), config.producer.batch_size);
            Producer::new(streamer).spawn(sender)
        }
    }
}
