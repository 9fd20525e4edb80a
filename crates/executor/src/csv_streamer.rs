use csv::{DeserializeRecordsIntoIter, ReaderBuilder, Trim};
use log::{info, warn};
use serde::Deserialize;
use std::fs::File;
use std::mem;
use std::path::PathBuf;
use tokio::sync::mpsc::Sender;

use super::error::Error;
use super::types::{Distance, EdgeBatch, UpdateStreamer};
use common::types::Edge;

/// One `from,to,weight` row. Other columns are ignored.
#[derive(Debug, Deserialize)]
struct EdgeRow {
    from: usize,
    to: usize,
    weight: Distance,
}

impl From<EdgeRow> for Edge<Distance> {
    fn from(row: EdgeRow) -> Self {
        (row.from, row.to, row.weight)
    }
}

/// Streams edge insertions read from a CSV file.
///
/// Rows are decoded lazily and a batch is sent as soon as it fills, so the
/// writer starts relaxing before the file is fully read. A malformed row
/// stops the stream; batches sent before it have already been applied.
pub struct CsvStreamer {
    path: PathBuf,
    batch_size: usize,
}

impl CsvStreamer {
    pub fn new(path: PathBuf, batch_size: usize) -> Self {
        CsvStreamer { path, batch_size }
    }

    fn open_rows(&self) -> Result<DeserializeRecordsIntoIter<File, EdgeRow>, Error> {
        let file = File::open(&self.path).map_err(|e| {
            warn!("Failed to read file {}: {:?}", self.path.display(), e);
            Error::IoError(e)
        })?;

        Ok(ReaderBuilder::new()
            .has_headers(true)
            .trim(Trim::All)
            .from_reader(file)
            .into_deserialize())
    }
}

#[async_trait::async_trait]
impl UpdateStreamer for CsvStreamer {
    async fn run_stream(self, sender: Sender<EdgeBatch>) -> Result<(), Error> {
        let rows = self.open_rows()?;
        let mut batch: EdgeBatch = Vec::with_capacity(self.batch_size);
        let mut edges_sent = 0;

        info!("CsvStreamer: streaming edges from {}", self.path.display());

        for row in rows {
            let row = row.map_err(|e| {
                warn!(
                    "CsvStreamer stopping after {} edges: bad row in {}: {}",
                    edges_sent,
                    self.path.display(),
                    e
                );
                Error::CsvError(e)
            })?;
            batch.push(row.into());

            if batch.len() == self.batch_size {
                edges_sent += batch.len();
                let full = mem::replace(&mut batch, Vec::with_capacity(self.batch_size));
                send_batch(&sender, full).await?;
            }
        }

        if !batch.is_empty() {
            edges_sent += batch.len();
            send_batch(&sender, batch).await?;
        }

        info!("CsvStreamer: Successfully transferred {} edges.", edges_sent);
        Ok(())
    }
}

async fn send_batch(sender: &Sender<EdgeBatch>, batch: EdgeBatch) -> Result<(), Error> {
    sender.send(batch).await.map_err(|e| {
        warn!(
            "CsvStreamer shutting down: Writer receiver dropped during send. Error: {}",
            e
        );
        Error::ChannelSendFailed
    })
}
