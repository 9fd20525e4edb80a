use log::info;
use tokio::sync::mpsc::Sender;

use super::types::{EdgeBatch, JoinHandleResult, UpdateStreamer};

pub struct Producer<S: UpdateStreamer> {
    streamer: S,
}

impl<S> Producer<S>
where
    S: UpdateStreamer,
{
    pub fn new(streamer: S) -> Self {
        Producer { streamer }
    }

    pub fn spawn(self, sender: Sender<EdgeBatch>) -> JoinHandleResult {
        info!("Producer ready.");
        tokio::spawn(async move { self.streamer.run_stream(sender).await })
    }
}
