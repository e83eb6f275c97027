use crate::Result;
use futures::Stream;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::sync::mpsc;

/// Chunks buffered between the model producer and the HTTP consumer
const CHANNEL_CAPACITY: usize = 32;

/// Producer half of a chunk channel
#[derive(Debug, Clone)]
pub struct ChunkSender {
    tx: mpsc::Sender<Result<String>>,
}

impl ChunkSender {
    /// Push one text increment. Returns `false` once the consumer is gone,
    /// at which point the producer should stop reading upstream.
    pub async fn send(&self, chunk: String) -> bool {
        self.tx.send(Ok(chunk)).await.is_ok()
    }

    /// Report a failure to the consumer; the stream ends after it
    pub async fn fail(&self, err: crate::Error) {
        let _ = self.tx.send(Err(err)).await;
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

/// Consumer half: text increments in arrival order.
///
/// Dropping the stream closes the channel, which stops the producer.
#[derive(Debug)]
pub struct ChunkStream {
    rx: mpsc::Receiver<Result<String>>,
}

impl ChunkStream {
    pub fn channel() -> (ChunkSender, ChunkStream) {
        let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);
        (ChunkSender { tx }, ChunkStream { rx })
    }

    /// Stream over a fixed set of chunks
    pub fn from_chunks(chunks: Vec<String>) -> ChunkStream {
        let (tx, rx) = mpsc::channel(chunks.len().max(1));
        for chunk in chunks {
            let _ = tx.try_send(Ok(chunk));
        }
        ChunkStream { rx }
    }

    /// Drain the stream into one string, stopping at the first error
    pub async fn collect_text(mut self) -> Result<String> {
        let mut text = String::new();
        while let Some(chunk) = self.rx.recv().await {
            text.push_str(&chunk?);
        }
        Ok(text)
    }
}

impl Stream for ChunkStream {
    type Item = Result<String>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.rx.poll_recv(cx)
    }
}
