//! Broadcaster abstraction for publishing frames to renderers
//!
//! Current implementation uses an in-memory tokio broadcast channel.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::sync::broadcast::{self, error::RecvError};
use tracing::{debug, warn};

use crate::config::BROADCAST_CAPACITY;
use crate::protocol::Frame;

/// Receiver type for broadcast frames
pub type FrameReceiver = broadcast::Receiver<Arc<Frame>>;

/// Trait for delivering frames to every subscribed renderer
#[async_trait]
pub trait Broadcaster: Send + Sync {
    /// Subscribe to receive frames
    fn subscribe(&self) -> FrameReceiver;

    /// Send a frame to all subscribers
    async fn send(&self, frame: Frame);

    /// Get the number of active subscribers
    fn subscriber_count(&self) -> usize;
}

/// In-memory broadcaster using tokio broadcast channel
pub struct InMemoryBroadcaster {
    tx: broadcast::Sender<Arc<Frame>>,
}

impl InMemoryBroadcaster {
    /// Create a new in-memory broadcaster
    pub fn new() -> Self {
        Self::with_capacity(BROADCAST_CAPACITY)
    }

    /// Create with custom capacity
    pub fn with_capacity(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }
}

impl Default for InMemoryBroadcaster {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Broadcaster for InMemoryBroadcaster {
    fn subscribe(&self) -> FrameReceiver {
        self.tx.subscribe()
    }

    async fn send(&self, frame: Frame) {
        // send() returns error if there are no receivers, which is fine
        if let Err(e) = self.tx.send(Arc::new(frame)) {
            debug!("Frame dropped (no receivers): {}", e);
        }
    }

    fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

/// Write every received frame to `out` as one JSON line.
///
/// Returns the number of frames written once the channel closes. A failed
/// write or flush stops the printer and is returned to the caller.
pub async fn write_frames<W>(mut frames: FrameReceiver, mut out: W) -> std::io::Result<u64>
where
    W: AsyncWrite + Unpin,
{
    let mut written = 0;
    loop {
        match frames.recv().await {
            Ok(frame) => {
                let line = format!("{}\n", frame.to_json());
                out.write_all(line.as_bytes()).await?;
                out.flush().await?;
                written += 1;
            }
            Err(RecvError::Lagged(n)) => warn!("Frame printer lagged by {} frames", n),
            Err(RecvError::Closed) => return Ok(written),
        }
    }
}
