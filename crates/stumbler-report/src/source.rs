//! Source ports and the broadcast-backed adapter.

use futures::stream::{self, BoxStream, StreamExt};
use tokio::sync::broadcast;
use tracing::warn;

/// Port abstracting a raw sensor feed.
///
/// A source produces a lazy, effectively infinite sequence of `T`
/// while subscribed and may be resubscribed any number of times; no
/// state persists across subscriptions. The stream ending means the
/// producer terminated: the pipeline does not retry.
///
/// Device feeds are instantiated at `Vec<_>` batches (one scan result
/// per element); location and pressure feeds at single samples.
pub trait SampleSource<T>: Send + Sync {
    /// Open a new subscription to the feed.
    fn subscribe(&self) -> BoxStream<'static, T>;
}

/// A [`SampleSource`] fed by pushing values into a broadcast channel.
///
/// The bridge between platform callback APIs and the pipeline's pull
/// model: the acquisition side calls [`publish`](Self::publish) from
/// wherever the OS delivers data, and every live subscription sees
/// each value. A subscriber that falls more than the channel capacity
/// behind skips the missed values and keeps going.
pub struct BroadcastSource<T> {
    tx: broadcast::Sender<T>,
}

impl<T: Clone + Send + 'static> BroadcastSource<T> {
    /// Create a source with the given per-subscriber buffer capacity.
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Publish a value to all current subscribers.
    ///
    /// Values published while nobody is subscribed are dropped, which
    /// matches the port contract: an unsubscribed feed produces
    /// nothing.
    pub fn publish(&self, value: T) {
        let _ = self.tx.send(value);
    }

    /// Number of currently open subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl<T: Clone + Send + 'static> SampleSource<T> for BroadcastSource<T> {
    fn subscribe(&self) -> BoxStream<'static, T> {
        let rx = self.tx.subscribe();
        stream::unfold(rx, |mut rx| async move {
            loop {
                match rx.recv().await {
                    Ok(value) => return Some((value, rx)),
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        warn!(skipped, "subscriber lagged behind source; skipping");
                    }
                    Err(broadcast::error::RecvError::Closed) => return None,
                }
            }
        })
        .boxed()
    }
}
