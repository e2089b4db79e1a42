use async_trait::async_trait;
use midas_core::TokenEvent;
use midas_ports::{EventPublisher, PublishError};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::broadcast;

/// Broadcast-based event publisher
///
/// Fans event batches out to in-process subscribers over a tokio broadcast
/// channel. A batch goes out whole or not at all; an empty batch never
/// touches the channel. Having no subscribers is not an error - events are
/// simply dropped, as with any bus nobody is listening to.
pub struct BroadcastEventPublisher {
    tx: broadcast::Sender<TokenEvent>,
    subscriber_count: Arc<AtomicUsize>,
}

impl BroadcastEventPublisher {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self {
            tx,
            subscriber_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Subscribe to all published events
    pub fn subscribe(&self) -> broadcast::Receiver<TokenEvent> {
        self.subscriber_count.fetch_add(1, Ordering::SeqCst);
        self.tx.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscriber_count.load(Ordering::SeqCst)
    }
}

impl Default for BroadcastEventPublisher {
    fn default() -> Self {
        Self::new(10000)
    }
}

impl Clone for BroadcastEventPublisher {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
            subscriber_count: Arc::clone(&self.subscriber_count),
        }
    }
}

#[async_trait]
impl EventPublisher for BroadcastEventPublisher {
    async fn publish_batch(&self, events: &[TokenEvent]) -> Result<(), PublishError> {
        if events.is_empty() {
            return Ok(());
        }
        for event in events {
            // Send errors only mean there are no subscribers
            let _ = self.tx.send(event.clone());
        }
        log::debug!("published {} events", events.len());
        Ok(())
    }
}
