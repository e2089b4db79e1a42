use async_trait::async_trait;
use midas_core::TokenEvent;

use crate::error::PublishError;

/// Port for delivering domain events to the message bus.
///
/// The orchestrator's contract: a batch's events must be published, and the
/// publish must succeed, before that batch is persisted. Retrying a
/// transient publish failure can therefore deliver an event twice;
/// consumers dedupe on `(token_id, occurred_at)`. The reverse ordering
/// would risk a durable price with no event ever seen downstream, which is
/// unrecoverable.
#[async_trait]
pub trait EventPublisher: Send + Sync {
    /// Deliver all events in one call as a unit. An empty slice must
    /// short-circuit `Ok(())` without touching the transport.
    async fn publish_batch(&self, events: &[TokenEvent]) -> Result<(), PublishError>;
}
