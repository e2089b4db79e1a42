//! Midas Adapters
//!
//! Infrastructure implementations of the Midas ports: in-memory token
//! storage, HTTP and simulated price oracles, and broadcast event
//! transport.

pub mod event_publisher;
pub mod oracle;
pub mod repositories;

pub use event_publisher::BroadcastEventPublisher;
pub use oracle::{HttpPriceOracle, JitterOracle};
pub use repositories::InMemoryTokenStore;
