//! Midas Ports
//!
//! Port definitions (traits) for the Midas token price service.
//! These define the boundaries between domain logic and infrastructure.

mod error;
mod oracle;
mod publisher;
mod store;

pub use error::{OracleError, PublishError, StoreError};
pub use oracle::{PriceLookup, PriceOracle};
pub use publisher::EventPublisher;
pub use store::TokenStore;
