//! Midas Core Domain
//!
//! Pure domain types for the Midas token price service.
//! This crate contains no async, no I/O, and is 100% unit testable.

pub mod entities;
pub mod events;
pub mod values;

// Re-export commonly used types at crate root
pub use entities::{Chain, ChainId, Logo, Token, TokenId};
pub use events::{PriceChange, PriceUpdatedEvent, TokenEvent};
pub use values::{PriceError, Timestamp, TokenPrice, PRICE_SCALE};
