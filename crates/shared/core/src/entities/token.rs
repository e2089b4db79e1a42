use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Chain, ChainId, Logo};
use crate::events::{PriceChange, PriceUpdatedEvent, TokenEvent};
use crate::values::{Timestamp, TokenPrice};

/// Unique identifier for a token
pub type TokenId = Uuid;

/// A listed token and its current quoted price.
///
/// Descriptive attributes are immutable once the token is materialized;
/// only `current_price` and `price_updated_at` change, and only through
/// [`Token::with_price`]. The update is pure: it returns a new `Token`
/// plus the event the change produced, so instances can cross task
/// boundaries without synchronization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub id: TokenId,
    /// Raw on-chain contract address bytes (empty for native assets)
    pub contract_address: Vec<u8>,
    pub symbol: Option<String>,
    pub display_name: String,
    pub decimal_places: u8,
    pub is_native: bool,
    pub chain_id: ChainId,
    pub is_system_protected: bool,
    pub last_modified_by: Option<String>,
    pub display_priority: i32,
    /// Reference data for display, never mutated by the pipeline
    pub chain: Option<Chain>,
    pub logo: Option<Logo>,
    pub current_price: TokenPrice,
    pub price_updated_at: Timestamp,
}

impl Token {
    /// Create a token with a fresh id and default descriptive attributes.
    /// Fields are public, so callers needing the full attribute set adjust
    /// the returned value.
    pub fn new(
        display_name: impl Into<String>,
        symbol: Option<String>,
        chain_id: ChainId,
        initial_price: TokenPrice,
        at: Timestamp,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            contract_address: Vec::new(),
            symbol,
            display_name: display_name.into(),
            decimal_places: 18,
            is_native: false,
            chain_id,
            is_system_protected: false,
            last_modified_by: None,
            display_priority: 0,
            chain: None,
            logo: None,
            current_price: initial_price,
            price_updated_at: at,
        }
    }

    /// Apply a freshly quoted price.
    ///
    /// An unchanged price is a no-op: the token comes back as-is (timestamp
    /// untouched) and no event is produced. A real change returns the
    /// updated copy and exactly one `PriceUpdated` event carrying the old
    /// and new amounts.
    pub fn with_price(&self, new_price: TokenPrice, at: Timestamp) -> (Token, Option<TokenEvent>) {
        if new_price == self.current_price {
            return (self.clone(), None);
        }

        let old_price = self.current_price;
        let mut updated = self.clone();
        updated.current_price = new_price;
        updated.price_updated_at = at;

        let event = TokenEvent::PriceUpdated(PriceUpdatedEvent {
            payload: PriceChange {
                token_id: self.id,
                symbol: self.symbol.clone(),
                old_price,
                new_price,
            },
            occurred_at: at,
        });

        (updated, Some(event))
    }
}
