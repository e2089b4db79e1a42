use serde::{Deserialize, Serialize};

use crate::entities::TokenId;
use crate::values::{Timestamp, TokenPrice};

/// Domain events emitted by the token catalog.
///
/// The serialized envelope is `{ "name": ..., "payload": ..., "occurredAt": ... }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "name")]
pub enum TokenEvent {
    /// A token's quoted price actually changed
    PriceUpdated(PriceUpdatedEvent),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceUpdatedEvent {
    pub payload: PriceChange,
    pub occurred_at: Timestamp,
}

/// What changed: the token, and the price before and after.
/// Prices go over the wire as JSON numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceChange {
    pub token_id: TokenId,
    pub symbol: Option<String>,
    #[serde(with = "crate::values::price_as_f64")]
    pub old_price: TokenPrice,
    #[serde(with = "crate::values::price_as_f64")]
    pub new_price: TokenPrice,
}
