use async_trait::async_trait;
use midas_core::{Token, TokenId, TokenPrice};

use crate::error::OracleError;

/// What the oracle needs to identify a token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceLookup {
    pub token_id: TokenId,
    pub symbol: Option<String>,
}

impl PriceLookup {
    pub fn new(token_id: TokenId, symbol: Option<String>) -> Self {
        Self { token_id, symbol }
    }

    /// The symbol if present, otherwise the id; what a quote endpoint
    /// would be keyed by.
    pub fn key(&self) -> String {
        self.symbol
            .clone()
            .unwrap_or_else(|| self.token_id.to_string())
    }
}

impl From<&Token> for PriceLookup {
    fn from(token: &Token) -> Self {
        PriceLookup::new(token.id, token.symbol.clone())
    }
}

/// Port for the external price source.
///
/// A single lookup, no retry: failure-handling policy belongs to the
/// pipeline so isolation and backoff decisions stay in one place.
#[async_trait]
pub trait PriceOracle: Send + Sync {
    async fn price_of(&self, lookup: &PriceLookup) -> Result<TokenPrice, OracleError>;
}
