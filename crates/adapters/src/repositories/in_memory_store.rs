//! In-memory token store implementation

use async_trait::async_trait;
use midas_core::{Timestamp, Token, TokenId};
use midas_ports::{StoreError, TokenStore};
use std::collections::{BTreeMap, HashSet};
use std::ops::Bound;
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-memory token store
///
/// Tokens are kept in a BTreeMap keyed by id, so cursor reads are ordered
/// range scans and cost O(batch) regardless of how far into the collection
/// the cursor sits. Cloning produces another handle onto the same storage.
pub struct InMemoryTokenStore {
    tokens: Arc<RwLock<BTreeMap<TokenId, Token>>>,
}

impl InMemoryTokenStore {
    pub fn new() -> Self {
        Self {
            tokens: Arc::new(RwLock::new(BTreeMap::new())),
        }
    }

    pub fn seeded(tokens: Vec<Token>) -> Self {
        Self {
            tokens: Arc::new(RwLock::new(
                tokens.into_iter().map(|t| (t.id, t)).collect(),
            )),
        }
    }

    pub async fn insert(&self, token: Token) {
        self.tokens.write().await.insert(token.id, token);
    }

    pub async fn len(&self) -> usize {
        self.tokens.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.tokens.read().await.is_empty()
    }

    pub async fn get(&self, id: &TokenId) -> Option<Token> {
        self.tokens.read().await.get(id).cloned()
    }
}

impl Default for InMemoryTokenStore {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for InMemoryTokenStore {
    fn clone(&self) -> Self {
        Self {
            tokens: Arc::clone(&self.tokens),
        }
    }
}

#[async_trait]
impl TokenStore for InMemoryTokenStore {
    async fn batch_after(
        &self,
        cursor: Option<TokenId>,
        limit: usize,
    ) -> Result<Vec<Token>, StoreError> {
        let tokens = self.tokens.read().await;
        let batch = match cursor {
            Some(cursor) => tokens
                .range((Bound::Excluded(cursor), Bound::Unbounded))
                .take(limit)
                .map(|(_, t)| t.clone())
                .collect(),
            None => tokens.values().take(limit).cloned().collect(),
        };
        Ok(batch)
    }

    async fn save_batch(&self, batch: &[Token]) -> Result<(), StoreError> {
        let mut tokens = self.tokens.write().await;

        // Validate the whole batch before touching anything, so a bad row
        // cannot leave a partially-applied batch behind.
        if let Some(unknown) = batch.iter().find(|t| !tokens.contains_key(&t.id)) {
            return Err(StoreError::Conflict(format!(
                "token {} does not exist",
                unknown.id
            )));
        }

        for token in batch {
            if let Some(stored) = tokens.get_mut(&token.id) {
                stored.current_price = token.current_price;
                stored.price_updated_at = token.price_updated_at;
            }
        }
        Ok(())
    }

    async fn find_page(&self, offset: usize, limit: usize) -> Result<Vec<Token>, StoreError> {
        let tokens = self.tokens.read().await;
        Ok(tokens.values().skip(offset).take(limit).cloned().collect())
    }

    async fn last_update_timestamp(&self) -> Result<Option<Timestamp>, StoreError> {
        let tokens = self.tokens.read().await;
        Ok(tokens.values().map(|t| t.price_updated_at).max())
    }

    async fn distinct_chain_count(&self) -> Result<usize, StoreError> {
        let tokens = self.tokens.read().await;
        Ok(tokens
            .values()
            .map(|t| t.chain_id)
            .collect::<HashSet<_>>()
            .len())
    }
}
