use async_trait::async_trait;
use midas_core::{Timestamp, Token, TokenId};

use crate::error::StoreError;

/// Port for the token collection.
///
/// Reads are cursor-based: a batch is the next `limit` tokens strictly after
/// `cursor` in ascending-id order, so traversal cost does not grow with how
/// much has already been read and memory stays bounded by the batch size.
/// The caller drives the cursor loop and stops on an empty or short batch.
#[async_trait]
pub trait TokenStore: Send + Sync {
    /// Next batch of tokens after `cursor` (all tokens from the start when
    /// `cursor` is `None`), ordered by ascending id.
    async fn batch_after(
        &self,
        cursor: Option<TokenId>,
        limit: usize,
    ) -> Result<Vec<Token>, StoreError>;

    /// Persist `current_price` and `price_updated_at` for every token in
    /// the slice as a single atomic unit: all rows commit or none do.
    async fn save_batch(&self, tokens: &[Token]) -> Result<(), StoreError>;

    /// Offset-paged read for listing surfaces.
    async fn find_page(&self, offset: usize, limit: usize) -> Result<Vec<Token>, StoreError>;

    /// Most recent `price_updated_at` across the collection, if any token
    /// has been priced.
    async fn last_update_timestamp(&self) -> Result<Option<Timestamp>, StoreError>;

    /// Number of distinct chains with at least one token.
    async fn distinct_chain_count(&self) -> Result<usize, StoreError>;
}
