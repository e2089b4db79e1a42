use serde::{Deserialize, Serialize};

use super::TokenId;

/// Chain identifier (EVM-style numeric id)
pub type ChainId = i64;

/// Read-only reference data describing the chain a token lives on.
/// Carried through the pipeline untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chain {
    pub id: ChainId,
    pub name: String,
    pub native_symbol: String,
}

/// Display logo attached to a token. Read-only reference data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Logo {
    pub token_id: TokenId,
    pub uri: String,
}
