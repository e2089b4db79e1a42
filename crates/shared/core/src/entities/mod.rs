mod chain;
mod token;

pub use chain::{Chain, ChainId, Logo};
pub use token::{Token, TokenId};
