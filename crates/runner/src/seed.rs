//! Demo seed data
//!
//! A small fixed token set so the binary is runnable end-to-end without an
//! external store or quote service.

use chrono::Utc;
use midas_core::{Chain, Token, TokenId, TokenPrice};
use std::collections::HashMap;

fn ethereum() -> Chain {
    Chain {
        id: 1,
        name: "Ethereum".to_string(),
        native_symbol: "ETH".to_string(),
    }
}

fn arbitrum() -> Chain {
    Chain {
        id: 42161,
        name: "Arbitrum One".to_string(),
        native_symbol: "ETH".to_string(),
    }
}

fn token(
    name: &str,
    symbol: &str,
    chain: Chain,
    address: &str,
    decimal_places: u8,
    price: &str,
    priority: i32,
) -> Token {
    let mut token = Token::new(
        name,
        Some(symbol.to_string()),
        chain.id,
        TokenPrice::parse(price).expect("seed price literal"),
        Utc::now(),
    );
    token.contract_address = hex::decode(address).unwrap_or_default();
    token.is_native = address.is_empty();
    token.decimal_places = decimal_places;
    token.display_priority = priority;
    token.last_modified_by = Some("seed".to_string());
    token.chain = Some(chain);
    token
}

pub fn demo_tokens() -> Vec<Token> {
    vec![
        token("Ether", "ETH", ethereum(), "", 18, "3200.50", 1),
        token(
            "Wrapped Bitcoin",
            "WBTC",
            ethereum(),
            "2260fac5e5542a773aa44fbcfedf7c193bc2c599",
            8,
            "67250.25",
            2,
        ),
        token(
            "USD Coin",
            "USDC",
            ethereum(),
            "a0b86991c6218b36c1d19d4a2e9eb0ce3606eb48",
            6,
            "1",
            3,
        ),
        token(
            "Dai Stablecoin",
            "DAI",
            ethereum(),
            "6b175474e89094c44da98b954eedeac495271d0f",
            18,
            "0.9998",
            4,
        ),
        token(
            "Uniswap",
            "UNI",
            ethereum(),
            "1f9840a85d5af5bf1d1762f925bdaddc4201f984",
            18,
            "11.35",
            5,
        ),
        token(
            "Arbitrum",
            "ARB",
            arbitrum(),
            "912ce59144191c1204e64559fe8253a0e49e6548",
            18,
            "1.15",
            6,
        ),
    ]
}

/// Reference prices for the drifting demo oracle
pub fn reference_prices(tokens: &[Token]) -> HashMap<TokenId, TokenPrice> {
    tokens.iter().map(|t| (t.id, t.current_price)).collect()
}
