use async_trait::async_trait;
use midas_core::{TokenId, TokenPrice};
use midas_ports::{OracleError, PriceLookup, PriceOracle};
use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicU64, Ordering};

/// Deterministic drifting oracle for demo wiring and local runs.
///
/// Each lookup nudges the seeded reference price by up to ±0.5%, derived
/// from a hash of the token id and a per-call tick, so consecutive runs
/// produce plausible movement without any external service.
pub struct JitterOracle {
    reference: HashMap<TokenId, TokenPrice>,
    tick: AtomicU64,
}

impl JitterOracle {
    pub fn seeded(reference: HashMap<TokenId, TokenPrice>) -> Self {
        Self {
            reference,
            tick: AtomicU64::new(0),
        }
    }

    fn drift_factor(id: &TokenId, tick: u64) -> f64 {
        let mut hasher = DefaultHasher::new();
        id.hash(&mut hasher);
        tick.hash(&mut hasher);
        // Map the hash onto [-5, 5] per mille
        let per_mille = (hasher.finish() % 11) as i64 - 5;
        1.0 + per_mille as f64 / 1000.0
    }
}

#[async_trait]
impl PriceOracle for JitterOracle {
    async fn price_of(&self, lookup: &PriceLookup) -> Result<TokenPrice, OracleError> {
        let reference = self
            .reference
            .get(&lookup.token_id)
            .ok_or_else(|| OracleError::NotListed(lookup.key()))?;

        let tick = self.tick.fetch_add(1, Ordering::Relaxed);
        let factor = Self::drift_factor(&lookup.token_id, tick);

        // A drift that would push the price out of range falls back to the
        // reference quote
        Ok(reference.checked_mul(factor).unwrap_or(*reference))
    }
}
