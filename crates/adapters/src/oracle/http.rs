use async_trait::async_trait;
use midas_core::TokenPrice;
use midas_ports::{OracleError, PriceLookup, PriceOracle};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;

/// Quote payload returned by the price endpoint. The price comes as a
/// decimal string so nothing on the wire is binary floating point.
#[derive(Debug, Deserialize)]
struct QuoteResponse {
    price: String,
}

/// HTTP price oracle
///
/// Infrastructure component - one GET per lookup against a quote endpoint,
/// `GET {base_url}/v1/price?symbol=...`. No retry here: backoff and
/// isolation policy live in the pipeline.
#[derive(Clone)]
pub struct HttpPriceOracle {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl HttpPriceOracle {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        let base_url: String = base_url.into();
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
        }
    }

    fn send_error(&self, err: reqwest::Error) -> OracleError {
        if err.is_timeout() {
            OracleError::Timeout(self.timeout.as_millis() as u64)
        } else {
            OracleError::Network(err.to_string())
        }
    }
}

#[async_trait]
impl PriceOracle for HttpPriceOracle {
    async fn price_of(&self, lookup: &PriceLookup) -> Result<TokenPrice, OracleError> {
        let url = format!("{}/v1/price", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[("symbol", lookup.key())])
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| self.send_error(e))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(OracleError::NotListed(lookup.key()));
        }
        let response = response
            .error_for_status()
            .map_err(|e| OracleError::Network(e.to_string()))?;

        let quote: QuoteResponse = response
            .json()
            .await
            .map_err(|e| OracleError::InvalidData(e.to_string()))?;

        TokenPrice::parse(&quote.price)
            .map_err(|e| OracleError::InvalidData(format!("{}: {}", quote.price, e)))
    }
}
