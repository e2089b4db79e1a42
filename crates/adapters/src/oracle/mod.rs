mod http;
mod jitter;

pub use http::HttpPriceOracle;
pub use jitter::JitterOracle;
