use chrono::{DateTime, Utc};

mod token_price;

pub use token_price::{PriceError, TokenPrice, PRICE_SCALE};

// Serde helpers for number-typed price fields
pub use token_price::as_f64 as price_as_f64;

/// Timestamp in UTC
pub type Timestamp = DateTime<Utc>;
