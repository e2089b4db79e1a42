use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Fixed fractional precision for all token prices
pub const PRICE_SCALE: u32 = 8;

/// Largest magnitude accepted from numeric (binary float) input.
/// Stays far inside Decimal's 96-bit mantissa at scale 8.
const MAX_NUMERIC_INPUT: f64 = 1e18;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    #[error("malformed price: {0}")]
    Malformed(String),

    #[error("price must be positive")]
    NotPositive,

    #[error("price has more than {PRICE_SCALE} fractional digits")]
    TooPrecise,

    #[error("price magnitude exceeds the supported range")]
    OutOfRange,
}

/// A positive monetary amount with at most 8 fractional digits.
///
/// Backed by `Decimal`, so arithmetic is exact; binary floating point never
/// touches the stored amount. Equality is value equality of the amounts
/// (`1.50 == 1.5`).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct TokenPrice(Decimal);

impl TokenPrice {
    pub fn new(value: Decimal) -> Result<Self, PriceError> {
        if value.scale() > PRICE_SCALE {
            return Err(PriceError::TooPrecise);
        }
        if value <= Decimal::ZERO {
            return Err(PriceError::NotPositive);
        }
        Ok(TokenPrice(value))
    }

    /// Parse a decimal string, digit-exact.
    pub fn parse(s: &str) -> Result<Self, PriceError> {
        let value = Decimal::from_str(s).map_err(|e| PriceError::Malformed(e.to_string()))?;
        Self::new(value)
    }

    /// Convert a binary float through its shortest decimal rendering, so
    /// representation noise (`0.1 + 0.2`) is rejected rather than stored.
    pub fn from_f64(value: f64) -> Result<Self, PriceError> {
        if !value.is_finite() {
            return Err(PriceError::Malformed(value.to_string()));
        }
        if value.abs() >= MAX_NUMERIC_INPUT {
            return Err(PriceError::OutOfRange);
        }
        Self::parse(&value.to_string())
    }

    pub fn inner(&self) -> Decimal {
        self.0
    }

    /// Lossy numeric view, for wire payloads and logs.
    pub fn value(&self) -> f64 {
        self.0.to_f64().unwrap_or(0.0)
    }

    pub fn checked_add(&self, other: TokenPrice) -> Result<TokenPrice, PriceError> {
        let sum = self.0.checked_add(other.0).ok_or(PriceError::OutOfRange)?;
        Self::new(sum)
    }

    pub fn checked_sub(&self, other: TokenPrice) -> Result<TokenPrice, PriceError> {
        let diff = self.0.checked_sub(other.0).ok_or(PriceError::OutOfRange)?;
        Self::new(diff)
    }

    /// Multiply by a numeric factor, rounding half-up (midpoint away from
    /// zero) back to the fixed scale.
    pub fn checked_mul(&self, factor: f64) -> Result<TokenPrice, PriceError> {
        if !factor.is_finite() {
            return Err(PriceError::Malformed(factor.to_string()));
        }
        let factor =
            Decimal::from_str(&factor.to_string()).map_err(|e| PriceError::Malformed(e.to_string()))?;
        let product = self.0.checked_mul(factor).ok_or(PriceError::OutOfRange)?;
        Self::new(product.round_dp_with_strategy(PRICE_SCALE, RoundingStrategy::MidpointAwayFromZero))
    }
}

impl TryFrom<Decimal> for TokenPrice {
    type Error = PriceError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        TokenPrice::new(value)
    }
}

impl From<TokenPrice> for Decimal {
    fn from(price: TokenPrice) -> Decimal {
        price.0
    }
}

impl FromStr for TokenPrice {
    type Err = PriceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TokenPrice::parse(s)
    }
}

impl fmt::Display for TokenPrice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Serde helpers for payloads that carry prices as JSON numbers instead of
/// decimal strings.
pub mod as_f64 {
    use super::TokenPrice;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(price: &TokenPrice, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(price.value())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<TokenPrice, D::Error> {
        let raw = f64::deserialize(deserializer)?;
        TokenPrice::from_f64(raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn new_validates_decimal_input() {
        assert!(TokenPrice::new(dec!(1.50)).is_ok());
        assert_eq!(TokenPrice::new(dec!(0)), Err(PriceError::NotPositive));
        assert_eq!(TokenPrice::new(dec!(-2.5)), Err(PriceError::NotPositive));
        assert_eq!(
            TokenPrice::new(dec!(0.000000001)),
            Err(PriceError::TooPrecise)
        );
    }

    #[test]
    fn parse_round_trips_without_precision_loss() {
        for s in ["1.50", "0.00000001", "42", "123456789.87654321"] {
            let price = TokenPrice::parse(s).unwrap();
            assert_eq!(price.to_string(), s);
        }
    }

    #[test]
    fn rejects_zero_and_negative() {
        assert_eq!(TokenPrice::parse("0"), Err(PriceError::NotPositive));
        assert_eq!(TokenPrice::parse("-5"), Err(PriceError::NotPositive));
        assert_eq!(TokenPrice::from_f64(0.0), Err(PriceError::NotPositive));
        assert_eq!(TokenPrice::from_f64(-5.0), Err(PriceError::NotPositive));
    }

    #[test]
    fn rejects_more_than_eight_fractional_digits() {
        assert_eq!(TokenPrice::parse("1.000000001"), Err(PriceError::TooPrecise));
        // Nine digits of trailing zeros still exceed the declared scale
        assert_eq!(TokenPrice::parse("1.000000000"), Err(PriceError::TooPrecise));
    }

    #[test]
    fn rejects_garbage_and_non_finite_input() {
        assert!(matches!(
            TokenPrice::parse("not-a-price"),
            Err(PriceError::Malformed(_))
        ));
        assert!(matches!(
            TokenPrice::from_f64(f64::NAN),
            Err(PriceError::Malformed(_))
        ));
        assert_eq!(TokenPrice::from_f64(1e19), Err(PriceError::OutOfRange));
    }

    #[test]
    fn float_input_goes_through_shortest_decimal_form() {
        let price = TokenPrice::from_f64(1.5).unwrap();
        assert_eq!(price.to_string(), "1.5");

        // 0.1 + 0.2 renders as 0.30000000000000004; the noise digits exceed
        // the scale instead of being silently stored
        assert_eq!(TokenPrice::from_f64(0.1 + 0.2), Err(PriceError::TooPrecise));
    }

    #[test]
    fn equality_is_value_equality() {
        assert_eq!(
            TokenPrice::parse("1.50").unwrap(),
            TokenPrice::parse("1.5").unwrap()
        );
        assert_ne!(
            TokenPrice::parse("1.5").unwrap(),
            TokenPrice::parse("1.50000001").unwrap()
        );
    }

    #[test]
    fn multiply_rounds_half_up_at_the_eighth_digit() {
        // 2.5 * 0.00000001 = 0.000000025: the tie rounds away from zero
        let up = TokenPrice::parse("2.5").unwrap().checked_mul(0.00000001).unwrap();
        assert_eq!(up, TokenPrice::parse("0.00000003").unwrap());

        // 2.4 * 0.00000001 = 0.000000024: below the midpoint rounds down
        let down = TokenPrice::parse("2.4").unwrap().checked_mul(0.00000001).unwrap();
        assert_eq!(down, TokenPrice::parse("0.00000002").unwrap());

        let exact = TokenPrice::parse("1").unwrap().checked_mul(1.005).unwrap();
        assert_eq!(exact, TokenPrice::parse("1.005").unwrap());
    }

    #[test]
    fn multiply_to_zero_fails() {
        let price = TokenPrice::parse("0.00000001").unwrap();
        assert_eq!(price.checked_mul(0.1), Err(PriceError::NotPositive));
    }

    #[test]
    fn subtract_below_zero_fails() {
        let small = TokenPrice::parse("1").unwrap();
        let large = TokenPrice::parse("2").unwrap();
        assert_eq!(small.checked_sub(large), Err(PriceError::NotPositive));
        assert_eq!(small.checked_sub(small), Err(PriceError::NotPositive));
        assert_eq!(
            large.checked_sub(small).unwrap(),
            TokenPrice::parse("1").unwrap()
        );
    }

    #[test]
    fn add_stays_within_scale() {
        let a = TokenPrice::parse("1.00000001").unwrap();
        let b = TokenPrice::parse("2.5").unwrap();
        assert_eq!(
            a.checked_add(b).unwrap(),
            TokenPrice::parse("3.50000001").unwrap()
        );
    }

    #[test]
    fn serde_uses_decimal_strings() {
        let price = TokenPrice::parse("1.50").unwrap();
        let json = serde_json::to_string(&price).unwrap();
        assert_eq!(json, "\"1.50\"");
        let back: TokenPrice = serde_json::from_str(&json).unwrap();
        assert_eq!(back, price);

        // Deserialization applies the same invariants as construction
        assert!(serde_json::from_str::<TokenPrice>("\"-1\"").is_err());
    }
}
