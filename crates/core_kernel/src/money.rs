//! Money types with precise decimal arithmetic
//!
//! Compensation amounts are carried as `rust_decimal` values tagged with
//! their currency, so a payout is never confused with a bare number.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Currency codes following ISO 4217
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    /// Tunisian dinar, the currency compensation is paid in
    TND,
    EUR,
    USD,
}

impl Currency {
    /// Returns the number of decimal places for this currency
    pub fn decimal_places(&self) -> u32 {
        match self {
            Currency::TND => 3,
            _ => 2,
        }
    }

    /// Returns the ISO 4217 code
    pub fn code(&self) -> &'static str {
        match self {
            Currency::TND => "TND",
            Currency::EUR => "EUR",
            Currency::USD => "USD",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Currency {
    type Err = MoneyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "TND" => Ok(Currency::TND),
            "EUR" => Ok(Currency::EUR),
            "USD" => Ok(Currency::USD),
            other => Err(MoneyError::UnknownCurrency(other.to_string())),
        }
    }
}

/// Errors that can occur during money operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MoneyError {
    #[error("Unknown currency: {0}")]
    UnknownCurrency(String),
}

/// A monetary amount with associated currency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Money {
    amount: Decimal,
    currency: Currency,
}

impl Money {
    /// Creates a new Money value, rounded to the currency's minor unit
    pub fn new(amount: Decimal, currency: Currency) -> Self {
        Self {
            amount: amount.round_dp(currency.decimal_places()),
            currency,
        }
    }

    /// Creates Money from a whole number of major units
    pub fn from_major(units: i64, currency: Currency) -> Self {
        Self::new(Decimal::from(units), currency)
    }

    /// Creates a zero amount in the specified currency
    pub fn zero(currency: Currency) -> Self {
        Self {
            amount: dec!(0),
            currency,
        }
    }

    /// Returns the amount
    pub fn amount(&self) -> Decimal {
        self.amount
    }

    /// Returns the currency
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Returns true if the amount is zero
    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }

    /// Returns true if the amount is strictly positive
    pub fn is_positive(&self) -> bool {
        self.amount > Decimal::ZERO
    }
}

/// Formats as `"<amount> <code>"` with trailing zeros dropped, e.g. `100 TND`
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.amount.normalize(), self.currency.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_drops_trailing_zeros() {
        let money = Money::new(dec!(100.000), Currency::TND);
        assert_eq!(money.to_string(), "100 TND");
    }

    #[test]
    fn test_rounds_to_minor_unit() {
        let money = Money::new(dec!(1.23456), Currency::EUR);
        assert_eq!(money.amount(), dec!(1.23));
    }

    #[test]
    fn test_currency_parse() {
        assert_eq!("tnd".parse::<Currency>().unwrap(), Currency::TND);
        assert!("XYZ".parse::<Currency>().is_err());
    }

    #[test]
    fn test_zero_is_not_positive() {
        let zero = Money::zero(Currency::TND);
        assert!(zero.is_zero());
        assert!(!zero.is_positive());
    }
}
