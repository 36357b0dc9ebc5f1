//! Currency pair symbols and pip conventions.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::constants::{JPY_PIP_MULTIPLIER, STANDARD_PIP_MULTIPLIER};

/// Pairs offered by the entry form.
pub const SUPPORTED_PAIRS: [&str; 7] = [
    "USD/JPY", "EUR/JPY", "GBP/JPY", "AUD/JPY", "EUR/USD", "GBP/USD", "AUD/USD",
];

/// Failure to parse a currency pair symbol.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid currency pair '{0}': expected BASE/QUOTE (e.g. USD/JPY)")]
pub struct PairParseError(pub String);

/// A currency pair such as `USD/JPY`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CurrencyPair {
    base: String,
    quote: String,
}

impl CurrencyPair {
    /// Build a pair from ISO currency codes.
    pub fn new(base: &str, quote: &str) -> Result<Self, PairParseError> {
        let valid = |code: &str| code.len() == 3 && code.chars().all(|c| c.is_ascii_alphabetic());
        if !valid(base) || !valid(quote) {
            return Err(PairParseError(format!("{base}/{quote}")));
        }
        Ok(Self {
            base: base.to_ascii_uppercase(),
            quote: quote.to_ascii_uppercase(),
        })
    }

    /// Base currency code.
    #[must_use]
    pub fn base(&self) -> &str {
        &self.base
    }

    /// Quote currency code.
    #[must_use]
    pub fn quote(&self) -> &str {
        &self.quote
    }

    /// Whether the pair is quoted in JPY.
    #[must_use]
    pub fn is_jpy_quote(&self) -> bool {
        self.quote == "JPY"
    }

    /// Pips per one unit of price.
    #[must_use]
    pub fn pip_multiplier(&self) -> Decimal {
        if self.is_jpy_quote() {
            JPY_PIP_MULTIPLIER
        } else {
            STANDARD_PIP_MULTIPLIER
        }
    }

    /// Price increment of a single pip.
    #[must_use]
    pub fn pip_size(&self) -> Decimal {
        Decimal::ONE / self.pip_multiplier()
    }

    /// Whether the pair is one of [`SUPPORTED_PAIRS`].
    #[must_use]
    pub fn is_supported(&self) -> bool {
        let code = self.to_string();
        SUPPORTED_PAIRS.contains(&code.as_str())
    }
}

impl Default for CurrencyPair {
    fn default() -> Self {
        Self {
            base: "USD".to_string(),
            quote: "JPY".to_string(),
        }
    }
}

impl fmt::Display for CurrencyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.base, self.quote)
    }
}

impl FromStr for CurrencyPair {
    type Err = PairParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let parts = match trimmed.split_once('/') {
            Some((base, quote)) => Some((base.trim(), quote.trim())),
            None if trimmed.len() == 6 && trimmed.is_ascii() => Some(trimmed.split_at(3)),
            None => None,
        };

        let Some((base, quote)) = parts else {
            return Err(PairParseError(s.to_string()));
        };
        Self::new(base, quote).map_err(|_| PairParseError(s.to_string()))
    }
}

impl TryFrom<String> for CurrencyPair {
    type Error = PairParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CurrencyPair> for String {
    fn from(pair: CurrencyPair) -> Self {
        pair.to_string()
    }
}
