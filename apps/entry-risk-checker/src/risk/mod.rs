//! Position sizing for discretionary FX entries.
//!
//! Turns an entry form (pair, direction, entry, stop and target) plus the
//! user's [`RiskSettings`] into a [`CalculationResult`].
//!
//! # Features
//!
//! - Pip normalisation for JPY and non-JPY quotes
//! - Stop/target given as absolute price or pips distance
//! - Lot floored to the broker's step, never rounded up
//! - Entry verdict with human-readable reasons

mod calculator;
mod constants;
mod pair;
pub mod quantize;
mod types;

pub use calculator::{RiskCalculator, RiskCalculatorConfig, calculate_risk};
pub use constants::{REFERENCE_JPY_RATE, TOLERANCE};
pub use pair::{CurrencyPair, PairParseError, SUPPORTED_PAIRS};
pub use types::{
    CalculationResult, LevelKind, PriceLevel, RiskSettings, RiskStatus, SettingsError, TradeInput,
    TradeType,
};
