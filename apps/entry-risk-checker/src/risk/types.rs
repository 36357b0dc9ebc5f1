//! Input and output types for position sizing.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::constants::{HUNDRED, PIPS_DECIMALS};
use super::pair::CurrencyPair;
use super::quantize::round_half_up;

// ============================================================================
// Settings
// ============================================================================

/// User risk configuration.
///
/// All six values must be positive and `risk_percentage` must not exceed 100.
/// The calculator assumes this has been checked with [`RiskSettings::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskSettings {
    /// Account balance in account currency.
    pub account_balance: Decimal,
    /// Allowed loss per trade as a percentage of the balance.
    pub risk_percentage: Decimal,
    /// Value of one pip for one standard lot of a JPY-quoted pair.
    pub pips_value_per_lot: Decimal,
    /// Smallest lot the broker accepts.
    pub min_lot: Decimal,
    /// Lot quantization unit.
    pub lot_step: Decimal,
    /// Minimum acceptable reward:risk ratio.
    pub min_risk_reward_ratio: Decimal,
}

impl Default for RiskSettings {
    fn default() -> Self {
        Self {
            account_balance: Decimal::from(100_000u64),
            risk_percentage: Decimal::TWO,
            pips_value_per_lot: Decimal::from(1_000u64),
            min_lot: Decimal::new(1, 2),
            lot_step: Decimal::new(1, 2),
            min_risk_reward_ratio: Decimal::new(15, 1),
        }
    }
}

impl RiskSettings {
    /// Check the settings invariant.
    pub fn validate(&self) -> Result<(), SettingsError> {
        let fields = [
            ("account_balance", self.account_balance),
            ("risk_percentage", self.risk_percentage),
            ("pips_value_per_lot", self.pips_value_per_lot),
            ("min_lot", self.min_lot),
            ("lot_step", self.lot_step),
            ("min_risk_reward_ratio", self.min_risk_reward_ratio),
        ];

        if let Some((field, value)) = fields.into_iter().find(|(_, v)| *v <= Decimal::ZERO) {
            return Err(SettingsError::NotPositive { field, value });
        }

        if self.risk_percentage > HUNDRED {
            return Err(SettingsError::RiskAboveHundred(self.risk_percentage));
        }

        Ok(())
    }

    /// Money the user is willing to lose on one trade, or `None` when the
    /// product overflows `Decimal`.
    #[must_use]
    pub fn max_loss_budget(&self) -> Option<Decimal> {
        self.account_balance
            .checked_mul(self.risk_percentage)?
            .checked_div(HUNDRED)
    }
}

/// Violation of the [`RiskSettings`] invariant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingsError {
    /// A setting was zero or negative.
    #[error("{field} must be positive (got {value})")]
    NotPositive {
        /// Setting name.
        field: &'static str,
        /// Offending value.
        value: Decimal,
    },
    /// Risk percentage above 100.
    #[error("risk_percentage must not exceed 100 (got {0})")]
    RiskAboveHundred(Decimal),
}

// ============================================================================
// Trade Input
// ============================================================================

/// Trade direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TradeType {
    /// Buy.
    #[default]
    Long,
    /// Sell.
    Short,
}

impl fmt::Display for TradeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Long => write!(f, "LONG"),
            Self::Short => write!(f, "SHORT"),
        }
    }
}

/// Which side of the entry a level sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelKind {
    /// Stop-loss level.
    Stop,
    /// Take-profit level.
    Target,
}

/// A stop or target, given either as an absolute price or as a pips distance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", content = "value", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PriceLevel {
    /// Absolute price.
    Price(Decimal),
    /// Distance from the entry in pips.
    Pips(Decimal),
}

impl PriceLevel {
    /// Distance from `entry_price` in pips.
    ///
    /// Pips are taken as-is (non-positive becomes zero). Prices are converted
    /// with the pair's multiplier and rounded to one decimal. `None` when the
    /// distance does not fit in a `Decimal`.
    #[must_use]
    pub fn to_pips(&self, entry_price: Decimal, pair: &CurrencyPair) -> Option<Decimal> {
        match *self {
            Self::Pips(pips) => Some(pips.max(Decimal::ZERO)),
            Self::Price(price) => {
                let raw = entry_price
                    .checked_sub(price)?
                    .abs()
                    .checked_mul(pair.pip_multiplier())?;
                Some(round_half_up(raw, PIPS_DECIMALS))
            }
        }
    }

    /// Absolute price of this level for a trade entered at `entry_price`.
    ///
    /// Pips distances are placed below the entry for a long stop or short
    /// target and above it otherwise. Out-of-range results saturate.
    #[must_use]
    pub fn to_price(
        &self,
        entry_price: Decimal,
        side: TradeType,
        kind: LevelKind,
        pair: &CurrencyPair,
    ) -> Decimal {
        match *self {
            Self::Price(price) => price,
            Self::Pips(pips) => {
                let distance = pips.max(Decimal::ZERO).saturating_mul(pair.pip_size());
                match (side, kind) {
                    (TradeType::Long, LevelKind::Stop) | (TradeType::Short, LevelKind::Target) => {
                        entry_price.saturating_sub(distance)
                    }
                    (TradeType::Long, LevelKind::Target) | (TradeType::Short, LevelKind::Stop) => {
                        entry_price.saturating_add(distance)
                    }
                }
            }
        }
    }
}

/// One sizing request from the entry form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeInput {
    /// Traded pair.
    pub currency_pair: CurrencyPair,
    /// Quote-currency to JPY rate; needed only for non-JPY quotes.
    #[serde(default)]
    pub current_jpy_rate: Option<Decimal>,
    /// Direction.
    pub trade_type: TradeType,
    /// Entry price.
    pub entry_price: Decimal,
    /// Stop-loss level.
    pub stop_loss: PriceLevel,
    /// Take-profit level.
    pub take_profit: PriceLevel,
}

// ============================================================================
// Result
// ============================================================================

/// Entry verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskStatus {
    /// Sizeable, within budget and RR acceptable.
    EntryOk,
    /// Sizeable and within budget, but RR below the minimum.
    ConditionsNg,
    /// Cannot be opened under the current constraints.
    EntryForbidden,
}

impl fmt::Display for RiskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EntryOk => write!(f, "ENTRY_OK"),
            Self::ConditionsNg => write!(f, "CONDITIONS_NG"),
            Self::EntryForbidden => write!(f, "ENTRY_FORBIDDEN"),
        }
    }
}

/// Outcome of a sizing calculation, rounded for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationResult {
    /// Verdict.
    pub status: RiskStatus,
    /// Lot floored to the step.
    pub recommended_lot: Decimal,
    /// Stop distance in pips.
    pub stop_pips: Decimal,
    /// Target distance in pips.
    pub take_pips: Decimal,
    /// Loss if the stop is hit, whole currency units.
    pub actual_loss: Decimal,
    /// `actual_loss` as a percentage of the balance.
    pub actual_risk_percent: Decimal,
    /// Profit if the target is hit, whole currency units.
    pub potential_profit: Decimal,
    /// `potential_profit / actual_loss`.
    pub risk_reward_ratio: Decimal,
    /// Reasons and warnings; never empty.
    pub messages: Vec<String>,
}

impl CalculationResult {
    /// A forbidden result with every figure zeroed.
    #[must_use]
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self {
            status: RiskStatus::EntryForbidden,
            recommended_lot: Decimal::ZERO,
            stop_pips: Decimal::ZERO,
            take_pips: Decimal::ZERO,
            actual_loss: Decimal::ZERO,
            actual_risk_percent: Decimal::ZERO,
            potential_profit: Decimal::ZERO,
            risk_reward_ratio: Decimal::ZERO,
            messages: vec![message.into()],
        }
    }

    /// Whether a position may be opened from this result.
    #[must_use]
    pub fn allows_entry(&self) -> bool {
        self.status != RiskStatus::EntryForbidden
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    fn usd_jpy() -> CurrencyPair {
        CurrencyPair::default()
    }

    #[test]
    fn test_default_settings_are_valid() {
        let settings = RiskSettings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.max_loss_budget(), Some(dec!(2000)));
    }

    #[test]
    fn test_validate_rejects_non_positive_field() {
        let settings = RiskSettings {
            lot_step: Decimal::ZERO,
            ..RiskSettings::default()
        };
        assert_eq!(
            settings.validate(),
            Err(SettingsError::NotPositive {
                field: "lot_step",
                value: Decimal::ZERO
            })
        );
    }

    #[test]
    fn test_validate_rejects_risk_above_hundred() {
        let settings = RiskSettings {
            risk_percentage: dec!(100.5),
            ..RiskSettings::default()
        };
        assert_eq!(
            settings.validate(),
            Err(SettingsError::RiskAboveHundred(dec!(100.5)))
        );
    }

    #[test]
    fn test_price_level_to_pips() {
        let pair = usd_jpy();
        assert_eq!(
            PriceLevel::Price(dec!(149.800)).to_pips(dec!(150.000), &pair),
            Some(dec!(20.0))
        );
        assert_eq!(
            PriceLevel::Price(dec!(150.1234)).to_pips(dec!(150.000), &pair),
            Some(dec!(12.3))
        );
        assert_eq!(PriceLevel::Pips(dec!(15)).to_pips(dec!(150), &pair), Some(dec!(15)));
        assert_eq!(
            PriceLevel::Pips(dec!(-3)).to_pips(dec!(150), &pair),
            Some(Decimal::ZERO)
        );
    }

    #[test]
    fn test_price_level_to_pips_non_jpy() {
        let pair: CurrencyPair = "EUR/USD".parse().unwrap();
        assert_eq!(
            PriceLevel::Price(dec!(1.0780)).to_pips(dec!(1.0800), &pair),
            Some(dec!(20.0))
        );
    }

    #[test]
    fn test_price_level_to_pips_overflow_is_none() {
        let pair = usd_jpy();
        let huge = Decimal::from_i128_with_scale(7 * 10_i128.pow(27), 0);
        assert_eq!(PriceLevel::Price(huge).to_pips(dec!(150), &pair), None);
        assert_eq!(PriceLevel::Price(Decimal::MIN).to_pips(Decimal::MAX, &pair), None);
    }

    #[test]
    fn test_max_loss_budget_overflow_is_none() {
        let settings = RiskSettings {
            account_balance: Decimal::MAX,
            risk_percentage: dec!(50),
            ..RiskSettings::default()
        };
        assert_eq!(settings.max_loss_budget(), None);
    }

    #[test]
    fn test_price_level_to_price_by_side() {
        let pair = usd_jpy();
        let stop = PriceLevel::Pips(dec!(20));
        let target = PriceLevel::Pips(dec!(40));
        let entry = dec!(150.000);

        assert_eq!(stop.to_price(entry, TradeType::Long, LevelKind::Stop, &pair), dec!(149.80));
        assert_eq!(target.to_price(entry, TradeType::Long, LevelKind::Target, &pair), dec!(150.40));
        assert_eq!(stop.to_price(entry, TradeType::Short, LevelKind::Stop, &pair), dec!(150.20));
        assert_eq!(target.to_price(entry, TradeType::Short, LevelKind::Target, &pair), dec!(149.60));

        let absolute = PriceLevel::Price(dec!(149.5));
        assert_eq!(absolute.to_price(entry, TradeType::Short, LevelKind::Stop, &pair), dec!(149.5));
    }

    #[test]
    fn test_price_level_serde_shape() {
        let level: PriceLevel = serde_json::from_str(r#"{"mode":"PIPS","value":"20"}"#).unwrap();
        assert_eq!(level, PriceLevel::Pips(dec!(20)));

        let level: PriceLevel = serde_json::from_str(r#"{"mode":"PRICE","value":149.8}"#).unwrap();
        assert_eq!(level, PriceLevel::Price(dec!(149.8)));
    }

    #[test]
    fn test_forbidden_result_is_zeroed() {
        let result = CalculationResult::forbidden("nope");
        assert_eq!(result.status, RiskStatus::EntryForbidden);
        assert_eq!(result.recommended_lot, Decimal::ZERO);
        assert_eq!(result.messages, vec!["nope".to_string()]);
        assert!(!result.allows_entry());
    }
}
