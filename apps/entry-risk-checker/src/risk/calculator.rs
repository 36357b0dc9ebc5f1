//! Risk-based position sizing.
//!
//! Sizes a position so that hitting the stop loses at most the configured
//! percentage of the balance, then classifies the entry:
//!
//! - `ENTRY_FORBIDDEN`: no usable stop/target, lot below minimum, or rounded
//!   risk above the allowance
//! - `CONDITIONS_NG`: sizeable but reward:risk below the minimum
//! - `ENTRY_OK`: everything else
//!
//! # Example
//!
//! ```rust
//! use entry_risk_checker::risk::{calculate_risk, PriceLevel, RiskSettings, RiskStatus, TradeInput, TradeType};
//! use rust_decimal_macros::dec;
//!
//! let input = TradeInput {
//!     currency_pair: "USD/JPY".parse().unwrap(),
//!     current_jpy_rate: None,
//!     trade_type: TradeType::Long,
//!     entry_price: dec!(150.000),
//!     stop_loss: PriceLevel::Price(dec!(149.800)),
//!     take_profit: PriceLevel::Price(dec!(150.400)),
//! };
//!
//! let result = calculate_risk(&input, &RiskSettings::default());
//! assert_eq!(result.status, RiskStatus::EntryOk);
//! assert_eq!(result.recommended_lot, dec!(0.10));
//! ```

use rust_decimal::Decimal;
use tracing::{debug, warn};

use super::constants::{HUNDRED, RATIO_DECIMALS, REFERENCE_JPY_RATE, TOLERANCE};
use super::quantize::{floor_to_step, round_half_up, round_money, step_decimals};
use super::types::{CalculationResult, RiskSettings, RiskStatus, TradeInput};

const MSG_INVALID_STOP: &str = "Enter a valid stop-loss distance.";
const MSG_INVALID_TAKE: &str = "Enter a valid take-profit distance.";
const MSG_WITHIN_RISK: &str = "Risk is within the allowed range.";
const MSG_OUT_OF_RANGE: &str = "Prices or amounts are too large to size.";

enum PipValue {
    Known(Decimal),
    MissingRate,
    Overflow,
}

struct Sizing {
    raw_lot: Decimal,
    lot: Decimal,
    actual_loss: Decimal,
    actual_risk_percent: Decimal,
    potential_profit: Decimal,
    risk_reward_ratio: Decimal,
}

// ============================================================================
// Configuration
// ============================================================================

/// Tunables for [`RiskCalculator`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RiskCalculatorConfig {
    /// Slack applied to risk and RR threshold comparisons.
    pub tolerance: Decimal,
    /// JPY rate at which `pips_value_per_lot` is considered calibrated.
    ///
    /// For non-JPY quotes the pip value is scaled by `rate / reference_jpy_rate`.
    /// This assumes the user's `pips_value_per_lot` was measured on a
    /// JPY-quoted pair when one quote unit was worth this many yen.
    pub reference_jpy_rate: Decimal,
}

impl Default for RiskCalculatorConfig {
    fn default() -> Self {
        Self {
            tolerance: TOLERANCE,
            reference_jpy_rate: REFERENCE_JPY_RATE,
        }
    }
}

// ============================================================================
// Calculator
// ============================================================================

/// Deterministic, side-effect free position sizer.
#[derive(Debug, Clone, Default)]
pub struct RiskCalculator {
    config: RiskCalculatorConfig,
}

/// Size a trade with the default calculator configuration.
#[must_use]
pub fn calculate_risk(input: &TradeInput, settings: &RiskSettings) -> CalculationResult {
    RiskCalculator::default().calculate(input, settings)
}

impl RiskCalculator {
    /// Create a calculator with custom configuration.
    #[must_use]
    pub const fn with_config(config: RiskCalculatorConfig) -> Self {
        Self { config }
    }

    /// Calculator configuration.
    #[must_use]
    pub const fn config(&self) -> &RiskCalculatorConfig {
        &self.config
    }

    /// Size `input` under `settings`.
    ///
    /// Never fails: every unusable input maps to `ENTRY_FORBIDDEN` with a
    /// message explaining why.
    #[must_use]
    pub fn calculate(&self, input: &TradeInput, settings: &RiskSettings) -> CalculationResult {
        let pair = &input.currency_pair;

        let (Some(stop_pips), Some(take_pips), Some(max_loss_budget)) = (
            input.stop_loss.to_pips(input.entry_price, pair),
            input.take_profit.to_pips(input.entry_price, pair),
            settings.max_loss_budget(),
        ) else {
            warn!(%pair, "Sizing inputs overflow decimal range");
            return CalculationResult::forbidden(MSG_OUT_OF_RANGE);
        };

        if stop_pips <= Decimal::ZERO {
            debug!(%pair, "Rejecting sizing request without stop distance");
            return CalculationResult::forbidden(MSG_INVALID_STOP);
        }
        if take_pips <= Decimal::ZERO {
            debug!(%pair, "Rejecting sizing request without target distance");
            return CalculationResult::forbidden(MSG_INVALID_TAKE);
        }

        let pip_value = match self.effective_pip_value(input, settings) {
            PipValue::Known(value) => value,
            PipValue::MissingRate => {
                warn!(%pair, "No JPY conversion rate supplied for non-JPY quote");
                return CalculationResult::forbidden(format!(
                    "A current {}/JPY rate is required to size {pair}.",
                    pair.quote()
                ));
            }
            PipValue::Overflow => {
                warn!(%pair, "Pip value overflows decimal range");
                return CalculationResult::forbidden(MSG_OUT_OF_RANGE);
            }
        };

        let Some(sized) = Self::size(settings, max_loss_budget, stop_pips, take_pips, pip_value)
        else {
            warn!(%pair, %stop_pips, %take_pips, "Sized amounts overflow decimal range");
            return CalculationResult::forbidden(MSG_OUT_OF_RANGE);
        };

        debug!(
            %pair,
            %max_loss_budget,
            %stop_pips,
            %take_pips,
            %pip_value,
            raw_lot = %sized.raw_lot,
            lot = %sized.lot,
            "Sized position"
        );

        let (status, messages) = self.classify(
            settings,
            sized.lot,
            sized.actual_risk_percent,
            sized.risk_reward_ratio,
        );

        CalculationResult {
            status,
            recommended_lot: sized.lot.round_dp(step_decimals(settings.lot_step)),
            stop_pips,
            take_pips,
            actual_loss: round_money(sized.actual_loss),
            actual_risk_percent: round_half_up(sized.actual_risk_percent, RATIO_DECIMALS),
            potential_profit: round_money(sized.potential_profit),
            risk_reward_ratio: round_half_up(sized.risk_reward_ratio, RATIO_DECIMALS),
            messages,
        }
    }

    /// Lot and money amounts for positive distances, or `None` on overflow.
    fn size(
        settings: &RiskSettings,
        max_loss_budget: Decimal,
        stop_pips: Decimal,
        take_pips: Decimal,
        pip_value: Decimal,
    ) -> Option<Sizing> {
        let loss_per_lot = stop_pips.checked_mul(pip_value)?;
        let raw_lot = if loss_per_lot > Decimal::ZERO {
            max_loss_budget.checked_div(loss_per_lot)?
        } else {
            Decimal::ZERO
        };
        let lot = floor_to_step(raw_lot, settings.lot_step);

        let actual_loss = lot.checked_mul(loss_per_lot)?;
        let actual_risk_percent = if settings.account_balance > Decimal::ZERO {
            actual_loss
                .checked_div(settings.account_balance)?
                .checked_mul(HUNDRED)?
        } else {
            Decimal::ZERO
        };
        let potential_profit = lot.checked_mul(take_pips)?.checked_mul(pip_value)?;
        let risk_reward_ratio = if actual_loss > Decimal::ZERO {
            potential_profit.checked_div(actual_loss)?
        } else {
            Decimal::ZERO
        };

        Some(Sizing {
            raw_lot,
            lot,
            actual_loss,
            actual_risk_percent,
            potential_profit,
            risk_reward_ratio,
        })
    }

    /// Money per pip per lot in account currency.
    fn effective_pip_value(&self, input: &TradeInput, settings: &RiskSettings) -> PipValue {
        if input.currency_pair.is_jpy_quote() {
            return PipValue::Known(settings.pips_value_per_lot);
        }

        let Some(rate) = input.current_jpy_rate.filter(|r| *r > Decimal::ZERO) else {
            return PipValue::MissingRate;
        };
        if self.config.reference_jpy_rate <= Decimal::ZERO {
            return PipValue::MissingRate;
        }
        rate.checked_div(self.config.reference_jpy_rate)
            .and_then(|scale| settings.pips_value_per_lot.checked_mul(scale))
            .map_or(PipValue::Overflow, PipValue::Known)
    }

    fn classify(
        &self,
        settings: &RiskSettings,
        lot: Decimal,
        actual_risk_percent: Decimal,
        risk_reward_ratio: Decimal,
    ) -> (RiskStatus, Vec<String>) {
        let tolerance = self.config.tolerance;
        let lot_dp = step_decimals(settings.lot_step);

        if lot.is_zero() || lot < settings.min_lot {
            return (
                RiskStatus::EntryForbidden,
                vec![format!(
                    "Recommended lot {} is below the minimum lot {}.",
                    lot.round_dp(lot_dp),
                    settings.min_lot
                )],
            );
        }

        if actual_risk_percent > settings.risk_percentage.saturating_add(tolerance) {
            return (
                RiskStatus::EntryForbidden,
                vec![format!(
                    "Risk after rounding ({}%) exceeds the allowed {}%.",
                    round_half_up(actual_risk_percent, RATIO_DECIMALS),
                    settings.risk_percentage
                )],
            );
        }

        if risk_reward_ratio < settings.min_risk_reward_ratio.saturating_sub(tolerance) {
            return (
                RiskStatus::ConditionsNg,
                vec![format!(
                    "Risk-reward ratio {} is below the minimum {}.",
                    round_half_up(risk_reward_ratio, RATIO_DECIMALS),
                    settings.min_risk_reward_ratio
                )],
            );
        }

        (RiskStatus::EntryOk, vec![MSG_WITHIN_RISK.to_string()])
    }
}
