//! Sizing calculator tunables.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::risk::{REFERENCE_JPY_RATE, RiskCalculator, RiskCalculatorConfig, TOLERANCE};

/// Calculator configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculatorConfig {
    /// Slack on risk and reward:risk threshold comparisons.
    #[serde(default = "default_tolerance")]
    pub tolerance: Decimal,
    /// JPY rate at which `risk.pips_value_per_lot` was measured.
    #[serde(default = "default_reference_jpy_rate")]
    pub reference_jpy_rate: Decimal,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            tolerance: default_tolerance(),
            reference_jpy_rate: default_reference_jpy_rate(),
        }
    }
}

impl CalculatorConfig {
    /// Build a calculator from this configuration.
    #[must_use]
    pub fn to_calculator(&self) -> RiskCalculator {
        RiskCalculator::with_config(RiskCalculatorConfig {
            tolerance: self.tolerance,
            reference_jpy_rate: self.reference_jpy_rate,
        })
    }
}

const fn default_tolerance() -> Decimal {
    TOLERANCE
}

const fn default_reference_jpy_rate() -> Decimal {
    REFERENCE_JPY_RATE
}
