//! Decimal constants for position sizing.

use rust_decimal::Decimal;

pub const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// Pips per price unit for JPY-quoted pairs (1 pip = 0.01).
pub const JPY_PIP_MULTIPLIER: Decimal = Decimal::from_parts(100, 0, 0, false, 0);

/// Pips per price unit for every other quote currency (1 pip = 0.0001).
pub const STANDARD_PIP_MULTIPLIER: Decimal = Decimal::from_parts(10_000, 0, 0, false, 0);

/// Threshold tolerance for risk and RR comparisons.
pub const TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 6); // 0.000001

/// Slack added before flooring a lot to its step.
pub const QUANTIZE_EPSILON: Decimal = Decimal::from_parts(1, 0, 0, false, 12); // 1e-12

/// JPY rate at which `pips_value_per_lot` is assumed to be calibrated.
pub const REFERENCE_JPY_RATE: Decimal = Decimal::ONE_HUNDRED;

/// Decimal places kept when a price distance is converted to pips.
pub const PIPS_DECIMALS: u32 = 1;

/// Decimal places for risk percent and RR ratio display.
pub const RATIO_DECIMALS: u32 = 2;
