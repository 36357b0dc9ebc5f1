//! Lot quantization and display rounding.
//!
//! Lots are always floored to the configured step so that rounding can only
//! shrink the position, never grow it past the risk budget.

use rust_decimal::{Decimal, RoundingStrategy};

use super::constants::QUANTIZE_EPSILON;

/// Number of decimal places carried by a lot step (`0.01` -> 2, `0.1` -> 1, `1` -> 0).
#[must_use]
pub fn step_decimals(step: Decimal) -> u32 {
    step.normalize().scale()
}

/// Floor `value` to a whole multiple of `step`.
///
/// Returns zero for a non-positive step or value. The result is re-rounded to
/// the step's precision so that it formats and parses back to the same number.
#[must_use]
pub fn floor_to_step(value: Decimal, step: Decimal) -> Decimal {
    if step <= Decimal::ZERO || value <= Decimal::ZERO {
        return Decimal::ZERO;
    }

    let Some(scaled) = value.checked_div(step) else {
        return Decimal::ZERO;
    };
    let steps = scaled.saturating_add(QUANTIZE_EPSILON).floor();

    steps
        .checked_mul(step)
        .map_or(Decimal::ZERO, |lot| lot.round_dp(step_decimals(step)))
}

/// Round half away from zero to `dp` decimal places.
#[must_use]
pub fn round_half_up(value: Decimal, dp: u32) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}

/// Round a money amount to a whole currency unit.
#[must_use]
pub fn round_money(value: Decimal) -> Decimal {
    round_half_up(value, 0)
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;
    use test_case::test_case;

    use super::*;

    #[test_case(dec!(0.01), 2)]
    #[test_case(dec!(0.1), 1)]
    #[test_case(dec!(0.10), 1)]
    #[test_case(dec!(1), 0)]
    #[test_case(dec!(0.001), 3)]
    fn test_step_decimals(step: Decimal, expected: u32) {
        assert_eq!(step_decimals(step), expected);
    }

    #[test_case(dec!(0.1), dec!(0.01), dec!(0.10))]
    #[test_case(dec!(0.129), dec!(0.01), dec!(0.12))]
    #[test_case(dec!(0.004), dec!(0.01), dec!(0))]
    #[test_case(dec!(2.75), dec!(0.5), dec!(2.5))]
    #[test_case(dec!(3.99), dec!(1), dec!(3))]
    fn test_floor_to_step(value: Decimal, step: Decimal, expected: Decimal) {
        assert_eq!(floor_to_step(value, step), expected);
    }

    #[test]
    fn test_floor_absorbs_representation_error() {
        // 0.3 / 0.1 computed through a lossy path lands a hair below 3 steps
        let value = dec!(0.2999999999999999);
        assert_eq!(floor_to_step(value, dec!(0.1)), dec!(0.3));
    }

    #[test]
    fn test_floor_rejects_degenerate_inputs() {
        assert_eq!(floor_to_step(dec!(1.5), Decimal::ZERO), Decimal::ZERO);
        assert_eq!(floor_to_step(dec!(1.5), dec!(-0.01)), Decimal::ZERO);
        assert_eq!(floor_to_step(dec!(-1.5), dec!(0.01)), Decimal::ZERO);
    }

    #[test]
    fn test_floored_lot_survives_format_round_trip() {
        let lot = floor_to_step(dec!(0.3456789), dec!(0.01));
        let shown = format!("{lot:.2}");
        let parsed: Decimal = shown.parse().unwrap();
        assert_eq!(parsed, lot);
    }

    #[test]
    fn test_round_money_half_away_from_zero() {
        assert_eq!(round_money(dec!(2000.5)), dec!(2001));
        assert_eq!(round_money(dec!(1999.49)), dec!(1999));
        assert_eq!(round_half_up(dec!(1.005), 2), dec!(1.01));
    }
}
