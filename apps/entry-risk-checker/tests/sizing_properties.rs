//! Property tests for position sizing.
//!
//! Sizing must never exceed the risk budget, must stay on the lot grid and
//! must refuse trades without a usable stop or target.

#![allow(clippy::unwrap_used)]

use entry_risk_checker::risk::{
    CurrencyPair, PriceLevel, RiskSettings, RiskStatus, TradeInput, TradeType, calculate_risk,
};
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn settings_strategy() -> impl Strategy<Value = RiskSettings> {
    (
        1_000u64..10_000_000,
        1u32..=1_000,
        1u32..=5_000,
        prop::sample::select(vec![dec!(0.01), dec!(0.1), dec!(1)]),
        1u32..=40,
    )
        .prop_map(|(balance, risk_bp, pip_value, step, min_rr_tenths)| RiskSettings {
            account_balance: Decimal::from(balance),
            risk_percentage: Decimal::new(i64::from(risk_bp), 2),
            pips_value_per_lot: Decimal::from(pip_value),
            min_lot: step,
            lot_step: step,
            min_risk_reward_ratio: Decimal::new(i64::from(min_rr_tenths), 1),
        })
}

fn input(stop_pips: Decimal, take_pips: Decimal, side: TradeType) -> TradeInput {
    TradeInput {
        currency_pair: CurrencyPair::default(),
        current_jpy_rate: None,
        trade_type: side,
        entry_price: dec!(150.000),
        stop_loss: PriceLevel::Pips(stop_pips),
        take_profit: PriceLevel::Pips(take_pips),
    }
}

fn decimal_range() -> impl Strategy<Value = Decimal> {
    let bound = 7 * 10_i128.pow(28);
    (-bound..bound, 0u32..=10).prop_map(|(mantissa, scale)| Decimal::from_i128_with_scale(mantissa, scale))
}

fn side_strategy() -> impl Strategy<Value = TradeType> {
    prop_oneof![Just(TradeType::Long), Just(TradeType::Short)]
}

proptest! {
    #[test]
    fn realized_risk_never_exceeds_budget(
        settings in settings_strategy(),
        stop_tenths in 1u32..20_000,
        take_tenths in 1u32..40_000,
        side in side_strategy(),
    ) {
        let stop = Decimal::new(i64::from(stop_tenths), 1);
        let take = Decimal::new(i64::from(take_tenths), 1);
        let result = calculate_risk(&input(stop, take, side), &settings);

        let loss = result.recommended_lot * stop * settings.pips_value_per_lot;
        let risk_percent = loss / settings.account_balance * Decimal::ONE_HUNDRED;
        prop_assert!(risk_percent <= settings.risk_percentage + dec!(0.000001));
    }

    #[test]
    fn lot_is_on_the_grid_and_never_rounded_up(
        settings in settings_strategy(),
        stop_tenths in 1u32..20_000,
        take_tenths in 1u32..40_000,
    ) {
        let stop = Decimal::new(i64::from(stop_tenths), 1);
        let take = Decimal::new(i64::from(take_tenths), 1);
        let result = calculate_risk(&input(stop, take, TradeType::Long), &settings);

        let steps = result.recommended_lot / settings.lot_step;
        prop_assert_eq!(steps.fract(), Decimal::ZERO);

        let raw_lot = settings.max_loss_budget().unwrap() / (stop * settings.pips_value_per_lot);
        prop_assert!(result.recommended_lot <= raw_lot + dec!(0.000000001));
    }

    #[test]
    fn missing_stop_or_target_is_always_forbidden(
        settings in settings_strategy(),
        bad in -1_000i64..=0,
        good_tenths in 1i64..10_000,
        bad_side_is_stop in any::<bool>(),
    ) {
        let bad = Decimal::from(bad);
        let good = Decimal::new(good_tenths, 1);
        let trade = if bad_side_is_stop {
            input(bad, good, TradeType::Short)
        } else {
            input(good, bad, TradeType::Short)
        };
        let result = calculate_risk(&trade, &settings);

        prop_assert_eq!(result.status, RiskStatus::EntryForbidden);
        prop_assert_eq!(result.recommended_lot, Decimal::ZERO);
        prop_assert_eq!(result.messages.len(), 1);
    }

    #[test]
    fn extreme_levels_are_classified_without_panicking(
        settings in settings_strategy(),
        entry in decimal_range(),
        stop in decimal_range(),
        take in decimal_range(),
        stop_is_price in any::<bool>(),
        take_is_price in any::<bool>(),
    ) {
        let level = |value: Decimal, is_price: bool| {
            if is_price { PriceLevel::Price(value) } else { PriceLevel::Pips(value) }
        };
        let trade = TradeInput {
            entry_price: entry,
            stop_loss: level(stop, stop_is_price),
            take_profit: level(take, take_is_price),
            ..input(Decimal::ONE, Decimal::ONE, TradeType::Long)
        };
        let result = calculate_risk(&trade, &settings);
        prop_assert!(!result.messages.is_empty());
    }

    #[test]
    fn messages_are_never_empty(
        settings in settings_strategy(),
        stop_tenths in 1u32..20_000,
        take_tenths in 1u32..40_000,
    ) {
        let stop = Decimal::new(i64::from(stop_tenths), 1);
        let take = Decimal::new(i64::from(take_tenths), 1);
        let result = calculate_risk(&input(stop, take, TradeType::Long), &settings);
        prop_assert!(!result.messages.is_empty());
    }
}

#[test]
fn displayed_lot_round_trips_through_its_string_form() {
    let settings = RiskSettings::default();
    let result = calculate_risk(&input(dec!(33), dec!(70), TradeType::Long), &settings);

    let shown = format!("{:.2}", result.recommended_lot);
    let parsed: Decimal = shown.parse().unwrap();

    assert_eq!(parsed, result.recommended_lot);
    assert_eq!(parsed * dec!(33) * settings.pips_value_per_lot, result.actual_loss);
}

#[test]
fn reference_examples() {
    let settings = RiskSettings::default();
    let trade = TradeInput {
        stop_loss: PriceLevel::Price(dec!(149.800)),
        take_profit: PriceLevel::Price(dec!(150.400)),
        ..input(Decimal::ZERO, Decimal::ZERO, TradeType::Long)
    };

    let ok = calculate_risk(&trade, &settings);
    assert_eq!(ok.status, RiskStatus::EntryOk);
    assert_eq!(ok.recommended_lot, dec!(0.10));
    assert_eq!(ok.actual_loss, dec!(2000));
    assert_eq!(ok.actual_risk_percent, dec!(2.00));
    assert_eq!(ok.potential_profit, dec!(4000));
    assert_eq!(ok.risk_reward_ratio, dec!(2.00));

    let strict = RiskSettings {
        min_risk_reward_ratio: dec!(2.5),
        ..settings.clone()
    };
    let ng = calculate_risk(&trade, &strict);
    assert_eq!(ng.status, RiskStatus::ConditionsNg);
    assert_eq!(ng.recommended_lot, ok.recommended_lot);
    assert_eq!(ng.actual_loss, ok.actual_loss);

    let too_wide = calculate_risk(&input(dec!(500), dec!(1000), TradeType::Long), &settings);
    assert_eq!(too_wide.status, RiskStatus::EntryForbidden);
    assert_eq!(too_wide.recommended_lot, Decimal::ZERO);
}
