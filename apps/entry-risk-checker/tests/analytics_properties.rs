//! Consistency checks across the analytics breakdowns.

#![allow(clippy::unwrap_used)]

use chrono::{Duration, FixedOffset, TimeZone, Utc};
use entry_risk_checker::analytics::{
    AnalyticsReport, GroupedStats, by_currency, calculate_streaks, calculate_summary,
};
use entry_risk_checker::journal::{ExitType, RuleCompliance, TradeRecord, TradeResult};
use proptest::prelude::*;
use rust_decimal::Decimal;

fn record_strategy() -> impl Strategy<Value = TradeRecord> {
    (
        prop::sample::select(vec!["", "USD/JPY", "EUR/JPY", "GBP/USD", "AUD/USD"]),
        prop::option::of(any::<bool>()),
        1u32..100_000,
        0i64..(24 * 365),
        prop::option::of(0i64..(60 * 72)),
        0u32..40,
        prop::option::of(prop::sample::select(vec![
            ExitType::TakeProfit,
            ExitType::StopLoss,
            ExitType::Manual,
        ])),
    )
        .prop_map(|(pair, win, pnl, hour, held, rr_tenths, exit_type)| {
            let entry_time = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + Duration::hours(hour);
            let pnl = Decimal::from(pnl);
            TradeRecord {
                id: format!("{pair}-{hour}"),
                currency_pair: pair.to_string(),
                entry_time,
                exit_time: held.map(|m| entry_time + Duration::minutes(m)),
                result: win.map(|w| if w { TradeResult::Win } else { TradeResult::Loss }),
                potential_profit: pnl,
                planned_loss: pnl,
                risk_reward_ratio: Decimal::new(i64::from(rr_tenths), 1),
                exit_type,
                ..TradeRecord::default()
            }
        })
}

fn total(stats: &[GroupedStats]) -> usize {
    stats.iter().map(|s| s.count).sum()
}

fn net(stats: &[GroupedStats]) -> Decimal {
    stats.iter().map(|s| s.net_profit).sum()
}

proptest! {
    #[test]
    fn every_finished_trade_lands_in_one_currency_bucket(
        records in prop::collection::vec(record_strategy(), 0..60),
    ) {
        let finished = records.iter().filter(|r| r.result.is_some()).count();
        prop_assert_eq!(total(&by_currency(&records)), finished);
    }

    #[test]
    fn single_key_breakdowns_partition_the_summary(
        records in prop::collection::vec(record_strategy(), 0..60),
        offset_hours in -12i32..=14,
    ) {
        let offset = FixedOffset::east_opt(offset_hours * 3600).unwrap();
        let report = AnalyticsReport::build(&records, offset);
        let summary = &report.summary;

        for breakdown in [
            &report.by_currency,
            &report.by_entry_basis,
            &report.by_weekday,
            &report.by_hour,
            &report.by_risk_reward,
            &report.by_holding_time,
            &report.by_exit_type,
        ] {
            prop_assert_eq!(total(breakdown), summary.total_trades);
            prop_assert_eq!(net(breakdown), summary.net_profit);
        }
        prop_assert_eq!(summary.win_count + summary.loss_count, summary.total_trades);
    }

    #[test]
    fn currency_breakdown_is_sorted_by_profit(
        records in prop::collection::vec(record_strategy(), 0..60),
    ) {
        let stats = by_currency(&records);
        prop_assert!(stats.windows(2).all(|w| w[0].net_profit >= w[1].net_profit));
    }
}

#[test]
fn empty_history_is_all_zero() {
    let summary = calculate_summary(&[]);
    assert_eq!(summary.total_trades, 0);
    assert_eq!(summary.win_rate, Decimal::ZERO);
    assert_eq!(summary.profit_factor, Decimal::ZERO);
    assert_eq!(summary.average_rr, Decimal::ZERO);
}

#[test]
fn win_win_loss_win_streaks() {
    let start = Utc.with_ymd_and_hms(2024, 6, 3, 0, 0, 0).unwrap();
    let results = [TradeResult::Win, TradeResult::Win, TradeResult::Loss, TradeResult::Win];
    let records: Vec<_> = results
        .iter()
        .zip(1i64..)
        .map(|(result, day)| TradeRecord {
            entry_time: start,
            exit_time: Some(start + Duration::days(day)),
            result: Some(*result),
            ..TradeRecord::default()
        })
        .collect();

    let streaks = calculate_streaks(&records);
    assert_eq!(streaks.current_streak, 1);
    assert_eq!(streaks.max_win_streak, 2);
    assert_eq!(streaks.max_loss_streak, 1);
}

#[test]
fn violation_buckets_only_count_classified_trades() {
    let base = TradeRecord {
        result: Some(TradeResult::Loss),
        planned_loss: Decimal::from(1000),
        ..TradeRecord::default()
    };
    let records = vec![
        TradeRecord {
            rule_compliance: Some(RuleCompliance::Partial),
            violated_rules: vec!["Never move the stop-loss".to_string()],
            ..base.clone()
        },
        TradeRecord {
            rule_compliance: Some(RuleCompliance::Full),
            ..base.clone()
        },
        base,
    ];

    let report = AnalyticsReport::build(&records, FixedOffset::east_opt(0).unwrap());
    assert_eq!(total(&report.by_rule_compliance), 2);
    assert_eq!(report.top_violated_rules.len(), 1);
    assert_eq!(report.top_violated_rules[0].key, "Never move the stop-loss");
    assert_eq!(report.top_violated_rules[0].net_profit, Decimal::from(-1000));
}
