//! Breakdowns of the journal by a grouping key.
//!
//! Every breakdown is built on [`group_stats`]: finished trades are fanned out
//! to each key their extractor yields, then each group is summarised.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use chrono::{Datelike, Duration, FixedOffset, Timelike};
use rust_decimal::Decimal;

use super::constants::{
    DEFAULT_PAIR, EXIT_TYPE_BUCKETS, FULL_COMPLIANCE_LABEL, HOLDING_TIME_BUCKETS,
    RISK_REWARD_BUCKETS, UNLABELED, WEEKDAYS,
};
use super::summary::summarize;
use super::types::GroupedStats;
use crate::journal::{ExitType, RuleCompliance, TradeRecord};

// ============================================================================
// Grouping primitive
// ============================================================================

/// Group finished trades by the keys `key_fn` yields, sorted by net profit
/// descending.
///
/// A trade yielding several keys counts once in each; a trade yielding none
/// is left out. Ties keep key order.
#[must_use]
pub fn group_stats<F>(records: &[TradeRecord], key_fn: F) -> Vec<GroupedStats>
where
    F: Fn(&TradeRecord) -> Vec<String>,
{
    let mut groups: BTreeMap<String, Vec<&TradeRecord>> = BTreeMap::new();

    for record in records.iter().filter(|r| r.is_finished()) {
        let mut keys = key_fn(record);
        keys.sort_unstable();
        keys.dedup();
        for key in keys {
            groups.entry(key).or_default().push(record);
        }
    }

    let mut stats: Vec<GroupedStats> = groups
        .into_iter()
        .map(|(key, members)| GroupedStats::from_summary(key, &summarize(members)))
        .collect();
    stats.sort_by(|a, b| b.net_profit.cmp(&a.net_profit));
    stats
}

/// Re-sort a breakdown into a fixed label order. Unknown labels go last.
fn order_by_labels(mut stats: Vec<GroupedStats>, labels: &[&str]) -> Vec<GroupedStats> {
    let rank = |key: &str| labels.iter().position(|l| *l == key).unwrap_or(labels.len());
    stats.sort_by_key(|s| rank(&s.key));
    stats
}

// ============================================================================
// Profit-sorted breakdowns
// ============================================================================

/// Per currency pair. Records without a pair count as USD/JPY.
#[must_use]
pub fn by_currency(records: &[TradeRecord]) -> Vec<GroupedStats> {
    group_stats(records, |r| {
        let pair = r.currency_pair.trim();
        vec![if pair.is_empty() { DEFAULT_PAIR } else { pair }.to_string()]
    })
}

/// Per entry-basis tag. Untagged records are grouped as "Unlabeled".
#[must_use]
pub fn by_entry_basis(records: &[TradeRecord]) -> Vec<GroupedStats> {
    group_stats(records, |r| {
        if r.entry_basis.is_empty() {
            vec![UNLABELED.to_string()]
        } else {
            r.entry_basis.clone()
        }
    })
}

// ============================================================================
// Calendar breakdowns
// ============================================================================

/// Per weekday of entry in `offset`, Sunday first.
#[must_use]
pub fn by_weekday(records: &[TradeRecord], offset: FixedOffset) -> Vec<GroupedStats> {
    let stats = group_stats(records, |r| {
        let day = r.entry_time.with_timezone(&offset).weekday();
        let index = usize::try_from(day.num_days_from_sunday()).unwrap_or_default();
        vec![WEEKDAYS[index].to_string()]
    });
    order_by_labels(stats, &WEEKDAYS)
}

/// Per hour of entry in `offset`, labelled `HH:00`.
#[must_use]
pub fn by_hour(records: &[TradeRecord], offset: FixedOffset) -> Vec<GroupedStats> {
    let mut stats = group_stats(records, |r| {
        vec![format!("{:02}:00", r.entry_time.with_timezone(&offset).hour())]
    });
    stats.sort_by(|a, b| a.key.cmp(&b.key));
    stats
}

// ============================================================================
// Discipline breakdowns
// ============================================================================

/// Label for a compliance classification, or `None` when unclassified.
#[must_use]
pub fn compliance_label(record: &TradeRecord) -> Option<String> {
    match record.rule_compliance? {
        RuleCompliance::Full => Some(FULL_COMPLIANCE_LABEL.to_string()),
        RuleCompliance::Partial | RuleCompliance::Violated => {
            Some(format!("違反{}件", record.violated_rules.len()))
        }
    }
}

fn compare_compliance_labels(a: &str, b: &str) -> Ordering {
    let rank = |label: &str| u8::from(label != FULL_COMPLIANCE_LABEL);
    rank(a).cmp(&rank(b)).then_with(|| a.cmp(b))
}

/// Per compliance bucket: full compliance first, then violation buckets in
/// label order (`違反10件` sorts before `違反2件`). Unclassified records are
/// left out.
#[must_use]
pub fn by_rule_compliance(records: &[TradeRecord]) -> Vec<GroupedStats> {
    let mut stats = group_stats(records, |r| compliance_label(r).into_iter().collect());
    stats.sort_by(|a, b| compare_compliance_labels(&a.key, &b.key));
    stats
}

/// The `limit` most frequently broken rules.
///
/// Only trades classified as partial or violated count. Each rule's stats
/// cover just the trades that broke it. Ties are broken by rule name.
#[must_use]
pub fn top_violated_rules(records: &[TradeRecord], limit: usize) -> Vec<GroupedStats> {
    let mut stats = group_stats(records, |r| match r.rule_compliance {
        Some(c) if c.is_violation() => r.violated_rules.clone(),
        _ => Vec::new(),
    });
    stats.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.key.cmp(&b.key)));
    stats.truncate(limit);
    stats
}

// ============================================================================
// Trade-shape breakdowns
// ============================================================================

/// Bucket label for a planned reward:risk ratio.
#[must_use]
pub fn risk_reward_bucket(ratio: Decimal) -> &'static str {
    if ratio < Decimal::ONE {
        RISK_REWARD_BUCKETS[0]
    } else if ratio < Decimal::new(15, 1) {
        RISK_REWARD_BUCKETS[1]
    } else if ratio < Decimal::TWO {
        RISK_REWARD_BUCKETS[2]
    } else {
        RISK_REWARD_BUCKETS[3]
    }
}

/// Per planned reward:risk bucket.
#[must_use]
pub fn by_risk_reward(records: &[TradeRecord]) -> Vec<GroupedStats> {
    let stats = group_stats(records, |r| {
        vec![risk_reward_bucket(r.risk_reward_ratio).to_string()]
    });
    order_by_labels(stats, &RISK_REWARD_BUCKETS)
}

/// Bucket label for a holding time; `None` means no exit time.
#[must_use]
pub fn holding_time_bucket(held: Option<Duration>) -> &'static str {
    let Some(held) = held else {
        return HOLDING_TIME_BUCKETS[0];
    };
    if held < Duration::hours(1) {
        HOLDING_TIME_BUCKETS[1]
    } else if held < Duration::hours(4) {
        HOLDING_TIME_BUCKETS[2]
    } else if held < Duration::hours(12) {
        HOLDING_TIME_BUCKETS[3]
    } else if held <= Duration::hours(24) {
        HOLDING_TIME_BUCKETS[4]
    } else {
        HOLDING_TIME_BUCKETS[5]
    }
}

/// Per holding-time bucket.
#[must_use]
pub fn by_holding_time(records: &[TradeRecord]) -> Vec<GroupedStats> {
    let stats = group_stats(records, |r| {
        vec![holding_time_bucket(r.holding_time()).to_string()]
    });
    order_by_labels(stats, &HOLDING_TIME_BUCKETS)
}

/// Bucket label for an exit type.
#[must_use]
pub const fn exit_type_bucket(exit_type: Option<ExitType>) -> &'static str {
    match exit_type {
        Some(ExitType::TakeProfit) => EXIT_TYPE_BUCKETS[0],
        Some(ExitType::StopLoss) => EXIT_TYPE_BUCKETS[1],
        Some(ExitType::Manual) => EXIT_TYPE_BUCKETS[2],
        None => EXIT_TYPE_BUCKETS[3],
    }
}

/// Per exit type.
#[must_use]
pub fn by_exit_type(records: &[TradeRecord]) -> Vec<GroupedStats> {
    let stats = group_stats(records, |r| vec![exit_type_bucket(r.exit_type).to_string()]);
    order_by_labels(stats, &EXIT_TYPE_BUCKETS)
}
