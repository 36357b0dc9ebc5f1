//! Every statistic in one bundle.

use chrono::{FixedOffset, Offset, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::constants::DEFAULT_TOP_RULE_COUNT;
use super::grouping::{
    by_currency, by_entry_basis, by_exit_type, by_holding_time, by_hour, by_risk_reward,
    by_rule_compliance, by_weekday, top_violated_rules,
};
use super::streaks::calculate_streaks;
use super::summary::calculate_summary;
use super::types::{AnalyticsSummary, GroupedStats, StreakStats};
use crate::journal::TradeRecord;

/// Options for [`AnalyticsReport::build_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportOptions {
    /// Time zone for weekday and hour breakdowns.
    pub offset: FixedOffset,
    /// How many broken rules to list.
    pub top_rule_count: usize,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            offset: Utc.fix(),
            top_rule_count: DEFAULT_TOP_RULE_COUNT,
        }
    }
}

/// Summary, breakdowns and streaks for one history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyticsReport {
    /// Headline statistics.
    pub summary: AnalyticsSummary,
    /// Win/loss runs.
    pub streaks: StreakStats,
    /// Per currency pair.
    pub by_currency: Vec<GroupedStats>,
    /// Per entry-basis tag.
    pub by_entry_basis: Vec<GroupedStats>,
    /// Per weekday.
    pub by_weekday: Vec<GroupedStats>,
    /// Per hour of day.
    pub by_hour: Vec<GroupedStats>,
    /// Per compliance bucket.
    pub by_rule_compliance: Vec<GroupedStats>,
    /// Per reward:risk bucket.
    pub by_risk_reward: Vec<GroupedStats>,
    /// Per holding-time bucket.
    pub by_holding_time: Vec<GroupedStats>,
    /// Per exit type.
    pub by_exit_type: Vec<GroupedStats>,
    /// Most frequently broken rules.
    pub top_violated_rules: Vec<GroupedStats>,
}

impl AnalyticsReport {
    /// Build a report with calendar breakdowns in `offset`.
    #[must_use]
    pub fn build(records: &[TradeRecord], offset: FixedOffset) -> Self {
        Self::build_with(
            records,
            &ReportOptions {
                offset,
                ..ReportOptions::default()
            },
        )
    }

    /// Build a report with explicit options.
    #[must_use]
    pub fn build_with(records: &[TradeRecord], options: &ReportOptions) -> Self {
        let report = Self {
            summary: calculate_summary(records),
            streaks: calculate_streaks(records),
            by_currency: by_currency(records),
            by_entry_basis: by_entry_basis(records),
            by_weekday: by_weekday(records, options.offset),
            by_hour: by_hour(records, options.offset),
            by_rule_compliance: by_rule_compliance(records),
            by_risk_reward: by_risk_reward(records),
            by_holding_time: by_holding_time(records),
            by_exit_type: by_exit_type(records),
            top_violated_rules: top_violated_rules(records, options.top_rule_count),
        };

        debug!(
            records = records.len(),
            finished = report.summary.total_trades,
            offset = %options.offset,
            "Built analytics report"
        );

        report
    }
}
