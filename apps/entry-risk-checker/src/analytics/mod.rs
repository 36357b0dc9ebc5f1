//! Trade-journal statistics.
//!
//! Pure functions over `&[TradeRecord]`. Only trades with a recorded result
//! count; open trades are skipped everywhere.
//!
//! - Summary: win rate, P&L totals and averages, profit factor, RR range
//! - Breakdowns by pair, entry basis, weekday, hour, rule compliance,
//!   reward:risk, holding time and exit type
//! - Most frequently broken rules
//! - Win/loss streaks in exit order

mod constants;
mod grouping;
mod report;
mod streaks;
mod summary;
mod types;

pub use constants::{DEFAULT_PAIR, DEFAULT_TOP_RULE_COUNT, FULL_COMPLIANCE_LABEL, UNLABELED};
pub use grouping::{
    by_currency, by_entry_basis, by_exit_type, by_holding_time, by_hour, by_risk_reward,
    by_rule_compliance, by_weekday, compliance_label, exit_type_bucket, group_stats,
    holding_time_bucket, risk_reward_bucket, top_violated_rules,
};
pub use report::{AnalyticsReport, ReportOptions};
pub use streaks::calculate_streaks;
pub use summary::calculate_summary;
pub use types::{AnalyticsSummary, GroupedStats, StreakStats};
