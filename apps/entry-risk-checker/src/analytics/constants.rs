//! Labels and limits for journal statistics.

use rust_decimal::Decimal;

pub const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// Profit factor reported when there is profit but no loss.
pub const PROFIT_FACTOR_CAP: Decimal = Decimal::from_parts(999, 0, 0, false, 0);

/// Pair assumed for records saved before the pair was tracked.
pub const DEFAULT_PAIR: &str = "USD/JPY";

/// Group for records without entry-basis tags.
pub const UNLABELED: &str = "Unlabeled";

/// Bucket label for trades that followed every rule.
pub const FULL_COMPLIANCE_LABEL: &str = "完全遵守";

/// Number of rules returned by `top_violated_rules` in reports.
pub const DEFAULT_TOP_RULE_COUNT: usize = 3;

pub const WEEKDAYS: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

pub const RISK_REWARD_BUCKETS: [&str; 4] = ["<1.0", "1.0-1.5", "1.5-2.0", ">=2.0"];

pub const HOLDING_TIME_BUCKETS: [&str; 6] = ["Unresolved", "<1h", "1-4h", "4-12h", "12-24h", ">24h"];

pub const EXIT_TYPE_BUCKETS: [&str; 4] = ["TP hit", "SL hit", "Manual", "Unknown"];
