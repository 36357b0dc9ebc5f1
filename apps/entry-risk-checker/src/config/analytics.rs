//! Journal analytics configuration.

use chrono::{FixedOffset, Offset, Utc};
use serde::{Deserialize, Serialize};

use crate::analytics::{DEFAULT_TOP_RULE_COUNT, ReportOptions};

/// Analytics configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsConfig {
    /// Offset from UTC, in minutes, used for weekday and hour breakdowns.
    #[serde(default)]
    pub utc_offset_minutes: i32,
    /// Number of broken rules listed in reports.
    #[serde(default = "default_top_rule_count")]
    pub top_rule_count: usize,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            utc_offset_minutes: 0,
            top_rule_count: default_top_rule_count(),
        }
    }
}

impl AnalyticsConfig {
    /// The configured offset, or `None` if out of range.
    #[must_use]
    pub fn offset(&self) -> Option<FixedOffset> {
        self.utc_offset_minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
    }

    /// Report options for this configuration. An invalid offset falls back to UTC.
    #[must_use]
    pub fn report_options(&self) -> ReportOptions {
        ReportOptions {
            offset: self.offset().unwrap_or_else(|| Utc.fix()),
            top_rule_count: self.top_rule_count,
        }
    }
}

const fn default_top_rule_count() -> usize {
    DEFAULT_TOP_RULE_COUNT
}
