// Allow unwrap/expect in tests - tests should panic on unexpected errors
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::too_many_lines,
        clippy::needless_pass_by_value,
        clippy::needless_collect,
        clippy::default_trait_access,
        clippy::items_after_statements
    )
)]

//! Entry Risk Checker - Rust Core Library
//!
//! Position sizing and trade-journal analytics for discretionary FX trading.
//!
//! # Modules
//!
//! - [`risk`]: sizes a position from balance, risk tolerance and stop/target
//!   distances, then classifies the entry
//! - [`journal`]: trade records opened from sizing results, closed once with
//!   the actual outcome, reviewed against personal rules
//! - [`analytics`]: summaries, breakdowns and streaks over the journal
//! - [`config`]: YAML configuration with environment interpolation
//! - [`telemetry`]: tracing subscriber setup
//!
//! The sizing calculator and the analytics engine are pure and independent;
//! the journal and the calling layer tie them together.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]

pub mod analytics;
pub mod commands;
pub mod config;
pub mod error;
pub mod journal;
pub mod risk;
pub mod telemetry;

pub use analytics::{AnalyticsReport, AnalyticsSummary, GroupedStats, StreakStats};
pub use config::{Config, ConfigError, load_config, load_config_from_string};
pub use error::{Error, Result};
pub use journal::{JournalError, TradeHistory, TradeRecord};
pub use risk::{
    CalculationResult, RiskCalculator, RiskSettings, RiskStatus, TradeInput, calculate_risk,
};
