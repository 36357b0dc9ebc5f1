//! Statistic types produced from the journal.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Aggregate statistics over finished trades.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyticsSummary {
    /// Finished trades.
    pub total_trades: usize,
    /// Wins.
    pub win_count: usize,
    /// Losses.
    pub loss_count: usize,
    /// Win percentage (0-100).
    pub win_rate: Decimal,
    /// Sum of winning P&L.
    pub total_profit: Decimal,
    /// Sum of losing P&L (zero or negative).
    pub total_loss: Decimal,
    /// `total_profit + total_loss`.
    pub net_profit: Decimal,
    /// Mean winning P&L.
    pub average_profit: Decimal,
    /// Mean losing P&L as a magnitude.
    pub average_loss: Decimal,
    /// `total_profit / |total_loss|`, capped at 999 when there is no loss.
    pub profit_factor: Decimal,
    /// Largest win.
    pub max_win: Decimal,
    /// Largest loss as a magnitude.
    pub max_loss: Decimal,
    /// Mean planned reward:risk.
    pub average_rr: Decimal,
    /// Highest planned reward:risk.
    pub max_rr: Decimal,
    /// Lowest planned reward:risk.
    pub min_rr: Decimal,
}

/// Statistics for one bucket of a breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupedStats {
    /// Bucket label.
    pub key: String,
    /// Trades in the bucket.
    pub count: usize,
    /// Wins in the bucket.
    pub win_count: usize,
    /// Win percentage (0-100).
    pub win_rate: Decimal,
    /// Net P&L.
    pub net_profit: Decimal,
}

impl GroupedStats {
    pub(crate) fn from_summary(key: String, summary: &AnalyticsSummary) -> Self {
        Self {
            key,
            count: summary.total_trades,
            win_count: summary.win_count,
            win_rate: summary.win_rate,
            net_profit: summary.net_profit,
        }
    }
}

/// Consecutive win/loss statistics in exit order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakStats {
    /// Streak in progress: positive for wins, negative for losses.
    pub current_streak: i64,
    /// Longest run of wins.
    pub max_win_streak: usize,
    /// Longest run of losses.
    pub max_loss_streak: usize,
    /// Mean length of win runs.
    pub average_win_streak: Decimal,
    /// Mean length of loss runs.
    pub average_loss_streak: Decimal,
}
