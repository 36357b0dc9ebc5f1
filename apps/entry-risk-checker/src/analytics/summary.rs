//! Headline statistics over finished trades.

use rust_decimal::Decimal;

use super::constants::{HUNDRED, PROFIT_FACTOR_CAP};
use super::types::AnalyticsSummary;
use crate::journal::{TradeRecord, TradeResult};

/// Summarise every finished trade in `records`.
///
/// Open trades are ignored. Actual P&L is used where recorded, planned P&L
/// otherwise. An empty or all-open history yields an all-zero summary.
#[must_use]
pub fn calculate_summary(records: &[TradeRecord]) -> AnalyticsSummary {
    summarize(records)
}

pub(crate) fn summarize<'a, I>(records: I) -> AnalyticsSummary
where
    I: IntoIterator<Item = &'a TradeRecord>,
{
    let mut total_trades = 0usize;
    let mut win_count = 0usize;
    let mut loss_count = 0usize;
    let mut total_profit = Decimal::ZERO;
    let mut total_loss = Decimal::ZERO;
    let mut max_win = Decimal::ZERO;
    let mut max_loss = Decimal::ZERO;
    let mut rr_sum = Decimal::ZERO;
    let mut max_rr: Option<Decimal> = None;
    let mut min_rr: Option<Decimal> = None;

    for record in records {
        let (Some(result), Some(pnl)) = (record.result, record.realized_pnl()) else {
            continue;
        };
        total_trades += 1;

        match result {
            TradeResult::Win => {
                win_count += 1;
                total_profit += pnl;
                max_win = max_win.max(pnl);
            }
            TradeResult::Loss => {
                loss_count += 1;
                total_loss += pnl;
                max_loss = max_loss.max(pnl.abs());
            }
        }

        let rr = record.risk_reward_ratio;
        rr_sum += rr;
        max_rr = Some(max_rr.map_or(rr, |m| m.max(rr)));
        min_rr = Some(min_rr.map_or(rr, |m| m.min(rr)));
    }

    if total_trades == 0 {
        return AnalyticsSummary::default();
    }

    let trades = Decimal::from(total_trades);
    let average_profit = if win_count > 0 {
        total_profit / Decimal::from(win_count)
    } else {
        Decimal::ZERO
    };
    let average_loss = if loss_count > 0 {
        (total_loss / Decimal::from(loss_count)).abs()
    } else {
        Decimal::ZERO
    };

    AnalyticsSummary {
        total_trades,
        win_count,
        loss_count,
        win_rate: Decimal::from(win_count) / trades * HUNDRED,
        total_profit,
        total_loss,
        net_profit: total_profit + total_loss,
        average_profit,
        average_loss,
        profit_factor: profit_factor(total_profit, total_loss),
        max_win,
        max_loss,
        average_rr: rr_sum / trades,
        max_rr: max_rr.unwrap_or_default(),
        min_rr: min_rr.unwrap_or_default(),
    }
}

fn profit_factor(total_profit: Decimal, total_loss: Decimal) -> Decimal {
    if !total_loss.is_zero() {
        total_profit / total_loss.abs()
    } else if total_profit > Decimal::ZERO {
        PROFIT_FACTOR_CAP
    } else {
        Decimal::ZERO
    }
}
