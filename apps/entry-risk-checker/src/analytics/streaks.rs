//! Consecutive win/loss runs.

use rust_decimal::Decimal;

use super::types::StreakStats;
use crate::journal::{TradeRecord, TradeResult};

/// Walk finished trades in exit order and measure win/loss runs.
///
/// Trades without an exit time cannot be placed in the sequence and are
/// skipped. Trades sharing an exit time keep their input order.
#[must_use]
pub fn calculate_streaks(records: &[TradeRecord]) -> StreakStats {
    let mut sequence: Vec<_> = records
        .iter()
        .filter_map(|r| Some((r.exit_time?, r.result?)))
        .collect();
    sequence.sort_by_key(|(exit, _)| *exit);

    let mut current: i64 = 0;
    let mut win_runs: Vec<usize> = Vec::new();
    let mut loss_runs: Vec<usize> = Vec::new();

    for (_, result) in sequence {
        match result {
            TradeResult::Win => {
                if current < 0 {
                    loss_runs.push(current.unsigned_abs() as usize);
                    current = 0;
                }
                current += 1;
            }
            TradeResult::Loss => {
                if current > 0 {
                    win_runs.push(current.unsigned_abs() as usize);
                    current = 0;
                }
                current -= 1;
            }
        }
    }

    match current.cmp(&0) {
        std::cmp::Ordering::Greater => win_runs.push(current.unsigned_abs() as usize),
        std::cmp::Ordering::Less => loss_runs.push(current.unsigned_abs() as usize),
        std::cmp::Ordering::Equal => {}
    }

    StreakStats {
        current_streak: current,
        max_win_streak: win_runs.iter().copied().max().unwrap_or(0),
        max_loss_streak: loss_runs.iter().copied().max().unwrap_or(0),
        average_win_streak: mean_run(&win_runs),
        average_loss_streak: mean_run(&loss_runs),
    }
}

fn mean_run(runs: &[usize]) -> Decimal {
    if runs.is_empty() {
        return Decimal::ZERO;
    }
    let total: usize = runs.iter().sum();
    Decimal::from(total) / Decimal::from(runs.len())
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone, Utc};
    use rust_decimal_macros::dec;

    use super::*;

    fn sequence(results: &[TradeResult]) -> Vec<TradeRecord> {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        results
            .iter()
            .zip(0i64..)
            .map(|(result, i)| TradeRecord {
                result: Some(*result),
                exit_time: Some(start + Duration::hours(i)),
                ..TradeRecord::default()
            })
            .collect()
    }

    #[test]
    fn test_win_win_loss_win() {
        use TradeResult::{Loss, Win};
        let stats = calculate_streaks(&sequence(&[Win, Win, Loss, Win]));

        assert_eq!(stats.current_streak, 1);
        assert_eq!(stats.max_win_streak, 2);
        assert_eq!(stats.max_loss_streak, 1);
        assert_eq!(stats.average_win_streak, dec!(1.5));
        assert_eq!(stats.average_loss_streak, dec!(1));
    }

    #[test]
    fn test_ordering_by_exit_time_not_input() {
        use TradeResult::{Loss, Win};
        let mut records = sequence(&[Loss, Loss, Win]);
        records.reverse();

        let stats = calculate_streaks(&records);
        assert_eq!(stats.current_streak, 1);
        assert_eq!(stats.max_loss_streak, 2);
    }

    #[test]
    fn test_trailing_losses_are_negative() {
        use TradeResult::{Loss, Win};
        let stats = calculate_streaks(&sequence(&[Win, Loss, Loss, Loss]));
        assert_eq!(stats.current_streak, -3);
        assert_eq!(stats.max_loss_streak, 3);
        assert_eq!(stats.average_win_streak, dec!(1));
    }

    #[test]
    fn test_records_without_exit_or_result_are_skipped() {
        let open = TradeRecord::default();
        let no_exit = TradeRecord {
            result: Some(TradeResult::Win),
            ..TradeRecord::default()
        };
        assert_eq!(calculate_streaks(&[open, no_exit]), StreakStats::default());
    }
}
