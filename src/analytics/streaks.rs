use chrono::Duration;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::TradeRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StreakKind {
    Win,
    Loss,
    None,
}

impl fmt::Display for StreakKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StreakKind::Win => write!(f, "win"),
            StreakKind::Loss => write!(f, "loss"),
            StreakKind::None => write!(f, "none"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentStreak {
    pub kind: StreakKind,
    pub count: u32,
}

/// Consecutive-run statistics over the chronological trade sequence.
/// A zero-result trade belongs to neither side and resets both counters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreakAnalysis {
    pub current: CurrentStreak,
    pub max_consecutive_wins: u32,
    pub max_consecutive_losses: u32,
}

/// Point on the cumulative-equity curve, one per closed trade in
/// chronological order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquityPoint {
    pub sequence_index: usize,
    pub cumulative_equity: Decimal,
    pub drawdown_from_peak: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawdownAnalysis {
    /// Largest peak-to-trough decline in account currency. Never negative.
    pub max_drawdown: Decimal,
    /// Largest decline as a percentage of the peak it fell from. Stays 0
    /// while the equity curve has never been above its starting level.
    pub max_drawdown_percent: Decimal,
    pub equity_curve: Vec<EquityPoint>,
}

/// Walk the trades in ascending timestamp order, tracking the longest run
/// of each sign; trades must be pre-sorted by the caller.
pub fn streak_analysis(trades: &[TradeRecord]) -> StreakAnalysis {
    let mut win_run = 0u32;
    let mut loss_run = 0u32;
    let mut max_wins = 0u32;
    let mut max_losses = 0u32;

    for trade in trades {
        if trade.result > Decimal::ZERO {
            win_run += 1;
            loss_run = 0;
        } else if trade.result < Decimal::ZERO {
            loss_run += 1;
            win_run = 0;
        } else {
            win_run = 0;
            loss_run = 0;
        }
        max_wins = max_wins.max(win_run);
        max_losses = max_losses.max(loss_run);
    }

    StreakAnalysis {
        current: current_streak(trades),
        max_consecutive_wins: max_wins,
        max_consecutive_losses: max_losses,
    }
}

/// Sign of the most recent trade, counted backwards until the sign flips.
/// A zero-result trade ends the streak immediately.
fn current_streak(trades: &[TradeRecord]) -> CurrentStreak {
    let latest = match trades.last() {
        Some(trade) => trade,
        None => {
            return CurrentStreak {
                kind: StreakKind::None,
                count: 0,
            }
        }
    };

    let kind = if latest.result > Decimal::ZERO {
        StreakKind::Win
    } else if latest.result < Decimal::ZERO {
        StreakKind::Loss
    } else {
        return CurrentStreak {
            kind: StreakKind::None,
            count: 0,
        };
    };

    let mut count = 0u32;
    for trade in trades.iter().rev() {
        let same_sign = match kind {
            StreakKind::Win => trade.result > Decimal::ZERO,
            StreakKind::Loss => trade.result < Decimal::ZERO,
            StreakKind::None => false,
        };
        if !same_sign {
            break;
        }
        count += 1;
    }

    CurrentStreak { kind, count }
}

/// Cumulative P&L walk starting from zero equity. The peak starts at zero,
/// so a curve that never goes positive reports drawdown against zero and
/// no percentage.
pub fn drawdown_analysis(trades: &[TradeRecord]) -> DrawdownAnalysis {
    let mut running_total = Decimal::ZERO;
    let mut peak = Decimal::ZERO;
    let mut max_drawdown = Decimal::ZERO;
    let mut max_drawdown_percent = Decimal::ZERO;
    let mut equity_curve = Vec::with_capacity(trades.len());

    for (sequence_index, trade) in trades.iter().enumerate() {
        running_total += trade.result;
        peak = peak.max(running_total);
        let drawdown = peak - running_total;

        max_drawdown = max_drawdown.max(drawdown);
        if peak > Decimal::ZERO {
            max_drawdown_percent = max_drawdown_percent.max(drawdown / peak * dec!(100));
        }

        equity_curve.push(EquityPoint {
            sequence_index,
            cumulative_equity: running_total,
            drawdown_from_peak: drawdown,
        });
    }

    DrawdownAnalysis {
        max_drawdown,
        max_drawdown_percent,
        equity_curve,
    }
}

/// Mean holding time in hours over trades with a close date; 0 when none
/// qualify.
pub fn average_duration_hours(trades: &[TradeRecord]) -> Decimal {
    let durations: Vec<Duration> = trades.iter().filter_map(|t| t.duration()).collect();
    if durations.is_empty() {
        return Decimal::ZERO;
    }

    let total_seconds: i64 = durations.iter().map(|d| d.num_seconds()).sum();
    Decimal::from(total_seconds) / dec!(3600) / Decimal::from(durations.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::test_support::{closed_trade, closed_trade_with_duration};

    fn trades(results: &[i64]) -> Vec<TradeRecord> {
        results
            .iter()
            .enumerate()
            .map(|(i, r)| closed_trade(i, Decimal::from(*r)))
            .collect()
    }

    #[test]
    fn test_streak_scenario() {
        let analysis = streak_analysis(&trades(&[50, 30, -20, 40, 40, 40]));
        assert_eq!(analysis.max_consecutive_wins, 3);
        assert_eq!(analysis.max_consecutive_losses, 1);
        assert_eq!(analysis.current.kind, StreakKind::Win);
        assert_eq!(analysis.current.count, 3);
    }

    #[test]
    fn test_zero_result_breaks_streaks() {
        let analysis = streak_analysis(&trades(&[10, 10, 0, 10]));
        assert_eq!(analysis.max_consecutive_wins, 2);
        assert_eq!(analysis.current.count, 1);
    }

    #[test]
    fn test_zero_result_latest_means_no_current_streak() {
        let analysis = streak_analysis(&trades(&[10, -5, 0]));
        assert_eq!(analysis.current.kind, StreakKind::None);
        assert_eq!(analysis.current.count, 0);
    }

    #[test]
    fn test_empty_input() {
        let analysis = streak_analysis(&[]);
        assert_eq!(analysis.current.kind, StreakKind::None);
        assert_eq!(analysis.max_consecutive_wins, 0);
        assert_eq!(analysis.max_consecutive_losses, 0);
    }

    #[test]
    fn test_drawdown_zero_on_rising_equity() {
        let analysis = drawdown_analysis(&trades(&[10, 10, 10]));
        assert_eq!(analysis.max_drawdown, Decimal::ZERO);
        assert_eq!(analysis.max_drawdown_percent, Decimal::ZERO);
        assert_eq!(analysis.equity_curve.len(), 3);
        assert_eq!(analysis.equity_curve[2].cumulative_equity, dec!(30));
    }

    #[test]
    fn test_drawdown_peak_to_trough() {
        // equity: 100, 150, 90, 120 -> peak 150, trough 90
        let analysis = drawdown_analysis(&trades(&[100, 50, -60, 30]));
        assert_eq!(analysis.max_drawdown, dec!(60));
        assert_eq!(analysis.max_drawdown_percent, dec!(40));
        assert_eq!(analysis.equity_curve[2].drawdown_from_peak, dec!(60));
    }

    #[test]
    fn test_drawdown_percent_stays_zero_without_positive_peak() {
        let analysis = drawdown_analysis(&trades(&[-10, -20]));
        assert_eq!(analysis.max_drawdown, dec!(30));
        assert_eq!(analysis.max_drawdown_percent, Decimal::ZERO);
    }

    #[test]
    fn test_average_duration() {
        let trades = vec![
            closed_trade_with_duration(0, dec!(10), Some(Duration::hours(2))),
            closed_trade_with_duration(1, dec!(10), Some(Duration::hours(4))),
            closed_trade_with_duration(2, dec!(10), None),
        ];
        assert_eq!(average_duration_hours(&trades), dec!(3));
    }

    #[test]
    fn test_average_duration_empty_when_no_close_dates() {
        let trades = vec![closed_trade_with_duration(0, dec!(10), None)];
        assert_eq!(average_duration_hours(&trades), Decimal::ZERO);
    }
}
