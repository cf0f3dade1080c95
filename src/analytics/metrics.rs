use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::config::AnalyticsConfig;
use crate::types::TradeRecord;

/// Aggregate statistics over the filtered closed-trade set.
///
/// Zero-result trades count toward `total_trades` but toward neither the
/// win nor the loss bucket. Every ratio has a defined fallback so no
/// division by zero can reach callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoreMetrics {
    pub total_trades: u64,
    pub win_count: u64,
    pub loss_count: u64,
    pub total_pnl: Decimal,
    /// Percentage in [0, 100].
    pub win_rate: Decimal,
    pub avg_win: Decimal,
    /// Mean of absolute loss sizes, reported as a positive number.
    pub avg_loss: Decimal,
    pub largest_win: Decimal,
    /// Most negative result; stays signed.
    pub largest_loss: Decimal,
    pub profit_factor: Decimal,
    /// Expected P&L per trade given the historical win rate and average
    /// win/loss sizes.
    pub expectancy: Decimal,
    /// avg_win / avg_loss, 0 when there are no losses.
    pub avg_rr: Decimal,
    /// Raw Kelly fraction in percent. May be negative (no edge); clamping
    /// to [0, 100] is left to presentation.
    pub kelly_percent: Decimal,
}

impl CoreMetrics {
    fn zero() -> Self {
        Self {
            total_trades: 0,
            win_count: 0,
            loss_count: 0,
            total_pnl: Decimal::ZERO,
            win_rate: Decimal::ZERO,
            avg_win: Decimal::ZERO,
            avg_loss: Decimal::ZERO,
            largest_win: Decimal::ZERO,
            largest_loss: Decimal::ZERO,
            profit_factor: Decimal::ZERO,
            expectancy: Decimal::ZERO,
            avg_rr: Decimal::ZERO,
            kelly_percent: Decimal::ZERO,
        }
    }
}

/// Core Metrics Calculator. Input must already be filtered to closed
/// trades in the selected period.
pub fn core_metrics(trades: &[TradeRecord], config: &AnalyticsConfig) -> CoreMetrics {
    if trades.is_empty() {
        return CoreMetrics::zero();
    }

    let total_trades = trades.len() as u64;
    let wins: Vec<&TradeRecord> = trades.iter().filter(|t| t.result > Decimal::ZERO).collect();
    let losses: Vec<&TradeRecord> = trades.iter().filter(|t| t.result < Decimal::ZERO).collect();

    let win_count = wins.len() as u64;
    let loss_count = losses.len() as u64;

    let total_pnl: Decimal = trades.iter().map(|t| t.result).sum();
    let win_rate = Decimal::from(win_count) / Decimal::from(total_trades) * dec!(100);

    let gross_profit: Decimal = wins.iter().map(|t| t.result).sum();
    let gross_loss: Decimal = losses.iter().map(|t| t.result.abs()).sum();

    let avg_win = if win_count > 0 {
        gross_profit / Decimal::from(win_count)
    } else {
        Decimal::ZERO
    };

    let avg_loss = if loss_count > 0 {
        gross_loss / Decimal::from(loss_count)
    } else {
        Decimal::ZERO
    };

    let largest_win = wins.iter().map(|t| t.result).max().unwrap_or(Decimal::ZERO);
    let largest_loss = losses.iter().map(|t| t.result).min().unwrap_or(Decimal::ZERO);

    let profit_factor = if gross_loss > Decimal::ZERO {
        gross_profit / gross_loss
    } else if gross_profit > Decimal::ZERO {
        config.profit_factor_cap
    } else {
        Decimal::ZERO
    };

    let loss_rate = dec!(100) - win_rate;
    let expectancy = (win_rate / dec!(100)) * avg_win - (loss_rate / dec!(100)) * avg_loss;

    let avg_rr = if avg_loss > Decimal::ZERO {
        avg_win / avg_loss
    } else {
        Decimal::ZERO
    };

    let kelly_percent = if win_rate > Decimal::ZERO && avg_loss > Decimal::ZERO {
        (win_rate / dec!(100) - (loss_rate / dec!(100)) / avg_rr) * dec!(100)
    } else {
        Decimal::ZERO
    };

    CoreMetrics {
        total_trades,
        win_count,
        loss_count,
        total_pnl,
        win_rate,
        avg_win,
        avg_loss,
        largest_win,
        largest_loss,
        profit_factor,
        expectancy,
        avg_rr,
        kelly_percent,
    }
}
