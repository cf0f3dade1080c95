use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::config::AnalyticsConfig;
use crate::types::TradeRecord;

/// Win rate over the trailing window ending at `trade_index` (an index
/// into the ascending-timestamp trade sequence).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RollingPoint {
    pub trade_index: usize,
    pub rolling_win_rate: Decimal,
}

/// Sliding-window win rate over the most recent trades. The window is
/// `min(config.rolling_window, n)`; below `config.rolling_min_trades` the
/// series is suppressed, since tiny windows produce rates too noisy to read.
pub fn rolling_win_rate(trades: &[TradeRecord], config: &AnalyticsConfig) -> Vec<RollingPoint> {
    let window = config.rolling_window.min(trades.len());
    if window < config.rolling_min_trades {
        return Vec::new();
    }

    let mut series = Vec::with_capacity(trades.len() - window + 1);
    for i in (window - 1)..trades.len() {
        let slice = &trades[i + 1 - window..=i];
        let wins = slice.iter().filter(|t| t.result > Decimal::ZERO).count();
        series.push(RollingPoint {
            trade_index: i,
            rolling_win_rate: Decimal::from(wins) / Decimal::from(window) * dec!(100),
        });
    }
    series
}
