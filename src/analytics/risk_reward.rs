use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::analytics::Outcome;
use crate::config::AnalyticsConfig;
use crate::types::TradeRecord;

/// Planned risk:reward against the realized outcome, one row per trade
/// that recorded both a stop loss and a take profit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskRewardPoint {
    /// Planned points at risk, instrument point value applied.
    pub risk: Decimal,
    /// Planned points of reward, instrument point value applied.
    pub reward: Decimal,
    pub planned_rr: Decimal,
    pub result: Decimal,
    pub outcome: Outcome,
}

/// Risk/Reward Correlator. Trades with a zero-distance stop (no risk) are
/// excluded rather than divided by zero, and ratios outside the configured
/// bounds are dropped as outliers so they cannot skew the scatter.
pub fn risk_reward_points(
    trades: &[TradeRecord],
    config: &AnalyticsConfig,
) -> Vec<RiskRewardPoint> {
    let mut points = Vec::new();

    for trade in trades {
        let (stop_loss, take_profit) = match (trade.stop_loss, trade.take_profit) {
            (Some(stop), Some(take)) => (stop, take),
            _ => continue,
        };

        let point_value = config.point_value(&trade.instrument);
        let risk = (trade.entry_price - stop_loss).abs() * trade.lot_size * point_value;
        let reward = (take_profit - trade.entry_price).abs() * trade.lot_size * point_value;
        if risk <= Decimal::ZERO {
            continue;
        }

        let planned_rr = reward / risk;
        if planned_rr <= config.rr_min || planned_rr >= config.rr_max {
            continue;
        }

        points.push(RiskRewardPoint {
            risk,
            reward,
            planned_rr,
            result: trade.result,
            outcome: Outcome::from_result(trade.result),
        });
    }

    points
}
