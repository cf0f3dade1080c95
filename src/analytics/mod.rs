pub mod buckets;
pub mod metrics;
pub mod risk_reward;
pub mod rolling;
pub mod streaks;

pub use buckets::{
    DurationPoint, DurationUnit, DurationView, EmotionBucket, HourBucket, MonthBucket, TrendLine,
    WeekdayBucket,
};
pub use metrics::CoreMetrics;
pub use risk_reward::RiskRewardPoint;
pub use rolling::RollingPoint;
pub use streaks::{CurrentStreak, DrawdownAnalysis, EquityPoint, StreakAnalysis, StreakKind};

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::AnalyticsConfig;
use crate::types::{Period, TradeRecord};

/// Categorical outcome of a closed trade, from the sign of its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Win,
    Loss,
}

impl Outcome {
    pub fn from_result(result: Decimal) -> Self {
        if result > Decimal::ZERO {
            Outcome::Win
        } else {
            Outcome::Loss
        }
    }
}

/// Everything the engine derives from one journal snapshot. Plain data,
/// fully serializable, with no references back into the input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsBundle {
    pub period: Period,
    pub reference_time: DateTime<Utc>,
    /// Tallies over the unfiltered input.
    pub input_trades: u64,
    pub open_trades: u64,
    /// Closed trades inside the period window; the population every
    /// aggregate below is computed from.
    pub analyzed_trades: u64,

    pub metrics: CoreMetrics,
    pub streaks: StreakAnalysis,
    pub drawdown: DrawdownAnalysis,
    pub avg_duration_hours: Decimal,
    pub monthly: Vec<MonthBucket>,
    pub weekdays: Vec<WeekdayBucket>,
    pub hourly: Vec<HourBucket>,
    pub durations: DurationView,
    pub emotions: Vec<EmotionBucket>,
    pub rolling: Vec<RollingPoint>,
    pub risk_reward: Vec<RiskRewardPoint>,
}

/// Run every analytics view over one snapshot of the journal.
///
/// Only closed trades whose canonical timestamp falls inside the period
/// (measured back from `reference_time`) enter the aggregates. The input
/// is never mutated; each call recomputes everything from scratch.
pub fn analyze(
    trades: &[TradeRecord],
    period: Period,
    reference_time: DateTime<Utc>,
    config: &AnalyticsConfig,
) -> AnalyticsBundle {
    let open_trades = trades.iter().filter(|t| !t.is_closed()).count() as u64;

    let mut filtered: Vec<TradeRecord> = trades
        .iter()
        .filter(|t| t.is_closed() && period.contains(t.timestamp, reference_time))
        .cloned()
        .collect();
    filtered.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));

    AnalyticsBundle {
        period,
        reference_time,
        input_trades: trades.len() as u64,
        open_trades,
        analyzed_trades: filtered.len() as u64,
        metrics: metrics::core_metrics(&filtered, config),
        streaks: streaks::streak_analysis(&filtered),
        drawdown: streaks::drawdown_analysis(&filtered),
        avg_duration_hours: streaks::average_duration_hours(&filtered),
        monthly: buckets::monthly_buckets(&filtered),
        weekdays: buckets::weekday_buckets(&filtered),
        hourly: buckets::hourly_buckets(&filtered),
        durations: buckets::duration_view(&filtered),
        emotions: buckets::emotion_buckets(&filtered),
        rolling: rolling::rolling_win_rate(&filtered, config),
        risk_reward: risk_reward::risk_reward_points(&filtered, config),
    }
}
