use chrono::{Datelike, Timelike};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::analytics::Outcome;
use crate::types::TradeRecord;

const WEEKDAY_LABELS: [&str; 5] = ["Monday", "Tuesday", "Wednesday", "Thursday", "Friday"];

/// Shared accumulator for the grouped views: count, wins and P&L first,
/// rates derived once the group is complete.
#[derive(Debug, Clone, Copy, Default)]
struct Acc {
    trades: u64,
    wins: u64,
    pnl: Decimal,
}

impl Acc {
    fn add(&mut self, trade: &TradeRecord) {
        self.trades += 1;
        if trade.result > Decimal::ZERO {
            self.wins += 1;
        }
        self.pnl += trade.result;
    }

    fn win_rate(&self) -> Decimal {
        if self.trades > 0 {
            Decimal::from(self.wins) / Decimal::from(self.trades) * dec!(100)
        } else {
            Decimal::ZERO
        }
    }

    fn avg_pnl(&self) -> Decimal {
        if self.trades > 0 {
            self.pnl / Decimal::from(self.trades)
        } else {
            Decimal::ZERO
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthBucket {
    pub year: i32,
    pub month: u32,
    /// Display label, e.g. "Mar 2024".
    pub label: String,
    pub trade_count: u64,
    pub win_count: u64,
    pub total_pnl: Decimal,
    pub win_rate: Decimal,
    pub avg_pnl: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekdayBucket {
    pub day: String,
    pub trade_count: u64,
    pub win_count: u64,
    pub total_pnl: Decimal,
    pub win_rate: Decimal,
    pub avg_pnl: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourBucket {
    pub hour: u32,
    pub trade_count: u64,
    pub win_count: u64,
    pub total_pnl: Decimal,
    pub win_rate: Decimal,
    pub avg_pnl: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmotionBucket {
    pub emotion: String,
    pub trade_count: u64,
    pub win_count: u64,
    pub total_pnl: Decimal,
    pub win_rate: Decimal,
    pub avg_pnl: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DurationUnit {
    Minutes,
    Hours,
    Days,
}

impl DurationUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            DurationUnit::Minutes => "minutes",
            DurationUnit::Hours => "hours",
            DurationUnit::Days => "days",
        }
    }
}

/// One scatter point per closed trade with both dates: holding time in the
/// display unit chosen for that trade, against realized profit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DurationPoint {
    pub duration: f64,
    pub unit: DurationUnit,
    pub profit: Decimal,
    pub outcome: Outcome,
}

/// Ordinary least-squares fit of profit on duration. A presentation aid,
/// not a robust estimator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendLine {
    pub slope: f64,
    pub intercept: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DurationView {
    pub points: Vec<DurationPoint>,
    pub trend: Option<TrendLine>,
}

/// Monthly performance keyed by year-month of the canonical timestamp,
/// sorted chronologically (not by label string).
pub fn monthly_buckets(trades: &[TradeRecord]) -> Vec<MonthBucket> {
    let mut groups: BTreeMap<(i32, u32), Acc> = BTreeMap::new();
    for trade in trades {
        groups
            .entry((trade.timestamp.year(), trade.timestamp.month()))
            .or_default()
            .add(trade);
    }

    groups
        .into_iter()
        .map(|((year, month), acc)| {
            MonthBucket {
                year,
                month,
                label: month_label(year, month),
                trade_count: acc.trades,
                win_count: acc.wins,
                total_pnl: acc.pnl,
                win_rate: acc.win_rate(),
                avg_pnl: acc.avg_pnl(),
            }
        })
        .collect()
}

fn month_label(year: i32, month: u32) -> String {
    const NAMES: [&str; 12] = [
        "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
    ];
    format!("{} {}", NAMES[month as usize - 1], year)
}

/// Monday through Friday performance. Weekend trades are excluded from
/// this view (markets are closed); all five rows are always present so a
/// day without activity renders as "no data" rather than vanishing.
pub fn weekday_buckets(trades: &[TradeRecord]) -> Vec<WeekdayBucket> {
    let mut accs = [Acc::default(); 5];
    for trade in trades {
        let index = trade.timestamp.weekday().num_days_from_monday() as usize;
        if index < 5 {
            accs[index].add(trade);
        }
    }

    WEEKDAY_LABELS
        .iter()
        .zip(accs.iter())
        .map(|(day, acc)| WeekdayBucket {
            day: day.to_string(),
            trade_count: acc.trades,
            win_count: acc.wins,
            total_pnl: acc.pnl,
            win_rate: acc.win_rate(),
            avg_pnl: acc.avg_pnl(),
        })
        .collect()
}

/// Hour-of-day performance from the trade open time, all 24 rows present.
pub fn hourly_buckets(trades: &[TradeRecord]) -> Vec<HourBucket> {
    let mut accs = [Acc::default(); 24];
    for trade in trades {
        accs[trade.open_date.hour() as usize].add(trade);
    }

    accs.iter()
        .enumerate()
        .map(|(hour, acc)| HourBucket {
            hour: hour as u32,
            trade_count: acc.trades,
            win_count: acc.wins,
            total_pnl: acc.pnl,
            win_rate: acc.win_rate(),
            avg_pnl: acc.avg_pnl(),
        })
        .collect()
}

/// Performance grouped by the journal's emotion label, most-traded label
/// first. Trades without a label are left out of this view only.
pub fn emotion_buckets(trades: &[TradeRecord]) -> Vec<EmotionBucket> {
    let mut groups: BTreeMap<String, Acc> = BTreeMap::new();
    for trade in trades {
        if let Some(emotion) = trade.emotion.as_deref() {
            if !emotion.is_empty() {
                groups.entry(emotion.to_string()).or_default().add(trade);
            }
        }
    }

    let mut buckets: Vec<EmotionBucket> = groups
        .into_iter()
        .map(|(emotion, acc)| EmotionBucket {
            emotion,
            trade_count: acc.trades,
            win_count: acc.wins,
            total_pnl: acc.pnl,
            win_rate: acc.win_rate(),
            avg_pnl: acc.avg_pnl(),
        })
        .collect();
    buckets.sort_by(|a, b| {
        b.trade_count
            .cmp(&a.trade_count)
            .then_with(|| a.emotion.cmp(&b.emotion))
    });
    buckets
}

/// Duration scatter over trades with both open and close dates, plus the
/// OLS trend of profit on duration. The display unit is picked per trade
/// (minutes under an hour, hours under a day, days beyond); rows are
/// ordered by the underlying holding time so mixed units stay monotonic.
pub fn duration_view(trades: &[TradeRecord]) -> DurationView {
    let mut rows: Vec<(i64, DurationPoint)> = Vec::new();
    for trade in trades {
        let duration = match trade.duration() {
            Some(d) => d,
            None => continue,
        };
        let minutes = duration.num_seconds() as f64 / 60.0;
        let (value, unit) = if minutes < 60.0 {
            (minutes, DurationUnit::Minutes)
        } else if minutes < 24.0 * 60.0 {
            (minutes / 60.0, DurationUnit::Hours)
        } else {
            (minutes / (24.0 * 60.0), DurationUnit::Days)
        };
        rows.push((
            duration.num_seconds(),
            DurationPoint {
                duration: value,
                unit,
                profit: trade.result,
                outcome: Outcome::from_result(trade.result),
            },
        ));
    }
    rows.sort_by_key(|(seconds, _)| *seconds);

    let points: Vec<DurationPoint> = rows.into_iter().map(|(_, point)| point).collect();
    let trend = trend_line(&points);
    DurationView { points, trend }
}

fn trend_line(points: &[DurationPoint]) -> Option<TrendLine> {
    if points.len() < 2 {
        return None;
    }

    let n = points.len() as f64;
    let mut sum_x = 0.0;
    let mut sum_y = 0.0;
    let mut sum_xy = 0.0;
    let mut sum_x2 = 0.0;
    for point in points {
        let x = point.duration;
        let y = point.profit.to_f64().unwrap_or(0.0);
        sum_x += x;
        sum_y += y;
        sum_xy += x * y;
        sum_x2 += x * x;
    }

    let slope = (n * sum_xy - sum_x * sum_y) / (n * sum_x2 - sum_x * sum_x);
    let intercept = (sum_y - slope * sum_x) / n;
    if !slope.is_finite() || !intercept.is_finite() {
        return None;
    }

    Some(TrendLine { slope, intercept })
}
