use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::Instrument;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeType {
    Buy,
    Sell,
}

impl TradeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TradeType::Buy => "buy",
            TradeType::Sell => "sell",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "buy" | "long" => Some(TradeType::Buy),
            "sell" | "short" => Some(TradeType::Sell),
            _ => None,
        }
    }
}

impl fmt::Display for TradeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeStatus {
    Open,
    Closed,
}

impl TradeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TradeStatus::Open => "open",
            TradeStatus::Closed => "closed",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "open" => Some(TradeStatus::Open),
            "closed" => Some(TradeStatus::Closed),
            _ => None,
        }
    }
}

impl fmt::Display for TradeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single journal entry after validation.
///
/// `timestamp` is the canonical ordering key for every time series;
/// `open_date`/`close_date` feed the duration and hour-of-day views.
/// `result` is realized P&L in account currency and is only meaningful
/// when `status` is `Closed`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeRecord {
    pub id: String,
    pub instrument: Instrument,
    pub trade_type: TradeType,
    pub status: TradeStatus,
    pub lot_size: Decimal,
    pub entry_price: Decimal,
    pub exit_price: Option<Decimal>,
    pub stop_loss: Option<Decimal>,
    pub take_profit: Option<Decimal>,
    pub result: Decimal,
    pub open_date: DateTime<Utc>,
    pub close_date: Option<DateTime<Utc>>,
    pub timestamp: DateTime<Utc>,
    pub emotion: Option<String>,
}

impl TradeRecord {
    pub fn is_closed(&self) -> bool {
        self.status == TradeStatus::Closed
    }

    pub fn is_win(&self) -> bool {
        self.is_closed() && self.result > Decimal::ZERO
    }

    pub fn is_loss(&self) -> bool {
        self.is_closed() && self.result < Decimal::ZERO
    }

    /// Holding time, when the trade has been closed out.
    pub fn duration(&self) -> Option<chrono::Duration> {
        self.close_date
            .map(|close| close.signed_duration_since(self.open_date))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trade_type_round_trip() {
        assert_eq!(TradeType::from_str("BUY"), Some(TradeType::Buy));
        assert_eq!(TradeType::from_str("short"), Some(TradeType::Sell));
        assert_eq!(TradeType::from_str("hold"), None);
        assert_eq!(TradeType::Sell.as_str(), "sell");
    }

    #[test]
    fn test_status_round_trip() {
        assert_eq!(TradeStatus::from_str("Closed"), Some(TradeStatus::Closed));
        assert_eq!(TradeStatus::from_str("pending"), None);
    }
}
