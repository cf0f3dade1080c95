use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;
use tracing::{info, warn};

use crate::types::{Instrument, TradeRecord, TradeStatus, TradeType};

/// Journal entry as exported by the web app: camelCase keys, optional
/// everything. Nothing downstream touches this shape; it exists only to
/// be validated into a `TradeRecord`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTradeRecord {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub instrument: Option<String>,
    #[serde(rename = "type", default)]
    pub trade_type: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub lot_size: Option<Decimal>,
    #[serde(default)]
    pub entry_price: Option<Decimal>,
    #[serde(default)]
    pub exit_price: Option<Decimal>,
    #[serde(default)]
    pub stop_loss: Option<Decimal>,
    #[serde(default)]
    pub take_profit: Option<Decimal>,
    #[serde(default)]
    pub result: Option<Decimal>,
    #[serde(default)]
    pub open_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub close_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default)]
    pub emotion: Option<String>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("missing required field `{0}`")]
    MissingField(&'static str),
    #[error("unknown trade type `{0}`")]
    UnknownTradeType(String),
    #[error("unknown status `{0}`")]
    UnknownStatus(String),
    #[error("lot size must be positive, got {0}")]
    NonPositiveLotSize(Decimal),
    #[error("closed trade has no result")]
    MissingResult,
}

/// Validate one raw entry. A stop loss or take profit recorded as zero
/// means "not set" and becomes `None`; a closed trade without a result
/// violates the journal invariant and is rejected.
pub fn validate(raw: RawTradeRecord) -> std::result::Result<TradeRecord, ValidationError> {
    let id = non_empty(raw.id).ok_or(ValidationError::MissingField("id"))?;
    let instrument =
        non_empty(raw.instrument).ok_or(ValidationError::MissingField("instrument"))?;

    let type_str = raw.trade_type.ok_or(ValidationError::MissingField("type"))?;
    let trade_type =
        TradeType::from_str(&type_str).ok_or(ValidationError::UnknownTradeType(type_str))?;

    let status_str = raw.status.ok_or(ValidationError::MissingField("status"))?;
    let status =
        TradeStatus::from_str(&status_str).ok_or(ValidationError::UnknownStatus(status_str))?;

    let lot_size = raw.lot_size.ok_or(ValidationError::MissingField("lotSize"))?;
    if lot_size <= Decimal::ZERO {
        return Err(ValidationError::NonPositiveLotSize(lot_size));
    }

    let entry_price = raw
        .entry_price
        .ok_or(ValidationError::MissingField("entryPrice"))?;
    let open_date = raw
        .open_date
        .ok_or(ValidationError::MissingField("openDate"))?;
    let timestamp = raw
        .timestamp
        .ok_or(ValidationError::MissingField("timestamp"))?;

    let result = match (status, raw.result) {
        (TradeStatus::Closed, Some(result)) => result,
        (TradeStatus::Closed, None) => return Err(ValidationError::MissingResult),
        (TradeStatus::Open, result) => result.unwrap_or(Decimal::ZERO),
    };

    Ok(TradeRecord {
        id,
        instrument: Instrument::new(instrument),
        trade_type,
        status,
        lot_size,
        entry_price,
        exit_price: raw.exit_price,
        stop_loss: level(raw.stop_loss),
        take_profit: level(raw.take_profit),
        result,
        open_date,
        close_date: raw.close_date,
        timestamp,
        emotion: non_empty(raw.emotion),
    })
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

fn level(value: Option<Decimal>) -> Option<Decimal> {
    value.filter(|v| !v.is_zero())
}

/// Load a journal file, keeping the valid entries and logging each
/// rejection. A malformed record never silently defaults its way into
/// the analytics; it is dropped here, with its reason.
pub fn load_journal(path: &Path) -> Result<Vec<TradeRecord>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading journal file {}", path.display()))?;
    let entries: Vec<RawTradeRecord> = serde_json::from_str(&raw)
        .with_context(|| format!("parsing journal file {}", path.display()))?;

    let total = entries.len();
    let mut trades = Vec::with_capacity(total);
    for (index, entry) in entries.into_iter().enumerate() {
        let id = entry.id.clone().unwrap_or_else(|| format!("#{}", index));
        match validate(entry) {
            Ok(trade) => trades.push(trade),
            Err(error) => warn!("skipping journal entry {}: {}", id, error),
        }
    }

    info!(
        "loaded {} of {} journal entries from {}",
        trades.len(),
        total,
        path.display()
    );
    Ok(trades)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::io::Write;

    fn raw_json(entries: &str) -> Vec<RawTradeRecord> {
        serde_json::from_str(entries).unwrap()
    }

    const VALID: &str = r#"[{
        "id": "a1",
        "instrument": "EUR/USD",
        "type": "buy",
        "status": "closed",
        "lotSize": "0.5",
        "entryPrice": "1.1000",
        "exitPrice": "1.1050",
        "stopLoss": "1.0950",
        "takeProfit": "1.1100",
        "result": "25.50",
        "openDate": "2024-03-04T09:30:00Z",
        "closeDate": "2024-03-04T11:30:00Z",
        "timestamp": "2024-03-04T09:30:00Z",
        "emotion": "calm"
    }]"#;

    #[test]
    fn test_valid_entry_round_trips() {
        let raw = raw_json(VALID).remove(0);
        let trade = validate(raw).unwrap();
        assert_eq!(trade.id, "a1");
        assert_eq!(trade.lot_size, dec!(0.5));
        assert_eq!(trade.result, dec!(25.50));
        assert_eq!(trade.stop_loss, Some(dec!(1.0950)));
        assert_eq!(trade.emotion.as_deref(), Some("calm"));
    }

    #[test]
    fn test_zero_levels_become_unset() {
        let mut raw = raw_json(VALID).remove(0);
        raw.stop_loss = Some(Decimal::ZERO);
        raw.take_profit = Some(Decimal::ZERO);
        let trade = validate(raw).unwrap();
        assert_eq!(trade.stop_loss, None);
        assert_eq!(trade.take_profit, None);
    }

    #[test]
    fn test_non_positive_lot_size_is_rejected() {
        let mut raw = raw_json(VALID).remove(0);
        raw.lot_size = Some(Decimal::ZERO);
        assert_eq!(
            validate(raw),
            Err(ValidationError::NonPositiveLotSize(Decimal::ZERO))
        );
    }

    #[test]
    fn test_closed_trade_without_result_is_rejected() {
        let mut raw = raw_json(VALID).remove(0);
        raw.result = None;
        assert_eq!(validate(raw), Err(ValidationError::MissingResult));
    }

    #[test]
    fn test_open_trade_without_result_defaults_to_zero() {
        let mut raw = raw_json(VALID).remove(0);
        raw.status = Some("open".to_string());
        raw.result = None;
        let trade = validate(raw).unwrap();
        assert_eq!(trade.result, Decimal::ZERO);
    }

    #[test]
    fn test_unknown_type_is_rejected() {
        let mut raw = raw_json(VALID).remove(0);
        raw.trade_type = Some("hedge".to_string());
        assert!(matches!(
            validate(raw),
            Err(ValidationError::UnknownTradeType(_))
        ));
    }

    #[test]
    fn test_loader_keeps_valid_siblings() {
        let json = r#"[
            {
                "id": "good",
                "instrument": "EUR/USD",
                "type": "sell",
                "status": "closed",
                "lotSize": "1",
                "entryPrice": "1.2000",
                "result": "-12",
                "openDate": "2024-03-04T09:30:00Z",
                "timestamp": "2024-03-04T09:30:00Z"
            },
            {
                "id": "bad",
                "instrument": "EUR/USD",
                "type": "sell",
                "status": "closed",
                "lotSize": "0",
                "entryPrice": "1.2000",
                "result": "-12",
                "openDate": "2024-03-04T09:30:00Z",
                "timestamp": "2024-03-04T09:30:00Z"
            }
        ]"#;
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();

        let trades = load_journal(file.path()).unwrap();
        assert_eq!(trades.len(), 1);
        assert_eq!(trades[0].id, "good");
    }
}
