use anyhow::{Context, Result};
use rust_decimal::Decimal;
use std::io::Write;
use std::path::Path;
use tracing::info;

use crate::types::TradeRecord;

const HEADER: &str = "id,timestamp,instrument,type,status,lot_size,entry_price,exit_price,\
stop_loss,take_profit,result,open_date,close_date,duration_hours,emotion";

/// Write the trade list as CSV in the fixed column order. Currency
/// amounts are rounded to 2 decimal places; price levels keep their
/// journal precision.
pub fn write_csv<W: Write>(out: &mut W, trades: &[TradeRecord]) -> Result<()> {
    writeln!(out, "{}", HEADER)?;

    for trade in trades {
        let duration_hours = trade
            .duration()
            .map(|d| format!("{:.2}", d.num_seconds() as f64 / 3600.0))
            .unwrap_or_default();

        writeln!(
            out,
            "{},{},{},{},{},{},{},{},{},{},{},{},{},{},{}",
            field(&trade.id),
            trade.timestamp.to_rfc3339(),
            field(trade.instrument.as_str()),
            trade.trade_type,
            trade.status,
            trade.lot_size,
            trade.entry_price,
            optional_price(trade.exit_price),
            optional_price(trade.stop_loss),
            optional_price(trade.take_profit),
            trade.result.round_dp(2),
            trade.open_date.to_rfc3339(),
            trade
                .close_date
                .map(|d| d.to_rfc3339())
                .unwrap_or_default(),
            duration_hours,
            field(trade.emotion.as_deref().unwrap_or("")),
        )?;
    }

    Ok(())
}

pub fn export_csv(path: &Path, trades: &[TradeRecord]) -> Result<()> {
    let mut file = std::fs::File::create(path)
        .with_context(|| format!("creating export file {}", path.display()))?;
    write_csv(&mut file, trades)?;
    info!("exported {} trades to {}", trades.len(), path.display());
    Ok(())
}

fn optional_price(value: Option<Decimal>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

/// Quote a field when it would otherwise break the row.
fn field(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::test_support::{closed_trade, open_trade};
    use rust_decimal_macros::dec;

    #[test]
    fn test_header_comes_first() {
        let mut out = Vec::new();
        write_csv(&mut out, &[]).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().next().unwrap(), HEADER);
    }

    #[test]
    fn test_result_is_rounded_to_two_places() {
        let mut out = Vec::new();
        let trade = closed_trade(0, dec!(25.5555));
        write_csv(&mut out, &[trade]).unwrap();
        let text = String::from_utf8(out).unwrap();
        let row = text.lines().nth(1).unwrap();
        assert!(row.contains(",25.56,"));
    }

    #[test]
    fn test_open_trade_leaves_optional_columns_empty() {
        let mut out = Vec::new();
        write_csv(&mut out, &[open_trade(0)]).unwrap();
        let text = String::from_utf8(out).unwrap();
        let row = text.lines().nth(1).unwrap();
        assert!(row.ends_with(",,"));
        assert!(row.contains(",open,"));
    }

    #[test]
    fn test_emotion_with_comma_is_quoted() {
        let mut trade = closed_trade(0, dec!(10));
        trade.emotion = Some("anxious, rushed".to_string());
        let mut out = Vec::new();
        write_csv(&mut out, &[trade]).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("\"anxious, rushed\""));
    }

    #[test]
    fn test_export_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trades.csv");
        export_csv(&path, &[closed_trade(0, dec!(10))]).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().count(), 2);
    }
}
