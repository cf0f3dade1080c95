use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Traded symbol as recorded in the journal, e.g. "EUR/USD" or "NAS100".
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Instrument(String);

impl Instrument {
    pub fn new(symbol: impl Into<String>) -> Self {
        Instrument(symbol.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Uppercased symbol with the "/" separator stripped, used as the
    /// lookup key for point values ("EUR/USD" and "EURUSD" are the same
    /// instrument).
    pub fn normalized(&self) -> String {
        self.0.to_uppercase().replace('/', "")
    }

    /// Point multiplier converting a price distance into account-currency
    /// points for one lot. Indices, metals and anything unrecognized fall
    /// back to 1 so a price distance passes through unscaled.
    pub fn default_point_value(&self) -> Decimal {
        let symbol = self.normalized();
        match symbol.as_str() {
            "XAUUSD" | "XAGUSD" => Decimal::ONE,
            "NAS100" | "US30" | "US500" | "SPX500" | "GER40" | "UK100" | "JPN225" => Decimal::ONE,
            _ if Self::is_forex_symbol(&symbol) && symbol.ends_with("JPY") => dec!(100),
            _ if Self::is_forex_symbol(&symbol) => dec!(10000),
            _ => Decimal::ONE,
        }
    }

    fn is_forex_symbol(normalized: &str) -> bool {
        normalized.len() == 6 && normalized.chars().all(|c| c.is_ascii_alphabetic())
    }
}

impl fmt::Display for Instrument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Instrument {
    fn from(s: &str) -> Self {
        Instrument::new(s)
    }
}
