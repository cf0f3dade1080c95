use anyhow::{Context, Result};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::types::Instrument;

/// Tunable knobs for the analytics engine. Every field has a sensible
/// default; a TOML file can override any subset.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    /// Trailing-window size for the rolling win-rate series.
    pub rolling_window: usize,
    /// Below this many trades the rolling series is suppressed entirely.
    pub rolling_min_trades: usize,
    /// Planned R:R ratios outside (rr_min, rr_max) are dropped from the
    /// scatter as outliers.
    pub rr_min: Decimal,
    pub rr_max: Decimal,
    /// Sentinel reported when gross loss is zero but gross profit is not.
    pub profit_factor_cap: Decimal,
    /// Per-symbol point-value overrides, keyed by normalized symbol
    /// ("EURUSD", not "EUR/USD"). Symbols not listed here use the
    /// instrument classification defaults.
    pub point_values: BTreeMap<String, Decimal>,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            rolling_window: 20,
            rolling_min_trades: 5,
            rr_min: Decimal::ZERO,
            rr_max: dec!(10),
            profit_factor_cap: dec!(999),
            point_values: BTreeMap::new(),
        }
    }
}

impl AnalyticsConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        let config: AnalyticsConfig = toml::from_str(&raw)
            .with_context(|| format!("parsing config file {}", path.display()))?;
        Ok(config)
    }

    pub fn validate(&self) -> std::result::Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.rolling_window == 0 {
            errors.push("rolling_window must be > 0".to_string());
        }
        if self.rolling_min_trades == 0 {
            errors.push("rolling_min_trades must be > 0".to_string());
        }
        if self.rolling_min_trades > self.rolling_window {
            errors.push("rolling_min_trades must be <= rolling_window".to_string());
        }
        if self.rr_min < Decimal::ZERO {
            errors.push("rr_min must be >= 0".to_string());
        }
        if self.rr_max <= self.rr_min {
            errors.push("rr_max must be > rr_min".to_string());
        }
        if self.profit_factor_cap <= Decimal::ZERO {
            errors.push("profit_factor_cap must be > 0".to_string());
        }
        for (symbol, value) in &self.point_values {
            if *value <= Decimal::ZERO {
                errors.push(format!("point value for {} must be > 0", symbol));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Point value for an instrument: explicit override first, then the
    /// classification default.
    pub fn point_value(&self, instrument: &Instrument) -> Decimal {
        self.point_values
            .get(&instrument.normalized())
            .copied()
            .unwrap_or_else(|| instrument.default_point_value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(AnalyticsConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_zero_window() {
        let config = AnalyticsConfig {
            rolling_window: 0,
            ..AnalyticsConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_point_value_override_wins() {
        let mut config = AnalyticsConfig::default();
        config
            .point_values
            .insert("NAS100".to_string(), dec!(20));
        assert_eq!(config.point_value(&Instrument::new("NAS100")), dec!(20));
        assert_eq!(
            config.point_value(&Instrument::new("EUR/USD")),
            dec!(10000)
        );
    }

    #[test]
    fn test_toml_overrides_subset() {
        let parsed: AnalyticsConfig = toml::from_str(
            r#"
            rolling_window = 30

            [point_values]
            XAUUSD = "10"
            "#,
        )
        .unwrap();
        assert_eq!(parsed.rolling_window, 30);
        assert_eq!(parsed.rolling_min_trades, 5);
        assert_eq!(
            parsed.point_value(&Instrument::new("XAUUSD")),
            dec!(10)
        );
    }
}
