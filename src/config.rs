//! Configuration module
//!
//! Loads `AppConfig` from a TOML file
//! (`~/.config/homestay-booking/config.toml` by default, overridable
//! via the `BOOKING_CONFIG` environment variable). Missing sections
//! fall back to defaults.

use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::domain::pricing::FeeRates;

/// Server configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Server host address
    pub host: String,
    /// Server port
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl ServerConfig {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseSection {
    pub url: String,
}

impl Default for DatabaseSection {
    fn default() -> Self {
        Self {
            url: "sqlite://./booking.db?mode=rwc".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default tracing filter, e.g. "info" or "homestay_booking=debug"
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Booking engine tunables
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BookingConfig {
    /// Cleaning fee, percent of discounted subtotal
    pub cleaning_fee_pct: f64,
    /// Service fee, percent of discounted subtotal
    pub service_fee_pct: f64,
    /// Tax, percent of discounted subtotal
    pub tax_pct: f64,
    /// Minutes a booking may stay Pending before expiration
    pub pending_timeout_minutes: i64,
    /// Seconds between expiration sweep runs
    pub sweep_interval_secs: u64,
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            cleaning_fee_pct: 5.0,
            service_fee_pct: 10.0,
            tax_pct: 8.0,
            pending_timeout_minutes: 30,
            sweep_interval_secs: 60,
        }
    }
}

impl BookingConfig {
    /// Convert the configured percentages to decimal fee rates.
    /// Percentages that do not survive the float conversion fall back
    /// to the defaults.
    pub fn fee_rates(&self) -> FeeRates {
        let pct = |v: f64, fallback: Decimal| {
            Decimal::try_from(v)
                .map(|d| d / Decimal::from(100))
                .unwrap_or(fallback)
        };
        let defaults = FeeRates::default();
        FeeRates {
            cleaning: pct(self.cleaning_fee_pct, defaults.cleaning),
            service: pct(self.service_fee_pct, defaults.service),
            tax: pct(self.tax_pct, defaults.tax),
        }
    }
}

/// Application configuration, loaded from TOML
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseSection,
    pub logging: LoggingConfig,
    pub booking: BookingConfig,
}

impl AppConfig {
    pub fn load(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let raw = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&raw)?;
        Ok(config)
    }
}

/// Default config file location: `~/.config/homestay-booking/config.toml`
pub fn default_config_path() -> PathBuf {
    dirs_next::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("homestay-booking")
        .join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_standard_rates() {
        let rates = BookingConfig::default().fee_rates();
        assert_eq!(rates.cleaning, Decimal::new(5, 2));
        assert_eq!(rates.service, Decimal::new(10, 2));
        assert_eq!(rates.tax, Decimal::new(8, 2));
    }

    #[test]
    fn parses_partial_file() {
        let cfg: AppConfig = toml::from_str(
            r#"
            [server]
            port = 9090

            [booking]
            pending_timeout_minutes = 15
            "#,
        )
        .unwrap();

        assert_eq!(cfg.server.port, 9090);
        assert_eq!(cfg.server.host, "0.0.0.0");
        assert_eq!(cfg.booking.pending_timeout_minutes, 15);
        assert_eq!(cfg.booking.sweep_interval_secs, 60);
        assert_eq!(cfg.logging.level, "info");
    }

    #[test]
    fn custom_percentages_convert() {
        let cfg = BookingConfig {
            tax_pct: 12.5,
            ..BookingConfig::default()
        };
        assert_eq!(cfg.fee_rates().tax, Decimal::new(125, 3));
    }
}
