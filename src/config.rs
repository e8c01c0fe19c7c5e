// src/config.rs

//! A centralized place for tuning the ticket, plus the optional JSON config file.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use crate::ticket::TicketBindings;

// --- General ---
pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;
/// Environment variable naming the JSON config file.
pub const CONFIG_ENV_VAR: &str = "STOCKBROKR_CONFIG";

// --- Accounts ---
/// Where registered users and their portfolios are kept between runs.
pub const DEFAULT_SNAPSHOT_PATH: &str = "stockbrokr_accounts.json";
pub const DEFAULT_STARTING_BALANCE_CENTS: u64 = 1_000_000; // $10,000.00

// --- Quote feed ---
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 500;
pub const DEFAULT_DRIFT: f64 = 0.08;
pub const DEFAULT_VOLATILITY: f64 = 0.20;
/// How many ticks of history the price plot keeps.
pub const PRICE_HISTORY_LEN: usize = 240;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuoteConfig {
    pub tick_interval_ms: u64,
    pub drift: f64,
    pub volatility: f64,
}

impl Default for QuoteConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            drift: DEFAULT_DRIFT,
            volatility: DEFAULT_VOLATILITY,
        }
    }
}

impl QuoteConfig {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}

/// Everything the desktop ticket can be configured with. Every field is optional in
/// the file; missing ones fall back to the constants above.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub bindings: TicketBindings,
    pub starting_balance_cents: u64,
    pub quotes: QuoteConfig,
    pub snapshot_path: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bindings: TicketBindings::default(),
            starting_balance_cents: DEFAULT_STARTING_BALANCE_CENTS,
            quotes: QuoteConfig::default(),
            snapshot_path: PathBuf::from(DEFAULT_SNAPSHOT_PATH),
        }
    }
}

impl AppConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let cfg = Self::from_json(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reads the file named by `STOCKBROKR_CONFIG`, or defaults when it isn't set.
    pub fn from_env() -> Result<Self, ConfigError> {
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) => Self::load(Path::new(&path)),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.quotes.tick_interval_ms == 0 {
            return Err(ConfigError::Invalid("quotes.tick_interval_ms must be > 0".into()));
        }
        if !self.quotes.volatility.is_finite() || self.quotes.volatility < 0.0 {
            return Err(ConfigError::Invalid("quotes.volatility must be >= 0".into()));
        }
        if !self.quotes.drift.is_finite() {
            return Err(ConfigError::Invalid("quotes.drift must be finite".into()));
        }
        if self.snapshot_path.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("snapshot_path must not be empty".into()));
        }
        let b = &self.bindings;
        if b.shares == b.current || b.shares == b.total || b.current == b.total {
            return Err(ConfigError::Invalid("element bindings must be distinct".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_means_defaults() {
        let cfg = AppConfig::from_json("{}").unwrap();
        assert_eq!(cfg, AppConfig::default());
    }

    #[test]
    fn partial_override() {
        let cfg = AppConfig::from_json(
            r#"{ "bindings": { "total": "notional" }, "quotes": { "volatility": 0.5 } }"#,
        )
        .unwrap();

        assert_eq!(cfg.bindings.total.as_str(), "notional");
        assert_eq!(cfg.bindings.shares.as_str(), "shares", "Unset bindings keep their default.");
        assert_eq!(cfg.quotes.volatility, 0.5);
        assert_eq!(cfg.quotes.tick_interval_ms, DEFAULT_TICK_INTERVAL_MS);
        assert_eq!(cfg.snapshot_path, PathBuf::from(DEFAULT_SNAPSHOT_PATH));
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn rejects_colliding_bindings() {
        let cfg = AppConfig::from_json(r#"{ "bindings": { "total": "shares" } }"#).unwrap();
        assert!(matches!(cfg.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn rejects_zero_tick() {
        let mut cfg = AppConfig::default();
        cfg.quotes.tick_interval_ms = 0;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let err = AppConfig::load(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
