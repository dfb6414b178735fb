//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading trade
//! catalogues and dated rate tables from YAML files.

use rust_decimal::Decimal;
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::error::{EngineError, EngineResult};

use super::types::{EngineConfig, EngineSettings, RateTable, TradesConfig};

/// Loads and provides access to engine configuration.
///
/// # Directory Structure
///
/// ```text
/// config/default/
/// ├── engine.yaml      # Day length, overtime multiplier, currency
/// ├── trades.yaml      # Trade catalogue
/// └── rates/
///     └── 2026-01-01.yaml  # Trade and equipment rates effective from this date
/// ```
///
/// # Example
///
/// ```no_run
/// use sitepay::config::ConfigLoader;
/// use chrono::NaiveDate;
///
/// let loader = ConfigLoader::load("./config/default")?;
/// let date = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
/// let rate = loader.config().trade_rate("general_laborer", date)?;
/// println!("Hourly rate: {}", rate.hourly);
/// # Ok::<(), sitepay::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: EngineConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// Fails if any required file is missing, contains invalid YAML, or
    /// carries settings outside their valid range.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let settings = Self::load_yaml::<EngineSettings>(&path.join("engine.yaml"))?;
        Self::validate_settings(&settings, &path.join("engine.yaml"))?;

        let trades_config = Self::load_yaml::<TradesConfig>(&path.join("trades.yaml"))?;

        let rate_tables = Self::load_rate_tables(&path.join("rates"))?;

        debug!(
            path = %path.display(),
            trades = trades_config.trades.len(),
            rate_tables = rate_tables.len(),
            "Loaded engine configuration"
        );

        Ok(Self {
            config: EngineConfig::new(settings, trades_config.trades, rate_tables),
        })
    }

    /// Wraps an already-built configuration.
    pub fn from_config(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    fn validate_settings(settings: &EngineSettings, path: &Path) -> EngineResult<()> {
        let invalid = |message: String| EngineError::ConfigParseError {
            path: path.display().to_string(),
            message,
        };
        if settings.standard_day_hours <= Decimal::ZERO {
            return Err(invalid(format!(
                "standard_day_hours must be positive, got {}",
                settings.standard_day_hours
            )));
        }
        if settings.overtime_multiplier <= Decimal::ZERO {
            return Err(invalid(format!(
                "overtime_multiplier must be positive, got {}",
                settings.overtime_multiplier
            )));
        }
        if settings.currency.scale > 28 {
            return Err(invalid(format!(
                "currency.scale must be at most 28, got {}",
                settings.currency.scale
            )));
        }
        Ok(())
    }

    /// Loads all rate files from the rates directory.
    fn load_rate_tables(rates_dir: &Path) -> EngineResult<Vec<RateTable>> {
        let rates_dir_str = rates_dir.display().to_string();

        let entries = fs::read_dir(rates_dir).map_err(|_| EngineError::ConfigNotFound {
            path: rates_dir_str.clone(),
        })?;

        let mut tables = Vec::new();

        for entry in entries {
            let entry = entry.map_err(|_| EngineError::ConfigNotFound {
                path: rates_dir_str.clone(),
            })?;

            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "yaml") {
                tables.push(Self::load_yaml::<RateTable>(&path)?);
            }
        }

        if tables.is_empty() {
            return Err(EngineError::ConfigNotFound {
                path: format!("{} (no rate files found)", rates_dir_str),
            });
        }

        Ok(tables)
    }

    /// Returns the underlying engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Returns the engine settings.
    pub fn settings(&self) -> &EngineSettings {
        self.config.settings()
    }
}
