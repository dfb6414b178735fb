//! Configuration types for labor cost calculation.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::HashMap;

use crate::calculation::{DEFAULT_OVERTIME_MULTIPLIER, DEFAULT_STANDARD_DAY_HOURS};
use crate::error::{EngineError, EngineResult};

/// Identifying information about the configuration set.
#[derive(Debug, Clone, Deserialize)]
pub struct EngineMetadata {
    /// A short name for the rate set (e.g., "default").
    pub name: String,
    /// The version or effective date of the rate set.
    pub version: String,
}

/// Currency and rounding settings.
#[derive(Debug, Clone, Deserialize)]
pub struct CurrencyConfig {
    /// ISO 4217 code (e.g., "KRW").
    pub code: String,
    /// Decimal places kept on money amounts.
    #[serde(default)]
    pub scale: u32,
}

/// Settings from engine.yaml.
#[derive(Debug, Clone, Deserialize)]
pub struct EngineSettings {
    /// Metadata about this configuration set.
    pub engine: EngineMetadata,
    /// Clock hours in one manpower unit and the daily overtime threshold.
    #[serde(default = "default_standard_day_hours")]
    pub standard_day_hours: Decimal,
    /// Multiplier applied to the hourly rate when no overtime rate is given.
    #[serde(default = "default_overtime_multiplier")]
    pub overtime_multiplier: Decimal,
    /// Manpower above which a record is flagged as a long day.
    #[serde(default = "default_long_day_manpower")]
    pub long_day_manpower: Decimal,
    /// Currency settings.
    pub currency: CurrencyConfig,
}

fn default_standard_day_hours() -> Decimal {
    DEFAULT_STANDARD_DAY_HOURS
}

fn default_overtime_multiplier() -> Decimal {
    DEFAULT_OVERTIME_MULTIPLIER
}

fn default_long_day_manpower() -> Decimal {
    Decimal::new(2, 0)
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            engine: EngineMetadata {
                name: "default".to_string(),
                version: "unversioned".to_string(),
            },
            standard_day_hours: DEFAULT_STANDARD_DAY_HOURS,
            overtime_multiplier: DEFAULT_OVERTIME_MULTIPLIER,
            long_day_manpower: default_long_day_manpower(),
            currency: CurrencyConfig {
                code: "KRW".to_string(),
                scale: 0,
            },
        }
    }
}

/// A trade in the trade catalogue.
#[derive(Debug, Clone, Deserialize)]
pub struct Trade {
    /// The human-readable name of the trade.
    pub name: String,
    /// A description of the work the trade covers.
    #[serde(default)]
    pub description: String,
}

/// Trades configuration file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct TradesConfig {
    /// Map of trade code to trade details.
    pub trades: HashMap<String, Trade>,
}

/// Rate for one trade in a rate table.
#[derive(Debug, Clone, Deserialize)]
pub struct TradeRate {
    /// The day rate, informational.
    #[serde(default)]
    pub daily: Option<Decimal>,
    /// The hourly rate.
    pub hourly: Decimal,
    /// Explicit overtime hourly rate; derived when absent.
    #[serde(default)]
    pub overtime_hourly: Option<Decimal>,
}

/// Rate for one equipment class in a rate table.
#[derive(Debug, Clone, Deserialize)]
pub struct EquipmentRate {
    /// The human-readable name of the equipment class.
    #[serde(default)]
    pub name: String,
    /// The hourly rate including operator.
    pub hourly: Decimal,
    /// Explicit overtime hourly rate; derived when absent.
    #[serde(default)]
    pub overtime_hourly: Option<Decimal>,
}

/// Rates in force from a specific effective date.
#[derive(Debug, Clone, Deserialize)]
pub struct RateTable {
    /// The effective date for these rates.
    pub effective_date: NaiveDate,
    /// Map of trade code to rates.
    pub trades: HashMap<String, TradeRate>,
    /// Map of equipment class code to rates.
    #[serde(default)]
    pub equipment: HashMap<String, EquipmentRate>,
}

/// The complete engine configuration loaded from YAML files.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    settings: EngineSettings,
    trades: HashMap<String, Trade>,
    /// Sorted oldest first.
    rate_tables: Vec<RateTable>,
}

impl EngineConfig {
    /// Creates a new EngineConfig from its component parts.
    pub fn new(
        settings: EngineSettings,
        trades: HashMap<String, Trade>,
        rate_tables: Vec<RateTable>,
    ) -> Self {
        let mut sorted = rate_tables;
        sorted.sort_by(|a, b| a.effective_date.cmp(&b.effective_date));
        Self {
            settings,
            trades,
            rate_tables: sorted,
        }
    }

    /// Returns the engine settings.
    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// Returns the trade catalogue.
    pub fn trades(&self) -> &HashMap<String, Trade> {
        &self.trades
    }

    /// Returns all rate tables, oldest first.
    pub fn rate_tables(&self) -> &[RateTable] {
        &self.rate_tables
    }

    /// Returns the most recent rate table in force on `date`.
    pub fn rate_table_for(&self, date: NaiveDate) -> Option<&RateTable> {
        self.rate_tables
            .iter()
            .rfind(|table| table.effective_date <= date)
    }

    /// Returns true if any rate table knows the equipment class.
    pub fn knows_equipment(&self, code: &str) -> bool {
        self.rate_tables
            .iter()
            .any(|table| table.equipment.contains_key(code))
    }

    /// Gets a trade by its code.
    pub fn trade(&self, code: &str) -> EngineResult<&Trade> {
        self.trades
            .get(code)
            .ok_or_else(|| EngineError::TradeNotFound {
                code: code.to_string(),
            })
    }

    /// Gets the rate for a trade from the rate table in force on `date`.
    ///
    /// Returns `TradeNotFound` for a code missing from the catalogue and
    /// `RateNotFound` when no table in force prices the trade.
    pub fn trade_rate(&self, code: &str, date: NaiveDate) -> EngineResult<&TradeRate> {
        self.trade(code)?;
        self.rate_table_for(date)
            .and_then(|table| table.trades.get(code))
            .ok_or_else(|| EngineError::RateNotFound {
                code: code.to_string(),
                date,
            })
    }

    /// Gets the rate for an equipment class from the rate table in force on `date`.
    ///
    /// Equipment has no catalogue; a code no table mentions is
    /// `EquipmentNotFound`, a code only missing on `date` is `RateNotFound`.
    pub fn equipment_rate(&self, code: &str, date: NaiveDate) -> EngineResult<&EquipmentRate> {
        if !self.knows_equipment(code) {
            return Err(EngineError::EquipmentNotFound {
                code: code.to_string(),
            });
        }
        self.rate_table_for(date)
            .and_then(|table| table.equipment.get(code))
            .ok_or_else(|| EngineError::RateNotFound {
                code: code.to_string(),
                date,
            })
    }
}
