//! Configuration loading and management.
//!
//! This module loads the engine settings, trade catalogue and dated rate
//! tables from a directory of YAML files.
//!
//! # Example
//!
//! ```no_run
//! use sitepay::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/default").unwrap();
//! println!("Currency: {}", config.settings().currency.code);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    CurrencyConfig, EngineConfig, EngineMetadata, EngineSettings, EquipmentRate, RateTable,
    Trade, TradeRate, TradesConfig,
};
