//! Rate resolution.
//!
//! This module determines the [`RateProfile`] applied to a worker or an
//! allocation, either from an explicit override or from the dated rate
//! tables in the engine configuration.

use chrono::NaiveDate;

use crate::config::EngineConfig;
use crate::error::EngineResult;
use crate::models::{AuditStep, RateProfile, RateSource, ResourceType, Worker};

/// The result of a rate lookup, including the profile and audit step.
#[derive(Debug, Clone)]
pub struct RateResolution {
    /// The resolved rate profile.
    pub rate: RateProfile,
    /// Whether the rate was an override or came from a rate table.
    pub source: RateSource,
    /// Effective date of the rate table used, if any.
    pub rate_effective_date: Option<NaiveDate>,
    /// The audit step recording this lookup.
    pub audit_step: AuditStep,
}

/// Determines a worker's rate for a work date.
///
/// Priority:
/// 1. `worker.rate`, if set
/// 2. the trade's rate from the most recent table effective on or before `date`
///
/// # Errors
///
/// - `TradeNotFound` if the trade code is not in the catalogue
/// - `RateNotFound` if no table in force prices the trade
pub fn resolve_worker_rate(
    worker: &Worker,
    date: NaiveDate,
    config: &EngineConfig,
    step_number: u32,
) -> EngineResult<RateResolution> {
    match &worker.rate {
        Some(rate) => Ok(override_resolution(
            &worker.trade_code,
            rate,
            date,
            step_number,
        )),
        None => resolve_trade_rate(&worker.trade_code, date, config, step_number),
    }
}

/// Determines the rate for an allocation of the given resource type.
///
/// An explicit `rate` wins; otherwise workers resolve by trade and
/// equipment by equipment class.
pub fn resolve_allocation_rate(
    resource_type: ResourceType,
    resource_code: &str,
    rate: Option<&RateProfile>,
    date: NaiveDate,
    config: &EngineConfig,
    step_number: u32,
) -> EngineResult<RateResolution> {
    if let Some(rate) = rate {
        return Ok(override_resolution(resource_code, rate, date, step_number));
    }
    match resource_type {
        ResourceType::Worker => resolve_trade_rate(resource_code, date, config, step_number),
        ResourceType::Equipment => {
            resolve_equipment_rate(resource_code, date, config, step_number)
        }
    }
}

fn resolve_trade_rate(
    trade_code: &str,
    date: NaiveDate,
    config: &EngineConfig,
    step_number: u32,
) -> EngineResult<RateResolution> {
    let trade_rate = config.trade_rate(trade_code, date)?;
    let table_date = config.rate_table_for(date).map(|t| t.effective_date);

    let rate = RateProfile {
        hourly_rate: trade_rate.hourly,
        overtime_rate: trade_rate.overtime_hourly,
    };
    Ok(table_resolution(
        "trade",
        trade_code,
        rate,
        date,
        table_date,
        step_number,
    ))
}

fn resolve_equipment_rate(
    equipment_code: &str,
    date: NaiveDate,
    config: &EngineConfig,
    step_number: u32,
) -> EngineResult<RateResolution> {
    let equipment_rate = config.equipment_rate(equipment_code, date)?;
    let table_date = config.rate_table_for(date).map(|t| t.effective_date);

    let rate = RateProfile {
        hourly_rate: equipment_rate.hourly,
        overtime_rate: equipment_rate.overtime_hourly,
    };
    Ok(table_resolution(
        "equipment",
        equipment_code,
        rate,
        date,
        table_date,
        step_number,
    ))
}

fn override_resolution(
    code: &str,
    rate: &RateProfile,
    date: NaiveDate,
    step_number: u32,
) -> RateResolution {
    let audit_step = AuditStep {
        step_number,
        rule_id: "rate_lookup".to_string(),
        rule_name: "Rate Lookup".to_string(),
        input: serde_json::json!({
            "code": code,
            "date": date.to_string(),
            "override_hourly_rate": rate.hourly_rate.to_string()
        }),
        output: serde_json::json!({
            "hourly_rate": rate.hourly_rate.to_string(),
            "overtime_rate": rate.overtime_rate.map(|r| r.to_string()),
            "source": "override"
        }),
        reasoning: format!(
            "Using override rate {} instead of rate table lookup for '{}'",
            rate.hourly_rate, code
        ),
    };

    RateResolution {
        rate: rate.clone(),
        source: RateSource::Override,
        rate_effective_date: None,
        audit_step,
    }
}

fn table_resolution(
    kind: &str,
    code: &str,
    rate: RateProfile,
    date: NaiveDate,
    table_date: Option<NaiveDate>,
    step_number: u32,
) -> RateResolution {
    let table_label = table_date
        .map(|d| d.to_string())
        .unwrap_or_else(|| "unknown".to_string());
    let audit_step = AuditStep {
        step_number,
        rule_id: "rate_lookup".to_string(),
        rule_name: "Rate Lookup".to_string(),
        input: serde_json::json!({
            "kind": kind,
            "code": code,
            "date": date.to_string()
        }),
        output: serde_json::json!({
            "hourly_rate": rate.hourly_rate.to_string(),
            "overtime_rate": rate.overtime_rate.map(|r| r.to_string()),
            "source": "rate_table",
            "rate_effective_date": table_label
        }),
        reasoning: format!(
            "Looked up {} rate for '{}' effective {}: {}",
            kind, code, table_label, rate.hourly_rate
        ),
    };

    RateResolution {
        rate,
        source: RateSource::RateTable,
        rate_effective_date: table_date,
        audit_step,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{EngineSettings, EquipmentRate, RateTable, Trade, TradeRate};
    use crate::error::EngineError;
    use rust_decimal::Decimal;
    use std::collections::HashMap;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn create_test_config() -> EngineConfig {
        let mut trades = HashMap::new();
        trades.insert(
            "rebar_worker".to_string(),
            Trade {
                name: "Rebar Worker".to_string(),
                description: String::new(),
            },
        );
        trades.insert(
            "painter".to_string(),
            Trade {
                name: "Painter".to_string(),
                description: String::new(),
            },
        );

        let mut trade_rates = HashMap::new();
        trade_rates.insert(
            "rebar_worker".to_string(),
            TradeRate {
                daily: Some(dec("265000")),
                hourly: dec("33125"),
                overtime_hourly: None,
            },
        );

        let mut equipment = HashMap::new();
        equipment.insert(
            "excavator_06".to_string(),
            EquipmentRate {
                name: "Excavator 0.6m3".to_string(),
                hourly: dec("90000"),
                overtime_hourly: Some(dec("120000")),
            },
        );

        let tables = vec![RateTable {
            effective_date: date(2026, 1, 1),
            trades: trade_rates,
            equipment,
        }];

        EngineConfig::new(EngineSettings::default(), trades, tables)
    }

    fn create_test_worker(trade: &str, rate: Option<RateProfile>) -> Worker {
        Worker {
            id: "wk_001".to_string(),
            name: "Park Jiho".to_string(),
            trade_code: trade.to_string(),
            rate,
        }
    }

    #[test]
    fn test_worker_rate_from_table() {
        let config = create_test_config();
        let worker = create_test_worker("rebar_worker", None);

        let result = resolve_worker_rate(&worker, date(2026, 3, 2), &config, 1).unwrap();

        assert_eq!(result.rate.hourly_rate, dec("33125"));
        assert_eq!(result.rate.overtime_rate, None);
        assert_eq!(result.source, RateSource::RateTable);
        assert_eq!(result.rate_effective_date, Some(date(2026, 1, 1)));
        assert_eq!(result.audit_step.rule_id, "rate_lookup");
        assert_eq!(result.audit_step.output["source"], "rate_table");
    }

    #[test]
    fn test_worker_override_takes_precedence() {
        let config = create_test_config();
        let worker = create_test_worker("rebar_worker", Some(RateProfile::new(dec("40000"))));

        let result = resolve_worker_rate(&worker, date(2026, 3, 2), &config, 1).unwrap();

        assert_eq!(result.rate.hourly_rate, dec("40000"));
        assert_eq!(result.source, RateSource::Override);
        assert_eq!(result.rate_effective_date, None);
        assert!(result.audit_step.reasoning.contains("override"));
    }

    #[test]
    fn test_override_skips_unknown_trade() {
        let config = create_test_config();
        let worker = create_test_worker("stonemason", Some(RateProfile::new(dec("40000"))));
        assert!(resolve_worker_rate(&worker, date(2026, 3, 2), &config, 1).is_ok());
    }

    #[test]
    fn test_unknown_trade_returns_error() {
        let config = create_test_config();
        let worker = create_test_worker("stonemason", None);

        match resolve_worker_rate(&worker, date(2026, 3, 2), &config, 1) {
            Err(EngineError::TradeNotFound { code }) => assert_eq!(code, "stonemason"),
            other => panic!("Expected TradeNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_trade_without_rate_returns_rate_not_found() {
        let config = create_test_config();
        let worker = create_test_worker("painter", None);

        assert!(matches!(
            resolve_worker_rate(&worker, date(2026, 3, 2), &config, 1),
            Err(EngineError::RateNotFound { .. })
        ));
    }

    #[test]
    fn test_date_before_first_table_returns_rate_not_found() {
        let config = create_test_config();
        let worker = create_test_worker("rebar_worker", None);

        match resolve_worker_rate(&worker, date(2025, 12, 31), &config, 1) {
            Err(EngineError::RateNotFound { code, date: d }) => {
                assert_eq!(code, "rebar_worker");
                assert_eq!(d, date(2025, 12, 31));
            }
            other => panic!("Expected RateNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_equipment_allocation_rate_from_table() {
        let config = create_test_config();
        let result = resolve_allocation_rate(
            ResourceType::Equipment,
            "excavator_06",
            None,
            date(2026, 3, 2),
            &config,
            3,
        )
        .unwrap();

        assert_eq!(result.rate.hourly_rate, dec("90000"));
        assert_eq!(result.rate.overtime_rate, Some(dec("120000")));
        assert_eq!(result.audit_step.step_number, 3);
        assert_eq!(result.audit_step.input["kind"], "equipment");
    }

    #[test]
    fn test_unknown_equipment_returns_error() {
        let config = create_test_config();
        assert!(matches!(
            resolve_allocation_rate(
                ResourceType::Equipment,
                "tower_crane",
                None,
                date(2026, 3, 2),
                &config,
                1,
            ),
            Err(EngineError::EquipmentNotFound { .. })
        ));
    }

    #[test]
    fn test_allocation_override_rate() {
        let config = create_test_config();
        let rate = RateProfile::new(dec("50000"));
        let result = resolve_allocation_rate(
            ResourceType::Equipment,
            "tower_crane",
            Some(&rate),
            date(2026, 3, 2),
            &config,
            1,
        )
        .unwrap();
        assert_eq!(result.source, RateSource::Override);
        assert_eq!(result.rate, rate);
    }
}
