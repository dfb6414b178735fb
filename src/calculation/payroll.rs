//! Worker payroll for a pay period.
//!
//! Combines rate resolution, the manpower-to-hours conversion and the
//! per-record cost calculation into a [`PayrollResult`] with an audit trace.
//!
//! Overtime is split per work record. Two 1.25-day records in the same
//! period yield 2 + 2 overtime hours, never a pooled figure.

use std::time::Instant;

use chrono::Utc;
use rust_decimal::Decimal;
use tracing::debug;
use uuid::Uuid;

use crate::config::EngineConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    AuditStep, AuditTrace, AuditWarning, CostBreakdown, PayLine, PayPeriod, PayrollResult,
    PayrollTotals, RateProfile, WorkRecord, Worker,
};

use super::cost::{CostPolicy, calculate_cost};
use super::rate_lookup::resolve_worker_rate;

/// Calculates a worker's pay for a period from their work records.
///
/// Records belonging to other workers or dated outside the period are
/// skipped and reported as audit warnings. Each remaining record is costed
/// at the rate in force on its own date.
///
/// # Errors
///
/// - `InvalidArgument` for an inverted period or a non-positive override rate
/// - `TradeNotFound` for an unknown trade without an override, even when no
///   record is selected
/// - `InvalidRecord` for a record with negative manpower
/// - `RateNotFound` when no rate table is in force on a record's date
/// - `CalculationError` on decimal overflow
///
/// # Examples
///
/// ```
/// use sitepay::calculation::calculate_payroll;
/// use sitepay::config::{EngineConfig, EngineSettings};
/// use sitepay::models::{PayPeriod, RateProfile, WorkRecord, Worker};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
/// use std::collections::HashMap;
///
/// let config = EngineConfig::new(EngineSettings::default(), HashMap::new(), vec![]);
/// let worker = Worker {
///     id: "wk_001".to_string(),
///     name: "Lee Seojun".to_string(),
///     trade_code: "general_laborer".to_string(),
///     rate: Some(RateProfile::new(Decimal::new(10000, 0))),
/// };
/// let records = vec![WorkRecord {
///     id: "wr_001".to_string(),
///     worker_id: "wk_001".to_string(),
///     site_id: "site_a".to_string(),
///     work_date: NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
///     labor_hours: Decimal::new(125, 2),
/// }];
///
/// let result = calculate_payroll(&worker, &PayPeriod::for_month(2026, 3).unwrap(), &records, &config).unwrap();
/// assert_eq!(result.totals.overtime_hours, Decimal::new(2, 0));
/// assert_eq!(result.totals.gross_pay, Decimal::new(110000, 0));
/// ```
pub fn calculate_payroll(
    worker: &Worker,
    period: &PayPeriod,
    records: &[WorkRecord],
    config: &EngineConfig,
) -> EngineResult<PayrollResult> {
    let start_time = Instant::now();
    period.validate()?;
    worker.rate.as_ref().map(RateProfile::validate).transpose()?;
    if worker.rate.is_none() {
        config.trade(&worker.trade_code)?;
    }

    let settings = config.settings();
    let policy = CostPolicy::from_settings(settings);

    let mut warnings = Vec::new();
    let mut steps: Vec<AuditStep> = Vec::new();
    let mut step_number: u32 = 1;

    let other_worker = records.iter().filter(|r| r.worker_id != worker.id).count();
    let outside_period = records
        .iter()
        .filter(|r| r.worker_id == worker.id && !period.contains_date(r.work_date))
        .count();

    let mut selected: Vec<&WorkRecord> = records
        .iter()
        .filter(|r| r.worker_id == worker.id && period.contains_date(r.work_date))
        .collect();
    selected.sort_by(|a, b| a.work_date.cmp(&b.work_date).then_with(|| a.id.cmp(&b.id)));

    if other_worker > 0 {
        warnings.push(AuditWarning::new(
            "RECORDS_FOR_OTHER_WORKER",
            format!(
                "{} record(s) belong to other workers and were ignored",
                other_worker
            ),
            "low",
        ));
    }
    if outside_period > 0 {
        warnings.push(AuditWarning::new(
            "RECORDS_OUTSIDE_PERIOD",
            format!(
                "{} record(s) fall outside {} to {} and were ignored",
                outside_period, period.start_date, period.end_date
            ),
            "low",
        ));
    }

    steps.push(AuditStep {
        step_number,
        rule_id: "record_selection".to_string(),
        rule_name: "Work Record Selection".to_string(),
        input: serde_json::json!({
            "worker_id": worker.id,
            "start_date": period.start_date.to_string(),
            "end_date": period.end_date.to_string(),
            "records_supplied": records.len()
        }),
        output: serde_json::json!({
            "records_selected": selected.len(),
            "other_worker": other_worker,
            "outside_period": outside_period
        }),
        reasoning: format!(
            "Selected {} of {} record(s) for worker '{}'",
            selected.len(),
            records.len(),
            worker.id
        ),
    });
    step_number += 1;

    let mut pay_lines = Vec::with_capacity(selected.len());
    let mut totals = PayrollTotals::zero();

    for record in selected {
        record.validate()?;

        if record.labor_hours > settings.long_day_manpower {
            warnings.push(AuditWarning::new(
                "LONG_DAY",
                format!(
                    "Record '{}' on {} logs {} manpower, above {}",
                    record.id,
                    record.work_date,
                    record.labor_hours.normalize(),
                    settings.long_day_manpower.normalize()
                ),
                "medium",
            ));
        }

        let resolution = resolve_worker_rate(worker, record.work_date, config, step_number)?;
        steps.push(resolution.audit_step);
        step_number += 1;

        let clock_hours = record.clock_hours(policy.standard_day_hours)?;
        let costed = calculate_cost(clock_hours, &resolution.rate, &policy, step_number)?;
        step_number += costed.audit_steps.len() as u32;
        steps.extend(costed.audit_steps);

        let cost = costed.breakdown;
        totals = add_to_totals(totals, record.labor_hours, &cost)?;

        pay_lines.push(PayLine {
            record_id: record.id.clone(),
            site_id: record.site_id.clone(),
            work_date: record.work_date,
            manpower: record.labor_hours.normalize(),
            rate_source: resolution.source,
            rate_effective_date: resolution.rate_effective_date,
            cost,
        });
    }

    totals.manpower = totals.manpower.normalize();

    let duration_us = start_time.elapsed().as_micros() as u64;
    debug!(
        worker_id = %worker.id,
        pay_lines = pay_lines.len(),
        gross_pay = %totals.gross_pay,
        duration_us,
        "Payroll calculated"
    );

    Ok(PayrollResult {
        calculation_id: Uuid::new_v4(),
        timestamp: Utc::now(),
        engine_version: env!("CARGO_PKG_VERSION").to_string(),
        worker_id: worker.id.clone(),
        pay_period: period.clone(),
        currency: settings.currency.code.clone(),
        pay_lines,
        totals,
        audit_trace: AuditTrace {
            steps,
            warnings,
            duration_us,
        },
    })
}

fn add_to_totals(
    totals: PayrollTotals,
    manpower: Decimal,
    cost: &CostBreakdown,
) -> EngineResult<PayrollTotals> {
    let add = |a: Decimal, b: Decimal, field: &str| {
        a.checked_add(b).ok_or_else(|| EngineError::overflow(field))
    };
    Ok(PayrollTotals {
        manpower: add(totals.manpower, manpower, "manpower")?,
        regular_hours: add(totals.regular_hours, cost.regular_hours, "regular_hours")?,
        overtime_hours: add(totals.overtime_hours, cost.overtime_hours, "overtime_hours")?,
        regular_cost: add(totals.regular_cost, cost.regular_cost, "regular_cost")?,
        overtime_cost: add(totals.overtime_cost, cost.overtime_cost, "overtime_cost")?,
        gross_pay: add(totals.gross_pay, cost.total_cost, "gross_pay")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{EngineSettings, RateTable, Trade, TradeRate};
    use crate::models::{RateProfile, RateSource};
    use chrono::NaiveDate;
    use std::collections::HashMap;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn trade_rate(hourly: &str) -> TradeRate {
        TradeRate {
            daily: None,
            hourly: dec(hourly),
            overtime_hourly: None,
        }
    }

    fn create_test_config() -> EngineConfig {
        let mut trades = HashMap::new();
        trades.insert(
            "general_laborer".to_string(),
            Trade {
                name: "General Laborer".to_string(),
                description: String::new(),
            },
        );

        let mut rates_2026 = HashMap::new();
        rates_2026.insert("general_laborer".to_string(), trade_rate("10000"));
        let mut rates_mid = HashMap::new();
        rates_mid.insert("general_laborer".to_string(), trade_rate("12000"));

        EngineConfig::new(
            EngineSettings::default(),
            trades,
            vec![
                RateTable {
                    effective_date: date(2026, 1, 1),
                    trades: rates_2026,
                    equipment: HashMap::new(),
                },
                RateTable {
                    effective_date: date(2026, 3, 16),
                    trades: rates_mid,
                    equipment: HashMap::new(),
                },
            ],
        )
    }

    fn worker(rate: Option<RateProfile>) -> Worker {
        Worker {
            id: "wk_001".to_string(),
            name: "Choi Yuna".to_string(),
            trade_code: "general_laborer".to_string(),
            rate,
        }
    }

    fn record(id: &str, worker_id: &str, day: NaiveDate, manpower: &str) -> WorkRecord {
        WorkRecord {
            id: id.to_string(),
            worker_id: worker_id.to_string(),
            site_id: "site_a".to_string(),
            work_date: day,
            labor_hours: dec(manpower),
        }
    }

    fn march() -> PayPeriod {
        PayPeriod::new(date(2026, 3, 1), date(2026, 3, 15)).unwrap()
    }

    #[test]
    fn test_single_full_day() {
        let records = vec![record("wr_1", "wk_001", date(2026, 3, 2), "1.0")];
        let result = calculate_payroll(&worker(None), &march(), &records, &create_test_config())
            .unwrap();

        assert_eq!(result.pay_lines.len(), 1);
        assert_eq!(result.pay_lines[0].rate_source, RateSource::RateTable);
        assert_eq!(result.totals.manpower, dec("1"));
        assert_eq!(result.totals.regular_hours, dec("8"));
        assert_eq!(result.totals.overtime_hours, Decimal::ZERO);
        assert_eq!(result.totals.gross_pay, dec("80000"));
        assert_eq!(result.currency, "KRW");
    }

    #[test]
    fn test_overtime_split_per_record_not_pooled() {
        let records = vec![
            record("wr_1", "wk_001", date(2026, 3, 2), "1.25"),
            record("wr_2", "wk_001", date(2026, 3, 3), "1.25"),
        ];
        let result = calculate_payroll(&worker(None), &march(), &records, &create_test_config())
            .unwrap();

        assert_eq!(result.totals.regular_hours, dec("16"));
        assert_eq!(result.totals.overtime_hours, dec("4"));
        // 2 * (8 * 10000 + 2 * 15000)
        assert_eq!(result.totals.gross_pay, dec("220000"));
        assert_eq!(
            result.totals.gross_pay,
            result.totals.regular_cost + result.totals.overtime_cost
        );
    }

    #[test]
    fn test_short_days_do_not_accumulate_into_overtime() {
        let records = vec![
            record("wr_1", "wk_001", date(2026, 3, 2), "0.75"),
            record("wr_2", "wk_001", date(2026, 3, 3), "0.75"),
        ];
        let result = calculate_payroll(&worker(None), &march(), &records, &create_test_config())
            .unwrap();
        assert_eq!(result.totals.overtime_hours, Decimal::ZERO);
        assert_eq!(result.totals.regular_hours, dec("12"));
    }

    #[test]
    fn test_rate_change_mid_period_applies_per_record() {
        let period = PayPeriod::for_month(2026, 3).unwrap();
        let records = vec![
            record("wr_1", "wk_001", date(2026, 3, 13), "1.0"),
            record("wr_2", "wk_001", date(2026, 3, 16), "1.0"),
        ];
        let result =
            calculate_payroll(&worker(None), &period, &records, &create_test_config()).unwrap();

        assert_eq!(result.pay_lines[0].cost.hourly_rate, dec("10000"));
        assert_eq!(result.pay_lines[1].cost.hourly_rate, dec("12000"));
        assert_eq!(result.pay_lines[0].rate_effective_date, Some(date(2026, 1, 1)));
        assert_eq!(result.pay_lines[1].rate_effective_date, Some(date(2026, 3, 16)));
        assert_eq!(result.totals.gross_pay, dec("176000"));
    }

    #[test]
    fn test_override_rate_used() {
        let records = vec![record("wr_1", "wk_001", date(2026, 3, 2), "1.25")];
        let w = worker(Some(
            RateProfile::new(dec("20000")).with_overtime_rate(dec("25000")),
        ));
        let result = calculate_payroll(&w, &march(), &records, &create_test_config()).unwrap();

        assert_eq!(result.pay_lines[0].rate_source, RateSource::Override);
        assert_eq!(result.pay_lines[0].rate_effective_date, None);
        assert_eq!(result.totals.gross_pay, dec("210000"));
    }

    #[test]
    fn test_zero_override_rate_is_invalid_argument() {
        let records = vec![record("wr_1", "wk_001", date(2026, 3, 2), "1.0")];
        let w = worker(Some(RateProfile::new(Decimal::ZERO)));
        match calculate_payroll(&w, &march(), &records, &create_test_config()) {
            Err(EngineError::InvalidArgument { field, .. }) => assert_eq!(field, "hourly_rate"),
            other => panic!("Expected InvalidArgument, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_override_rejected_without_records() {
        let w = worker(Some(
            RateProfile::new(dec("10000")).with_overtime_rate(dec("-1")),
        ));
        match calculate_payroll(&w, &march(), &[], &create_test_config()) {
            Err(EngineError::InvalidArgument { field, .. }) => assert_eq!(field, "overtime_rate"),
            other => panic!("Expected InvalidArgument, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_trade_rejected_without_records() {
        let mut w = worker(None);
        w.trade_code = "stonemason".to_string();
        match calculate_payroll(&w, &march(), &[], &create_test_config()) {
            Err(EngineError::TradeNotFound { code }) => assert_eq!(code, "stonemason"),
            other => panic!("Expected TradeNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_trade_allowed_with_override() {
        let mut w = worker(Some(RateProfile::new(dec("10000"))));
        w.trade_code = "stonemason".to_string();
        let records = vec![record("wr_1", "wk_001", date(2026, 3, 2), "1.0")];
        let result = calculate_payroll(&w, &march(), &records, &create_test_config()).unwrap();
        assert_eq!(result.totals.gross_pay, dec("80000"));
    }

    #[test]
    fn test_ignored_records_raise_warnings() {
        let records = vec![
            record("wr_1", "wk_001", date(2026, 3, 2), "1.0"),
            record("wr_2", "wk_999", date(2026, 3, 2), "1.0"),
            record("wr_3", "wk_001", date(2026, 2, 27), "1.0"),
        ];
        let result = calculate_payroll(&worker(None), &march(), &records, &create_test_config())
            .unwrap();

        assert_eq!(result.pay_lines.len(), 1);
        let codes: Vec<&str> = result
            .audit_trace
            .warnings
            .iter()
            .map(|w| w.code.as_str())
            .collect();
        assert!(codes.contains(&"RECORDS_FOR_OTHER_WORKER"));
        assert!(codes.contains(&"RECORDS_OUTSIDE_PERIOD"));
    }

    #[test]
    fn test_long_day_warning() {
        let records = vec![record("wr_1", "wk_001", date(2026, 3, 2), "2.5")];
        let result = calculate_payroll(&worker(None), &march(), &records, &create_test_config())
            .unwrap();
        assert!(
            result
                .audit_trace
                .warnings
                .iter()
                .any(|w| w.code == "LONG_DAY")
        );
        assert_eq!(result.totals.overtime_hours, dec("12"));
    }

    #[test]
    fn test_two_day_record_is_not_a_long_day() {
        let records = vec![record("wr_1", "wk_001", date(2026, 3, 2), "2.0")];
        let result = calculate_payroll(&worker(None), &march(), &records, &create_test_config())
            .unwrap();
        assert!(
            !result
                .audit_trace
                .warnings
                .iter()
                .any(|w| w.code == "LONG_DAY")
        );
        assert_eq!(result.totals.overtime_hours, dec("8"));
    }

    #[test]
    fn test_pay_lines_sorted_by_date() {
        let records = vec![
            record("wr_b", "wk_001", date(2026, 3, 5), "1.0"),
            record("wr_a", "wk_001", date(2026, 3, 2), "1.0"),
        ];
        let result = calculate_payroll(&worker(None), &march(), &records, &create_test_config())
            .unwrap();
        assert_eq!(result.pay_lines[0].record_id, "wr_a");
        assert_eq!(result.pay_lines[1].record_id, "wr_b");
    }

    #[test]
    fn test_audit_steps_are_numbered_sequentially() {
        let records = vec![
            record("wr_1", "wk_001", date(2026, 3, 2), "1.0"),
            record("wr_2", "wk_001", date(2026, 3, 3), "1.25"),
        ];
        let result = calculate_payroll(&worker(None), &march(), &records, &create_test_config())
            .unwrap();

        let steps = &result.audit_trace.steps;
        // selection + 3 steps per record
        assert_eq!(steps.len(), 7);
        for (i, step) in steps.iter().enumerate() {
            assert_eq!(step.step_number, i as u32 + 1);
        }
        assert_eq!(steps[0].rule_id, "record_selection");
        assert_eq!(steps[1].rule_id, "rate_lookup");
        assert_eq!(steps[2].rule_id, "overtime_split");
        assert_eq!(steps[3].rule_id, "cost_calculation");
    }

    #[test]
    fn test_negative_record_rejected() {
        let records = vec![record("wr_bad", "wk_001", date(2026, 3, 2), "-1")];
        match calculate_payroll(&worker(None), &march(), &records, &create_test_config()) {
            Err(EngineError::InvalidRecord { record_id, .. }) => assert_eq!(record_id, "wr_bad"),
            other => panic!("Expected InvalidRecord, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_period_yields_zero_totals() {
        let result =
            calculate_payroll(&worker(None), &march(), &[], &create_test_config()).unwrap();
        assert!(result.pay_lines.is_empty());
        assert_eq!(result.totals, PayrollTotals::zero());
    }

    #[test]
    fn test_rate_not_found_before_first_table() {
        let period = PayPeriod::new(date(2025, 12, 1), date(2025, 12, 31)).unwrap();
        let records = vec![record("wr_1", "wk_001", date(2025, 12, 2), "1.0")];
        assert!(matches!(
            calculate_payroll(&worker(None), &period, &records, &create_test_config()),
            Err(EngineError::RateNotFound { .. })
        ));
    }
}
