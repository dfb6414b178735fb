//! Manpower aggregation.
//!
//! Sums work-record manpower (day units, 1.0 = one standard day) per worker
//! over a period, per calendar month, and per day for the daily work-log
//! view. Aggregation never splits overtime; that happens per record in
//! [`calculate_cost`](super::calculate_cost).

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{PayPeriod, WorkRecord};

/// Manpower totals for one worker over a period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManpowerSummary {
    /// The worker aggregated.
    pub worker_id: String,
    /// The period covered.
    pub period: PayPeriod,
    /// Sum of `labor_hours` in day units.
    pub total_manpower: Decimal,
    /// `total_manpower` converted to clock hours.
    pub total_clock_hours: Decimal,
    /// Records that contributed.
    pub record_count: usize,
    /// Distinct dates worked.
    pub days_worked: usize,
    /// Distinct sites worked at, sorted.
    pub sites: Vec<String>,
}

/// Manpower logged on one date across all workers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyManpower {
    /// The date.
    pub date: NaiveDate,
    /// Sum of `labor_hours` in day units.
    pub total_manpower: Decimal,
    /// `total_manpower` converted to clock hours.
    pub total_clock_hours: Decimal,
    /// Distinct workers with a record on this date.
    pub worker_count: usize,
}

fn checked_sum(total: Decimal, value: Decimal) -> EngineResult<Decimal> {
    total
        .checked_add(value)
        .ok_or_else(|| EngineError::overflow("total_manpower"))
}

fn to_clock_hours(manpower: Decimal, standard_day_hours: Decimal) -> EngineResult<Decimal> {
    manpower
        .checked_mul(standard_day_hours)
        .map(|h| h.normalize())
        .ok_or_else(|| EngineError::overflow("total_clock_hours"))
}

/// Sums a worker's manpower over an inclusive period.
///
/// Records for other workers or outside the period are ignored.
///
/// # Errors
///
/// `InvalidArgument` for an inverted period; `InvalidRecord` if a
/// contributing record has negative manpower.
///
/// # Examples
///
/// ```
/// use sitepay::calculation::aggregate_manpower;
/// use sitepay::models::{PayPeriod, WorkRecord};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let d = |day| NaiveDate::from_ymd_opt(2026, 3, day).unwrap();
/// let records = vec![
///     WorkRecord { id: "a".into(), worker_id: "w1".into(), site_id: "s1".into(), work_date: d(2), labor_hours: Decimal::new(10, 1) },
///     WorkRecord { id: "b".into(), worker_id: "w1".into(), site_id: "s1".into(), work_date: d(3), labor_hours: Decimal::new(15, 1) },
/// ];
/// let period = PayPeriod::for_month(2026, 3).unwrap();
/// let summary = aggregate_manpower(&records, "w1", &period, Decimal::new(8, 0)).unwrap();
/// assert_eq!(summary.total_manpower, Decimal::new(25, 1));
/// assert_eq!(summary.total_clock_hours, Decimal::new(20, 0));
/// ```
pub fn aggregate_manpower(
    records: &[WorkRecord],
    worker_id: &str,
    period: &PayPeriod,
    standard_day_hours: Decimal,
) -> EngineResult<ManpowerSummary> {
    period.validate()?;

    let mut total_manpower = Decimal::ZERO;
    let mut record_count = 0;
    let mut dates = BTreeSet::new();
    let mut sites = BTreeSet::new();

    for record in records
        .iter()
        .filter(|r| r.worker_id == worker_id && period.contains_date(r.work_date))
    {
        record.validate()?;
        total_manpower = checked_sum(total_manpower, record.labor_hours)?;
        record_count += 1;
        dates.insert(record.work_date);
        sites.insert(record.site_id.clone());
    }

    Ok(ManpowerSummary {
        worker_id: worker_id.to_string(),
        period: period.clone(),
        total_manpower: total_manpower.normalize(),
        total_clock_hours: to_clock_hours(total_manpower, standard_day_hours)?,
        record_count,
        days_worked: dates.len(),
        sites: sites.into_iter().collect(),
    })
}

/// Sums a worker's manpower over a calendar month.
///
/// # Errors
///
/// `InvalidArgument` if `month` is not 1-12.
pub fn aggregate_monthly(
    records: &[WorkRecord],
    worker_id: &str,
    year: i32,
    month: u32,
    standard_day_hours: Decimal,
) -> EngineResult<ManpowerSummary> {
    let period = PayPeriod::for_month(year, month)?;
    aggregate_manpower(records, worker_id, &period, standard_day_hours)
}

/// Rolls manpower up per date across all workers, sorted by date.
///
/// Dates with no records are omitted.
pub fn aggregate_daily(
    records: &[WorkRecord],
    period: &PayPeriod,
    standard_day_hours: Decimal,
) -> EngineResult<Vec<DailyManpower>> {
    period.validate()?;

    let mut by_date: BTreeMap<NaiveDate, (Decimal, BTreeSet<&str>)> = BTreeMap::new();
    for record in records.iter().filter(|r| period.contains_date(r.work_date)) {
        record.validate()?;
        let entry = by_date
            .entry(record.work_date)
            .or_insert_with(|| (Decimal::ZERO, BTreeSet::new()));
        entry.0 = checked_sum(entry.0, record.labor_hours)?;
        entry.1.insert(record.worker_id.as_str());
    }

    by_date
        .into_iter()
        .map(|(date, (manpower, workers))| -> EngineResult<DailyManpower> {
            Ok(DailyManpower {
                date,
                total_manpower: manpower.normalize(),
                total_clock_hours: to_clock_hours(manpower, standard_day_hours)?,
                worker_count: workers.len(),
            })
        })
        .collect()
}
