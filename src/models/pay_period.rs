//! Pay period model.
//!
//! This module contains the [`PayPeriod`] type used to bound payroll and
//! manpower aggregation.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// An inclusive date range for payroll and manpower aggregation.
///
/// # Example
///
/// ```
/// use sitepay::models::PayPeriod;
/// use chrono::NaiveDate;
///
/// let period = PayPeriod::for_month(2026, 2).unwrap();
/// assert_eq!(period.end_date, NaiveDate::from_ymd_opt(2026, 2, 28).unwrap());
/// assert!(period.contains_date(NaiveDate::from_ymd_opt(2026, 2, 14).unwrap()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayPeriod {
    /// The start date of the pay period (inclusive).
    pub start_date: NaiveDate,
    /// The end date of the pay period (inclusive).
    pub end_date: NaiveDate,
}

impl PayPeriod {
    /// Creates a validated pay period.
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> EngineResult<Self> {
        let period = Self {
            start_date,
            end_date,
        };
        period.validate()?;
        Ok(period)
    }

    /// Returns the calendar month `year`-`month` as a pay period.
    pub fn for_month(year: i32, month: u32) -> EngineResult<Self> {
        let start_date = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| {
            EngineError::invalid_argument("month", format!("{}-{} is not a valid month", year, month))
        })?;
        let next_month_start = if month == 12 {
            NaiveDate::from_ymd_opt(year + 1, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(year, month + 1, 1)
        };
        let end_date = next_month_start
            .and_then(|d| d.pred_opt())
            .ok_or_else(|| {
                EngineError::invalid_argument("month", format!("{}-{} is out of range", year, month))
            })?;
        Ok(Self {
            start_date,
            end_date,
        })
    }

    /// Rejects periods whose end precedes their start.
    pub fn validate(&self) -> EngineResult<()> {
        if self.end_date < self.start_date {
            return Err(EngineError::invalid_argument(
                "pay_period",
                format!(
                    "end_date {} is before start_date {}",
                    self.end_date, self.start_date
                ),
            ));
        }
        Ok(())
    }

    /// Checks if a given date falls within this pay period, inclusive of both ends.
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }
}
