//! Work record model.
//!
//! A [`WorkRecord`] is one day's logged work for one worker at one site,
//! expressed in manpower units where 1.0 is one standard workday.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// A single day's logged work for one worker at one site.
///
/// Records are immutable once submitted by a worker or site manager.
///
/// # Example
///
/// ```
/// use sitepay::models::WorkRecord;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let record = WorkRecord {
///     id: "wr_001".to_string(),
///     worker_id: "wk_001".to_string(),
///     site_id: "site_a".to_string(),
///     work_date: NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
///     labor_hours: Decimal::new(125, 2),
/// };
/// assert_eq!(record.clock_hours(Decimal::new(8, 0)).unwrap(), Decimal::new(10, 0));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkRecord {
    /// Unique identifier for the record.
    pub id: String,
    /// The worker who performed the work.
    pub worker_id: String,
    /// The site the work was performed at.
    pub site_id: String,
    /// The calendar date of the work.
    pub work_date: NaiveDate,
    /// Manpower in day units (1.0 = one standard workday).
    pub labor_hours: Decimal,
}

impl WorkRecord {
    /// Rejects records with negative manpower.
    pub fn validate(&self) -> EngineResult<()> {
        if self.labor_hours < Decimal::ZERO {
            return Err(EngineError::InvalidRecord {
                record_id: self.id.clone(),
                message: format!("labor_hours must not be negative, got {}", self.labor_hours),
            });
        }
        Ok(())
    }

    /// Converts the manpower units to clock hours.
    pub fn clock_hours(&self, standard_day_hours: Decimal) -> EngineResult<Decimal> {
        self.labor_hours
            .checked_mul(standard_day_hours)
            .ok_or_else(|| EngineError::overflow("clock_hours"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn record(labor_hours: &str) -> WorkRecord {
        WorkRecord {
            id: "wr_001".to_string(),
            worker_id: "wk_001".to_string(),
            site_id: "site_a".to_string(),
            work_date: NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
            labor_hours: dec(labor_hours),
        }
    }

    #[test]
    fn test_one_day_is_eight_hours() {
        assert_eq!(record("1.0").clock_hours(dec("8")).unwrap(), dec("8"));
    }

    #[test]
    fn test_half_day_is_four_hours() {
        assert_eq!(record("0.5").clock_hours(dec("8")).unwrap(), dec("4"));
    }

    #[test]
    fn test_validate_accepts_zero() {
        assert!(record("0").validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_negative() {
        match record("-0.5").validate() {
            Err(EngineError::InvalidRecord { record_id, message }) => {
                assert_eq!(record_id, "wr_001");
                assert!(message.contains("-0.5"));
            }
            other => panic!("Expected InvalidRecord, got {:?}", other),
        }
    }

    #[test]
    fn test_deserialize_numeric_labor_hours() {
        let json = r#"{
            "id": "wr_002",
            "worker_id": "wk_001",
            "site_id": "site_a",
            "work_date": "2026-03-03",
            "labor_hours": 1.5
        }"#;
        let record: WorkRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.labor_hours, dec("1.5"));
        assert_eq!(record.work_date, NaiveDate::from_ymd_opt(2026, 3, 3).unwrap());
    }
}
