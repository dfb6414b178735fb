//! Regular/overtime hours split.
//!
//! Splits the clock hours of a single work record or allocation into the
//! regular portion (up to the standard day) and the overtime portion.
//! The split is always applied per entry; hours are never pooled across a
//! period before splitting.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::AuditStep;

/// Clock hours in one standard workday and the daily overtime threshold.
pub const DEFAULT_STANDARD_DAY_HOURS: Decimal = Decimal::from_parts(8, 0, 0, false, 0);

/// The split of one entry's hours.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoursSplit {
    /// Hours up to the threshold.
    pub regular_hours: Decimal,
    /// Hours exceeding the threshold (can be zero).
    pub overtime_hours: Decimal,
    /// The audit step recording this split.
    pub audit_step: AuditStep,
}

/// Splits `worked_hours` at `threshold`.
///
/// `regular_hours = min(worked_hours, threshold)` and
/// `overtime_hours = max(0, worked_hours - threshold)`.
///
/// # Errors
///
/// `InvalidArgument` if `worked_hours` is negative or `threshold` is not positive.
///
/// # Examples
///
/// ```
/// use sitepay::calculation::{split_hours, DEFAULT_STANDARD_DAY_HOURS};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let split = split_hours(Decimal::from_str("10").unwrap(), DEFAULT_STANDARD_DAY_HOURS, 1).unwrap();
/// assert_eq!(split.regular_hours, Decimal::from_str("8").unwrap());
/// assert_eq!(split.overtime_hours, Decimal::from_str("2").unwrap());
/// ```
pub fn split_hours(
    worked_hours: Decimal,
    threshold: Decimal,
    step_number: u32,
) -> EngineResult<HoursSplit> {
    if worked_hours < Decimal::ZERO {
        return Err(EngineError::invalid_argument(
            "hours_worked",
            format!("must not be negative, got {}", worked_hours),
        ));
    }
    if threshold <= Decimal::ZERO {
        return Err(EngineError::invalid_argument(
            "standard_day_hours",
            format!("must be positive, got {}", threshold),
        ));
    }

    let regular_hours = worked_hours.min(threshold).normalize();
    let overtime_hours = if worked_hours > threshold {
        (worked_hours - threshold).normalize()
    } else {
        Decimal::ZERO
    };

    let reasoning = if overtime_hours > Decimal::ZERO {
        format!(
            "{} hours worked exceeds {} hour standard day by {} hours",
            worked_hours.normalize(),
            threshold.normalize(),
            overtime_hours
        )
    } else {
        format!(
            "{} hours worked is within the {} hour standard day, no overtime",
            worked_hours.normalize(),
            threshold.normalize()
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "overtime_split".to_string(),
        rule_name: "Regular/Overtime Split".to_string(),
        input: serde_json::json!({
            "hours_worked": worked_hours.normalize().to_string(),
            "threshold": threshold.normalize().to_string()
        }),
        output: serde_json::json!({
            "regular_hours": regular_hours.to_string(),
            "overtime_hours": overtime_hours.to_string()
        }),
        reasoning,
    };

    Ok(HoursSplit {
        regular_hours,
        overtime_hours,
        audit_step,
    })
}
