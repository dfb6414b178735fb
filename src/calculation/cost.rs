//! Pay and allocation cost calculation.
//!
//! Applies a [`RateProfile`] to the regular/overtime split of one work
//! record or allocation.
//!
//! ## Money policy
//!
//! All arithmetic is fixed-point [`Decimal`]. Each bucket's cost is exact
//! until it is rounded to the currency scale with midpoint-away-from-zero
//! rounding; `total_cost` is the sum of the two rounded buckets so a
//! breakdown always adds up.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::config::EngineSettings;
use crate::error::{EngineError, EngineResult};
use crate::models::{AuditStep, CostBreakdown, RateProfile};

use super::hours_split::{DEFAULT_STANDARD_DAY_HOURS, split_hours};

/// Multiplier applied to the hourly rate when no overtime rate is given.
pub const DEFAULT_OVERTIME_MULTIPLIER: Decimal = Decimal::from_parts(15, 0, 0, false, 1);

/// The knobs a cost calculation depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CostPolicy {
    /// Overtime threshold in clock hours.
    pub standard_day_hours: Decimal,
    /// Multiplier for derived overtime rates.
    pub overtime_multiplier: Decimal,
    /// Decimal places kept on money amounts.
    pub currency_scale: u32,
}

impl Default for CostPolicy {
    fn default() -> Self {
        Self {
            standard_day_hours: DEFAULT_STANDARD_DAY_HOURS,
            overtime_multiplier: DEFAULT_OVERTIME_MULTIPLIER,
            currency_scale: 0,
        }
    }
}

impl CostPolicy {
    /// Builds the policy from loaded engine settings.
    pub fn from_settings(settings: &EngineSettings) -> Self {
        Self {
            standard_day_hours: settings.standard_day_hours,
            overtime_multiplier: settings.overtime_multiplier,
            currency_scale: settings.currency.scale,
        }
    }
}

/// A cost breakdown together with the audit steps that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CostCalculation {
    /// The computed breakdown.
    pub breakdown: CostBreakdown,
    /// The split step followed by the costing step.
    pub audit_steps: Vec<AuditStep>,
}

/// Rounds a money amount to `scale` decimal places, midpoint away from zero.
///
/// ```
/// use sitepay::calculation::round_money;
/// use rust_decimal::Decimal;
///
/// assert_eq!(round_money(Decimal::new(12345, 1), 0), Decimal::new(1235, 0));
/// ```
pub fn round_money(amount: Decimal, scale: u32) -> Decimal {
    amount.round_dp_with_strategy(scale, RoundingStrategy::MidpointAwayFromZero)
}

/// Calculates the regular/overtime cost of one entry.
///
/// # Arguments
///
/// * `hours_worked` - Clock hours for one work record or allocation
/// * `rate` - Hourly rate and optional overtime rate
/// * `policy` - Threshold, multiplier and currency scale
/// * `step_number` - The first step number for audit trail sequencing
///
/// # Errors
///
/// `InvalidArgument` for negative hours or a non-positive rate;
/// `CalculationError` if an amount overflows.
///
/// # Examples
///
/// ```
/// use sitepay::calculation::{calculate_cost, CostPolicy};
/// use sitepay::models::RateProfile;
/// use rust_decimal::Decimal;
///
/// let result = calculate_cost(
///     Decimal::new(10, 0),
///     &RateProfile::new(Decimal::new(10000, 0)),
///     &CostPolicy::default(),
///     1,
/// )
/// .unwrap();
///
/// assert_eq!(result.breakdown.regular_hours, Decimal::new(8, 0));
/// assert_eq!(result.breakdown.overtime_hours, Decimal::new(2, 0));
/// assert_eq!(result.breakdown.overtime_rate, Decimal::new(15000, 0));
/// assert_eq!(result.breakdown.total_cost, Decimal::new(110000, 0));
/// ```
pub fn calculate_cost(
    hours_worked: Decimal,
    rate: &RateProfile,
    policy: &CostPolicy,
    step_number: u32,
) -> EngineResult<CostCalculation> {
    rate.validate()?;
    let split = split_hours(hours_worked, policy.standard_day_hours, step_number)?;

    let hourly_rate = rate.hourly_rate;
    let overtime_rate = rate
        .effective_overtime_rate(policy.overtime_multiplier)?
        .normalize();

    let regular_cost = round_money(
        split
            .regular_hours
            .checked_mul(hourly_rate)
            .ok_or_else(|| EngineError::overflow("regular_cost"))?,
        policy.currency_scale,
    );
    let overtime_cost = round_money(
        split
            .overtime_hours
            .checked_mul(overtime_rate)
            .ok_or_else(|| EngineError::overflow("overtime_cost"))?,
        policy.currency_scale,
    );
    let total_cost = regular_cost
        .checked_add(overtime_cost)
        .ok_or_else(|| EngineError::overflow("total_cost"))?;

    let breakdown = CostBreakdown {
        hours_worked: hours_worked.normalize(),
        regular_hours: split.regular_hours,
        overtime_hours: split.overtime_hours,
        hourly_rate,
        overtime_rate,
        regular_cost,
        overtime_cost,
        total_cost,
    };

    let rate_note = if rate.is_overtime_derived() {
        format!("derived {} x {}", hourly_rate, policy.overtime_multiplier.normalize())
    } else {
        "explicit".to_string()
    };
    let cost_step = AuditStep {
        step_number: step_number + 1,
        rule_id: "cost_calculation".to_string(),
        rule_name: "Regular/Overtime Cost".to_string(),
        input: serde_json::json!({
            "regular_hours": breakdown.regular_hours.to_string(),
            "overtime_hours": breakdown.overtime_hours.to_string(),
            "hourly_rate": hourly_rate.to_string(),
            "overtime_rate": overtime_rate.to_string(),
            "currency_scale": policy.currency_scale
        }),
        output: serde_json::json!({
            "regular_cost": regular_cost.to_string(),
            "overtime_cost": overtime_cost.to_string(),
            "total_cost": total_cost.to_string()
        }),
        reasoning: format!(
            "{}h x {} + {}h x {} ({}) = {}",
            breakdown.regular_hours,
            hourly_rate,
            breakdown.overtime_hours,
            overtime_rate,
            rate_note,
            total_cost
        ),
    };

    Ok(CostCalculation {
        breakdown,
        audit_steps: vec![split.audit_step, cost_step],
    })
}
