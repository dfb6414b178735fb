//! Calculation result models for the site labor cost engine.
//!
//! This module contains the [`CostBreakdown`] produced for every work record
//! or allocation, and the [`PayrollResult`] and [`AllocationCostResult`]
//! types that roll those breakdowns up together with an audit trace.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{PayPeriod, ResourceType};

/// The regular/overtime split of one entry and the cost of each bucket.
///
/// # Example
///
/// ```
/// use sitepay::models::CostBreakdown;
/// use rust_decimal::Decimal;
///
/// let breakdown = CostBreakdown {
///     hours_worked: Decimal::new(10, 0),
///     regular_hours: Decimal::new(8, 0),
///     overtime_hours: Decimal::new(2, 0),
///     hourly_rate: Decimal::new(10000, 0),
///     overtime_rate: Decimal::new(15000, 0),
///     regular_cost: Decimal::new(80000, 0),
///     overtime_cost: Decimal::new(30000, 0),
///     total_cost: Decimal::new(110000, 0),
/// };
/// assert!(breakdown.has_overtime());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostBreakdown {
    /// Clock hours that were split.
    pub hours_worked: Decimal,
    /// Hours up to the standard day.
    pub regular_hours: Decimal,
    /// Hours beyond the standard day.
    pub overtime_hours: Decimal,
    /// Rate applied to regular hours.
    pub hourly_rate: Decimal,
    /// Rate applied to overtime hours (explicit or derived).
    pub overtime_rate: Decimal,
    /// `regular_hours * hourly_rate`, rounded to the currency scale.
    pub regular_cost: Decimal,
    /// `overtime_hours * overtime_rate`, rounded to the currency scale.
    pub overtime_cost: Decimal,
    /// `regular_cost + overtime_cost`.
    pub total_cost: Decimal,
}

impl CostBreakdown {
    /// Returns true if any overtime hours were recorded.
    pub fn has_overtime(&self) -> bool {
        self.overtime_hours > Decimal::ZERO
    }
}

/// Where the rate applied to an entry came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RateSource {
    /// Supplied with the worker or allocation.
    Override,
    /// Looked up from a dated rate table.
    RateTable,
}

/// One costed work record in a payroll result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayLine {
    /// The work record this line costs.
    pub record_id: String,
    /// The site the work was performed at.
    pub site_id: String,
    /// The date of the work.
    pub work_date: NaiveDate,
    /// Manpower in day units.
    pub manpower: Decimal,
    /// Where the rate came from.
    pub rate_source: RateSource,
    /// Effective date of the rate table used; absent for overrides.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rate_effective_date: Option<NaiveDate>,
    /// The regular/overtime split and cost.
    pub cost: CostBreakdown,
}

/// Aggregated totals for a payroll calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollTotals {
    /// Total manpower in day units.
    pub manpower: Decimal,
    /// Total regular hours.
    pub regular_hours: Decimal,
    /// Total overtime hours.
    pub overtime_hours: Decimal,
    /// Sum of regular costs.
    pub regular_cost: Decimal,
    /// Sum of overtime costs.
    pub overtime_cost: Decimal,
    /// Sum of all pay lines.
    pub gross_pay: Decimal,
}

impl PayrollTotals {
    /// Totals with every field zero.
    pub fn zero() -> Self {
        Self {
            manpower: Decimal::ZERO,
            regular_hours: Decimal::ZERO,
            overtime_hours: Decimal::ZERO,
            regular_cost: Decimal::ZERO,
            overtime_cost: Decimal::ZERO,
            gross_pay: Decimal::ZERO,
        }
    }
}

/// A single step in the audit trace recording a calculation decision.
///
/// Each step captures the input, output, and reasoning for a rule application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A warning generated during calculation.
///
/// Warnings indicate potential issues that don't prevent calculation
/// but may require attention.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level (e.g., "low", "medium", "high").
    pub severity: String,
}

impl AuditWarning {
    /// Creates a warning.
    pub fn new(
        code: impl Into<String>,
        message: impl Into<String>,
        severity: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            severity: severity.into(),
        }
    }
}

/// The complete audit trace for a calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of calculation steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during calculation.
    pub warnings: Vec<AuditWarning>,
    /// The total calculation duration in microseconds.
    pub duration_us: u64,
}

/// The complete result of a worker's payroll for a pay period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollResult {
    /// Unique identifier for this calculation.
    pub calculation_id: Uuid,
    /// When the calculation was performed.
    pub timestamp: DateTime<Utc>,
    /// The version of the engine that performed the calculation.
    pub engine_version: String,
    /// The worker the payroll is for.
    pub worker_id: String,
    /// The pay period covered.
    pub pay_period: PayPeriod,
    /// ISO currency code of every amount.
    pub currency: String,
    /// One line per costed work record, ordered by date.
    pub pay_lines: Vec<PayLine>,
    /// Aggregated totals.
    pub totals: PayrollTotals,
    /// Complete audit trace of calculation decisions.
    pub audit_trace: AuditTrace,
}

/// One costed allocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationCostLine {
    /// The allocation this line costs.
    pub allocation_id: String,
    /// Worker or equipment.
    pub resource_type: ResourceType,
    /// Trade or equipment class code.
    pub resource_code: String,
    /// The site the resource was allocated to.
    pub site_id: String,
    /// The date of the allocation.
    pub date: NaiveDate,
    /// Where the rate came from.
    pub rate_source: RateSource,
    /// Effective date of the rate table used; absent for overrides.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rate_effective_date: Option<NaiveDate>,
    /// The regular/overtime split and cost.
    pub cost: CostBreakdown,
}

/// Totals across a batch of allocations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationTotals {
    /// Total cost of worker allocations.
    pub worker_cost: Decimal,
    /// Total cost of equipment allocations.
    pub equipment_cost: Decimal,
    /// Total regular hours across all allocations.
    pub regular_hours: Decimal,
    /// Total overtime hours across all allocations.
    pub overtime_hours: Decimal,
    /// `worker_cost + equipment_cost`.
    pub total_cost: Decimal,
}

/// The result of costing a batch of resource allocations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationCostResult {
    /// Unique identifier for this calculation.
    pub calculation_id: Uuid,
    /// When the calculation was performed.
    pub timestamp: DateTime<Utc>,
    /// The version of the engine that performed the calculation.
    pub engine_version: String,
    /// ISO currency code of every amount.
    pub currency: String,
    /// One line per allocation, in request order.
    pub lines: Vec<AllocationCostLine>,
    /// Aggregated totals.
    pub totals: AllocationTotals,
    /// Complete audit trace of calculation decisions.
    pub audit_trace: AuditTrace,
}
