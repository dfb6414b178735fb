//! Site allocation costing.
//!
//! Prices a batch of worker and equipment allocations and totals the cost
//! by resource type.

use std::time::Instant;

use chrono::Utc;
use rust_decimal::Decimal;
use tracing::debug;
use uuid::Uuid;

use crate::config::EngineConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    AllocationCostLine, AllocationCostResult, AllocationTotals, AuditTrace, AuditWarning,
    ResourceAllocation, ResourceType,
};

use super::cost::{CostPolicy, calculate_cost};
use super::rate_lookup::resolve_allocation_rate;

const HOURS_IN_DAY: Decimal = Decimal::from_parts(24, 0, 0, false, 0);

/// Costs each allocation and totals the batch.
///
/// Lines keep the request order. Each allocation is split and priced on
/// its own, at the rate in force on its date unless it carries a rate.
///
/// # Errors
///
/// - `InvalidArgument` for negative hours or a non-positive rate
/// - `TradeNotFound` / `EquipmentNotFound` / `RateNotFound` when no rate applies
/// - `CalculationError` on decimal overflow
pub fn calculate_allocation_costs(
    allocations: &[ResourceAllocation],
    config: &EngineConfig,
) -> EngineResult<AllocationCostResult> {
    let start_time = Instant::now();
    let settings = config.settings();
    let policy = CostPolicy::from_settings(settings);

    let mut steps = Vec::new();
    let mut warnings = Vec::new();
    let mut step_number: u32 = 1;
    let mut lines = Vec::with_capacity(allocations.len());

    let mut worker_cost = Decimal::ZERO;
    let mut equipment_cost = Decimal::ZERO;
    let mut regular_hours = Decimal::ZERO;
    let mut overtime_hours = Decimal::ZERO;

    for allocation in allocations {
        if allocation.hours_worked > HOURS_IN_DAY {
            warnings.push(AuditWarning::new(
                "HOURS_EXCEED_DAY",
                format!(
                    "Allocation '{}' books {} hours on {}",
                    allocation.id,
                    allocation.hours_worked.normalize(),
                    allocation.date
                ),
                "medium",
            ));
        }

        let resolution = resolve_allocation_rate(
            allocation.resource_type,
            &allocation.resource_code,
            allocation.rate.as_ref(),
            allocation.date,
            config,
            step_number,
        )?;
        steps.push(resolution.audit_step);
        step_number += 1;

        let costed = calculate_cost(
            allocation.hours_worked,
            &resolution.rate,
            &policy,
            step_number,
        )?;
        step_number += costed.audit_steps.len() as u32;
        steps.extend(costed.audit_steps);
        let cost = costed.breakdown;

        let bucket = match allocation.resource_type {
            ResourceType::Worker => &mut worker_cost,
            ResourceType::Equipment => &mut equipment_cost,
        };
        *bucket = bucket
            .checked_add(cost.total_cost)
            .ok_or_else(|| EngineError::overflow("allocation_cost"))?;
        regular_hours = regular_hours
            .checked_add(cost.regular_hours)
            .ok_or_else(|| EngineError::overflow("regular_hours"))?;
        overtime_hours = overtime_hours
            .checked_add(cost.overtime_hours)
            .ok_or_else(|| EngineError::overflow("overtime_hours"))?;

        lines.push(AllocationCostLine {
            allocation_id: allocation.id.clone(),
            resource_type: allocation.resource_type,
            resource_code: allocation.resource_code.clone(),
            site_id: allocation.site_id.clone(),
            date: allocation.date,
            rate_source: resolution.source,
            rate_effective_date: resolution.rate_effective_date,
            cost,
        });
    }

    let total_cost = worker_cost
        .checked_add(equipment_cost)
        .ok_or_else(|| EngineError::overflow("total_cost"))?;

    let duration_us = start_time.elapsed().as_micros() as u64;
    debug!(
        allocations = lines.len(),
        total_cost = %total_cost,
        duration_us,
        "Allocation costs calculated"
    );

    Ok(AllocationCostResult {
        calculation_id: Uuid::new_v4(),
        timestamp: Utc::now(),
        engine_version: env!("CARGO_PKG_VERSION").to_string(),
        currency: settings.currency.code.clone(),
        lines,
        totals: AllocationTotals {
            worker_cost,
            equipment_cost,
            regular_hours: regular_hours.normalize(),
            overtime_hours: overtime_hours.normalize(),
            total_cost,
        },
        audit_trace: AuditTrace {
            steps,
            warnings,
            duration_us,
        },
    })
}
