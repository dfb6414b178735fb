//! Calculation logic for site labor and payroll.
//!
//! This module contains the regular/overtime split, cost calculation, rate
//! resolution against dated rate tables, manpower aggregation, worker
//! payroll, and site allocation costing.

mod allocation_cost;
mod cost;
mod hours_split;
mod manpower;
mod payroll;
mod rate_lookup;

pub use allocation_cost::calculate_allocation_costs;
pub use cost::{
    CostCalculation, CostPolicy, DEFAULT_OVERTIME_MULTIPLIER, calculate_cost, round_money,
};
pub use hours_split::{DEFAULT_STANDARD_DAY_HOURS, HoursSplit, split_hours};
pub use manpower::{
    DailyManpower, ManpowerSummary, aggregate_daily, aggregate_manpower, aggregate_monthly,
};
pub use payroll::calculate_payroll;
pub use rate_lookup::{RateResolution, resolve_allocation_rate, resolve_worker_rate};
