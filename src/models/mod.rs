//! Core data models for the site labor cost engine.
//!
//! This module contains all the domain models used throughout the engine.

mod allocation;
mod calculation_result;
mod pay_period;
mod rate_profile;
mod work_record;
mod worker;

pub use allocation::{ResourceAllocation, ResourceType};
pub use calculation_result::{
    AllocationCostLine, AllocationCostResult, AllocationTotals, AuditStep, AuditTrace,
    AuditWarning, CostBreakdown, PayLine, PayrollResult, PayrollTotals, RateSource,
};
pub use pay_period::PayPeriod;
pub use rate_profile::RateProfile;
pub use work_record::WorkRecord;
pub use worker::Worker;
