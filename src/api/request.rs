//! Request types for the site labor cost API.
//!
//! This module defines the JSON request structures for the `/cost`,
//! `/payroll`, `/allocations/cost` and `/manpower` endpoints.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::EngineResult;
use crate::models::{PayPeriod, RateProfile, ResourceAllocation, WorkRecord, Worker};

/// Request body for the `/cost` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CostRequest {
    /// Clock hours for one work record or allocation.
    pub hours_worked: Decimal,
    /// Rate per regular hour.
    pub hourly_rate: Decimal,
    /// Rate per overtime hour; derived from `hourly_rate` when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overtime_rate: Option<Decimal>,
}

impl CostRequest {
    /// Returns the rate profile described by the request.
    pub fn rate_profile(&self) -> RateProfile {
        RateProfile {
            hourly_rate: self.hourly_rate,
            overtime_rate: self.overtime_rate,
        }
    }
}

/// Request body for the `/payroll` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayrollRequest {
    /// The worker being paid.
    pub worker: Worker,
    /// The pay period for the calculation.
    pub pay_period: PayPeriodRequest,
    /// The worker's daily work records.
    #[serde(default)]
    pub records: Vec<WorkRecordRequest>,
}

/// Pay period in a payroll request, either as a date range or a calendar month.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PayPeriodRequest {
    /// Inclusive date range.
    Range {
        /// The start date of the pay period (inclusive).
        start_date: NaiveDate,
        /// The end date of the pay period (inclusive).
        end_date: NaiveDate,
    },
    /// A whole calendar month.
    Month {
        /// Calendar year.
        year: i32,
        /// Month, 1-12.
        month: u32,
    },
}

impl PayPeriodRequest {
    /// Converts to a validated [`PayPeriod`].
    pub fn into_period(self) -> EngineResult<PayPeriod> {
        match self {
            PayPeriodRequest::Range {
                start_date,
                end_date,
            } => PayPeriod::new(start_date, end_date),
            PayPeriodRequest::Month { year, month } => PayPeriod::for_month(year, month),
        }
    }
}

/// Work record information in a payroll request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkRecordRequest {
    /// Unique identifier for the record.
    pub id: String,
    /// The worker; defaults to the request's worker when omitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub worker_id: Option<String>,
    /// The site worked at.
    pub site_id: String,
    /// The date worked.
    pub work_date: NaiveDate,
    /// Manpower in day units (1.0 = one standard day).
    pub labor_hours: Decimal,
}

impl WorkRecordRequest {
    /// Converts to a [`WorkRecord`], filling in `default_worker_id` if needed.
    pub fn into_record(self, default_worker_id: &str) -> WorkRecord {
        WorkRecord {
            id: self.id,
            worker_id: self
                .worker_id
                .unwrap_or_else(|| default_worker_id.to_string()),
            site_id: self.site_id,
            work_date: self.work_date,
            labor_hours: self.labor_hours,
        }
    }
}

/// Request body for the `/allocations/cost` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AllocationCostRequest {
    /// Worker and equipment allocations to cost.
    pub allocations: Vec<ResourceAllocation>,
}

/// Request body for the `/manpower` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManpowerRequest {
    /// The period to aggregate over.
    pub pay_period: PayPeriodRequest,
    /// Worker to summarise; only the daily roll-up is returned when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub worker_id: Option<String>,
    /// Work records from any number of workers.
    #[serde(default)]
    pub records: Vec<WorkRecord>,
}
