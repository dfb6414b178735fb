//! Resource allocation model.
//!
//! Allocations assign a worker or a piece of equipment to a site for a
//! number of clock hours on a given date.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::RateProfile;

/// The kind of resource an allocation covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceType {
    /// A worker, costed by trade.
    Worker,
    /// A piece of equipment, costed by equipment class.
    Equipment,
}

/// A worker or equipment allocation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceAllocation {
    /// Unique identifier for the allocation.
    pub id: String,
    /// Whether this is a worker or equipment allocation.
    pub resource_type: ResourceType,
    /// Trade code for workers, equipment class code for equipment.
    pub resource_code: String,
    /// The site the resource is allocated to.
    pub site_id: String,
    /// The date of the allocation.
    pub date: NaiveDate,
    /// Clock hours allocated.
    pub hours_worked: Decimal,
    /// Optional rate; when absent the configured rate tables are used.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rate: Option<RateProfile>,
}
