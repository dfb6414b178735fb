//! HTTP API module for the site labor cost engine.
//!
//! This module provides the REST endpoints for single-entry costing,
//! worker payroll, site allocation costing and manpower roll-ups.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    AllocationCostRequest, CostRequest, ManpowerRequest, PayPeriodRequest, PayrollRequest,
    WorkRecordRequest,
};
pub use response::{ApiError, ApiErrorResponse, ManpowerReport};
pub use state::AppState;
