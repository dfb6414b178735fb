//! Labor-hour and payroll engine for construction sites
//!
//! This crate aggregates daily manpower records, splits worked hours into
//! regular and overtime portions, and prices worker and equipment time
//! against dated rate tables, with an audit trace for every figure.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
