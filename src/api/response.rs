//! Response types for the site labor cost API.
//!
//! This module defines the manpower report body, the error response
//! structures and the mapping from engine errors to HTTP status codes.

use axum::{
    Json,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::calculation::{DailyManpower, ManpowerSummary};
use crate::error::EngineError;
use crate::models::PayPeriod;

/// Response body for the `/manpower` endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManpowerReport {
    /// The period aggregated.
    pub pay_period: PayPeriod,
    /// Totals for the requested worker, if one was named.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<ManpowerSummary>,
    /// Per-date roll-up across all workers.
    pub daily: Vec<DailyManpower>,
}

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
#[derive(Debug)]
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// A 400 response carrying `error`.
    pub fn bad_request(error: ApiError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error,
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (
            self.status,
            [(header::CONTENT_TYPE, "application/json")],
            Json(self.error),
        )
            .into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let message = error.to_string();
        match error {
            EngineError::ConfigNotFound { path } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration error",
                    format!("Configuration file not found: {}", path),
                ),
            },
            EngineError::ConfigParseError { path, message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration parse error",
                    format!("Failed to parse {}: {}", path, message),
                ),
            },
            EngineError::TradeNotFound { code } => ApiErrorResponse::bad_request(
                ApiError::with_details(
                    "TRADE_NOT_FOUND",
                    message,
                    format!("The trade code '{}' is not in the trade catalogue", code),
                ),
            ),
            EngineError::EquipmentNotFound { code } => ApiErrorResponse::bad_request(
                ApiError::with_details(
                    "EQUIPMENT_NOT_FOUND",
                    message,
                    format!("No rate table prices the equipment class '{}'", code),
                ),
            ),
            EngineError::RateNotFound { .. } => ApiErrorResponse::bad_request(
                ApiError::with_details(
                    "RATE_NOT_FOUND",
                    message,
                    "No rate table in force on that date prices this code",
                ),
            ),
            EngineError::InvalidArgument { .. } => {
                ApiErrorResponse::bad_request(ApiError::new("INVALID_ARGUMENT", message))
            }
            EngineError::InvalidRecord { .. } => ApiErrorResponse::bad_request(
                ApiError::with_details(
                    "INVALID_RECORD",
                    message,
                    "The work record data contains invalid information",
                ),
            ),
            EngineError::CalculationError { message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details("CALCULATION_ERROR", "Calculation failed", message),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_api_error_serialization() {
        let error = ApiError::new("TEST_ERROR", "Test message");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"code\":\"TEST_ERROR\""));
        assert!(json.contains("\"message\":\"Test message\""));
        assert!(!json.contains("details"));
    }

    #[test]
    fn test_api_error_with_details_serialization() {
        let error = ApiError::with_details("TEST_ERROR", "Test message", "Some details");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"details\":\"Some details\""));
    }

    #[test]
    fn test_trade_not_found_maps_to_400() {
        let api_error: ApiErrorResponse = EngineError::TradeNotFound {
            code: "stonemason".to_string(),
        }
        .into();
        assert_eq!(api_error.status, StatusCode::BAD_REQUEST);
        assert_eq!(api_error.error.code, "TRADE_NOT_FOUND");
        assert!(api_error.error.message.contains("stonemason"));
    }

    #[test]
    fn test_rate_not_found_maps_to_400() {
        let api_error: ApiErrorResponse = EngineError::RateNotFound {
            code: "welder".to_string(),
            date: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
        }
        .into();
        assert_eq!(api_error.status, StatusCode::BAD_REQUEST);
        assert_eq!(api_error.error.code, "RATE_NOT_FOUND");
    }

    #[test]
    fn test_invalid_argument_maps_to_400() {
        let api_error: ApiErrorResponse =
            EngineError::invalid_argument("hours_worked", "must not be negative").into();
        assert_eq!(api_error.status, StatusCode::BAD_REQUEST);
        assert_eq!(api_error.error.code, "INVALID_ARGUMENT");
        assert!(api_error.error.message.contains("hours_worked"));
    }

    #[test]
    fn test_calculation_error_maps_to_500() {
        let api_error: ApiErrorResponse = EngineError::overflow("total_cost").into();
        assert_eq!(api_error.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(api_error.error.code, "CALCULATION_ERROR");
    }
}
