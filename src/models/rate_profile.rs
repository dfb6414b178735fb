//! Rate profile model.
//!
//! A [`RateProfile`] carries the hourly and overtime rates attached to a
//! worker or to a resource allocation request.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Hourly and overtime pay rates.
///
/// When `overtime_rate` is absent the overtime rate is derived from the
/// hourly rate and the configured overtime multiplier (1.5 by default).
///
/// # Example
///
/// ```
/// use sitepay::models::RateProfile;
/// use rust_decimal::Decimal;
///
/// let profile = RateProfile::new(Decimal::new(10000, 0));
/// let overtime = profile.effective_overtime_rate(Decimal::new(15, 1)).unwrap();
/// assert_eq!(overtime, Decimal::new(15000, 0));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateProfile {
    /// The rate paid per regular hour.
    pub hourly_rate: Decimal,
    /// Explicit rate paid per overtime hour.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overtime_rate: Option<Decimal>,
}

impl RateProfile {
    /// Creates a profile with a derived overtime rate.
    pub fn new(hourly_rate: Decimal) -> Self {
        Self {
            hourly_rate,
            overtime_rate: None,
        }
    }

    /// Sets an explicit overtime rate.
    pub fn with_overtime_rate(mut self, overtime_rate: Decimal) -> Self {
        self.overtime_rate = Some(overtime_rate);
        self
    }

    /// Checks that the hourly rate and any explicit overtime rate are positive.
    pub fn validate(&self) -> EngineResult<()> {
        if self.hourly_rate <= Decimal::ZERO {
            return Err(EngineError::invalid_argument(
                "hourly_rate",
                format!("must be positive, got {}", self.hourly_rate),
            ));
        }
        if let Some(rate) = self.overtime_rate {
            if rate <= Decimal::ZERO {
                return Err(EngineError::invalid_argument(
                    "overtime_rate",
                    format!("must be positive, got {}", rate),
                ));
            }
        }
        Ok(())
    }

    /// Returns the overtime rate, deriving it from `multiplier` when not set.
    pub fn effective_overtime_rate(&self, multiplier: Decimal) -> EngineResult<Decimal> {
        match self.overtime_rate {
            Some(rate) => Ok(rate),
            None => self
                .hourly_rate
                .checked_mul(multiplier)
                .ok_or_else(|| EngineError::overflow("overtime_rate")),
        }
    }

    /// Returns true when the overtime rate is derived rather than explicit.
    pub fn is_overtime_derived(&self) -> bool {
        self.overtime_rate.is_none()
    }
}
