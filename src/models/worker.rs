//! Worker model.

use serde::{Deserialize, Serialize};

use super::RateProfile;

/// A site worker whose work records are costed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Worker {
    /// Unique identifier for the worker.
    pub id: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// The trade code used for rate table lookup (e.g., "formwork_carpenter").
    pub trade_code: String,
    /// Optional rate override; when set, rate tables are not consulted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rate: Option<RateProfile>,
}
