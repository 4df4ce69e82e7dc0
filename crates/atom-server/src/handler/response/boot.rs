//! Boot-status response types.

use atom_core::ProbeStatus;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Outcome of one boot module check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum BootCheck {
    /// The module is registered and up.
    Ok,
    /// The module is down or not registered.
    Error,
}

/// Boot module status response.
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct BootModuleStatus {
    pub status: BootCheck,
}

impl BootModuleStatus {
    pub fn ok() -> Self {
        Self {
            status: BootCheck::Ok,
        }
    }

    pub fn error() -> Self {
        Self {
            status: BootCheck::Error,
        }
    }
}

impl From<ProbeStatus> for BootModuleStatus {
    fn from(status: ProbeStatus) -> Self {
        if status.is_up() { Self::ok() } else { Self::error() }
    }
}
