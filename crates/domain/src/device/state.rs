//! Device state — the closed lifecycle enumeration.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Lifecycle state of a device.
///
/// Any state may transition to any other; the only rules attached to the
/// state live on the entity: while [`InUse`](Self::InUse) a device refuses
/// name/brand changes and cannot be deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DeviceState {
    Available,
    InUse,
    Inactive,
}

impl DeviceState {
    /// Whether the device is currently in use.
    #[must_use]
    pub fn is_in_use(self) -> bool {
        matches!(self, Self::InUse)
    }
}

impl std::fmt::Display for DeviceState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Available => f.write_str("available"),
            Self::InUse => f.write_str("in-use"),
            Self::Inactive => f.write_str("inactive"),
        }
    }
}

impl std::str::FromStr for DeviceState {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "available" => Ok(Self::Available),
            "in-use" => Ok(Self::InUse),
            "inactive" => Ok(Self::Inactive),
            other => Err(ValidationError::UnknownState {
                value: other.to_string(),
            }),
        }
    }
}
