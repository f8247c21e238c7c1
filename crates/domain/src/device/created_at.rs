//! Device creation timestamp — assigned once, rendered as RFC 3339.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::time::{self, Timestamp};

/// Moment a device entered the catalog. Never mutated after construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CreatedAt(Timestamp);

impl CreatedAt {
    /// Capture the current instant.
    #[must_use]
    pub fn now() -> Self {
        Self(time::now())
    }

    /// Parse a stored RFC 3339 rendering.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidTimestamp`] when the string is not
    /// a valid RFC 3339 timestamp.
    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        chrono::DateTime::parse_from_rfc3339(value)
            .map(|dt| Self(dt.with_timezone(&chrono::Utc)))
            .map_err(|_| ValidationError::InvalidTimestamp {
                value: value.to_string(),
            })
    }

    /// Access the underlying timestamp.
    #[must_use]
    pub fn as_timestamp(self) -> Timestamp {
        self.0
    }
}

impl std::fmt::Display for CreatedAt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0.to_rfc3339())
    }
}

impl TryFrom<String> for CreatedAt {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<CreatedAt> for String {
    fn from(created_at: CreatedAt) -> Self {
        created_at.to_string()
    }
}
