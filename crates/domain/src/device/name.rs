//! Device name — a bounded, non-empty label.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Human-readable device name, at most [`DeviceName::MAX_LEN`] characters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DeviceName(String);

impl DeviceName {
    /// Maximum accepted length, counted in characters.
    pub const MAX_LEN: usize = 100;

    /// Validate and wrap a name.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyName`] for an empty string and
    /// [`ValidationError::NameTooLong`] past [`MAX_LEN`](Self::MAX_LEN).
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.is_empty() {
            return Err(ValidationError::EmptyName);
        }
        let actual = value.chars().count();
        if actual > Self::MAX_LEN {
            return Err(ValidationError::NameTooLong {
                actual,
                limit: Self::MAX_LEN,
            });
        }
        Ok(Self(value))
    }

    /// Borrow the underlying string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for DeviceName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for DeviceName {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<DeviceName> for String {
    fn from(name: DeviceName) -> Self {
        name.0
    }
}
