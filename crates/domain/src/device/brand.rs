//! Device brand — a bounded, non-empty manufacturer label.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Device brand, at most [`DeviceBrand::MAX_LEN`] characters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DeviceBrand(String);

impl DeviceBrand {
    /// Maximum accepted length, counted in characters.
    pub const MAX_LEN: usize = 50;

    /// Validate and wrap a brand.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyBrand`] for an empty string and
    /// [`ValidationError::BrandTooLong`] past [`MAX_LEN`](Self::MAX_LEN).
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.is_empty() {
            return Err(ValidationError::EmptyBrand);
        }
        let actual = value.chars().count();
        if actual > Self::MAX_LEN {
            return Err(ValidationError::BrandTooLong {
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

impl std::fmt::Display for DeviceBrand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for DeviceBrand {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<DeviceBrand> for String {
    fn from(brand: DeviceBrand) -> Self {
        brand.0
    }
}
