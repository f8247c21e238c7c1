//! Storage-specific error type wrapping driver errors.

use devkeep_domain::error::DevKeepError;

/// Errors originating from the MongoDB storage layer.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// A connection attempt or an operation failed in the driver.
    #[error("MongoDB driver error")]
    Driver(#[from] mongodb::error::Error),
}

impl From<StorageError> for DevKeepError {
    fn from(err: StorageError) -> Self {
        Self::Storage(Box::new(err))
    }
}
