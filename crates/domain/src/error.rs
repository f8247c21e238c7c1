//! Error taxonomy shared across the workspace.
//!
//! Three kinds of failure flow through devkeep: domain validation (always
//! detectable before any IO), missing records, and storage-layer failures
//! propagated from a driver. The transport layer maps each arm to a
//! response code; nothing in this workspace retries any of them.

/// Top-level error for all devkeep operations.
#[derive(Debug, thiserror::Error)]
pub enum DevKeepError {
    /// A value-object rule or a lifecycle guard was violated.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The referenced record does not exist.
    #[error(transparent)]
    NotFound(#[from] NotFoundError),

    /// The backing store could not complete the operation.
    #[error("storage error")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl DevKeepError {
    /// Wrap a driver-level failure.
    pub fn storage(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Storage(Box::new(err))
    }
}

/// A record lookup that matched nothing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{entity} with id {id} doesn't exist")]
pub struct NotFoundError {
    /// Entity kind, e.g. `"Device"`.
    pub entity: &'static str,
    /// The identifier that was looked up.
    pub id: String,
}

impl NotFoundError {
    #[must_use]
    pub fn device(id: impl Into<String>) -> Self {
        Self {
            entity: "Device",
            id: id.into(),
        }
    }
}

/// A domain rule violation.
///
/// Each variant carries the context a caller needs to report the failure
/// without re-inspecting the input. Validation passes that check several
/// fields at once gather everything into [`Multiple`](Self::Multiple)
/// instead of stopping at the first offender.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// A mandatory device field was not provided.
    #[error("missing mandatory device field: {field}")]
    MissingField { field: &'static str },

    /// A device id reconstructed from storage must be a non-empty token.
    #[error("device id must not be empty")]
    EmptyId,

    /// Device names must carry at least one character.
    #[error("device name must not be empty")]
    EmptyName,

    /// Device brands must carry at least one character.
    #[error("device brand must not be empty")]
    EmptyBrand,

    /// Device name exceeded its length bound.
    #[error("device name must be at most {limit} characters, got {actual}")]
    NameTooLong { actual: usize, limit: usize },

    /// Device brand exceeded its length bound.
    #[error("device brand must be at most {limit} characters, got {actual}")]
    BrandTooLong { actual: usize, limit: usize },

    /// The state token is outside the closed enumeration.
    #[error("state {value:?} is not valid, expected available, in-use or inactive")]
    UnknownState { value: String },

    /// The creation timestamp could not be parsed as RFC 3339.
    #[error("createdAt {value:?} is not a valid RFC 3339 timestamp")]
    InvalidTimestamp { value: String },

    /// Name and brand are frozen while the device is in use.
    #[error("the device is in use, name and brand updates are disabled")]
    UpdateWhileInUse,

    /// In-use devices cannot be removed.
    #[error("this device cannot be deleted as it is in use")]
    DeleteWhileInUse,

    /// A save targeted an identifier that already exists.
    #[error("a device with id {id} already exists")]
    DuplicateId { id: String },

    /// Several independent field rules failed in the same pass.
    #[error("{}", join_messages(.0))]
    Multiple(Vec<ValidationError>),
}

impl ValidationError {
    /// Fold a batch of field errors into a single error, if any.
    ///
    /// Returns `None` for an empty batch, the error itself for a single
    /// failure, and [`Multiple`](Self::Multiple) otherwise.
    #[must_use]
    pub fn collect(mut errors: Vec<ValidationError>) -> Option<ValidationError> {
        match errors.len() {
            0 => None,
            1 => errors.pop(),
            _ => Some(ValidationError::Multiple(errors)),
        }
    }
}

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_collect_nothing_from_empty_batch() {
        assert_eq!(ValidationError::collect(Vec::new()), None);
    }

    #[test]
    fn should_collect_single_error_as_itself() {
        let collected = ValidationError::collect(vec![ValidationError::EmptyId]);
        assert_eq!(collected, Some(ValidationError::EmptyId));
    }

    #[test]
    fn should_collect_several_errors_into_multiple() {
        let collected = ValidationError::collect(vec![
            ValidationError::MissingField { field: "name" },
            ValidationError::EmptyId,
        ]);
        assert!(matches!(collected, Some(ValidationError::Multiple(ref e)) if e.len() == 2));
    }

    #[test]
    fn should_join_messages_when_displaying_multiple() {
        let err = ValidationError::Multiple(vec![
            ValidationError::MissingField { field: "name" },
            ValidationError::MissingField { field: "brand" },
        ]);
        assert_eq!(
            err.to_string(),
            "missing mandatory device field: name; missing mandatory device field: brand"
        );
    }

    #[test]
    fn should_convert_validation_error_into_top_level_error() {
        let err: DevKeepError = ValidationError::EmptyId.into();
        assert!(matches!(err, DevKeepError::Validation(_)));
    }

    #[test]
    fn should_render_not_found_with_entity_and_id() {
        let err = NotFoundError::device("abc-123");
        assert_eq!(err.to_string(), "Device with id abc-123 doesn't exist");
    }
}
