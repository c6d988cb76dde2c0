use crate::types::DbId;

/// Domain error taxonomy shared by every crate in the workspace.
///
/// Validation and lock-timeout failures are user-correctable; `Internal`
/// wraps storage/transaction faults that are not recoverable locally.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed on {field}: {message}")]
    Validation {
        field: &'static str,
        message: String,
    },

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// The per-office exclusivity lock could not be acquired within the
    /// bounded wait. The caller may retry.
    #[error("Could not acquire lock: {key}")]
    LockTimeout { key: String },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Shorthand for a [`CoreError::Validation`] naming the offending field.
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        CoreError::Validation {
            field,
            message: message.into(),
        }
    }
}
