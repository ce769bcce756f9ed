use thiserror::Error;

/// Failure kinds surfaced by the lookup core and its collaborators.
///
/// Per-query resolution failures are not errors at this level: they are
/// recorded inside the result set as a [`QueryOutcome`](crate::QueryOutcome).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Rejected request: empty or oversized host batch, malformed host,
    /// unknown resolver group. Always raised before any query is sent.
    #[error("{0}")]
    InputError(String),

    /// A result set is missing (host, resolver) entries.
    #[error("Result set integrity violated: {0}")]
    IntegrityError(String),

    /// The persistence layer failed to save or load a result set.
    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Resource not found: {0}")]
    NotFound(String),
}

impl DomainError {
    pub fn input(message: impl Into<String>) -> Self {
        Self::InputError(message.into())
    }

    pub fn is_input_error(&self) -> bool {
        matches!(self, Self::InputError(_))
    }
}
