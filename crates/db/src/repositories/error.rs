//! Repository error type shared by the portal repositories.

use campusdesk_core::access::AccessError;
use campusdesk_core::workflow::WorkflowError;
use campusdesk_shared::{AppError, FieldErrors};
use sea_orm::{DbErr, SqlErr};

/// Errors returned by repository operations.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// Record does not exist within the caller's scope.
    #[error("{0} not found")]
    NotFound(&'static str),

    /// Workflow gate rejected the mutation.
    #[error(transparent)]
    Workflow(#[from] WorkflowError),

    /// Caller lacks the role or profile for the mutation.
    #[error(transparent)]
    Access(#[from] AccessError),

    /// Input rejected by a storage-backed check (unique name, inactive type).
    #[error("Invalid input: {0}")]
    Validation(FieldErrors),

    /// A document request reference code is already taken.
    #[error("Reference code '{0}' already exists")]
    DuplicateReference(String),

    /// A document type cannot be deleted while requests reference it.
    #[error("Document type is referenced by existing requests")]
    DocumentTypeInUse,

    /// A uniqueness rule outside the form fields was violated.
    #[error("{0}")]
    Conflict(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl RepositoryError {
    /// Shorthand for a single-field storage validation failure.
    #[must_use]
    pub fn invalid_field(field: &str, message: &str) -> Self {
        Self::Validation(FieldErrors::single(field, message))
    }
}

impl From<RepositoryError> for AppError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound(_) => Self::NotFound(err.to_string()),
            RepositoryError::Workflow(e) => e.into(),
            RepositoryError::Access(e) => e.into(),
            RepositoryError::Validation(fields) => Self::Validation(fields),
            RepositoryError::DuplicateReference(_)
            | RepositoryError::DocumentTypeInUse
            | RepositoryError::Conflict(_) => Self::Conflict(err.to_string()),
            RepositoryError::Database(e) => Self::Database(e.to_string()),
        }
    }
}

/// Returns true if the error is a unique constraint violation.
pub(crate) fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

/// Returns true if the error is a foreign key constraint violation.
pub(crate) fn is_foreign_key_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::ForeignKeyConstraintViolation(_)))
}
