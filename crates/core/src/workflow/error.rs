//! Workflow error types for record lifecycle management.

use campusdesk_shared::{AppError, FieldErrors};
use thiserror::Error;

use crate::workflow::types::{OwnerAction, RecordKind};

/// Errors that can occur during workflow operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorkflowError {
    /// The owner tried to change a record that has left its initial status.
    #[error(
        "Only {} {} can be {}.",
        .kind.initial_status_name().to_lowercase(),
        .kind.plural(),
        .action.past_participle()
    )]
    NotEditable {
        /// Record type.
        kind: RecordKind,
        /// Attempted owner action.
        action: OwnerAction,
        /// Status the record is currently in.
        current: &'static str,
    },

    /// A status string outside the kind's allowed set.
    #[error(
        "Select a valid choice. {value} is not one of the available choices ({}).",
        .kind.status_names().join(", ")
    )]
    UnknownStatus {
        /// Record type.
        kind: RecordKind,
        /// Offending input, trimmed.
        value: String,
    },
}

impl WorkflowError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::NotEditable { .. } => 403,
            Self::UnknownStatus { .. } => 400,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NotEditable { .. } => "NOT_EDITABLE",
            Self::UnknownStatus { .. } => "UNKNOWN_STATUS",
        }
    }
}

impl From<WorkflowError> for AppError {
    fn from(err: WorkflowError) -> Self {
        match err {
            WorkflowError::NotEditable { .. } => Self::Forbidden(err.to_string()),
            WorkflowError::UnknownStatus { .. } => {
                Self::Validation(FieldErrors::single("status", err.to_string()))
            }
        }
    }
}
