//! Access error types.

use campusdesk_shared::AppError;
use thiserror::Error;

/// Errors raised when a caller lacks the role or profile for an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AccessError {
    /// The caller has no linked student profile.
    #[error("Student profile not found.")]
    ProfileRequired,

    /// The action is reserved for staff.
    #[error("Staff access required.")]
    StaffOnly,
}

impl AccessError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        403
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::ProfileRequired => "PROFILE_REQUIRED",
            Self::StaffOnly => "STAFF_ONLY",
        }
    }
}

impl From<AccessError> for AppError {
    fn from(err: AccessError) -> Self {
        Self::Forbidden(err.to_string())
    }
}
