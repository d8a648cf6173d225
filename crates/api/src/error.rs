//! Error-to-response mapping.
//!
//! Every handler returns `Result<_, ApiError>`; the body is always
//! `{"error": CODE, "message": text}` plus `fields` for validation failures.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use campusdesk_core::access::AccessError;
use campusdesk_core::workflow::WorkflowError;
use campusdesk_db::RepositoryError;
use campusdesk_shared::{AppError, FieldErrors};
use sea_orm::DbErr;
use serde_json::json;
use tracing::{debug, error, warn};

/// An [`AppError`] rendered as an HTTP response.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl ApiError {
    /// Returns the wrapped application error.
    #[must_use]
    pub const fn inner(&self) -> &AppError {
        &self.0
    }
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl From<DbErr> for ApiError {
    fn from(err: DbErr) -> Self {
        Self(AppError::Database(err.to_string()))
    }
}

macro_rules! via_app_error {
    ($($source:ty),+ $(,)?) => {
        $(
            impl From<$source> for ApiError {
                fn from(err: $source) -> Self {
                    Self(err.into())
                }
            }
        )+
    };
}

via_app_error!(RepositoryError, AccessError, WorkflowError, FieldErrors);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.0.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let code = self.0.error_code();

        let (message, fields) = match self.0 {
            AppError::Unauthorized(message) => {
                warn!(code, %message, "Authentication failed");
                (message, None)
            }
            AppError::Forbidden(message) => {
                warn!(code, %message, "Permission denied");
                (message, None)
            }
            AppError::NotFound(message) | AppError::Conflict(message) => {
                debug!(code, %message, "Client error");
                (message, None)
            }
            AppError::Validation(fields) => {
                debug!(code, %fields, "Validation failed");
                ("Please correct the errors below.".to_string(), Some(fields))
            }
            AppError::Database(detail) | AppError::Internal(detail) => {
                error!(code, error = %detail, "Server error");
                ("An error occurred".to_string(), None)
            }
        };

        let body = match fields {
            Some(fields) => json!({ "error": code, "message": message, "fields": fields }),
            None => json!({ "error": code, "message": message }),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use rstest::rstest;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[rstest]
    #[case(AppError::Unauthorized("no token".into()), StatusCode::UNAUTHORIZED)]
    #[case(AppError::Forbidden("no".into()), StatusCode::FORBIDDEN)]
    #[case(AppError::NotFound("x".into()), StatusCode::NOT_FOUND)]
    #[case(AppError::Conflict("dup".into()), StatusCode::CONFLICT)]
    #[case(AppError::Database("down".into()), StatusCode::INTERNAL_SERVER_ERROR)]
    fn test_status_mapping(#[case] err: AppError, #[case] expected: StatusCode) {
        assert_eq!(ApiError(err).into_response().status(), expected);
    }

    #[tokio::test]
    async fn test_validation_body_lists_fields() {
        let response =
            ApiError::from(FieldErrors::single("schedule", "Schedule must be in the future."))
                .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["error"], "VALIDATION_ERROR");
        assert_eq!(body["fields"]["schedule"][0], "Schedule must be in the future.");
    }

    #[tokio::test]
    async fn test_server_errors_hide_details() {
        let body = body_json(ApiError::from(DbErr::Custom("secret".into())).into_response()).await;
        assert_eq!(body["error"], "DATABASE_ERROR");
        assert_eq!(body["message"], "An error occurred");
        assert!(body.get("fields").is_none());
    }
}
