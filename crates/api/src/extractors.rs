//! Request extractors resolving the caller and decoding bodies.

use std::ops::Deref;

use axum::{
    Json,
    extract::{FromRequest, FromRequestParts, Request, rejection::JsonRejection},
    http::request::Parts,
};
use campusdesk_core::access::Actor;
use campusdesk_db::{ProfileRepository, UserRepository};
use campusdesk_shared::{AppError, Claims};
use serde::de::DeserializeOwned;
use tracing::warn;

use crate::AppState;
use crate::error::ApiError;

/// The authenticated caller with its account flags and optional profile.
///
/// The staff flag and active state come from the account record, so a
/// deactivated account is rejected even with a valid token.
#[derive(Debug, Clone, Copy)]
pub struct CurrentActor(pub Actor);

impl Deref for CurrentActor {
    type Target = Actor;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for CurrentActor {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let claims = parts
            .extensions
            .get::<Claims>()
            .cloned()
            .ok_or_else(|| AppError::Unauthorized("Authentication required".to_string()))?;

        let user = UserRepository::new((*state.db).clone())
            .find_active(claims.user_id())
            .await?
            .ok_or_else(|| {
                warn!(user_id = %claims.user_id(), "Token for unknown or inactive account");
                AppError::Unauthorized("Account is inactive or does not exist".to_string())
            })?;

        let profile = ProfileRepository::new((*state.db).clone())
            .find_by_user(user.id)
            .await?;

        Ok(Self(Actor::new(
            user.id,
            user.is_staff,
            profile.map(|p| p.id),
        )))
    }
}

/// JSON body extractor that reports malformed bodies as field errors.
#[derive(Debug, Clone)]
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(body_error(&rejection)),
        }
    }
}

fn body_error(rejection: &JsonRejection) -> ApiError {
    AppError::invalid_field("body", rejection.body_text()).into()
}
