//! Student profile routes.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};
use campusdesk_core::forms::ProfileForm;
use campusdesk_db::ProfileRepository;
use campusdesk_db::entities::student_profiles;
use campusdesk_shared::AppError;
use tracing::info;

use crate::AppState;
use crate::error::ApiError;
use crate::extractors::{CurrentActor, JsonBody};

/// Creates profile routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/profiles", post(create_profile))
        .route("/profiles/me", get(get_my_profile))
}

/// POST /profiles - Register the caller's student profile.
async fn create_profile(
    State(state): State<AppState>,
    actor: CurrentActor,
    JsonBody(form): JsonBody<ProfileForm>,
) -> Result<(StatusCode, Json<student_profiles::Model>), ApiError> {
    let form = form.clean()?;
    let profile = ProfileRepository::new((*state.db).clone())
        .create(actor.user_id, form)
        .await?;

    info!(user_id = %actor.user_id, profile_id = %profile.id, "Student profile registered");
    Ok((StatusCode::CREATED, Json(profile)))
}

/// GET /profiles/me - The caller's own profile.
async fn get_my_profile(
    State(state): State<AppState>,
    actor: CurrentActor,
) -> Result<Json<student_profiles::Model>, ApiError> {
    actor.require_profile()?;
    ProfileRepository::new((*state.db).clone())
        .find_by_user(actor.user_id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound("student profile not found".to_string()).into())
}
