//! Dashboard route.

use axum::{Json, Router, extract::State, routing::get};
use campusdesk_db::DashboardRepository;
use serde_json::{Value, json};

use crate::AppState;
use crate::error::ApiError;
use crate::extractors::CurrentActor;

/// Creates dashboard routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/dashboard", get(get_dashboard))
}

/// GET /dashboard - Status counts for staff, own recent records for students.
async fn get_dashboard(
    State(state): State<AppState>,
    actor: CurrentActor,
) -> Result<Json<Value>, ApiError> {
    let repo = DashboardRepository::new((*state.db).clone());

    if actor.is_staff {
        let dashboard = repo.staff().await?;
        return Ok(Json(json!({ "role": "staff", "dashboard": dashboard })));
    }

    let profile_id = actor.require_profile()?;
    let dashboard = repo.student(profile_id).await?;
    Ok(Json(json!({ "role": "student", "dashboard": dashboard })))
}
