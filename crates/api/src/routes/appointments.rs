//! Appointment routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
};
use campusdesk_core::forms::{AppointmentForm, AppointmentProcessForm};
use campusdesk_core::listing::{ListParams, ListQuery};
use campusdesk_core::workflow::AppointmentStatus;
use campusdesk_db::{AppointmentRepository, AppointmentRow};
use chrono::Utc;
use serde_json::{Value, json};
use uuid::Uuid;

use crate::AppState;
use crate::error::ApiError;
use crate::extractors::{CurrentActor, JsonBody};

/// Creates appointment routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/appointments", get(list_appointments).post(create_appointment))
        .route(
            "/appointments/{id}",
            get(get_appointment).put(update_appointment).delete(delete_appointment),
        )
        .route("/appointments/{id}/process", post(process_appointment))
}

/// GET /appointments - Filter by `q` (office, topic, student code) and `status`.
async fn list_appointments(
    State(state): State<AppState>,
    actor: CurrentActor,
    Query(params): Query<ListParams>,
) -> Result<Json<Value>, ApiError> {
    let scope = actor.scope()?;
    let filter = ListQuery::<AppointmentStatus>::from_params(&params);
    let appointments = AppointmentRepository::new((*state.db).clone())
        .list(scope, &filter)
        .await?;

    Ok(Json(json!({ "appointments": appointments })))
}

/// GET /appointments/{id}
async fn get_appointment(
    State(state): State<AppState>,
    actor: CurrentActor,
    Path(id): Path<Uuid>,
) -> Result<Json<AppointmentRow>, ApiError> {
    let scope = actor.scope()?;
    let appointment = AppointmentRepository::new((*state.db).clone())
        .get(scope, id)
        .await?;
    Ok(Json(appointment))
}

/// POST /appointments - Book an appointment; the schedule must be in the future.
async fn create_appointment(
    State(state): State<AppState>,
    actor: CurrentActor,
    JsonBody(form): JsonBody<AppointmentForm>,
) -> Result<(StatusCode, Json<AppointmentRow>), ApiError> {
    let owner = actor.require_profile()?;
    let form = form.clean(Utc::now())?;
    let appointment = AppointmentRepository::new((*state.db).clone())
        .create(owner, form)
        .await?;
    Ok((StatusCode::CREATED, Json(appointment)))
}

/// PUT /appointments/{id} - Owner edit while pending.
async fn update_appointment(
    State(state): State<AppState>,
    actor: CurrentActor,
    Path(id): Path<Uuid>,
    JsonBody(form): JsonBody<AppointmentForm>,
) -> Result<Json<AppointmentRow>, ApiError> {
    let owner = actor.require_profile()?;
    let appointment = AppointmentRepository::new((*state.db).clone())
        .update(owner, id, form, Utc::now())
        .await?;
    Ok(Json(appointment))
}

/// DELETE /appointments/{id} - Owner delete while pending.
async fn delete_appointment(
    State(state): State<AppState>,
    actor: CurrentActor,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let owner = actor.require_profile()?;
    AppointmentRepository::new((*state.db).clone())
        .delete(owner, id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /appointments/{id}/process - Staff sets status and notes.
async fn process_appointment(
    State(state): State<AppState>,
    actor: CurrentActor,
    Path(id): Path<Uuid>,
    JsonBody(form): JsonBody<AppointmentProcessForm>,
) -> Result<Json<AppointmentRow>, ApiError> {
    actor.require_staff()?;
    let input = form.parse()?;
    let appointment = AppointmentRepository::new((*state.db).clone())
        .process(id, input)
        .await?;
    Ok(Json(appointment))
}
