//! Document request routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
};
use campusdesk_core::forms::{DocumentRequestForm, RequestProcessForm};
use campusdesk_core::listing::{ListParams, ListQuery};
use campusdesk_core::workflow::RequestStatus;
use campusdesk_db::{DocumentRequestRepository, DocumentRequestRow};
use chrono::Utc;
use serde_json::{Value, json};
use uuid::Uuid;

use crate::AppState;
use crate::error::ApiError;
use crate::extractors::{CurrentActor, JsonBody};

/// Creates document request routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/requests", get(list_requests).post(create_request))
        .route(
            "/requests/{id}",
            get(get_request).put(update_request).delete(delete_request),
        )
        .route("/requests/{id}/process", post(process_request))
}

/// GET /requests - Filter by `q` (reference, purpose, type name, student code) and `status`.
async fn list_requests(
    State(state): State<AppState>,
    actor: CurrentActor,
    Query(params): Query<ListParams>,
) -> Result<Json<Value>, ApiError> {
    let scope = actor.scope()?;
    let filter = ListQuery::<RequestStatus>::from_params(&params);
    let requests = DocumentRequestRepository::new((*state.db).clone())
        .list(scope, &filter)
        .await?;

    Ok(Json(json!({ "requests": requests })))
}

/// GET /requests/{id}
async fn get_request(
    State(state): State<AppState>,
    actor: CurrentActor,
    Path(id): Path<Uuid>,
) -> Result<Json<DocumentRequestRow>, ApiError> {
    let scope = actor.scope()?;
    let request = DocumentRequestRepository::new((*state.db).clone())
        .get(scope, id)
        .await?;
    Ok(Json(request))
}

/// POST /requests - File a request; the reference code is assigned here.
async fn create_request(
    State(state): State<AppState>,
    actor: CurrentActor,
    JsonBody(form): JsonBody<DocumentRequestForm>,
) -> Result<(StatusCode, Json<DocumentRequestRow>), ApiError> {
    let owner = actor.require_profile()?;
    let form = form.clean()?;
    let request = DocumentRequestRepository::new((*state.db).clone())
        .create(owner, form, Utc::now())
        .await?;
    Ok((StatusCode::CREATED, Json(request)))
}

/// PUT /requests/{id} - Owner edit while pending.
async fn update_request(
    State(state): State<AppState>,
    actor: CurrentActor,
    Path(id): Path<Uuid>,
    JsonBody(form): JsonBody<DocumentRequestForm>,
) -> Result<Json<DocumentRequestRow>, ApiError> {
    let owner = actor.require_profile()?;
    let request = DocumentRequestRepository::new((*state.db).clone())
        .update(owner, id, form)
        .await?;
    Ok(Json(request))
}

/// DELETE /requests/{id} - Owner delete while pending.
async fn delete_request(
    State(state): State<AppState>,
    actor: CurrentActor,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let owner = actor.require_profile()?;
    DocumentRequestRepository::new((*state.db).clone())
        .delete(owner, id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /requests/{id}/process - Staff sets status and remarks.
async fn process_request(
    State(state): State<AppState>,
    actor: CurrentActor,
    Path(id): Path<Uuid>,
    JsonBody(form): JsonBody<RequestProcessForm>,
) -> Result<Json<DocumentRequestRow>, ApiError> {
    actor.require_staff()?;
    let input = form.parse()?;
    let request = DocumentRequestRepository::new((*state.db).clone())
        .process(id, input)
        .await?;
    Ok(Json(request))
}
