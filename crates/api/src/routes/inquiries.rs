//! Inquiry routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
};
use campusdesk_core::forms::{InquiryForm, InquiryProcessForm};
use campusdesk_core::listing::{ListParams, ListQuery};
use campusdesk_core::workflow::InquiryStatus;
use campusdesk_db::{InquiryRepository, InquiryRow};
use chrono::Utc;
use serde_json::{Value, json};
use uuid::Uuid;

use crate::AppState;
use crate::error::ApiError;
use crate::extractors::{CurrentActor, JsonBody};

/// Creates inquiry routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/inquiries", get(list_inquiries).post(create_inquiry))
        .route(
            "/inquiries/{id}",
            get(get_inquiry).put(update_inquiry).delete(delete_inquiry),
        )
        .route("/inquiries/{id}/process", post(process_inquiry))
}

/// GET /inquiries - Filter by `q` (subject, message, student code) and `status`.
async fn list_inquiries(
    State(state): State<AppState>,
    actor: CurrentActor,
    Query(params): Query<ListParams>,
) -> Result<Json<Value>, ApiError> {
    let scope = actor.scope()?;
    let filter = ListQuery::<InquiryStatus>::from_params(&params);
    let inquiries = InquiryRepository::new((*state.db).clone())
        .list(scope, &filter)
        .await?;

    Ok(Json(json!({ "inquiries": inquiries })))
}

/// GET /inquiries/{id}
async fn get_inquiry(
    State(state): State<AppState>,
    actor: CurrentActor,
    Path(id): Path<Uuid>,
) -> Result<Json<InquiryRow>, ApiError> {
    let scope = actor.scope()?;
    let inquiry = InquiryRepository::new((*state.db).clone())
        .get(scope, id)
        .await?;
    Ok(Json(inquiry))
}

/// POST /inquiries - Open an inquiry.
async fn create_inquiry(
    State(state): State<AppState>,
    actor: CurrentActor,
    JsonBody(form): JsonBody<InquiryForm>,
) -> Result<(StatusCode, Json<InquiryRow>), ApiError> {
    let owner = actor.require_profile()?;
    let form = form.clean()?;
    let inquiry = InquiryRepository::new((*state.db).clone())
        .create(owner, form)
        .await?;
    Ok((StatusCode::CREATED, Json(inquiry)))
}

/// PUT /inquiries/{id} - Owner edit while open.
async fn update_inquiry(
    State(state): State<AppState>,
    actor: CurrentActor,
    Path(id): Path<Uuid>,
    JsonBody(form): JsonBody<InquiryForm>,
) -> Result<Json<InquiryRow>, ApiError> {
    let owner = actor.require_profile()?;
    let inquiry = InquiryRepository::new((*state.db).clone())
        .update(owner, id, form)
        .await?;
    Ok(Json(inquiry))
}

/// DELETE /inquiries/{id} - Owner delete while open.
async fn delete_inquiry(
    State(state): State<AppState>,
    actor: CurrentActor,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let owner = actor.require_profile()?;
    InquiryRepository::new((*state.db).clone())
        .delete(owner, id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /inquiries/{id}/process - Staff replies; answering or closing with a reply stamps the replier.
async fn process_inquiry(
    State(state): State<AppState>,
    actor: CurrentActor,
    Path(id): Path<Uuid>,
    JsonBody(form): JsonBody<InquiryProcessForm>,
) -> Result<Json<InquiryRow>, ApiError> {
    actor.require_staff()?;
    let input = form.parse()?;
    let inquiry = InquiryRepository::new((*state.db).clone())
        .process(id, input, actor.user_id, Utc::now())
        .await?;
    Ok(Json(inquiry))
}
