//! Fee payment routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
};
use campusdesk_core::forms::{FeePaymentForm, PaymentProcessForm};
use campusdesk_core::listing::{ListParams, ListQuery};
use campusdesk_core::workflow::PaymentStatus;
use campusdesk_db::{FeePaymentRow, PaymentRepository};
use chrono::Utc;
use serde_json::{Value, json};
use uuid::Uuid;

use crate::AppState;
use crate::error::ApiError;
use crate::extractors::{CurrentActor, JsonBody};

/// Creates fee payment routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/payments", get(list_payments).post(create_payment))
        .route(
            "/payments/{id}",
            get(get_payment).put(update_payment).delete(delete_payment),
        )
        .route("/payments/{id}/process", post(process_payment))
}

/// GET /payments - Filter by `q` (fee name, reference, student code) and `status`.
async fn list_payments(
    State(state): State<AppState>,
    actor: CurrentActor,
    Query(params): Query<ListParams>,
) -> Result<Json<Value>, ApiError> {
    let scope = actor.scope()?;
    let filter = ListQuery::<PaymentStatus>::from_params(&params);
    let payments = PaymentRepository::new((*state.db).clone())
        .list(scope, &filter)
        .await?;

    Ok(Json(json!({ "payments": payments })))
}

/// GET /payments/{id}
async fn get_payment(
    State(state): State<AppState>,
    actor: CurrentActor,
    Path(id): Path<Uuid>,
) -> Result<Json<FeePaymentRow>, ApiError> {
    let scope = actor.scope()?;
    let payment = PaymentRepository::new((*state.db).clone())
        .get(scope, id)
        .await?;
    Ok(Json(payment))
}

/// POST /payments - Submit a payment; `paid_at` defaults to now.
async fn create_payment(
    State(state): State<AppState>,
    actor: CurrentActor,
    JsonBody(form): JsonBody<FeePaymentForm>,
) -> Result<(StatusCode, Json<FeePaymentRow>), ApiError> {
    let owner = actor.require_profile()?;
    let form = form.clean()?;
    let payment = PaymentRepository::new((*state.db).clone())
        .create(owner, form, Utc::now())
        .await?;
    Ok((StatusCode::CREATED, Json(payment)))
}

/// PUT /payments/{id} - Owner edit while pending.
async fn update_payment(
    State(state): State<AppState>,
    actor: CurrentActor,
    Path(id): Path<Uuid>,
    JsonBody(form): JsonBody<FeePaymentForm>,
) -> Result<Json<FeePaymentRow>, ApiError> {
    let owner = actor.require_profile()?;
    let payment = PaymentRepository::new((*state.db).clone())
        .update(owner, id, form)
        .await?;
    Ok(Json(payment))
}

/// DELETE /payments/{id} - Owner delete while pending.
async fn delete_payment(
    State(state): State<AppState>,
    actor: CurrentActor,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let owner = actor.require_profile()?;
    PaymentRepository::new((*state.db).clone())
        .delete(owner, id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /payments/{id}/process - Staff verifies or rejects with a note.
async fn process_payment(
    State(state): State<AppState>,
    actor: CurrentActor,
    Path(id): Path<Uuid>,
    JsonBody(form): JsonBody<PaymentProcessForm>,
) -> Result<Json<FeePaymentRow>, ApiError> {
    actor.require_staff()?;
    let input = form.parse()?;
    let payment = PaymentRepository::new((*state.db).clone())
        .process(id, input)
        .await?;
    Ok(Json(payment))
}
