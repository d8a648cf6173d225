//! Document type catalog routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
};
use campusdesk_core::forms::DocumentTypeForm;
use campusdesk_core::listing::{ListParams, normalize_term};
use campusdesk_db::DocumentTypeRepository;
use campusdesk_db::entities::document_types;
use serde_json::{Value, json};
use uuid::Uuid;

use crate::AppState;
use crate::error::ApiError;
use crate::extractors::{CurrentActor, JsonBody};

/// Creates document type routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/document-types",
            get(list_document_types).post(create_document_type),
        )
        .route(
            "/document-types/{id}",
            get(get_document_type)
                .put(update_document_type)
                .delete(delete_document_type),
        )
}

/// GET /document-types - Active types for students, every type for staff.
async fn list_document_types(
    State(state): State<AppState>,
    actor: CurrentActor,
    Query(params): Query<ListParams>,
) -> Result<Json<Value>, ApiError> {
    let term = normalize_term(params.q.as_deref());
    let types = DocumentTypeRepository::new((*state.db).clone())
        .list(actor.is_staff, term.as_deref())
        .await?;

    Ok(Json(json!({ "document_types": types })))
}

/// GET /document-types/{id}
async fn get_document_type(
    State(state): State<AppState>,
    _actor: CurrentActor,
    Path(id): Path<Uuid>,
) -> Result<Json<document_types::Model>, ApiError> {
    let document_type = DocumentTypeRepository::new((*state.db).clone())
        .get(id)
        .await?;
    Ok(Json(document_type))
}

/// POST /document-types - Staff only.
async fn create_document_type(
    State(state): State<AppState>,
    actor: CurrentActor,
    JsonBody(form): JsonBody<DocumentTypeForm>,
) -> Result<(StatusCode, Json<document_types::Model>), ApiError> {
    actor.require_staff()?;
    let form = form.clean()?;
    let document_type = DocumentTypeRepository::new((*state.db).clone())
        .create(form)
        .await?;
    Ok((StatusCode::CREATED, Json(document_type)))
}

/// PUT /document-types/{id} - Staff only.
async fn update_document_type(
    State(state): State<AppState>,
    actor: CurrentActor,
    Path(id): Path<Uuid>,
    JsonBody(form): JsonBody<DocumentTypeForm>,
) -> Result<Json<document_types::Model>, ApiError> {
    actor.require_staff()?;
    let form = form.clean()?;
    let document_type = DocumentTypeRepository::new((*state.db).clone())
        .update(id, form)
        .await?;
    Ok(Json(document_type))
}

/// DELETE /document-types/{id} - Staff only; refused while requests reference the type.
async fn delete_document_type(
    State(state): State<AppState>,
    actor: CurrentActor,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    actor.require_staff()?;
    DocumentTypeRepository::new((*state.db).clone())
        .delete(id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
