//! Document request repository.
//!
//! Reads take an explicit [`Scope`]; owner mutations take the caller's
//! profile ID and are gated on the initial status; staff processing is
//! unrestricted.

use campusdesk_core::access::Scope;
use campusdesk_core::forms::DocumentRequestForm;
use campusdesk_core::listing::{ListQuery, StatusFilter};
use campusdesk_core::reference::ReferenceCode;
use campusdesk_core::workflow::{self, ProcessInput, WorkflowService};
use chrono::{DateTime, FixedOffset, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, FromQueryResult,
    JoinType, ModelTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, RelationTrait,
    Select, Set,
};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use super::error::{RepositoryError, is_unique_violation};
use super::search::{lower_like, scoped};
use crate::entities::sea_orm_active_enums::RequestStatus;
use crate::entities::{document_requests, document_types, student_profiles};

const LABEL: &str = "Document request";

/// Field message for a request against a deactivated document type.
pub const INACTIVE_TYPE_MESSAGE: &str =
    "This document type is inactive and cannot be requested.";

/// A document request with its owner's student code and type name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromQueryResult)]
pub struct DocumentRequestRow {
    /// Request ID.
    pub id: Uuid,
    /// Reference code, e.g. `DR260305090702`.
    pub reference_no: String,
    /// Owning student profile.
    pub student_id: Uuid,
    /// Owner's student code.
    pub student_code: String,
    /// Requested document type.
    pub document_type_id: Uuid,
    /// Requested document type name.
    pub document_type_name: String,
    /// Why the document is needed.
    pub purpose: String,
    /// Current status.
    pub status: RequestStatus,
    /// Staff remarks.
    pub remarks: String,
    /// Creation time.
    pub requested_at: DateTime<FixedOffset>,
    /// Last modification time.
    pub updated_at: DateTime<FixedOffset>,
}

/// Document request repository.
#[derive(Debug, Clone)]
pub struct DocumentRequestRepository {
    db: DatabaseConnection,
}

impl DocumentRequestRepository {
    /// Creates a new document request repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn rows(scope: Scope) -> Select<document_requests::Entity> {
        let query = document_requests::Entity::find()
            .join(
                JoinType::InnerJoin,
                document_requests::Relation::StudentProfiles.def(),
            )
            .join(
                JoinType::InnerJoin,
                document_requests::Relation::DocumentTypes.def(),
            )
            .column_as(student_profiles::Column::StudentCode, "student_code")
            .column_as(document_types::Column::Name, "document_type_name");
        scoped(query, document_requests::Column::StudentId, scope)
    }

    /// Lists requests visible in `scope`, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(
        &self,
        scope: Scope,
        filter: &ListQuery<workflow::RequestStatus>,
    ) -> Result<Vec<DocumentRequestRow>, RepositoryError> {
        let mut query = Self::rows(scope);

        match filter.status {
            StatusFilter::Any => {}
            StatusFilter::Is(status) => {
                query = query.filter(document_requests::Column::Status.eq(RequestStatus::from(status)));
            }
            StatusFilter::Unmatched => return Ok(Vec::new()),
        }
        if let Some(pattern) = filter.term_pattern() {
            query = query.filter(
                Condition::any()
                    .add(lower_like(
                        (document_requests::Entity, document_requests::Column::ReferenceNo),
                        &pattern,
                    ))
                    .add(lower_like(
                        (document_types::Entity, document_types::Column::Name),
                        &pattern,
                    ))
                    .add(lower_like(
                        (document_requests::Entity, document_requests::Column::Purpose),
                        &pattern,
                    ))
                    .add(lower_like(
                        (student_profiles::Entity, student_profiles::Column::StudentCode),
                        &pattern,
                    )),
            );
        }

        Ok(query
            .order_by_desc(document_requests::Column::RequestedAt)
            .into_model::<DocumentRequestRow>()
            .all(&self.db)
            .await?)
    }

    /// Returns the `limit` most recent requests visible in `scope`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn recent(
        &self,
        scope: Scope,
        limit: u64,
    ) -> Result<Vec<DocumentRequestRow>, RepositoryError> {
        Ok(Self::rows(scope)
            .order_by_desc(document_requests::Column::RequestedAt)
            .limit(limit)
            .into_model::<DocumentRequestRow>()
            .all(&self.db)
            .await?)
    }

    /// Finds a request visible in `scope`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the request does not exist or
    /// belongs to another student.
    pub async fn get(&self, scope: Scope, id: Uuid) -> Result<DocumentRequestRow, RepositoryError> {
        Self::rows(scope)
            .filter(document_requests::Column::Id.eq(id))
            .into_model::<DocumentRequestRow>()
            .one(&self.db)
            .await?
            .ok_or(RepositoryError::NotFound(LABEL))
    }

    /// Creates a request in PENDING status for `owner`, assigning the
    /// reference code from `now`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The document type does not exist or is inactive
    /// - The reference code is already taken (same-second collision)
    pub async fn create(
        &self,
        owner: Uuid,
        form: DocumentRequestForm,
        now: DateTime<Utc>,
    ) -> Result<DocumentRequestRow, RepositoryError> {
        self.ensure_requestable(form.document_type_id).await?;

        let reference = ReferenceCode::for_document_request(now);
        let taken = document_requests::Entity::find()
            .filter(document_requests::Column::ReferenceNo.eq(reference.as_str()))
            .count(&self.db)
            .await?
            > 0;
        if taken {
            warn!(reference = %reference, "Reference code collision");
            return Err(RepositoryError::DuplicateReference(reference.into_inner()));
        }

        let id = Uuid::new_v4();
        let request = document_requests::ActiveModel {
            id: Set(id),
            reference_no: Set(reference.to_string()),
            student_id: Set(owner),
            document_type_id: Set(form.document_type_id),
            purpose: Set(form.purpose),
            status: Set(workflow::RequestStatus::Pending.into()),
            remarks: Set(String::new()),
            requested_at: Set(now.into()),
            updated_at: Set(now.into()),
        };

        request.insert(&self.db).await.map_err(|e| {
            if is_unique_violation(&e) {
                warn!(reference = %reference, "Reference code collision");
                RepositoryError::DuplicateReference(reference.to_string())
            } else {
                e.into()
            }
        })?;

        info!(request_id = %id, reference = %reference, student_id = %owner, "Document request created");
        self.get(Scope::Owner(owner), id).await
    }

    /// Updates the owner's PENDING request, cleaning the form after the
    /// status check.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The request is not the owner's (not found)
    /// - The request has left PENDING
    /// - The form is invalid
    /// - The document type does not exist or is inactive
    pub async fn update(
        &self,
        owner: Uuid,
        id: Uuid,
        form: DocumentRequestForm,
    ) -> Result<DocumentRequestRow, RepositoryError> {
        let existing = self.find_owned(owner, id).await?;
        WorkflowService::ensure_owner_can_edit(workflow::RequestStatus::from(existing.status))?;
        let form = form.clean().map_err(RepositoryError::Validation)?;
        if form.document_type_id != existing.document_type_id {
            self.ensure_requestable(form.document_type_id).await?;
        }

        let mut active: document_requests::ActiveModel = existing.into();
        active.document_type_id = Set(form.document_type_id);
        active.purpose = Set(form.purpose);
        active.updated_at = Set(Utc::now().into());
        active.update(&self.db).await?;

        info!(request_id = %id, "Document request updated");
        self.get(Scope::Owner(owner), id).await
    }

    /// Deletes the owner's PENDING request.
    ///
    /// # Errors
    ///
    /// Returns an error if the request is not the owner's or has left PENDING.
    pub async fn delete(&self, owner: Uuid, id: Uuid) -> Result<(), RepositoryError> {
        let existing = self.find_owned(owner, id).await?;
        WorkflowService::ensure_owner_can_delete(workflow::RequestStatus::from(existing.status))?;

        existing.delete(&self.db).await?;
        info!(request_id = %id, "Document request deleted");
        Ok(())
    }

    /// Sets status and remarks (staff). Any status may follow any status.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the request does not exist.
    pub async fn process(
        &self,
        id: Uuid,
        input: ProcessInput<workflow::RequestStatus>,
    ) -> Result<DocumentRequestRow, RepositoryError> {
        let existing = document_requests::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(RepositoryError::NotFound(LABEL))?;

        let transition = WorkflowService::process(existing.status.into(), input);

        let mut active: document_requests::ActiveModel = existing.into();
        active.status = Set(transition.to.into());
        active.remarks = Set(transition.annotation);
        active.updated_at = Set(Utc::now().into());
        active.update(&self.db).await?;

        info!(
            request_id = %id,
            from = %transition.from,
            to = %transition.to,
            "Document request processed"
        );
        self.get(Scope::All, id).await
    }

    async fn find_owned(
        &self,
        owner: Uuid,
        id: Uuid,
    ) -> Result<document_requests::Model, RepositoryError> {
        document_requests::Entity::find_by_id(id)
            .filter(document_requests::Column::StudentId.eq(owner))
            .one(&self.db)
            .await?
            .ok_or(RepositoryError::NotFound(LABEL))
    }

    async fn ensure_requestable(&self, document_type_id: Uuid) -> Result<(), RepositoryError> {
        let document_type = document_types::Entity::find_by_id(document_type_id)
            .one(&self.db)
            .await?;
        match document_type {
            Some(t) if t.is_active => Ok(()),
            Some(_) => Err(RepositoryError::invalid_field(
                "document_type_id",
                INACTIVE_TYPE_MESSAGE,
            )),
            None => Err(RepositoryError::invalid_field(
                "document_type_id",
                "Select a valid choice. That choice is not one of the available choices.",
            )),
        }
    }
}
