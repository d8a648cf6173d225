//! Inquiry repository.
//!
//! Processing an inquiry records the reply and, for a non-empty reply that
//! answers or closes it, the replying staff member and time in the same
//! update as the status change.

use campusdesk_core::access::Scope;
use campusdesk_core::forms::InquiryForm;
use campusdesk_core::listing::{ListQuery, StatusFilter};
use campusdesk_core::workflow::{self, ProcessInput, WorkflowService};
use chrono::{DateTime, FixedOffset, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, FromQueryResult,
    JoinType, ModelTrait, QueryFilter, QueryOrder, QuerySelect, RelationTrait, Select, Set,
};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use super::error::RepositoryError;
use super::search::{lower_like, scoped};
use crate::entities::sea_orm_active_enums::InquiryStatus;
use crate::entities::{inquiries, student_profiles};

const LABEL: &str = "Inquiry";

/// An inquiry with its owner's student code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromQueryResult)]
pub struct InquiryRow {
    /// Inquiry ID.
    pub id: Uuid,
    /// Owning student profile.
    pub student_id: Uuid,
    /// Owner's student code.
    pub student_code: String,
    /// Subject line.
    pub subject: String,
    /// Inquiry body.
    pub message: String,
    /// Current status.
    pub status: InquiryStatus,
    /// Staff reply.
    pub reply: String,
    /// Staff identity that replied.
    pub replied_by: Option<Uuid>,
    /// Creation time.
    pub created_at: DateTime<FixedOffset>,
    /// When the reply was recorded.
    pub replied_at: Option<DateTime<FixedOffset>>,
}

/// Inquiry repository.
#[derive(Debug, Clone)]
pub struct InquiryRepository {
    db: DatabaseConnection,
}

impl InquiryRepository {
    /// Creates a new inquiry repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn rows(scope: Scope) -> Select<inquiries::Entity> {
        let query = inquiries::Entity::find()
            .join(
                JoinType::InnerJoin,
                inquiries::Relation::StudentProfiles.def(),
            )
            .column_as(student_profiles::Column::StudentCode, "student_code");
        scoped(query, inquiries::Column::StudentId, scope)
    }

    /// Lists inquiries visible in `scope`, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(
        &self,
        scope: Scope,
        filter: &ListQuery<workflow::InquiryStatus>,
    ) -> Result<Vec<InquiryRow>, RepositoryError> {
        let mut query = Self::rows(scope);

        match filter.status {
            StatusFilter::Any => {}
            StatusFilter::Is(status) => {
                query = query.filter(inquiries::Column::Status.eq(InquiryStatus::from(status)));
            }
            StatusFilter::Unmatched => return Ok(Vec::new()),
        }
        if let Some(pattern) = filter.term_pattern() {
            query = query.filter(
                Condition::any()
                    .add(lower_like(
                        (inquiries::Entity, inquiries::Column::Subject),
                        &pattern,
                    ))
                    .add(lower_like(
                        (inquiries::Entity, inquiries::Column::Message),
                        &pattern,
                    ))
                    .add(lower_like(
                        (student_profiles::Entity, student_profiles::Column::StudentCode),
                        &pattern,
                    )),
            );
        }

        Ok(query
            .order_by_desc(inquiries::Column::CreatedAt)
            .into_model::<InquiryRow>()
            .all(&self.db)
            .await?)
    }

    /// Returns the `limit` most recent inquiries visible in `scope`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn recent(&self, scope: Scope, limit: u64) -> Result<Vec<InquiryRow>, RepositoryError> {
        Ok(Self::rows(scope)
            .order_by_desc(inquiries::Column::CreatedAt)
            .limit(limit)
            .into_model::<InquiryRow>()
            .all(&self.db)
            .await?)
    }

    /// Finds an inquiry visible in `scope`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if it does not exist or belongs
    /// to another student.
    pub async fn get(&self, scope: Scope, id: Uuid) -> Result<InquiryRow, RepositoryError> {
        Self::rows(scope)
            .filter(inquiries::Column::Id.eq(id))
            .into_model::<InquiryRow>()
            .one(&self.db)
            .await?
            .ok_or(RepositoryError::NotFound(LABEL))
    }

    /// Opens an inquiry for `owner`.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub async fn create(&self, owner: Uuid, form: InquiryForm) -> Result<InquiryRow, RepositoryError> {
        let id = Uuid::new_v4();
        let inquiry = inquiries::ActiveModel {
            id: Set(id),
            student_id: Set(owner),
            subject: Set(form.subject),
            message: Set(form.message),
            status: Set(workflow::InquiryStatus::Open.into()),
            reply: Set(String::new()),
            replied_by: Set(None),
            created_at: Set(Utc::now().into()),
            replied_at: Set(None),
        };
        inquiry.insert(&self.db).await?;

        info!(inquiry_id = %id, student_id = %owner, "Inquiry opened");
        self.get(Scope::Owner(owner), id).await
    }

    /// Updates the owner's OPEN inquiry.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The inquiry is not the owner's (not found)
    /// - The inquiry is no longer OPEN
    /// - The form is invalid
    pub async fn update(
        &self,
        owner: Uuid,
        id: Uuid,
        form: InquiryForm,
    ) -> Result<InquiryRow, RepositoryError> {
        let existing = self.find_owned(owner, id).await?;
        WorkflowService::ensure_owner_can_edit(workflow::InquiryStatus::from(existing.status))?;
        let form = form.clean().map_err(RepositoryError::Validation)?;

        let mut active: inquiries::ActiveModel = existing.into();
        active.subject = Set(form.subject);
        active.message = Set(form.message);
        active.update(&self.db).await?;

        info!(inquiry_id = %id, "Inquiry updated");
        self.get(Scope::Owner(owner), id).await
    }

    /// Deletes the owner's OPEN inquiry.
    ///
    /// # Errors
    ///
    /// Returns an error if the inquiry is not the owner's or is no longer
    /// OPEN.
    pub async fn delete(&self, owner: Uuid, id: Uuid) -> Result<(), RepositoryError> {
        let existing = self.find_owned(owner, id).await?;
        WorkflowService::ensure_owner_can_delete(workflow::InquiryStatus::from(existing.status))?;

        existing.delete(&self.db).await?;
        info!(inquiry_id = %id, "Inquiry deleted");
        Ok(())
    }

    /// Sets status and reply (staff), stamping `staff_id` and `now` when the
    /// reply answers or closes the inquiry.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the inquiry does not exist.
    pub async fn process(
        &self,
        id: Uuid,
        input: ProcessInput<workflow::InquiryStatus>,
        staff_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<InquiryRow, RepositoryError> {
        let existing = inquiries::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(RepositoryError::NotFound(LABEL))?;

        let result =
            WorkflowService::process_inquiry(existing.status.into(), input, staff_id, now);
        let transition = result.transition;

        let mut active: inquiries::ActiveModel = existing.into();
        active.status = Set(transition.to.into());
        active.reply = Set(transition.annotation);
        if let Some(stamp) = result.stamp {
            active.replied_by = Set(Some(stamp.replied_by));
            active.replied_at = Set(Some(stamp.replied_at.into()));
        }
        active.update(&self.db).await?;

        info!(
            inquiry_id = %id,
            from = %transition.from,
            to = %transition.to,
            stamped = result.stamp.is_some(),
            "Inquiry processed"
        );
        self.get(Scope::All, id).await
    }

    async fn find_owned(&self, owner: Uuid, id: Uuid) -> Result<inquiries::Model, RepositoryError> {
        inquiries::Entity::find_by_id(id)
            .filter(inquiries::Column::StudentId.eq(owner))
            .one(&self.db)
            .await?
            .ok_or(RepositoryError::NotFound(LABEL))
    }
}
