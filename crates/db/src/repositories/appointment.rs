//! Appointment repository.

use campusdesk_core::access::Scope;
use campusdesk_core::forms::AppointmentForm;
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
use crate::entities::sea_orm_active_enums::AppointmentStatus;
use crate::entities::{appointments, student_profiles};

const LABEL: &str = "Appointment";

/// An appointment with its owner's student code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromQueryResult)]
pub struct AppointmentRow {
    /// Appointment ID.
    pub id: Uuid,
    /// Owning student profile.
    pub student_id: Uuid,
    /// Owner's student code.
    pub student_code: String,
    /// Office to visit.
    pub office: String,
    /// Appointment topic.
    pub topic: String,
    /// Requested date and time.
    pub schedule: DateTime<FixedOffset>,
    /// Current status.
    pub status: AppointmentStatus,
    /// Staff notes.
    pub notes: String,
    /// Creation time.
    pub created_at: DateTime<FixedOffset>,
}

/// Appointment repository.
#[derive(Debug, Clone)]
pub struct AppointmentRepository {
    db: DatabaseConnection,
}

impl AppointmentRepository {
    /// Creates a new appointment repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn rows(scope: Scope) -> Select<appointments::Entity> {
        let query = appointments::Entity::find()
            .join(
                JoinType::InnerJoin,
                appointments::Relation::StudentProfiles.def(),
            )
            .column_as(student_profiles::Column::StudentCode, "student_code");
        scoped(query, appointments::Column::StudentId, scope)
    }

    /// Lists appointments visible in `scope`, latest schedule first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(
        &self,
        scope: Scope,
        filter: &ListQuery<workflow::AppointmentStatus>,
    ) -> Result<Vec<AppointmentRow>, RepositoryError> {
        let mut query = Self::rows(scope);

        match filter.status {
            StatusFilter::Any => {}
            StatusFilter::Is(status) => {
                query = query.filter(appointments::Column::Status.eq(AppointmentStatus::from(status)));
            }
            StatusFilter::Unmatched => return Ok(Vec::new()),
        }
        if let Some(pattern) = filter.term_pattern() {
            query = query.filter(
                Condition::any()
                    .add(lower_like(
                        (appointments::Entity, appointments::Column::Office),
                        &pattern,
                    ))
                    .add(lower_like(
                        (appointments::Entity, appointments::Column::Topic),
                        &pattern,
                    ))
                    .add(lower_like(
                        (student_profiles::Entity, student_profiles::Column::StudentCode),
                        &pattern,
                    )),
            );
        }

        Ok(query
            .order_by_desc(appointments::Column::Schedule)
            .into_model::<AppointmentRow>()
            .all(&self.db)
            .await?)
    }

    /// Returns the `limit` appointments with the latest schedule.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn recent(
        &self,
        scope: Scope,
        limit: u64,
    ) -> Result<Vec<AppointmentRow>, RepositoryError> {
        Ok(Self::rows(scope)
            .order_by_desc(appointments::Column::Schedule)
            .limit(limit)
            .into_model::<AppointmentRow>()
            .all(&self.db)
            .await?)
    }

    /// Returns the `limit` most recently booked appointments.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn latest_booked(
        &self,
        scope: Scope,
        limit: u64,
    ) -> Result<Vec<AppointmentRow>, RepositoryError> {
        Ok(Self::rows(scope)
            .order_by_desc(appointments::Column::CreatedAt)
            .limit(limit)
            .into_model::<AppointmentRow>()
            .all(&self.db)
            .await?)
    }

    /// Finds an appointment visible in `scope`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if it does not exist or belongs
    /// to another student.
    pub async fn get(&self, scope: Scope, id: Uuid) -> Result<AppointmentRow, RepositoryError> {
        Self::rows(scope)
            .filter(appointments::Column::Id.eq(id))
            .into_model::<AppointmentRow>()
            .one(&self.db)
            .await?
            .ok_or(RepositoryError::NotFound(LABEL))
    }

    /// Books an appointment in PENDING status for `owner`.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub async fn create(
        &self,
        owner: Uuid,
        form: AppointmentForm,
    ) -> Result<AppointmentRow, RepositoryError> {
        let id = Uuid::new_v4();
        let appointment = appointments::ActiveModel {
            id: Set(id),
            student_id: Set(owner),
            office: Set(form.office),
            topic: Set(form.topic),
            schedule: Set(form.schedule.into()),
            status: Set(workflow::AppointmentStatus::Pending.into()),
            notes: Set(String::new()),
            created_at: Set(Utc::now().into()),
        };
        appointment.insert(&self.db).await?;

        info!(appointment_id = %id, student_id = %owner, "Appointment created");
        self.get(Scope::Owner(owner), id).await
    }

    /// Updates the owner's PENDING appointment. The form is cleaned against
    /// `now` only once the record is known to be editable.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The appointment is not the owner's (not found)
    /// - The appointment has left PENDING
    /// - The form is invalid
    pub async fn update(
        &self,
        owner: Uuid,
        id: Uuid,
        form: AppointmentForm,
        now: DateTime<Utc>,
    ) -> Result<AppointmentRow, RepositoryError> {
        let existing = self.find_owned(owner, id).await?;
        WorkflowService::ensure_owner_can_edit(workflow::AppointmentStatus::from(existing.status))?;
        let form = form.clean(now).map_err(RepositoryError::Validation)?;

        let mut active: appointments::ActiveModel = existing.into();
        active.office = Set(form.office);
        active.topic = Set(form.topic);
        active.schedule = Set(form.schedule.into());
        active.update(&self.db).await?;

        info!(appointment_id = %id, "Appointment updated");
        self.get(Scope::Owner(owner), id).await
    }

    /// Deletes the owner's PENDING appointment.
    ///
    /// # Errors
    ///
    /// Returns an error if the appointment is not the owner's or has left
    /// PENDING.
    pub async fn delete(&self, owner: Uuid, id: Uuid) -> Result<(), RepositoryError> {
        let existing = self.find_owned(owner, id).await?;
        WorkflowService::ensure_owner_can_delete(workflow::AppointmentStatus::from(
            existing.status,
        ))?;

        existing.delete(&self.db).await?;
        info!(appointment_id = %id, "Appointment deleted");
        Ok(())
    }

    /// Sets status and notes (staff).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the appointment does not exist.
    pub async fn process(
        &self,
        id: Uuid,
        input: ProcessInput<workflow::AppointmentStatus>,
    ) -> Result<AppointmentRow, RepositoryError> {
        let existing = appointments::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(RepositoryError::NotFound(LABEL))?;

        let transition = WorkflowService::process(existing.status.into(), input);

        let mut active: appointments::ActiveModel = existing.into();
        active.status = Set(transition.to.into());
        active.notes = Set(transition.annotation);
        active.update(&self.db).await?;

        info!(
            appointment_id = %id,
            from = %transition.from,
            to = %transition.to,
            "Appointment processed"
        );
        self.get(Scope::All, id).await
    }

    async fn find_owned(
        &self,
        owner: Uuid,
        id: Uuid,
    ) -> Result<appointments::Model, RepositoryError> {
        appointments::Entity::find_by_id(id)
            .filter(appointments::Column::StudentId.eq(owner))
            .one(&self.db)
            .await?
            .ok_or(RepositoryError::NotFound(LABEL))
    }
}
