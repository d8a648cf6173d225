//! Fee payment repository.

use campusdesk_core::access::Scope;
use campusdesk_core::forms::FeePaymentForm;
use campusdesk_core::listing::{ListQuery, StatusFilter};
use campusdesk_core::workflow::{self, ProcessInput, WorkflowService};
use chrono::{DateTime, FixedOffset, Utc};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, FromQueryResult,
    JoinType, ModelTrait, QueryFilter, QueryOrder, QuerySelect, RelationTrait, Select, Set,
};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use super::error::RepositoryError;
use super::search::{lower_like, scoped};
use crate::entities::sea_orm_active_enums::PaymentStatus;
use crate::entities::{fee_payments, student_profiles};

const LABEL: &str = "Payment";

/// A fee payment with its owner's student code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromQueryResult)]
pub struct FeePaymentRow {
    /// Payment ID.
    pub id: Uuid,
    /// Owning student profile.
    pub student_id: Uuid,
    /// Owner's student code.
    pub student_code: String,
    /// Fee being paid.
    pub fee_name: String,
    /// Amount paid.
    pub amount: Decimal,
    /// External receipt or transaction number.
    pub reference: Option<String>,
    /// Current status.
    pub status: PaymentStatus,
    /// Staff verification note.
    pub admin_note: String,
    /// When the payment was made.
    pub paid_at: DateTime<FixedOffset>,
    /// Creation time.
    pub created_at: DateTime<FixedOffset>,
}

/// Fee payment repository.
#[derive(Debug, Clone)]
pub struct PaymentRepository {
    db: DatabaseConnection,
}

impl PaymentRepository {
    /// Creates a new payment repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn rows(scope: Scope) -> Select<fee_payments::Entity> {
        let query = fee_payments::Entity::find()
            .join(
                JoinType::InnerJoin,
                fee_payments::Relation::StudentProfiles.def(),
            )
            .column_as(student_profiles::Column::StudentCode, "student_code");
        scoped(query, fee_payments::Column::StudentId, scope)
    }

    /// Lists payments visible in `scope`, most recently paid first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(
        &self,
        scope: Scope,
        filter: &ListQuery<workflow::PaymentStatus>,
    ) -> Result<Vec<FeePaymentRow>, RepositoryError> {
        let mut query = Self::rows(scope);

        match filter.status {
            StatusFilter::Any => {}
            StatusFilter::Is(status) => {
                query = query.filter(fee_payments::Column::Status.eq(PaymentStatus::from(status)));
            }
            StatusFilter::Unmatched => return Ok(Vec::new()),
        }
        if let Some(pattern) = filter.term_pattern() {
            query = query.filter(
                Condition::any()
                    .add(lower_like(
                        (fee_payments::Entity, fee_payments::Column::FeeName),
                        &pattern,
                    ))
                    .add(lower_like(
                        (fee_payments::Entity, fee_payments::Column::Reference),
                        &pattern,
                    ))
                    .add(lower_like(
                        (student_profiles::Entity, student_profiles::Column::StudentCode),
                        &pattern,
                    )),
            );
        }

        Ok(query
            .order_by_desc(fee_payments::Column::PaidAt)
            .into_model::<FeePaymentRow>()
            .all(&self.db)
            .await?)
    }

    /// Returns the `limit` most recently paid records visible in `scope`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn recent(
        &self,
        scope: Scope,
        limit: u64,
    ) -> Result<Vec<FeePaymentRow>, RepositoryError> {
        Ok(Self::rows(scope)
            .order_by_desc(fee_payments::Column::PaidAt)
            .limit(limit)
            .into_model::<FeePaymentRow>()
            .all(&self.db)
            .await?)
    }

    /// Finds a payment visible in `scope`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if it does not exist or belongs
    /// to another student.
    pub async fn get(&self, scope: Scope, id: Uuid) -> Result<FeePaymentRow, RepositoryError> {
        Self::rows(scope)
            .filter(fee_payments::Column::Id.eq(id))
            .into_model::<FeePaymentRow>()
            .one(&self.db)
            .await?
            .ok_or(RepositoryError::NotFound(LABEL))
    }

    /// Records a payment in PENDING status for `owner`.
    ///
    /// `paid_at` falls back to `now` when the form leaves it empty.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub async fn create(
        &self,
        owner: Uuid,
        form: FeePaymentForm,
        now: DateTime<Utc>,
    ) -> Result<FeePaymentRow, RepositoryError> {
        let id = Uuid::new_v4();
        let payment = fee_payments::ActiveModel {
            id: Set(id),
            student_id: Set(owner),
            fee_name: Set(form.fee_name),
            amount: Set(form.amount),
            reference: Set(form.reference),
            status: Set(workflow::PaymentStatus::Pending.into()),
            admin_note: Set(String::new()),
            paid_at: Set(form.paid_at.unwrap_or(now).into()),
            created_at: Set(now.into()),
        };
        payment.insert(&self.db).await?;

        info!(payment_id = %id, student_id = %owner, "Fee payment recorded");
        self.get(Scope::Owner(owner), id).await
    }

    /// Updates the owner's PENDING payment, cleaning the form after the
    /// status check.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The payment is not the owner's (not found)
    /// - The payment has left PENDING
    /// - The form is invalid
    pub async fn update(
        &self,
        owner: Uuid,
        id: Uuid,
        form: FeePaymentForm,
    ) -> Result<FeePaymentRow, RepositoryError> {
        let existing = self.find_owned(owner, id).await?;
        WorkflowService::ensure_owner_can_edit(workflow::PaymentStatus::from(existing.status))?;
        let form = form.clean().map_err(RepositoryError::Validation)?;

        let paid_at = form.paid_at.map_or(existing.paid_at, Into::into);
        let mut active: fee_payments::ActiveModel = existing.into();
        active.fee_name = Set(form.fee_name);
        active.amount = Set(form.amount);
        active.reference = Set(form.reference);
        active.paid_at = Set(paid_at);
        active.update(&self.db).await?;

        info!(payment_id = %id, "Fee payment updated");
        self.get(Scope::Owner(owner), id).await
    }

    /// Deletes the owner's PENDING payment.
    ///
    /// # Errors
    ///
    /// Returns an error if the payment is not the owner's or has left
    /// PENDING.
    pub async fn delete(&self, owner: Uuid, id: Uuid) -> Result<(), RepositoryError> {
        let existing = self.find_owned(owner, id).await?;
        WorkflowService::ensure_owner_can_delete(workflow::PaymentStatus::from(existing.status))?;

        existing.delete(&self.db).await?;
        info!(payment_id = %id, "Fee payment deleted");
        Ok(())
    }

    /// Sets status and admin note (staff).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the payment does not exist.
    pub async fn process(
        &self,
        id: Uuid,
        input: ProcessInput<workflow::PaymentStatus>,
    ) -> Result<FeePaymentRow, RepositoryError> {
        let existing = fee_payments::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(RepositoryError::NotFound(LABEL))?;

        let transition = WorkflowService::process(existing.status.into(), input);

        let mut active: fee_payments::ActiveModel = existing.into();
        active.status = Set(transition.to.into());
        active.admin_note = Set(transition.annotation);
        active.update(&self.db).await?;

        info!(
            payment_id = %id,
            from = %transition.from,
            to = %transition.to,
            "Fee payment processed"
        );
        self.get(Scope::All, id).await
    }

    async fn find_owned(
        &self,
        owner: Uuid,
        id: Uuid,
    ) -> Result<fee_payments::Model, RepositoryError> {
        fee_payments::Entity::find_by_id(id)
            .filter(fee_payments::Column::StudentId.eq(owner))
            .one(&self.db)
            .await?
            .ok_or(RepositoryError::NotFound(LABEL))
    }
}
