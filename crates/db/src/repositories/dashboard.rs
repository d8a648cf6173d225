//! Dashboard repository: status counts and recent activity.

use campusdesk_core::access::Scope;
use campusdesk_core::workflow::{
    AppointmentStatus, InquiryStatus, PaymentStatus, RecordKind, RequestStatus, WorkflowStatus,
};
use sea_orm::sea_query::Expr;
use sea_orm::{DatabaseConnection, EntityTrait, QuerySelect};
use uuid::Uuid;
use serde::Serialize;

use super::appointment::{AppointmentRepository, AppointmentRow};
use super::document_request::{DocumentRequestRepository, DocumentRequestRow};
use super::error::RepositoryError;
use super::inquiry::{InquiryRepository, InquiryRow};
use super::payment::{FeePaymentRow, PaymentRepository};
use crate::entities::{appointments, document_requests, fee_payments, inquiries};

/// Recent items shown to staff per list.
pub const STAFF_RECENT_LIMIT: u64 = 8;

/// Recent items shown to a student per list.
pub const STUDENT_RECENT_LIMIT: u64 = 6;

/// Number of records in one status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusCount {
    /// Status name.
    pub status: &'static str,
    /// Records currently in that status.
    pub count: i64,
}

/// Status counts for one record kind, in declaration order, zero-filled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KindCounts {
    /// Record kind.
    pub kind: RecordKind,
    /// One entry per allowed status.
    pub counts: Vec<StatusCount>,
}

impl KindCounts {
    /// Returns the count for a status name.
    #[must_use]
    pub fn count_of(&self, status: &str) -> i64 {
        self.counts
            .iter()
            .find(|c| c.status == status)
            .map_or(0, |c| c.count)
    }
}

/// Staff overview.
#[derive(Debug, Clone, Serialize)]
pub struct StaffDashboard {
    /// Counts for every record kind.
    pub status_counts: Vec<KindCounts>,
    /// Most recently submitted document requests.
    pub recent_requests: Vec<DocumentRequestRow>,
    /// Most recently booked appointments.
    pub recent_appointments: Vec<AppointmentRow>,
}

/// A student's own recent records.
#[derive(Debug, Clone, Serialize)]
pub struct StudentDashboard {
    /// Recent document requests.
    pub requests: Vec<DocumentRequestRow>,
    /// Upcoming and recent appointments.
    pub appointments: Vec<AppointmentRow>,
    /// Recent payments.
    pub payments: Vec<FeePaymentRow>,
    /// Recent inquiries.
    pub inquiries: Vec<InquiryRow>,
}

/// Dashboard repository.
#[derive(Debug, Clone)]
pub struct DashboardRepository {
    db: DatabaseConnection,
}

impl DashboardRepository {
    /// Creates a new dashboard repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Builds the staff overview.
    ///
    /// # Errors
    ///
    /// Returns an error if a database query fails.
    pub async fn staff(&self) -> Result<StaffDashboard, RepositoryError> {
        let status_counts = vec![
            self.counts::<document_requests::Entity, RequestStatus>(
                document_requests::Column::Status,
            )
            .await?,
            self.counts::<appointments::Entity, AppointmentStatus>(appointments::Column::Status)
                .await?,
            self.counts::<fee_payments::Entity, PaymentStatus>(fee_payments::Column::Status)
                .await?,
            self.counts::<inquiries::Entity, InquiryStatus>(inquiries::Column::Status)
                .await?,
        ];

        let recent_requests = DocumentRequestRepository::new(self.db.clone())
            .recent(Scope::All, STAFF_RECENT_LIMIT)
            .await?;
        let recent_appointments = AppointmentRepository::new(self.db.clone())
            .latest_booked(Scope::All, STAFF_RECENT_LIMIT)
            .await?;

        Ok(StaffDashboard {
            status_counts,
            recent_requests,
            recent_appointments,
        })
    }

    /// Builds a student's overview from their own records.
    ///
    /// # Errors
    ///
    /// Returns an error if a database query fails.
    pub async fn student(&self, profile_id: Uuid) -> Result<StudentDashboard, RepositoryError> {
        let scope = Scope::Owner(profile_id);
        Ok(StudentDashboard {
            requests: DocumentRequestRepository::new(self.db.clone())
                .recent(scope, STUDENT_RECENT_LIMIT)
                .await?,
            appointments: AppointmentRepository::new(self.db.clone())
                .recent(scope, STUDENT_RECENT_LIMIT)
                .await?,
            payments: PaymentRepository::new(self.db.clone())
                .recent(scope, STUDENT_RECENT_LIMIT)
                .await?,
            inquiries: InquiryRepository::new(self.db.clone())
                .recent(scope, STUDENT_RECENT_LIMIT)
                .await?,
        })
    }

    async fn counts<E, S>(&self, status_column: E::Column) -> Result<KindCounts, RepositoryError>
    where
        E: EntityTrait,
        S: WorkflowStatus,
    {
        let rows: Vec<(String, i64)> = E::find()
            .select_only()
            .column(status_column)
            .column_as(Expr::col(status_column).count(), "count")
            .group_by(status_column)
            .into_tuple()
            .all(&self.db)
            .await?;

        let counts = S::ALL
            .iter()
            .map(|status| StatusCount {
                status: status.as_str(),
                count: rows
                    .iter()
                    .find(|(name, _)| name == status.as_str())
                    .map_or(0, |(_, count)| *count),
            })
            .collect();

        Ok(KindCounts {
            kind: S::KIND,
            counts,
        })
    }
}
