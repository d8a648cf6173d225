//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the application.
//! Scoped reads take an explicit [`Scope`](campusdesk_core::access::Scope);
//! owner mutations take the caller's profile ID.

pub mod appointment;
pub mod dashboard;
pub mod document_request;
pub mod document_type;
pub mod error;
pub mod inquiry;
pub mod payment;
pub mod profile;
mod search;
pub mod user;

pub use appointment::{AppointmentRepository, AppointmentRow};
pub use dashboard::{
    DashboardRepository, KindCounts, StaffDashboard, StatusCount, StudentDashboard,
};
pub use document_request::{DocumentRequestRepository, DocumentRequestRow};
pub use document_type::DocumentTypeRepository;
pub use error::RepositoryError;
pub use inquiry::{InquiryRepository, InquiryRow};
pub use payment::{FeePaymentRow, PaymentRepository};
pub use profile::ProfileRepository;
pub use user::{CreateUserInput, UserRepository};
