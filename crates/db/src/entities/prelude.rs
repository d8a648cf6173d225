//! Entity re-exports.

pub use super::appointments::Entity as Appointments;
pub use super::document_requests::Entity as DocumentRequests;
pub use super::document_types::Entity as DocumentTypes;
pub use super::fee_payments::Entity as FeePayments;
pub use super::inquiries::Entity as Inquiries;
pub use super::student_profiles::Entity as StudentProfiles;
pub use super::users::Entity as Users;
