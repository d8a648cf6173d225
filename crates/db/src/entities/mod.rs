//! `SeaORM` entity definitions.

pub mod prelude;

pub mod appointments;
pub mod document_requests;
pub mod document_types;
pub mod fee_payments;
pub mod inquiries;
pub mod sea_orm_active_enums;
pub mod student_profiles;
pub mod users;
