//! Record workflow management for CampusDesk.
//!
//! Every transactional record (document request, appointment, fee payment,
//! inquiry) follows the same shape of state machine:
//!
//! ```text
//! Initial --[owner edit]-->    Initial
//! Initial --[owner delete]-->  (removed)
//! Any     --[staff process]--> any allowed status
//! ```
//!
//! # Modules
//!
//! - `types` - Status enums, record kinds and process inputs
//! - `error` - Workflow-specific error types
//! - `service` - Owner gating and staff process transitions

pub mod error;
pub mod service;
pub mod types;

#[cfg(test)]
mod service_props;

pub use error::WorkflowError;
pub use service::{InquiryTransition, ReplyStamp, Transition, WorkflowService};
pub use types::{
    AppointmentStatus, InquiryStatus, OwnerAction, PaymentStatus, ProcessInput, RecordKind,
    RequestStatus, WorkflowStatus,
};
