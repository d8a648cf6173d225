//! Workflow service for record state transitions.
//!
//! Owner mutations are gated on the initial status. Staff processing is
//! unrestricted: any allowed status may follow any other.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::workflow::error::WorkflowError;
use crate::workflow::types::{InquiryStatus, OwnerAction, ProcessInput, WorkflowStatus};

/// Service for managing record workflow transitions.
pub struct WorkflowService;

/// Result of a staff process action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition<S> {
    /// Status before processing.
    pub from: S,
    /// Status after processing.
    pub to: S,
    /// Annotation to store (remarks, notes or admin note).
    pub annotation: String,
}

/// Reply author and time recorded on an inquiry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplyStamp {
    /// Staff identity that replied.
    pub replied_by: Uuid,
    /// When the reply was recorded.
    pub replied_at: DateTime<Utc>,
}

/// Result of processing an inquiry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InquiryTransition {
    /// Status and reply change.
    pub transition: Transition<InquiryStatus>,
    /// New stamp, or `None` to leave the stored values untouched.
    pub stamp: Option<ReplyStamp>,
}

impl WorkflowService {
    /// Checks that the owner may still edit a record in `current` status.
    ///
    /// # Errors
    ///
    /// Returns `WorkflowError::NotEditable` outside the initial status.
    pub fn ensure_owner_can_edit<S: WorkflowStatus>(current: S) -> Result<(), WorkflowError> {
        Self::ensure_owner_can(current, OwnerAction::Edit)
    }

    /// Checks that the owner may still delete a record in `current` status.
    ///
    /// # Errors
    ///
    /// Returns `WorkflowError::NotEditable` outside the initial status.
    pub fn ensure_owner_can_delete<S: WorkflowStatus>(current: S) -> Result<(), WorkflowError> {
        Self::ensure_owner_can(current, OwnerAction::Delete)
    }

    fn ensure_owner_can<S: WorkflowStatus>(
        current: S,
        action: OwnerAction,
    ) -> Result<(), WorkflowError> {
        if current.is_initial() {
            Ok(())
        } else {
            Err(WorkflowError::NotEditable {
                kind: S::KIND,
                action,
                current: current.as_str(),
            })
        }
    }

    /// Applies a staff process action. Every allowed status is reachable
    /// from every status.
    #[must_use]
    pub fn process<S: WorkflowStatus>(current: S, input: ProcessInput<S>) -> Transition<S> {
        Transition {
            from: current,
            to: input.status,
            annotation: input.annotation,
        }
    }

    /// Applies a staff process action to an inquiry.
    ///
    /// The reply is stamped with `staff_id` and `at` only when the new
    /// status is ANSWERED or CLOSED and the reply is non-empty.
    #[must_use]
    pub fn process_inquiry(
        current: InquiryStatus,
        input: ProcessInput<InquiryStatus>,
        staff_id: Uuid,
        at: DateTime<Utc>,
    ) -> InquiryTransition {
        let stamp = (input.status.stamps_reply() && !input.annotation.is_empty()).then_some(
            ReplyStamp {
                replied_by: staff_id,
                replied_at: at,
            },
        );
        InquiryTransition {
            transition: Self::process(current, input),
            stamp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflow::types::{AppointmentStatus, PaymentStatus, RecordKind, RequestStatus};

    #[test]
    fn test_owner_can_edit_pending_request() {
        assert!(WorkflowService::ensure_owner_can_edit(RequestStatus::Pending).is_ok());
        assert!(WorkflowService::ensure_owner_can_delete(RequestStatus::Pending).is_ok());
    }

    #[test]
    fn test_owner_cannot_edit_approved_request() {
        let err = WorkflowService::ensure_owner_can_edit(RequestStatus::Approved).unwrap_err();
        assert_eq!(
            err,
            WorkflowError::NotEditable {
                kind: RecordKind::DocumentRequest,
                action: OwnerAction::Edit,
                current: "APPROVED",
            }
        );
    }

    #[test]
    fn test_owner_cannot_delete_confirmed_appointment() {
        let err =
            WorkflowService::ensure_owner_can_delete(AppointmentStatus::Confirmed).unwrap_err();
        assert_eq!(err.to_string(), "Only pending appointments can be deleted.");
    }

    #[test]
    fn test_process_allows_backwards_transition() {
        let input = ProcessInput::new(PaymentStatus::Pending, "reopened");
        let transition = WorkflowService::process(PaymentStatus::Verified, input);
        assert_eq!(transition.from, PaymentStatus::Verified);
        assert_eq!(transition.to, PaymentStatus::Pending);
        assert_eq!(transition.annotation, "reopened");
    }

    #[test]
    fn test_answered_inquiry_with_reply_is_stamped() {
        let staff = Uuid::new_v4();
        let at = Utc::now();
        let input = ProcessInput::new(InquiryStatus::Answered, "  See the registrar.  ");
        let result = WorkflowService::process_inquiry(InquiryStatus::Open, input, staff, at);

        assert_eq!(result.transition.to, InquiryStatus::Answered);
        assert_eq!(result.transition.annotation, "See the registrar.");
        assert_eq!(
            result.stamp,
            Some(ReplyStamp {
                replied_by: staff,
                replied_at: at,
            })
        );
    }

    #[test]
    fn test_empty_reply_is_not_stamped() {
        let input = ProcessInput::new(InquiryStatus::Closed, "   ");
        let result =
            WorkflowService::process_inquiry(InquiryStatus::Open, input, Uuid::new_v4(), Utc::now());
        assert_eq!(result.transition.to, InquiryStatus::Closed);
        assert!(result.stamp.is_none());
    }

    #[test]
    fn test_open_status_is_not_stamped_even_with_reply() {
        let input = ProcessInput::new(InquiryStatus::Open, "We are looking into it.");
        let result = WorkflowService::process_inquiry(
            InquiryStatus::Answered,
            input,
            Uuid::new_v4(),
            Utc::now(),
        );
        assert!(result.stamp.is_none());
    }
}
