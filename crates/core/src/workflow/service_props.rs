//! Property-based tests for WorkflowService.

use chrono::{DateTime, TimeZone, Utc};
use proptest::prelude::*;
use uuid::Uuid;

use crate::workflow::error::WorkflowError;
use crate::workflow::service::WorkflowService;
use crate::workflow::types::{
    AppointmentStatus, InquiryStatus, PaymentStatus, ProcessInput, RequestStatus, WorkflowStatus,
};

fn arb_status<S: WorkflowStatus + 'static>() -> impl Strategy<Value = S> {
    proptest::sample::select(S::ALL)
}

fn arb_uuid() -> impl Strategy<Value = Uuid> {
    any::<u128>().prop_map(Uuid::from_u128)
}

fn arb_time() -> impl Strategy<Value = DateTime<Utc>> {
    (946_684_800_i64..4_102_444_800_i64).prop_map(|secs| {
        Utc.timestamp_opt(secs, 0)
            .single()
            .unwrap_or_else(Utc::now)
    })
}

fn arb_reply() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        "[ \t]{1,5}",
        "[a-zA-Z0-9 .]{1,80}",
    ]
}

fn check_owner_gate<S: WorkflowStatus>(status: S) -> Result<(), TestCaseError> {
    let edit = WorkflowService::ensure_owner_can_edit(status);
    let delete = WorkflowService::ensure_owner_can_delete(status);
    prop_assert_eq!(edit.is_ok(), status == S::INITIAL);
    prop_assert_eq!(delete.is_ok(), status == S::INITIAL);
    if let Err(err) = edit {
        let is_not_editable = matches!(err, WorkflowError::NotEditable { .. });
        prop_assert!(is_not_editable);
        prop_assert_eq!(err.status_code(), 403);
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Owner edit and delete succeed exactly in the initial status.
    #[test]
    fn prop_owner_gate_is_initial_only(
        request in arb_status::<RequestStatus>(),
        appointment in arb_status::<AppointmentStatus>(),
        payment in arb_status::<PaymentStatus>(),
        inquiry in arb_status::<InquiryStatus>(),
    ) {
        check_owner_gate(request)?;
        check_owner_gate(appointment)?;
        check_owner_gate(payment)?;
        check_owner_gate(inquiry)?;
    }

    /// Staff processing reaches any status from any status.
    #[test]
    fn prop_process_is_unrestricted(
        from in arb_status::<RequestStatus>(),
        to in arb_status::<RequestStatus>(),
        remarks in "[a-zA-Z ]{0,40}",
    ) {
        let transition = WorkflowService::process(from, ProcessInput::new(to, remarks.clone()));
        prop_assert_eq!(transition.from, from);
        prop_assert_eq!(transition.to, to);
        prop_assert_eq!(transition.annotation, remarks.trim());
    }

    /// The reply stamp appears iff the status is ANSWERED/CLOSED and the
    /// trimmed reply is non-empty.
    #[test]
    fn prop_reply_stamping_asymmetry(
        from in arb_status::<InquiryStatus>(),
        to in arb_status::<InquiryStatus>(),
        reply in arb_reply(),
        staff in arb_uuid(),
        at in arb_time(),
    ) {
        let expect_stamp = matches!(to, InquiryStatus::Answered | InquiryStatus::Closed)
            && !reply.trim().is_empty();
        let result = WorkflowService::process_inquiry(from, ProcessInput::new(to, reply), staff, at);

        prop_assert_eq!(result.stamp.is_some(), expect_stamp);
        if let Some(stamp) = result.stamp {
            prop_assert_eq!(stamp.replied_by, staff);
            prop_assert_eq!(stamp.replied_at, at);
        }
    }

    /// Parsing accepts every wire name regardless of case.
    #[test]
    fn prop_status_parse_ignores_case(status in arb_status::<AppointmentStatus>(), upper in any::<bool>()) {
        let raw = if upper {
            status.as_str().to_string()
        } else {
            status.as_str().to_lowercase()
        };
        prop_assert_eq!(AppointmentStatus::parse(&raw), Some(status));
    }
}
