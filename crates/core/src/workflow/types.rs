//! Workflow domain types for record lifecycle management.
//!
//! Status sets are declared once per entity with `workflow_status!`; the
//! macro derives the enum, its wire names and the initial value, and
//! `RecordKind` maps each entity kind back to that table.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::workflow::error::WorkflowError;

/// Behaviour shared by every per-entity status enum.
pub trait WorkflowStatus:
    Copy + Eq + fmt::Debug + fmt::Display + Send + Sync + Sized + 'static
{
    /// The record kind this status belongs to.
    const KIND: RecordKind;
    /// Every allowed status, in declaration order.
    const ALL: &'static [Self];
    /// Status assigned at creation; the owner's edit window.
    const INITIAL: Self;

    /// Returns the stored and wire representation (upper case).
    fn as_str(&self) -> &'static str;

    /// Parses a status from a string, ignoring case and surrounding spaces.
    fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|status| status.as_str().eq_ignore_ascii_case(value))
    }

    /// Returns true while the owner may still edit or delete the record.
    fn is_initial(&self) -> bool {
        *self == Self::INITIAL
    }
}

macro_rules! workflow_status {
    (
        $(#[$meta:meta])*
        $name:ident for $kind:ident, initial = $initial:ident {
            $($variant:ident => $wire:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[doc = concat!("`", $wire, "`")]
                #[serde(rename = $wire)]
                $variant,
            )+
        }

        impl WorkflowStatus for $name {
            const KIND: RecordKind = RecordKind::$kind;
            const ALL: &'static [Self] = &[$(Self::$variant),+];
            const INITIAL: Self = Self::$initial;

            fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $wire,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

workflow_status! {
    /// Document request status.
    RequestStatus for DocumentRequest, initial = Pending {
        Pending => "PENDING",
        Approved => "APPROVED",
        Rejected => "REJECTED",
        Released => "RELEASED",
    }
}

workflow_status! {
    /// Appointment status.
    AppointmentStatus for Appointment, initial = Pending {
        Pending => "PENDING",
        Confirmed => "CONFIRMED",
        Cancelled => "CANCELLED",
        Done => "DONE",
    }
}

workflow_status! {
    /// Fee payment status.
    PaymentStatus for FeePayment, initial = Pending {
        Pending => "PENDING",
        Verified => "VERIFIED",
        Rejected => "REJECTED",
    }
}

workflow_status! {
    /// Inquiry status.
    InquiryStatus for Inquiry, initial = Open {
        Open => "OPEN",
        Answered => "ANSWERED",
        Closed => "CLOSED",
    }
}

impl InquiryStatus {
    /// Returns true if a non-empty reply given with this status stamps
    /// the replying staff member and time.
    #[must_use]
    pub const fn stamps_reply(&self) -> bool {
        matches!(self, Self::Answered | Self::Closed)
    }
}

/// The four transactional record types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    /// Document request.
    DocumentRequest,
    /// Office appointment.
    Appointment,
    /// Fee payment record.
    FeePayment,
    /// Student inquiry.
    Inquiry,
}

impl RecordKind {
    /// Singular human label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::DocumentRequest => "document request",
            Self::Appointment => "appointment",
            Self::FeePayment => "payment",
            Self::Inquiry => "inquiry",
        }
    }

    /// Plural human label.
    #[must_use]
    pub const fn plural(self) -> &'static str {
        match self {
            Self::DocumentRequest => "document requests",
            Self::Appointment => "appointments",
            Self::FeePayment => "payments",
            Self::Inquiry => "inquiries",
        }
    }

    /// Allowed status names for this kind.
    #[must_use]
    pub fn status_names(self) -> Vec<&'static str> {
        match self {
            Self::DocumentRequest => names::<RequestStatus>(),
            Self::Appointment => names::<AppointmentStatus>(),
            Self::FeePayment => names::<PaymentStatus>(),
            Self::Inquiry => names::<InquiryStatus>(),
        }
    }

    /// Name of the status records of this kind are created in.
    #[must_use]
    pub fn initial_status_name(self) -> &'static str {
        match self {
            Self::DocumentRequest => RequestStatus::INITIAL.as_str(),
            Self::Appointment => AppointmentStatus::INITIAL.as_str(),
            Self::FeePayment => PaymentStatus::INITIAL.as_str(),
            Self::Inquiry => InquiryStatus::INITIAL.as_str(),
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

fn names<S: WorkflowStatus>() -> Vec<&'static str> {
    S::ALL.iter().map(WorkflowStatus::as_str).collect()
}

/// Owner mutations gated on the initial status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OwnerAction {
    /// Change the record's own fields.
    Edit,
    /// Remove the record.
    Delete,
}

impl OwnerAction {
    /// Past participle used in denial messages.
    #[must_use]
    pub const fn past_participle(self) -> &'static str {
        match self {
            Self::Edit => "edited",
            Self::Delete => "deleted",
        }
    }
}

/// Staff process input: the requested status plus the annotation field
/// (remarks, notes, admin note or reply).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessInput<S> {
    /// Requested status.
    pub status: S,
    /// Annotation text, trimmed.
    pub annotation: String,
}

impl<S: WorkflowStatus> ProcessInput<S> {
    /// Creates a process input from an already typed status.
    #[must_use]
    pub fn new(status: S, annotation: impl Into<String>) -> Self {
        Self {
            status,
            annotation: annotation.into().trim().to_string(),
        }
    }

    /// Parses a process input from raw form values.
    ///
    /// # Errors
    ///
    /// Returns `WorkflowError::UnknownStatus` if `status` is not one of the
    /// kind's allowed values.
    pub fn parse(status: &str, annotation: Option<&str>) -> Result<Self, WorkflowError> {
        let parsed = S::parse(status).ok_or_else(|| WorkflowError::UnknownStatus {
            kind: S::KIND,
            value: status.trim().to_string(),
        })?;
        Ok(Self::new(parsed, annotation.unwrap_or_default()))
    }
}
