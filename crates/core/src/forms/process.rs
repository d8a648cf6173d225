//! Staff process forms: a status plus the entity's annotation field.

use serde::Deserialize;

use crate::workflow::{
    AppointmentStatus, InquiryStatus, PaymentStatus, ProcessInput, RequestStatus, WorkflowError,
};

/// Staff input for processing a document request.
#[derive(Debug, Clone, Deserialize)]
pub struct RequestProcessForm {
    /// New status.
    pub status: String,
    /// Remarks shown to the student.
    #[serde(default)]
    pub remarks: Option<String>,
}

/// Staff input for processing an appointment.
#[derive(Debug, Clone, Deserialize)]
pub struct AppointmentProcessForm {
    /// New status.
    pub status: String,
    /// Staff notes.
    #[serde(default)]
    pub notes: Option<String>,
}

/// Staff input for processing a fee payment.
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentProcessForm {
    /// New status.
    pub status: String,
    /// Verification note.
    #[serde(default)]
    pub admin_note: Option<String>,
}

/// Staff input for processing an inquiry.
#[derive(Debug, Clone, Deserialize)]
pub struct InquiryProcessForm {
    /// New status.
    pub status: String,
    /// Reply to the student.
    #[serde(default)]
    pub reply: Option<String>,
}

impl RequestProcessForm {
    /// Parses the form into a typed process input.
    ///
    /// # Errors
    ///
    /// Returns `WorkflowError::UnknownStatus` for a status outside the set.
    pub fn parse(&self) -> Result<ProcessInput<RequestStatus>, WorkflowError> {
        ProcessInput::parse(&self.status, self.remarks.as_deref())
    }
}

impl AppointmentProcessForm {
    /// Parses the form into a typed process input.
    ///
    /// # Errors
    ///
    /// Returns `WorkflowError::UnknownStatus` for a status outside the set.
    pub fn parse(&self) -> Result<ProcessInput<AppointmentStatus>, WorkflowError> {
        ProcessInput::parse(&self.status, self.notes.as_deref())
    }
}

impl PaymentProcessForm {
    /// Parses the form into a typed process input.
    ///
    /// # Errors
    ///
    /// Returns `WorkflowError::UnknownStatus` for a status outside the set.
    pub fn parse(&self) -> Result<ProcessInput<PaymentStatus>, WorkflowError> {
        ProcessInput::parse(&self.status, self.admin_note.as_deref())
    }
}

impl InquiryProcessForm {
    /// Parses the form into a typed process input.
    ///
    /// # Errors
    ///
    /// Returns `WorkflowError::UnknownStatus` for a status outside the set.
    pub fn parse(&self) -> Result<ProcessInput<InquiryStatus>, WorkflowError> {
        ProcessInput::parse(&self.status, self.reply.as_deref())
    }
}
