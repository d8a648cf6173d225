//! Owner forms for the four transactional records.
//!
//! The same form serves create and owner edit.

use campusdesk_shared::FieldErrors;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use super::{check, check_money, trim, trim_optional};

/// Input for a document request.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct DocumentRequestForm {
    /// Requested document type.
    pub document_type_id: Uuid,
    /// Why the document is needed.
    #[validate(length(min = 1, max = 200, message = "Purpose must be 1 to 200 characters."))]
    pub purpose: String,
}

impl DocumentRequestForm {
    /// Trims and validates the form.
    ///
    /// # Errors
    ///
    /// Returns the per-field messages of every failed rule.
    pub fn clean(self) -> Result<Self, FieldErrors> {
        let form = Self {
            purpose: trim(self.purpose),
            ..self
        };
        check(&form)?;
        Ok(form)
    }
}

/// Input for an office appointment.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AppointmentForm {
    /// Office to visit.
    #[validate(length(min = 1, max = 120, message = "Office must be 1 to 120 characters."))]
    pub office: String,
    /// What the appointment is about.
    #[validate(length(min = 1, max = 200, message = "Topic must be 1 to 200 characters."))]
    pub topic: String,
    /// Requested date and time.
    pub schedule: DateTime<Utc>,
}

impl AppointmentForm {
    /// Trims and validates the form. The schedule must be strictly after
    /// `now`.
    ///
    /// # Errors
    ///
    /// Returns the per-field messages of every failed rule.
    pub fn clean(self, now: DateTime<Utc>) -> Result<Self, FieldErrors> {
        let form = Self {
            office: trim(self.office),
            topic: trim(self.topic),
            schedule: self.schedule,
        };
        let mut errors = check(&form).err().unwrap_or_default();
        if form.schedule <= now {
            errors.add("schedule", "Schedule must be in the future.");
        }
        errors.into_result()?;
        Ok(form)
    }
}

/// Input for a fee payment record.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct FeePaymentForm {
    /// Fee being paid.
    #[validate(length(min = 1, max = 140, message = "Fee name must be 1 to 140 characters."))]
    pub fee_name: String,
    /// Amount paid.
    pub amount: Decimal,
    /// External receipt or transaction number.
    #[validate(length(max = 60, message = "Reference must be at most 60 characters."))]
    pub reference: Option<String>,
    /// When the payment was made. Defaults to submission time on create
    /// and to the stored value on edit.
    pub paid_at: Option<DateTime<Utc>>,
}

impl FeePaymentForm {
    /// Trims and validates the form.
    ///
    /// # Errors
    ///
    /// Returns the per-field messages of every failed rule.
    pub fn clean(self) -> Result<Self, FieldErrors> {
        let form = Self {
            fee_name: trim(self.fee_name),
            amount: self.amount,
            reference: trim_optional(self.reference),
            paid_at: self.paid_at,
        };
        let mut errors = check(&form).err().unwrap_or_default();
        check_money(&mut errors, "amount", form.amount, false);
        errors.into_result()?;
        Ok(form)
    }
}

/// Input for a student inquiry.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct InquiryForm {
    /// Short subject line.
    #[validate(length(min = 1, max = 160, message = "Subject must be 1 to 160 characters."))]
    pub subject: String,
    /// Inquiry body.
    #[validate(length(min = 1, message = "Message is required."))]
    pub message: String,
}

impl InquiryForm {
    /// Trims and validates the form.
    ///
    /// # Errors
    ///
    /// Returns the per-field messages of every failed rule.
    pub fn clean(self) -> Result<Self, FieldErrors> {
        let form = Self {
            subject: trim(self.subject),
            message: trim(self.message),
        };
        check(&form)?;
        Ok(form)
    }
}
