//! Per-entity input structs and their validation.
//!
//! Each form is deserialized from the request body, then `clean`ed: string
//! fields are trimmed, declarative `validator` rules run, and the checks the
//! derive cannot express (money precision, future schedule) are added by
//! hand. Failures come back as [`FieldErrors`] keyed by input field name.

mod catalog;
mod process;
mod profile;
mod records;

pub use catalog::DocumentTypeForm;
pub use process::{AppointmentProcessForm, InquiryProcessForm, PaymentProcessForm, RequestProcessForm};
pub use profile::ProfileForm;
pub use records::{AppointmentForm, DocumentRequestForm, FeePaymentForm, InquiryForm};

use campusdesk_shared::FieldErrors;
use rust_decimal::Decimal;
use validator::{Validate, ValidationErrors};

/// Largest storable amount is 99,999,999.99 (`decimal(10,2)`).
const MONEY_MAX_DIGITS_BEFORE_POINT: u32 = 8;
const MONEY_SCALE: u32 = 2;

/// Runs the derived rules of a form.
///
/// # Errors
///
/// Returns the per-field messages of every failed rule.
pub fn check<T: Validate>(form: &T) -> Result<(), FieldErrors> {
    form.validate().map_err(|errors| field_errors(&errors))
}

/// Converts `validator` output into field-keyed messages.
#[must_use]
pub fn field_errors(errors: &ValidationErrors) -> FieldErrors {
    let mut fields = FieldErrors::new();
    for (field, failures) in errors.field_errors() {
        for failure in failures {
            let message = failure
                .message
                .as_ref()
                .map_or_else(|| failure.code.to_string(), ToString::to_string);
            fields.add(field.to_string(), message);
        }
    }
    fields
}

#[allow(clippy::needless_pass_by_value)]
fn trim(value: String) -> String {
    value.trim().to_string()
}

fn trim_optional(value: Option<String>) -> Option<String> {
    value.map(trim).filter(|v| !v.is_empty())
}

/// Validates a `decimal(10,2)` amount. `allow_zero` distinguishes fees
/// (non-negative) from payments (positive).
fn check_money(errors: &mut FieldErrors, field: &str, amount: Decimal, allow_zero: bool) {
    if amount.is_sign_negative() && !amount.is_zero() {
        errors.add(field, "Ensure this value is greater than or equal to 0.");
        return;
    }
    if amount.is_zero() && !allow_zero {
        errors.add(field, "Ensure this value is greater than 0.");
        return;
    }
    if amount.normalize().scale() > MONEY_SCALE {
        errors.add(
            field,
            format!("Ensure that there are no more than {MONEY_SCALE} decimal places."),
        );
    }
    if amount.trunc() >= Decimal::from(10_u64.pow(MONEY_MAX_DIGITS_BEFORE_POINT)) {
        errors.add(
            field,
            format!(
                "Ensure that there are no more than {MONEY_MAX_DIGITS_BEFORE_POINT} digits before the decimal point."
            ),
        );
    }
}
