//! Document type catalog form.

use campusdesk_shared::FieldErrors;
use rust_decimal::Decimal;
use serde::Deserialize;
use validator::Validate;

use super::{check, check_money, trim};

fn default_processing_days() -> i16 {
    3
}

fn default_active() -> bool {
    true
}

/// Input for creating or replacing a document type.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct DocumentTypeForm {
    /// Unique display name.
    #[validate(length(min = 1, max = 120, message = "Name must be 1 to 120 characters."))]
    pub name: String,
    /// Fee charged per request.
    pub fee: Decimal,
    /// Expected processing time in days.
    #[serde(default = "default_processing_days")]
    #[validate(range(min = 1, message = "Processing days must be at least 1."))]
    pub processing_days: i16,
    /// Whether students may request this type.
    #[serde(default = "default_active")]
    pub is_active: bool,
}

impl DocumentTypeForm {
    /// Trims and validates the form.
    ///
    /// # Errors
    ///
    /// Returns the per-field messages of every failed rule.
    pub fn clean(self) -> Result<Self, FieldErrors> {
        let form = Self {
            name: trim(self.name),
            ..self
        };
        let mut errors = check(&form).err().unwrap_or_default();
        check_money(&mut errors, "fee", form.fee, true);
        errors.into_result()?;
        Ok(form)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_free_document_type_is_valid() {
        let form = DocumentTypeForm {
            name: " Good Moral Certificate ".to_string(),
            fee: dec!(0),
            processing_days: 3,
            is_active: true,
        }
        .clean()
        .unwrap();
        assert_eq!(form.name, "Good Moral Certificate");
    }

    #[test]
    fn test_negative_fee_and_zero_days_rejected() {
        let errors = DocumentTypeForm {
            name: "Transcript of Records".to_string(),
            fee: dec!(-5),
            processing_days: 0,
            is_active: true,
        }
        .clean()
        .unwrap_err();
        assert!(errors.contains("fee"));
        assert!(errors.contains("processing_days"));
    }

    #[test]
    fn test_blank_name_rejected() {
        let errors = DocumentTypeForm {
            name: "   ".to_string(),
            fee: dec!(50),
            processing_days: 5,
            is_active: false,
        }
        .clean()
        .unwrap_err();
        assert!(errors.contains("name"));
    }
}
