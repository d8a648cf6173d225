//! Student profile registration form.

use campusdesk_shared::FieldErrors;
use serde::Deserialize;
use validator::Validate;

use super::{check, trim, trim_optional};

/// Input for `POST /profiles`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ProfileForm {
    /// School-issued student number.
    #[validate(length(min = 5, max = 20, message = "Student ID must be 5 to 20 characters."))]
    pub student_code: String,
    /// Degree program.
    #[validate(length(min = 1, max = 100, message = "Course must be 1 to 100 characters."))]
    pub course: String,
    /// Year level.
    #[validate(range(min = 1, max = 6, message = "Year level must be between 1 and 6."))]
    pub year_level: i16,
    /// Optional phone number.
    #[validate(length(max = 30, message = "Contact number must be at most 30 characters."))]
    pub contact_no: Option<String>,
}

impl ProfileForm {
    /// Trims and validates the form.
    ///
    /// # Errors
    ///
    /// Returns the per-field messages of every failed rule.
    pub fn clean(self) -> Result<Self, FieldErrors> {
        let form = Self {
            student_code: trim(self.student_code),
            course: trim(self.course),
            year_level: self.year_level,
            contact_no: trim_optional(self.contact_no),
        };
        check(&form)?;
        Ok(form)
    }
}
