//! Student profile repository.

use campusdesk_core::forms::ProfileForm;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, Set,
};
use tracing::info;
use uuid::Uuid;

use super::error::{RepositoryError, is_unique_violation};
use crate::entities::student_profiles;

const DUPLICATE_CODE: &str = "Student profile with this student ID already exists.";

/// Student profile repository.
#[derive(Debug, Clone)]
pub struct ProfileRepository {
    db: DatabaseConnection,
}

impl ProfileRepository {
    /// Creates a new profile repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Finds the profile linked to an identity.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_user(
        &self,
        user_id: Uuid,
    ) -> Result<Option<student_profiles::Model>, DbErr> {
        student_profiles::Entity::find()
            .filter(student_profiles::Column::UserId.eq(user_id))
            .one(&self.db)
            .await
    }

    /// Creates the profile for an identity.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The identity already has a profile (conflict)
    /// - The student code is taken (validation on `student_code`)
    pub async fn create(
        &self,
        user_id: Uuid,
        form: ProfileForm,
    ) -> Result<student_profiles::Model, RepositoryError> {
        if self.find_by_user(user_id).await?.is_some() {
            return Err(RepositoryError::Conflict(
                "Student profile already exists for this account.".to_string(),
            ));
        }

        let code_taken = student_profiles::Entity::find()
            .filter(student_profiles::Column::StudentCode.eq(&form.student_code))
            .count(&self.db)
            .await?
            > 0;
        if code_taken {
            return Err(RepositoryError::invalid_field("student_code", DUPLICATE_CODE));
        }

        let profile = student_profiles::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(user_id),
            student_code: Set(form.student_code),
            course: Set(form.course),
            year_level: Set(form.year_level),
            contact_no: Set(form.contact_no),
            created_at: Set(chrono::Utc::now().into()),
        };

        let created = profile.insert(&self.db).await.map_err(|e| {
            if is_unique_violation(&e) {
                RepositoryError::Conflict("Student profile already exists.".to_string())
            } else {
                e.into()
            }
        })?;

        info!(profile_id = %created.id, %user_id, "Student profile created");
        Ok(created)
    }
}
