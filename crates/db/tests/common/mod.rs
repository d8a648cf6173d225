//! Shared fixtures for repository integration tests.

#![allow(dead_code)]

use campusdesk_core::access::Scope;
use campusdesk_core::forms::{DocumentTypeForm, ProfileForm};
use campusdesk_db::entities::{document_types, student_profiles, users};
use campusdesk_db::migration::{Migrator, MigratorTrait};
use campusdesk_db::repositories::CreateUserInput;
use campusdesk_db::{DocumentTypeRepository, ProfileRepository, UserRepository};
use rust_decimal_macros::dec;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use uuid::Uuid;

/// Fresh in-memory database with the schema applied.
pub async fn setup_db() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);
    let db = Database::connect(options)
        .await
        .expect("Failed to open in-memory database");
    Migrator::up(&db, None).await.expect("Failed to migrate");
    db
}

/// Creates an identity with a unique username.
pub async fn create_user(db: &DatabaseConnection, is_staff: bool) -> users::Model {
    let suffix = Uuid::new_v4().simple().to_string();
    UserRepository::new(db.clone())
        .create(CreateUserInput {
            username: format!("user-{}", &suffix[..12]),
            full_name: "Test User".to_string(),
            email: format!("{}@campus.test", &suffix[..12]),
            is_staff,
        })
        .await
        .expect("Failed to create user")
}

/// Creates a student identity with a profile using `code`.
pub async fn create_student(
    db: &DatabaseConnection,
    code: &str,
) -> (users::Model, student_profiles::Model) {
    let user = create_user(db, false).await;
    let profile = ProfileRepository::new(db.clone())
        .create(
            user.id,
            ProfileForm {
                student_code: code.to_string(),
                course: "BS Information Technology".to_string(),
                year_level: 2,
                contact_no: None,
            },
        )
        .await
        .expect("Failed to create profile");
    (user, profile)
}

/// Creates an active document type.
pub async fn create_document_type(db: &DatabaseConnection, name: &str) -> document_types::Model {
    DocumentTypeRepository::new(db.clone())
        .create(DocumentTypeForm {
            name: name.to_string(),
            fee: dec!(150.00),
            processing_days: 3,
            is_active: true,
        })
        .await
        .expect("Failed to create document type")
}

/// Owner scope for a profile.
pub fn owner(profile: &student_profiles::Model) -> Scope {
    Scope::Owner(profile.id)
}
