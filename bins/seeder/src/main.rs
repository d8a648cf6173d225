//! Database seeder for CampusDesk development and testing.
//!
//! Seeds the document type catalog, a staff account and a student account
//! with a profile, then prints bearer tokens for both accounts.
//! Running it again skips anything that already exists.
//!
//! Usage: cargo run --bin seeder

use campusdesk_core::forms::{DocumentTypeForm, ProfileForm};
use campusdesk_db::entities::users;
use campusdesk_db::repositories::CreateUserInput;
use campusdesk_db::{DocumentTypeRepository, ProfileRepository, UserRepository, connect_with};
use campusdesk_shared::{AppConfig, JwtConfig, JwtService};
use rust_decimal::Decimal;
use sea_orm::DatabaseConnection;

/// Catalog entries: name, fee in centavos, processing days.
const DOCUMENT_TYPES: &[(&str, i64, i16)] = &[
    ("Transcript of Records", 15000, 7),
    ("Certificate of Enrollment", 5000, 2),
    ("Certificate of Good Moral Character", 7500, 3),
    ("Honorable Dismissal", 10000, 5),
    ("Diploma (Certified True Copy)", 20000, 10),
];

const STAFF_USERNAME: &str = "registrar";
const STUDENT_USERNAME: &str = "student";
const STUDENT_CODE: &str = "2024-00001";

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().expect("Failed to load configuration");

    println!("Connecting to database...");
    let db = connect_with(&config.database)
        .await
        .expect("Failed to connect to database");

    println!("Seeding document types...");
    seed_document_types(&db).await;

    println!("Seeding staff account...");
    let staff = seed_user(&db, STAFF_USERNAME, "Records Officer", true).await;

    println!("Seeding student account...");
    let student = seed_user(&db, STUDENT_USERNAME, "Juan Dela Cruz", false).await;
    seed_profile(&db, &student).await;

    let jwt = JwtService::new(JwtConfig::from(&config.jwt));
    for (label, user) in [("staff", &staff), ("student", &student)] {
        let token = jwt
            .generate_access_token(user.id)
            .expect("Failed to mint token");
        println!("  {label} token ({}): {token}", user.username);
    }

    println!("Seeding complete!");
}

async fn seed_document_types(db: &DatabaseConnection) {
    let repo = DocumentTypeRepository::new(db.clone());
    let existing = repo
        .list(true, None)
        .await
        .expect("Failed to list document types");

    for &(name, centavos, processing_days) in DOCUMENT_TYPES {
        if existing.iter().any(|t| t.name == name) {
            println!("  {name} already exists, skipping...");
            continue;
        }

        repo.create(DocumentTypeForm {
            name: name.to_string(),
            fee: Decimal::new(centavos, 2),
            processing_days,
            is_active: true,
        })
        .await
        .expect("Failed to create document type");
        println!("  Created {name}");
    }
}

async fn seed_user(
    db: &DatabaseConnection,
    username: &str,
    full_name: &str,
    is_staff: bool,
) -> users::Model {
    let repo = UserRepository::new(db.clone());
    if let Some(user) = repo
        .find_by_username(username)
        .await
        .expect("Failed to look up user")
    {
        println!("  {username} already exists, skipping...");
        return user;
    }

    let user = repo
        .create(CreateUserInput {
            username: username.to_string(),
            full_name: full_name.to_string(),
            email: format!("{username}@campusdesk.local"),
            is_staff,
        })
        .await
        .expect("Failed to create user");
    println!("  Created {username}");
    user
}

async fn seed_profile(db: &DatabaseConnection, user: &users::Model) {
    let repo = ProfileRepository::new(db.clone());
    if repo
        .find_by_user(user.id)
        .await
        .expect("Failed to look up profile")
        .is_some()
    {
        println!("  Profile for {} already exists, skipping...", user.username);
        return;
    }

    repo.create(
        user.id,
        ProfileForm {
            student_code: STUDENT_CODE.to_string(),
            course: "BS Information Technology".to_string(),
            year_level: 2,
            contact_no: Some("0917-555-0101".to_string()),
        },
    )
    .await
    .expect("Failed to create profile");
    println!("  Created profile {STUDENT_CODE}");
}
