//! Integration tests for document types, profiles and reference codes.

mod common;

use campusdesk_core::forms::{DocumentRequestForm, DocumentTypeForm, ProfileForm};
use campusdesk_db::repositories::document_request::INACTIVE_TYPE_MESSAGE;
use campusdesk_db::{
    DocumentRequestRepository, DocumentTypeRepository, ProfileRepository, RepositoryError,
};
use chrono::{TimeZone, Utc};
use common::{create_document_type, create_student, create_user, setup_db};
use rust_decimal_macros::dec;

fn type_form(name: &str, is_active: bool) -> DocumentTypeForm {
    DocumentTypeForm {
        name: name.to_string(),
        fee: dec!(75.50),
        processing_days: 5,
        is_active,
    }
}

#[tokio::test]
async fn test_document_type_names_are_unique() {
    let db = setup_db().await;
    let repo = DocumentTypeRepository::new(db.clone());
    repo.create(type_form("Honorable Dismissal", true))
        .await
        .expect("Failed to create");

    let err = repo
        .create(type_form("Honorable Dismissal", true))
        .await
        .unwrap_err();
    match err {
        RepositoryError::Validation(fields) => assert!(fields.contains("name")),
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_students_see_only_active_types() {
    let db = setup_db().await;
    let repo = DocumentTypeRepository::new(db.clone());
    repo.create(type_form("Diploma", true)).await.unwrap();
    repo.create(type_form("Authentication", false)).await.unwrap();
    repo.create(type_form("Good Moral Certificate", true))
        .await
        .unwrap();

    let active = repo.list(false, None).await.unwrap();
    let names: Vec<_> = active.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["Diploma", "Good Moral Certificate"]);

    assert_eq!(repo.list(true, None).await.unwrap().len(), 3);
    assert_eq!(repo.list(true, Some("MORAL")).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_referenced_document_type_cannot_be_deleted() {
    let db = setup_db().await;
    let doc_type = create_document_type(&db, "Form 137").await;
    let spare = create_document_type(&db, "Course Description").await;
    let (_, student) = create_student(&db, "2021-00042").await;
    let types = DocumentTypeRepository::new(db.clone());

    DocumentRequestRepository::new(db.clone())
        .create(
            student.id,
            DocumentRequestForm {
                document_type_id: doc_type.id,
                purpose: "Transfer".to_string(),
            },
            Utc::now(),
        )
        .await
        .expect("Failed to create request");

    let err = types.delete(doc_type.id).await.unwrap_err();
    assert!(matches!(err, RepositoryError::DocumentTypeInUse));
    assert!(types.get(doc_type.id).await.is_ok());

    types.delete(spare.id).await.expect("Unreferenced type is deletable");
    assert!(matches!(
        types.get(spare.id).await,
        Err(RepositoryError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_inactive_type_cannot_be_requested() {
    let db = setup_db().await;
    let types = DocumentTypeRepository::new(db.clone());
    let retired = types
        .create(type_form("Old Transcript Format", false))
        .await
        .unwrap();
    let (_, student) = create_student(&db, "2021-00043").await;

    let err = DocumentRequestRepository::new(db.clone())
        .create(
            student.id,
            DocumentRequestForm {
                document_type_id: retired.id,
                purpose: "Records".to_string(),
            },
            Utc::now(),
        )
        .await
        .unwrap_err();
    match err {
        RepositoryError::Validation(fields) => assert_eq!(
            fields.get("document_type_id"),
            Some([INACTIVE_TYPE_MESSAGE.to_string()].as_slice())
        ),
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_reference_code_assigned_and_collisions_rejected() {
    let db = setup_db().await;
    let doc_type = create_document_type(&db, "Certificate of Grades").await;
    let (_, alice) = create_student(&db, "2020-11111").await;
    let (_, bob) = create_student(&db, "2020-22222").await;
    let repo = DocumentRequestRepository::new(db.clone());
    let at = Utc.with_ymd_and_hms(2026, 3, 5, 9, 7, 2).unwrap();
    let form = || DocumentRequestForm {
        document_type_id: doc_type.id,
        purpose: "Scholarship".to_string(),
    };

    let first = repo.create(alice.id, form(), at).await.unwrap();
    assert_eq!(first.reference_no, "DR260305090702");

    let err = repo.create(bob.id, form(), at).await.unwrap_err();
    match err {
        RepositoryError::DuplicateReference(code) => assert_eq!(code, "DR260305090702"),
        other => panic!("expected duplicate reference, got {other:?}"),
    }

    // The stored record is not overwritten
    let kept = repo
        .get(campusdesk_core::access::Scope::All, first.id)
        .await
        .unwrap();
    assert_eq!(kept.student_id, alice.id);
}

#[tokio::test]
async fn test_one_profile_per_account_and_unique_codes() {
    let db = setup_db().await;
    let (user, _) = create_student(&db, "2019-00001").await;
    let repo = ProfileRepository::new(db.clone());
    let form = |code: &str| ProfileForm {
        student_code: code.to_string(),
        course: "BS Nursing".to_string(),
        year_level: 4,
        contact_no: Some("0917-000-0000".to_string()),
    };

    let err = repo.create(user.id, form("2019-00099")).await.unwrap_err();
    assert!(matches!(err, RepositoryError::Conflict(_)));

    let newcomer = create_user(&db, false).await;
    let err = repo.create(newcomer.id, form("2019-00001")).await.unwrap_err();
    match err {
        RepositoryError::Validation(fields) => assert!(fields.contains("student_code")),
        other => panic!("expected validation error, got {other:?}"),
    }

    let profile = repo.create(newcomer.id, form("2019-00002")).await.unwrap();
    assert_eq!(
        repo.find_by_user(newcomer.id).await.unwrap().map(|p| p.id),
        Some(profile.id)
    );
}
