//! End-to-end tests through the router.

mod common;

use axum::http::{Method, StatusCode};
use chrono::{Duration, Utc};
use common::TestApp;
use serde_json::json;
use uuid::Uuid;

#[tokio::test]
async fn test_health_is_public() {
    let app = TestApp::new().await;

    let (status, body) = app.send(Method::GET, "/api/v1/health", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["database"], "up");
}

#[tokio::test]
async fn test_missing_token_is_unauthorized() {
    let app = TestApp::new().await;

    let (status, body) = app.send(Method::GET, "/api/v1/requests", None, None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "UNAUTHORIZED");
}

#[tokio::test]
async fn test_garbage_token_is_unauthorized() {
    let app = TestApp::new().await;

    let (status, body) = app.get("/api/v1/requests", "not-a-jwt").await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "INVALID_TOKEN");
}

#[tokio::test]
async fn test_inactive_account_is_unauthorized() {
    let app = TestApp::new().await;
    let user = app.user(false).await;
    let token = app.token_for(&user);
    campusdesk_db::UserRepository::new(app.db.clone())
        .set_active(user.id, false)
        .await
        .unwrap();

    let (status, _) = app.get("/api/v1/dashboard", &token).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_non_staff_without_profile_is_forbidden() {
    let app = TestApp::new().await;
    let user = app.user(false).await;
    let token = app.token_for(&user);

    let (status, body) = app.get("/api/v1/requests", &token).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "FORBIDDEN");
}

#[tokio::test]
async fn test_profile_registration_then_me() {
    let app = TestApp::new().await;
    let user = app.user(false).await;
    let token = app.token_for(&user);
    let form = json!({
        "student_code": "2024-00042",
        "course": "BS Nursing",
        "year_level": 1,
    });

    let (status, created) = app.post("/api/v1/profiles", &token, form.clone()).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["student_code"], "2024-00042");

    let (status, me) = app.get("/api/v1/profiles/me", &token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["id"], created["id"]);

    let (status, _) = app.post("/api/v1/profiles", &token, form).await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_students_only_see_their_own_requests() {
    let app = TestApp::new().await;
    let doc = app.document_type("Transcript of Records").await;
    let (_, alice) = app.student("2024-00001").await;
    let (_, bob) = app.student("2024-00002").await;
    let staff = app.staff_token().await;

    let (status, created) = app
        .post(
            "/api/v1/requests",
            &alice,
            json!({ "document_type_id": doc.id, "purpose": "Scholarship application" }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["status"], "PENDING");
    assert!(created["reference_no"].as_str().unwrap().starts_with("DR"));
    let uri = format!("/api/v1/requests/{}", created["id"].as_str().unwrap());

    let (status, _) = app.get(&uri, &bob).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, list) = app.get("/api/v1/requests", &bob).await;
    assert_eq!(list["requests"].as_array().unwrap().len(), 0);

    let (status, _) = app.get(&uri, &staff).await;
    assert_eq!(status, StatusCode::OK);

    let (_, list) = app.get("/api/v1/requests", &staff).await;
    assert_eq!(list["requests"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_processed_request_is_locked_for_owner() {
    let app = TestApp::new().await;
    let doc = app.document_type("Certificate of Enrollment").await;
    let (_, student) = app.student("2024-00003").await;
    let staff = app.staff_token().await;
    let form = json!({ "document_type_id": doc.id, "purpose": "Visa" });

    let (_, created) = app.post("/api/v1/requests", &student, form.clone()).await;
    let id = created["id"].as_str().unwrap();

    let (status, _) = app
        .post(
            &format!("/api/v1/requests/{id}/process"),
            &student,
            json!({ "status": "APPROVED" }),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, processed) = app
        .post(
            &format!("/api/v1/requests/{id}/process"),
            &staff,
            json!({ "status": "approved", "remarks": "Ready Friday" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(processed["status"], "APPROVED");
    assert_eq!(processed["remarks"], "Ready Friday");

    let uri = format!("/api/v1/requests/{id}");
    let (status, body) = app.put(&uri, &student, form).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "Only pending document requests can be edited.");

    let (status, _) = app.delete(&uri, &student).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_unknown_process_status_is_a_field_error() {
    let app = TestApp::new().await;
    let doc = app.document_type("Good Moral").await;
    let (_, student) = app.student("2024-00004").await;
    let staff = app.staff_token().await;
    let (_, created) = app
        .post(
            "/api/v1/requests",
            &student,
            json!({ "document_type_id": doc.id, "purpose": "Transfer" }),
        )
        .await;

    let (status, body) = app
        .post(
            &format!("/api/v1/requests/{}/process", created["id"].as_str().unwrap()),
            &staff,
            json!({ "status": "SHIPPED" }),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["fields"]["status"].is_array());
}

#[tokio::test]
async fn test_owner_edit_checks_access_before_body() {
    let app = TestApp::new().await;
    let doc = app.document_type("Transcript of Records").await;
    let (_, student) = app.student("2024-00010").await;
    let staff = app.staff_token().await;

    let (_, created) = app
        .post(
            "/api/v1/requests",
            &student,
            json!({ "document_type_id": doc.id, "purpose": "Board exam" }),
        )
        .await;
    let id = created["id"].as_str().unwrap();
    app.post(
        &format!("/api/v1/requests/{id}/process"),
        &staff,
        json!({ "status": "APPROVED" }),
    )
    .await;
    let invalid = json!({ "document_type_id": doc.id, "purpose": "" });

    // Locked record wins over an invalid body
    let (status, body) = app
        .put(&format!("/api/v1/requests/{id}"), &student, invalid.clone())
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "Only pending document requests can be edited.");

    // Unknown record wins over an invalid body
    let (status, _) = app
        .put(
            &format!("/api/v1/requests/{}", Uuid::new_v4()),
            &student,
            invalid,
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_status_filter_matches_exactly() {
    let app = TestApp::new().await;
    let (_, student) = app.student("2024-00011").await;
    let staff = app.staff_token().await;
    let (status, _) = app
        .post(
            "/api/v1/appointments",
            &student,
            json!({
                "office": "Guidance Office",
                "topic": "Counseling",
                "schedule": Utc::now() + Duration::days(3),
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = app.get("/api/v1/appointments?status=PENDING", &staff).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["appointments"].as_array().unwrap().len(), 1);

    for uri in [
        "/api/v1/appointments?status=LOST",
        "/api/v1/appointments?status=pending",
    ] {
        let (status, body) = app.get(uri, &staff).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["appointments"].as_array().unwrap().is_empty(), "{uri}");
    }
}

#[tokio::test]
async fn test_appointment_schedule_must_be_future() {
    let app = TestApp::new().await;
    let (_, student) = app.student("2024-00005").await;

    let (status, body) = app
        .post(
            "/api/v1/appointments",
            &student,
            json!({
                "office": "Registrar",
                "topic": "Grade correction",
                "schedule": Utc::now() - Duration::hours(1),
            }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["fields"]["schedule"][0], "Schedule must be in the future.");

    let (status, created) = app
        .post(
            "/api/v1/appointments",
            &student,
            json!({
                "office": "Registrar",
                "topic": "Grade correction",
                "schedule": Utc::now() + Duration::days(2),
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["status"], "PENDING");
}

#[tokio::test]
async fn test_payment_amount_must_be_positive() {
    let app = TestApp::new().await;
    let (_, student) = app.student("2024-00006").await;

    let (status, body) = app
        .post(
            "/api/v1/payments",
            &student,
            json!({ "fee_name": "Library fine", "amount": "0.00" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["fields"]["amount"].is_array());

    let (status, created) = app
        .post(
            "/api/v1/payments",
            &student,
            json!({ "fee_name": "Library fine", "amount": "25.50", "reference": "GC-1234" }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["status"], "PENDING");
    assert!(created["paid_at"].is_string());
}

#[tokio::test]
async fn test_staff_reply_stamps_inquiry() {
    let app = TestApp::new().await;
    let (_, student) = app.student("2024-00007").await;
    let staff = app.staff_token().await;

    let (_, created) = app
        .post(
            "/api/v1/inquiries",
            &student,
            json!({ "subject": "Enrollment hold", "message": "Why is my enrollment on hold?" }),
        )
        .await;
    assert_eq!(created["status"], "OPEN");
    assert!(created["replied_by"].is_null());

    let (status, answered) = app
        .post(
            &format!("/api/v1/inquiries/{}/process", created["id"].as_str().unwrap()),
            &staff,
            json!({ "status": "ANSWERED", "reply": "Please settle your library fine." }),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(answered["status"], "ANSWERED");
    assert!(answered["replied_by"].is_string());
    assert!(answered["replied_at"].is_string());
}

#[tokio::test]
async fn test_document_type_catalog_is_staff_managed() {
    let app = TestApp::new().await;
    let (_, student) = app.student("2024-00008").await;
    let staff = app.staff_token().await;
    let form = json!({ "name": "Diploma", "fee": "500.00", "processing_days": 10 });

    let (status, _) = app.post("/api/v1/document-types", &student, form.clone()).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, created) = app.post("/api/v1/document-types", &staff, form).await;
    assert_eq!(status, StatusCode::CREATED);
    let id = created["id"].as_str().unwrap().to_string();

    let (status, _) = app
        .post(
            "/api/v1/requests",
            &student,
            json!({ "document_type_id": id, "purpose": "Employment" }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = app
        .delete(&format!("/api/v1/document-types/{id}"), &staff)
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "CONFLICT");
}

#[tokio::test]
async fn test_malformed_body_is_a_validation_error() {
    let app = TestApp::new().await;
    let (_, student) = app.student("2024-00009").await;

    let (status, body) = app
        .post("/api/v1/inquiries", &student, json!({ "subject": 42 }))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["fields"]["body"].is_array());
}

#[tokio::test]
async fn test_dashboard_shape_follows_role() {
    let app = TestApp::new().await;
    let (_, student) = app.student("2024-00010").await;
    let staff = app.staff_token().await;

    let (status, body) = app.get("/api/v1/dashboard", &staff).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["role"], "staff");
    assert_eq!(body["dashboard"]["status_counts"].as_array().unwrap().len(), 4);

    let (status, body) = app.get("/api/v1/dashboard", &student).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["role"], "student");
    assert!(body["dashboard"]["requests"].is_array());
}
