//! Test harness driving the router over an in-memory database.

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use campusdesk_api::{AppState, create_router};
use campusdesk_core::forms::{DocumentTypeForm, ProfileForm};
use campusdesk_db::entities::{document_types, student_profiles, users};
use campusdesk_db::migration::{Migrator, MigratorTrait};
use campusdesk_db::repositories::CreateUserInput;
use campusdesk_db::{DocumentTypeRepository, ProfileRepository, UserRepository};
use campusdesk_shared::{JwtConfig, JwtService};
use http_body_util::BodyExt;
use rust_decimal_macros::dec;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

pub struct TestApp {
    pub db: DatabaseConnection,
    pub jwt: Arc<JwtService>,
    router: Router,
}

impl TestApp {
    pub async fn new() -> Self {
        let mut options = ConnectOptions::new("sqlite::memory:");
        options
            .max_connections(1)
            .min_connections(1)
            .sqlx_logging(false);
        let db = Database::connect(options)
            .await
            .expect("Failed to open in-memory database");
        Migrator::up(&db, None).await.expect("Failed to migrate");

        let jwt = Arc::new(JwtService::new(JwtConfig {
            secret: "test-secret".to_string(),
            access_token_expires_minutes: 15,
            ..JwtConfig::default()
        }));
        let router = create_router(AppState {
            db: Arc::new(db.clone()),
            jwt_service: Arc::clone(&jwt),
        });

        Self { db, jwt, router }
    }

    pub fn token_for(&self, user: &users::Model) -> String {
        self.jwt
            .generate_access_token(user.id)
            .expect("Failed to mint token")
    }

    pub async fn user(&self, is_staff: bool) -> users::Model {
        let suffix = Uuid::new_v4().simple().to_string();
        UserRepository::new(self.db.clone())
            .create(CreateUserInput {
                username: format!("user-{}", &suffix[..12]),
                full_name: "Test User".to_string(),
                email: format!("{}@campus.test", &suffix[..12]),
                is_staff,
            })
            .await
            .expect("Failed to create user")
    }

    /// Student identity with a profile, plus its bearer token.
    pub async fn student(&self, code: &str) -> (student_profiles::Model, String) {
        let user = self.user(false).await;
        let profile = ProfileRepository::new(self.db.clone())
            .create(
                user.id,
                ProfileForm {
                    student_code: code.to_string(),
                    course: "BS Computer Science".to_string(),
                    year_level: 3,
                    contact_no: None,
                },
            )
            .await
            .expect("Failed to create profile");
        let token = self.token_for(&user);
        (profile, token)
    }

    pub async fn staff_token(&self) -> String {
        let user = self.user(true).await;
        self.token_for(&user)
    }

    pub async fn document_type(&self, name: &str) -> document_types::Model {
        DocumentTypeRepository::new(self.db.clone())
            .create(DocumentTypeForm {
                name: name.to_string(),
                fee: dec!(100.00),
                processing_days: 3,
                is_active: true,
            })
            .await
            .expect("Failed to create document type")
    }

    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Router failed");
        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to read body")
            .to_bytes();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, json)
    }

    pub async fn get(&self, uri: &str, token: &str) -> (StatusCode, Value) {
        self.send(Method::GET, uri, Some(token), None).await
    }

    pub async fn post(&self, uri: &str, token: &str, body: Value) -> (StatusCode, Value) {
        self.send(Method::POST, uri, Some(token), Some(body)).await
    }

    pub async fn put(&self, uri: &str, token: &str, body: Value) -> (StatusCode, Value) {
        self.send(Method::PUT, uri, Some(token), Some(body)).await
    }

    pub async fn delete(&self, uri: &str, token: &str) -> (StatusCode, Value) {
        self.send(Method::DELETE, uri, Some(token), None).await
    }
}
