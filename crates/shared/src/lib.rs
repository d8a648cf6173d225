//! Shared errors, configuration and token handling for CampusDesk.
//!
//! This crate provides common types used across all other crates:
//! - Application-wide error types and field-level validation errors
//! - Configuration management
//! - Bearer token claims and the JWT service

pub mod auth;
pub mod config;
pub mod error;
pub mod jwt;


pub use auth::Claims;
pub use config::AppConfig;
pub use error::{AppError, AppResult, FieldErrors};
pub use jwt::{JwtConfig, JwtError, JwtService};
