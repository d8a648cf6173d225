//! API route definitions.

use axum::{Router, middleware};

use crate::{AppState, middleware::auth::auth_middleware};

pub mod appointments;
pub mod dashboard;
pub mod document_types;
pub mod health;
pub mod inquiries;
pub mod payments;
pub mod profiles;
pub mod requests;

/// Creates the API router; everything except health requires a bearer token.
#[allow(clippy::needless_pass_by_value)]
pub fn api_routes_with_state(state: AppState) -> Router<AppState> {
    let protected_routes = Router::new()
        .merge(profiles::routes())
        .merge(dashboard::routes())
        .merge(document_types::routes())
        .merge(requests::routes())
        .merge(appointments::routes())
        .merge(payments::routes())
        .merge(inquiries::routes())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .merge(health::routes())
        .merge(protected_routes)
}
