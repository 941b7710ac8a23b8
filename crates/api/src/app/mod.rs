//! HTTP API application wiring (Axum router + service wiring).
//!
//! - `services.rs`: repositories and domain services shared by all handlers
//! - `routes/`: HTTP routes + handlers (one file per area)
//! - `dto.rs`: request DTOs, boundary validation, and JSON mapping helpers
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{routing::get, Extension, Router};
use tower_http::cors::CorsLayer;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

use services::AppServices;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
///
/// Health routes sit at the root; everything else is mounted under
/// `api_prefix`. CORS is open to any origin, with credentials.
pub fn build_app(services: Arc<AppServices>, api_prefix: &str) -> Router {
    Router::new()
        .route("/", get(routes::system::root))
        .route("/health", get(routes::system::health))
        .nest(api_prefix, routes::router())
        .layer(Extension(services))
        .layer(CorsLayer::very_permissive())
}
