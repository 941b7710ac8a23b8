use std::sync::Arc;

use axum::{response::Response, Router};
use stockroom_core::Classify;

use crate::app::errors;
use crate::app::services::AppServices;

pub mod auth;
pub mod products;
pub mod system;

/// Router for everything mounted under the API prefix.
pub fn router() -> Router {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/products", products::router())
}

/// Run `call` off the executor and turn its error into a response.
pub(crate) async fn call_service<T, E, F>(services: Arc<AppServices>, call: F) -> Result<T, Response>
where
    F: FnOnce(&AppServices) -> Result<T, E> + Send + 'static,
    T: Send + 'static,
    E: Classify + core::fmt::Display + Send + 'static,
{
    match services.run(call).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(e)) => Err(errors::domain_error_to_response(e)),
        Err(e) => Err(errors::internal(e)),
    }
}
