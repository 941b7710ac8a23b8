//! Request authentication.
//!
//! Handlers that need a caller identity take [`CurrentUser`] as an argument;
//! routes without it stay public.

use std::sync::Arc;

use axum::{
    async_trait,
    extract::{Extension, FromRequestParts},
    http::{request::Parts, HeaderMap, StatusCode},
    response::Response,
};

use stockroom_auth::User;

use crate::app::errors;
use crate::app::routes::call_service;
use crate::app::services::AppServices;

/// The authenticated, active user behind a request's bearer token.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Extension(services) = Extension::<Arc<AppServices>>::from_request_parts(parts, state)
            .await
            .map_err(|e| errors::internal(e.body_text()))?;

        let token = extract_bearer(&parts.headers)
            .map_err(|_| errors::unauthorized("Not authenticated"))?
            .to_string();

        call_service(services, move |s| s.auth.current_user_now(&token))
            .await
            .map(CurrentUser)
    }
}

fn extract_bearer(headers: &HeaderMap) -> Result<&str, StatusCode> {
    let header = headers
        .get(axum::http::header::AUTHORIZATION)
        .ok_or(StatusCode::UNAUTHORIZED)?;

    let header = header.to_str().map_err(|_| StatusCode::UNAUTHORIZED)?;

    let header = header
        .strip_prefix("Bearer ")
        .ok_or(StatusCode::UNAUTHORIZED)?;

    let token = header.trim();
    if token.is_empty() {
        return Err(StatusCode::UNAUTHORIZED);
    }

    Ok(token)
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    fn headers(value: &str) -> HeaderMap {
        let mut h = HeaderMap::new();
        h.insert(axum::http::header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        h
    }

    #[test]
    fn extracts_bearer_token() {
        assert_eq!(extract_bearer(&headers("Bearer abc.def")), Ok("abc.def"));
    }

    #[test]
    fn rejects_missing_or_malformed_headers() {
        assert!(extract_bearer(&HeaderMap::new()).is_err());
        assert!(extract_bearer(&headers("Basic dXNlcjpwYXNz")).is_err());
        assert!(extract_bearer(&headers("Bearer    ")).is_err());
    }
}
