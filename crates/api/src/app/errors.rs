use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use serde_json::json;

use stockroom_core::{Classify, FailureClass};

pub fn json_error(status: StatusCode, code: &'static str, message: impl Into<String>) -> Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}

pub fn status_for(class: FailureClass) -> StatusCode {
    match class {
        FailureClass::NotFound => StatusCode::NOT_FOUND,
        FailureClass::BadRequest => StatusCode::BAD_REQUEST,
        FailureClass::Unauthorized => StatusCode::UNAUTHORIZED,
        FailureClass::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Map any classified domain error to a JSON error response.
///
/// Internal failures are logged in full and reported generically.
pub fn domain_error_to_response<E>(err: E) -> Response
where
    E: Classify + core::fmt::Display,
{
    let class = err.class();
    if !class.is_client_error() {
        tracing::error!(code = err.code(), "request failed: {err}");
        return json_error(status_for(class), err.code(), "internal server error");
    }

    tracing::warn!(code = err.code(), class = %class, "request rejected: {err}");
    let response = json_error(status_for(class), err.code(), err.to_string());
    if class == FailureClass::Unauthorized {
        return with_bearer_challenge(response);
    }
    response
}

/// 422 for requests that fail boundary validation.
pub fn validation_error(message: impl Into<String>) -> Response {
    let message = message.into();
    tracing::warn!("validation failed: {message}");
    json_error(StatusCode::UNPROCESSABLE_ENTITY, "validation_error", message)
}

pub fn unauthorized(message: impl Into<String>) -> Response {
    with_bearer_challenge(json_error(StatusCode::UNAUTHORIZED, "unauthorized", message))
}

pub fn internal(message: impl core::fmt::Display) -> Response {
    tracing::error!("request failed: {message}");
    json_error(
        StatusCode::INTERNAL_SERVER_ERROR,
        "internal",
        "internal server error",
    )
}

fn with_bearer_challenge(mut response: Response) -> Response {
    response
        .headers_mut()
        .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
    response
}
