use std::sync::Arc;

use axum::{
    extract::{rejection::FormRejection, rejection::JsonRejection, Extension, Form},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;

use crate::app::services::AppServices;
use crate::app::routes::call_service;
use crate::app::{dto, errors};
use crate::middleware::CurrentUser;

pub fn router() -> Router {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/me", get(me))
}

pub async fn register(
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<dto::RegisterRequest>, JsonRejection>,
) -> Response {
    let Json(body) = match body {
        Ok(b) => b,
        Err(e) => return errors::validation_error(e.body_text()),
    };
    if let Err(msg) = body.validate() {
        return errors::validation_error(msg);
    }

    let registered = call_service(services, move |s| {
        s.auth.register(&body.username, &body.email, &body.password)
    })
    .await;

    match registered {
        Ok(user) => (StatusCode::CREATED, Json(dto::user_to_json(&user))).into_response(),
        Err(resp) => resp,
    }
}

pub async fn login(
    Extension(services): Extension<Arc<AppServices>>,
    form: Result<Form<dto::LoginForm>, FormRejection>,
) -> Response {
    let Form(form) = match form {
        Ok(f) => f,
        Err(e) => return errors::validation_error(e.body_text()),
    };

    match call_service(services, move |s| s.auth.login(&form.username, &form.password, Utc::now())).await {
        Ok(token) => (StatusCode::OK, Json(token)).into_response(),
        Err(resp) => resp,
    }
}

pub async fn me(CurrentUser(user): CurrentUser) -> Response {
    (StatusCode::OK, Json(dto::user_to_json(&user))).into_response()
}
