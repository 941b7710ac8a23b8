use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Extension, Path, Query,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};

use stockroom_core::ProductId;

use crate::app::services::AppServices;
use crate::app::routes::call_service;
use crate::app::{dto, errors};
use crate::middleware::CurrentUser;

pub fn router() -> Router {
    Router::new()
        .route("/", post(create_product).get(list_products))
        .route(
            "/:id",
            get(get_product).put(update_product).delete(delete_product),
        )
        .route("/:id/increment", post(increment_stock))
        .route("/:id/decrement", post(decrement_stock))
}

fn parse_id(raw: &str) -> Result<ProductId, Response> {
    raw.parse::<ProductId>()
        .map_err(|e| errors::validation_error(e.to_string()))
}

fn product_response(status: StatusCode, product: &stockroom_products::Product) -> Response {
    (status, Json(dto::product_to_json(product))).into_response()
}

pub async fn create_product(
    Extension(services): Extension<Arc<AppServices>>,
    CurrentUser(user): CurrentUser,
    body: Result<Json<dto::CreateProductRequest>, JsonRejection>,
) -> Response {
    let Json(body) = match body {
        Ok(b) => b,
        Err(e) => return errors::validation_error(e.body_text()),
    };
    if let Err(msg) = body.validate() {
        return errors::validation_error(msg);
    }

    let created = call_service(services, move |s| {
        s.products.create_product(&body.name, &body.sku, body.stock)
    })
    .await;

    match created {
        Ok(product) => {
            tracing::debug!(user = user.username(), sku = %product.sku(), "create_product");
            product_response(StatusCode::CREATED, &product)
        }
        Err(resp) => resp,
    }
}

pub async fn list_products(
    Extension(services): Extension<Arc<AppServices>>,
    query: Result<Query<dto::ListProductsQuery>, QueryRejection>,
) -> Response {
    let Query(query) = match query {
        Ok(q) => q,
        Err(e) => return errors::validation_error(e.body_text()),
    };

    let listed = call_service(services, move |s| {
        s.products.get_all_products(query.skip, query.limit)
    })
    .await;

    match listed {
        Ok(products) => {
            let items = products.iter().map(dto::product_to_json).collect::<Vec<_>>();
            (StatusCode::OK, Json(items)).into_response()
        }
        Err(resp) => resp,
    }
}

pub async fn get_product(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> Response {
    let id = match parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    match call_service(services, move |s| s.products.get_product_by_id(id)).await {
        Ok(product) => product_response(StatusCode::OK, &product),
        Err(resp) => resp,
    }
}

pub async fn update_product(
    Extension(services): Extension<Arc<AppServices>>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<String>,
    body: Result<Json<dto::UpdateProductRequest>, JsonRejection>,
) -> Response {
    let id = match parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let Json(body) = match body {
        Ok(b) => b,
        Err(e) => return errors::validation_error(e.body_text()),
    };
    if let Err(msg) = body.validate() {
        return errors::validation_error(msg);
    }

    let updated = call_service(services, move |s| {
        s.products.update_product(id, body.name.as_deref(), body.stock)
    })
    .await;

    match updated {
        Ok(product) => {
            tracing::debug!(user = user.username(), product_id = %id, "update_product");
            product_response(StatusCode::OK, &product)
        }
        Err(resp) => resp,
    }
}

pub async fn delete_product(
    Extension(services): Extension<Arc<AppServices>>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<String>,
) -> Response {
    let id = match parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    match call_service(services, move |s| s.products.delete_product(id)).await {
        Ok(()) => {
            tracing::debug!(user = user.username(), product_id = %id, "delete_product");
            StatusCode::NO_CONTENT.into_response()
        }
        Err(resp) => resp,
    }
}

pub async fn increment_stock(
    Extension(services): Extension<Arc<AppServices>>,
    CurrentUser(_user): CurrentUser,
    Path(id): Path<String>,
    body: Bytes,
) -> Response {
    let (id, amount) = match parse_adjustment_request(&id, &body) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    match call_service(services, move |s| s.products.increment_stock(id, amount)).await {
        Ok(product) => product_response(StatusCode::OK, &product),
        Err(resp) => resp,
    }
}

pub async fn decrement_stock(
    Extension(services): Extension<Arc<AppServices>>,
    CurrentUser(_user): CurrentUser,
    Path(id): Path<String>,
    body: Bytes,
) -> Response {
    let (id, amount) = match parse_adjustment_request(&id, &body) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    match call_service(services, move |s| s.products.decrement_stock(id, amount)).await {
        Ok(product) => product_response(StatusCode::OK, &product),
        Err(resp) => resp,
    }
}

fn parse_adjustment_request(id: &str, body: &[u8]) -> Result<(ProductId, i64), Response> {
    let id = parse_id(id)?;
    let amount = dto::parse_adjustment(body).map_err(errors::validation_error)?;
    Ok((id, amount))
}
