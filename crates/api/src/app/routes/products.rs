use axum::{
    extract::{rejection::JsonRejection, Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use catalog_core::ProductId;
use catalog_products::CatalogService;

use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/products", get(list_products).post(create_product))
        .route(
            "/products/:id",
            get(get_product).put(update_product).delete(delete_product),
        )
        .route("/products/by-date/:date", get(products_by_date))
        .route("/products/by-name/:name", get(products_by_name))
}

fn parse_id(raw: &str) -> Result<ProductId, axum::response::Response> {
    raw.parse::<ProductId>()
        .map_err(|_| errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid product id"))
}

pub async fn list_products(Extension(catalog): Extension<CatalogService>) -> axum::response::Response {
    match catalog.list().await {
        Ok(products) => (StatusCode::OK, Json(products)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn get_product(
    Extension(catalog): Extension<CatalogService>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match catalog.get(id).await {
        Ok(product) => (StatusCode::OK, Json(product)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn create_product(
    Extension(catalog): Extension<CatalogService>,
    body: Result<Json<dto::CreateProductRequest>, JsonRejection>,
) -> axum::response::Response {
    let Json(body) = match body {
        Ok(b) => b,
        Err(rejection) => return errors::json_rejection_to_response(rejection),
    };

    let input = match body.into_new_product() {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match catalog.create(input).await {
        Ok(product) => (StatusCode::CREATED, Json(product)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn update_product(
    Extension(catalog): Extension<CatalogService>,
    Path(id): Path<String>,
    body: Result<Json<dto::UpdateProductRequest>, JsonRejection>,
) -> axum::response::Response {
    let id = match parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let Json(body) = match body {
        Ok(b) => b,
        Err(rejection) => return errors::json_rejection_to_response(rejection),
    };

    match catalog.update(id, body.into()).await {
        Ok(product) => (StatusCode::OK, Json(product)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn delete_product(
    Extension(catalog): Extension<CatalogService>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match catalog.delete(id).await {
        Ok(_) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn products_by_date(
    Extension(catalog): Extension<CatalogService>,
    Path(date): Path<String>,
) -> axum::response::Response {
    let Some(date) = dto::parse_calendar_date(&date) else {
        return errors::json_error(
            StatusCode::BAD_REQUEST,
            "invalid_date",
            "date must be YYYY-MM-DD",
        );
    };

    match catalog.find_by_date(date).await {
        Ok(products) => (StatusCode::OK, Json(products)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn products_by_name(
    Extension(catalog): Extension<CatalogService>,
    Path(name): Path<String>,
) -> axum::response::Response {
    match catalog.find_by_name(&name).await {
        Ok(products) => (StatusCode::OK, Json(products)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}
