use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};

use storefront_core::ProductId;
use storefront_problem::{RawFailure, RequestContext};

use crate::app::services::AppServices;
use crate::app::{dto, failure};

pub fn router() -> Router {
    Router::new()
        .route("/", post(create_product).get(list_products))
        .route("/:id", get(get_product))
}

pub async fn create_product(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<RequestContext>,
    Json(body): Json<dto::CreateProductRequest>,
) -> axum::response::Response {
    let new = match body.validate() {
        Ok(new) => new,
        Err(v) => return services.failures.respond(&ctx, &RawFailure::from(v)).await,
    };

    match services.catalog.insert_product(new).await {
        Ok(record) => {
            (StatusCode::CREATED, Json(dto::product_to_json(&record))).into_response()
        }
        Err(e) => services.failures.respond(&ctx, &failure::raw_failure(e)).await,
    }
}

pub async fn list_products(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<RequestContext>,
) -> axum::response::Response {
    match services.catalog.list_products().await {
        Ok(records) => {
            let items: Vec<_> = records.iter().map(dto::product_to_json).collect();
            (StatusCode::OK, Json(serde_json::json!({ "items": items }))).into_response()
        }
        Err(e) => services.failures.respond(&ctx, &failure::raw_failure(e)).await,
    }
}

pub async fn get_product(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<RequestContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: ProductId = match id.parse() {
        Ok(v) => v,
        Err(_) => {
            return failure::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid product id");
        }
    };

    match services.catalog.get_product(id).await {
        Ok(Some(record)) => (StatusCode::OK, Json(dto::product_to_json(&record))).into_response(),
        Ok(None) => failure::json_error(StatusCode::NOT_FOUND, "not_found", "product not found"),
        Err(e) => services.failures.respond(&ctx, &failure::raw_failure(e)).await,
    }
}
