use std::sync::Arc;

use axum::{
    Json, Router,
    extract::Extension,
    http::StatusCode,
    response::IntoResponse,
    routing::post,
};

use storefront_problem::{RawFailure, RequestContext};

use crate::app::services::AppServices;
use crate::app::{dto, failure};

pub fn router() -> Router {
    Router::new().route("/", post(register_user).get(list_users))
}

pub async fn register_user(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<RequestContext>,
    Json(body): Json<dto::RegisterUserRequest>,
) -> axum::response::Response {
    let new = match body.validate() {
        Ok(new) => new,
        Err(v) => return services.failures.respond(&ctx, &RawFailure::from(v)).await,
    };

    match services.directory.insert_user(new).await {
        Ok(record) => (StatusCode::CREATED, Json(dto::user_to_json(&record))).into_response(),
        Err(e) => services.failures.respond(&ctx, &failure::raw_failure(e)).await,
    }
}

pub async fn list_users(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<RequestContext>,
) -> axum::response::Response {
    match services.directory.list_users().await {
        Ok(records) => {
            let items: Vec<_> = records.iter().map(dto::user_to_json).collect();
            (StatusCode::OK, Json(serde_json::json!({ "items": items }))).into_response()
        }
        Err(e) => services.failures.respond(&ctx, &failure::raw_failure(e)).await,
    }
}
