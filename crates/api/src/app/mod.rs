//! HTTP application wiring (axum router + services).
//!
//! Layout mirrors the rest of the workspace's conventions:
//! - `services.rs`: store selection + failure pipeline wiring
//! - `routes/`: HTTP routes + handlers (one file per resource)
//! - `dto.rs`: request/response DTOs, validation, JSON mapping helpers
//! - `failure.rs`: failure pipeline, response sink, fallback response

use std::sync::Arc;

use axum::{Extension, Router, routing::get};
use tower::ServiceBuilder;

use crate::middleware;

pub mod dto;
pub mod failure;
pub mod routes;
pub mod services;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub async fn build_app() -> Router {
    let services = Arc::new(services::build_services().await);

    Router::new()
        .route("/health", get(routes::system::health))
        .nest("/api", routes::router())
        .layer(
            // Outermost first: the request context must exist before any
            // handler can fail.
            ServiceBuilder::new()
                .layer(axum::middleware::from_fn(middleware::request_context))
                .layer(Extension(services)),
        )
}
