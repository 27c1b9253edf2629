use axum::middleware::Next;

use storefront_problem::{RequestContext, cancel_pair};

/// Attach the per-request [`RequestContext`] (path + cancellation signal).
///
/// Axum cancels abandoned requests by dropping their future; the explicit
/// signal exists for response sinks that must observe cancellation at the
/// write boundary, and for tests. The handle lives exactly as long as the
/// request.
pub async fn request_context(
    mut req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> axum::response::Response {
    let (_cancel, signal) = cancel_pair();

    let ctx = RequestContext::new(req.uri().path().to_string(), signal);
    req.extensions_mut().insert(ctx);

    next.run(req).await
}
