//! Failure pipeline: the ordered handler chain, the problem sink, and the
//! outer fallback response.

use std::sync::Mutex;

use async_trait::async_trait;
use axum::Json;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};

use storefront_infra::StoreError;
use storefront_problem::{
    ErrorDocument, Outcome, ProblemFailureHandler, RawFailure, RequestContext, ResponseSink,
    ResponseTemplates,
};

/// Why a sink write did not happen.
#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    #[error("response write cancelled")]
    Cancelled,

    #[error("failed to serialize problem document: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Sink that renders the document as an `application/problem+json` response
/// and parks it until the pipeline hands it back to axum.
///
/// One sink per failed request; never shared across requests.
#[derive(Debug, Default)]
pub struct BufferedProblemSink {
    slot: Mutex<Option<Response>>,
}

impl BufferedProblemSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// The response produced by a successful write, if one happened.
    pub fn take(&self) -> Option<Response> {
        match self.slot.lock() {
            Ok(mut slot) => slot.take(),
            Err(poisoned) => poisoned.into_inner().take(),
        }
    }
}

#[async_trait]
impl ResponseSink for BufferedProblemSink {
    type Error = SinkError;

    async fn write(
        &self,
        context: &RequestContext,
        document: &ErrorDocument,
    ) -> Result<(), SinkError> {
        if context.cancellation().is_cancelled() {
            return Err(SinkError::Cancelled);
        }

        let body = serde_json::to_vec(document)?;

        let mut response = Response::new(axum::body::Body::from(body));
        // Statuses come from the fixed template table and are always valid.
        *response.status_mut() =
            StatusCode::from_u16(document.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        response.headers_mut().insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/problem+json"),
        );

        let mut slot = match self.slot.lock() {
            Ok(slot) => slot,
            Err(poisoned) => poisoned.into_inner(),
        };
        *slot = Some(response);
        Ok(())
    }
}

/// One link in the failure-normalization chain.
#[async_trait]
pub trait FailureHandler: Send + Sync {
    async fn handle(
        &self,
        context: &RequestContext,
        failure: &RawFailure,
        sink: &BufferedProblemSink,
    ) -> Result<Outcome, SinkError>;
}

/// Chain link backed by the problem normalization adapter.
struct ProblemLink {
    handler: ProblemFailureHandler,
}

#[async_trait]
impl FailureHandler for ProblemLink {
    async fn handle(
        &self,
        context: &RequestContext,
        failure: &RawFailure,
        sink: &BufferedProblemSink,
    ) -> Result<Outcome, SinkError> {
        self.handler.handle(context, failure, sink).await
    }
}

/// Ordered failure-handler chain with a fixed generic fallback.
///
/// Handlers are tried in registration order until one reports `Handled`;
/// failures nobody claims get the outer default response.
pub struct FailurePipeline {
    handlers: Vec<Box<dyn FailureHandler>>,
}

impl FailurePipeline {
    /// The standard chain: problem normalization, nothing else yet.
    pub fn standard() -> Self {
        Self {
            handlers: vec![Box::new(ProblemLink {
                handler: ProblemFailureHandler::new(ResponseTemplates::new()),
            })],
        }
    }

    /// Run the chain for one failure and produce the response to send.
    pub async fn respond(&self, context: &RequestContext, failure: &RawFailure) -> Response {
        let sink = BufferedProblemSink::new();

        for handler in &self.handlers {
            match handler.handle(context, failure, &sink).await {
                Ok(Outcome::Handled) => match sink.take() {
                    Some(response) => return response,
                    None => {
                        tracing::error!(
                            path = context.path(),
                            "handler reported Handled but wrote no response"
                        );
                        return fallback_response();
                    }
                },
                Ok(Outcome::NotApplicable) => continue,
                Err(err) => {
                    tracing::error!(
                        path = context.path(),
                        error = %err,
                        "problem response write failed"
                    );
                    return fallback_response();
                }
            }
        }

        tracing::warn!(path = context.path(), failure = %failure, "unclassified request failure");
        fallback_response()
    }
}

/// Outer default response when no handler claims the failure.
///
/// Deliberately generic: internal error text must never reach the client.
pub fn fallback_response() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(serde_json::json!({
            "error": "internal_error",
            "message": "an unexpected error occurred",
        })),
    )
        .into_response()
}

pub fn json_error(status: StatusCode, code: &'static str, message: impl Into<String>) -> Response {
    (
        status,
        Json(serde_json::json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}

/// Lift a store failure into the transport failure union.
pub fn raw_failure(err: StoreError) -> RawFailure {
    match err {
        StoreError::Constraint(violation) => RawFailure::Constraint(violation),
        other => RawFailure::Other(anyhow::Error::new(other)),
    }
}
