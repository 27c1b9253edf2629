//! Pipeline adapter: one failure in, one outcome out.

use crate::aggregate::aggregate;
use crate::classify::classify;
use crate::context::RequestContext;
use crate::document;
use crate::failure::RawFailure;
use crate::kind::{Kind, ResponseTemplates};
use crate::sink::ResponseSink;

/// What the adapter did with a failure.
///
/// Deliberately distinct from the sink's write result: "not mine" and
/// "written" must never share a channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// A document was built and accepted by the sink.
    Handled,
    /// The failure is outside this layer's taxonomy; an outer handler
    /// should respond instead.
    NotApplicable,
}

/// Normalizes classifiable failures into problem documents.
///
/// Holds only the immutable template table; no state survives an
/// invocation, so a single handler serves concurrent requests without
/// synchronization.
#[derive(Debug, Clone, Default)]
pub struct ProblemFailureHandler {
    templates: ResponseTemplates,
}

impl ProblemFailureHandler {
    pub fn new(templates: ResponseTemplates) -> Self {
        Self { templates }
    }

    /// Handle one failure for one request.
    ///
    /// Unclassified failures short-circuit to [`Outcome::NotApplicable`]
    /// without touching the sink. For everything else a document is built
    /// and written; the sink's error, if any, is returned verbatim.
    pub async fn handle<S: ResponseSink>(
        &self,
        context: &RequestContext,
        failure: &RawFailure,
        sink: &S,
    ) -> Result<Outcome, S::Error> {
        let kind = classify(failure);
        if kind == Kind::Unclassified {
            return Ok(Outcome::NotApplicable);
        }

        let fields = match failure {
            RawFailure::Validation(validation) => Some(aggregate(validation.violations())),
            _ => None,
        };

        let document = document::build(&self.templates, kind, context.path(), fields);
        sink.write(context, &document).await?;
        Ok(Outcome::Handled)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use storefront_core::{ConstraintViolation, FieldViolation, ValidationFailure};

    use super::*;
    use crate::context::CancelSignal;
    use crate::document::ErrorDocument;

    #[derive(Debug, thiserror::Error)]
    #[error("sink refused the write")]
    struct RefusedWrite;

    #[derive(Debug, Default)]
    struct RecordingSink {
        written: Mutex<Vec<ErrorDocument>>,
        fail: bool,
    }

    #[async_trait]
    impl ResponseSink for RecordingSink {
        type Error = RefusedWrite;

        async fn write(
            &self,
            _context: &RequestContext,
            document: &ErrorDocument,
        ) -> Result<(), RefusedWrite> {
            if self.fail {
                return Err(RefusedWrite);
            }
            self.written.lock().unwrap().push(document.clone());
            Ok(())
        }
    }

    fn ctx(path: &str) -> RequestContext {
        RequestContext::new(path, CancelSignal::never())
    }

    fn handler() -> ProblemFailureHandler {
        ProblemFailureHandler::new(ResponseTemplates::new())
    }

    #[tokio::test]
    async fn unique_violation_becomes_a_conflict_document() {
        let sink = RecordingSink::default();
        let failure = RawFailure::Constraint(ConstraintViolation::Unique {
            constraint: Some("ux_products_sku".to_string()),
        });

        let outcome = handler()
            .handle(&ctx("/api/products"), &failure, &sink)
            .await
            .unwrap();
        assert_eq!(outcome, Outcome::Handled);

        let written = sink.written.lock().unwrap();
        assert_eq!(written.len(), 1);
        let doc = &written[0];
        assert_eq!(doc.status, 409);
        assert_eq!(doc.title, "Unique Constraint Violation");
        assert_eq!(doc.detail, "A unique constraint violation occurred.");
        assert_eq!(doc.instance, "/api/products");
        assert!(doc.extensions.is_none());
    }

    #[tokio::test]
    async fn validation_failure_carries_aggregated_fields() {
        let sink = RecordingSink::default();
        let failure = RawFailure::Validation(ValidationFailure::new(vec![
            FieldViolation::new("Email", "required"),
            FieldViolation::new("Email", "invalid format"),
        ]));

        let outcome = handler()
            .handle(&ctx("/api/users"), &failure, &sink)
            .await
            .unwrap();
        assert_eq!(outcome, Outcome::Handled);

        let written = sink.written.lock().unwrap();
        let doc = &written[0];
        assert_eq!(doc.status, 400);
        assert_eq!(doc.title, "Validation Error");
        assert_eq!(doc.instance, "/api/users");
        let errors = &doc.extensions.as_ref().unwrap().errors;
        assert_eq!(errors.get("Email").unwrap(), ["required", "invalid format"]);
    }

    #[tokio::test]
    async fn unclassified_failure_is_not_applicable_and_leaves_the_sink_untouched() {
        let sink = RecordingSink::default();
        let failure = RawFailure::Other(anyhow::anyhow!("boom"));

        let outcome = handler()
            .handle(&ctx("/api/products"), &failure, &sink)
            .await
            .unwrap();
        assert_eq!(outcome, Outcome::NotApplicable);
        assert!(sink.written.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn sink_error_is_surfaced_verbatim() {
        let sink = RecordingSink {
            fail: true,
            ..Default::default()
        };
        let failure = RawFailure::Constraint(ConstraintViolation::NullValue {
            column: Some("name".to_string()),
        });

        let err = handler()
            .handle(&ctx("/api/products"), &failure, &sink)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "sink refused the write");
    }

    #[tokio::test]
    async fn handler_is_reusable_across_invocations() {
        let sink = RecordingSink::default();
        let h = handler();
        for _ in 0..3 {
            let failure = RawFailure::Constraint(ConstraintViolation::NumericOverflow {
                column: Some("price_cents".to_string()),
            });
            let outcome = h.handle(&ctx("/api/products"), &failure, &sink).await.unwrap();
            assert_eq!(outcome, Outcome::Handled);
        }
        assert_eq!(sink.written.lock().unwrap().len(), 3);
    }
}
