//! `storefront-problem` — failure normalization for the HTTP API.
//!
//! Converts low-level persistence and validation failures into the stable
//! `application/problem+json` envelope returned to API clients, without
//! leaking internal error detail. Everything here is per-request and
//! stateless: classification, aggregation and document construction are
//! synchronous, allocation-only steps; the single suspension point is the
//! write into the [`ResponseSink`].
//!
//! Failures the taxonomy does not recognize are *not* errors of this layer.
//! The pipeline adapter reports them as [`Outcome::NotApplicable`] so an
//! outer handler can respond instead.

pub mod aggregate;
pub mod classify;
pub mod context;
pub mod document;
pub mod failure;
pub mod handler;
pub mod kind;
pub mod sink;

pub use aggregate::{FieldErrors, aggregate};
pub use classify::classify;
pub use context::{CancelHandle, CancelSignal, RequestContext, cancel_pair};
pub use document::{DocumentExtensions, ErrorDocument};
pub use failure::RawFailure;
pub use handler::{Outcome, ProblemFailureHandler};
pub use kind::{Kind, ResponseTemplate, ResponseTemplates};
pub use sink::ResponseSink;
