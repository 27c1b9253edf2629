//! The transport-facing failure union.

use thiserror::Error;

use storefront_core::{ConstraintViolation, ValidationFailure};

/// A failure raised while processing one request, as assembled by the
/// transport layer.
///
/// The first two arms carry the structured failures the validation and
/// persistence collaborators produce. Everything else travels in `Other`,
/// which this layer never inspects; it exists so unrecognized failures can
/// flow through to an outer handler intact.
#[derive(Debug, Error)]
pub enum RawFailure {
    #[error(transparent)]
    Validation(#[from] ValidationFailure),

    #[error(transparent)]
    Constraint(#[from] ConstraintViolation),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
