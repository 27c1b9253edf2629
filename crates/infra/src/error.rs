//! Store error model.

use thiserror::Error;

use storefront_core::ConstraintViolation;

/// Failure of a store operation.
///
/// Constraint violations are kept structured so the API layer can normalize
/// them; everything else collapses into `Backend` with an operator-facing
/// message.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A database constraint rejected the write.
    #[error(transparent)]
    Constraint(#[from] ConstraintViolation),

    /// The backend failed or is unreachable.
    #[error("storage backend failure: {0}")]
    Backend(String),
}
