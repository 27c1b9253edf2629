//! Failure classification.

use storefront_core::ConstraintViolation;

use crate::failure::RawFailure;
use crate::kind::Kind;

/// Classify a raw failure into the closed taxonomy.
///
/// Total and deterministic: every input maps to exactly one [`Kind`], and
/// anything outside the recognized shapes maps to [`Kind::Unclassified`].
/// Classification itself cannot fail.
pub fn classify(failure: &RawFailure) -> Kind {
    match failure {
        RawFailure::Validation(_) => Kind::ValidationFailed,
        RawFailure::Constraint(violation) => match violation {
            ConstraintViolation::Unique { .. } => Kind::UniqueConstraintViolation,
            ConstraintViolation::NullValue { .. } => Kind::NullValueViolation,
            ConstraintViolation::MaxLength { .. } => Kind::MaxLengthExceeded,
            ConstraintViolation::NumericOverflow { .. } => Kind::NumericOverflow,
            ConstraintViolation::Reference { .. } => Kind::ReferenceConstraintViolation,
        },
        RawFailure::Other(_) => Kind::Unclassified,
    }
}
