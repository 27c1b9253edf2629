//! Structured persistence constraint failures.

use thiserror::Error;

/// A database constraint violation, already translated out of the backend's
/// raw error representation.
///
/// `constraint` / `column` carry the backend-reported object name where one
/// is available. They are operator context only and must never reach the
/// client-facing response.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConstraintViolation {
    /// A UNIQUE index or constraint rejected the write.
    #[error("unique constraint violated")]
    Unique { constraint: Option<String> },

    /// A NOT NULL column received a null value.
    #[error("null value in non-null column")]
    NullValue { column: Option<String> },

    /// A value exceeded a column's length limit.
    #[error("value too long for column")]
    MaxLength { column: Option<String> },

    /// A numeric value fell outside a column's range.
    #[error("numeric value out of column range")]
    NumericOverflow { column: Option<String> },

    /// A foreign-key reference constraint rejected the write.
    #[error("reference constraint violated")]
    Reference { constraint: Option<String> },
}
