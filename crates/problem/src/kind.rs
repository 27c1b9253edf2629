//! The closed failure taxonomy and its fixed response templates.

/// Classification of a raw failure.
///
/// Closed by design: a new variant is added here and given a template in
/// [`ResponseTemplates`] in the same change, so the taxonomy and the
/// response shapes can never drift apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    ValidationFailed,
    UniqueConstraintViolation,
    NullValueViolation,
    MaxLengthExceeded,
    NumericOverflow,
    ReferenceConstraintViolation,
    /// Outside this layer's taxonomy; deferred to an outer handler.
    Unclassified,
}

/// Fixed `(status, title, detail)` triple for one classifiable [`Kind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResponseTemplate {
    pub status: u16,
    pub title: &'static str,
    pub detail: &'static str,
}

/// Immutable template table, passed into the pipeline adapter.
///
/// A plain value rather than a process-wide static: each handler owns its
/// copy and tests construct the table in isolation. The triples themselves
/// are compile-time constants and never vary at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResponseTemplates {
    validation_failed: ResponseTemplate,
    unique_constraint: ResponseTemplate,
    null_value: ResponseTemplate,
    max_length: ResponseTemplate,
    numeric_overflow: ResponseTemplate,
    reference_constraint: ResponseTemplate,
}

impl ResponseTemplates {
    pub const fn new() -> Self {
        Self {
            validation_failed: ResponseTemplate {
                status: 400,
                title: "Validation Error",
                detail: "One or more validation errors occurred.",
            },
            unique_constraint: ResponseTemplate {
                status: 409,
                title: "Unique Constraint Violation",
                detail: "A unique constraint violation occurred.",
            },
            null_value: ResponseTemplate {
                status: 400,
                title: "Null Value Error",
                detail: "A required field was null.",
            },
            max_length: ResponseTemplate {
                status: 400,
                title: "Max Length Exceeded",
                detail: "A value exceeded the maximum allowed length.",
            },
            numeric_overflow: ResponseTemplate {
                status: 400,
                title: "Numeric Overflow",
                detail: "A numeric value caused an overflow.",
            },
            reference_constraint: ResponseTemplate {
                status: 400,
                title: "Reference Constraint Violation",
                detail: "A foreign key reference constraint was violated.",
            },
        }
    }

    /// Template for `kind`, or `None` for [`Kind::Unclassified`].
    pub fn lookup(&self, kind: Kind) -> Option<ResponseTemplate> {
        match kind {
            Kind::ValidationFailed => Some(self.validation_failed),
            Kind::UniqueConstraintViolation => Some(self.unique_constraint),
            Kind::NullValueViolation => Some(self.null_value),
            Kind::MaxLengthExceeded => Some(self.max_length),
            Kind::NumericOverflow => Some(self.numeric_overflow),
            Kind::ReferenceConstraintViolation => Some(self.reference_constraint),
            Kind::Unclassified => None,
        }
    }
}

impl Default for ResponseTemplates {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn templates_match_the_fixed_table() {
        let templates = ResponseTemplates::new();
        let cases = [
            (
                Kind::ValidationFailed,
                400u16,
                "Validation Error",
                "One or more validation errors occurred.",
            ),
            (
                Kind::UniqueConstraintViolation,
                409,
                "Unique Constraint Violation",
                "A unique constraint violation occurred.",
            ),
            (
                Kind::NullValueViolation,
                400,
                "Null Value Error",
                "A required field was null.",
            ),
            (
                Kind::MaxLengthExceeded,
                400,
                "Max Length Exceeded",
                "A value exceeded the maximum allowed length.",
            ),
            (
                Kind::NumericOverflow,
                400,
                "Numeric Overflow",
                "A numeric value caused an overflow.",
            ),
            (
                Kind::ReferenceConstraintViolation,
                400,
                "Reference Constraint Violation",
                "A foreign key reference constraint was violated.",
            ),
        ];

        for (kind, status, title, detail) in cases {
            let template = templates.lookup(kind).unwrap();
            assert_eq!(template.status, status, "{kind:?}");
            assert_eq!(template.title, title, "{kind:?}");
            assert_eq!(template.detail, detail, "{kind:?}");
        }
    }

    #[test]
    fn unclassified_has_no_template() {
        assert!(ResponseTemplates::new().lookup(Kind::Unclassified).is_none());
    }
}
