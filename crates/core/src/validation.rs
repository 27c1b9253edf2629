//! Per-field validation failures.
//!
//! Validators emit one [`FieldViolation`] per failed rule, in the order the
//! rules ran. Downstream aggregation relies on that order being
//! deterministic, so validators must check fields in a fixed sequence.

use thiserror::Error;

/// A single failed validation rule for one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    pub field: String,
    pub message: String,
}

impl FieldViolation {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Validation failure for one request payload.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("validation failed ({} violations)", .violations.len())]
pub struct ValidationFailure {
    violations: Vec<FieldViolation>,
}

impl ValidationFailure {
    pub fn new(violations: Vec<FieldViolation>) -> Self {
        Self { violations }
    }

    /// The violations in the order the validator emitted them.
    pub fn violations(&self) -> &[FieldViolation] {
        &self.violations
    }
}

/// Collects rule failures while a validator runs.
#[derive(Debug, Default)]
pub struct Violations {
    violations: Vec<FieldViolation>,
}

impl Violations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.violations.push(FieldViolation::new(field, message));
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// `Ok(())` when every rule passed, the accumulated failure otherwise.
    pub fn into_result(self) -> Result<(), ValidationFailure> {
        if self.violations.is_empty() {
            Ok(())
        } else {
            Err(ValidationFailure::new(self.violations))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_collector_is_ok() {
        assert!(Violations::new().into_result().is_ok());
    }

    #[test]
    fn collector_keeps_push_order() {
        let mut violations = Violations::new();
        violations.push("email", "required");
        violations.push("email", "invalid format");
        violations.push("display_name", "must not be blank");

        let failure = violations.into_result().unwrap_err();
        let entries: Vec<(&str, &str)> = failure
            .violations()
            .iter()
            .map(|v| (v.field.as_str(), v.message.as_str()))
            .collect();
        assert_eq!(
            entries,
            [
                ("email", "required"),
                ("email", "invalid format"),
                ("display_name", "must not be blank"),
            ]
        );
    }
}
