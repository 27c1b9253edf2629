//! Grouping of per-field validation messages.

use serde::ser::{Serialize, SerializeMap, Serializer};

use storefront_core::FieldViolation;

/// Ordered `field -> messages` mapping produced by [`aggregate`].
///
/// Iteration (and JSON serialization) follows first-appearance order of the
/// field names; messages keep their input order and are not deduplicated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    entries: Vec<(String, Vec<String>)>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of distinct fields.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Messages recorded for `field`, if any. Lookup is case-sensitive.
    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|(f, _)| f == field)
            .map(|(_, messages)| messages.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(f, messages)| (f.as_str(), messages.as_slice()))
    }

    fn push(&mut self, field: &str, message: String) {
        match self.entries.iter_mut().find(|(f, _)| f == field) {
            Some((_, messages)) => messages.push(message),
            None => self.entries.push((field.to_string(), vec![message])),
        }
    }
}

impl Serialize for FieldErrors {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (field, messages) in &self.entries {
            map.serialize_entry(field, messages)?;
        }
        map.end()
    }
}

/// Group violations by exact field name.
///
/// First appearance of a field decides its position; messages within a
/// field keep input order and duplicates are retained. Empty input yields
/// an empty mapping.
pub fn aggregate(violations: &[FieldViolation]) -> FieldErrors {
    let mut errors = FieldErrors::new();
    for violation in violations {
        errors.push(&violation.field, violation.message.clone());
    }
    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    fn violation(field: &str, message: &str) -> FieldViolation {
        FieldViolation::new(field, message)
    }

    #[test]
    fn groups_by_field_preserving_first_seen_order() {
        let errors = aggregate(&[
            violation("name", "required"),
            violation("price", "must be positive"),
            violation("name", "too long"),
        ]);

        let fields: Vec<&str> = errors.iter().map(|(f, _)| f).collect();
        assert_eq!(fields, ["name", "price"]);
        assert_eq!(errors.get("name").unwrap(), ["required", "too long"]);
        assert_eq!(errors.get("price").unwrap(), ["must be positive"]);
    }

    #[test]
    fn duplicate_messages_are_retained() {
        let errors = aggregate(&[
            violation("sku", "required"),
            violation("sku", "required"),
        ]);
        assert_eq!(errors.get("sku").unwrap(), ["required", "required"]);
    }

    #[test]
    fn empty_input_yields_empty_mapping() {
        let errors = aggregate(&[]);
        assert!(errors.is_empty());
        assert_eq!(errors.len(), 0);
    }

    #[test]
    fn field_names_are_case_sensitive() {
        let errors = aggregate(&[
            violation("Email", "required"),
            violation("email", "invalid format"),
        ]);
        assert_eq!(errors.len(), 2);
        assert_eq!(errors.get("Email").unwrap(), ["required"]);
        assert_eq!(errors.get("email").unwrap(), ["invalid format"]);
    }

    #[test]
    fn serializes_as_an_ordered_json_object() {
        let errors = aggregate(&[
            violation("Email", "required"),
            violation("Email", "invalid format"),
        ]);
        let json = serde_json::to_string(&errors).unwrap();
        assert_eq!(json, r#"{"Email":["required","invalid format"]}"#);

        let errors = aggregate(&[
            violation("zeta", "a"),
            violation("alpha", "b"),
        ]);
        // First-appearance order, not lexicographic.
        assert_eq!(
            serde_json::to_string(&errors).unwrap(),
            r#"{"zeta":["a"],"alpha":["b"]}"#
        );
    }

    mod properties {
        use proptest::prelude::*;

        use super::*;

        proptest! {
            /// Messages for a single field survive grouping unchanged.
            #[test]
            fn per_field_message_order_is_preserved(
                messages in proptest::collection::vec("[a-z ]{1,12}", 0..8)
            ) {
                let violations: Vec<FieldViolation> = messages
                    .iter()
                    .map(|m| FieldViolation::new("field", m.clone()))
                    .collect();
                let errors = aggregate(&violations);
                if messages.is_empty() {
                    prop_assert!(errors.is_empty());
                } else {
                    prop_assert_eq!(errors.get("field").unwrap(), &messages[..]);
                }
            }

            /// Grouping never drops or invents messages.
            #[test]
            fn total_message_count_is_invariant(
                entries in proptest::collection::vec(("[a-c]", "[a-z]{1,6}"), 0..32)
            ) {
                let violations: Vec<FieldViolation> = entries
                    .iter()
                    .map(|(f, m)| FieldViolation::new(f.clone(), m.clone()))
                    .collect();
                let errors = aggregate(&violations);

                let total: usize = errors.iter().map(|(_, m)| m.len()).sum();
                prop_assert_eq!(total, entries.len());

                // Key order equals first-appearance order of the input fields.
                let mut expected: Vec<&str> = Vec::new();
                for (field, _) in &entries {
                    if !expected.contains(&field.as_str()) {
                        expected.push(field);
                    }
                }
                let actual: Vec<&str> = errors.iter().map(|(f, _)| f).collect();
                prop_assert_eq!(actual, expected);
            }
        }
    }
}
