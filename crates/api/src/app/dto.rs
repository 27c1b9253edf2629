//! Request/response DTOs, validation, and JSON mapping helpers.
//!
//! Validators run their field checks in declaration order so aggregated
//! messages come out deterministically. Every field defaults on
//! deserialization: a missing field is a validation failure ("required"),
//! not an extractor rejection.

use serde::Deserialize;

use storefront_core::{ValidationFailure, Violations};
use storefront_infra::catalog::{NewProduct, ProductRecord};
use storefront_infra::directory::{NewUser, UserRecord};

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CreateProductRequest {
    pub sku: String,
    pub name: Option<String>,
    pub price_cents: i64,
    pub category: Option<String>,
}

impl CreateProductRequest {
    /// Validate the payload shape.
    ///
    /// Column-level concerns (lengths, uniqueness, the NOT NULL name) are
    /// left to the store; this only checks what a client can fix by reading
    /// the message.
    pub fn validate(self) -> Result<NewProduct, ValidationFailure> {
        let mut violations = Violations::new();

        if self.sku.is_empty() {
            violations.push("sku", "required");
        } else if !self
            .sku
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-')
        {
            violations.push("sku", "may only contain letters, digits and dashes");
        }

        if self.price_cents < 0 {
            violations.push("price_cents", "must not be negative");
        }

        violations.into_result()?;
        Ok(NewProduct {
            sku: self.sku,
            name: self.name,
            price_cents: self.price_cents,
            category: self.category,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RegisterUserRequest {
    pub email: String,
    pub display_name: Option<String>,
}

impl RegisterUserRequest {
    pub fn validate(self) -> Result<NewUser, ValidationFailure> {
        let mut violations = Violations::new();

        if self.email.is_empty() {
            violations.push("email", "required");
        }
        if !is_email(&self.email) {
            violations.push("email", "invalid format");
        }

        if let Some(name) = &self.display_name {
            if name.trim().is_empty() {
                violations.push("display_name", "must not be blank");
            }
        }

        violations.into_result()?;
        Ok(NewUser {
            email: self.email,
            display_name: self.display_name,
        })
    }
}

// Deliberately shallow: one '@' with a plausible domain part. Anything
// stricter belongs to a confirmation mail, not a regex.
fn is_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
}

// -------------------------
// Response mapping
// -------------------------

pub fn product_to_json(record: &ProductRecord) -> serde_json::Value {
    serde_json::json!({
        "id": record.id.to_string(),
        "sku": record.sku,
        "name": record.name,
        "price_cents": record.price_cents,
        "category": record.category,
        "created_at": record.created_at.to_rfc3339(),
    })
}

pub fn user_to_json(record: &UserRecord) -> serde_json::Value {
    serde_json::json!({
        "id": record.id.to_string(),
        "email": record.email,
        "display_name": record.display_name,
        "created_at": record.created_at.to_rfc3339(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries(failure: &ValidationFailure) -> Vec<(String, String)> {
        failure
            .violations()
            .iter()
            .map(|v| (v.field.clone(), v.message.clone()))
            .collect()
    }

    #[test]
    fn empty_email_collects_required_then_format() {
        let req = RegisterUserRequest {
            email: String::new(),
            display_name: None,
        };
        let failure = req.validate().unwrap_err();
        assert_eq!(
            entries(&failure),
            [
                ("email".to_string(), "required".to_string()),
                ("email".to_string(), "invalid format".to_string()),
            ]
        );
    }

    #[test]
    fn malformed_email_is_a_single_violation() {
        let req = RegisterUserRequest {
            email: "not-an-email".to_string(),
            display_name: None,
        };
        let failure = req.validate().unwrap_err();
        assert_eq!(
            entries(&failure),
            [("email".to_string(), "invalid format".to_string())]
        );
    }

    #[test]
    fn valid_user_payload_maps_through() {
        let req = RegisterUserRequest {
            email: "sam@example.com".to_string(),
            display_name: Some("Sam".to_string()),
        };
        let new = req.validate().unwrap();
        assert_eq!(new.email, "sam@example.com");
    }

    #[test]
    fn product_checks_run_in_declaration_order() {
        let req = CreateProductRequest {
            sku: String::new(),
            name: None,
            price_cents: -5,
            category: None,
        };
        let failure = req.validate().unwrap_err();
        assert_eq!(
            entries(&failure),
            [
                ("sku".to_string(), "required".to_string()),
                ("price_cents".to_string(), "must not be negative".to_string()),
            ]
        );
    }

    #[test]
    fn sku_charset_is_enforced() {
        let req = CreateProductRequest {
            sku: "SKU 001!".to_string(),
            name: Some("Widget".to_string()),
            price_cents: 100,
            category: None,
        };
        let failure = req.validate().unwrap_err();
        assert_eq!(failure.violations().len(), 1);
        assert_eq!(failure.violations()[0].field, "sku");
    }

    #[test]
    fn missing_name_passes_validation() {
        // NOT NULL is the store's concern, not the validator's.
        let req = CreateProductRequest {
            sku: "SKU-001".to_string(),
            name: None,
            price_cents: 100,
            category: None,
        };
        assert!(req.validate().is_ok());
    }
}
