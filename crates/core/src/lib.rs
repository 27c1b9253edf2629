//! `storefront-core` — shared failure vocabulary and identifiers.
//!
//! This crate contains the **pure** types the rest of the workspace agrees
//! on: the structured failures produced by the validation and persistence
//! layers, and the strongly-typed ids. No transport or storage concerns.

pub mod constraint;
pub mod id;
pub mod validation;

pub use constraint::ConstraintViolation;
pub use id::{InvalidId, ProductId, UserId};
pub use validation::{FieldViolation, ValidationFailure, Violations};
