//! `storefront-infra` — persistence collaborators.
//!
//! Store traits with in-memory (tests/dev) and Postgres (`sqlx`) backends,
//! plus the translation of backend constraint errors into the structured
//! [`storefront_core::ConstraintViolation`] vocabulary. The in-memory
//! backends enforce the same column constraints as the Postgres schema so
//! every constraint failure is reachable without a database.

pub mod catalog;
pub mod directory;
pub mod error;
pub mod postgres;

pub use catalog::{CatalogStore, InMemoryCatalog, NewProduct, ProductRecord};
pub use directory::{DirectoryStore, InMemoryDirectory, NewUser, UserRecord};
pub use error::StoreError;
pub use postgres::{PostgresCatalog, PostgresDirectory};
