//! Product catalog store.

use std::sync::RwLock;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use storefront_core::{ConstraintViolation, ProductId};

use crate::error::StoreError;

/// Column limits of the `products` table, mirrored by the in-memory backend
/// so the same failures occur without a database.
pub const SKU_MAX_LEN: usize = 64;
pub const NAME_MAX_LEN: usize = 120;
/// `price_cents` is a NUMERIC(10,0) column.
pub const PRICE_CENTS_MAX: i64 = 9_999_999_999;

#[derive(Debug, Clone, PartialEq)]
pub struct ProductRecord {
    pub id: ProductId,
    pub sku: String,
    pub name: String,
    pub price_cents: i64,
    pub category: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Insert payload.
///
/// `name` is optional here because NOT NULL is a column constraint, not a
/// validation rule; the API layer's validators deliberately leave it to the
/// store so the constraint path stays exercised.
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub sku: String,
    pub name: Option<String>,
    pub price_cents: i64,
    pub category: Option<String>,
}

#[async_trait]
pub trait CatalogStore: Send + Sync {
    async fn insert_product(&self, new: NewProduct) -> Result<ProductRecord, StoreError>;
    async fn list_products(&self) -> Result<Vec<ProductRecord>, StoreError>;
    async fn get_product(&self, id: ProductId) -> Result<Option<ProductRecord>, StoreError>;
}

/// In-memory catalog enforcing the same constraints as the Postgres schema.
///
/// Intended for tests/dev. Not optimized for performance.
#[derive(Debug)]
pub struct InMemoryCatalog {
    products: RwLock<Vec<ProductRecord>>,
    categories: Vec<String>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::with_categories(
            ["general", "hardware", "perishable"]
                .map(str::to_string)
                .to_vec(),
        )
    }

    /// Catalog whose category reference check accepts exactly `categories`.
    pub fn with_categories(categories: Vec<String>) -> Self {
        Self {
            products: RwLock::new(Vec::new()),
            categories,
        }
    }
}

impl Default for InMemoryCatalog {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CatalogStore for InMemoryCatalog {
    async fn insert_product(&self, new: NewProduct) -> Result<ProductRecord, StoreError> {
        if new.sku.len() > SKU_MAX_LEN {
            return Err(ConstraintViolation::MaxLength {
                column: Some("sku".to_string()),
            }
            .into());
        }

        let name = match new.name {
            Some(name) => name,
            None => {
                return Err(ConstraintViolation::NullValue {
                    column: Some("name".to_string()),
                }
                .into());
            }
        };
        if name.len() > NAME_MAX_LEN {
            return Err(ConstraintViolation::MaxLength {
                column: Some("name".to_string()),
            }
            .into());
        }

        if new.price_cents > PRICE_CENTS_MAX || new.price_cents < -PRICE_CENTS_MAX {
            return Err(ConstraintViolation::NumericOverflow {
                column: Some("price_cents".to_string()),
            }
            .into());
        }

        if let Some(category) = &new.category {
            if !self.categories.contains(category) {
                return Err(ConstraintViolation::Reference {
                    constraint: Some("fk_products_category".to_string()),
                }
                .into());
            }
        }

        let mut products = self
            .products
            .write()
            .map_err(|_| StoreError::Backend("lock poisoned".to_string()))?;

        if products.iter().any(|p| p.sku == new.sku) {
            return Err(ConstraintViolation::Unique {
                constraint: Some("ux_products_sku".to_string()),
            }
            .into());
        }

        let record = ProductRecord {
            id: ProductId::new(),
            sku: new.sku,
            name,
            price_cents: new.price_cents,
            category: new.category,
            created_at: Utc::now(),
        };
        products.push(record.clone());
        Ok(record)
    }

    async fn list_products(&self) -> Result<Vec<ProductRecord>, StoreError> {
        let products = self
            .products
            .read()
            .map_err(|_| StoreError::Backend("lock poisoned".to_string()))?;
        Ok(products.clone())
    }

    async fn get_product(&self, id: ProductId) -> Result<Option<ProductRecord>, StoreError> {
        let products = self
            .products
            .read()
            .map_err(|_| StoreError::Backend("lock poisoned".to_string()))?;
        Ok(products.iter().find(|p| p.id == id).cloned())
    }
}
