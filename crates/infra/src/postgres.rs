//! Postgres-backed stores and constraint-error translation.
//!
//! Constraint failures surface from Postgres as SQLSTATE codes on the raw
//! database error; `map_sqlx_error` turns the recognized codes into the
//! structured [`ConstraintViolation`] vocabulary and collapses everything
//! else into an opaque backend failure.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::Row;
use sqlx::postgres::{PgDatabaseError, PgPool, PgRow};

use storefront_core::{ConstraintViolation, ProductId, UserId};

use crate::catalog::{CatalogStore, NewProduct, ProductRecord};
use crate::directory::{DirectoryStore, NewUser, UserRecord};
use crate::error::StoreError;

/// SQLSTATE codes that map onto structured constraint violations.
///
/// `constraint` / `column` are carried through when the backend reported
/// them; absence is normal (Postgres does not populate both for every
/// violation class).
fn violation_from_code(
    code: &str,
    constraint: Option<String>,
    column: Option<String>,
) -> Option<ConstraintViolation> {
    match code {
        "23505" => Some(ConstraintViolation::Unique { constraint }),
        "23502" => Some(ConstraintViolation::NullValue { column }),
        "22001" => Some(ConstraintViolation::MaxLength { column }),
        "22003" => Some(ConstraintViolation::NumericOverflow { column }),
        "23503" => Some(ConstraintViolation::Reference { constraint }),
        _ => None,
    }
}

/// Map a sqlx error into the store error model.
pub fn map_sqlx_error(operation: &str, err: sqlx::Error) -> StoreError {
    if let Some(db) = err.as_database_error() {
        let constraint = db.constraint().map(str::to_string);
        let column = db
            .try_downcast_ref::<PgDatabaseError>()
            .and_then(PgDatabaseError::column)
            .map(str::to_string);
        if let Some(code) = db.code() {
            if let Some(violation) = violation_from_code(code.as_ref(), constraint, column) {
                tracing::debug!(operation, code = %code, "translated constraint violation");
                return StoreError::Constraint(violation);
            }
        }
    }
    StoreError::Backend(format!("{operation}: {err}"))
}

fn product_from_row(row: &PgRow) -> Result<ProductRecord, sqlx::Error> {
    Ok(ProductRecord {
        id: ProductId::from_uuid(row.try_get("id")?),
        sku: row.try_get("sku")?,
        name: row.try_get("name")?,
        price_cents: row.try_get("price_cents")?,
        category: row.try_get("category")?,
        created_at: row.try_get("created_at")?,
    })
}

fn user_from_row(row: &PgRow) -> Result<UserRecord, sqlx::Error> {
    Ok(UserRecord {
        id: UserId::from_uuid(row.try_get("id")?),
        email: row.try_get("email")?,
        display_name: row.try_get("display_name")?,
        created_at: row.try_get("created_at")?,
    })
}

/// Catalog store backed by the `products` table.
#[derive(Debug, Clone)]
pub struct PostgresCatalog {
    pool: PgPool,
}

impl PostgresCatalog {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CatalogStore for PostgresCatalog {
    async fn insert_product(&self, new: NewProduct) -> Result<ProductRecord, StoreError> {
        let id = ProductId::new();
        let row = sqlx::query(
            r#"
            INSERT INTO products (id, sku, name, price_cents, category, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, sku, name, price_cents::bigint AS price_cents, category, created_at
            "#,
        )
        .bind(id.as_uuid())
        .bind(&new.sku)
        .bind(&new.name)
        .bind(new.price_cents)
        .bind(&new.category)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("insert_product", e))?;

        product_from_row(&row).map_err(|e| map_sqlx_error("insert_product", e))
    }

    async fn list_products(&self) -> Result<Vec<ProductRecord>, StoreError> {
        let rows = sqlx::query(
            r#"
            SELECT id, sku, name, price_cents::bigint AS price_cents, category, created_at
            FROM products
            ORDER BY created_at
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("list_products", e))?;

        rows.iter()
            .map(|row| product_from_row(row).map_err(|e| map_sqlx_error("list_products", e)))
            .collect()
    }

    async fn get_product(&self, id: ProductId) -> Result<Option<ProductRecord>, StoreError> {
        let row = sqlx::query(
            r#"
            SELECT id, sku, name, price_cents::bigint AS price_cents, category, created_at
            FROM products
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("get_product", e))?;

        match row {
            Some(row) => Ok(Some(
                product_from_row(&row).map_err(|e| map_sqlx_error("get_product", e))?,
            )),
            None => Ok(None),
        }
    }
}

/// Directory store backed by the `users` table.
#[derive(Debug, Clone)]
pub struct PostgresDirectory {
    pool: PgPool,
}

impl PostgresDirectory {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DirectoryStore for PostgresDirectory {
    async fn insert_user(&self, new: NewUser) -> Result<UserRecord, StoreError> {
        let id = UserId::new();
        let row = sqlx::query(
            r#"
            INSERT INTO users (id, email, display_name, created_at)
            VALUES ($1, $2, $3, $4)
            RETURNING id, email, display_name, created_at
            "#,
        )
        .bind(id.as_uuid())
        .bind(&new.email)
        .bind(&new.display_name)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("insert_user", e))?;

        user_from_row(&row).map_err(|e| map_sqlx_error("insert_user", e))
    }

    async fn list_users(&self) -> Result<Vec<UserRecord>, StoreError> {
        let rows = sqlx::query(
            r#"
            SELECT id, email, display_name, created_at
            FROM users
            ORDER BY created_at
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("list_users", e))?;

        rows.iter()
            .map(|row| user_from_row(row).map_err(|e| map_sqlx_error("list_users", e)))
            .collect()
    }
}
