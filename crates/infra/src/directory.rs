//! User directory store.

use std::sync::RwLock;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use storefront_core::{ConstraintViolation, UserId};

use crate::error::StoreError;

/// Column limits of the `users` table.
pub const EMAIL_MAX_LEN: usize = 254;
pub const DISPLAY_NAME_MAX_LEN: usize = 80;

#[derive(Debug, Clone, PartialEq)]
pub struct UserRecord {
    pub id: UserId,
    pub email: String,
    pub display_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub display_name: Option<String>,
}

#[async_trait]
pub trait DirectoryStore: Send + Sync {
    async fn insert_user(&self, new: NewUser) -> Result<UserRecord, StoreError>;
    async fn list_users(&self) -> Result<Vec<UserRecord>, StoreError>;
}

/// In-memory directory enforcing the same constraints as the Postgres
/// schema. Intended for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryDirectory {
    users: RwLock<Vec<UserRecord>>,
}

impl InMemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DirectoryStore for InMemoryDirectory {
    async fn insert_user(&self, new: NewUser) -> Result<UserRecord, StoreError> {
        if new.email.len() > EMAIL_MAX_LEN {
            return Err(ConstraintViolation::MaxLength {
                column: Some("email".to_string()),
            }
            .into());
        }
        if let Some(name) = &new.display_name {
            if name.len() > DISPLAY_NAME_MAX_LEN {
                return Err(ConstraintViolation::MaxLength {
                    column: Some("display_name".to_string()),
                }
                .into());
            }
        }

        let mut users = self
            .users
            .write()
            .map_err(|_| StoreError::Backend("lock poisoned".to_string()))?;

        if users.iter().any(|u| u.email == new.email) {
            return Err(ConstraintViolation::Unique {
                constraint: Some("ux_users_email".to_string()),
            }
            .into());
        }

        let record = UserRecord {
            id: UserId::new(),
            email: new.email,
            display_name: new.display_name,
            created_at: Utc::now(),
        };
        users.push(record.clone());
        Ok(record)
    }

    async fn list_users(&self) -> Result<Vec<UserRecord>, StoreError> {
        let users = self
            .users
            .read()
            .map_err(|_| StoreError::Backend("lock poisoned".to_string()))?;
        Ok(users.clone())
    }
}
