//! Connection-bound user repository.
//!
//! This is the store contract the cache decorator wraps. Transactional
//! provisioning writes go through `TxUserRepository` instead, so that
//! every write inside a unit of work is bound to its transaction.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, SqlErr,
};
use uuid::Uuid;

use super::entities::user::{self, Entity as UserEntity};
use crate::domain::User;
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User store contract.
///
/// `insert` fails with `Conflict` when username or national id is taken.
/// Lookups return `None` rather than an error so callers decide how a
/// missing user surfaces.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Persist a new user
    async fn insert(&self, user: User) -> AppResult<User>;

    /// Find user by ID
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    /// Find user by username
    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>>;
}

/// Translate a storage-level unique-constraint violation into `Conflict`.
///
/// This is what makes the single atomic insert safe without relying on
/// the non-transactional duplicate pre-check.
pub(crate) fn translate_unique_violation(e: DbErr) -> AppError {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) => {
            if detail.contains("national_id") {
                AppError::conflict("national id")
            } else {
                AppError::conflict("username")
            }
        }
        _ => AppError::from(e),
    }
}

/// Postgres-backed implementation of `UserRepository`.
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn insert(&self, user: User) -> AppResult<User> {
        let model = user::ActiveModel::from(user)
            .insert(&self.db)
            .await
            .map_err(translate_unique_violation)?;

        Ok(User::from(model))
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        let result = UserEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(User::from))
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let result = UserEntity::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(User::from))
    }
}
