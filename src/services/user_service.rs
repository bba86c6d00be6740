//! User provisioning service.
//!
//! Creates a user and its zero-balance wallet as one atomic unit of
//! work: neither row exists unless both inserts commit together.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{User, Wallet};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;

/// User service trait for dependency injection.
#[async_trait]
pub trait UserService: Send + Sync {
    /// Create a user together with its empty wallet
    async fn create_user(
        &self,
        username: String,
        name: String,
        national_id: String,
    ) -> AppResult<User>;

    /// Get user by ID (served through the read-through cache)
    async fn get_user(&self, id: Uuid) -> AppResult<User>;
}

/// Concrete implementation of UserService using Unit of Work.
pub struct UserProvisioner<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> UserProvisioner<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> UserService for UserProvisioner<U> {
    async fn create_user(
        &self,
        username: String,
        name: String,
        national_id: String,
    ) -> AppResult<User> {
        // Fast path: skip opening a transaction for the common duplicate
        // case. Not race-free; the unique constraint inside the
        // transaction is what actually guarantees uniqueness.
        if self
            .uow
            .users()
            .find_by_username(&username)
            .await?
            .is_some()
        {
            return Err(AppError::conflict("username"));
        }

        let new_user = User::new(username, name, national_id);

        self.uow
            .transaction(|ctx| {
                Box::pin(async move {
                    let user = ctx.users().insert(new_user).await?;

                    let wallet = Wallet::new(user.id);
                    ctx.wallets().insert(wallet).await?;

                    tracing::info!(user_id = %user.id, username = %user.username, "provisioned user with empty wallet");

                    Ok(user)
                })
            })
            .await
    }

    async fn get_user(&self, id: Uuid) -> AppResult<User> {
        self.uow
            .users()
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("user"))
    }
}
