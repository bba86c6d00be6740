//! Unit of Work pattern implementation.
//!
//! Manages transaction lifecycle and transaction-scoped repository
//! access. Every balance mutation and every user+wallet provisioning
//! write runs through one `TransactionContext`, so a failure anywhere
//! inside the closure rolls back all writes and propagates unchanged.
//!
//! The context borrows the transaction, so a handle cannot be retained
//! or reused after commit/rollback.

use async_trait::async_trait;
use sea_orm::{
    AccessMode, ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, DbErr,
    EntityTrait, IsolationLevel, QueryFilter, QuerySelect, TransactionTrait,
};
use std::sync::Arc;
use uuid::Uuid;

use super::repositories::entities::{user, wallet};
use super::repositories::{translate_unique_violation, UserRepository};
use crate::domain::{User, Wallet};
use crate::errors::{AppError, AppResult};

/// Unit of Work trait for dependency injection.
///
/// Note: the `transaction` method is generic and therefore not
/// mockable directly. For testing, mock at the repository level or use
/// integration tests.
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    /// Get the (cache-decorated) user repository for reads outside a transaction
    fn users(&self) -> Arc<dyn UserRepository>;

    /// Execute a closure within a transaction.
    ///
    /// The transaction is committed on success and rolled back on error;
    /// the closure's error is returned unchanged. Runs at ReadCommitted:
    /// wallet rows read for mutation are locked explicitly instead.
    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(
                TransactionContext<'a>,
            ) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send;
}

/// Transaction context providing repository access within a transaction.
///
/// All repository operations performed through this context are part
/// of the same database transaction.
pub struct TransactionContext<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TransactionContext<'a> {
    fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }

    /// Get user repository for this transaction
    pub fn users(&self) -> TxUserRepository<'_> {
        TxUserRepository::new(self.txn)
    }

    /// Get wallet repository for this transaction
    pub fn wallets(&self) -> TxWalletRepository<'_> {
        TxWalletRepository::new(self.txn)
    }
}

/// Concrete implementation of UnitOfWork
pub struct Persistence {
    db: DatabaseConnection,
    user_repo: Arc<dyn UserRepository>,
}

impl Persistence {
    /// Create new UnitOfWork instance.
    ///
    /// `user_repo` is the repository served to non-transactional reads;
    /// the container passes the cache-decorated store here.
    pub fn new(db: DatabaseConnection, user_repo: Arc<dyn UserRepository>) -> Self {
        Self { db, user_repo }
    }
}

#[async_trait]
impl UnitOfWork for Persistence {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.user_repo.clone()
    }

    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(
                TransactionContext<'a>,
            ) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send,
    {
        let txn = self
            .db
            .begin_with_config(Some(IsolationLevel::ReadCommitted), Some(AccessMode::ReadWrite))
            .await
            .map_err(AppError::from)?;

        let ctx = TransactionContext::new(&txn);

        match f(ctx).await {
            Ok(result) => {
                txn.commit().await.map_err(AppError::from)?;
                Ok(result)
            }
            Err(e) => {
                if let Err(rollback_err) = txn.rollback().await {
                    tracing::error!("Transaction rollback failed: {}", rollback_err);
                }
                Err(e)
            }
        }
    }
}

/// Transaction-aware user repository.
pub struct TxUserRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TxUserRepository<'a> {
    fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }

    /// Persist a new user; a unique-constraint violation on username or
    /// national id surfaces as `Conflict`.
    pub async fn insert(&self, new_user: User) -> AppResult<User> {
        let model = user::ActiveModel::from(new_user)
            .insert(self.txn)
            .await
            .map_err(translate_unique_violation)?;

        Ok(User::from(model))
    }

    /// Find user by ID
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        let result = user::Entity::find_by_id(id)
            .one(self.txn)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(User::from))
    }

    /// Find user by username
    pub async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let result = user::Entity::find()
            .filter(user::Column::Username.eq(username))
            .one(self.txn)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(User::from))
    }
}

/// Transaction-aware wallet repository.
///
/// Balance reads that precede a write must go through
/// `find_by_id_for_update` so the row stays locked until commit.
pub struct TxWalletRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TxWalletRepository<'a> {
    fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }

    /// Persist a new wallet
    pub async fn insert(&self, new_wallet: Wallet) -> AppResult<Wallet> {
        let model = wallet::ActiveModel::from(new_wallet)
            .insert(self.txn)
            .await
            .map_err(AppError::from)?;

        Ok(Wallet::from(model))
    }

    /// Find wallet by ID
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Wallet>> {
        let result = wallet::Entity::find_by_id(id)
            .one(self.txn)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Wallet::from))
    }

    /// Find the wallet owned by a user
    pub async fn find_by_user_id(&self, user_id: Uuid) -> AppResult<Option<Wallet>> {
        let result = wallet::Entity::find()
            .filter(wallet::Column::UserId.eq(user_id))
            .one(self.txn)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Wallet::from))
    }

    /// Find wallet by ID with `SELECT ... FOR UPDATE`.
    ///
    /// Holds an exclusive row lock until the transaction ends, closing
    /// the lost-update window between the balance check and the write.
    pub async fn find_by_id_for_update(&self, id: Uuid) -> AppResult<Option<Wallet>> {
        let result = wallet::Entity::find_by_id(id)
            .lock_exclusive()
            .one(self.txn)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Wallet::from))
    }

    /// Overwrite the wallet's mutable fields (balance, updated_at).
    ///
    /// Fails with `NotFound` when the row no longer exists.
    pub async fn update(&self, updated: &Wallet) -> AppResult<Wallet> {
        use sea_orm::Set;

        let active = wallet::ActiveModel {
            id: Set(updated.id),
            balance: Set(updated.balance),
            updated_at: Set(updated.updated_at),
            ..Default::default()
        };

        let model = active.update(self.txn).await.map_err(|e| match e {
            DbErr::RecordNotUpdated => AppError::not_found("wallet"),
            e => AppError::from(e),
        })?;

        Ok(Wallet::from(model))
    }
}
