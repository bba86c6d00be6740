//! Infrastructure layer - External systems integration
//!
//! This module handles all external system concerns:
//! - Database connections and repositories
//! - Caching (Redis) and the read-through user cache decorator
//! - Unit of Work for transaction management

pub mod cache;
pub mod db;
pub mod repositories;
pub mod unit_of_work;

pub use cache::{Cache, UserCache};
pub use db::{Database, Migrator};
pub use repositories::{CachedUserStore, UserRepository, UserStore};
pub use unit_of_work::{
    Persistence, TransactionContext, TxUserRepository, TxWalletRepository, UnitOfWork,
};

#[cfg(any(test, feature = "test-utils"))]
pub use cache::MockUserCache;
#[cfg(any(test, feature = "test-utils"))]
pub use repositories::MockUserRepository;
