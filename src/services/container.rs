//! Service Container - Centralized service access.
//!
//! Wires the persistence stack (store → cache decorator → unit of work)
//! into the application services and hands out trait objects for
//! dependency injection.

use std::sync::Arc;

use super::{UserProvisioner, UserService, WalletLedger, WalletService};
use crate::infra::{Cache, CachedUserStore, Persistence, UserStore};

/// Service container trait for dependency injection.
pub trait ServiceContainer: Send + Sync {
    /// Get user provisioning service
    fn users(&self) -> Arc<dyn UserService>;

    /// Get wallet ledger service
    fn wallets(&self) -> Arc<dyn WalletService>;
}

/// Concrete implementation of ServiceContainer
pub struct Services {
    user_service: Arc<dyn UserService>,
    wallet_service: Arc<dyn WalletService>,
}

impl Services {
    /// Create a new service container with manually injected services
    pub fn new(user_service: Arc<dyn UserService>, wallet_service: Arc<dyn WalletService>) -> Self {
        Self {
            user_service,
            wallet_service,
        }
    }

    /// Create service container from a database connection and cache.
    ///
    /// User reads are decorated with the read-through cache; wallet
    /// operations always go straight to storage.
    pub fn from_connection(db: sea_orm::DatabaseConnection, cache: Arc<Cache>) -> Self {
        let user_store = Arc::new(UserStore::new(db.clone()));
        let cached_users = Arc::new(CachedUserStore::new(cache, user_store));

        let uow = Arc::new(Persistence::new(db, cached_users));
        let user_service = Arc::new(UserProvisioner::new(uow.clone()));
        let wallet_service = Arc::new(WalletLedger::new(uow));

        Self {
            user_service,
            wallet_service,
        }
    }
}

impl ServiceContainer for Services {
    fn users(&self) -> Arc<dyn UserService> {
        self.user_service.clone()
    }

    fn wallets(&self) -> Arc<dyn WalletService> {
        self.wallet_service.clone()
    }
}
