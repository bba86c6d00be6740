//! Application state - Dependency injection container.
//!
//! Provides centralized access to all application services and infrastructure.

use std::sync::Arc;

use crate::infra::{Cache, Database};
use crate::services::{ServiceContainer, Services, UserService, WalletService};

/// Application state containing all services (DI container).
#[derive(Clone)]
pub struct AppState {
    /// User provisioning service
    pub user_service: Arc<dyn UserService>,
    /// Wallet ledger service
    pub wallet_service: Arc<dyn WalletService>,
    /// Redis cache
    pub cache: Arc<Cache>,
    /// Database connection
    pub database: Arc<Database>,
}

impl AppState {
    /// Create application state from database connection and cache.
    ///
    /// Wires the full persistence stack (store, cache decorator, unit
    /// of work) through the service container.
    pub fn from_config(database: Arc<Database>, cache: Arc<Cache>) -> Self {
        let container = Services::from_connection(database.get_connection(), cache.clone());

        Self {
            user_service: container.users(),
            wallet_service: container.wallets(),
            cache,
            database,
        }
    }

    /// Create new application state with manually injected services.
    pub fn new(
        user_service: Arc<dyn UserService>,
        wallet_service: Arc<dyn WalletService>,
        cache: Arc<Cache>,
        database: Arc<Database>,
    ) -> Self {
        Self {
            user_service,
            wallet_service,
            cache,
            database,
        }
    }
}
