//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain logic and infrastructure to fulfill
//! application use cases. They depend on abstractions (traits) for
//! dependency inversion.
//!
//! All services use Unit of Work pattern for centralized repository
//! access and transaction management.

pub mod container;
mod user_service;
mod wallet_service;

// Service Container
pub use container::{ServiceContainer, Services};

// Service traits and implementations
pub use user_service::{UserProvisioner, UserService};
pub use wallet_service::{WalletLedger, WalletService};
