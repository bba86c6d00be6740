//! Domain layer - Core business entities and logic
//!
//! This module contains the core domain models that represent
//! business concepts independent of infrastructure concerns.

pub mod user;
pub mod wallet;

pub use user::{User, UserResponse};
pub use wallet::Wallet;
