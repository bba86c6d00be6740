//! Repository layer - Data access abstraction
//!
//! Repositories provide an abstraction over data persistence,
//! following the Repository pattern for clean separation of concerns.

mod cached_user_repository;
pub(crate) mod entities;
mod user_repository;

pub use cached_user_repository::CachedUserStore;
pub use user_repository::{UserRepository, UserStore};

pub(crate) use user_repository::translate_unique_violation;

// Export mock for tests (both unit and integration)
#[cfg(any(test, feature = "test-utils"))]
pub use user_repository::MockUserRepository;
