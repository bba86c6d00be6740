//! Read-through cache decorator for the user store.
//!
//! Implements the same `UserRepository` contract by composition over an
//! inner store, serving `find_by_id` from Redis when possible. The cache
//! is strictly a latency optimization: every failure mode (unavailable,
//! corrupt entry, write failure) degrades to a backing-store read.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use super::UserRepository;
use crate::domain::User;
use crate::errors::AppResult;
use crate::infra::cache::UserCache;

/// Cache-backed `UserRepository` wrapping an inner implementation.
pub struct CachedUserStore {
    cache: Arc<dyn UserCache>,
    inner: Arc<dyn UserRepository>,
}

impl CachedUserStore {
    pub fn new(cache: Arc<dyn UserCache>, inner: Arc<dyn UserRepository>) -> Self {
        Self { cache, inner }
    }
}

#[async_trait]
impl UserRepository for CachedUserStore {
    /// Writes bypass the cache; no invalidation is needed because the
    /// fields served from snapshots are immutable after creation.
    async fn insert(&self, user: User) -> AppResult<User> {
        self.inner.insert(user).await
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        match self.cache.get_user(id).await {
            Ok(Some(user)) => return Ok(Some(user)),
            Ok(None) => {}
            Err(e) => {
                tracing::warn!(user_id = %id, error = %e, "user cache read failed, falling back to store");
            }
        }

        let user = self.inner.find_by_id(id).await?;

        if let Some(user) = &user {
            // Fire-and-forget: a cache write failure must not fail the read
            if let Err(e) = self.cache.put_user(user).await {
                tracing::warn!(user_id = %id, error = %e, "failed to cache user snapshot");
            }
        }

        Ok(user)
    }

    /// Secondary lookup goes straight to the backing store.
    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        self.inner.find_by_username(username).await
    }
}
