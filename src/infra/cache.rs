//! Redis cache implementation.
//!
//! Provides a type-safe caching layer with connection pooling. Cache
//! entries are JSON snapshots with a bounded TTL; the cache is never
//! authoritative, so errors here are reported but must never decide
//! business outcomes.

use async_trait::async_trait;
use redis::{aio::ConnectionManager, AsyncCommands, Client, RedisError};
use serde::{de::DeserializeOwned, Serialize};
use uuid::Uuid;

use crate::config::{Config, CACHE_PREFIX_USER, USER_CACHE_TTL_SECONDS};
use crate::domain::User;
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Cache contract for user snapshots.
///
/// Kept narrow so the read-through decorator can be tested against a
/// mock without a Redis instance.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserCache: Send + Sync {
    /// Get cached user snapshot by ID
    async fn get_user(&self, user_id: Uuid) -> AppResult<Option<User>>;

    /// Cache a user snapshot with the fixed TTL
    async fn put_user(&self, user: &User) -> AppResult<()>;
}

/// Redis cache wrapper with connection pooling.
#[derive(Clone)]
pub struct Cache {
    connection: ConnectionManager,
}

impl Cache {
    /// Create a new cache instance and connect to Redis.
    pub async fn connect(config: &Config) -> Result<Self, RedisError> {
        let client = Client::open(config.redis_url.as_str())?;
        let connection = ConnectionManager::new(client).await?;

        tracing::info!("Redis cache connected");

        Ok(Self { connection })
    }

    /// Get a value from cache.
    ///
    /// A corrupt entry is treated as a miss, not an error: the caller
    /// falls back to the backing store and overwrites the entry.
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> AppResult<Option<T>> {
        let mut conn = self.connection.clone();
        let value: Option<String> = conn.get(key).await.map_err(cache_error)?;

        match value {
            Some(json) => match serde_json::from_str(&json) {
                Ok(parsed) => Ok(Some(parsed)),
                Err(e) => {
                    tracing::warn!(key = %key, error = %e, "discarding corrupt cache entry");
                    Ok(None)
                }
            },
            None => Ok(None),
        }
    }

    /// Set a value in cache with a TTL (in seconds).
    pub async fn set_with_ttl<T: Serialize>(
        &self,
        key: &str,
        value: &T,
        ttl_seconds: u64,
    ) -> AppResult<()> {
        let mut conn = self.connection.clone();
        let json = serde_json::to_string(value)
            .map_err(|e| AppError::internal(format!("Cache serialization error: {}", e)))?;

        conn.set_ex::<_, _, ()>(key, json, ttl_seconds)
            .await
            .map_err(cache_error)?;

        Ok(())
    }

    /// Check if a key exists in cache.
    pub async fn exists(&self, key: &str) -> AppResult<bool> {
        let mut conn = self.connection.clone();
        let exists: bool = conn.exists(key).await.map_err(cache_error)?;
        Ok(exists)
    }
}

#[async_trait]
impl UserCache for Cache {
    async fn get_user(&self, user_id: Uuid) -> AppResult<Option<User>> {
        let key = format!("{}{}", CACHE_PREFIX_USER, user_id);
        self.get(&key).await
    }

    async fn put_user(&self, user: &User) -> AppResult<()> {
        let key = format!("{}{}", CACHE_PREFIX_USER, user.id);
        self.set_with_ttl(&key, user, USER_CACHE_TTL_SECONDS).await
    }
}

/// Convert Redis error to AppError.
fn cache_error(e: RedisError) -> AppError {
    tracing::error!("Redis error: {}", e);
    AppError::internal(format!("Cache error: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_cache_key_layout() {
        assert_eq!(CACHE_PREFIX_USER, "user:");
        assert_eq!(USER_CACHE_TTL_SECONDS, 300);
    }
}
