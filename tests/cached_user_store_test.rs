//! Read-through cache decorator unit tests.
//!
//! The decorator is verified against mocked cache and store: a cache hit
//! must never touch the store, and every cache failure mode must degrade
//! to a plain store read.

use std::sync::Arc;

use chrono::Utc;
use mockall::predicate::eq;
use uuid::Uuid;

use wallet_api::domain::User;
use wallet_api::errors::AppError;
use wallet_api::infra::{CachedUserStore, MockUserCache, MockUserRepository, UserRepository};

fn create_test_user(id: Uuid) -> User {
    User {
        id,
        username: "jdoe".to_string(),
        name: "John Doe".to_string(),
        national_id: "A1234567".to_string(),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

#[tokio::test]
async fn test_cache_hit_skips_backing_store() {
    let user_id = Uuid::new_v4();

    let mut cache = MockUserCache::new();
    cache
        .expect_get_user()
        .with(eq(user_id))
        .times(1)
        .returning(move |id| Ok(Some(create_test_user(id))));

    // No expectations on the store: any call would panic the test
    let store = MockUserRepository::new();

    let cached = CachedUserStore::new(Arc::new(cache), Arc::new(store));
    let result = cached.find_by_id(user_id).await.unwrap();

    assert_eq!(result.unwrap().id, user_id);
}

#[tokio::test]
async fn test_cache_miss_reads_store_and_populates_cache() {
    let user_id = Uuid::new_v4();

    let mut cache = MockUserCache::new();
    cache
        .expect_get_user()
        .with(eq(user_id))
        .times(1)
        .returning(|_| Ok(None));
    cache
        .expect_put_user()
        .withf(move |user| user.id == user_id)
        .times(1)
        .returning(|_| Ok(()));

    let mut store = MockUserRepository::new();
    store
        .expect_find_by_id()
        .with(eq(user_id))
        .times(1)
        .returning(move |id| Ok(Some(create_test_user(id))));

    let cached = CachedUserStore::new(Arc::new(cache), Arc::new(store));
    let result = cached.find_by_id(user_id).await.unwrap();

    assert_eq!(result.unwrap().id, user_id);
}

#[tokio::test]
async fn test_cache_miss_for_absent_user_skips_populate() {
    let user_id = Uuid::new_v4();

    let mut cache = MockUserCache::new();
    cache.expect_get_user().returning(|_| Ok(None));
    // put_user must not be called for an absent user

    let mut store = MockUserRepository::new();
    store.expect_find_by_id().returning(|_| Ok(None));

    let cached = CachedUserStore::new(Arc::new(cache), Arc::new(store));
    let result = cached.find_by_id(user_id).await.unwrap();

    assert!(result.is_none());
}

#[tokio::test]
async fn test_cache_read_failure_degrades_to_store() {
    let user_id = Uuid::new_v4();

    let mut cache = MockUserCache::new();
    cache
        .expect_get_user()
        .returning(|_| Err(AppError::internal("redis unavailable")));
    cache.expect_put_user().returning(|_| Ok(()));

    let mut store = MockUserRepository::new();
    store
        .expect_find_by_id()
        .times(1)
        .returning(move |id| Ok(Some(create_test_user(id))));

    let cached = CachedUserStore::new(Arc::new(cache), Arc::new(store));
    let result = cached.find_by_id(user_id).await.unwrap();

    assert_eq!(result.unwrap().id, user_id);
}

#[tokio::test]
async fn test_cache_write_failure_does_not_fail_the_read() {
    let user_id = Uuid::new_v4();

    let mut cache = MockUserCache::new();
    cache.expect_get_user().returning(|_| Ok(None));
    cache
        .expect_put_user()
        .returning(|_| Err(AppError::internal("redis unavailable")));

    let mut store = MockUserRepository::new();
    store
        .expect_find_by_id()
        .returning(move |id| Ok(Some(create_test_user(id))));

    let cached = CachedUserStore::new(Arc::new(cache), Arc::new(store));
    let result = cached.find_by_id(user_id).await.unwrap();

    assert_eq!(result.unwrap().id, user_id);
}

#[tokio::test]
async fn test_insert_bypasses_cache() {
    let user = create_test_user(Uuid::new_v4());
    let user_id = user.id;

    // No expectations on the cache: writes must not touch it
    let cache = MockUserCache::new();

    let mut store = MockUserRepository::new();
    store
        .expect_insert()
        .times(1)
        .returning(|user| Ok(user));

    let cached = CachedUserStore::new(Arc::new(cache), Arc::new(store));
    let result = cached.insert(user).await.unwrap();

    assert_eq!(result.id, user_id);
}

#[tokio::test]
async fn test_find_by_username_goes_straight_to_store() {
    let cache = MockUserCache::new();

    let mut store = MockUserRepository::new();
    store
        .expect_find_by_username()
        .with(eq("jdoe"))
        .times(1)
        .returning(|_| Ok(Some(create_test_user(Uuid::new_v4()))));

    let cached = CachedUserStore::new(Arc::new(cache), Arc::new(store));
    let result = cached.find_by_username("jdoe").await.unwrap();

    assert_eq!(result.unwrap().username, "jdoe");
}
