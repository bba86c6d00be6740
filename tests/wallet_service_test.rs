//! Wallet ledger service unit tests.
//!
//! Validation happens before any transaction is opened, so these tests
//! run against a unit-of-work mock whose `transaction` always errors:
//! an `InvalidArgument` result proves the request was rejected without
//! touching storage, while `Internal` proves validation passed and the
//! transactional path was entered.

use std::sync::Arc;

use async_trait::async_trait;
use rust_decimal::Decimal;
use uuid::Uuid;

use wallet_api::errors::{AppError, AppResult};
use wallet_api::infra::{MockUserRepository, TransactionContext, UnitOfWork, UserRepository};
use wallet_api::services::{WalletLedger, WalletService};

/// Unit-of-work mock that rejects every transaction
struct TestUnitOfWork;

#[async_trait]
impl UnitOfWork for TestUnitOfWork {
    fn users(&self) -> Arc<dyn UserRepository> {
        Arc::new(MockUserRepository::new())
    }

    async fn transaction<F, T>(&self, _f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send,
    {
        Err(AppError::internal("Transactions not supported in test mock"))
    }
}

fn ledger() -> WalletLedger<TestUnitOfWork> {
    WalletLedger::new(Arc::new(TestUnitOfWork))
}

#[tokio::test]
async fn test_recharge_zero_amount_rejected() {
    let result = ledger().recharge(Uuid::new_v4(), Decimal::ZERO).await;

    let err = result.unwrap_err();
    assert!(matches!(err, AppError::InvalidArgument(_)));
    assert_eq!(err.to_string(), "recharge amount must be positive");
}

#[tokio::test]
async fn test_recharge_negative_amount_rejected() {
    let result = ledger()
        .recharge(Uuid::new_v4(), Decimal::new(-100, 2))
        .await;

    assert!(matches!(result.unwrap_err(), AppError::InvalidArgument(_)));
}

#[tokio::test]
async fn test_recharge_positive_amount_enters_transaction() {
    let result = ledger()
        .recharge(Uuid::new_v4(), Decimal::new(1000, 2))
        .await;

    assert!(matches!(result.unwrap_err(), AppError::Internal(_)));
}

#[tokio::test]
async fn test_transfer_zero_amount_rejected() {
    let result = ledger()
        .transfer(Uuid::new_v4(), Uuid::new_v4(), Decimal::ZERO)
        .await;

    let err = result.unwrap_err();
    assert!(matches!(err, AppError::InvalidArgument(_)));
    assert_eq!(err.to_string(), "transfer amount must be positive");
}

#[tokio::test]
async fn test_transfer_negative_amount_rejected() {
    let result = ledger()
        .transfer(Uuid::new_v4(), Uuid::new_v4(), Decimal::new(-1, 0))
        .await;

    assert!(matches!(result.unwrap_err(), AppError::InvalidArgument(_)));
}

#[tokio::test]
async fn test_transfer_to_same_wallet_rejected() {
    let wallet_id = Uuid::new_v4();
    let result = ledger()
        .transfer(wallet_id, wallet_id, Decimal::new(500, 2))
        .await;

    let err = result.unwrap_err();
    assert!(matches!(err, AppError::InvalidArgument(_)));
    assert_eq!(err.to_string(), "cannot transfer to the same wallet");
}

#[tokio::test]
async fn test_transfer_valid_arguments_enter_transaction() {
    let result = ledger()
        .transfer(Uuid::new_v4(), Uuid::new_v4(), Decimal::new(500, 2))
        .await;

    assert!(matches!(result.unwrap_err(), AppError::Internal(_)));
}
