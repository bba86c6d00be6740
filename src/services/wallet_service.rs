//! Wallet ledger service.
//!
//! The invariant-enforcing balance operations. Each runs inside one
//! atomic unit of work; wallets read for mutation are locked with
//! `SELECT ... FOR UPDATE`, and `transfer` acquires its two locks in
//! ascending wallet-id order so concurrent transfers cannot deadlock.

use async_trait::async_trait;
use rust_decimal::Decimal;
use std::sync::Arc;
use uuid::Uuid;

use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;

/// Wallet service trait for dependency injection.
#[async_trait]
pub trait WalletService: Send + Sync {
    /// Add a positive amount to a wallet's balance
    async fn recharge(&self, wallet_id: Uuid, amount: Decimal) -> AppResult<()>;

    /// Move a positive amount between two distinct wallets, all or nothing
    async fn transfer(
        &self,
        from_wallet_id: Uuid,
        to_wallet_id: Uuid,
        amount: Decimal,
    ) -> AppResult<()>;
}

/// Concrete implementation of WalletService using Unit of Work.
pub struct WalletLedger<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> WalletLedger<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> WalletService for WalletLedger<U> {
    async fn recharge(&self, wallet_id: Uuid, amount: Decimal) -> AppResult<()> {
        if amount <= Decimal::ZERO {
            return Err(AppError::invalid_argument(
                "recharge amount must be positive",
            ));
        }

        self.uow
            .transaction(move |ctx| {
                Box::pin(async move {
                    let wallets = ctx.wallets();

                    let mut wallet = wallets
                        .find_by_id_for_update(wallet_id)
                        .await?
                        .ok_or_else(|| AppError::not_found("wallet"))?;

                    wallet.credit(amount);

                    tracing::info!(wallet_id = %wallet_id, amount = %amount, "recharging wallet");

                    wallets.update(&wallet).await?;
                    Ok(())
                })
            })
            .await
    }

    async fn transfer(
        &self,
        from_wallet_id: Uuid,
        to_wallet_id: Uuid,
        amount: Decimal,
    ) -> AppResult<()> {
        if amount <= Decimal::ZERO {
            return Err(AppError::invalid_argument(
                "transfer amount must be positive",
            ));
        }
        if from_wallet_id == to_wallet_id {
            return Err(AppError::invalid_argument(
                "cannot transfer to the same wallet",
            ));
        }

        self.uow
            .transaction(move |ctx| {
                Box::pin(async move {
                    let wallets = ctx.wallets();

                    // Lock both rows in ascending id order; error
                    // precedence (sender missing, funds, receiver
                    // missing) is evaluated after both lookups.
                    let (first_id, second_id) = if from_wallet_id < to_wallet_id {
                        (from_wallet_id, to_wallet_id)
                    } else {
                        (to_wallet_id, from_wallet_id)
                    };

                    let first = wallets.find_by_id_for_update(first_id).await?;
                    let second = wallets.find_by_id_for_update(second_id).await?;

                    let (sender, receiver) = if first_id == from_wallet_id {
                        (first, second)
                    } else {
                        (second, first)
                    };

                    let mut sender = sender.ok_or_else(|| AppError::not_found("sender wallet"))?;

                    if sender.balance < amount {
                        return Err(AppError::failed_precondition("insufficient funds"));
                    }

                    let mut receiver =
                        receiver.ok_or_else(|| AppError::not_found("receiver wallet"))?;

                    // Both sides computed in memory before either write;
                    // a failed persist discards them with the rollback.
                    sender.debit(amount)?;
                    receiver.credit(amount);

                    tracing::info!(
                        from_wallet = %from_wallet_id,
                        to_wallet = %to_wallet_id,
                        amount = %amount,
                        "transferring funds"
                    );

                    wallets.update(&sender).await?;
                    wallets.update(&receiver).await?;
                    Ok(())
                })
            })
            .await
    }
}
