//! Wallet domain entity and balance arithmetic.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::DEFAULT_CURRENCY;
use crate::errors::{AppError, AppResult};

/// Wallet domain entity.
///
/// The balance is a fixed-precision decimal and must never go negative.
/// That invariant is enforced here by `debit`, not by storage: both sides
/// of a transfer are computed in memory before either row is written.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Wallet {
    pub id: Uuid,
    pub user_id: Uuid,
    pub currency: String,
    pub balance: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Wallet {
    /// Create a new zero-balance wallet for a user with the default currency
    pub fn new(user_id: Uuid) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            currency: DEFAULT_CURRENCY.to_string(),
            balance: Decimal::ZERO,
            created_at: now,
            updated_at: now,
        }
    }

    /// Add `amount` to the balance
    pub fn credit(&mut self, amount: Decimal) {
        self.balance += amount;
        self.updated_at = Utc::now();
    }

    /// Subtract `amount` from the balance.
    ///
    /// Fails with `FailedPrecondition` when the balance would go negative,
    /// leaving the wallet untouched.
    pub fn debit(&mut self, amount: Decimal) -> AppResult<()> {
        if self.balance < amount {
            return Err(AppError::failed_precondition("insufficient funds"));
        }
        self.balance -= amount;
        self.updated_at = Utc::now();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn wallet_with_balance(balance: Decimal) -> Wallet {
        let mut wallet = Wallet::new(Uuid::new_v4());
        wallet.balance = balance;
        wallet
    }

    #[test]
    fn new_wallet_is_empty_usd() {
        let user_id = Uuid::new_v4();
        let wallet = Wallet::new(user_id);

        assert_eq!(wallet.user_id, user_id);
        assert_eq!(wallet.currency, "USD");
        assert_eq!(wallet.balance, Decimal::ZERO);
    }

    #[test]
    fn credit_adds_to_balance() {
        let mut wallet = wallet_with_balance(Decimal::new(1050, 2)); // 10.50
        wallet.credit(Decimal::new(250, 2)); // 2.50

        assert_eq!(wallet.balance, Decimal::new(1300, 2));
    }

    #[test]
    fn debit_subtracts_from_balance() {
        let mut wallet = wallet_with_balance(Decimal::new(1000, 2));
        wallet.debit(Decimal::new(399, 2)).unwrap();

        assert_eq!(wallet.balance, Decimal::new(601, 2));
    }

    #[test]
    fn debit_beyond_balance_fails_and_leaves_wallet_unchanged() {
        let mut wallet = wallet_with_balance(Decimal::new(500, 2));
        let err = wallet.debit(Decimal::new(501, 2)).unwrap_err();

        assert!(matches!(err, AppError::FailedPrecondition(_)));
        assert_eq!(wallet.balance, Decimal::new(500, 2));
    }

    #[test]
    fn debit_entire_balance_succeeds() {
        let mut wallet = wallet_with_balance(Decimal::new(500, 2));
        wallet.debit(Decimal::new(500, 2)).unwrap();

        assert_eq!(wallet.balance, Decimal::ZERO);
    }

    #[test]
    fn transfer_arithmetic_conserves_total() {
        let amount = Decimal::new(725, 2);
        let mut sender = wallet_with_balance(Decimal::new(2000, 2));
        let mut receiver = wallet_with_balance(Decimal::new(100, 2));
        let total_before = sender.balance + receiver.balance;

        sender.debit(amount).unwrap();
        receiver.credit(amount);

        assert_eq!(sender.balance + receiver.balance, total_before);
        assert!(sender.balance >= Decimal::ZERO);
    }
}
