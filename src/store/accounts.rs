//! Account store
//!
//! In-memory map of user key to account. The store owns every account and is
//! the only place balances mutate. It is not internally synchronized; the
//! ledger service serializes access behind its global lock.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::{Balance, DomainError};

/// A user account: a Finnocoin balance and a Finnopoint reward balance.
///
/// Invariant: both balances are >= 0 at all times.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Account {
    pub finnocoins: Balance,
    pub finnopoints: u64,
}

/// Holds all accounts, keyed by user.
#[derive(Debug, Default)]
pub struct AccountStore {
    accounts: HashMap<String, Account>,
}

impl AccountStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create the demo accounts the service traditionally boots with.
    pub fn with_demo_accounts() -> Self {
        let mut store = Self::new();
        store.open("user1", Decimal::from(10_000));
        store.open("user2", Decimal::from(5_000));
        store
    }

    /// Open an account with an initial Finnocoin balance.
    /// Re-opening an existing key leaves the existing account untouched.
    pub fn open(&mut self, user: impl Into<String>, initial: Decimal) {
        self.accounts.entry(user.into()).or_insert(Account {
            finnocoins: Balance::new(initial).unwrap_or_default(),
            finnopoints: 0,
        });
    }

    /// Whether the account key is known.
    pub fn exists(&self, user: &str) -> bool {
        self.accounts.contains_key(user)
    }

    /// Read an account.
    pub fn get(&self, user: &str) -> Option<&Account> {
        self.accounts.get(user)
    }

    /// Current Finnocoin balance, or `UserNotFound`.
    pub fn balance(&self, user: &str) -> Result<Decimal, DomainError> {
        self.accounts
            .get(user)
            .map(|a| a.finnocoins.value())
            .ok_or_else(|| DomainError::UserNotFound(user.to_string()))
    }

    /// Increase a user's Finnocoin balance. Never fails for a known user.
    pub fn credit(&mut self, user: &str, value: Decimal) -> Result<(), DomainError> {
        let account = self.account_mut(user)?;
        account.finnocoins = account
            .finnocoins
            .credit(value)
            .map_err(|e| DomainError::InvalidAmount(e.to_string()))?;
        Ok(())
    }

    /// Decrease a user's Finnocoin balance by the gross `value`.
    ///
    /// Fails with `InsufficientFunds` without mutating if the balance does
    /// not cover the full amount.
    pub fn debit(&mut self, user: &str, value: Decimal) -> Result<(), DomainError> {
        let account = self.account_mut(user)?;
        if !account.finnocoins.is_sufficient_for(value) {
            return Err(DomainError::insufficient_funds(
                value,
                account.finnocoins.value(),
            ));
        }
        account.finnocoins = account
            .finnocoins
            .debit(value)
            .map_err(|e| DomainError::InvalidAmount(e.to_string()))?;
        Ok(())
    }

    /// Increase a user's Finnopoint reward balance.
    pub fn credit_reward(&mut self, user: &str, points: u64) -> Result<(), DomainError> {
        let account = self.account_mut(user)?;
        account.finnopoints = account.finnopoints.saturating_add(points);
        Ok(())
    }

    fn account_mut(&mut self, user: &str) -> Result<&mut Account, DomainError> {
        self.accounts
            .get_mut(user)
            .ok_or_else(|| DomainError::UserNotFound(user.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_demo_accounts_seeded() {
        let store = AccountStore::with_demo_accounts();
        assert_eq!(store.balance("user1").unwrap(), dec!(10000));
        assert_eq!(store.balance("user2").unwrap(), dec!(5000));
        assert_eq!(store.get("user1").unwrap().finnopoints, 0);
    }

    #[test]
    fn test_open_is_idempotent() {
        let mut store = AccountStore::new();
        store.open("alice", dec!(100));
        store.open("alice", dec!(999));
        assert_eq!(store.balance("alice").unwrap(), dec!(100));
    }

    #[test]
    fn test_credit_and_debit() {
        let mut store = AccountStore::new();
        store.open("alice", dec!(100));

        store.credit("alice", dec!(50)).unwrap();
        assert_eq!(store.balance("alice").unwrap(), dec!(150));

        store.debit("alice", dec!(150)).unwrap();
        assert_eq!(store.balance("alice").unwrap(), dec!(0));
    }

    #[test]
    fn test_debit_insufficient_leaves_balance_unchanged() {
        let mut store = AccountStore::new();
        store.open("alice", dec!(100));

        let err = store.debit("alice", dec!(100.01)).unwrap_err();
        assert!(matches!(err, DomainError::InsufficientFunds { .. }));
        assert_eq!(store.balance("alice").unwrap(), dec!(100));
    }

    #[test]
    fn test_unknown_user() {
        let mut store = AccountStore::new();
        assert!(!store.exists("ghost"));
        assert!(matches!(
            store.credit("ghost", dec!(1)),
            Err(DomainError::UserNotFound(_))
        ));
        assert!(matches!(
            store.balance("ghost"),
            Err(DomainError::UserNotFound(_))
        ));
    }

    #[test]
    fn test_reward_points() {
        let mut store = AccountStore::new();
        store.open("lender", dec!(0));
        store.credit_reward("lender", 5).unwrap();
        store.credit_reward("lender", 5).unwrap();
        assert_eq!(store.get("lender").unwrap().finnopoints, 10);
    }
}
