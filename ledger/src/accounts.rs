//! Registry of journalist accounts and their balances.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use tipline_types::{AccountHandle, Timestamp};

use crate::error::LedgerError;

/// A registered recipient of tips.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalistAccount {
    pub handle: AccountHandle,
    pub name: String,
    pub organization: String,
    /// Lifetime sum of net tips credited. Never decreases.
    pub total_tips_received: u128,
    /// Funds the journalist may withdraw.
    pub available_balance: u128,
    pub registered_at: Timestamp,
}

/// Owns every [`JournalistAccount`], keyed by handle.
///
/// Registration is one-way: there is no way to remove an account.
#[derive(Clone, Debug, Default)]
pub struct AccountRegistry {
    accounts: HashMap<AccountHandle, JournalistAccount>,
}

impl AccountRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new journalist with zero balances.
    pub fn register(
        &mut self,
        handle: AccountHandle,
        name: String,
        organization: String,
        now: Timestamp,
    ) -> Result<&JournalistAccount, LedgerError> {
        if self.accounts.contains_key(&handle) {
            return Err(LedgerError::AlreadyRegistered(handle));
        }
        if name.is_empty() {
            return Err(LedgerError::InvalidInput("name must not be empty".into()));
        }
        if organization.is_empty() {
            return Err(LedgerError::InvalidInput(
                "organization must not be empty".into(),
            ));
        }
        let account = JournalistAccount {
            handle: handle.clone(),
            name,
            organization,
            total_tips_received: 0,
            available_balance: 0,
            registered_at: now,
        };
        Ok(self.accounts.entry(handle).or_insert(account))
    }

    /// Add `amount` to both the lifetime total and the available balance.
    ///
    /// Either both counters move or neither does.
    pub fn credit(&mut self, handle: &AccountHandle, amount: u128) -> Result<(), LedgerError> {
        let account = self
            .accounts
            .get_mut(handle)
            .ok_or_else(|| LedgerError::UnknownAccount(handle.clone()))?;
        let total = account
            .total_tips_received
            .checked_add(amount)
            .ok_or(LedgerError::ArithmeticOverflow)?;
        let available = account
            .available_balance
            .checked_add(amount)
            .ok_or(LedgerError::ArithmeticOverflow)?;
        account.total_tips_received = total;
        account.available_balance = available;
        Ok(())
    }

    /// Whether [`credit`](Self::credit) would succeed, without mutating.
    pub fn can_credit(&self, handle: &AccountHandle, amount: u128) -> Result<(), LedgerError> {
        let account = self
            .accounts
            .get(handle)
            .ok_or_else(|| LedgerError::UnknownAccount(handle.clone()))?;
        account
            .total_tips_received
            .checked_add(amount)
            .and(account.available_balance.checked_add(amount))
            .map(|_| ())
            .ok_or(LedgerError::ArithmeticOverflow)
    }

    /// Subtract `amount` from the available balance. The lifetime total is untouched.
    pub fn debit(&mut self, handle: &AccountHandle, amount: u128) -> Result<(), LedgerError> {
        let account = self
            .accounts
            .get_mut(handle)
            .ok_or_else(|| LedgerError::UnknownAccount(handle.clone()))?;
        account.available_balance = account.available_balance.checked_sub(amount).ok_or(
            LedgerError::InsufficientBalance {
                needed: amount,
                available: account.available_balance,
            },
        )?;
        Ok(())
    }

    /// Undo a [`debit`](Self::debit) whose payout failed.
    pub fn reverse_debit(&mut self, handle: &AccountHandle, amount: u128) -> Result<(), LedgerError> {
        let account = self
            .accounts
            .get_mut(handle)
            .ok_or_else(|| LedgerError::UnknownAccount(handle.clone()))?;
        account.available_balance = account
            .available_balance
            .checked_add(amount)
            .ok_or(LedgerError::ArithmeticOverflow)?;
        Ok(())
    }

    pub fn get(&self, handle: &AccountHandle) -> Option<&JournalistAccount> {
        self.accounts.get(handle)
    }

    pub fn contains(&self, handle: &AccountHandle) -> bool {
        self.accounts.contains_key(handle)
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Sum of every account's available balance.
    pub fn total_available(&self) -> Option<u128> {
        self.accounts
            .values()
            .try_fold(0u128, |acc, a| acc.checked_add(a.available_balance))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alice() -> AccountHandle {
        AccountHandle::new("alice").unwrap()
    }

    fn registered() -> AccountRegistry {
        let mut registry = AccountRegistry::new();
        registry
            .register(alice(), "Alice".into(), "OrgX".into(), Timestamp::new(100))
            .unwrap();
        registry
    }

    #[test]
    fn register_starts_with_zero_balances() {
        let registry = registered();
        let account = registry.get(&alice()).unwrap();
        assert_eq!(account.total_tips_received, 0);
        assert_eq!(account.available_balance, 0);
        assert_eq!(account.registered_at, Timestamp::new(100));
    }

    #[test]
    fn double_registration_rejected_without_change() {
        let mut registry = registered();
        let err = registry
            .register(alice(), "Other".into(), "OrgY".into(), Timestamp::new(200))
            .unwrap_err();
        assert_eq!(err, LedgerError::AlreadyRegistered(alice()));
        let account = registry.get(&alice()).unwrap();
        assert_eq!(account.name, "Alice");
        assert_eq!(account.registered_at, Timestamp::new(100));
    }

    #[test]
    fn empty_name_or_organization_rejected() {
        let mut registry = AccountRegistry::new();
        assert!(matches!(
            registry.register(alice(), "".into(), "OrgX".into(), Timestamp::EPOCH),
            Err(LedgerError::InvalidInput(_))
        ));
        assert!(matches!(
            registry.register(alice(), "Alice".into(), "".into(), Timestamp::EPOCH),
            Err(LedgerError::InvalidInput(_))
        ));
        assert!(registry.is_empty());
    }

    #[test]
    fn credit_then_debit() {
        let mut registry = registered();
        registry.credit(&alice(), 500).unwrap();
        registry.debit(&alice(), 200).unwrap();
        let account = registry.get(&alice()).unwrap();
        assert_eq!(account.total_tips_received, 500);
        assert_eq!(account.available_balance, 300);
    }

    #[test]
    fn credit_unknown_account() {
        let mut registry = AccountRegistry::new();
        assert_eq!(
            registry.credit(&alice(), 1),
            Err(LedgerError::UnknownAccount(alice()))
        );
    }

    #[test]
    fn credit_overflow_leaves_balances() {
        let mut registry = registered();
        registry.credit(&alice(), u128::MAX).unwrap();
        registry.debit(&alice(), 10).unwrap();
        assert_eq!(
            registry.credit(&alice(), 20),
            Err(LedgerError::ArithmeticOverflow)
        );
        let account = registry.get(&alice()).unwrap();
        assert_eq!(account.total_tips_received, u128::MAX);
        assert_eq!(account.available_balance, u128::MAX - 10);
    }

    #[test]
    fn overdraw_rejected() {
        let mut registry = registered();
        registry.credit(&alice(), 50).unwrap();
        assert_eq!(
            registry.debit(&alice(), 51),
            Err(LedgerError::InsufficientBalance {
                needed: 51,
                available: 50
            })
        );
        assert_eq!(registry.get(&alice()).unwrap().available_balance, 50);
    }
}
