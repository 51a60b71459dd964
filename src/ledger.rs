/*
    ALICE-CDO
    Copyright (C) 2026 Moroya Sakamoto
*/

use std::collections::HashMap;

/// Account balance on the value ledger.
#[derive(Debug, Clone)]
pub struct LedgerAccount {
    pub account_id: u64,
    /// Available balance in units.
    pub balance: u64,
}

/// Error returned when a ledger operation fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// The specified account was not found on the ledger.
    AccountNotFound(u64),
    /// The account has insufficient balance for the transfer.
    InsufficientBalance {
        account_id: u64,
        required: u64,
        available: u64,
    },
}

/// Value ledger.
///
/// Maintains account balances and moves units between them. A pool treats
/// its own ledger balance as ground truth for "total value ever received
/// minus total ever withdrawn".
pub struct ValueLedger {
    accounts: HashMap<u64, LedgerAccount>,
    next_id: u64,
}

impl ValueLedger {
    /// Create an empty ledger. The first opened account has id 1.
    #[inline(always)]
    pub fn new() -> Self {
        Self {
            accounts: HashMap::new(),
            next_id: 1,
        }
    }

    /// Open a fresh zero-balance account and return its identifier.
    pub fn open_account(&mut self) -> u64 {
        let account_id = self.next_id;
        self.next_id += 1;
        self.accounts.insert(
            account_id,
            LedgerAccount {
                account_id,
                balance: 0,
            },
        );
        account_id
    }

    /// Credit an account with inbound value (e.g. an obligation repayment).
    pub fn deposit(&mut self, account_id: u64, amount: u64) -> Result<(), LedgerError> {
        let acc = self
            .accounts
            .get_mut(&account_id)
            .ok_or(LedgerError::AccountNotFound(account_id))?;
        acc.balance = acc.balance.saturating_add(amount);
        Ok(())
    }

    /// Current balance of an account; zero if the account does not exist.
    #[inline(always)]
    pub fn balance_of(&self, account_id: u64) -> u64 {
        self.accounts.get(&account_id).map_or(0, |a| a.balance)
    }

    /// Look up an account by identifier.
    #[inline(always)]
    pub fn get_account(&self, account_id: u64) -> Option<&LedgerAccount> {
        self.accounts.get(&account_id)
    }

    /// Move `amount` units from one account to another.
    ///
    /// Checks that both accounts exist and that the source covers the full
    /// amount before mutating anything.
    pub fn transfer(&mut self, from: u64, to: u64, amount: u64) -> Result<(), LedgerError> {
        // Verify both accounts exist before mutating anything.
        if !self.accounts.contains_key(&from) {
            return Err(LedgerError::AccountNotFound(from));
        }
        if !self.accounts.contains_key(&to) {
            return Err(LedgerError::AccountNotFound(to));
        }

        let available = self.balance_of(from);
        if available < amount {
            return Err(LedgerError::InsufficientBalance {
                account_id: from,
                required: amount,
                available,
            });
        }

        // Perform the transfer; both accounts were verified above.
        if let Some(acc) = self.accounts.get_mut(&from) {
            acc.balance -= amount;
        }
        if let Some(acc) = self.accounts.get_mut(&to) {
            acc.balance += amount;
        }

        Ok(())
    }
}

impl Default for ValueLedger {
    #[inline(always)]
    fn default() -> Self {
        Self::new()
    }
}
