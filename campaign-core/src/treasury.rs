//! Fund transfer seam
//!
//! Finalization pays the approved amount out through a [`Treasury`], the
//! host environment's account-balance boundary. A failed credit must leave
//! the request incomplete and its approvals intact, so the trait reports
//! failure instead of panicking and the campaign commits its own state only
//! after the credit succeeds.

use crate::types::AccountId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Transfer failure reported by the host environment
#[derive(Error, Debug)]
pub enum TransferError {
    /// Crediting would overflow the recipient balance
    #[error("balance overflow crediting {0}")]
    Overflow(AccountId),

    /// Host rejected the transfer
    #[error("transfer rejected: {0}")]
    Rejected(String),
}

/// Destination for released campaign funds
pub trait Treasury {
    /// Credit `amount` to `recipient`
    ///
    /// Must either fully apply the credit or fail with no observable change.
    fn credit(&mut self, recipient: &AccountId, amount: u128) -> Result<(), TransferError>;
}

/// In-memory account balances
///
/// Stands in for the host environment in tests and single-process
/// deployments.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InMemoryTreasury {
    accounts: HashMap<AccountId, u128>,
}

impl InMemoryTreasury {
    /// Create an empty treasury
    pub fn new() -> Self {
        Self::default()
    }

    /// Balance held by `account` (zero if never credited)
    pub fn balance_of(&self, account: &AccountId) -> u128 {
        self.accounts.get(account).copied().unwrap_or(0)
    }
}

impl Treasury for InMemoryTreasury {
    fn credit(&mut self, recipient: &AccountId, amount: u128) -> Result<(), TransferError> {
        let balance = self.accounts.entry(recipient.clone()).or_insert(0);
        *balance = balance
            .checked_add(amount)
            .ok_or_else(|| TransferError::Overflow(recipient.clone()))?;
        Ok(())
    }
}
