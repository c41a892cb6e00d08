//! Core types for the campaign engine
//!
//! All types are designed for:
//! - Deterministic serialization (bincode)
//! - Memory safety (no unsafe code)
//! - Exact arithmetic (unsigned integer value units)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use uuid::Uuid;

/// Campaign identifier (UUIDv7 for time-ordering)
pub type CampaignId = Uuid;

/// Account identifier (address, IBAN, etc.)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AccountId(String);

impl AccountId {
    /// Create new account ID
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get as string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Role an operation requires of its caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    /// Campaign creator; sole authority for creating and finalizing requests
    Manager,
    /// Identity that has contributed at least the minimum threshold
    Supporter,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Manager => write!(f, "manager"),
            Role::Supporter => write!(f, "supporter"),
        }
    }
}

/// Proposed spend of campaign funds, requiring supporter approval
///
/// Owned exclusively by its campaign. Created incomplete, transitions to
/// complete exactly once and never mutates afterward.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Request {
    /// What the spend is for
    pub description: String,

    /// Value to transfer on completion
    pub amount: u128,

    /// Destination account for the transfer
    pub recipient: AccountId,

    /// Whether the request has been finalized
    pub complete: bool,

    /// Number of approval votes; always equals `approved_by.len()`
    pub approval_count: u64,

    /// Supporters that have voted on this request
    pub approved_by: HashSet<AccountId>,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl Request {
    /// Create a new incomplete request with no approvals
    pub fn new(description: impl Into<String>, amount: u128, recipient: AccountId) -> Self {
        Self {
            description: description.into(),
            amount,
            recipient,
            complete: false,
            approval_count: 0,
            approved_by: HashSet::new(),
            created_at: Utc::now(),
        }
    }

    /// Whether the given identity has voted on this request
    pub fn has_approval_from(&self, identity: &AccountId) -> bool {
        self.approved_by.contains(identity)
    }
}

/// Read-only summary of one campaign
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CampaignStats {
    /// Number of distinct supporters
    pub supporter_count: u64,

    /// Custodied balance
    pub balance: u128,

    /// Total value ever contributed
    pub total_contributed: u128,

    /// Total value ever released via finalized requests
    pub total_released: u128,

    /// Number of requests created
    pub request_count: usize,

    /// Number of requests finalized
    pub completed_requests: usize,
}
