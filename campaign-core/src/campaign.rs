//! Per-campaign state machine
//!
//! One [`Campaign`] owns one contribution ledger, supporter set, and
//! request-approval lifecycle. Every operation either fully commits or
//! rejects with a typed error and no observable change; callers are
//! adversarial and any identity may attempt any operation.
//!
//! # Example
//!
//! ```
//! use campaign_core::{AccountId, Campaign, InMemoryTreasury};
//! use uuid::Uuid;
//!
//! # fn main() -> campaign_core::Result<()> {
//! let manager = AccountId::new("0xM");
//! let mut campaign = Campaign::new(Uuid::now_v7(), manager.clone(), 1_000, "dApp fund");
//!
//! for i in 0..3 {
//!     campaign.contribute(AccountId::new(format!("0xS{i}")), 1_001)?;
//! }
//!
//! let index = campaign.create_request(manager.clone(), "Hire design team", 500, AccountId::new("0xR"))?;
//! campaign.approve_request(AccountId::new("0xS0"), index)?;
//! campaign.approve_request(AccountId::new("0xS1"), index)?;
//!
//! let mut treasury = InMemoryTreasury::new();
//! campaign.finalize_request(manager, index, &mut treasury)?;
//! assert_eq!(treasury.balance_of(&AccountId::new("0xR")), 500);
//! # Ok(())
//! # }
//! ```

use crate::{
    quorum,
    treasury::Treasury,
    types::{AccountId, CampaignId, CampaignStats, Request, Role},
    Error, Result,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One crowdfunding campaign
///
/// Fields are private: the custodied balance and the request ledger are
/// mutated only through the operations below, never exposed as ambient
/// state. The whole struct is the serialization unit for durability.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Campaign {
    /// Campaign identifier assigned by the registry
    id: CampaignId,

    /// Creator; sole authority for creating and finalizing requests
    manager: AccountId,

    /// Contribution threshold for supporter membership
    minimum_contribution: u128,

    /// Free-form campaign description
    description: String,

    /// Identities that have ever contributed at least the minimum
    supporters: HashSet<AccountId>,

    /// Maintained incrementally; always equals `supporters.len()`
    supporter_count: u64,

    /// Custodied balance, increased by contribute and decreased by finalize
    balance: u128,

    /// Append-only request ledger with stable 0-based indices
    requests: Vec<Request>,

    /// Total value ever contributed
    total_contributed: u128,

    /// Total value ever released via finalized requests
    total_released: u128,

    /// Creation timestamp
    created_at: DateTime<Utc>,
}

impl Campaign {
    /// Create a new campaign with no supporters, no balance, no requests
    pub fn new(
        id: CampaignId,
        manager: AccountId,
        minimum_contribution: u128,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id,
            manager,
            minimum_contribution,
            description: description.into(),
            supporters: HashSet::new(),
            supporter_count: 0,
            balance: 0,
            requests: Vec::new(),
            total_contributed: 0,
            total_released: 0,
            created_at: Utc::now(),
        }
    }

    /// Accept a contribution of `value` from `caller`
    ///
    /// The first qualifying contribution makes `caller` a supporter; repeat
    /// contributions grow the balance without double-counting membership.
    pub fn contribute(&mut self, caller: AccountId, value: u128) -> Result<()> {
        if value < self.minimum_contribution {
            tracing::warn!(
                campaign = %self.id,
                caller = %caller,
                value,
                minimum = self.minimum_contribution,
                "Rejected contribution below minimum"
            );
            return Err(Error::InsufficientContribution {
                value,
                minimum: self.minimum_contribution,
            });
        }

        self.balance += value;
        self.total_contributed += value;

        if self.supporters.insert(caller.clone()) {
            self.supporter_count += 1;
            tracing::info!(
                campaign = %self.id,
                supporter = %caller,
                supporter_count = self.supporter_count,
                "New supporter joined"
            );
        } else {
            tracing::info!(campaign = %self.id, supporter = %caller, value, "Repeat contribution");
        }

        Ok(())
    }

    /// Append a new spending request; manager only
    ///
    /// No constraint is placed on `amount` relative to the current balance:
    /// request authoring is cheap and speculative, oversubscription is
    /// caught at finalization. Returns the new request's index.
    pub fn create_request(
        &mut self,
        caller: AccountId,
        description: impl Into<String>,
        amount: u128,
        recipient: AccountId,
    ) -> Result<usize> {
        self.require_manager(&caller)?;

        let index = self.requests.len();
        self.requests.push(Request::new(description, amount, recipient));

        tracing::info!(
            campaign = %self.id,
            request = index,
            amount,
            "Request created"
        );

        Ok(index)
    }

    /// Record an approval vote from `caller` on request `request_index`
    ///
    /// One account, one vote: a supporter can approve a given request at
    /// most once, and finalized requests are closed for voting.
    pub fn approve_request(&mut self, caller: AccountId, request_index: usize) -> Result<()> {
        let len = self.requests.len();
        let request = self
            .requests
            .get_mut(request_index)
            .ok_or(Error::IndexOutOfRange {
                index: request_index,
                len,
            })?;

        if !self.supporters.contains(&caller) {
            tracing::warn!(campaign = %self.id, caller = %caller, "Vote from non-supporter rejected");
            return Err(Error::Unauthorized {
                caller,
                required: Role::Supporter,
            });
        }

        if request.complete {
            return Err(Error::AlreadyFinalized { request_index });
        }

        if !request.approved_by.insert(caller.clone()) {
            return Err(Error::DuplicateVote {
                supporter: caller,
                request_index,
            });
        }
        request.approval_count += 1;

        tracing::info!(
            campaign = %self.id,
            request = request_index,
            supporter = %caller,
            approvals = request.approval_count,
            "Approval recorded"
        );

        Ok(())
    }

    /// Execute an approved request's fund transfer and mark it complete
    ///
    /// Preconditions, checked in order: caller is the manager, the request
    /// exists and is not complete, approvals form an absolute majority of
    /// the current supporter count, and the custodied balance covers the
    /// amount. The credit through `treasury` and the `complete` flag flip
    /// are indivisible: a failed credit leaves the request incomplete with
    /// approvals intact so finalization can be retried.
    pub fn finalize_request(
        &mut self,
        caller: AccountId,
        request_index: usize,
        treasury: &mut dyn Treasury,
    ) -> Result<()> {
        self.require_manager(&caller)?;

        let len = self.requests.len();
        let request = self
            .requests
            .get_mut(request_index)
            .ok_or(Error::IndexOutOfRange {
                index: request_index,
                len,
            })?;

        if request.complete {
            return Err(Error::AlreadyFinalized { request_index });
        }

        if !quorum::has_absolute_majority(request.approval_count, self.supporter_count) {
            tracing::warn!(
                campaign = %self.id,
                request = request_index,
                approvals = request.approval_count,
                supporters = self.supporter_count,
                "Finalization rejected: no absolute majority"
            );
            return Err(Error::InsufficientApprovals {
                approvals: request.approval_count,
                supporters: self.supporter_count,
            });
        }

        if self.balance < request.amount {
            return Err(Error::InsufficientFunds {
                requested: request.amount,
                available: self.balance,
            });
        }

        // Credit first: if the host rejects the transfer, nothing below runs
        // and the request stays open for a retry.
        treasury
            .credit(&request.recipient, request.amount)
            .map_err(|e| Error::Transfer(e.to_string()))?;

        self.balance -= request.amount;
        self.total_released += request.amount;
        request.complete = true;

        tracing::info!(
            campaign = %self.id,
            request = request_index,
            recipient = %request.recipient,
            amount = request.amount,
            balance = self.balance,
            "Request finalized"
        );

        Ok(())
    }

    /// Campaign identifier
    pub fn id(&self) -> CampaignId {
        self.id
    }

    /// Campaign manager
    pub fn manager(&self) -> &AccountId {
        &self.manager
    }

    /// Minimum contribution threshold
    pub fn minimum_contribution(&self) -> u128 {
        self.minimum_contribution
    }

    /// Campaign description
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Custodied balance
    pub fn balance(&self) -> u128 {
        self.balance
    }

    /// Number of distinct supporters
    pub fn supporter_count(&self) -> u64 {
        self.supporter_count
    }

    /// Whether `identity` has ever contributed at least the minimum
    pub fn is_supporter(&self, identity: &AccountId) -> bool {
        self.supporters.contains(identity)
    }

    /// Number of requests created
    pub fn request_count(&self) -> usize {
        self.requests.len()
    }

    /// Full record of request `index`
    pub fn request(&self, index: usize) -> Result<&Request> {
        self.requests.get(index).ok_or(Error::IndexOutOfRange {
            index,
            len: self.requests.len(),
        })
    }

    /// Creation timestamp
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Read-only summary of the campaign
    pub fn stats(&self) -> CampaignStats {
        CampaignStats {
            supporter_count: self.supporter_count,
            balance: self.balance,
            total_contributed: self.total_contributed,
            total_released: self.total_released,
            request_count: self.requests.len(),
            completed_requests: self.requests.iter().filter(|r| r.complete).count(),
        }
    }

    /// Verify the structural invariants
    ///
    /// Counts are maintained incrementally; this recomputes them and checks
    /// value conservation. Used by the property-test suite after randomized
    /// operation sequences.
    pub fn check_invariants(&self) -> Result<()> {
        if self.supporter_count != self.supporters.len() as u64 {
            return Err(Error::InvariantViolation(format!(
                "supporter_count {} != supporters.len() {}",
                self.supporter_count,
                self.supporters.len()
            )));
        }

        for (index, request) in self.requests.iter().enumerate() {
            if request.approval_count != request.approved_by.len() as u64 {
                return Err(Error::InvariantViolation(format!(
                    "request {index}: approval_count {} != approved_by.len() {}",
                    request.approval_count,
                    request.approved_by.len()
                )));
            }
            for voter in &request.approved_by {
                if !self.supporters.contains(voter) {
                    return Err(Error::InvariantViolation(format!(
                        "request {index}: vote from non-supporter {voter}"
                    )));
                }
            }
        }

        if self.total_released > self.total_contributed {
            return Err(Error::InvariantViolation(format!(
                "released {} exceeds contributed {}",
                self.total_released, self.total_contributed
            )));
        }
        if self.balance != self.total_contributed - self.total_released {
            return Err(Error::InvariantViolation(format!(
                "balance {} != contributed {} - released {}",
                self.balance, self.total_contributed, self.total_released
            )));
        }

        Ok(())
    }

    fn require_manager(&self, caller: &AccountId) -> Result<()> {
        if *caller != self.manager {
            tracing::warn!(
                campaign = %self.id,
                caller = %caller,
                "Manager-only operation rejected"
            );
            return Err(Error::Unauthorized {
                caller: caller.clone(),
                required: Role::Manager,
            });
        }
        Ok(())
    }
}
