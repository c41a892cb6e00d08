//! CrowdCollab Campaign Core
//!
//! Per-campaign crowdfunding state machine: a manager raises value from
//! supporters and spends it through requests that must win an absolute
//! majority of supporter votes before funds are released.
//!
//! # Architecture
//!
//! - **Check-then-commit**: every operation validates all preconditions,
//!   then mutates; a rejection leaves no observable change
//! - **One account, one vote**: supporter and approval membership are
//!   explicit identity-keyed sets
//! - **Absolute majority**: finalization requires strictly more approvals
//!   than half the supporter count (floor)
//! - **Sequential execution**: the core is synchronous; hosts serialize
//!   operations per campaign behind a single mutex
//!
//! # Invariants
//!
//! - `supporter_count == supporters.len()` after every operation
//! - `approval_count == approved_by.len()` for every request
//! - Completed requests never mutate again
//! - Value released never exceeds value contributed

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unused_qualifications)]

pub mod campaign;
pub mod error;
pub mod quorum;
pub mod snapshot;
pub mod treasury;
pub mod types;

// Re-exports
pub use campaign::Campaign;
pub use error::{Error, Result};
pub use treasury::{InMemoryTreasury, Treasury};
pub use types::{AccountId, CampaignId, CampaignStats, Request, Role};
