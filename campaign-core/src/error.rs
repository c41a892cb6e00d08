//! Error types for the campaign engine

use crate::types::{AccountId, Role};
use thiserror::Error;

/// Result type for campaign operations
pub type Result<T> = std::result::Result<T, Error>;

/// Campaign errors
///
/// Every precondition failure aborts the whole operation with no partial
/// state mutation; callers may resubmit after correcting the violation.
#[derive(Error, Debug)]
pub enum Error {
    /// Caller lacks the required role for this operation
    #[error("Unauthorized: {caller} is not a campaign {required}")]
    Unauthorized {
        /// Identity that attempted the operation
        caller: AccountId,
        /// Role the operation requires
        required: Role,
    },

    /// Contribution below the campaign threshold
    #[error("Contribution of {value} is below the minimum of {minimum}")]
    InsufficientContribution {
        /// Value attached to the call
        value: u128,
        /// Campaign minimum contribution
        minimum: u128,
    },

    /// Same supporter voting twice on one request
    #[error("{supporter} has already voted on request {request_index}")]
    DuplicateVote {
        /// Supporter that already voted
        supporter: AccountId,
        /// Request voted on
        request_index: usize,
    },

    /// Absolute majority not reached
    #[error("{approvals} approvals of {supporters} supporters is not an absolute majority")]
    InsufficientApprovals {
        /// Approvals recorded on the request
        approvals: u64,
        /// Current supporter count
        supporters: u64,
    },

    /// Custodied balance cannot cover the transfer
    #[error("Insufficient funds: requested {requested}, available {available}")]
    InsufficientFunds {
        /// Amount the request would release
        requested: u128,
        /// Custodied balance at finalization time
        available: u128,
    },

    /// Operation attempted against a completed request
    #[error("Request {request_index} is already finalized")]
    AlreadyFinalized {
        /// Index of the completed request
        request_index: usize,
    },

    /// Invalid request reference
    #[error("Request index {index} out of range (len {len})")]
    IndexOutOfRange {
        /// Index supplied by the caller
        index: usize,
        /// Current request count
        len: usize,
    },

    /// Host environment rejected the fund transfer
    #[error("Transfer failed: {0}")]
    Transfer(String),

    /// Invariant violation (supporter count, balance conservation, etc.)
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] bincode::Error),

    /// JSON export error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl From<String> for Error {
    fn from(msg: String) -> Self {
        Error::Other(msg)
    }
}

impl From<&str> for Error {
    fn from(msg: &str) -> Self {
        Error::Other(msg.to_string())
    }
}
