//! CrowdCollab Campaign Registry
//!
//! Append-only directory of campaign instances and the execution boundary
//! around them: every mutating call against one campaign is serialized
//! behind that campaign's mutex, distinct campaigns run in parallel, and
//! the whole directory can be snapshotted to disk and restored.
//!
//! # Example
//!
//! ```
//! use campaign_core::AccountId;
//! use campaign_registry::{CampaignRegistry, Config};
//!
//! # fn main() -> campaign_registry::Result<()> {
//! let registry = CampaignRegistry::new(Config::default());
//! let manager = AccountId::new("0xM");
//!
//! let id = registry.create_campaign(manager.clone(), 1_000, "community fund");
//! registry.contribute(id, AccountId::new("0xS"), 1_500)?;
//!
//! assert_eq!(registry.list_campaigns(), vec![id]);
//! assert_eq!(registry.supporter_count(id)?, 1);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unused_qualifications)]

pub mod config;
pub mod error;
pub mod registry;

// Re-exports
pub use config::{Config, SnapshotConfig};
pub use error::{Error, Result};
pub use registry::CampaignRegistry;

/// Initialize structured logging for hosts embedding the registry
///
/// Respects `RUST_LOG`, defaulting to `INFO`. Safe to call once per
/// process; subsequent calls return an error from the subscriber and are
/// ignored here.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .try_init();
}
