//! Campaign snapshots
//!
//! The full [`Campaign`] struct is the serialization unit: manager,
//! threshold, description, supporter set, balance, and the request ledger
//! all round-trip through one bincode blob. Scheduling durability is the
//! host environment's job; these helpers only move one campaign between
//! memory and a file.

use crate::{campaign::Campaign, Result};
use std::fs;
use std::path::Path;

/// Write `campaign` to `path` as a bincode snapshot
pub fn save(campaign: &Campaign, path: impl AsRef<Path>) -> Result<()> {
    let bytes = bincode::serialize(campaign)?;
    fs::write(path.as_ref(), bytes)?;
    tracing::debug!(campaign = %campaign.id(), path = %path.as_ref().display(), "Snapshot written");
    Ok(())
}

/// Load a campaign from a bincode snapshot at `path`
pub fn load(path: impl AsRef<Path>) -> Result<Campaign> {
    let bytes = fs::read(path.as_ref())?;
    let campaign = bincode::deserialize(&bytes)?;
    Ok(campaign)
}

/// Render `campaign` as pretty-printed JSON for inspection
pub fn export_json(campaign: &Campaign) -> Result<String> {
    Ok(serde_json::to_string_pretty(campaign)?)
}
