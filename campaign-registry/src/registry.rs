//! Campaign directory and execution boundary
//!
//! The registry owns every campaign instance and is the host-side
//! mutual-exclusion boundary the core assumes: all mutating calls against
//! one campaign are serialized behind a single mutex, while distinct
//! campaigns (which share no state) proceed in parallel. The directory of
//! identifiers is append-only and preserves creation order.

use crate::{Config, Error, Result};
use campaign_core::{
    snapshot, AccountId, Campaign, CampaignId, CampaignStats, InMemoryTreasury, Request,
};
use dashmap::DashMap;
use parking_lot::Mutex;
use std::fs;
use uuid::Uuid;

/// Append-only directory of campaign instances
pub struct CampaignRegistry {
    /// Configuration
    config: Config,

    /// Campaign instances, each behind its own lock
    campaigns: DashMap<CampaignId, Mutex<Campaign>>,

    /// Identifiers in creation order
    directory: Mutex<Vec<CampaignId>>,

    /// Shared host treasury finalized requests pay into
    treasury: Mutex<InMemoryTreasury>,
}

impl CampaignRegistry {
    /// Create an empty registry
    pub fn new(config: Config) -> Self {
        Self {
            config,
            campaigns: DashMap::new(),
            directory: Mutex::new(Vec::new()),
            treasury: Mutex::new(InMemoryTreasury::new()),
        }
    }

    /// Open a registry, restoring snapshots if a manifest is present
    pub fn open(config: Config) -> Result<Self> {
        let manifest_path = config.data_dir.join(&config.snapshot.manifest_name);
        if manifest_path.exists() {
            Self::restore(config)
        } else {
            Ok(Self::new(config))
        }
    }

    /// Create a new campaign and append it to the directory
    pub fn create_campaign(
        &self,
        manager: AccountId,
        minimum_contribution: u128,
        description: impl Into<String>,
    ) -> CampaignId {
        let id = Uuid::now_v7();
        let campaign = Campaign::new(id, manager, minimum_contribution, description);

        let mut directory = self.directory.lock();
        self.campaigns.insert(id, Mutex::new(campaign));
        directory.push(id);

        tracing::info!(campaign = %id, total = directory.len(), "Campaign created");
        id
    }

    /// Campaign identifiers in creation order
    pub fn list_campaigns(&self) -> Vec<CampaignId> {
        self.directory.lock().clone()
    }

    /// Number of campaigns ever created
    pub fn campaign_count(&self) -> usize {
        self.directory.lock().len()
    }

    /// Run `f` against one campaign under its lock
    ///
    /// This is the serialization point: no other operation observes the
    /// campaign while `f` runs.
    pub fn with_campaign<R>(
        &self,
        id: CampaignId,
        f: impl FnOnce(&mut Campaign) -> R,
    ) -> Result<R> {
        let entry = self
            .campaigns
            .get(&id)
            .ok_or(Error::CampaignNotFound(id))?;
        let mut campaign = entry.lock();
        Ok(f(&mut campaign))
    }

    /// Contribute `value` from `caller` to campaign `id`
    pub fn contribute(&self, id: CampaignId, caller: AccountId, value: u128) -> Result<()> {
        self.with_campaign(id, |campaign| campaign.contribute(caller, value))?
            .map_err(Error::from)
    }

    /// Create a spending request on campaign `id`; manager only
    pub fn create_request(
        &self,
        id: CampaignId,
        caller: AccountId,
        description: impl Into<String>,
        amount: u128,
        recipient: AccountId,
    ) -> Result<usize> {
        self.with_campaign(id, |campaign| {
            campaign.create_request(caller, description, amount, recipient)
        })?
        .map_err(Error::from)
    }

    /// Record an approval vote on campaign `id`
    pub fn approve_request(
        &self,
        id: CampaignId,
        caller: AccountId,
        request_index: usize,
    ) -> Result<()> {
        self.with_campaign(id, |campaign| campaign.approve_request(caller, request_index))?
            .map_err(Error::from)
    }

    /// Finalize a request on campaign `id`, paying into the registry treasury
    pub fn finalize_request(
        &self,
        id: CampaignId,
        caller: AccountId,
        request_index: usize,
    ) -> Result<()> {
        let entry = self
            .campaigns
            .get(&id)
            .ok_or(Error::CampaignNotFound(id))?;
        let mut campaign = entry.lock();
        // Lock order is always campaign, then treasury
        let mut treasury = self.treasury.lock();
        campaign.finalize_request(caller, request_index, &mut *treasury)?;
        Ok(())
    }

    /// Supporter count of campaign `id`
    pub fn supporter_count(&self, id: CampaignId) -> Result<u64> {
        self.with_campaign(id, |campaign| campaign.supporter_count())
    }

    /// Whether `identity` is a supporter of campaign `id`
    pub fn is_supporter(&self, id: CampaignId, identity: &AccountId) -> Result<bool> {
        self.with_campaign(id, |campaign| campaign.is_supporter(identity))
    }

    /// Full record of one request on campaign `id`
    pub fn request(&self, id: CampaignId, request_index: usize) -> Result<Request> {
        self.with_campaign(id, |campaign| {
            campaign.request(request_index).map(|request| request.clone())
        })?
        .map_err(Error::from)
    }

    /// Read-only summary of campaign `id`
    pub fn stats(&self, id: CampaignId) -> Result<CampaignStats> {
        self.with_campaign(id, |campaign| campaign.stats())
    }

    /// Balance the host treasury holds for `account`
    pub fn treasury_balance_of(&self, account: &AccountId) -> u128 {
        self.treasury.lock().balance_of(account)
    }

    /// Persist every campaign to the data directory
    ///
    /// Writes one bincode snapshot per campaign plus a JSON manifest
    /// recording the directory order.
    pub fn snapshot_all(&self) -> Result<()> {
        if !self.config.snapshot.enabled {
            tracing::debug!("Snapshots disabled, skipping");
            return Ok(());
        }

        fs::create_dir_all(&self.config.data_dir)?;

        let directory = self.directory.lock().clone();
        for id in &directory {
            let path = self.config.data_dir.join(format!("{id}.bin"));
            self.with_campaign(*id, |campaign| snapshot::save(campaign, &path))??;
        }

        let manifest_path = self
            .config
            .data_dir
            .join(&self.config.snapshot.manifest_name);
        fs::write(&manifest_path, serde_json::to_vec_pretty(&directory)?)?;

        tracing::info!(
            campaigns = directory.len(),
            dir = %self.config.data_dir.display(),
            "Registry snapshot written"
        );
        Ok(())
    }

    /// Rebuild a registry from snapshots, preserving directory order
    pub fn restore(config: Config) -> Result<Self> {
        let manifest_path = config.data_dir.join(&config.snapshot.manifest_name);
        let directory: Vec<CampaignId> = serde_json::from_slice(&fs::read(&manifest_path)?)?;

        let registry = Self::new(config);
        for id in &directory {
            let path = registry.config.data_dir.join(format!("{id}.bin"));
            let campaign = snapshot::load(&path)?;
            registry.campaigns.insert(*id, Mutex::new(campaign));
        }
        *registry.directory.lock() = directory;

        tracing::info!(
            campaigns = registry.campaign_count(),
            "Registry restored from snapshots"
        );
        Ok(registry)
    }
}
