//! End-to-end tests through the registry boundary
//!
//! Exercises the full campaign lifecycle the way an external caller would:
//! create a campaign through the registry, contribute, author and approve
//! requests, finalize, and read back balances — plus snapshot/restore of
//! the whole directory.

use campaign_core::{AccountId, Error as CampaignError};
use campaign_registry::{CampaignRegistry, Config, Error};

fn manager() -> AccountId {
    AccountId::new("0xMANAGER")
}

fn supporter(i: usize) -> AccountId {
    AccountId::new(format!("0xSUPPORTER{i}"))
}

fn recipient() -> AccountId {
    AccountId::new("0xRECIPIENT")
}

#[test]
fn test_full_campaign_lifecycle() {
    let registry = CampaignRegistry::new(Config::default());
    let id = registry.create_campaign(manager(), 1_000, "test CrowdCollab dApp");

    // Five distinct supporters join above the minimum
    for i in 0..5 {
        registry.contribute(id, supporter(i), 1_001).unwrap();
    }
    assert_eq!(registry.supporter_count(id).unwrap(), 5);
    assert!(registry.is_supporter(id, &supporter(0)).unwrap());
    assert!(!registry.is_supporter(id, &recipient()).unwrap());

    // Manager authors a request
    let index = registry
        .create_request(id, manager(), "Hire design team", 500, recipient())
        .unwrap();
    assert_eq!(index, 0);

    // Three of five approve: absolute majority
    for i in 0..3 {
        registry.approve_request(id, supporter(i), index).unwrap();
    }
    assert_eq!(registry.request(id, index).unwrap().approval_count, 3);

    registry.finalize_request(id, manager(), index).unwrap();

    let request = registry.request(id, index).unwrap();
    assert!(request.complete);
    assert_eq!(registry.treasury_balance_of(&recipient()), 500);
    assert_eq!(registry.stats(id).unwrap().balance, 5 * 1_001 - 500);
}

#[test]
fn test_minority_cannot_spend() {
    let registry = CampaignRegistry::new(Config::default());
    let id = registry.create_campaign(manager(), 1_000, "minority test");

    for i in 0..5 {
        registry.contribute(id, supporter(i), 1_001).unwrap();
    }
    let index = registry
        .create_request(id, manager(), "spend", 500, recipient())
        .unwrap();
    registry.approve_request(id, supporter(0), index).unwrap();
    registry.approve_request(id, supporter(1), index).unwrap();

    let result = registry.finalize_request(id, manager(), index);
    assert!(matches!(
        result,
        Err(Error::Campaign(CampaignError::InsufficientApprovals {
            approvals: 2,
            supporters: 5,
        }))
    ));
    assert!(!registry.request(id, index).unwrap().complete);
    assert_eq!(registry.treasury_balance_of(&recipient()), 0);
}

#[test]
fn test_non_supporter_cannot_vote() {
    let registry = CampaignRegistry::new(Config::default());
    let id = registry.create_campaign(manager(), 1_000, "outsider test");

    registry.contribute(id, supporter(0), 1_001).unwrap();
    let index = registry
        .create_request(id, manager(), "spend", 100, recipient())
        .unwrap();

    // Contributed below the minimum, so never became a supporter
    let outsider = AccountId::new("0xOUTSIDER");
    let contribution = registry.contribute(id, outsider.clone(), 999);
    assert!(matches!(
        contribution,
        Err(Error::Campaign(CampaignError::InsufficientContribution { .. }))
    ));

    let vote = registry.approve_request(id, outsider, index);
    assert!(matches!(
        vote,
        Err(Error::Campaign(CampaignError::Unauthorized { .. }))
    ));
    assert_eq!(registry.request(id, index).unwrap().approval_count, 0);
}

#[test]
fn test_snapshot_and_restore_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config {
        data_dir: dir.path().to_path_buf(),
        ..Config::default()
    };

    let registry = CampaignRegistry::new(config.clone());
    let first = registry.create_campaign(manager(), 1_000, "persisted one");
    let second = registry.create_campaign(manager(), 2_000, "persisted two");

    for i in 0..3 {
        registry.contribute(first, supporter(i), 1_500).unwrap();
    }
    let index = registry
        .create_request(first, manager(), "spend", 400, recipient())
        .unwrap();
    registry.approve_request(first, supporter(0), index).unwrap();
    registry.approve_request(first, supporter(1), index).unwrap();
    registry.finalize_request(first, manager(), index).unwrap();

    registry.snapshot_all().unwrap();

    let restored = CampaignRegistry::open(config).unwrap();
    assert_eq!(restored.list_campaigns(), vec![first, second]);

    let stats = restored.stats(first).unwrap();
    assert_eq!(stats.supporter_count, 3);
    assert_eq!(stats.balance, 3 * 1_500 - 400);
    assert_eq!(stats.completed_requests, 1);
    assert!(restored.request(first, index).unwrap().complete);

    assert_eq!(restored.stats(second).unwrap().supporter_count, 0);
    assert_eq!(restored.stats(second).unwrap().balance, 0);

    // Restored campaigns keep enforcing the state machine
    let result = restored.finalize_request(first, manager(), index);
    assert!(matches!(
        result,
        Err(Error::Campaign(CampaignError::AlreadyFinalized { .. }))
    ));
}

#[test]
fn test_open_without_snapshots_starts_empty() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config {
        data_dir: dir.path().to_path_buf(),
        ..Config::default()
    };

    let registry = CampaignRegistry::open(config).unwrap();
    assert!(registry.list_campaigns().is_empty());
}

#[test]
fn test_snapshot_disabled_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = Config {
        data_dir: dir.path().to_path_buf(),
        ..Config::default()
    };
    config.snapshot.enabled = false;

    let registry = CampaignRegistry::new(config.clone());
    registry.create_campaign(manager(), 1_000, "ephemeral");
    registry.snapshot_all().unwrap();

    assert!(!dir.path().join(&config.snapshot.manifest_name).exists());
}

#[test]
fn test_parallel_campaigns() {
    use std::sync::Arc;
    use std::thread;

    let registry = Arc::new(CampaignRegistry::new(Config::default()));
    let ids: Vec<_> = (0..4)
        .map(|i| registry.create_campaign(manager(), 100, format!("parallel {i}")))
        .collect();

    let handles: Vec<_> = ids
        .iter()
        .map(|&id| {
            let registry = Arc::clone(&registry);
            thread::spawn(move || {
                for i in 0..50 {
                    registry.contribute(id, supporter(i % 5), 100).unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    for id in ids {
        let stats = registry.stats(id).unwrap();
        assert_eq!(stats.supporter_count, 5);
        assert_eq!(stats.balance, 50 * 100);
        registry
            .with_campaign(id, |campaign| campaign.check_invariants())
            .unwrap()
            .unwrap();
    }
}
