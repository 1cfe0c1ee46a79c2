//! # Node Restart Tests
//!
//! A node configured from environment-style variables keeps its keyring and
//! chain across restarts on the file backend.

use std::collections::HashMap;

use nc_02_block_production::HIGHEST_TARGET;
use nc_03_ledger_storage::NameStatus;
use node_runtime::rpc::{ImportPrivateKeyRequest, NameAllocationRequest, NameReservationRequest};
use node_runtime::{NodeConfig, NodeContainer, RoundOutcome};

fn config_for(dir: &std::path::Path) -> NodeConfig {
    let vars: HashMap<&str, String> = HashMap::from([
        ("NC_DATA_DIR", dir.display().to_string()),
        ("NC_STORAGE_BACKEND", "file".to_string()),
        ("NC_TARGET_BITS", format!("{HIGHEST_TARGET:#x}")),
    ]);
    let config = NodeConfig::from_lookup(|name| vars.get(name).cloned()).unwrap();
    config.validate().unwrap();
    config
}

#[tokio::test]
async fn test_chain_and_keyring_survive_restart() {
    let dir = tempfile::tempdir().unwrap();

    let head = {
        let node = NodeContainer::new(config_for(dir.path())).unwrap();
        node.key_service()
            .import_private_key(ImportPrivateKeyRequest {
                alias: "me".into(),
                key: hex::encode([5u8; 32]),
                main: true,
            })
            .unwrap();

        let names = node.name_service();
        let reservation = names
            .name_reservation(NameReservationRequest {
                alias: "me".into(),
                name: "repo".into(),
            })
            .await
            .unwrap();
        names
            .name_allocation(NameAllocationRequest {
                alias: "me".into(),
                name: "repo".into(),
                random: reservation.random,
            })
            .await
            .unwrap();

        match node.block_producer().produce_round().await.unwrap() {
            RoundOutcome::Accepted(hash) => hash,
            other => panic!("expected a mined block, got {other:?}"),
        }
    };

    let node = NodeContainer::new(config_for(dir.path())).unwrap();
    assert_eq!(node.ledger.last_block_hash().unwrap(), Some(head));
    assert_eq!(
        node.key_service().get_main_key().unwrap().alias.as_deref(),
        Some("me")
    );
    assert!(matches!(
        node.ledger.name_status("repo").unwrap(),
        NameStatus::Allocated { .. }
    ));
    assert!(node.pool.is_empty());
}

#[test]
fn test_unknown_backend_rejected() {
    let err = NodeConfig::from_lookup(|name| {
        (name == "NC_STORAGE_BACKEND").then(|| "postgres".to_string())
    })
    .unwrap_err();
    assert!(err.to_string().contains("NC_STORAGE_BACKEND"));
}
