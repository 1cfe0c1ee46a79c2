//! # Node Flow
//!
//! A name's whole life driven through the RPC services while the block
//! producer mines in the background:
//!
//! ```text
//! NameService ──put──→ Ledger (transactions)
//!      │
//!      ├──submit──→ TransactionPool ──→ BlockProducer ──accept──→ Ledger (blocks)
//!      │
//!      └──broadcast──→ InMemoryBroadcaster ──→ subscribers
//! ```

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use nc_02_block_production::HIGHEST_TARGET;
    use nc_03_ledger_storage::{InMemoryKVStore, NameStatus};
    use node_runtime::rpc::{
        GetBlockRequest, ImportPrivateKeyRequest, NameAllocationRequest, NameDeallocationRequest,
        NameReservationRequest,
    };
    use node_runtime::{NodeConfig, NodeContainer, RoundOutcome};
    use shared_types::hash_from_hex;
    use tokio::sync::watch;

    const NAME: &str = "my-new-repository";

    fn node() -> NodeContainer {
        let mut config = NodeConfig::default();
        config.mining.target_bits = HIGHEST_TARGET;
        config.mining.block_interval_ms = 10;
        NodeContainer::with_store(config, Box::new(InMemoryKVStore::new()))
    }

    fn import_key(node: &NodeContainer, alias: &str, seed: u8) {
        node.key_service()
            .import_private_key(ImportPrivateKeyRequest {
                alias: alias.into(),
                key: hex::encode([seed; 32]),
                main: false,
            })
            .unwrap();
    }

    /// Mine one round and return the new head.
    async fn mine_round(node: &NodeContainer) -> String {
        match node.block_producer().produce_round().await.unwrap() {
            RoundOutcome::Accepted(hash) => hex::encode(hash),
            other => panic!("expected a mined block, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_rpc_lifecycle_with_manual_rounds() {
        let node = node();
        import_key(&node, "me", 1);
        let names = node.name_service();
        let blocks = node.block_service();

        let reservation = names
            .name_reservation(NameReservationRequest {
                alias: "me".into(),
                name: NAME.into(),
            })
            .await
            .unwrap();
        let head = mine_round(&node).await;
        assert_eq!(blocks.get_last_block().unwrap().hash, Some(head.clone()));

        names
            .name_allocation(NameAllocationRequest {
                alias: "me".into(),
                name: NAME.into(),
                random: reservation.random.clone(),
            })
            .await
            .unwrap();
        let second = mine_round(&node).await;
        let block = blocks
            .get_block(GetBlockRequest {
                hash: second.clone(),
            })
            .unwrap();
        assert_eq!(block.previous_block_hash, head);
        assert_eq!(block.num_transactions, 1);
        assert!(matches!(
            node.ledger.name_status(NAME).unwrap(),
            NameStatus::Allocated { .. }
        ));

        names
            .name_deallocation(NameDeallocationRequest {
                alias: "me".into(),
                name: NAME.into(),
            })
            .await
            .unwrap();
        mine_round(&node).await;
        assert_eq!(node.ledger.name_status(NAME).unwrap(), NameStatus::Free);

        // A second key replaying the original nonce never makes it into a block.
        import_key(&node, "thief", 2);
        names
            .name_allocation(NameAllocationRequest {
                alias: "thief".into(),
                name: NAME.into(),
                random: reservation.random,
            })
            .await
            .unwrap();
        assert_eq!(
            node.block_producer().produce_round().await.unwrap(),
            RoundOutcome::Idle
        );
        assert!(node.pool.is_empty());
        assert_eq!(node.ledger.name_status(NAME).unwrap(), NameStatus::Free);
    }

    #[tokio::test]
    async fn test_background_producer_mines_submissions() {
        let node = node();
        import_key(&node, "me", 1);
        let mut subscriber = node.broadcaster.subscribe();

        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let producer = tokio::spawn(node.block_producer().run(shutdown_rx));

        let reservation = node
            .name_service()
            .name_reservation(NameReservationRequest {
                alias: "me".into(),
                name: NAME.into(),
            })
            .await
            .unwrap();
        let broadcast = subscriber.recv().await.unwrap();
        assert_eq!(hex::encode(broadcast.hash()), reservation.id);

        let reservation_hash = hash_from_hex(&reservation.id).unwrap();
        tokio::time::timeout(Duration::from_secs(10), async {
            while node.pool.contains(&reservation_hash) {
                tokio::time::sleep(Duration::from_millis(10)).await;
            }
        })
        .await
        .expect("reservation was not mined");

        let head = node.ledger.get_last_block().unwrap().unwrap();
        assert_eq!(head.transactions.len(), 1);
        assert_eq!(head.transactions[0].hash(), reservation_hash);

        shutdown_tx.send(true).unwrap();
        tokio::time::timeout(Duration::from_secs(5), producer)
            .await
            .expect("producer did not stop")
            .unwrap();
    }

    #[tokio::test]
    async fn test_keyring_through_rpc() {
        let node = node();
        let keys = node.key_service();
        for (alias, seed) in [("alias", 1), ("aaron", 2)] {
            import_key(&node, alias, seed);
        }
        assert_eq!(keys.get_main_key().unwrap().alias.as_deref(), Some("aaron"));

        let reply = keys
            .set_main_key(node_runtime::rpc::SetMainKeyRequest {
                alias: "alias".into(),
            })
            .unwrap();
        assert!(reply.success);
        import_key(&node, "zed", 3);
        assert_eq!(keys.get_main_key().unwrap().alias.as_deref(), Some("alias"));
        assert_eq!(
            keys.list_private_keys().unwrap().aliases,
            vec!["aaron", "alias", "zed"]
        );
    }
}
