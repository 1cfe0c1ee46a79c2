//! # Name Lifecycle Scenarios
//!
//! Commit-reveal flows driven through `LedgerService::accept_block`, the same
//! path mined blocks take in the node.

#[cfg(test)]
mod tests {
    use nc_01_name_transactions::Transaction;
    use nc_02_block_production::{Block, VerificationError, HIGHEST_TARGET};
    use nc_03_ledger_storage::{LedgerError, NameStatus, NamingRuleError};
    use shared_crypto::Ed25519KeyPair;
    use shared_types::EMPTY_HASH;

    use super::super::{mine_and_accept, TestLedger};

    const NAME: &str = "my-new-repository";

    fn naming_error(err: LedgerError) -> NamingRuleError {
        match err {
            LedgerError::Naming(e) => e,
            other => panic!("expected a naming rule error, got {other}"),
        }
    }

    // =========================================================================
    // FULL LIFECYCLE
    // =========================================================================

    #[test]
    fn test_reserve_allocate_deallocate_then_foreign_reveal() {
        let ledger = TestLedger::in_memory();
        let owner = Ed25519KeyPair::from_seed([1; 32]);
        let other = Ed25519KeyPair::from_seed([2; 32]);

        let (reservation, nonce) = Transaction::name_reservation(NAME, &owner);
        mine_and_accept(&ledger, vec![reservation]).unwrap();
        assert_eq!(ledger.name_status(NAME).unwrap(), NameStatus::Free);

        mine_and_accept(&ledger, vec![Transaction::name_allocation(NAME, nonce, &owner)]).unwrap();
        assert_eq!(
            ledger.name_status(NAME).unwrap(),
            NameStatus::Allocated {
                owner: *owner.public_key().as_bytes()
            }
        );

        mine_and_accept(&ledger, vec![Transaction::name_deallocation(NAME, &owner)]).unwrap();
        assert_eq!(ledger.name_status(NAME).unwrap(), NameStatus::Free);

        let head = ledger.last_block_hash().unwrap();
        let err = mine_and_accept(&ledger, vec![Transaction::name_allocation(NAME, nonce, &other)])
            .unwrap_err();
        assert!(matches!(
            naming_error(err),
            NamingRuleError::SignerMismatch { .. }
        ));
        assert_eq!(ledger.last_block_hash().unwrap(), head);
        assert_eq!(ledger.name_status(NAME).unwrap(), NameStatus::Free);
    }

    #[test]
    fn test_reservation_and_reveal_in_one_block() {
        let ledger = TestLedger::in_memory();
        let owner = Ed25519KeyPair::from_seed([1; 32]);
        let (reservation, nonce) = Transaction::name_reservation(NAME, &owner);

        mine_and_accept(
            &ledger,
            vec![reservation, Transaction::name_allocation(NAME, nonce, &owner)],
        )
        .unwrap();
        assert!(matches!(
            ledger.name_status(NAME).unwrap(),
            NameStatus::Allocated { .. }
        ));
    }

    #[test]
    fn test_reveal_before_reservation_in_same_block_rejected() {
        let ledger = TestLedger::in_memory();
        let owner = Ed25519KeyPair::from_seed([1; 32]);
        let (reservation, nonce) = Transaction::name_reservation(NAME, &owner);

        let err = mine_and_accept(
            &ledger,
            vec![Transaction::name_allocation(NAME, nonce, &owner), reservation],
        )
        .unwrap_err();
        assert!(matches!(
            naming_error(err),
            NamingRuleError::NoMatchingReservation { .. }
        ));
        assert!(ledger.last_block_hash().unwrap().is_none());
    }

    // =========================================================================
    // CONTESTED NAMES
    // =========================================================================

    #[test]
    fn test_second_claimant_blocked_until_release() {
        let ledger = TestLedger::in_memory();
        let alice = Ed25519KeyPair::from_seed([1; 32]);
        let bob = Ed25519KeyPair::from_seed([2; 32]);

        let (alice_commit, alice_nonce) = Transaction::name_reservation(NAME, &alice);
        let (bob_commit, bob_nonce) = Transaction::name_reservation(NAME, &bob);
        mine_and_accept(&ledger, vec![alice_commit, bob_commit]).unwrap();
        mine_and_accept(
            &ledger,
            vec![Transaction::name_allocation(NAME, alice_nonce, &alice)],
        )
        .unwrap();

        let err = mine_and_accept(
            &ledger,
            vec![Transaction::name_allocation(NAME, bob_nonce, &bob)],
        )
        .unwrap_err();
        assert!(matches!(
            naming_error(err),
            NamingRuleError::NameAlreadyAllocated { .. }
        ));

        // Bob cannot release a name he does not own.
        let err = mine_and_accept(&ledger, vec![Transaction::name_deallocation(NAME, &bob)])
            .unwrap_err();
        assert!(matches!(
            naming_error(err),
            NamingRuleError::NameNotAllocatedToSigner { .. }
        ));

        mine_and_accept(&ledger, vec![Transaction::name_deallocation(NAME, &alice)]).unwrap();
        mine_and_accept(
            &ledger,
            vec![Transaction::name_allocation(NAME, bob_nonce, &bob)],
        )
        .unwrap();
        assert_eq!(
            ledger.name_status(NAME).unwrap(),
            NameStatus::Allocated {
                owner: *bob.public_key().as_bytes()
            }
        );
    }

    #[test]
    fn test_rejected_block_leaves_no_partial_effects() {
        let ledger = TestLedger::in_memory();
        let owner = Ed25519KeyPair::from_seed([1; 32]);
        let (first, first_nonce) = Transaction::name_reservation("first", &owner);
        let (_, stray_nonce) = Transaction::name_reservation("second", &owner);

        let err = mine_and_accept(
            &ledger,
            vec![
                first,
                Transaction::name_allocation("first", first_nonce, &owner),
                Transaction::name_allocation("second", stray_nonce, &owner),
            ],
        )
        .unwrap_err();
        assert!(err.is_rejection());
        assert_eq!(ledger.name_status("first").unwrap(), NameStatus::Free);
        assert!(ledger.last_block_hash().unwrap().is_none());
    }

    // =========================================================================
    // CHAIN LINKAGE
    // =========================================================================

    #[test]
    fn test_block_on_stale_parent_rejected() {
        let ledger = TestLedger::in_memory();
        let owner = Ed25519KeyPair::from_seed([1; 32]);

        mine_and_accept(&ledger, vec![Transaction::name_reservation("a", &owner).0]).unwrap();

        let stale = Block::new(
            EMPTY_HASH,
            HIGHEST_TARGET,
            vec![Transaction::name_reservation("b", &owner).0],
        )
        .unwrap();
        let err = ledger.accept_block(&stale).unwrap_err();
        assert!(matches!(
            err,
            LedgerError::Verification(VerificationError::PreviousHashMismatch { .. })
        ));
    }

    #[test]
    fn test_history_replays_after_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ledger.db");
        let owner = Ed25519KeyPair::from_seed([1; 32]);

        {
            let store = nc_03_ledger_storage::FileBackedKVStore::open(&path).unwrap();
            let ledger = nc_03_ledger_storage::LedgerService::new(store);
            let (reservation, nonce) = Transaction::name_reservation(NAME, &owner);
            for txs in [
                vec![reservation],
                vec![Transaction::name_allocation(NAME, nonce, &owner)],
            ] {
                let head = ledger.last_block_hash().unwrap().unwrap_or(EMPTY_HASH);
                let block = Block::new(head, HIGHEST_TARGET, txs).unwrap();
                ledger.accept_block(&block).unwrap();
            }
        }

        let store = nc_03_ledger_storage::FileBackedKVStore::open(&path).unwrap();
        let ledger = nc_03_ledger_storage::LedgerService::new(store);
        assert!(matches!(
            ledger.name_status(NAME).unwrap(),
            NameStatus::Allocated { .. }
        ));
    }
}
