//! # Naming State
//!
//! The name registry as of a given block: which commits are reserved,
//! whether they were consumed, and who owns each name.
//!
//! ## Transitions
//!
//! ```text
//!            NameReservation(commit)
//!   ─────────────────────────────────→ Reserved(commit, owner)
//!
//!            NameAllocation(name, r) with H(name, signer, r) == commit
//!   Reserved ─────────────────────────→ consumed; name → Allocated(signer)
//!
//!            NameDeallocation(name) by owner
//!   Allocated ────────────────────────→ Free
//! ```
//!
//! State is rebuilt by replaying blocks, either from the first one or from a
//! state already known for an ancestor; there is no persisted index.

use std::collections::HashMap;

use nc_01_name_transactions::{
    commit_digest, NameAllocation, NameDeallocation, NameReservation, Transaction,
};
use nc_02_block_production::Block;
use shared_types::{is_empty_hash, short_hex, Hash, PublicKey};

use super::errors::{LedgerError, NamingRuleError};
use crate::ports::outbound::BlockReader;

/// Registration status of a name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameStatus {
    /// Nobody owns the name.
    Free,
    /// Owned by `owner`.
    Allocated {
        /// Owner's public key
        owner: PublicKey,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Reservation {
    owner: PublicKey,
    consumed: bool,
}

/// Registry state derived from a chain of blocks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NamingState {
    reservations: HashMap<Hash, Reservation>,
    names: HashMap<String, PublicKey>,
}

impl NamingState {
    /// Empty registry, the state before the first block.
    pub fn new() -> Self {
        Self::default()
    }

    /// State after replaying the chain ending at `tip`.
    ///
    /// Walks `previous_block_hash` links back to the empty hash, then applies
    /// blocks oldest first. The empty hash itself yields the empty state.
    pub fn at<R: BlockReader + ?Sized>(reader: &R, tip: &Hash) -> Result<Self, LedgerError> {
        Self::replay_from(reader, tip, None)
    }

    /// State at `tip`, starting from a known `(hash, state)` pair.
    ///
    /// Only the blocks after `base` are replayed when `base` is an ancestor of
    /// `tip`; otherwise the whole chain is.
    pub fn replay_from<R: BlockReader + ?Sized>(
        reader: &R,
        tip: &Hash,
        base: Option<(Hash, Self)>,
    ) -> Result<Self, LedgerError> {
        let base_hash = base.as_ref().map(|(hash, _)| *hash);
        let mut chain = Vec::new();
        let mut cursor = *tip;
        while Some(cursor) != base_hash && !is_empty_hash(&cursor) {
            let block = reader.read_block(&cursor)?;
            cursor = block.header.previous_block_hash;
            chain.push(block);
        }

        let mut state = match base {
            Some((hash, state)) if hash == cursor => state,
            _ => Self::new(),
        };
        for block in chain.iter().rev() {
            state.replay_block(block);
        }
        Ok(state)
    }

    /// Apply an already-stored block.
    ///
    /// Signatures were checked when the block was accepted and are not
    /// verified again. Transactions the rules reject are skipped; such blocks
    /// only exist when written through the unchecked store path.
    fn replay_block(&mut self, block: &Block) {
        for tx in &block.transactions {
            if let Err(err) = self.apply_rules(tx) {
                tracing::warn!(
                    "[nc-03] Skipping invalid {} in stored block {}: {}",
                    tx.kind().as_str(),
                    short_hex(&block.hash()),
                    err
                );
            }
        }
    }

    /// Apply every transaction of `block`, all or nothing.
    pub fn apply_block(&mut self, block: &Block) -> Result<(), NamingRuleError> {
        let mut next = self.clone();
        for tx in &block.transactions {
            next.apply(tx)?;
        }
        *self = next;
        Ok(())
    }

    /// Apply one transaction.
    ///
    /// On error the state is unchanged.
    pub fn apply(&mut self, tx: &Transaction) -> Result<(), NamingRuleError> {
        if tx.verify_signature().is_err() {
            return Err(NamingRuleError::InvalidSignature { tx_hash: tx.hash() });
        }
        self.apply_rules(tx)
    }

    fn apply_rules(&mut self, tx: &Transaction) -> Result<(), NamingRuleError> {
        match tx {
            Transaction::NameReservation(reservation) => self.reserve(reservation),
            Transaction::NameAllocation(allocation) => self.allocate(allocation),
            Transaction::NameDeallocation(deallocation) => self.deallocate(deallocation),
        }
    }

    fn reserve(&mut self, reservation: &NameReservation) -> Result<(), NamingRuleError> {
        let commit = reservation.hashed_name;
        if self.reservations.contains_key(&commit) {
            return Err(NamingRuleError::DuplicateReservation { commit });
        }
        self.reservations.insert(
            commit,
            Reservation {
                owner: reservation.public_key,
                consumed: false,
            },
        );
        Ok(())
    }

    fn allocate(&mut self, allocation: &NameAllocation) -> Result<(), NamingRuleError> {
        let name = &allocation.name;
        let commit = allocation.expected_commit();

        let Some(reservation) = self.reservations.get(&commit) else {
            return Err(self.unmatched_reveal(allocation));
        };

        if reservation.consumed {
            return Err(NamingRuleError::ReservationAlreadyConsumed { name: name.clone() });
        }
        if self.names.contains_key(name) {
            return Err(NamingRuleError::NameAlreadyAllocated { name: name.clone() });
        }

        if let Some(reservation) = self.reservations.get_mut(&commit) {
            reservation.consumed = true;
        }
        self.names.insert(name.clone(), allocation.public_key);
        Ok(())
    }

    /// Explain a reveal whose own commit is not reserved.
    fn unmatched_reveal(&self, allocation: &NameAllocation) -> NamingRuleError {
        let reserved_by_other = self.reservations.iter().any(|(commit, reservation)| {
            reservation.owner != allocation.public_key
                && commit_digest(&allocation.name, &reservation.owner, &allocation.random_nonce)
                    == *commit
        });

        let name = allocation.name.clone();
        if reserved_by_other {
            NamingRuleError::SignerMismatch { name }
        } else {
            NamingRuleError::NoMatchingReservation { name }
        }
    }

    fn deallocate(&mut self, deallocation: &NameDeallocation) -> Result<(), NamingRuleError> {
        match self.names.get(&deallocation.name) {
            Some(owner) if *owner == deallocation.public_key => {
                self.names.remove(&deallocation.name);
                Ok(())
            }
            _ => Err(NamingRuleError::NameNotAllocatedToSigner {
                name: deallocation.name.clone(),
            }),
        }
    }

    /// Current status of `name`.
    pub fn name_status(&self, name: &str) -> NameStatus {
        match self.names.get(name) {
            Some(owner) => NameStatus::Allocated { owner: *owner },
            None => NameStatus::Free,
        }
    }

    /// Whether `commit` is reserved and not yet consumed.
    pub fn is_reserved(&self, commit: &Hash) -> bool {
        self.reservations
            .get(commit)
            .is_some_and(|reservation| !reservation.consumed)
    }

    /// Number of allocated names.
    pub fn allocated_count(&self) -> usize {
        self.names.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_crypto::Ed25519KeyPair;

    fn key(seed: u8) -> Ed25519KeyPair {
        Ed25519KeyPair::from_seed([seed; 32])
    }

    fn commit_of(tx: &Transaction) -> Hash {
        match tx {
            Transaction::NameReservation(r) => r.hashed_name,
            _ => panic!("not a reservation"),
        }
    }

    #[test]
    fn test_reserve_then_allocate() {
        let owner = key(1);
        let mut state = NamingState::new();

        let (reservation, nonce) = Transaction::name_reservation("repo", &owner);
        state.apply(&reservation).unwrap();
        assert!(state.is_reserved(&commit_of(&reservation)));
        assert_eq!(state.name_status("repo"), NameStatus::Free);

        state
            .apply(&Transaction::name_allocation("repo", nonce, &owner))
            .unwrap();
        assert_eq!(
            state.name_status("repo"),
            NameStatus::Allocated {
                owner: *owner.public_key().as_bytes()
            }
        );
        assert_eq!(state.allocated_count(), 1);
    }

    #[test]
    fn test_reveal_without_reservation() {
        let mut state = NamingState::new();
        let err = state
            .apply(&Transaction::name_allocation("repo", [9; 32], &key(1)))
            .unwrap_err();
        assert_eq!(
            err,
            NamingRuleError::NoMatchingReservation {
                name: "repo".to_string()
            }
        );
    }

    #[test]
    fn test_reservation_consumed_once() {
        let owner = key(1);
        let mut state = NamingState::new();
        let (reservation, nonce) = Transaction::name_reservation("repo", &owner);
        state.apply(&reservation).unwrap();

        let allocation = Transaction::name_allocation("repo", nonce, &owner);
        state.apply(&allocation).unwrap();
        state
            .apply(&Transaction::name_deallocation("repo", &owner))
            .unwrap();

        let err = state.apply(&allocation).unwrap_err();
        assert!(matches!(err, NamingRuleError::ReservationAlreadyConsumed { .. }));
    }

    #[test]
    fn test_reveal_by_other_key_is_signer_mismatch() {
        let owner = key(1);
        let thief = key(2);
        let mut state = NamingState::new();
        let (reservation, nonce) = Transaction::name_reservation("repo", &owner);
        state.apply(&reservation).unwrap();

        let err = state
            .apply(&Transaction::name_allocation("repo", nonce, &thief))
            .unwrap_err();
        assert!(matches!(err, NamingRuleError::SignerMismatch { .. }));
        assert_eq!(state.name_status("repo"), NameStatus::Free);
    }

    #[test]
    fn test_allocated_name_cannot_be_claimed_again() {
        let first = key(1);
        let second = key(2);
        let mut state = NamingState::new();

        let (r1, n1) = Transaction::name_reservation("repo", &first);
        let (r2, n2) = Transaction::name_reservation("repo", &second);
        state.apply(&r1).unwrap();
        state.apply(&r2).unwrap();
        state
            .apply(&Transaction::name_allocation("repo", n1, &first))
            .unwrap();

        let err = state
            .apply(&Transaction::name_allocation("repo", n2, &second))
            .unwrap_err();
        assert!(matches!(err, NamingRuleError::NameAlreadyAllocated { .. }));
        assert!(state.is_reserved(&commit_of(&r2)));
    }

    #[test]
    fn test_only_owner_deallocates() {
        let owner = key(1);
        let mut state = NamingState::new();
        let (reservation, nonce) = Transaction::name_reservation("repo", &owner);
        state.apply(&reservation).unwrap();
        state
            .apply(&Transaction::name_allocation("repo", nonce, &owner))
            .unwrap();

        let err = state
            .apply(&Transaction::name_deallocation("repo", &key(2)))
            .unwrap_err();
        assert!(matches!(err, NamingRuleError::NameNotAllocatedToSigner { .. }));

        let err = state
            .apply(&Transaction::name_deallocation("other", &owner))
            .unwrap_err();
        assert!(matches!(err, NamingRuleError::NameNotAllocatedToSigner { .. }));
    }

    #[test]
    fn test_duplicate_reservation() {
        let owner = key(1);
        let mut state = NamingState::new();
        let (reservation, _) = Transaction::name_reservation("repo", &owner);
        state.apply(&reservation).unwrap();
        let err = state.apply(&reservation).unwrap_err();
        assert!(matches!(err, NamingRuleError::DuplicateReservation { .. }));
    }

    #[test]
    fn test_tampered_signature_rejected() {
        let owner = key(1);
        let mut tx = Transaction::name_deallocation("repo", &owner);
        if let Transaction::NameDeallocation(ref mut d) = tx {
            d.name = "other".to_string();
        }
        let err = NamingState::new().apply(&tx).unwrap_err();
        assert!(matches!(err, NamingRuleError::InvalidSignature { .. }));
    }

    #[test]
    fn test_re_reservation_after_release() {
        let owner = key(1);
        let other = key(2);
        let mut state = NamingState::new();

        let (r, n) = Transaction::name_reservation("repo", &owner);
        state.apply(&r).unwrap();
        state.apply(&Transaction::name_allocation("repo", n, &owner)).unwrap();
        state.apply(&Transaction::name_deallocation("repo", &owner)).unwrap();

        let (r, n) = Transaction::name_reservation("repo", &other);
        state.apply(&r).unwrap();
        state.apply(&Transaction::name_allocation("repo", n, &other)).unwrap();
        assert_eq!(
            state.name_status("repo"),
            NameStatus::Allocated {
                owner: *other.public_key().as_bytes()
            }
        );
    }

    #[test]
    fn test_apply_block_is_atomic() {
        let owner = key(1);
        let mut state = NamingState::new();
        let (reservation, nonce) = Transaction::name_reservation("repo", &owner);
        let block = Block::template(
            shared_types::EMPTY_HASH,
            nc_02_block_production::HIGHEST_TARGET,
            vec![
                reservation,
                Transaction::name_allocation("repo", nonce, &owner),
                Transaction::name_allocation("missing", [0; 32], &owner),
            ],
            0,
        );

        assert!(state.apply_block(&block).is_err());
        assert_eq!(state.name_status("repo"), NameStatus::Free);
        assert!(state.reservations.is_empty());
    }
}
