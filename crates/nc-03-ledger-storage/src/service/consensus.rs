//! Block validation and acceptance.

use super::*;
use crate::domain::naming::{NameStatus, NamingState};
use nc_02_block_production::{Block, VerificationError};
use shared_types::{is_empty_hash, short_hex, Hash, EMPTY_HASH};

impl<KV, C> LedgerService<KV, C>
where
    KV: KeyValueStore,
    C: EntityCodec,
{
    /// Naming state after the block `tip`; the empty hash gives the empty state.
    pub fn naming_state_at(&self, tip: &Hash) -> Result<NamingState, LedgerError> {
        let base = self.naming_cache.read().clone();
        if let Some((hash, state)) = &base {
            if hash == tip {
                return Ok(state.clone());
            }
        }

        let state = NamingState::replay_from(self, tip, base)?;
        self.cache_naming_state(*tip, state.clone());
        Ok(state)
    }

    /// Check `block` against its own parent without storing anything.
    ///
    /// Runs linkage, Merkle root and proof-of-work checks, then applies its
    /// transactions to the naming state as of the parent.
    pub fn validate_block(&self, block: &Block) -> Result<(), LedgerError> {
        self.validated_state(block).map(|_| ())
    }

    /// Naming state after `block`, if it is valid on top of its parent.
    fn validated_state(&self, block: &Block) -> Result<NamingState, LedgerError> {
        let parent = block.header.previous_block_hash;
        if !is_empty_hash(&parent) && !self.has_block(&parent)? {
            return Err(VerificationError::UnknownParent { parent }.into());
        }

        block.validate_structure(&parent)?;

        let mut state = self.naming_state_at(&parent)?;
        state.apply_block(block)?;
        Ok(state)
    }

    /// Validate `block` as the successor of the current head and store it as
    /// the new head.
    #[tracing::instrument(
        skip(self, block),
        fields(block = %short_hex(&block.hash()), txs = block.transactions.len())
    )]
    pub fn accept_block(&self, block: &Block) -> Result<Hash, LedgerError> {
        let _guard = self.accept_lock.lock();

        let head = self.last_block_hash()?.unwrap_or(EMPTY_HASH);
        let result = if block.header.previous_block_hash != head {
            Err(VerificationError::PreviousHashMismatch {
                expected: head,
                actual: block.header.previous_block_hash,
            }
            .into())
        } else {
            self.validated_state(block)
        };

        let state = match result {
            Ok(state) => state,
            Err(err) => {
                tracing::warn!("[nc-03] Rejected block: {}", err);
                return Err(err);
            }
        };

        let hash = self.put_block(block, true)?;
        self.cache_naming_state(hash, state);
        tracing::info!(
            "[nc-03] Accepted block {} with {} transactions",
            short_hex(&hash),
            block.transactions.len()
        );
        Ok(hash)
    }

    /// Status of `name` at the current head.
    pub fn name_status(&self, name: &str) -> Result<NameStatus, LedgerError> {
        let head = self.last_block_hash()?.unwrap_or(EMPTY_HASH);
        if let Some((hash, state)) = self.naming_cache.read().as_ref() {
            if *hash == head {
                return Ok(state.name_status(name));
            }
        }
        Ok(self.naming_state_at(&head)?.name_status(name))
    }

    fn cache_naming_state(&self, hash: Hash, state: NamingState) {
        *self.naming_cache.write() = Some((hash, state));
    }
}
