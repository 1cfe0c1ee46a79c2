//! # Ledger Service
//!
//! The single writer of persisted ledger state. One instance is created by
//! the node and shared (behind an `Arc`) with every component that reads or
//! writes the ledger.
//!
//! ## Concurrency
//!
//! The key-value store sits behind a `parking_lot::RwLock`. Reads share the
//! lock; each write operation, including the keyring's read-modify-write,
//! runs under one write guard. Block acceptance is additionally serialized so
//! that validation and the head update see the same head.
//!
//! The naming state of the most recently validated block is cached, so block
//! acceptance and name lookups replay only the blocks after it.

mod chain;
mod consensus;
mod keyring;

use parking_lot::{Mutex, RwLock};
use serde::de::DeserializeOwned;
use shared_types::Hash;

use crate::adapters::serializer::BincodeCodec;
use crate::adapters::storage::InMemoryKVStore;
use crate::domain::errors::LedgerError;
use crate::domain::naming::NamingState;
use crate::ports::outbound::{EntityCodec, KeyValueStore};

/// The ledger store and its consensus checks.
pub struct LedgerService<KV, C = BincodeCodec>
where
    KV: KeyValueStore,
    C: EntityCodec,
{
    /// Key-value store for persistence.
    pub(crate) kv_store: RwLock<KV>,
    /// Entity codec.
    pub(crate) codec: C,
    /// Serializes `accept_block` calls.
    pub(crate) accept_lock: Mutex<()>,
    /// Naming state after the block with the given hash.
    pub(crate) naming_cache: RwLock<Option<(Hash, NamingState)>>,
}

impl<KV: KeyValueStore> LedgerService<KV, BincodeCodec> {
    /// Create a ledger over `kv_store` with the bincode codec.
    pub fn new(kv_store: KV) -> Self {
        Self::with_codec(kv_store, BincodeCodec)
    }
}

impl LedgerService<InMemoryKVStore, BincodeCodec> {
    /// Create a ledger held entirely in memory.
    pub fn in_memory() -> Self {
        Self::new(InMemoryKVStore::new())
    }
}

impl<KV, C> LedgerService<KV, C>
where
    KV: KeyValueStore,
    C: EntityCodec,
{
    /// Create a ledger with an explicit codec.
    pub fn with_codec(kv_store: KV, codec: C) -> Self {
        Self {
            kv_store: RwLock::new(kv_store),
            codec,
            accept_lock: Mutex::new(()),
            naming_cache: RwLock::new(None),
        }
    }

    /// Read and decode `key` from an already-locked store.
    pub(crate) fn read_value<T: DeserializeOwned>(
        &self,
        kv: &KV,
        key: &[u8],
    ) -> Result<Option<T>, LedgerError> {
        match kv.get(key)? {
            Some(bytes) => Ok(Some(self.codec.decode(&bytes)?)),
            None => Ok(None),
        }
    }
}
