//! # Ledger Storage (nc-03)
//!
//! The authoritative store of the name chain: transactions and blocks by
//! hash, the "last block" pointer, the local keyring, and the naming rules
//! that decide which blocks may extend the chain.
//!
//! ## Layout
//!
//! ```text
//! tx:<hash>        → Transaction   (bincode)
//! block:<hash>     → Block         (bincode)
//! key:<alias>      → KeyEntry      (bincode)
//! meta:last_block  → Hash
//! meta:main_key    → MainKeySelection
//! ```
//!
//! ## Invariants
//!
//! | Invariant | Enforced by |
//! |-----------|-------------|
//! | Exactly one effective main key when the keyring is non-empty | [`MainKeySelection::after_put`] under the write lock |
//! | Multi-key writes are all or nothing | [`KeyValueStore::atomic_batch_write`] |
//! | A reservation is consumed at most once | [`NamingState::apply`] |
//! | Only the owner may release a name | [`NamingState::apply`] |
//! | Rejected blocks leave the store untouched | [`LedgerService::accept_block`] |
//!
//! ## Crate Structure (Hexagonal Architecture)
//!
//! - `domain/` - keyring rule, naming state machine, errors, key layout
//! - `ports/` - `KeyValueStore`, `EntityCodec`, `BlockReader`
//! - `adapters/` - in-memory and file-backed stores, bincode codec
//! - `service/` - [`LedgerService`]

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

pub use adapters::serializer::BincodeCodec;
pub use adapters::storage::{FileBackedKVStore, InMemoryKVStore};
pub use domain::errors::{
    KVStoreError, LedgerError, NamingRuleError, SerializationError, StorageError,
};
pub use domain::keyring::{KeyEntry, MainKeySelection};
pub use domain::naming::{NameStatus, NamingState};
pub use domain::value_objects::KeyPrefix;
pub use ports::outbound::{BatchOperation, BlockReader, EntityCodec, KeyValueStore, ScanResult};
pub use service::LedgerService;
