//! # Domain Errors
//!
//! Error types for the ledger store.
//!
//! - [`KVStoreError`]: raw key-value backend failures
//! - [`StorageError`]: persistence failures above the backend
//! - [`NamingRuleError`]: a transaction violates the naming rules
//! - [`LedgerError`]: everything a ledger operation can return

use nc_02_block_production::VerificationError;
use shared_types::{short_hex, Hash};
use thiserror::Error;

/// Errors from key-value store operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KVStoreError {
    /// I/O error.
    #[error("I/O error: {message}")]
    IOError {
        /// Backend message
        message: String,
    },

    /// Backend-specific failure.
    #[error("Database error: {message}")]
    Backend {
        /// Backend message
        message: String,
    },

    /// Persisted data could not be read back.
    #[error("Corrupted store: {message}")]
    Corruption {
        /// What was wrong
        message: String,
    },
}

/// Serialization/deserialization failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Serialization error: {message}")]
pub struct SerializationError {
    /// Codec message
    pub message: String,
}

/// Persistence failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    /// Key-value backend failed.
    #[error(transparent)]
    Database(#[from] KVStoreError),

    /// Value could not be encoded or decoded.
    #[error(transparent)]
    Serialization(#[from] SerializationError),

    /// Different content stored under an existing hash.
    #[error("Hash collision on {}", short_hex(.hash))]
    HashCollision {
        /// Colliding hash
        hash: Hash,
    },
}

/// A transaction that the naming rules reject.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NamingRuleError {
    /// No reservation commits to this reveal.
    #[error("No matching reservation for name '{name}'")]
    NoMatchingReservation {
        /// Revealed name
        name: String,
    },

    /// The matching reservation was already used by an allocation.
    #[error("Reservation for name '{name}' already consumed")]
    ReservationAlreadyConsumed {
        /// Revealed name
        name: String,
    },

    /// A reservation for this name and nonce exists under another key.
    #[error("Reservation for name '{name}' belongs to another key")]
    SignerMismatch {
        /// Revealed name
        name: String,
    },

    /// Deallocation by someone who does not own the name.
    #[error("Name '{name}' is not allocated to the signer")]
    NameNotAllocatedToSigner {
        /// Name to release
        name: String,
    },

    /// Allocation of a name that is currently owned.
    #[error("Name '{name}' is already allocated")]
    NameAlreadyAllocated {
        /// Revealed name
        name: String,
    },

    /// Same commit digest reserved twice.
    #[error("Duplicate reservation {}", short_hex(.commit))]
    DuplicateReservation {
        /// Commit digest
        commit: Hash,
    },

    /// Transaction signature does not verify.
    #[error("Invalid signature on transaction {}", short_hex(.tx_hash))]
    InvalidSignature {
        /// Transaction hash
        tx_hash: Hash,
    },
}

/// Errors returned by ledger operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// Requested item is not stored.
    #[error("{kind} not found: {key}")]
    NotFound {
        /// Kind of item ("block", "transaction", "key")
        kind: &'static str,
        /// Lookup key, hex for hashes
        key: String,
    },

    /// Keyring aliases must be non-empty.
    #[error("Invalid alias: must be non-empty")]
    InvalidAlias,

    /// Persistence failure.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Block failed structural or proof-of-work checks.
    #[error("Block rejected: {0}")]
    Verification(#[from] VerificationError),

    /// Block carries a transaction the naming rules reject.
    #[error("Block rejected: {0}")]
    Naming(#[from] NamingRuleError),
}

impl LedgerError {
    pub(crate) fn block_not_found(hash: &Hash) -> Self {
        Self::NotFound {
            kind: "block",
            key: shared_types::hash_to_hex(hash),
        }
    }

    pub(crate) fn transaction_not_found(hash: &Hash) -> Self {
        Self::NotFound {
            kind: "transaction",
            key: shared_types::hash_to_hex(hash),
        }
    }

    pub(crate) fn key_not_found(alias: &str) -> Self {
        Self::NotFound {
            kind: "key",
            key: alias.to_string(),
        }
    }

    /// Whether this error means "item absent".
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Whether a block was rejected by consensus checks rather than a store failure.
    pub fn is_rejection(&self) -> bool {
        matches!(self, Self::Verification(_) | Self::Naming(_))
    }
}

impl From<KVStoreError> for LedgerError {
    fn from(err: KVStoreError) -> Self {
        Self::Storage(err.into())
    }
}

impl From<SerializationError> for LedgerError {
    fn from(err: SerializationError) -> Self {
        Self::Storage(err.into())
    }
}
