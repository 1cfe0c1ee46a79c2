//! Error types for block production and block verification

use shared_types::{short_hex, Hash};
use thiserror::Error;

/// Structural or proof-of-work failure of a block.
///
/// Each variant names the check that failed; see [`VerificationError::check`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VerificationError {
    /// Block does not link to the expected predecessor.
    #[error(
        "Previous block hash mismatch: expected {}, got {}",
        short_hex(.expected),
        short_hex(.actual)
    )]
    PreviousHashMismatch {
        /// Hash the caller expected
        expected: Hash,
        /// Hash carried by the block
        actual: Hash,
    },

    /// Predecessor is not a known block.
    #[error("Unknown parent block {}", short_hex(.parent))]
    UnknownParent {
        /// Missing parent hash
        parent: Hash,
    },

    /// Header Merkle root does not cover the carried transactions.
    #[error(
        "Merkle root mismatch: header {}, computed {}",
        short_hex(.expected),
        short_hex(.computed)
    )]
    MerkleRootMismatch {
        /// Root in the header
        expected: Hash,
        /// Root recomputed from transactions
        computed: Hash,
    },

    /// Block hash is above the target encoded in `bits`.
    #[error("Insufficient proof-of-work: hash {} above target bits {bits:#010x}", short_hex(.hash))]
    InsufficientWork {
        /// Block hash
        hash: Hash,
        /// Compact target
        bits: u32,
    },

    /// Header version is not understood.
    #[error("Unsupported block version {version}")]
    UnsupportedVersion {
        /// Version found in the header
        version: u32,
    },
}

impl VerificationError {
    /// Name of the failed check.
    pub fn check(&self) -> &'static str {
        match self {
            Self::PreviousHashMismatch { .. } | Self::UnknownParent { .. } => "previous_block_hash",
            Self::MerkleRootMismatch { .. } => "merkle_root",
            Self::InsufficientWork { .. } => "proof_of_work",
            Self::UnsupportedVersion { .. } => "version",
        }
    }
}

/// Outcome of a mining job other than a mined block.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MiningError {
    /// Search was canceled before a nonce was found.
    #[error("Mining cancelled")]
    Cancelled,

    /// Target decodes to zero; no nonce can satisfy it.
    #[error("Unsatisfiable target bits {bits:#010x}")]
    UnsatisfiableTarget {
        /// Compact target
        bits: u32,
    },

    /// Worker ended without reporting a result.
    #[error("Mining worker terminated unexpectedly")]
    WorkerLost,
}
