//! Block entities

use nc_01_name_transactions::Transaction;
use serde::{Deserialize, Serialize};
use shared_types::{now_timestamp, Hash, Timestamp};
use std::sync::atomic::AtomicBool;

use super::merkle::merkle_root;
use super::services::PoWMiner;
use crate::error::{MiningError, VerificationError};
use crate::utils::hashing::{block_hash, meets_target};

/// Current header version.
pub const BLOCK_VERSION: u32 = 1;

/// Block header; every field is covered by the block hash.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockHeader {
    /// Header version
    pub version: u32,
    /// Hash of the predecessor, or the empty hash for a first block
    pub previous_block_hash: Hash,
    /// Merkle root of the transaction hashes
    pub merkle_root_hash: Hash,
    /// Creation time, Unix seconds
    pub timestamp: Timestamp,
    /// Compact difficulty target
    pub bits: u32,
    /// Proof-of-work nonce
    pub nonce: u32,
}

impl BlockHeader {
    /// SHA-256d of the encoded header.
    pub fn hash(&self) -> Hash {
        block_hash(self)
    }
}

/// A header and the transactions it commits to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    /// Block header
    pub header: BlockHeader,
    /// Transactions in Merkle order
    pub transactions: Vec<Transaction>,
}

impl Block {
    /// Build and mine a block on top of `previous_block_hash`.
    ///
    /// Runs the search on the calling thread and cannot be canceled; use
    /// [`crate::MiningService`] for that.
    pub fn new(
        previous_block_hash: Hash,
        bits: u32,
        transactions: Vec<Transaction>,
    ) -> Result<Self, MiningError> {
        let template = Self::template(previous_block_hash, bits, transactions, now_timestamp());
        let never = AtomicBool::new(false);
        let solution = PoWMiner::default().mine(template.header, &never)?;
        Ok(Self {
            header: solution.header,
            ..template
        })
    }

    /// Unmined block with nonce 0 and the Merkle root filled in.
    pub fn template(
        previous_block_hash: Hash,
        bits: u32,
        transactions: Vec<Transaction>,
        timestamp: Timestamp,
    ) -> Self {
        let merkle_root_hash = merkle_root(&Self::hashes_of(&transactions));
        Self {
            header: BlockHeader {
                version: BLOCK_VERSION,
                previous_block_hash,
                merkle_root_hash,
                timestamp,
                bits,
                nonce: 0,
            },
            transactions,
        }
    }

    /// Block hash, the hash of its header.
    pub fn hash(&self) -> Hash {
        self.header.hash()
    }

    /// Hashes of the carried transactions, in order.
    pub fn transaction_hashes(&self) -> Vec<Hash> {
        Self::hashes_of(&self.transactions)
    }

    fn hashes_of(transactions: &[Transaction]) -> Vec<Hash> {
        transactions.iter().map(Transaction::hash).collect()
    }

    /// Merkle root recomputed from the carried transactions.
    pub fn compute_merkle_root(&self) -> Hash {
        merkle_root(&self.transaction_hashes())
    }

    /// Check version, Merkle root and proof-of-work, ignoring linkage.
    pub fn validate_contents(&self) -> Result<(), VerificationError> {
        if self.header.version != BLOCK_VERSION {
            return Err(VerificationError::UnsupportedVersion {
                version: self.header.version,
            });
        }

        let computed = self.compute_merkle_root();
        if computed != self.header.merkle_root_hash {
            return Err(VerificationError::MerkleRootMismatch {
                expected: self.header.merkle_root_hash,
                computed,
            });
        }

        self.verify_proof_of_work()
    }

    /// Check the header hash against its own target.
    pub fn verify_proof_of_work(&self) -> Result<(), VerificationError> {
        let hash = self.hash();
        if meets_target(&hash, self.header.bits) {
            Ok(())
        } else {
            Err(VerificationError::InsufficientWork {
                hash,
                bits: self.header.bits,
            })
        }
    }

    /// Check linkage to `expected_previous`, then the block's own contents.
    ///
    /// Never mutates anything; naming rules are checked by the ledger.
    pub fn validate_structure(&self, expected_previous: &Hash) -> Result<(), VerificationError> {
        if &self.header.previous_block_hash != expected_previous {
            return Err(VerificationError::PreviousHashMismatch {
                expected: *expected_previous,
                actual: self.header.previous_block_hash,
            });
        }
        self.validate_contents()
    }
}
