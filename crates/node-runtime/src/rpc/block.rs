//! Block service: chain head and block header queries.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use shared_types::{hash_from_hex, hash_to_hex, Timestamp};

use super::RpcError;
use crate::container::SharedLedger;

/// `get_last_block` reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetLastBlockReply {
    /// Hash of the chain head, absent on an empty chain.
    pub hash: Option<String>,
}

/// `get_block` parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetBlockRequest {
    /// Block hash, hex.
    pub hash: String,
}

/// `get_block` reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetBlockReply {
    /// Parent hash, hex.
    pub previous_block_hash: String,
    /// Merkle root, hex.
    pub merkle_root_hash: String,
    /// Header timestamp.
    pub timestamp: Timestamp,
    /// Compact target.
    pub bits: u32,
    /// Proof-of-work nonce.
    pub nonce: u32,
    /// Number of transactions in the block.
    pub num_transactions: usize,
}

/// Block queries.
pub struct BlockService {
    ledger: Arc<SharedLedger>,
}

impl BlockService {
    /// Create the service.
    pub fn new(ledger: Arc<SharedLedger>) -> Self {
        Self { ledger }
    }

    /// Hash of the chain head.
    pub fn get_last_block(&self) -> Result<GetLastBlockReply, RpcError> {
        Ok(GetLastBlockReply {
            hash: self.ledger.last_block_hash()?.map(|h| hash_to_hex(&h)),
        })
    }

    /// Header summary of the block with the given hash.
    pub fn get_block(&self, request: GetBlockRequest) -> Result<GetBlockReply, RpcError> {
        let hash = hash_from_hex(&request.hash)?;
        let block = self.ledger.get_block(&hash)?;
        let header = &block.header;
        Ok(GetBlockReply {
            previous_block_hash: hash_to_hex(&header.previous_block_hash),
            merkle_root_hash: hash_to_hex(&header.merkle_root_hash),
            timestamp: header.timestamp,
            bits: header.bits,
            nonce: header.nonce,
            num_transactions: block.transactions.len(),
        })
    }
}
