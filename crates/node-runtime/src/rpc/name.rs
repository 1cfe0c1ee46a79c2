//! Name service: build, sign, pool and broadcast name transactions.
//!
//! Nothing is written to the ledger here; a transaction is stored only as
//! part of an accepted block.

use std::sync::Arc;

use nc_01_name_transactions::{RandomNonce, Transaction};
use serde::{Deserialize, Serialize};
use shared_types::hash_to_hex;
use tracing::{debug, info};

use super::key::load_key_pair;
use super::RpcError;
use crate::adapters::TransactionBroadcaster;
use crate::container::SharedLedger;
use crate::pool::TransactionPool;

/// `name_reservation` parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NameReservationRequest {
    /// Alias of the signing key.
    pub alias: String,
    /// Name to reserve.
    pub name: String,
}

/// `name_reservation` reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameReservationReply {
    /// Transaction hash, hex.
    pub id: String,
    /// Random nonce needed for the allocation, hex.
    pub random: String,
}

/// `name_allocation` parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NameAllocationRequest {
    /// Alias of the signing key.
    pub alias: String,
    /// Name being revealed.
    pub name: String,
    /// Nonce returned by the reservation, hex.
    pub random: String,
}

/// `name_deallocation` parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NameDeallocationRequest {
    /// Alias of the signing key.
    pub alias: String,
    /// Name to release.
    pub name: String,
}

/// Reply carrying a transaction hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionIdReply {
    /// Transaction hash, hex.
    pub id: String,
}

/// Name lifecycle operations.
pub struct NameService {
    ledger: Arc<SharedLedger>,
    pool: Arc<TransactionPool>,
    broadcaster: Arc<dyn TransactionBroadcaster>,
}

impl NameService {
    /// Create the service.
    pub fn new(
        ledger: Arc<SharedLedger>,
        pool: Arc<TransactionPool>,
        broadcaster: Arc<dyn TransactionBroadcaster>,
    ) -> Self {
        Self {
            ledger,
            pool,
            broadcaster,
        }
    }

    /// Commit to a name without revealing it.
    pub async fn name_reservation(
        &self,
        request: NameReservationRequest,
    ) -> Result<NameReservationReply, RpcError> {
        let key_pair = load_key_pair(&self.ledger, &request.alias)?;
        let (tx, random_nonce) = Transaction::name_reservation(&request.name, &key_pair);
        let id = self.submit(tx).await?;
        Ok(NameReservationReply {
            id,
            random: hex::encode(random_nonce),
        })
    }

    /// Reveal a reserved name and claim it.
    pub async fn name_allocation(
        &self,
        request: NameAllocationRequest,
    ) -> Result<TransactionIdReply, RpcError> {
        let random_nonce = parse_nonce(&request.random)?;
        let key_pair = load_key_pair(&self.ledger, &request.alias)?;
        let tx = Transaction::name_allocation(&request.name, random_nonce, &key_pair);
        Ok(TransactionIdReply {
            id: self.submit(tx).await?,
        })
    }

    /// Release an owned name.
    pub async fn name_deallocation(
        &self,
        request: NameDeallocationRequest,
    ) -> Result<TransactionIdReply, RpcError> {
        let key_pair = load_key_pair(&self.ledger, &request.alias)?;
        let tx = Transaction::name_deallocation(&request.name, &key_pair);
        Ok(TransactionIdReply {
            id: self.submit(tx).await?,
        })
    }

    async fn submit(&self, tx: Transaction) -> Result<String, RpcError> {
        let hash = tx.hash();
        if !self.pool.submit(tx.clone()) {
            debug!("[rpc] {} already pending", hash_to_hex(&hash));
        }
        self.broadcaster.broadcast(&tx).await;
        info!("[rpc] Submitted {} {}", tx.kind().as_str(), hash_to_hex(&hash));
        Ok(hash_to_hex(&hash))
    }
}

fn parse_nonce(input: &str) -> Result<RandomNonce, RpcError> {
    let bytes = hex::decode(input.trim())
        .map_err(|e| RpcError::invalid_params(format!("random is not hex: {e}")))?;
    RandomNonce::try_from(bytes.as_slice()).map_err(|_| {
        RpcError::invalid_params(format!("random must be 32 bytes, got {}", bytes.len()))
    })
}
