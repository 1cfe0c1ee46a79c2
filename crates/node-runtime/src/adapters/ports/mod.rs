//! # Outbound Ports
//!
//! Interfaces to transports the node does not implement itself.

use async_trait::async_trait;
use nc_01_name_transactions::Transaction;

/// Sends transactions to the network.
///
/// Fire-and-forget: implementations log failures and never return them.
#[async_trait]
pub trait TransactionBroadcaster: Send + Sync {
    /// Broadcast `tx` to peers.
    async fn broadcast(&self, tx: &Transaction);

    /// Total broadcasts attempted.
    fn transactions_broadcast(&self) -> u64;
}
