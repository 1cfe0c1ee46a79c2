//! # In-Process Broadcaster
//!
//! [`TransactionBroadcaster`] on a `tokio::sync::broadcast` channel. Local
//! subscribers receive every broadcast transaction; a network transport
//! would subscribe here and forward to peers.

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use nc_01_name_transactions::Transaction;
use shared_types::short_hex;
use tokio::sync::broadcast;
use tracing::{debug, warn};

use super::ports::TransactionBroadcaster;

/// Default channel capacity.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 1024;

/// Broadcast channel of transactions.
pub struct InMemoryBroadcaster {
    sender: broadcast::Sender<Transaction>,
    broadcast_count: AtomicU64,
}

impl InMemoryBroadcaster {
    /// Create a broadcaster with default capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CHANNEL_CAPACITY)
    }

    /// Create a broadcaster with the given capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self {
            sender,
            broadcast_count: AtomicU64::new(0),
        }
    }

    /// Receive every transaction broadcast from now on.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<Transaction> {
        self.sender.subscribe()
    }

    /// Number of active subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for InMemoryBroadcaster {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TransactionBroadcaster for InMemoryBroadcaster {
    async fn broadcast(&self, tx: &Transaction) {
        self.broadcast_count.fetch_add(1, Ordering::Relaxed);

        match self.sender.send(tx.clone()) {
            Ok(receivers) => debug!(
                "Broadcast {} {} to {} subscribers",
                tx.kind().as_str(),
                short_hex(&tx.hash()),
                receivers
            ),
            Err(_) => warn!(
                "Broadcast of {} {} reached no subscribers",
                tx.kind().as_str(),
                short_hex(&tx.hash())
            ),
        }
    }

    fn transactions_broadcast(&self) -> u64 {
        self.broadcast_count.load(Ordering::Relaxed)
    }
}
