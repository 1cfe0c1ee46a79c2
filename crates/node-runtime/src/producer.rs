//! # Block Producer
//!
//! The mining loop:
//!
//! 1. Read the head and take candidates from the pool
//! 2. Drop candidates the naming rules reject at the head
//! 3. Mine on a blocking worker, canceling if the head moves
//! 4. Accept the block and remove its transactions from the pool
//!
//! A shutdown signal ends the loop; the in-flight search is canceled when
//! its [`MiningHandle`](nc_02_block_production::MiningHandle) is dropped.

use std::sync::Arc;
use std::time::Duration;

use nc_01_name_transactions::Transaction;
use nc_02_block_production::{MiningError, MiningService};
use nc_03_ledger_storage::LedgerError;
use shared_types::{short_hex, Hash, EMPTY_HASH};
use thiserror::Error;
use tokio::sync::watch;
use tracing::{debug, error, info, warn};

use crate::container::{MiningSettings, SharedLedger};
use crate::pool::TransactionPool;

/// How often a running search checks whether the head moved.
const HEAD_POLL_INTERVAL: Duration = Duration::from_millis(200);

/// Errors from one production round.
#[derive(Debug, Error)]
pub enum ProducerError {
    /// Ledger read or write failed.
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    /// Mining did not produce a block.
    #[error(transparent)]
    Mining(#[from] MiningError),
}

/// Outcome of one production round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoundOutcome {
    /// Nothing to mine.
    Idle,
    /// A block was mined and accepted.
    Accepted(Hash),
    /// The head moved before the block could be accepted.
    Superseded,
}

/// Mines pending transactions into blocks.
pub struct BlockProducer {
    ledger: Arc<SharedLedger>,
    pool: Arc<TransactionPool>,
    mining: Arc<MiningService>,
    settings: MiningSettings,
}

impl BlockProducer {
    /// Create a producer.
    pub fn new(
        ledger: Arc<SharedLedger>,
        pool: Arc<TransactionPool>,
        mining: Arc<MiningService>,
        settings: MiningSettings,
    ) -> Self {
        Self {
            ledger,
            pool,
            mining,
            settings,
        }
    }

    /// Run rounds until `shutdown` turns true.
    pub async fn run(self, mut shutdown: watch::Receiver<bool>) {
        info!(
            "[producer] Started (bits {:#010x}, interval {}ms)",
            self.settings.target_bits, self.settings.block_interval_ms
        );
        let interval = Duration::from_millis(self.settings.block_interval_ms);

        loop {
            if *shutdown.borrow() {
                break;
            }

            tokio::select! {
                result = self.produce_round() => match result {
                    Ok(RoundOutcome::Accepted(hash)) => {
                        info!("[producer] Mined block {}", short_hex(&hash));
                        continue;
                    }
                    Ok(RoundOutcome::Idle) => {}
                    Ok(RoundOutcome::Superseded) => continue,
                    Err(e) => error!("[producer] Round failed: {}", e),
                },
                _ = shutdown.changed() => break,
            }

            tokio::select! {
                _ = tokio::time::sleep(interval) => {}
                _ = shutdown.changed() => break,
            }
        }

        info!("[producer] Stopped");
    }

    /// Run one round: select, mine, accept.
    #[tracing::instrument(skip(self))]
    pub async fn produce_round(&self) -> Result<RoundOutcome, ProducerError> {
        let head = self.ledger.last_block_hash()?.unwrap_or(EMPTY_HASH);
        let transactions = self.select_transactions(&head)?;
        if transactions.is_empty() {
            return Ok(RoundOutcome::Idle);
        }

        let included: Vec<Hash> = transactions.iter().map(Transaction::hash).collect();
        let mut handle = self
            .mining
            .spawn(head, self.settings.target_bits, transactions);

        let block = loop {
            tokio::select! {
                result = handle.wait() => break result?,
                _ = tokio::time::sleep(HEAD_POLL_INTERVAL) => {
                    if self.ledger.last_block_hash()?.unwrap_or(EMPTY_HASH) != head {
                        debug!("[producer] Head moved, abandoning search");
                        handle.cancel();
                        return Ok(RoundOutcome::Superseded);
                    }
                }
            }
        };

        if self.ledger.last_block_hash()?.unwrap_or(EMPTY_HASH) != head {
            debug!("[producer] Head moved while mining, discarding block");
            return Ok(RoundOutcome::Superseded);
        }

        let hash = self.ledger.accept_block(&block)?;
        self.pool.remove(&included);
        Ok(RoundOutcome::Accepted(hash))
    }

    /// Pool candidates that apply cleanly, in order, on top of `head`.
    ///
    /// Rejected candidates are removed from the pool.
    fn select_transactions(&self, head: &Hash) -> Result<Vec<Transaction>, ProducerError> {
        let candidates = self.pool.candidates(self.settings.max_block_transactions);
        if candidates.is_empty() {
            return Ok(candidates);
        }

        let mut state = self.ledger.naming_state_at(head)?;
        let mut selected = Vec::with_capacity(candidates.len());
        let mut rejected = Vec::new();

        for tx in candidates {
            match state.apply(&tx) {
                Ok(()) => selected.push(tx),
                Err(e) => {
                    warn!(
                        "[producer] Dropping {} {}: {}",
                        tx.kind().as_str(),
                        short_hex(&tx.hash()),
                        e
                    );
                    rejected.push(tx.hash());
                }
            }
        }

        self.pool.remove(&rejected);
        Ok(selected)
    }
}
