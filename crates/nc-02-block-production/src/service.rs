//! Cancelable mining service
//!
//! The nonce search is CPU-bound, so each job runs on tokio's blocking pool
//! and reports back over a oneshot channel. The caller keeps a
//! [`MiningHandle`] to cancel or await the job.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use nc_01_name_transactions::Transaction;
use shared_types::{now_timestamp, short_hex, Hash};
use tokio::sync::oneshot;
use tracing::{debug, info};

use crate::config::MiningConfig;
use crate::domain::{Block, PoWMiner};
use crate::error::MiningError;
use crate::metrics::Metrics;

/// Spawns mining jobs and tracks their metrics.
pub struct MiningService {
    miner: PoWMiner,
    metrics: Arc<Metrics>,
}

impl MiningService {
    /// Create a mining service
    pub fn new(config: &MiningConfig) -> Self {
        info!("[nc-02] Initializing Mining Service");
        info!("  Cancel check interval: {}", config.cancel_check_interval);

        Self {
            miner: PoWMiner::new(config.cancel_check_interval),
            metrics: Arc::new(Metrics::new()),
        }
    }

    /// Shared metrics
    pub fn metrics(&self) -> Arc<Metrics> {
        self.metrics.clone()
    }

    /// Start mining a block on top of `previous_block_hash`.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn(
        &self,
        previous_block_hash: Hash,
        bits: u32,
        transactions: Vec<Transaction>,
    ) -> MiningHandle {
        let cancel = Arc::new(AtomicBool::new(false));
        let (tx, rx) = oneshot::channel();

        let template = Block::template(previous_block_hash, bits, transactions, now_timestamp());
        let miner = self.miner.clone();
        let metrics = self.metrics.clone();
        let flag = cancel.clone();

        debug!(
            "[nc-02] Mining job on {} with {} transactions",
            short_hex(&previous_block_hash),
            template.transactions.len()
        );

        tokio::task::spawn_blocking(move || {
            let started = Instant::now();
            let result = miner.mine(template.header, &flag).map(|solution| {
                metrics.record_block_mined(
                    template.transactions.len(),
                    solution.attempts,
                    started.elapsed().as_millis() as u64,
                );
                Block {
                    header: solution.header,
                    transactions: template.transactions,
                }
            });
            if result == Err(MiningError::Cancelled) {
                metrics.record_cancelled();
            }
            // Receiver may be gone; the result is simply discarded then.
            let _ = tx.send(result);
        });

        MiningHandle { cancel, result: rx }
    }
}

/// Handle to a running mining job. Dropping it cancels the job.
pub struct MiningHandle {
    cancel: Arc<AtomicBool>,
    result: oneshot::Receiver<Result<Block, MiningError>>,
}

impl MiningHandle {
    /// Ask the worker to stop at its next cancel check.
    pub fn cancel(&self) {
        self.cancel.store(true, Ordering::Relaxed);
    }

    /// Whether cancellation was requested.
    pub fn is_cancelled(&self) -> bool {
        self.cancel.load(Ordering::Relaxed)
    }

    /// Wait for the worker's outcome.
    pub async fn wait(&mut self) -> Result<Block, MiningError> {
        match (&mut self.result).await {
            Ok(result) => result,
            Err(_) => Err(MiningError::WorkerLost),
        }
    }
}

impl Drop for MiningHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}
