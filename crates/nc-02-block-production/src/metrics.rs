//! Metrics collection for block production

use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics collector for mining
#[derive(Debug, Default)]
pub struct Metrics {
    /// Total blocks mined
    pub blocks_mined: AtomicU64,

    /// Total transactions included in mined blocks
    pub transactions_included: AtomicU64,

    /// Total header hashes computed
    pub hashes_computed: AtomicU64,

    /// Total mining time (milliseconds)
    pub mining_time_ms: AtomicU64,

    /// Searches abandoned through cancellation
    pub searches_cancelled: AtomicU64,
}

impl Metrics {
    /// Create new metrics collector
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a mined block
    pub fn record_block_mined(&self, tx_count: usize, hashes: u64, duration_ms: u64) {
        self.blocks_mined.fetch_add(1, Ordering::Relaxed);
        self.transactions_included
            .fetch_add(tx_count as u64, Ordering::Relaxed);
        self.hashes_computed.fetch_add(hashes, Ordering::Relaxed);
        self.mining_time_ms.fetch_add(duration_ms, Ordering::Relaxed);
    }

    /// Record a cancelled search
    pub fn record_cancelled(&self) {
        self.searches_cancelled.fetch_add(1, Ordering::Relaxed);
    }

    /// Get blocks mined
    pub fn get_blocks_mined(&self) -> u64 {
        self.blocks_mined.load(Ordering::Relaxed)
    }

    /// Get cancelled searches
    pub fn get_searches_cancelled(&self) -> u64 {
        self.searches_cancelled.load(Ordering::Relaxed)
    }

    /// Average hashes per second over all completed searches
    pub fn get_hash_rate(&self) -> f64 {
        let ms = self.mining_time_ms.load(Ordering::Relaxed);
        if ms == 0 {
            return 0.0;
        }
        self.hashes_computed.load(Ordering::Relaxed) as f64 * 1000.0 / ms as f64
    }
}
