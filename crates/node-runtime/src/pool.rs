//! # Transaction Pool
//!
//! Transactions waiting to be mined, in arrival order and deduplicated by
//! hash. The producer takes candidates from the front and removes them once
//! they are in an accepted block.

use std::collections::{HashSet, VecDeque};

use nc_01_name_transactions::Transaction;
use parking_lot::Mutex;
use shared_types::Hash;

#[derive(Default)]
struct PoolInner {
    queue: VecDeque<(Hash, Transaction)>,
    hashes: HashSet<Hash>,
}

/// Pending transactions.
#[derive(Default)]
pub struct TransactionPool {
    inner: Mutex<PoolInner>,
}

impl TransactionPool {
    /// Create an empty pool.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `tx`; returns `false` if it is already pending.
    pub fn submit(&self, tx: Transaction) -> bool {
        let hash = tx.hash();
        let mut inner = self.inner.lock();
        if !inner.hashes.insert(hash) {
            return false;
        }
        inner.queue.push_back((hash, tx));
        true
    }

    /// Up to `max` oldest transactions, left in the pool.
    pub fn candidates(&self, max: usize) -> Vec<Transaction> {
        self.inner
            .lock()
            .queue
            .iter()
            .take(max)
            .map(|(_, tx)| tx.clone())
            .collect()
    }

    /// Drop the given transactions; unknown hashes are ignored.
    pub fn remove(&self, hashes: &[Hash]) {
        let mut inner = self.inner.lock();
        for hash in hashes {
            inner.hashes.remove(hash);
        }
        let PoolInner { queue, hashes: live } = &mut *inner;
        queue.retain(|(hash, _)| live.contains(hash));
    }

    /// The pending transaction with `hash`.
    pub fn get(&self, hash: &Hash) -> Option<Transaction> {
        self.inner
            .lock()
            .queue
            .iter()
            .find(|(pending, _)| pending == hash)
            .map(|(_, tx)| tx.clone())
    }

    /// Whether `hash` is pending.
    pub fn contains(&self, hash: &Hash) -> bool {
        self.inner.lock().hashes.contains(hash)
    }

    /// Number of pending transactions.
    pub fn len(&self) -> usize {
        self.inner.lock().queue.len()
    }

    /// Whether nothing is pending.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
