//! Proof-of-work search

use std::sync::atomic::{AtomicBool, Ordering};

use super::difficulty::{describe_difficulty, is_satisfiable, HIGHEST_TARGET};
use super::entities::BlockHeader;
use crate::error::MiningError;
use crate::utils::hashing::{block_hash, meets_target};
use shared_types::Hash;

/// A header whose hash meets its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Solution {
    /// Mined header
    pub header: BlockHeader,
    /// Its hash
    pub hash: Hash,
    /// Header hashes computed during the search
    pub attempts: u64,
}

/// Single-threaded nonce search.
///
/// Tries nonces upward from 0. When the nonce space is exhausted the
/// timestamp is advanced by one second and the search restarts. The cancel
/// flag is polled every `cancel_check_interval` nonces.
#[derive(Debug, Clone)]
pub struct PoWMiner {
    cancel_check_interval: u32,
    max_nonce: u32,
}

impl Default for PoWMiner {
    fn default() -> Self {
        Self::new(crate::CANCEL_CHECK_INTERVAL)
    }
}

impl PoWMiner {
    /// Create a miner polling the cancel flag every `cancel_check_interval` nonces.
    pub fn new(cancel_check_interval: u32) -> Self {
        Self {
            cancel_check_interval: cancel_check_interval.max(1),
            max_nonce: u32::MAX,
        }
    }

    #[cfg(test)]
    pub(crate) fn with_max_nonce(mut self, max_nonce: u32) -> Self {
        self.max_nonce = max_nonce;
        self
    }

    /// Search for a nonce making `template` meet its target.
    #[tracing::instrument(skip(self, template, cancel), fields(bits = template.bits))]
    pub fn mine(
        &self,
        template: BlockHeader,
        cancel: &AtomicBool,
    ) -> Result<Solution, MiningError> {
        let mut header = template;

        if header.bits == HIGHEST_TARGET {
            header.nonce = 0;
            return Ok(Solution {
                hash: block_hash(&header),
                header,
                attempts: 1,
            });
        }

        if !is_satisfiable(header.bits) {
            return Err(MiningError::UnsatisfiableTarget { bits: header.bits });
        }

        tracing::debug!("Starting PoW search: difficulty {}", describe_difficulty(header.bits));

        let mut attempts = 0u64;
        loop {
            let mut nonce = 0u32;
            loop {
                if nonce % self.cancel_check_interval == 0 && cancel.load(Ordering::Relaxed) {
                    tracing::debug!("PoW search cancelled after {} attempts", attempts);
                    return Err(MiningError::Cancelled);
                }

                header.nonce = nonce;
                let hash = block_hash(&header);
                attempts += 1;

                if meets_target(&hash, header.bits) {
                    tracing::debug!("Found nonce {} after {} attempts", nonce, attempts);
                    return Ok(Solution {
                        header,
                        hash,
                        attempts,
                    });
                }

                if nonce >= self.max_nonce {
                    break;
                }
                nonce += 1;
            }

            header.timestamp += 1;
            tracing::debug!(
                "Nonce space exhausted, advancing timestamp to {}",
                header.timestamp
            );
        }
    }
}
