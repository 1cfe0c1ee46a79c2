//! # Name-Chain - Block Production (nc-02)
//!
//! Blocks, their proof-of-work, and the worker that searches for it.
//!
//! ## Block Layout
//!
//! ```text
//! ┌──────────────────────── header (84 bytes, hashed) ───────────────────────┐
//! │ version │ previous_block_hash │ merkle_root_hash │ timestamp │ bits │ nonce │
//! └──────────────────────────────────────────────────────────────────────────┘
//!   transactions[]  ── bound only through merkle_root_hash
//! ```
//!
//! Block hash = SHA-256d(header). A block is valid proof-of-work when its
//! hash, read as a big-endian 256-bit integer, is at most the target decoded
//! from `bits`. The [`HIGHEST_TARGET`] sentinel accepts any hash.
//!
//! ## Module Structure
//!
//! - [`domain`]: block entities, Merkle root, compact targets, the miner
//! - [`service`]: cancelable mining on a blocking worker
//! - [`utils`]: header serialization and target checks

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod domain;
pub mod service;
pub mod utils;

mod config;
mod error;
mod metrics;

pub use config::MiningConfig;
pub use error::{MiningError, VerificationError};
pub use metrics::Metrics;

pub use domain::{
    decode_compact, encode_compact, merkle_root, Block, BlockHeader, PoWMiner, Solution, Target,
    BLOCK_VERSION, HIGHEST_TARGET,
};
pub use service::{MiningHandle, MiningService};

/// Default difficulty for new chains: about 16 leading zero bits.
pub const DEFAULT_TARGET_BITS: u32 = 0x1f00_ffff;

/// Nonces tried between two checks of the cancel flag.
pub const CANCEL_CHECK_INTERVAL: u32 = 4_096;
