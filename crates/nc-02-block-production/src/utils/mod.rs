//! Utility functions for block production

pub mod hashing;

pub use hashing::{block_hash, meets_target, serialize_block_header};
