//! # Shared Types Crate
//!
//! Value types shared by every Name-Chain crate.
//!
//! ## Design Principles
//!
//! - **Raw bytes inside, hex at the edge**: hashes travel as `[u8; 32]`
//!   internally and are rendered as lowercase hex only at the RPC boundary.
//! - **Single Source of Truth**: the empty hash and the key/signature widths
//!   are defined once, here.

pub mod entities;
pub mod errors;

pub use entities::*;
pub use errors::*;
