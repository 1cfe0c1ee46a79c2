//! Domain layer for block production

pub mod difficulty;
pub mod entities;
pub mod merkle;
pub mod services;

pub use difficulty::{decode_compact, encode_compact, Target, HIGHEST_TARGET};
pub use entities::{Block, BlockHeader, BLOCK_VERSION};
pub use merkle::merkle_root;
pub use services::{PoWMiner, Solution};
