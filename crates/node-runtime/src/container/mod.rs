//! # Node Container
//!
//! Holds the node's long-lived components and wires them together. The
//! ledger is created once here and passed explicitly to everything that
//! needs it.

pub mod config;
mod node;

pub use config::{
    ConfigError, LoggingConfig, MiningSettings, NodeConfig, StorageBackend, StorageConfig,
};
pub use node::{NodeContainer, SharedLedger};
