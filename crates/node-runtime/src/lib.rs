//! # Node Runtime Library
//!
//! Everything the `name-chain-node` binary runs, exposed for tests.
//!
//! ## Modules
//!
//! - `container/` - configuration and dependency wiring
//! - `adapters/` - broadcast port, storage backends
//! - `pool` - pending transactions
//! - `producer` - the mining loop
//! - `rpc/` - Key, Name and Block services
//! - `logging` - tracing subscriber setup

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod container;
pub mod logging;
pub mod pool;
pub mod producer;
pub mod rpc;

pub use container::{ConfigError, NodeConfig, NodeContainer, SharedLedger};
pub use pool::TransactionPool;
pub use producer::{BlockProducer, ProducerError, RoundOutcome};
