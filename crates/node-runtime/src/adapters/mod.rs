//! # Adapters
//!
//! - `ports`: interfaces to outside transports
//! - `broadcast`: in-process transaction broadcast
//! - `storage`: key-value backends selected by configuration

pub mod broadcast;
pub mod ports;
pub mod storage;

pub use broadcast::InMemoryBroadcaster;
pub use ports::TransactionBroadcaster;
