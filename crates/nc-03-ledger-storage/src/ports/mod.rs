//! # Ports
//!
//! Interfaces the ledger needs from its host.

pub mod outbound;
