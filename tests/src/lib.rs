//! # Name-Chain Test Suite
//!
//! ## Structure
//!
//! ```text
//! tests/
//! ├── src/integration/
//! │   ├── name_lifecycle.rs   # commit-reveal scenarios against the ledger
//! │   └── node_flow.rs        # RPC services, pool and producer together
//! └── benches/
//!     └── ledger_benchmarks.rs
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p nc-tests
//! cargo test -p nc-tests integration::name_lifecycle
//!
//! # Benchmarks
//! cargo bench -p nc-tests
//! ```

#![allow(unused_variables)]
#![allow(unused_imports)]
#![allow(dead_code)]

pub mod integration;
