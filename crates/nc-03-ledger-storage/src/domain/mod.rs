//! # Domain Layer
//!
//! Pure ledger rules with no I/O.

pub mod errors;
pub mod keyring;
pub mod naming;
pub mod value_objects;
