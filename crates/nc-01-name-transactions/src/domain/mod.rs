//! Domain layer for name transactions.
//!
//! - [`entities`]: the transaction sum type and its variants
//! - [`encoding`]: canonical byte encodings for hashing and signing

pub mod encoding;
pub mod entities;
