//! # Shared Crypto - Cryptographic Identity
//!
//! Every Name-Chain transaction is signed; every block and transaction is
//! identified by a SHA-256 based digest. This crate holds both concerns.
//!
//! ## Components
//!
//! | Module | Algorithm | Use Case |
//! |--------|-----------|----------|
//! | `hashing` | SHA-256, SHA-256d | Content addressing, proof-of-work |
//! | `signatures` | Ed25519 | Transaction signing, key fingerprints |
//!
//! ## Key Material
//!
//! Keyring entries store the 32-byte Ed25519 secret seed. Decoding of any
//! outer container (PEM, PKCS#8) is the caller's job.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod errors;
pub mod hashing;
pub mod signatures;

// Re-exports
pub use errors::CryptoError;
pub use hashing::{sha256, sha256_many, sha256d, Sha256Hasher};
pub use signatures::{fingerprint, verify, Ed25519KeyPair, Ed25519PublicKey, Ed25519Signature};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
