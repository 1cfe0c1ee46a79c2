//! # Name Transactions (nc-01)
//!
//! The three transactions that move a name through its lifecycle.
//!
//! ## Commit-Reveal Protocol
//!
//! ```text
//!   NameReservation            NameAllocation             NameDeallocation
//!   (commit: H(name,pk,r))  →  (reveal: name, r)       →  (release: name)
//!         │                          │                          │
//!     name hidden               Reserved → Allocated       Allocated → Free
//! ```
//!
//! A reservation publishes only a digest of `(name, public_key, random_nonce)`.
//! The nonce stays with the caller until the reveal, so nobody watching the
//! network can claim the name first.
//!
//! ## Identity
//!
//! Every transaction is content-addressed: [`Transaction::hash`] is SHA-256
//! over a canonical, variant-tagged encoding of all fields. Ed25519
//! signatures are deterministic, so equal inputs always hash equally.
//!
//! Semantic validity (does a matching reservation exist, who owns the name)
//! is not checked here; that is the ledger's job.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod domain;

pub use domain::encoding::{commit_digest, RANDOM_NONCE_LEN};
pub use domain::entities::{
    NameAllocation, NameDeallocation, NameReservation, RandomNonce, Transaction, TransactionKind,
};
pub use shared_crypto::CryptoError;
