//! # Core Value Types
//!
//! The identity types every other crate builds on.
//!
//! - **Hash**: 32-byte digest; identity of blocks and transactions
//! - **PublicKey** / **Signature**: Ed25519 widths
//! - **Timestamp**: seconds since the Unix epoch

use crate::errors::HashParseError;

/// A 32-byte content digest.
pub type Hash = [u8; 32];

/// A 32-byte Ed25519 public key.
pub type PublicKey = [u8; 32];

/// A 64-byte Ed25519 signature.
pub type Signature = [u8; 64];

/// Seconds since the Unix epoch.
pub type Timestamp = i64;

/// Width of every [`Hash`] in bytes.
pub const HASH_LEN: usize = 32;

/// The all-zero hash, meaning "no predecessor".
///
/// Used as the previous-block-hash of the genesis block and as the Merkle
/// root of a block without transactions.
pub const EMPTY_HASH: Hash = [0u8; HASH_LEN];

/// Returns true if `hash` is the empty (all-zero) hash.
#[inline]
pub fn is_empty_hash(hash: &Hash) -> bool {
    *hash == EMPTY_HASH
}

/// Render a hash as 64 lowercase hex characters.
pub fn hash_to_hex(hash: &Hash) -> String {
    hex::encode(hash)
}

/// Parse a hash from its hex rendering.
///
/// Accepts upper or lower case; rejects anything that does not decode to
/// exactly [`HASH_LEN`] bytes.
pub fn hash_from_hex(input: &str) -> Result<Hash, HashParseError> {
    let bytes = hex::decode(input.trim()).map_err(|e| HashParseError::InvalidHex(e.to_string()))?;
    if bytes.len() != HASH_LEN {
        return Err(HashParseError::InvalidLength {
            expected: HASH_LEN,
            actual: bytes.len(),
        });
    }
    let mut hash = EMPTY_HASH;
    hash.copy_from_slice(&bytes);
    Ok(hash)
}

/// Short prefix of a hash for log lines.
pub fn short_hex(hash: &Hash) -> String {
    hex::encode(&hash[..4])
}

/// Current wall-clock time as a [`Timestamp`].
pub fn now_timestamp() -> Timestamp {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs() as Timestamp)
        .unwrap_or(0)
}
