//! Canonical encodings.
//!
//! Variable-length fields are length-prefixed and each variant carries a
//! distinct tag byte, so no two distinct transactions share an encoding.

use shared_crypto::Sha256Hasher;
use shared_types::{Hash, PublicKey};

/// Width of the random nonce used to blind a reservation.
pub const RANDOM_NONCE_LEN: usize = 32;

/// Variant tags. Also used as signing-domain separators.
pub(crate) const TAG_RESERVATION: u8 = 0x01;
pub(crate) const TAG_ALLOCATION: u8 = 0x02;
pub(crate) const TAG_DEALLOCATION: u8 = 0x03;

/// The reservation commitment `H(name, public_key, random_nonce)`.
///
/// Without `random_nonce` the digest cannot be tested against candidate
/// names, which is what keeps a pending reservation private.
pub fn commit_digest(
    name: &str,
    public_key: &PublicKey,
    random_nonce: &[u8; RANDOM_NONCE_LEN],
) -> Hash {
    let mut hasher = Sha256Hasher::new();
    hasher
        .update_prefixed(name.as_bytes())
        .update(public_key)
        .update(random_nonce);
    hasher.finalize()
}

/// Message signed by an allocation.
pub(crate) fn allocation_payload(name: &str, random_nonce: &[u8; RANDOM_NONCE_LEN]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(1 + 4 + name.len() + RANDOM_NONCE_LEN);
    bytes.push(TAG_ALLOCATION);
    push_prefixed(&mut bytes, name.as_bytes());
    bytes.extend_from_slice(random_nonce);
    bytes
}

/// Message signed by a deallocation.
pub(crate) fn deallocation_payload(name: &str) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(1 + 4 + name.len());
    bytes.push(TAG_DEALLOCATION);
    push_prefixed(&mut bytes, name.as_bytes());
    bytes
}

pub(crate) fn push_prefixed(bytes: &mut Vec<u8>, field: &[u8]) {
    bytes.extend_from_slice(&(field.len() as u32).to_le_bytes());
    bytes.extend_from_slice(field);
}
