//! Header serialization and proof-of-work checks
//!
//! The header is encoded as fixed-width little-endian integers and raw hash
//! bytes, in field order. The block hash is SHA-256d of that encoding.

use shared_crypto::sha256d;
use shared_types::Hash;

use crate::domain::difficulty::{Target, HIGHEST_TARGET};
use crate::domain::entities::BlockHeader;

/// Length of an encoded header in bytes.
pub const HEADER_LEN: usize = 4 + 32 + 32 + 8 + 4 + 4;

/// Serialize block header for hashing
pub fn serialize_block_header(header: &BlockHeader) -> [u8; HEADER_LEN] {
    let mut out = [0u8; HEADER_LEN];
    out[0..4].copy_from_slice(&header.version.to_le_bytes());
    out[4..36].copy_from_slice(&header.previous_block_hash);
    out[36..68].copy_from_slice(&header.merkle_root_hash);
    out[68..76].copy_from_slice(&header.timestamp.to_le_bytes());
    out[76..80].copy_from_slice(&header.bits.to_le_bytes());
    out[80..84].copy_from_slice(&header.nonce.to_le_bytes());
    out
}

/// SHA-256d of the encoded header.
#[inline]
pub fn block_hash(header: &BlockHeader) -> Hash {
    sha256d(&serialize_block_header(header))
}

/// Check a hash against a compact target.
///
/// The target is a ceiling: the hash qualifies when it is less than or equal
/// to it. [`HIGHEST_TARGET`] accepts every hash.
#[inline]
pub fn meets_target(hash: &Hash, bits: u32) -> bool {
    if bits == HIGHEST_TARGET {
        return true;
    }
    Target::from_compact(bits).is_met_by(hash)
}
