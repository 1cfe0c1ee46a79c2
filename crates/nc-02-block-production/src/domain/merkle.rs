//! Merkle root over transaction hashes
//!
//! Parent = SHA-256d(left || right). A level with an odd count pairs its last
//! node with itself. A single leaf is its own root; no leaves gives
//! [`EMPTY_HASH`].

use shared_crypto::sha256d;
use shared_types::{Hash, EMPTY_HASH};

/// Hash two child nodes into their parent.
#[inline]
pub fn hash_pair(left: &Hash, right: &Hash) -> Hash {
    let mut combined = [0u8; 64];
    combined[..32].copy_from_slice(left);
    combined[32..].copy_from_slice(right);
    sha256d(&combined)
}

/// Compute the Merkle root of `leaves` in order.
pub fn merkle_root(leaves: &[Hash]) -> Hash {
    if leaves.is_empty() {
        return EMPTY_HASH;
    }

    let mut level = leaves.to_vec();
    while level.len() > 1 {
        level = level
            .chunks(2)
            .map(|pair| match pair {
                [left, right] => hash_pair(left, right),
                [single] => hash_pair(single, single),
                _ => unreachable!("chunks(2) yields one or two items"),
            })
            .collect();
    }
    level[0]
}
