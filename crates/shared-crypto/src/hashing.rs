//! # SHA-256 Hashing
//!
//! Content addressing for transactions and blocks.
//!
//! - `sha256`: transaction identity, commit digests, key fingerprints
//! - `sha256d`: block header hashing and Merkle interior nodes (Bitcoin-style,
//!   immune to length extension)

use sha2::{Digest, Sha256};
use shared_types::Hash;

/// Stateful SHA-256 hasher.
pub struct Sha256Hasher {
    inner: Sha256,
}

impl Sha256Hasher {
    /// Create new hasher.
    pub fn new() -> Self {
        Self {
            inner: Sha256::new(),
        }
    }

    /// Update with data.
    pub fn update(&mut self, data: &[u8]) -> &mut Self {
        self.inner.update(data);
        self
    }

    /// Update with a `u32` length prefix followed by the data.
    ///
    /// Keeps variable-length fields unambiguous inside a digest.
    pub fn update_prefixed(&mut self, data: &[u8]) -> &mut Self {
        self.inner.update((data.len() as u32).to_le_bytes());
        self.inner.update(data);
        self
    }

    /// Finalize and return hash.
    pub fn finalize(self) -> Hash {
        self.inner.finalize().into()
    }
}

impl Default for Sha256Hasher {
    fn default() -> Self {
        Self::new()
    }
}

/// Hash data with SHA-256 (one-shot).
#[inline]
pub fn sha256(data: &[u8]) -> Hash {
    Sha256::digest(data).into()
}

/// Double SHA-256: `sha256(sha256(data))`.
#[inline]
pub fn sha256d(data: &[u8]) -> Hash {
    sha256(&sha256(data))
}

/// Hash multiple inputs as one stream.
pub fn sha256_many(inputs: &[&[u8]]) -> Hash {
    let mut hasher = Sha256Hasher::new();
    for input in inputs {
        hasher.update(input);
    }
    hasher.finalize()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha256_known_vector() {
        // SHA-256("abc")
        assert_eq!(
            hex::encode(sha256(b"abc")),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_deterministic() {
        assert_eq!(sha256(b"test"), sha256(b"test"));
        assert_ne!(sha256(b"input1"), sha256(b"input2"));
    }

    #[test]
    fn test_sha256d_double_hash() {
        let once = sha256(b"test");
        assert_eq!(sha256d(b"test"), sha256(&once));
    }

    #[test]
    fn test_streaming() {
        let oneshot = sha256(b"hello world");

        let mut hasher = Sha256Hasher::new();
        hasher.update(b"hello ");
        hasher.update(b"world");

        assert_eq!(oneshot, hasher.finalize());
        assert_eq!(oneshot, sha256_many(&[b"hello ", b"world"]));
    }

    #[test]
    fn test_prefixed_fields_are_unambiguous() {
        let mut a = Sha256Hasher::new();
        a.update_prefixed(b"ab").update_prefixed(b"c");

        let mut b = Sha256Hasher::new();
        b.update_prefixed(b"a").update_prefixed(b"bc");

        assert_ne!(a.finalize(), b.finalize());
    }
}
