//! Crypto error types.

use thiserror::Error;

/// Cryptographic operation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CryptoError {
    /// Key material is malformed (wrong length or not a valid key).
    #[error("Malformed key material: {0}")]
    KeyFormat(String),

    /// Signature verification failed
    #[error("Signature verification failed")]
    SignatureVerificationFailed,

    /// Invalid public key
    #[error("Invalid public key")]
    InvalidPublicKey,
}

impl CryptoError {
    /// True for errors caused by malformed key material rather than a bad
    /// signature.
    pub fn is_key_format(&self) -> bool {
        matches!(
            self,
            Self::KeyFormat(_) | Self::InvalidPublicKey
        )
    }
}
