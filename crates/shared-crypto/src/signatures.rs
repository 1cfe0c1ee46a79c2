//! # Ed25519 Signatures
//!
//! Twisted Edwards curve signatures with deterministic nonces.
//!
//! ## Security Properties
//!
//! - No RNG dependency when signing (deterministic nonce from message), so a
//!   transaction's content hash is stable across re-signing
//! - Strict verification: any bit flip in message, key or signature fails
//! - Secret seeds are zeroized when dropped

use crate::hashing::sha256;
use crate::CryptoError;
use ed25519_dalek::{Signer, SigningKey, Verifier, VerifyingKey};
use shared_types::{Hash, PublicKey, Signature};
use zeroize::Zeroizing;

/// Length of an Ed25519 secret seed, the keyring's key-material format.
pub const KEY_MATERIAL_LEN: usize = 32;

/// Ed25519 public key (32 bytes).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Ed25519PublicKey(PublicKey);

impl Ed25519PublicKey {
    /// Create from bytes, rejecting encodings that are not a curve point.
    pub fn from_bytes(bytes: PublicKey) -> Result<Self, CryptoError> {
        VerifyingKey::from_bytes(&bytes).map_err(|_| CryptoError::InvalidPublicKey)?;
        Ok(Self(bytes))
    }

    /// Get raw bytes.
    pub fn as_bytes(&self) -> &PublicKey {
        &self.0
    }

    /// Fingerprint of this key (SHA-256 of the raw bytes).
    pub fn fingerprint(&self) -> Hash {
        fingerprint(&self.0)
    }

    /// Verify a signature over `message`.
    pub fn verify(&self, message: &[u8], signature: &Ed25519Signature) -> Result<(), CryptoError> {
        let verifying_key =
            VerifyingKey::from_bytes(&self.0).map_err(|_| CryptoError::InvalidPublicKey)?;

        let sig = ed25519_dalek::Signature::from_bytes(&signature.0);

        verifying_key
            .verify_strict(message, &sig)
            .map_err(|_| CryptoError::SignatureVerificationFailed)
    }
}

/// Ed25519 signature (64 bytes).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ed25519Signature(Signature);

impl Ed25519Signature {
    /// Create from bytes.
    pub fn from_bytes(bytes: Signature) -> Self {
        Self(bytes)
    }

    /// Get raw bytes.
    pub fn as_bytes(&self) -> &Signature {
        &self.0
    }
}

/// Ed25519 keypair.
pub struct Ed25519KeyPair {
    signing_key: SigningKey,
}

impl Ed25519KeyPair {
    /// Generate random keypair.
    pub fn generate() -> Self {
        let signing_key = SigningKey::generate(&mut rand::rngs::OsRng);
        Self { signing_key }
    }

    /// Create from secret seed (32 bytes).
    pub fn from_seed(seed: [u8; KEY_MATERIAL_LEN]) -> Self {
        let signing_key = SigningKey::from_bytes(&seed);
        Self { signing_key }
    }

    /// Decode keyring key material.
    ///
    /// Fails with [`CryptoError::KeyFormat`] unless `material` is exactly a
    /// 32-byte seed.
    pub fn from_key_material(material: &[u8]) -> Result<Self, CryptoError> {
        if material.len() != KEY_MATERIAL_LEN {
            return Err(CryptoError::KeyFormat(format!(
                "expected {} byte Ed25519 seed, got {} bytes",
                KEY_MATERIAL_LEN,
                material.len()
            )));
        }
        let mut seed = Zeroizing::new([0u8; KEY_MATERIAL_LEN]);
        seed.copy_from_slice(material);
        Ok(Self::from_seed(*seed))
    }

    /// Encode as keyring key material.
    pub fn to_key_material(&self) -> Vec<u8> {
        self.signing_key.to_bytes().to_vec()
    }

    /// Get public key.
    pub fn public_key(&self) -> Ed25519PublicKey {
        Ed25519PublicKey(self.signing_key.verifying_key().to_bytes())
    }

    /// Sign a message (deterministic - no RNG needed).
    pub fn sign(&self, message: &[u8]) -> Ed25519Signature {
        Ed25519Signature(self.signing_key.sign(message).to_bytes())
    }
}

impl std::fmt::Debug for Ed25519KeyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ed25519KeyPair")
            .field("public_key", &self.public_key())
            .finish_non_exhaustive()
    }
}

/// Fingerprint of a raw public key.
pub fn fingerprint(public_key: &PublicKey) -> Hash {
    sha256(public_key)
}

/// Verify `signature` over `message` with raw key and signature bytes.
pub fn verify(
    public_key: &PublicKey,
    message: &[u8],
    signature: &Signature,
) -> Result<(), CryptoError> {
    Ed25519PublicKey::from_bytes(*public_key)?
        .verify(message, &Ed25519Signature::from_bytes(*signature))
}
