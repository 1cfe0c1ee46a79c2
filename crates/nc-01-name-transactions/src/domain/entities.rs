//! # Transaction Entities
//!
//! [`Transaction`] is a closed sum type; callers that validate or apply
//! transactions match on it exhaustively.

use rand::RngCore;
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, Bytes};
use shared_crypto::hashing::Sha256Hasher;
use shared_crypto::signatures::{self, Ed25519KeyPair};
use shared_crypto::CryptoError;
use shared_types::{Hash, PublicKey, Signature};

use super::encoding::{
    allocation_payload, commit_digest, deallocation_payload, push_prefixed, RANDOM_NONCE_LEN,
    TAG_ALLOCATION, TAG_DEALLOCATION, TAG_RESERVATION,
};

/// Secret blinding value of a reservation. Never broadcast.
pub type RandomNonce = [u8; RANDOM_NONCE_LEN];

/// Discriminant of a [`Transaction`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionKind {
    /// Commit to a hidden name.
    NameReservation,
    /// Reveal a committed name and take ownership.
    NameAllocation,
    /// Release an owned name.
    NameDeallocation,
}

impl TransactionKind {
    /// Stable name for logs and RPC replies.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NameReservation => "name_reservation",
            Self::NameAllocation => "name_allocation",
            Self::NameDeallocation => "name_deallocation",
        }
    }
}

/// Commit phase: a signed digest of `(name, public_key, random_nonce)`.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameReservation {
    /// Commit digest, see [`commit_digest`].
    pub hashed_name: Hash,
    /// Reserving key.
    pub public_key: PublicKey,
    /// Signature over `hashed_name`.
    #[serde_as(as = "Bytes")]
    pub signature: Signature,
}

impl NameReservation {
    /// Reserve `name` for `key_pair`.
    ///
    /// Returns the transaction and the freshly drawn random nonce. The nonce
    /// is required to reveal later; losing it forfeits the reservation.
    pub fn new(name: &str, key_pair: &Ed25519KeyPair) -> (Self, RandomNonce) {
        let mut random_nonce = [0u8; RANDOM_NONCE_LEN];
        rand::rngs::OsRng.fill_bytes(&mut random_nonce);
        (Self::with_nonce(name, random_nonce, key_pair), random_nonce)
    }

    /// Reserve `name` with a caller-chosen nonce.
    pub fn with_nonce(name: &str, random_nonce: RandomNonce, key_pair: &Ed25519KeyPair) -> Self {
        let public_key = *key_pair.public_key().as_bytes();
        let hashed_name = commit_digest(name, &public_key, &random_nonce);
        let signature = *key_pair.sign(&hashed_name).as_bytes();
        Self {
            hashed_name,
            public_key,
            signature,
        }
    }

    /// Fingerprint of the reserving key.
    pub fn fingerprint(&self) -> Hash {
        signatures::fingerprint(&self.public_key)
    }
}

/// Reveal phase: the name and nonce in the clear.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameAllocation {
    /// Revealed name.
    pub name: String,
    /// Nonce used by the matching reservation.
    pub random_nonce: RandomNonce,
    /// Signer; must equal the reserving key.
    pub public_key: PublicKey,
    /// Signature over `(name, random_nonce)`.
    #[serde_as(as = "Bytes")]
    pub signature: Signature,
}

impl NameAllocation {
    /// Build and sign a reveal. Does not look for a matching reservation.
    pub fn new(name: &str, random_nonce: RandomNonce, key_pair: &Ed25519KeyPair) -> Self {
        let signature = *key_pair
            .sign(&allocation_payload(name, &random_nonce))
            .as_bytes();
        Self {
            name: name.to_string(),
            random_nonce,
            public_key: *key_pair.public_key().as_bytes(),
            signature,
        }
    }

    /// The commit digest this reveal claims to open.
    pub fn expected_commit(&self) -> Hash {
        commit_digest(&self.name, &self.public_key, &self.random_nonce)
    }
}

/// Release of an owned name.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameDeallocation {
    /// Name being released.
    pub name: String,
    /// Signer; must be the current owner.
    pub public_key: PublicKey,
    /// Signature over `name`.
    #[serde_as(as = "Bytes")]
    pub signature: Signature,
}

impl NameDeallocation {
    /// Build and sign a release.
    pub fn new(name: &str, key_pair: &Ed25519KeyPair) -> Self {
        let signature = *key_pair.sign(&deallocation_payload(name)).as_bytes();
        Self {
            name: name.to_string(),
            public_key: *key_pair.public_key().as_bytes(),
            signature,
        }
    }
}

/// A name lifecycle transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Transaction {
    /// Commit.
    NameReservation(NameReservation),
    /// Reveal.
    NameAllocation(NameAllocation),
    /// Release.
    NameDeallocation(NameDeallocation),
}

impl Transaction {
    /// Build a reservation; see [`NameReservation::new`].
    pub fn name_reservation(name: &str, key_pair: &Ed25519KeyPair) -> (Self, RandomNonce) {
        let (tx, random_nonce) = NameReservation::new(name, key_pair);
        (Self::NameReservation(tx), random_nonce)
    }

    /// Build an allocation; see [`NameAllocation::new`].
    pub fn name_allocation(
        name: &str,
        random_nonce: RandomNonce,
        key_pair: &Ed25519KeyPair,
    ) -> Self {
        Self::NameAllocation(NameAllocation::new(name, random_nonce, key_pair))
    }

    /// Build a deallocation; see [`NameDeallocation::new`].
    pub fn name_deallocation(name: &str, key_pair: &Ed25519KeyPair) -> Self {
        Self::NameDeallocation(NameDeallocation::new(name, key_pair))
    }

    /// Variant discriminant.
    pub fn kind(&self) -> TransactionKind {
        match self {
            Self::NameReservation(_) => TransactionKind::NameReservation,
            Self::NameAllocation(_) => TransactionKind::NameAllocation,
            Self::NameDeallocation(_) => TransactionKind::NameDeallocation,
        }
    }

    /// Public key that signed this transaction.
    pub fn signer(&self) -> &PublicKey {
        match self {
            Self::NameReservation(tx) => &tx.public_key,
            Self::NameAllocation(tx) => &tx.public_key,
            Self::NameDeallocation(tx) => &tx.public_key,
        }
    }

    /// Name in the clear, if this variant reveals one.
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::NameReservation(_) => None,
            Self::NameAllocation(tx) => Some(&tx.name),
            Self::NameDeallocation(tx) => Some(&tx.name),
        }
    }

    /// Bytes covered by the signature.
    pub fn signing_payload(&self) -> Vec<u8> {
        match self {
            Self::NameReservation(tx) => tx.hashed_name.to_vec(),
            Self::NameAllocation(tx) => allocation_payload(&tx.name, &tx.random_nonce),
            Self::NameDeallocation(tx) => deallocation_payload(&tx.name),
        }
    }

    /// Check the signature against the embedded public key.
    pub fn verify_signature(&self) -> Result<(), CryptoError> {
        let signature = match self {
            Self::NameReservation(tx) => &tx.signature,
            Self::NameAllocation(tx) => &tx.signature,
            Self::NameDeallocation(tx) => &tx.signature,
        };
        signatures::verify(self.signer(), &self.signing_payload(), signature)
    }

    /// Content hash over every field, signature included.
    pub fn hash(&self) -> Hash {
        let mut bytes = Vec::with_capacity(160);
        match self {
            Self::NameReservation(tx) => {
                bytes.push(TAG_RESERVATION);
                bytes.extend_from_slice(&tx.hashed_name);
                bytes.extend_from_slice(&tx.public_key);
                bytes.extend_from_slice(&tx.signature);
            }
            Self::NameAllocation(tx) => {
                bytes.push(TAG_ALLOCATION);
                push_prefixed(&mut bytes, tx.name.as_bytes());
                bytes.extend_from_slice(&tx.random_nonce);
                bytes.extend_from_slice(&tx.public_key);
                bytes.extend_from_slice(&tx.signature);
            }
            Self::NameDeallocation(tx) => {
                bytes.push(TAG_DEALLOCATION);
                push_prefixed(&mut bytes, tx.name.as_bytes());
                bytes.extend_from_slice(&tx.public_key);
                bytes.extend_from_slice(&tx.signature);
            }
        }
        let mut hasher = Sha256Hasher::new();
        hasher.update(&bytes);
        hasher.finalize()
    }
}

impl From<NameReservation> for Transaction {
    fn from(tx: NameReservation) -> Self {
        Self::NameReservation(tx)
    }
}

impl From<NameAllocation> for Transaction {
    fn from(tx: NameAllocation) -> Self {
        Self::NameAllocation(tx)
    }
}

impl From<NameDeallocation> for Transaction {
    fn from(tx: NameDeallocation) -> Self {
        Self::NameDeallocation(tx)
    }
}
