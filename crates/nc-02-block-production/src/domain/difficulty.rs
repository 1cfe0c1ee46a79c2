//! Compact difficulty targets
//!
//! `bits` packs a 256-bit target as `exponent:8 | mantissa:24`, meaning
//! `mantissa * 256^(exponent - 3)`. Bit 23 of the mantissa is a sign bit;
//! negative and overflowing encodings decode to zero, which no hash can meet
//! in practice.

use primitive_types::U256;
use shared_types::Hash;

/// Sentinel target at which proof-of-work is skipped entirely.
///
/// Mining with it always takes nonce 0 and verification always succeeds.
pub const HIGHEST_TARGET: u32 = 0x207f_ffff;

const MANTISSA_MASK: u32 = 0x007f_ffff;
const SIGN_BIT: u32 = 0x0080_0000;

/// Decode a compact target to its 256-bit value.
pub fn decode_compact(bits: u32) -> U256 {
    let exponent = bits >> 24;
    let mantissa = bits & MANTISSA_MASK;

    if mantissa == 0 || bits & SIGN_BIT != 0 {
        return U256::zero();
    }

    if exponent <= 3 {
        return U256::from(mantissa >> (8 * (3 - exponent)));
    }

    let shift = 8 * (exponent - 3) as usize;
    let mantissa_bits = 32 - mantissa.leading_zeros() as usize;
    if shift + mantissa_bits > 256 {
        return U256::zero();
    }
    U256::from(mantissa) << shift
}

/// Encode a 256-bit target in compact form, truncating to 3 bytes of precision.
pub fn encode_compact(target: U256) -> u32 {
    let mut size = (target.bits() + 7) / 8;
    let mut mantissa = if size <= 3 {
        (target.low_u64() << (8 * (3 - size))) as u32
    } else {
        (target >> (8 * (size - 3))).low_u32()
    };

    if mantissa & SIGN_BIT != 0 {
        mantissa >>= 8;
        size += 1;
    }

    mantissa | ((size as u32) << 24)
}

/// A 256-bit proof-of-work target.
///
/// The target is a ceiling: a hash meets it when, read as a big-endian
/// integer, it is less than or equal to the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Target(U256);

impl Target {
    /// Decode from compact `bits`.
    pub fn from_compact(bits: u32) -> Self {
        Self(decode_compact(bits))
    }

    /// Compact encoding.
    pub fn to_compact(&self) -> u32 {
        encode_compact(self.0)
    }

    /// Raw value.
    pub fn value(&self) -> U256 {
        self.0
    }

    /// Whether `hash` meets this target.
    pub fn is_met_by(&self, hash: &Hash) -> bool {
        U256::from_big_endian(hash) <= self.0
    }
}

/// Whether a compact target admits at least one hash.
pub fn is_satisfiable(bits: u32) -> bool {
    bits == HIGHEST_TARGET || !decode_compact(bits).is_zero()
}

/// Expected leading zero bits of a qualifying hash, for logs.
pub fn describe_difficulty(bits: u32) -> String {
    if bits == HIGHEST_TARGET {
        return "none".to_string();
    }
    let target = decode_compact(bits);
    if target.is_zero() {
        return "unsatisfiable".to_string();
    }
    format!("~{} leading zero bits", target.leading_zeros())
}
