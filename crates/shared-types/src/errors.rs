//! # Error Types
//!
//! Errors raised while parsing boundary representations of shared types.

use thiserror::Error;

/// Failure to parse a hex-encoded hash supplied by a client.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HashParseError {
    /// Input is not valid hexadecimal.
    #[error("Invalid hex: {0}")]
    InvalidHex(String),

    /// Input decoded to the wrong number of bytes.
    #[error("Invalid hash length: expected {expected} bytes, got {actual}")]
    InvalidLength {
        /// Expected length in bytes
        expected: usize,
        /// Decoded length in bytes
        actual: usize,
    },
}
