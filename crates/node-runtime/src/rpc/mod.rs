//! # RPC Operations
//!
//! Transport-free request handlers for the Key, Name and Block services.
//! Requests and replies are serde structs so any JSON-RPC transport can carry
//! them; hashes and key material cross this boundary as lowercase hex.
//!
//! Every failure is an [`RpcError`] with a JSON-RPC error code. [`RpcRouter`]
//! dispatches by method name and wraps results in an [`RpcResponse`].

mod block;
mod key;
mod name;
mod router;

pub use block::{BlockService, GetBlockReply, GetBlockRequest, GetLastBlockReply};
pub use key::{
    GetMainKeyReply, ImportPrivateKeyRequest, KeyService, ListPrivateKeysReply, SetMainKeyRequest,
    SuccessReply,
};
pub use name::{
    NameAllocationRequest, NameDeallocationRequest, NameReservationReply, NameReservationRequest,
    NameService, TransactionIdReply,
};
pub use router::{RpcRouter, METHODS};

use std::fmt;

use nc_03_ledger_storage::LedgerError;
use serde::{Deserialize, Serialize};
use shared_crypto::CryptoError;
use shared_types::HashParseError;

/// JSON-RPC error codes.
pub mod codes {
    /// Unknown method.
    pub const METHOD_NOT_FOUND: i32 = -32601;
    /// Invalid method parameters.
    pub const INVALID_PARAMS: i32 = -32602;
    /// Internal error.
    pub const INTERNAL_ERROR: i32 = -32603;
    /// Generic server error.
    pub const SERVER_ERROR: i32 = -32000;
    /// Requested block, transaction or key does not exist.
    pub const RESOURCE_NOT_FOUND: i32 = -32001;
    /// Transaction or block rejected by consensus rules.
    pub const TRANSACTION_REJECTED: i32 = -32003;
}

/// RPC failure reported to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RpcError {
    /// JSON-RPC error code.
    pub code: i32,
    /// Error message.
    pub message: String,
}

impl RpcError {
    /// Create an error.
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Invalid parameters.
    pub fn invalid_params(details: impl Into<String>) -> Self {
        Self::new(
            codes::INVALID_PARAMS,
            format!("Invalid params: {}", details.into()),
        )
    }

    /// Unknown key alias.
    pub fn unknown_alias(alias: &str) -> Self {
        Self::new(codes::RESOURCE_NOT_FOUND, format!("key not found: {alias}"))
    }
}

impl fmt::Display for RpcError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for RpcError {}

impl From<LedgerError> for RpcError {
    fn from(err: LedgerError) -> Self {
        let code = match &err {
            LedgerError::NotFound { .. } => codes::RESOURCE_NOT_FOUND,
            LedgerError::InvalidAlias => codes::INVALID_PARAMS,
            e if e.is_rejection() => codes::TRANSACTION_REJECTED,
            _ => codes::SERVER_ERROR,
        };
        Self::new(code, err.to_string())
    }
}

impl From<CryptoError> for RpcError {
    fn from(err: CryptoError) -> Self {
        Self::invalid_params(err.to_string())
    }
}

impl From<HashParseError> for RpcError {
    fn from(err: HashParseError) -> Self {
        Self::invalid_params(err.to_string())
    }
}

/// Reply envelope: `success` plus either `result` or `error`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcResponse<T> {
    /// Whether the call succeeded.
    pub success: bool,
    /// Reply payload on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<T>,
    /// Failure on error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<RpcError>,
}

impl<T> From<Result<T, RpcError>> for RpcResponse<T> {
    fn from(result: Result<T, RpcError>) -> Self {
        match result {
            Ok(value) => Self {
                success: true,
                result: Some(value),
                error: None,
            },
            Err(error) => Self {
                success: false,
                result: None,
                error: Some(error),
            },
        }
    }
}
