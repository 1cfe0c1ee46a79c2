//! Key service: import, list and select signing keys.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use shared_crypto::Ed25519KeyPair;
use tracing::info;

use super::RpcError;
use crate::container::SharedLedger;

/// `import_private_key` parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportPrivateKeyRequest {
    /// Alias to store the key under.
    pub alias: String,
    /// Hex-encoded key material.
    pub key: String,
    /// Whether the key becomes the main key.
    #[serde(default)]
    pub main: bool,
}

/// `set_main_key` parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetMainKeyRequest {
    /// Alias of the key to select.
    pub alias: String,
}

/// Reply carrying only a success flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuccessReply {
    /// Whether the operation took effect.
    pub success: bool,
}

/// `list_private_keys` reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListPrivateKeysReply {
    /// Stored aliases, sorted.
    pub aliases: Vec<String>,
}

/// `get_main_key` reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetMainKeyReply {
    /// Alias of the main key, if the keyring is not empty.
    pub alias: Option<String>,
}

/// Keyring operations.
pub struct KeyService {
    ledger: Arc<SharedLedger>,
}

impl KeyService {
    /// Create the service.
    pub fn new(ledger: Arc<SharedLedger>) -> Self {
        Self { ledger }
    }

    /// Store a key. The key material must be a valid signing key.
    pub fn import_private_key(
        &self,
        request: ImportPrivateKeyRequest,
    ) -> Result<SuccessReply, RpcError> {
        let material = hex::decode(request.key.trim())
            .map_err(|e| RpcError::invalid_params(format!("key is not hex: {e}")))?;
        Ed25519KeyPair::from_key_material(&material)?;

        self.ledger.put_key(&request.alias, &material, request.main)?;
        info!("[rpc] Imported key '{}'", request.alias);
        Ok(SuccessReply { success: true })
    }

    /// Aliases of every stored key.
    pub fn list_private_keys(&self) -> Result<ListPrivateKeysReply, RpcError> {
        Ok(ListPrivateKeysReply {
            aliases: self.ledger.list_keys()?,
        })
    }

    /// Make `alias` the main key; `success` is false for an unknown alias.
    pub fn set_main_key(&self, request: SetMainKeyRequest) -> Result<SuccessReply, RpcError> {
        match self.ledger.set_main_key(&request.alias) {
            Ok(()) => Ok(SuccessReply { success: true }),
            Err(e) if e.is_not_found() => Ok(SuccessReply { success: false }),
            Err(e) => Err(e.into()),
        }
    }

    /// Alias of the main key.
    pub fn get_main_key(&self) -> Result<GetMainKeyReply, RpcError> {
        Ok(GetMainKeyReply {
            alias: self.ledger.get_main_key_alias()?,
        })
    }
}

/// Load the signing key stored under `alias`.
pub(super) fn load_key_pair(
    ledger: &SharedLedger,
    alias: &str,
) -> Result<Ed25519KeyPair, RpcError> {
    let material = ledger
        .get_key(alias)?
        .ok_or_else(|| RpcError::unknown_alias(alias))?;
    Ok(Ed25519KeyPair::from_key_material(&material)?)
}
