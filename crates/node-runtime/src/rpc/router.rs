//! Method routing for JSON transports.
//!
//! Maps `Service.Method` names to the typed services, decoding `params` into
//! the request struct and encoding the reply into an [`RpcResponse`].

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use super::{codes, BlockService, KeyService, NameService, RpcError, RpcResponse};

/// Every method the router serves.
pub const METHODS: &[&str] = &[
    "KeyService.ImportPrivateKey",
    "KeyService.ListPrivateKeys",
    "KeyService.SetMainKey",
    "KeyService.GetMainKey",
    "NameService.NameReservation",
    "NameService.NameAllocation",
    "NameService.NameDeallocation",
    "BlockService.GetLastBlock",
    "BlockService.GetBlock",
];

/// Dispatches JSON requests to the Key, Name and Block services.
pub struct RpcRouter {
    keys: KeyService,
    names: NameService,
    blocks: BlockService,
}

impl RpcRouter {
    /// Create a router over the given services.
    pub fn new(keys: KeyService, names: NameService, blocks: BlockService) -> Self {
        Self {
            keys,
            names,
            blocks,
        }
    }

    /// Handle one call; failures are reported inside the envelope.
    pub async fn handle(&self, method: &str, params: Value) -> RpcResponse<Value> {
        let result = self.route(method, params).await;
        if let Err(err) = &result {
            tracing::debug!("[rpc] {} failed: {}", method, err);
        }
        result.into()
    }

    async fn route(&self, method: &str, params: Value) -> Result<Value, RpcError> {
        match method {
            "KeyService.ImportPrivateKey" => {
                encode(self.keys.import_private_key(decode(params)?)?)
            }
            "KeyService.ListPrivateKeys" => encode(self.keys.list_private_keys()?),
            "KeyService.SetMainKey" => encode(self.keys.set_main_key(decode(params)?)?),
            "KeyService.GetMainKey" => encode(self.keys.get_main_key()?),
            "NameService.NameReservation" => {
                encode(self.names.name_reservation(decode(params)?).await?)
            }
            "NameService.NameAllocation" => {
                encode(self.names.name_allocation(decode(params)?).await?)
            }
            "NameService.NameDeallocation" => {
                encode(self.names.name_deallocation(decode(params)?).await?)
            }
            "BlockService.GetLastBlock" => encode(self.blocks.get_last_block()?),
            "BlockService.GetBlock" => encode(self.blocks.get_block(decode(params)?)?),
            _ => Err(RpcError::new(
                codes::METHOD_NOT_FOUND,
                format!("Method not found: {method}"),
            )),
        }
    }
}

fn decode<T: DeserializeOwned>(params: Value) -> Result<T, RpcError> {
    serde_json::from_value(params).map_err(|e| RpcError::invalid_params(e.to_string()))
}

fn encode<T: Serialize>(reply: T) -> Result<Value, RpcError> {
    serde_json::to_value(reply).map_err(|e| RpcError::new(codes::INTERNAL_ERROR, e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::{NodeConfig, NodeContainer};
    use nc_03_ledger_storage::InMemoryKVStore;
    use serde_json::json;

    fn router() -> (NodeContainer, RpcRouter) {
        let node =
            NodeContainer::with_store(NodeConfig::default(), Box::new(InMemoryKVStore::new()));
        let router = node.rpc_router();
        (node, router)
    }

    #[tokio::test]
    async fn test_keyring_methods() {
        let (_, router) = router();
        let reply = router
            .handle(
                "KeyService.ImportPrivateKey",
                json!({"alias": "me", "key": hex::encode([1u8; 32])}),
            )
            .await;
        assert!(reply.success);
        assert_eq!(reply.result, Some(json!({"success": true})));

        let reply = router.handle("KeyService.GetMainKey", Value::Null).await;
        assert_eq!(reply.result, Some(json!({"alias": "me"})));

        let reply = router
            .handle("KeyService.SetMainKey", json!({"alias": "missing"}))
            .await;
        assert_eq!(reply.result, Some(json!({"success": false})));
    }

    #[tokio::test]
    async fn test_reservation_reply_shape() {
        let (node, router) = router();
        node.ledger.put_key("me", &[1; 32], true).unwrap();

        let reply = router
            .handle(
                "NameService.NameReservation",
                json!({"alias": "me", "name": "repo"}),
            )
            .await;
        let result = reply.result.unwrap();
        assert_eq!(result["id"].as_str().unwrap().len(), 64);
        assert_eq!(result["random"].as_str().unwrap().len(), 64);
        assert_eq!(node.pool.len(), 1);
    }

    #[tokio::test]
    async fn test_errors_in_envelope() {
        let (_, router) = router();

        let reply = router.handle("KeyService.Shutdown", Value::Null).await;
        assert!(!reply.success);
        assert_eq!(reply.error.unwrap().code, codes::METHOD_NOT_FOUND);

        let reply = router
            .handle("BlockService.GetBlock", json!({"hash": 7}))
            .await;
        assert!(!reply.success);
        assert_eq!(reply.error.unwrap().code, codes::INVALID_PARAMS);

        let reply = router.handle("BlockService.GetLastBlock", Value::Null).await;
        assert_eq!(reply.result, Some(json!({"hash": null})));
    }

    #[tokio::test]
    async fn test_every_listed_method_is_routed() {
        let (_, router) = router();
        for method in METHODS {
            let reply = router.handle(method, Value::Null).await;
            if let Some(error) = reply.error {
                assert_ne!(error.code, codes::METHOD_NOT_FOUND, "{method}");
            }
        }
    }
}
