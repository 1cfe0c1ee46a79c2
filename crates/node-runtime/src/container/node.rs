use std::sync::Arc;

use nc_02_block_production::MiningService;
use nc_03_ledger_storage::{KeyValueStore, LedgerService};
use tracing::info;

use super::config::NodeConfig;
use crate::adapters::broadcast::InMemoryBroadcaster;
use crate::adapters::ports::TransactionBroadcaster;
use crate::adapters::storage::open_store;
use crate::pool::TransactionPool;
use crate::producer::BlockProducer;
use crate::rpc::{BlockService, KeyService, NameService, RpcRouter};

/// The ledger type used by the node; the backend is chosen at startup.
pub type SharedLedger = LedgerService<Box<dyn KeyValueStore>>;

/// Long-lived node components.
pub struct NodeContainer {
    /// Node configuration.
    pub config: NodeConfig,
    /// The ledger store.
    pub ledger: Arc<SharedLedger>,
    /// Pending transactions.
    pub pool: Arc<TransactionPool>,
    /// Outbound transaction broadcast.
    pub broadcaster: Arc<InMemoryBroadcaster>,
    /// Mining worker pool.
    pub mining: Arc<MiningService>,
}

impl NodeContainer {
    /// Open storage and build every component.
    pub fn new(config: NodeConfig) -> Result<Self, nc_03_ledger_storage::KVStoreError> {
        info!(
            "[node] Opening {:?} storage at {}",
            config.storage.backend,
            config.storage.data_dir.display()
        );
        let store = open_store(&config.storage)?;
        Ok(Self::with_store(config, store))
    }

    /// Build every component over an already opened store.
    pub fn with_store(config: NodeConfig, store: Box<dyn KeyValueStore>) -> Self {
        let mining = Arc::new(MiningService::new(&config.mining.mining_config()));
        Self {
            ledger: Arc::new(LedgerService::new(store)),
            pool: Arc::new(TransactionPool::new()),
            broadcaster: Arc::new(InMemoryBroadcaster::new()),
            mining,
            config,
        }
    }

    fn broadcaster_port(&self) -> Arc<dyn TransactionBroadcaster> {
        self.broadcaster.clone()
    }

    /// Key management operations.
    pub fn key_service(&self) -> KeyService {
        KeyService::new(self.ledger.clone())
    }

    /// Name lifecycle operations.
    pub fn name_service(&self) -> NameService {
        NameService::new(self.ledger.clone(), self.pool.clone(), self.broadcaster_port())
    }

    /// Block queries.
    pub fn block_service(&self) -> BlockService {
        BlockService::new(self.ledger.clone())
    }

    /// Method router over the key, name and block services.
    pub fn rpc_router(&self) -> RpcRouter {
        RpcRouter::new(self.key_service(), self.name_service(), self.block_service())
    }

    /// The block producer for this node.
    pub fn block_producer(&self) -> BlockProducer {
        BlockProducer::new(
            self.ledger.clone(),
            self.pool.clone(),
            self.mining.clone(),
            self.config.mining.clone(),
        )
    }
}
