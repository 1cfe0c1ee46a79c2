//! # Name-Chain Node
//!
//! Entry point for the `name-chain-node` binary.
//!
//! ## Startup Sequence
//!
//! 1. Load configuration from the environment and validate it
//! 2. Install the tracing subscriber
//! 3. Open storage and build the node container
//! 4. Start the block producer (unless mining is disabled)
//! 5. Run until Ctrl+C, then stop the producer

use anyhow::{Context, Result};
use shared_types::short_hex;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{error, info};

use node_runtime::logging::init_tracing;
use node_runtime::{NodeConfig, NodeContainer};

/// The running node.
struct NodeRuntime {
    container: NodeContainer,
    shutdown_tx: watch::Sender<bool>,
    producer: Option<JoinHandle<()>>,
}

impl NodeRuntime {
    fn new(config: NodeConfig) -> Result<Self> {
        let container = NodeContainer::new(config).context("failed to open ledger storage")?;
        let (shutdown_tx, _) = watch::channel(false);
        Ok(Self {
            container,
            shutdown_tx,
            producer: None,
        })
    }

    fn start(&mut self) -> Result<()> {
        info!("===========================================");
        info!("  Name-Chain Node v{}", env!("CARGO_PKG_VERSION"));
        info!("===========================================");

        let config = &self.container.config;
        info!("Data Dir: {}", config.storage.data_dir.display());
        info!("Storage: {:?}", config.storage.backend);

        match self.container.ledger.last_block_hash()? {
            Some(head) => info!("Chain head: {}", short_hex(&head)),
            None => info!("Chain is empty"),
        }
        info!(
            "Keyring: {} keys, main key {:?}",
            self.container.ledger.list_keys()?.len(),
            self.container.ledger.get_main_key_alias()?
        );

        if config.mining.enabled {
            let producer = self.container.block_producer();
            self.producer = Some(tokio::spawn(producer.run(self.shutdown_tx.subscribe())));
        } else {
            info!("Mining disabled");
        }
        Ok(())
    }

    async fn shutdown(&mut self) {
        info!("Initiating graceful shutdown...");

        if let Err(e) = self.shutdown_tx.send(true) {
            // No receivers: the producer was never started or already exited.
            info!("Shutdown signal had no listeners: {}", e);
        }
        if let Some(handle) = self.producer.take() {
            if let Err(e) = handle.await {
                error!("Block producer task failed: {}", e);
            }
        }

        info!(
            "Shutdown complete ({} blocks mined, {} pending transactions)",
            self.container.mining.metrics().get_blocks_mined(),
            self.container.pool.len()
        );
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = NodeConfig::from_env()?;
    init_tracing(&config.logging)?;
    config.validate()?;

    let mut runtime = NodeRuntime::new(config)?;
    runtime.start()?;

    info!("Node is running. Press Ctrl+C to stop.");
    tokio::signal::ctrl_c().await?;

    runtime.shutdown().await;
    Ok(())
}
