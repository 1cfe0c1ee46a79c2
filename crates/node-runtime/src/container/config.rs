//! # Node Configuration
//!
//! Defaults for every setting, overridable from the environment.
//!
//! | Variable | Setting |
//! |----------|---------|
//! | `NC_DATA_DIR` | `storage.data_dir` |
//! | `NC_STORAGE_BACKEND` | `storage.backend` (`memory`, `file`, `rocksdb`) |
//! | `NC_TARGET_BITS` | `mining.target_bits` (hex, `0x` optional) |
//! | `NC_MINING_ENABLED` | `mining.enabled` |
//! | `NC_BLOCK_INTERVAL_MS` | `mining.block_interval_ms` |
//! | `NC_MAX_BLOCK_TRANSACTIONS` | `mining.max_block_transactions` |
//! | `RUST_LOG` | `logging.filter` |

use std::path::PathBuf;
use std::str::FromStr;

use nc_02_block_production::{MiningConfig, CANCEL_CHECK_INTERVAL, DEFAULT_TARGET_BITS};
use thiserror::Error;

/// Complete node configuration.
#[derive(Debug, Clone, Default)]
pub struct NodeConfig {
    /// Storage configuration.
    pub storage: StorageConfig,
    /// Block production configuration.
    pub mining: MiningSettings,
    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// An environment variable could not be parsed.
    #[error("Invalid value '{value}' for {variable}")]
    InvalidValue {
        /// Variable name
        variable: &'static str,
        /// Offending value
        value: String,
    },

    /// Backend was requested but not compiled in.
    #[error("Storage backend '{0}' is not available in this build")]
    BackendUnavailable(&'static str),

    /// Mining target can never be met.
    #[error("Target bits {0:#010x} decode to an unsatisfiable target")]
    UnsatisfiableTarget(u32),

    /// A limit that must be positive is zero.
    #[error("{0} must be greater than zero")]
    ZeroLimit(&'static str),
}

impl NodeConfig {
    /// Defaults overridden by `NC_*` and `RUST_LOG` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Defaults overridden through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(dir) = lookup("NC_DATA_DIR") {
            config.storage.data_dir = PathBuf::from(dir);
        }
        if let Some(backend) = lookup("NC_STORAGE_BACKEND") {
            config.storage.backend = parse("NC_STORAGE_BACKEND", &backend)?;
        }
        if let Some(bits) = lookup("NC_TARGET_BITS") {
            let digits = bits.trim().trim_start_matches("0x").trim_start_matches("0X");
            config.mining.target_bits =
                u32::from_str_radix(digits, 16).map_err(|_| ConfigError::InvalidValue {
                    variable: "NC_TARGET_BITS",
                    value: bits.clone(),
                })?;
        }
        if let Some(enabled) = lookup("NC_MINING_ENABLED") {
            config.mining.enabled = parse_flag("NC_MINING_ENABLED", &enabled)?;
        }
        if let Some(interval) = lookup("NC_BLOCK_INTERVAL_MS") {
            config.mining.block_interval_ms = parse("NC_BLOCK_INTERVAL_MS", &interval)?;
        }
        if let Some(max) = lookup("NC_MAX_BLOCK_TRANSACTIONS") {
            config.mining.max_block_transactions = parse("NC_MAX_BLOCK_TRANSACTIONS", &max)?;
        }
        if let Some(filter) = lookup("RUST_LOG") {
            config.logging.filter = filter;
        }

        Ok(config)
    }

    /// Check the configuration before starting the node.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !nc_02_block_production::domain::difficulty::is_satisfiable(self.mining.target_bits) {
            return Err(ConfigError::UnsatisfiableTarget(self.mining.target_bits));
        }
        if self.mining.max_block_transactions == 0 {
            return Err(ConfigError::ZeroLimit("max_block_transactions"));
        }
        if self.mining.block_interval_ms == 0 {
            return Err(ConfigError::ZeroLimit("block_interval_ms"));
        }
        if self.storage.backend == StorageBackend::RocksDb && !cfg!(feature = "rocksdb") {
            return Err(ConfigError::BackendUnavailable("rocksdb"));
        }
        Ok(())
    }
}

fn parse<T: FromStr>(variable: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        variable,
        value: value.to_string(),
    })
}

fn parse_flag(variable: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            variable,
            value: value.to_string(),
        }),
    }
}

/// Key-value backend for the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    /// Nothing persisted.
    Memory,
    /// Single file under the data directory.
    File,
    /// RocksDB under the data directory (feature `rocksdb`).
    RocksDb,
}

impl FromStr for StorageBackend {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "memory" => Ok(Self::Memory),
            "file" => Ok(Self::File),
            "rocksdb" => Ok(Self::RocksDb),
            _ => Err(()),
        }
    }
}

/// Storage configuration.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Data directory.
    pub data_dir: PathBuf,
    /// Backend.
    pub backend: StorageBackend,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./data"),
            backend: StorageBackend::File,
        }
    }
}

/// Block production configuration.
#[derive(Debug, Clone)]
pub struct MiningSettings {
    /// Run the block producer.
    pub enabled: bool,
    /// Compact difficulty target.
    pub target_bits: u32,
    /// Pause between production rounds in milliseconds.
    pub block_interval_ms: u64,
    /// Maximum transactions per block.
    pub max_block_transactions: usize,
    /// Nonces between cancel checks.
    pub cancel_check_interval: u32,
}

impl Default for MiningSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            target_bits: DEFAULT_TARGET_BITS,
            block_interval_ms: 1_000,
            max_block_transactions: 500,
            cancel_check_interval: CANCEL_CHECK_INTERVAL,
        }
    }
}

impl MiningSettings {
    /// Settings for the mining service.
    pub fn mining_config(&self) -> MiningConfig {
        MiningConfig {
            cancel_check_interval: self.cancel_check_interval,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// `EnvFilter` directive.
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
        }
    }
}
