//! # Storage Backends
//!
//! Opens the key-value store selected by [`StorageConfig`]. RocksDB is
//! available with the `rocksdb` feature.

#[cfg(feature = "rocksdb")]
pub mod rocksdb_adapter;

#[cfg(feature = "rocksdb")]
pub use rocksdb_adapter::{RocksDbConfig, RocksDbStore};

use nc_03_ledger_storage::{FileBackedKVStore, InMemoryKVStore, KVStoreError, KeyValueStore};

use crate::container::config::{StorageBackend, StorageConfig};

/// File name of the file backend inside the data directory.
pub const LEDGER_FILE: &str = "ledger.db";

/// Directory name of the RocksDB backend inside the data directory.
pub const ROCKSDB_DIR: &str = "rocksdb";

/// Open the configured backend.
pub fn open_store(config: &StorageConfig) -> Result<Box<dyn KeyValueStore>, KVStoreError> {
    match config.backend {
        StorageBackend::Memory => Ok(Box::new(InMemoryKVStore::new())),
        StorageBackend::File => Ok(Box::new(FileBackedKVStore::open(
            config.data_dir.join(LEDGER_FILE),
        )?)),
        #[cfg(feature = "rocksdb")]
        StorageBackend::RocksDb => Ok(Box::new(RocksDbStore::open(RocksDbConfig {
            path: config.data_dir.join(ROCKSDB_DIR).to_string_lossy().to_string(),
            ..Default::default()
        })?)),
        #[cfg(not(feature = "rocksdb"))]
        StorageBackend::RocksDb => Err(KVStoreError::Backend {
            message: "RocksDB support not compiled in (enable the `rocksdb` feature)".to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_file_backend() {
        let dir = tempfile::tempdir().unwrap();
        let config = StorageConfig {
            data_dir: dir.path().to_path_buf(),
            backend: StorageBackend::File,
        };

        let mut store = open_store(&config).unwrap();
        store.put(b"k", b"v").unwrap();
        assert!(dir.path().join(LEDGER_FILE).exists());
    }

    #[test]
    fn test_open_memory_backend() {
        let config = StorageConfig {
            data_dir: "unused".into(),
            backend: StorageBackend::Memory,
        };
        assert!(open_store(&config).unwrap().get(b"k").unwrap().is_none());
    }
}
