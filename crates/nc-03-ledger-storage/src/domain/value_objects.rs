//! Key layout of the ledger in the key-value store.

use shared_types::Hash;

/// Key prefixes for the different record types.
pub struct KeyPrefix;

impl KeyPrefix {
    /// Transactions by hash.
    pub const TRANSACTION: &'static [u8] = b"tx:";
    /// Blocks by hash.
    pub const BLOCK: &'static [u8] = b"block:";
    /// Keyring entries by alias.
    pub const KEY: &'static [u8] = b"key:";
    /// Hash of the last block.
    pub const LAST_BLOCK: &'static [u8] = b"meta:last_block";
    /// Current main-key selection.
    pub const MAIN_KEY: &'static [u8] = b"meta:main_key";

    /// Key for a transaction.
    pub fn transaction_key(hash: &Hash) -> Vec<u8> {
        [Self::TRANSACTION, hash.as_slice()].concat()
    }

    /// Key for a block.
    pub fn block_key(hash: &Hash) -> Vec<u8> {
        [Self::BLOCK, hash.as_slice()].concat()
    }

    /// Key for a keyring entry.
    pub fn key_entry_key(alias: &str) -> Vec<u8> {
        [Self::KEY, alias.as_bytes()].concat()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_do_not_overlap() {
        let hash = [7u8; 32];
        assert!(KeyPrefix::transaction_key(&hash).starts_with(b"tx:"));
        assert!(KeyPrefix::block_key(&hash).starts_with(b"block:"));
        assert_ne!(KeyPrefix::transaction_key(&hash), KeyPrefix::block_key(&hash));
        assert_eq!(KeyPrefix::key_entry_key("main"), b"key:main".to_vec());
    }
}
