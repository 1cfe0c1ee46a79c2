//! Transaction and block persistence.

use super::*;
use crate::domain::errors::StorageError;
use crate::domain::value_objects::KeyPrefix;
use crate::ports::outbound::{BatchOperation, BlockReader};
use nc_01_name_transactions::Transaction;
use nc_02_block_production::Block;
use shared_types::{short_hex, Hash};

impl<KV, C> LedgerService<KV, C>
where
    KV: KeyValueStore,
    C: EntityCodec,
{
    /// Store `tx` under its hash.
    ///
    /// Storing identical content again is a no-op.
    pub fn put_transaction(&self, tx: &Transaction) -> Result<Hash, LedgerError> {
        let hash = tx.hash();
        let mut kv = self.kv_store.write();
        if let Some(op) = self.transaction_write(&kv, &hash, tx)? {
            kv.atomic_batch_write(vec![op])?;
            tracing::debug!("[nc-03] Stored {} {}", tx.kind().as_str(), short_hex(&hash));
        }
        Ok(hash)
    }

    /// Put for `tx`, or `None` if it is already stored.
    fn transaction_write(
        &self,
        kv: &KV,
        hash: &Hash,
        tx: &Transaction,
    ) -> Result<Option<BatchOperation>, LedgerError> {
        let key = KeyPrefix::transaction_key(hash);
        let encoded = self.codec.encode(tx)?;
        match kv.get(&key)? {
            Some(existing) if existing == encoded => Ok(None),
            Some(_) => Err(StorageError::HashCollision { hash: *hash }.into()),
            None => Ok(Some(BatchOperation::put(key, encoded))),
        }
    }

    /// Transaction with `hash`.
    pub fn get_transaction(&self, hash: &Hash) -> Result<Transaction, LedgerError> {
        let kv = self.kv_store.read();
        self.read_value(&kv, &KeyPrefix::transaction_key(hash))?
            .ok_or_else(|| LedgerError::transaction_not_found(hash))
    }

    /// Store `block` and its transactions; optionally make it the last block.
    ///
    /// Does not check that the block extends the current head. Use
    /// [`LedgerService::accept_block`] for checked advancement.
    pub fn put_block(&self, block: &Block, advance_head: bool) -> Result<Hash, LedgerError> {
        let hash = block.hash();
        let mut kv = self.kv_store.write();

        let mut operations = Vec::with_capacity(block.transactions.len() + 2);
        for tx in &block.transactions {
            if let Some(op) = self.transaction_write(&kv, &tx.hash(), tx)? {
                operations.push(op);
            }
        }
        operations.push(BatchOperation::put(
            KeyPrefix::block_key(&hash),
            self.codec.encode(block)?,
        ));
        if advance_head {
            operations.push(BatchOperation::put(KeyPrefix::LAST_BLOCK, hash.to_vec()));
        }

        kv.atomic_batch_write(operations)?;
        tracing::debug!(
            "[nc-03] Stored block {} ({} transactions, head: {})",
            short_hex(&hash),
            block.transactions.len(),
            advance_head
        );
        Ok(hash)
    }

    /// Block with `hash`.
    pub fn get_block(&self, hash: &Hash) -> Result<Block, LedgerError> {
        let kv = self.kv_store.read();
        self.read_value(&kv, &KeyPrefix::block_key(hash))?
            .ok_or_else(|| LedgerError::block_not_found(hash))
    }

    /// Whether a block with `hash` is stored.
    pub fn has_block(&self, hash: &Hash) -> Result<bool, LedgerError> {
        Ok(self.kv_store.read().exists(&KeyPrefix::block_key(hash))?)
    }

    /// Hash of the last block, if any.
    pub fn last_block_hash(&self) -> Result<Option<Hash>, LedgerError> {
        let kv = self.kv_store.read();
        match kv.get(KeyPrefix::LAST_BLOCK)? {
            None => Ok(None),
            Some(bytes) => {
                let hash: Hash = bytes.as_slice().try_into().map_err(|_| {
                    crate::domain::errors::KVStoreError::Corruption {
                        message: format!("last block pointer has {} bytes", bytes.len()),
                    }
                })?;
                Ok(Some(hash))
            }
        }
    }

    /// The last block, if any.
    pub fn get_last_block(&self) -> Result<Option<Block>, LedgerError> {
        match self.last_block_hash()? {
            Some(hash) => self.get_block(&hash).map(Some),
            None => Ok(None),
        }
    }
}

impl<KV, C> BlockReader for LedgerService<KV, C>
where
    KV: KeyValueStore,
    C: EntityCodec,
{
    fn read_block(&self, hash: &Hash) -> Result<Block, LedgerError> {
        self.get_block(hash)
    }
}
