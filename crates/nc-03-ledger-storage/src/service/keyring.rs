//! Keyring operations.

use super::*;
use crate::domain::keyring::{KeyEntry, MainKeySelection};
use crate::domain::value_objects::KeyPrefix;
use crate::ports::outbound::BatchOperation;

impl<KV, C> LedgerService<KV, C>
where
    KV: KeyValueStore,
    C: EntityCodec,
{
    /// Insert or replace the key stored under `alias`.
    ///
    /// Updates the main-key selection in the same atomic batch.
    pub fn put_key(
        &self,
        alias: &str,
        key_material: &[u8],
        is_main: bool,
    ) -> Result<(), LedgerError> {
        if alias.is_empty() {
            return Err(LedgerError::InvalidAlias);
        }

        let mut kv = self.kv_store.write();
        let entry = KeyEntry {
            alias: alias.to_string(),
            key_material: key_material.to_vec(),
            is_main,
        };
        self.write_key_entry(&mut kv, &entry)?;

        tracing::debug!("[nc-03] Stored key '{}' (main: {})", alias, is_main);
        Ok(())
    }

    /// Make an existing alias the explicit main key.
    pub fn set_main_key(&self, alias: &str) -> Result<(), LedgerError> {
        let mut kv = self.kv_store.write();
        let mut entry: KeyEntry = self
            .read_value(&kv, &KeyPrefix::key_entry_key(alias))?
            .ok_or_else(|| LedgerError::key_not_found(alias))?;

        entry.is_main = true;
        self.write_key_entry(&mut kv, &entry)?;

        tracing::info!("[nc-03] Main key is now '{}'", alias);
        Ok(())
    }

    fn write_key_entry(&self, kv: &mut KV, entry: &KeyEntry) -> Result<(), LedgerError> {
        let current: MainKeySelection = self
            .read_value(kv, KeyPrefix::MAIN_KEY)?
            .unwrap_or_default();
        let next = current.after_put(&entry.alias, entry.is_main);

        kv.atomic_batch_write(vec![
            BatchOperation::put(
                KeyPrefix::key_entry_key(&entry.alias),
                self.codec.encode(entry)?,
            ),
            BatchOperation::put(KeyPrefix::MAIN_KEY, self.codec.encode(&next)?),
        ])?;
        Ok(())
    }

    /// Key material of the main key; `None` iff the keyring is empty.
    pub fn get_main_key(&self) -> Result<Option<Vec<u8>>, LedgerError> {
        let kv = self.kv_store.read();
        let Some(alias) = self.main_alias_locked(&kv)? else {
            return Ok(None);
        };
        let entry: Option<KeyEntry> = self.read_value(&kv, &KeyPrefix::key_entry_key(&alias))?;
        Ok(entry.map(|e| e.key_material))
    }

    /// Alias of the main key.
    pub fn get_main_key_alias(&self) -> Result<Option<String>, LedgerError> {
        let kv = self.kv_store.read();
        self.main_alias_locked(&kv)
    }

    fn main_alias_locked(&self, kv: &KV) -> Result<Option<String>, LedgerError> {
        let selection: Option<MainKeySelection> = self.read_value(kv, KeyPrefix::MAIN_KEY)?;
        Ok(selection.and_then(|s| s.alias))
    }

    /// Key material stored under `alias`.
    pub fn get_key(&self, alias: &str) -> Result<Option<Vec<u8>>, LedgerError> {
        let kv = self.kv_store.read();
        let entry: Option<KeyEntry> = self.read_value(&kv, &KeyPrefix::key_entry_key(alias))?;
        Ok(entry.map(|e| e.key_material))
    }

    /// All aliases, sorted byte-wise.
    pub fn list_keys(&self) -> Result<Vec<String>, LedgerError> {
        let kv = self.kv_store.read();
        let mut aliases = kv
            .prefix_scan(KeyPrefix::KEY)?
            .into_iter()
            .map(|(_, value)| {
                self.codec
                    .decode::<KeyEntry>(&value)
                    .map(|entry| entry.alias)
            })
            .collect::<Result<Vec<_>, _>>()?;
        aliases.sort();
        Ok(aliases)
    }
}
