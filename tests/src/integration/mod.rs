//! Cross-crate scenarios.

pub mod name_lifecycle;
pub mod node_flow;

use nc_01_name_transactions::Transaction;
use nc_02_block_production::{Block, HIGHEST_TARGET};
use nc_03_ledger_storage::{InMemoryKVStore, LedgerError, LedgerService};
use shared_types::{Hash, EMPTY_HASH};

/// Ledger over an in-memory store.
pub type TestLedger = LedgerService<InMemoryKVStore>;

/// Mine `transactions` on top of the ledger head at the highest target and
/// accept the block.
pub fn mine_and_accept(
    ledger: &TestLedger,
    transactions: Vec<Transaction>,
) -> Result<Hash, LedgerError> {
    let head = ledger.last_block_hash()?.unwrap_or(EMPTY_HASH);
    let block =
        Block::new(head, HIGHEST_TARGET, transactions).expect("highest target mines at nonce 0");
    ledger.accept_block(&block)
}
