//! # Name-Chain Benchmarks
//!
//! | Area | Operation |
//! |------|-----------|
//! | nc-02 Block Production | Merkle root, header hashing, mining at a low target |
//! | nc-03 Ledger Storage | Block acceptance, naming state replay |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use nc_01_name_transactions::Transaction;
use nc_02_block_production::utils::hashing::block_hash;
use nc_02_block_production::{merkle_root, Block, PoWMiner, HIGHEST_TARGET};
use nc_03_ledger_storage::LedgerService;
use rand::Rng;
use shared_crypto::Ed25519KeyPair;
use shared_types::{Hash, EMPTY_HASH};
use std::sync::atomic::AtomicBool;
use std::time::Duration;

fn random_hashes(count: usize) -> Vec<Hash> {
    let mut rng = rand::thread_rng();
    (0..count).map(|_| rng.gen()).collect()
}

// ============================================================================
// NC-02: Block Production
// ============================================================================

fn bench_merkle_root(c: &mut Criterion) {
    let mut group = c.benchmark_group("nc-02-merkle-root");

    for size in [1, 16, 255, 1024] {
        let leaves = random_hashes(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &leaves, |b, leaves| {
            b.iter(|| black_box(merkle_root(leaves)))
        });
    }
    group.finish();
}

fn bench_header_hash(c: &mut Criterion) {
    let block = Block::template(EMPTY_HASH, HIGHEST_TARGET, Vec::new(), 0);
    c.bench_function("nc-02-header-hash", |b| {
        b.iter(|| black_box(block_hash(&block.header)))
    });
}

fn bench_mining(c: &mut Criterion) {
    let mut group = c.benchmark_group("nc-02-mining");
    group.measurement_time(Duration::from_secs(10));
    let miner = PoWMiner::default();
    let cancel = AtomicBool::new(false);

    // Roughly one in 256 hashes meets 0x2000ffff.
    let block = Block::template(EMPTY_HASH, 0x2000_ffff, Vec::new(), 0);
    group.bench_function("target_0x2000ffff", |b| {
        b.iter(|| black_box(miner.mine(block.header, &cancel).ok()))
    });
    group.finish();
}

// ============================================================================
// NC-03: Ledger Storage
// ============================================================================

fn lifecycle_blocks(names: usize) -> Vec<Vec<Transaction>> {
    let owner = Ed25519KeyPair::from_seed([7; 32]);
    (0..names)
        .map(|i| {
            let name = format!("repo-{i}");
            let (reservation, nonce) = Transaction::name_reservation(&name, &owner);
            vec![reservation, Transaction::name_allocation(&name, nonce, &owner)]
        })
        .collect()
}

fn build_chain(
    blocks: &[Vec<Transaction>],
) -> LedgerService<nc_03_ledger_storage::InMemoryKVStore> {
    let ledger = LedgerService::in_memory();
    for txs in blocks {
        let head = ledger
            .last_block_hash()
            .ok()
            .flatten()
            .unwrap_or(EMPTY_HASH);
        if let Ok(block) = Block::new(head, HIGHEST_TARGET, txs.clone()) {
            let _ = ledger.accept_block(&block);
        }
    }
    ledger
}

fn bench_accept_block(c: &mut Criterion) {
    let mut group = c.benchmark_group("nc-03-accept-block");
    for length in [10, 100] {
        let blocks = lifecycle_blocks(length);
        group.bench_with_input(BenchmarkId::new("chain", length), &blocks, |b, blocks| {
            b.iter(|| black_box(build_chain(blocks)))
        });
    }
    group.finish();
}

fn bench_state_replay(c: &mut Criterion) {
    let mut group = c.benchmark_group("nc-03-state-replay");
    for length in [10, 100, 500] {
        let ledger = build_chain(&lifecycle_blocks(length));
        let head = ledger
            .last_block_hash()
            .ok()
            .flatten()
            .unwrap_or(EMPTY_HASH);
        group.bench_with_input(BenchmarkId::from_parameter(length), &head, |b, head| {
            b.iter(|| black_box(ledger.naming_state_at(head).ok()))
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_merkle_root,
    bench_header_hash,
    bench_mining,
    bench_accept_block,
    bench_state_replay
);
criterion_main!(benches);
