//! Property tests for targets, Merkle roots and block encoding

use nc_02_block_production::{
    decode_compact, encode_compact, merkle_root, Block, HIGHEST_TARGET,
};
use primitive_types::U256;
use proptest::prelude::*;
use shared_types::Hash;

proptest! {
    #[test]
    fn compact_encoding_never_raises_target(bytes in any::<[u8; 32]>()) {
        let target = U256::from_big_endian(&bytes);
        prop_assume!(!target.is_zero());

        let bits = encode_compact(target);
        let decoded = decode_compact(bits);

        prop_assert!(!decoded.is_zero());
        prop_assert!(decoded <= target);
        prop_assert_eq!(encode_compact(decoded), bits);
    }

    #[test]
    fn merkle_root_is_deterministic(leaves in prop::collection::vec(any::<[u8; 32]>(), 0..20)) {
        let leaves: Vec<Hash> = leaves;
        prop_assert_eq!(merkle_root(&leaves), merkle_root(&leaves.clone()));
    }

    #[test]
    fn merkle_root_binds_every_leaf(
        leaves in prop::collection::vec(any::<[u8; 32]>(), 1..20),
        index in any::<prop::sample::Index>(),
    ) {
        let mut altered = leaves.clone();
        let i = index.index(altered.len());
        altered[i][0] ^= 0x01;
        prop_assert_ne!(merkle_root(&leaves), merkle_root(&altered));
    }

    #[test]
    fn block_survives_bincode(prev in any::<[u8; 32]>(), timestamp in 0i64..4_000_000_000) {
        let mut block = Block::template(prev, HIGHEST_TARGET, vec![], timestamp);
        block.header.nonce = 0;

        let bytes = bincode::serialize(&block).unwrap();
        let decoded: Block = bincode::deserialize(&bytes).unwrap();
        prop_assert_eq!(decoded.hash(), block.hash());
        prop_assert!(decoded.validate_structure(&prev).is_ok());
    }
}
