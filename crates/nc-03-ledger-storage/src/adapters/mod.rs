//! # Adapters
//!
//! - `storage`: [`KeyValueStore`](crate::KeyValueStore) implementations
//! - `serializer`: [`EntityCodec`](crate::EntityCodec) implementations

pub mod serializer;
pub mod storage;
