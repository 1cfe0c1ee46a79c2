//! Serializer adapters.

mod bincode;

pub use self::bincode::BincodeCodec;
