//! Codec Module
//!
//! Converts typed values to the bytes stored by a backend and back.

use serde::{de::DeserializeOwned, Serialize};

use crate::error::Result;

// == Codec Trait ==
/// Encode/decode pair captured by a [`crate::cache::Cache`] at construction.
pub trait Codec: Send + Sync + 'static {
    /// Encodes a value into bytes.
    fn encode<T: Serialize + ?Sized>(&self, value: &T) -> Result<Vec<u8>>;

    /// Decodes bytes produced by [`Codec::encode`].
    fn decode<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T>;
}

// == MessagePack ==
/// MessagePack codec. Structs are written as maps keyed by field name so
/// other services reading the same keys need not share field order.
#[derive(Debug, Clone, Copy, Default)]
pub struct MsgPackCodec;

impl Codec for MsgPackCodec {
    fn encode<T: Serialize + ?Sized>(&self, value: &T) -> Result<Vec<u8>> {
        Ok(rmp_serde::to_vec_named(value)?)
    }

    fn decode<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T> {
        Ok(rmp_serde::from_slice(bytes)?)
    }
}
