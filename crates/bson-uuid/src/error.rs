//! UUID codec error type.

use bson_codec::{BsonError, ElementType};
use thiserror::Error;

/// Errors specific to decoding a [`uuid::Uuid`] from BSON.
#[derive(Debug, Error)]
pub enum UuidCodecError {
    /// A binary value carried a subtype that does not hold a UUID.
    #[error("cannot decode binary type {0} into a uuid")]
    UnsupportedSubtype(u8),
    /// The value was neither a string, a binary, null nor undefined.
    #[error("cannot decode {0} into a uuid")]
    UnsupportedWireType(ElementType),
    #[error(transparent)]
    Parse(#[from] uuid::Error),
}

impl From<UuidCodecError> for BsonError {
    fn from(err: UuidCodecError) -> Self {
        BsonError::codec(err)
    }
}
