//! BSON engine error type.

use thiserror::Error;

use crate::ElementType;

/// Error type for BSON reading, writing and codec dispatch.
#[derive(Debug, Error)]
pub enum BsonError {
    #[error("unexpected end of input")]
    UnexpectedEof,
    #[error("invalid UTF-8")]
    InvalidUtf8,
    #[error("invalid length {0}")]
    InvalidLength(i32),
    #[error("unsupported BSON type: 0x{0:02x}")]
    UnsupportedType(u8),
    #[error("document is not terminated by a null byte")]
    MissingTerminator,
    #[error("positioned on {actual}, but attempted to read {requested}")]
    ReadTypeMismatch {
        requested: ElementType,
        actual: ElementType,
    },
    #[error("value has already been read")]
    ValueAlreadyRead,
    #[error("value for key {0} has already been written")]
    ValueAlreadyWritten(String),
    #[error("no value was written for key {0}")]
    NoValueWritten(String),
    #[error("no encoder found for {0}")]
    NoEncoder(&'static str),
    #[error("no decoder found for {0}")]
    NoDecoder(&'static str),
    /// A codec was handed a value of a type it cannot encode.
    #[error("{name} can only encode valid {}, but got {received}", join_types(.types))]
    ValueEncoder {
        name: &'static str,
        types: Vec<&'static str>,
        received: &'static str,
    },
    /// A codec was handed a slot of a type it cannot decode into.
    #[error("{name} can only decode valid {}, but got {received}", join_types(.types))]
    ValueDecoder {
        name: &'static str,
        types: Vec<&'static str>,
        received: &'static str,
    },
    #[error("error decoding key {key}: {source}")]
    DecodeKey {
        key: String,
        #[source]
        source: Box<BsonError>,
    },
    /// Domain error raised by a pluggable codec.
    #[error(transparent)]
    Codec(Box<dyn std::error::Error + Send + Sync>),
}

impl BsonError {
    /// Wraps an arbitrary codec error.
    pub fn codec<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        BsonError::Codec(Box::new(err))
    }

    /// Returns the innermost error, unwrapping key context.
    pub fn root(&self) -> &BsonError {
        match self {
            BsonError::DecodeKey { source, .. } => source.root(),
            other => other,
        }
    }
}

fn join_types(types: &[&'static str]) -> String {
    match types {
        [] => String::new(),
        [only] => (*only).to_owned(),
        [first, second] => format!("{first} or {second}"),
        [init @ .., last] => format!("{}, or {last}", init.join(", ")),
    }
}
