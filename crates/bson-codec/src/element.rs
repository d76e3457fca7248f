//! BSON element type tags and binary subtypes.

use std::fmt;

use crate::BsonError;

/// BSON element type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementType {
    Double = 0x01,
    String = 0x02,
    EmbeddedDocument = 0x03,
    Array = 0x04,
    Binary = 0x05,
    Undefined = 0x06,
    ObjectId = 0x07,
    Boolean = 0x08,
    DateTime = 0x09,
    Null = 0x0a,
    Regex = 0x0b,
    DbPointer = 0x0c,
    JavaScript = 0x0d,
    Symbol = 0x0e,
    CodeWithScope = 0x0f,
    Int32 = 0x10,
    Timestamp = 0x11,
    Int64 = 0x12,
    Decimal128 = 0x13,
    MaxKey = 0x7f,
    MinKey = 0xff,
}

impl ElementType {
    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for ElementType {
    type Error = BsonError;

    fn try_from(byte: u8) -> Result<Self, Self::Error> {
        Ok(match byte {
            0x01 => ElementType::Double,
            0x02 => ElementType::String,
            0x03 => ElementType::EmbeddedDocument,
            0x04 => ElementType::Array,
            0x05 => ElementType::Binary,
            0x06 => ElementType::Undefined,
            0x07 => ElementType::ObjectId,
            0x08 => ElementType::Boolean,
            0x09 => ElementType::DateTime,
            0x0a => ElementType::Null,
            0x0b => ElementType::Regex,
            0x0c => ElementType::DbPointer,
            0x0d => ElementType::JavaScript,
            0x0e => ElementType::Symbol,
            0x0f => ElementType::CodeWithScope,
            0x10 => ElementType::Int32,
            0x11 => ElementType::Timestamp,
            0x12 => ElementType::Int64,
            0x13 => ElementType::Decimal128,
            0x7f => ElementType::MaxKey,
            0xff => ElementType::MinKey,
            other => return Err(BsonError::UnsupportedType(other)),
        })
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ElementType::Double => "double",
            ElementType::String => "string",
            ElementType::EmbeddedDocument => "embedded document",
            ElementType::Array => "array",
            ElementType::Binary => "binary",
            ElementType::Undefined => "undefined",
            ElementType::ObjectId => "objectID",
            ElementType::Boolean => "boolean",
            ElementType::DateTime => "UTC datetime",
            ElementType::Null => "null",
            ElementType::Regex => "regex",
            ElementType::DbPointer => "dbPointer",
            ElementType::JavaScript => "javascript",
            ElementType::Symbol => "symbol",
            ElementType::CodeWithScope => "code with scope",
            ElementType::Int32 => "32-bit integer",
            ElementType::Timestamp => "timestamp",
            ElementType::Int64 => "64-bit integer",
            ElementType::Decimal128 => "128-bit decimal",
            ElementType::MaxKey => "max key",
            ElementType::MinKey => "min key",
        };
        f.write_str(name)
    }
}

/// Generic binary data.
pub const BINARY_GENERIC: u8 = 0x00;
pub const BINARY_FUNCTION: u8 = 0x01;
/// Deprecated binary subtype carrying an inner int32 length prefix.
pub const BINARY_BINARY_OLD: u8 = 0x02;
/// Deprecated UUID subtype with driver-specific byte order.
pub const BINARY_UUID_OLD: u8 = 0x03;
/// RFC 4122 UUID in big-endian byte order.
pub const BINARY_UUID: u8 = 0x04;
pub const BINARY_MD5: u8 = 0x05;
pub const BINARY_ENCRYPTED: u8 = 0x06;
pub const BINARY_COLUMN: u8 = 0x07;
pub const BINARY_SENSITIVE: u8 = 0x08;
/// Start of the user-defined subtype range.
pub const BINARY_USER_DEFINED: u8 = 0x80;

/// Binary payload together with its subtype tag.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Binary {
    pub subtype: u8,
    pub data: Vec<u8>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn try_from_every_known_tag() {
        for byte in (0x01..=0x13).chain([0x7f, 0xff]) {
            let ty = ElementType::try_from(byte).unwrap();
            assert_eq!(ty.as_u8(), byte);
        }
    }

    #[test]
    fn try_from_rejects_unknown_tag() {
        assert!(matches!(
            ElementType::try_from(0x14),
            Err(BsonError::UnsupportedType(0x14))
        ));
        assert!(matches!(
            ElementType::try_from(0x00),
            Err(BsonError::UnsupportedType(0x00))
        ));
    }

    #[test]
    fn display_names() {
        assert_eq!(ElementType::Int32.to_string(), "32-bit integer");
        assert_eq!(ElementType::Binary.to_string(), "binary");
        assert_eq!(ElementType::EmbeddedDocument.to_string(), "embedded document");
    }
}
