//! BSON serialization engine with a pluggable, type-keyed codec registry.
//!
//! Values are converted one element at a time. For every field the
//! [`Encoder`] or [`Decoder`] looks up the codec registered for the field's
//! Rust type in a [`Registry`] and hands it a [`ValueWriter`] or
//! [`ValueReader`] positioned at that element. Codec crates extend the engine
//! by installing their own entries through [`CodecRegistrar`].
//!
//! # Example
//!
//! ```
//! use bson_codec::{
//!     BsonError, Decoder, DocumentWriter, Encoder, FieldDecoder, Marshal, Registry, Unmarshal,
//! };
//!
//! #[derive(Debug, Default, PartialEq)]
//! struct Point {
//!     x: i32,
//!     y: i32,
//! }
//!
//! impl Marshal for Point {
//!     fn marshal(&self, doc: &mut DocumentWriter<'_>) -> Result<(), BsonError> {
//!         doc.field("x", &self.x)?;
//!         doc.field("y", &self.y)
//!     }
//! }
//!
//! impl Unmarshal for Point {
//!     fn unmarshal_field(
//!         &mut self,
//!         key: &str,
//!         field: &mut FieldDecoder<'_, '_, '_>,
//!     ) -> Result<(), BsonError> {
//!         match key {
//!             "x" => field.decode_into(&mut self.x),
//!             "y" => field.decode_into(&mut self.y),
//!             _ => Ok(()),
//!         }
//!     }
//! }
//!
//! let registry = Registry::default();
//! let bytes = Encoder::new(&registry).encode(&Point { x: 1, y: -2 }).unwrap();
//! let back: Point = Decoder::new(&registry).decode(&bytes).unwrap();
//! assert_eq!(back, Point { x: 1, y: -2 });
//! ```

mod decoder;
mod default_codecs;
mod element;
mod encoder;
mod error;
mod reader;
mod registry;
mod value;
mod value_reader;
mod value_writer;

pub mod raw;
pub mod rwtest;

pub use decoder::{Decoder, FieldDecoder, Unmarshal};
pub use default_codecs::{
    binary_decode_value, binary_encode_value, bool_decode_value, bool_encode_value,
    byte_vec_decode_value, byte_vec_encode_value, double_decode_value, double_encode_value,
    int32_decode_value, int32_encode_value, int64_decode_value, int64_encode_value,
    string_decode_value, string_encode_value,
};
pub use element::{
    Binary, ElementType, BINARY_BINARY_OLD, BINARY_COLUMN, BINARY_ENCRYPTED, BINARY_FUNCTION,
    BINARY_GENERIC, BINARY_MD5, BINARY_SENSITIVE, BINARY_USER_DEFINED, BINARY_UUID,
    BINARY_UUID_OLD,
};
pub use encoder::{DocumentWriter, Encoder, Marshal};
pub use error::BsonError;
pub use raw::build_document;
pub use reader::Reader;
pub use registry::{
    CodecRegistrar, DecodeContext, EncodeContext, Registry, ValueDecoder, ValueEncoder,
};
pub use value::{TypeKey, ValueMut, ValueRef};
pub use value_reader::{BsonValueReader, ValueReader};
pub use value_writer::{ElementWriter, ValueWriter};
