//! Stores [`uuid::Uuid`] fields as compact BSON binaries.
//!
//! UUIDs are written as a 16-byte binary with subtype 0x04 in RFC 4122 byte
//! order, and the nil UUID is written as null. Reading accepts the canonical
//! string form, binaries tagged 0x04 or the legacy generic 0x00, null and
//! undefined.
//!
//! ```
//! use bson_codec::{BsonError, Decoder, DocumentWriter, Encoder, FieldDecoder, Marshal, Unmarshal};
//! use uuid::Uuid;
//!
//! #[derive(Debug, Default, PartialEq)]
//! struct Doc {
//!     id: Uuid,
//! }
//!
//! impl Marshal for Doc {
//!     fn marshal(&self, doc: &mut DocumentWriter<'_>) -> Result<(), BsonError> {
//!         doc.field("_id", &self.id)
//!     }
//! }
//!
//! impl Unmarshal for Doc {
//!     fn unmarshal_field(
//!         &mut self,
//!         key: &str,
//!         field: &mut FieldDecoder<'_, '_, '_>,
//!     ) -> Result<(), BsonError> {
//!         match key {
//!             "_id" => field.decode_into(&mut self.id),
//!             _ => Ok(()),
//!         }
//!     }
//! }
//!
//! let registry = bson_uuid::build_registry();
//! let doc = Doc { id: Uuid::parse_str("0f7d33ce-af9f-4dde-a4ec-ed630eae74e2").unwrap() };
//! let bytes = Encoder::new(&registry).encode(&doc).unwrap();
//! let back: Doc = Decoder::new(&registry).decode(&bytes).unwrap();
//! assert_eq!(back, doc);
//! ```

mod codec;
mod error;
mod registry;

pub use codec::{type_uuid, uuid_decode_value, uuid_encode_value};
pub use error::UuidCodecError;
pub use registry::{build_registry, register_uuid_codec};
