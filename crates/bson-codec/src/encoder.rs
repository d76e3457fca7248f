//! Document encoder driven by the codec registry.

use std::any::Any;

use crate::registry::{EncodeContext, Registry};
use crate::value::{TypeKey, ValueRef};
use crate::value_writer::ElementWriter;
use crate::{raw, BsonError, ValueWriter};

/// A type that can lay itself out as the fields of a BSON document.
pub trait Marshal {
    fn marshal(&self, doc: &mut DocumentWriter<'_>) -> Result<(), BsonError>;
}

/// Appends fields to a document, dispatching each value through the
/// registry.
pub struct DocumentWriter<'c> {
    ctx: EncodeContext<'c>,
    out: Vec<u8>,
}

impl<'c> DocumentWriter<'c> {
    /// Encodes `value` under `key` with the encoder registered for `T`.
    pub fn field<T: Any>(&mut self, key: &str, value: &T) -> Result<(), BsonError> {
        let ty = TypeKey::of::<T>();
        let encoder = self.ctx.registry.lookup_encoder(ty)?;
        tracing::trace!(key, ty = ty.name(), "encoding field");
        let mut vw = ElementWriter::new(key, &mut self.out);
        encoder.encode_value(&self.ctx, &mut vw, ValueRef::new(value))?;
        if !vw.is_written() {
            return Err(BsonError::NoValueWritten(key.to_owned()));
        }
        Ok(())
    }

    /// Encodes `Some` like [`DocumentWriter::field`] and `None` as null.
    pub fn field_option<T: Any>(&mut self, key: &str, value: &Option<T>) -> Result<(), BsonError> {
        match value {
            Some(v) => self.field(key, v),
            None => ElementWriter::new(key, &mut self.out).write_null(),
        }
    }
}

/// Encodes [`Marshal`] values into BSON documents.
#[derive(Debug, Clone, Copy)]
pub struct Encoder<'r> {
    registry: &'r Registry,
}

impl<'r> Encoder<'r> {
    pub fn new(registry: &'r Registry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &'r Registry {
        self.registry
    }

    pub fn encode<T: Marshal + ?Sized>(&self, value: &T) -> Result<Vec<u8>, BsonError> {
        let mut doc = DocumentWriter {
            ctx: EncodeContext {
                registry: self.registry,
            },
            out: Vec::new(),
        };
        let idx = raw::append_document_start(&mut doc.out);
        value.marshal(&mut doc)?;
        raw::append_document_end(&mut doc.out, idx);
        Ok(doc.out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::CodecRegistrar;
    use crate::{build_document, raw};
    use std::sync::Arc;

    struct Person {
        name: String,
        age: i32,
        nickname: Option<String>,
    }

    impl Marshal for Person {
        fn marshal(&self, doc: &mut DocumentWriter<'_>) -> Result<(), BsonError> {
            doc.field("name", &self.name)?;
            doc.field("age", &self.age)?;
            doc.field_option("nickname", &self.nickname)
        }
    }

    #[test]
    fn encodes_fields_in_order() {
        let reg = Registry::new();
        let person = Person {
            name: "Alice".into(),
            age: 30,
            nickname: None,
        };
        let bytes = Encoder::new(&reg).encode(&person).unwrap();

        let mut elems = Vec::new();
        raw::append_string_element(&mut elems, "name", "Alice");
        raw::append_int32_element(&mut elems, "age", 30);
        raw::append_null_element(&mut elems, "nickname");
        assert_eq!(bytes, build_document(&elems));
    }

    #[test]
    fn missing_encoder_is_reported() {
        struct Opaque;
        struct Holder(Opaque);
        impl Marshal for Holder {
            fn marshal(&self, doc: &mut DocumentWriter<'_>) -> Result<(), BsonError> {
                doc.field("x", &self.0)
            }
        }

        let reg = Registry::new();
        let err = Encoder::new(&reg).encode(&Holder(Opaque)).unwrap_err();
        assert!(matches!(err, BsonError::NoEncoder(name) if name.ends_with("Opaque")));
    }

    #[test]
    fn encoder_that_writes_nothing_is_an_error() {
        struct Silent;
        struct Holder(Silent);
        impl Marshal for Holder {
            fn marshal(&self, doc: &mut DocumentWriter<'_>) -> Result<(), BsonError> {
                doc.field("quiet", &self.0)
            }
        }
        fn write_nothing(
            _: &EncodeContext<'_>,
            _: &mut dyn ValueWriter,
            _: ValueRef<'_>,
        ) -> Result<(), BsonError> {
            Ok(())
        }

        let mut reg = Registry::new();
        reg.register_type_encoder(TypeKey::of::<Silent>(), Arc::new(write_nothing));
        let err = Encoder::new(&reg).encode(&Holder(Silent)).unwrap_err();
        assert!(matches!(err, BsonError::NoValueWritten(ref k) if k == "quiet"));
    }
}
