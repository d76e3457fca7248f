//! Document decoder driven by the codec registry.

use std::any::Any;

use crate::element::ElementType;
use crate::registry::{DecodeContext, Registry};
use crate::value::{TypeKey, ValueMut};
use crate::value_reader::BsonValueReader;
use crate::{BsonError, Reader, ValueReader};

/// A type that can be populated from the fields of a BSON document.
pub trait Unmarshal {
    /// Handles one field. Values the implementation does not read are
    /// skipped by the decoder.
    fn unmarshal_field(
        &mut self,
        key: &str,
        field: &mut FieldDecoder<'_, '_, '_>,
    ) -> Result<(), BsonError>;
}

/// The value of one document field, ready to be decoded into a slot.
pub struct FieldDecoder<'c, 'a, 'r> {
    ctx: DecodeContext<'c>,
    vr: BsonValueReader<'a, 'r>,
}

impl FieldDecoder<'_, '_, '_> {
    pub fn element_type(&self) -> ElementType {
        self.vr.element_type()
    }

    /// Decodes into `slot` with the decoder registered for `T`.
    pub fn decode_into<T: Any>(&mut self, slot: &mut T) -> Result<(), BsonError> {
        let ty = TypeKey::of::<T>();
        let decoder = self.ctx.registry.lookup_decoder(ty)?;
        decoder.decode_value(&self.ctx, &mut self.vr, ValueMut::new(slot))
    }

    /// Null and undefined become `None`; anything else is decoded into a
    /// fresh `T::default()` and stored as `Some`.
    pub fn decode_option<T: Any + Default>(
        &mut self,
        slot: &mut Option<T>,
    ) -> Result<(), BsonError> {
        match self.vr.element_type() {
            ElementType::Null => {
                self.vr.read_null()?;
                *slot = None;
            }
            ElementType::Undefined => {
                self.vr.read_undefined()?;
                *slot = None;
            }
            _ => {
                let mut value = T::default();
                self.decode_into(&mut value)?;
                *slot = Some(value);
            }
        }
        Ok(())
    }

    pub fn skip(&mut self) -> Result<(), BsonError> {
        self.vr.skip()
    }
}

/// Decodes BSON documents into [`Unmarshal`] values.
#[derive(Debug, Clone, Copy)]
pub struct Decoder<'r> {
    registry: &'r Registry,
}

impl<'r> Decoder<'r> {
    pub fn new(registry: &'r Registry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &'r Registry {
        self.registry
    }

    pub fn decode<T: Unmarshal + Default>(&self, data: &[u8]) -> Result<T, BsonError> {
        let mut value = T::default();
        self.decode_into(data, &mut value)?;
        Ok(value)
    }

    /// Decodes `data` field by field into `target`.
    ///
    /// Fields are applied in document order, so on error the fields before
    /// the failing one have already been written.
    pub fn decode_into<T: Unmarshal + ?Sized>(
        &self,
        data: &[u8],
        target: &mut T,
    ) -> Result<(), BsonError> {
        let declared = Reader::new(data).i32()?;
        let len = usize::try_from(declared).map_err(|_| BsonError::InvalidLength(declared))?;
        if len < 5 {
            return Err(BsonError::InvalidLength(declared));
        }
        if len > data.len() {
            return Err(BsonError::UnexpectedEof);
        }
        if data[len - 1] != 0x00 {
            return Err(BsonError::MissingTerminator);
        }

        let ctx = DecodeContext {
            registry: self.registry,
        };
        let mut reader = Reader::new(&data[..len - 1]);
        reader.skip(4)?;
        while reader.size() > 0 {
            let ty = ElementType::try_from(reader.u8()?)?;
            let key = reader.cstring()?;
            tracing::trace!(key, ty = %ty, "decoding field");
            let mut field = FieldDecoder {
                ctx,
                vr: BsonValueReader::new(&mut reader, ty),
            };
            target
                .unmarshal_field(key, &mut field)
                .and_then(|()| {
                    if field.vr.is_consumed() {
                        Ok(())
                    } else {
                        field.vr.skip()
                    }
                })
                .map_err(|source| BsonError::DecodeKey {
                    key: key.to_owned(),
                    source: Box::new(source),
                })?;
        }
        Ok(())
    }
}
