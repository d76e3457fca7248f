//! Encoder and decoder for [`Uuid`] values.

use bson_codec::{
    BsonError, DecodeContext, ElementType, EncodeContext, TypeKey, ValueMut, ValueReader,
    ValueRef, ValueWriter, BINARY_GENERIC, BINARY_UUID,
};
use uuid::Uuid;

use crate::UuidCodecError;

/// Registry key for [`Uuid`].
pub fn type_uuid() -> TypeKey {
    TypeKey::of::<Uuid>()
}

/// Encodes a [`Uuid`] as a binary with the UUID subtype (0x04).
///
/// The nil UUID is written as null, so an unset field reads back as unset
/// rather than as `00000000-0000-0000-0000-000000000000`.
pub fn uuid_encode_value(
    _: &EncodeContext<'_>,
    vw: &mut dyn ValueWriter,
    val: ValueRef<'_>,
) -> Result<(), BsonError> {
    let Some(id) = val.downcast_ref::<Uuid>() else {
        return Err(BsonError::ValueEncoder {
            name: "uuid_encode_value",
            types: vec![type_uuid().name()],
            received: val.type_name(),
        });
    };

    if id.is_nil() {
        return vw.write_null();
    }

    vw.write_binary_with_subtype(id.as_bytes(), BINARY_UUID)
}

/// Decodes a string, or a binary with subtype 0x00 (generic) or 0x04 (uuid),
/// into a [`Uuid`].
///
/// Null and undefined are consumed and leave the slot as it was. The slot is
/// only assigned once the value has parsed successfully.
pub fn uuid_decode_value(
    _: &DecodeContext<'_>,
    vr: &mut dyn ValueReader,
    mut val: ValueMut<'_>,
) -> Result<(), BsonError> {
    let received = val.type_name();
    let Some(slot) = val.downcast_mut::<Uuid>() else {
        return Err(BsonError::ValueDecoder {
            name: "uuid_decode_value",
            types: vec![type_uuid().name()],
            received,
        });
    };

    match vr.element_type() {
        ElementType::String => {
            let s = vr.read_string()?;
            *slot = Uuid::parse_str(&s).map_err(UuidCodecError::from)?;
        }
        ElementType::Binary => {
            let (data, subtype) = vr.read_binary()?;
            match subtype {
                BINARY_GENERIC | BINARY_UUID => {
                    *slot = Uuid::from_slice(&data).map_err(UuidCodecError::from)?;
                }
                other => return Err(UuidCodecError::UnsupportedSubtype(other).into()),
            }
        }
        ElementType::Null => vr.read_null()?,
        ElementType::Undefined => vr.read_undefined()?,
        other => return Err(UuidCodecError::UnsupportedWireType(other).into()),
    }
    Ok(())
}
