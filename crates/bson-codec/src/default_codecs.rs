//! Built-in codecs for primitive Rust types.
//!
//! Null and undefined decode to "leave the slot alone", so a field that is
//! missing a value keeps its `Default`.

use std::sync::Arc;

use crate::element::{Binary, ElementType};
use crate::registry::{CodecRegistrar, DecodeContext, EncodeContext};
use crate::value::{TypeKey, ValueMut, ValueRef};
use crate::{BsonError, ValueReader, ValueWriter};

pub(crate) fn register_defaults<R: CodecRegistrar + ?Sized>(r: &mut R) {
    r.register_type_encoder(TypeKey::of::<bool>(), Arc::new(bool_encode_value));
    r.register_type_decoder(TypeKey::of::<bool>(), Arc::new(bool_decode_value));
    r.register_type_encoder(TypeKey::of::<i32>(), Arc::new(int32_encode_value));
    r.register_type_decoder(TypeKey::of::<i32>(), Arc::new(int32_decode_value));
    r.register_type_encoder(TypeKey::of::<i64>(), Arc::new(int64_encode_value));
    r.register_type_decoder(TypeKey::of::<i64>(), Arc::new(int64_decode_value));
    r.register_type_encoder(TypeKey::of::<f64>(), Arc::new(double_encode_value));
    r.register_type_decoder(TypeKey::of::<f64>(), Arc::new(double_decode_value));
    r.register_type_encoder(TypeKey::of::<String>(), Arc::new(string_encode_value));
    r.register_type_decoder(TypeKey::of::<String>(), Arc::new(string_decode_value));
    r.register_type_encoder(TypeKey::of::<Vec<u8>>(), Arc::new(byte_vec_encode_value));
    r.register_type_decoder(TypeKey::of::<Vec<u8>>(), Arc::new(byte_vec_decode_value));
    r.register_type_encoder(TypeKey::of::<Binary>(), Arc::new(binary_encode_value));
    r.register_type_decoder(TypeKey::of::<Binary>(), Arc::new(binary_decode_value));
}

/// Consumes a null or undefined marker. Returns `false` for any other type.
fn read_empty(vr: &mut dyn ValueReader) -> Result<bool, BsonError> {
    match vr.element_type() {
        ElementType::Null => vr.read_null().map(|_| true),
        ElementType::Undefined => vr.read_undefined().map(|_| true),
        _ => Ok(false),
    }
}

fn cannot_decode(ty: ElementType, target: &'static str) -> BsonError {
    BsonError::codec(CannotDecode { ty, target })
}

#[derive(Debug, thiserror::Error)]
#[error("cannot decode {ty} into {target}")]
struct CannotDecode {
    ty: ElementType,
    target: &'static str,
}

pub fn bool_encode_value(
    _: &EncodeContext<'_>,
    vw: &mut dyn ValueWriter,
    val: ValueRef<'_>,
) -> Result<(), BsonError> {
    vw.write_boolean(*val.expect::<bool>("bool_encode_value")?)
}

pub fn bool_decode_value(
    _: &DecodeContext<'_>,
    vr: &mut dyn ValueReader,
    val: ValueMut<'_>,
) -> Result<(), BsonError> {
    let slot = val.expect::<bool>("bool_decode_value")?;
    if read_empty(vr)? {
        return Ok(());
    }
    match vr.element_type() {
        ElementType::Boolean => *slot = vr.read_boolean()?,
        ty => return Err(cannot_decode(ty, "a bool")),
    }
    Ok(())
}

pub fn int32_encode_value(
    _: &EncodeContext<'_>,
    vw: &mut dyn ValueWriter,
    val: ValueRef<'_>,
) -> Result<(), BsonError> {
    vw.write_int32(*val.expect::<i32>("int32_encode_value")?)
}

pub fn int32_decode_value(
    _: &DecodeContext<'_>,
    vr: &mut dyn ValueReader,
    val: ValueMut<'_>,
) -> Result<(), BsonError> {
    let slot = val.expect::<i32>("int32_decode_value")?;
    if read_empty(vr)? {
        return Ok(());
    }
    match vr.element_type() {
        ElementType::Int32 => *slot = vr.read_int32()?,
        ElementType::Int64 => {
            let i = vr.read_int64()?;
            *slot = i32::try_from(i).map_err(|_| cannot_decode(ElementType::Int64, "an i32"))?;
        }
        ty => return Err(cannot_decode(ty, "an i32")),
    }
    Ok(())
}

pub fn int64_encode_value(
    _: &EncodeContext<'_>,
    vw: &mut dyn ValueWriter,
    val: ValueRef<'_>,
) -> Result<(), BsonError> {
    vw.write_int64(*val.expect::<i64>("int64_encode_value")?)
}

pub fn int64_decode_value(
    _: &DecodeContext<'_>,
    vr: &mut dyn ValueReader,
    val: ValueMut<'_>,
) -> Result<(), BsonError> {
    let slot = val.expect::<i64>("int64_decode_value")?;
    if read_empty(vr)? {
        return Ok(());
    }
    match vr.element_type() {
        ElementType::Int32 => *slot = i64::from(vr.read_int32()?),
        ElementType::Int64 => *slot = vr.read_int64()?,
        ty => return Err(cannot_decode(ty, "an i64")),
    }
    Ok(())
}

pub fn double_encode_value(
    _: &EncodeContext<'_>,
    vw: &mut dyn ValueWriter,
    val: ValueRef<'_>,
) -> Result<(), BsonError> {
    vw.write_double(*val.expect::<f64>("double_encode_value")?)
}

pub fn double_decode_value(
    _: &DecodeContext<'_>,
    vr: &mut dyn ValueReader,
    val: ValueMut<'_>,
) -> Result<(), BsonError> {
    let slot = val.expect::<f64>("double_decode_value")?;
    if read_empty(vr)? {
        return Ok(());
    }
    match vr.element_type() {
        ElementType::Double => *slot = vr.read_double()?,
        ElementType::Int32 => *slot = f64::from(vr.read_int32()?),
        ty => return Err(cannot_decode(ty, "an f64")),
    }
    Ok(())
}

pub fn string_encode_value(
    _: &EncodeContext<'_>,
    vw: &mut dyn ValueWriter,
    val: ValueRef<'_>,
) -> Result<(), BsonError> {
    vw.write_string(val.expect::<String>("string_encode_value")?)
}

pub fn string_decode_value(
    _: &DecodeContext<'_>,
    vr: &mut dyn ValueReader,
    val: ValueMut<'_>,
) -> Result<(), BsonError> {
    let slot = val.expect::<String>("string_decode_value")?;
    if read_empty(vr)? {
        return Ok(());
    }
    match vr.element_type() {
        ElementType::String => *slot = vr.read_string()?,
        ty => return Err(cannot_decode(ty, "a String")),
    }
    Ok(())
}

pub fn byte_vec_encode_value(
    _: &EncodeContext<'_>,
    vw: &mut dyn ValueWriter,
    val: ValueRef<'_>,
) -> Result<(), BsonError> {
    vw.write_binary(val.expect::<Vec<u8>>("byte_vec_encode_value")?)
}

/// Accepts a binary of any subtype; the tag is dropped.
pub fn byte_vec_decode_value(
    _: &DecodeContext<'_>,
    vr: &mut dyn ValueReader,
    val: ValueMut<'_>,
) -> Result<(), BsonError> {
    let slot = val.expect::<Vec<u8>>("byte_vec_decode_value")?;
    if read_empty(vr)? {
        return Ok(());
    }
    match vr.element_type() {
        ElementType::Binary => *slot = vr.read_binary()?.0,
        ty => return Err(cannot_decode(ty, "a Vec<u8>")),
    }
    Ok(())
}

pub fn binary_encode_value(
    _: &EncodeContext<'_>,
    vw: &mut dyn ValueWriter,
    val: ValueRef<'_>,
) -> Result<(), BsonError> {
    let bin = val.expect::<Binary>("binary_encode_value")?;
    vw.write_binary_with_subtype(&bin.data, bin.subtype)
}

pub fn binary_decode_value(
    _: &DecodeContext<'_>,
    vr: &mut dyn ValueReader,
    val: ValueMut<'_>,
) -> Result<(), BsonError> {
    let slot = val.expect::<Binary>("binary_decode_value")?;
    if read_empty(vr)? {
        return Ok(());
    }
    match vr.element_type() {
        ElementType::Binary => {
            let (data, subtype) = vr.read_binary()?;
            *slot = Binary { subtype, data };
        }
        ty => return Err(cannot_decode(ty, "a Binary")),
    }
    Ok(())
}
