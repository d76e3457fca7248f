//! Reading a single BSON element value.

use crate::element::{ElementType, BINARY_BINARY_OLD};
use crate::{BsonError, Reader};

/// Reader positioned at one BSON value.
///
/// Each value is read at most once. Reading with a method that does not
/// match [`ValueReader::element_type`] fails without consuming anything.
pub trait ValueReader {
    /// The wire type of the value under the cursor.
    fn element_type(&self) -> ElementType;

    fn read_string(&mut self) -> Result<String, BsonError>;

    /// Reads a binary payload and its subtype tag.
    fn read_binary(&mut self) -> Result<(Vec<u8>, u8), BsonError>;

    fn read_null(&mut self) -> Result<(), BsonError>;

    fn read_undefined(&mut self) -> Result<(), BsonError>;

    fn read_boolean(&mut self) -> Result<bool, BsonError>;

    fn read_int32(&mut self) -> Result<i32, BsonError>;

    fn read_int64(&mut self) -> Result<i64, BsonError>;

    fn read_double(&mut self) -> Result<f64, BsonError>;

    /// Consumes the value without interpreting it.
    fn skip(&mut self) -> Result<(), BsonError>;
}

/// [`ValueReader`] over one element of an encoded document.
pub struct BsonValueReader<'a, 'r> {
    reader: &'r mut Reader<'a>,
    ty: ElementType,
    consumed: bool,
}

impl<'a, 'r> BsonValueReader<'a, 'r> {
    pub fn new(reader: &'r mut Reader<'a>, ty: ElementType) -> Self {
        Self {
            reader,
            ty,
            consumed: false,
        }
    }

    /// Whether the value has been read or skipped.
    pub fn is_consumed(&self) -> bool {
        self.consumed
    }

    fn begin(&mut self, requested: ElementType) -> Result<(), BsonError> {
        if self.consumed {
            return Err(BsonError::ValueAlreadyRead);
        }
        if self.ty != requested {
            return Err(BsonError::ReadTypeMismatch {
                requested,
                actual: self.ty,
            });
        }
        Ok(())
    }

    fn done<T>(&mut self, value: T) -> Result<T, BsonError> {
        self.consumed = true;
        Ok(value)
    }
}

impl ValueReader for BsonValueReader<'_, '_> {
    fn element_type(&self) -> ElementType {
        self.ty
    }

    fn read_string(&mut self) -> Result<String, BsonError> {
        self.begin(ElementType::String)?;
        let s = self.reader.string()?.to_owned();
        self.done(s)
    }

    fn read_binary(&mut self) -> Result<(Vec<u8>, u8), BsonError> {
        self.begin(ElementType::Binary)?;
        let (data, subtype) = read_binary_payload(self.reader)?;
        self.done((data.to_vec(), subtype))
    }

    fn read_null(&mut self) -> Result<(), BsonError> {
        self.begin(ElementType::Null)?;
        self.done(())
    }

    fn read_undefined(&mut self) -> Result<(), BsonError> {
        self.begin(ElementType::Undefined)?;
        self.done(())
    }

    fn read_boolean(&mut self) -> Result<bool, BsonError> {
        self.begin(ElementType::Boolean)?;
        let b = self.reader.u8()? != 0;
        self.done(b)
    }

    fn read_int32(&mut self) -> Result<i32, BsonError> {
        self.begin(ElementType::Int32)?;
        let i = self.reader.i32()?;
        self.done(i)
    }

    fn read_int64(&mut self) -> Result<i64, BsonError> {
        self.begin(ElementType::Int64)?;
        let i = self.reader.i64()?;
        self.done(i)
    }

    fn read_double(&mut self) -> Result<f64, BsonError> {
        self.begin(ElementType::Double)?;
        let f = self.reader.f64()?;
        self.done(f)
    }

    fn skip(&mut self) -> Result<(), BsonError> {
        if self.consumed {
            return Err(BsonError::ValueAlreadyRead);
        }
        skip_value(self.reader, self.ty)?;
        self.done(())
    }
}

fn read_binary_payload<'a>(reader: &mut Reader<'a>) -> Result<(&'a [u8], u8), BsonError> {
    let len = reader.length()?;
    let subtype = reader.u8()?;
    if subtype == BINARY_BINARY_OLD {
        let inner = reader.length()?;
        if inner + 4 != len {
            return Err(BsonError::InvalidLength(inner as i32));
        }
        return Ok((reader.buf(inner)?, subtype));
    }
    Ok((reader.buf(len)?, subtype))
}

/// Advances `reader` past a value of type `ty`.
pub(crate) fn skip_value(reader: &mut Reader<'_>, ty: ElementType) -> Result<(), BsonError> {
    match ty {
        ElementType::Undefined
        | ElementType::Null
        | ElementType::MinKey
        | ElementType::MaxKey => Ok(()),
        ElementType::Boolean => reader.skip(1),
        ElementType::Int32 => reader.skip(4),
        ElementType::Double
        | ElementType::DateTime
        | ElementType::Timestamp
        | ElementType::Int64 => reader.skip(8),
        ElementType::ObjectId => reader.skip(12),
        ElementType::Decimal128 => reader.skip(16),
        ElementType::String | ElementType::JavaScript | ElementType::Symbol => {
            reader.string().map(|_| ())
        }
        ElementType::Binary => read_binary_payload(reader).map(|_| ()),
        ElementType::Regex => {
            reader.cstring()?;
            reader.cstring().map(|_| ())
        }
        ElementType::DbPointer => {
            reader.string()?;
            reader.skip(12)
        }
        ElementType::EmbeddedDocument | ElementType::Array | ElementType::CodeWithScope => {
            // The int32 prefix counts itself.
            let len = reader.length()?;
            if len < 5 {
                return Err(BsonError::InvalidLength(len as i32));
            }
            reader.skip(len - 4)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raw;

    fn binary_value(subtype: u8, data: &[u8]) -> Vec<u8> {
        let mut out = Vec::new();
        raw::append_binary(&mut out, subtype, data);
        out
    }

    #[test]
    fn reads_binary_and_subtype() {
        let bytes = binary_value(0x04, &[1, 2, 3]);
        let mut reader = Reader::new(&bytes);
        let mut vr = BsonValueReader::new(&mut reader, ElementType::Binary);
        assert_eq!(vr.read_binary().unwrap(), (vec![1, 2, 3], 0x04));
        assert!(vr.is_consumed());
        assert_eq!(reader.size(), 0);
    }

    #[test]
    fn binary_old_strips_inner_length() {
        let bytes = binary_value(BINARY_BINARY_OLD, &[9, 8]);
        let mut reader = Reader::new(&bytes);
        let mut vr = BsonValueReader::new(&mut reader, ElementType::Binary);
        assert_eq!(vr.read_binary().unwrap(), (vec![9, 8], BINARY_BINARY_OLD));
    }

    #[test]
    fn wrong_read_does_not_consume() {
        let bytes = 42i32.to_le_bytes();
        let mut reader = Reader::new(&bytes);
        let mut vr = BsonValueReader::new(&mut reader, ElementType::Int32);
        assert!(matches!(
            vr.read_string(),
            Err(BsonError::ReadTypeMismatch {
                requested: ElementType::String,
                actual: ElementType::Int32
            })
        ));
        assert!(!vr.is_consumed());
        assert_eq!(vr.read_int32().unwrap(), 42);
        assert!(matches!(vr.read_int32(), Err(BsonError::ValueAlreadyRead)));
    }

    #[test]
    fn skip_matrix() {
        let cases: Vec<(ElementType, Vec<u8>)> = vec![
            (ElementType::Null, vec![]),
            (ElementType::Boolean, vec![1]),
            (ElementType::Int64, vec![0; 8]),
            (ElementType::ObjectId, vec![0; 12]),
            (ElementType::Decimal128, vec![0; 16]),
            (ElementType::String, vec![2, 0, 0, 0, b'x', 0]),
            (ElementType::Regex, vec![b'a', 0, b'i', 0]),
            (ElementType::EmbeddedDocument, vec![5, 0, 0, 0, 0]),
            (ElementType::Binary, binary_value(0x80, &[1, 2, 3])),
        ];
        for (ty, bytes) in cases {
            let mut reader = Reader::new(&bytes);
            BsonValueReader::new(&mut reader, ty)
                .skip()
                .unwrap_or_else(|e| panic!("skip {ty} failed: {e}"));
            assert_eq!(reader.size(), 0, "skip {ty} left bytes behind");
        }
    }

    #[test]
    fn skip_truncated_document_is_eof() {
        let bytes = [50, 0, 0, 0, 0];
        let mut reader = Reader::new(&bytes);
        assert!(matches!(
            skip_value(&mut reader, ElementType::EmbeddedDocument),
            Err(BsonError::UnexpectedEof)
        ));
    }
}
