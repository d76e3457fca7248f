//! Writing a single BSON element value.

use crate::element::{ElementType, BINARY_GENERIC};
use crate::{raw, BsonError};

/// Writer for one BSON value.
///
/// Exactly one `write_*` call is expected per value.
pub trait ValueWriter {
    fn write_binary_with_subtype(&mut self, data: &[u8], subtype: u8) -> Result<(), BsonError>;

    fn write_binary(&mut self, data: &[u8]) -> Result<(), BsonError> {
        self.write_binary_with_subtype(data, BINARY_GENERIC)
    }

    fn write_string(&mut self, s: &str) -> Result<(), BsonError>;

    fn write_null(&mut self) -> Result<(), BsonError>;

    fn write_undefined(&mut self) -> Result<(), BsonError>;

    fn write_boolean(&mut self, b: bool) -> Result<(), BsonError>;

    fn write_int32(&mut self, i: i32) -> Result<(), BsonError>;

    fn write_int64(&mut self, i: i64) -> Result<(), BsonError>;

    fn write_double(&mut self, f: f64) -> Result<(), BsonError>;
}

/// [`ValueWriter`] that appends one named element to a document buffer.
///
/// The element header is emitted together with the first value, since only
/// the codec knows which wire type it will produce.
pub struct ElementWriter<'k, 'b> {
    key: &'k str,
    out: &'b mut Vec<u8>,
    written: bool,
}

impl<'k, 'b> ElementWriter<'k, 'b> {
    pub fn new(key: &'k str, out: &'b mut Vec<u8>) -> Self {
        Self {
            key,
            out,
            written: false,
        }
    }

    pub fn is_written(&self) -> bool {
        self.written
    }

    fn header(&mut self, ty: ElementType) -> Result<&mut Vec<u8>, BsonError> {
        if self.written {
            return Err(BsonError::ValueAlreadyWritten(self.key.to_owned()));
        }
        self.written = true;
        raw::append_header(self.out, ty, self.key);
        Ok(self.out)
    }
}

impl ValueWriter for ElementWriter<'_, '_> {
    fn write_binary_with_subtype(&mut self, data: &[u8], subtype: u8) -> Result<(), BsonError> {
        let out = self.header(ElementType::Binary)?;
        raw::append_binary(out, subtype, data);
        Ok(())
    }

    fn write_string(&mut self, s: &str) -> Result<(), BsonError> {
        let out = self.header(ElementType::String)?;
        raw::append_string(out, s);
        Ok(())
    }

    fn write_null(&mut self) -> Result<(), BsonError> {
        self.header(ElementType::Null).map(|_| ())
    }

    fn write_undefined(&mut self) -> Result<(), BsonError> {
        self.header(ElementType::Undefined).map(|_| ())
    }

    fn write_boolean(&mut self, b: bool) -> Result<(), BsonError> {
        self.header(ElementType::Boolean)?.push(u8::from(b));
        Ok(())
    }

    fn write_int32(&mut self, i: i32) -> Result<(), BsonError> {
        self.header(ElementType::Int32)?
            .extend_from_slice(&i.to_le_bytes());
        Ok(())
    }

    fn write_int64(&mut self, i: i64) -> Result<(), BsonError> {
        self.header(ElementType::Int64)?
            .extend_from_slice(&i.to_le_bytes());
        Ok(())
    }

    fn write_double(&mut self, f: f64) -> Result<(), BsonError> {
        self.header(ElementType::Double)?
            .extend_from_slice(&f.to_le_bytes());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_header_with_first_value() {
        let mut out = Vec::new();
        let mut vw = ElementWriter::new("n", &mut out);
        assert!(!vw.is_written());
        vw.write_int32(7).unwrap();
        assert!(vw.is_written());
        assert_eq!(out, vec![0x10, b'n', 0x00, 7, 0, 0, 0]);
    }

    #[test]
    fn second_write_is_rejected() {
        let mut out = Vec::new();
        let mut vw = ElementWriter::new("n", &mut out);
        vw.write_null().unwrap();
        assert!(matches!(
            vw.write_null(),
            Err(BsonError::ValueAlreadyWritten(ref k)) if k == "n"
        ));
        assert_eq!(out, vec![0x0a, b'n', 0x00]);
    }

    #[test]
    fn write_binary_defaults_to_generic_subtype() {
        let mut out = Vec::new();
        ElementWriter::new("b", &mut out).write_binary(&[0xab]).unwrap();
        assert_eq!(out, vec![0x05, b'b', 0x00, 1, 0, 0, 0, 0x00, 0xab]);
    }
}
