//! Recording [`ValueReader`]/[`ValueWriter`] double for testing codecs.
//!
//! The double remembers the last operation invoked on it, stores whatever was
//! written, and serves pre-loaded values on read. A codec test can then assert
//! both the result and exactly which primitive was touched.

use crate::element::ElementType;
use crate::{BsonError, ValueReader, ValueWriter};

/// The last operation performed on a [`ValueReaderWriter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Invoked {
    #[default]
    Nothing,
    ReadString,
    ReadBinary,
    ReadNull,
    ReadUndefined,
    ReadBoolean,
    ReadInt32,
    ReadInt64,
    ReadDouble,
    Skip,
    WriteBinaryWithSubtype,
    WriteString,
    WriteNull,
    WriteUndefined,
    WriteBoolean,
    WriteInt32,
    WriteInt64,
    WriteDouble,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValueReaderWriter {
    pub invoked: Invoked,
    /// Wire type reported to readers.
    pub element_type: ElementType,
    pub string: Option<String>,
    pub binary: Option<(Vec<u8>, u8)>,
    pub boolean: Option<bool>,
    pub int32: Option<i32>,
    pub int64: Option<i64>,
    pub double: Option<f64>,
    /// Operation that fails with [`BsonError::UnexpectedEof`] instead of
    /// running.
    pub fail_on: Option<Invoked>,
}

impl Default for ValueReaderWriter {
    fn default() -> Self {
        Self {
            invoked: Invoked::Nothing,
            element_type: ElementType::Null,
            string: None,
            binary: None,
            boolean: None,
            int32: None,
            int64: None,
            double: None,
            fail_on: None,
        }
    }
}

impl ValueReaderWriter {
    /// A reader positioned on a value of type `ty`.
    pub fn reading(ty: ElementType) -> Self {
        Self {
            element_type: ty,
            ..Self::default()
        }
    }

    pub fn with_string(mut self, s: impl Into<String>) -> Self {
        self.string = Some(s.into());
        self
    }

    pub fn with_binary(mut self, data: impl Into<Vec<u8>>, subtype: u8) -> Self {
        self.binary = Some((data.into(), subtype));
        self
    }

    pub fn with_boolean(mut self, b: bool) -> Self {
        self.boolean = Some(b);
        self
    }

    pub fn with_int32(mut self, i: i32) -> Self {
        self.int32 = Some(i);
        self
    }

    pub fn with_int64(mut self, i: i64) -> Self {
        self.int64 = Some(i);
        self
    }

    pub fn with_double(mut self, f: f64) -> Self {
        self.double = Some(f);
        self
    }

    pub fn failing_on(mut self, op: Invoked) -> Self {
        self.fail_on = Some(op);
        self
    }

    fn enter(&mut self, op: Invoked, requested: Option<ElementType>) -> Result<(), BsonError> {
        if let Some(requested) = requested {
            if requested != self.element_type {
                return Err(BsonError::ReadTypeMismatch {
                    requested,
                    actual: self.element_type,
                });
            }
        }
        self.invoked = op;
        if self.fail_on == Some(op) {
            return Err(BsonError::UnexpectedEof);
        }
        Ok(())
    }
}

impl ValueReader for ValueReaderWriter {
    fn element_type(&self) -> ElementType {
        self.element_type
    }

    fn read_string(&mut self) -> Result<String, BsonError> {
        self.enter(Invoked::ReadString, Some(ElementType::String))?;
        Ok(self.string.clone().unwrap_or_default())
    }

    fn read_binary(&mut self) -> Result<(Vec<u8>, u8), BsonError> {
        self.enter(Invoked::ReadBinary, Some(ElementType::Binary))?;
        Ok(self.binary.clone().unwrap_or_default())
    }

    fn read_null(&mut self) -> Result<(), BsonError> {
        self.enter(Invoked::ReadNull, Some(ElementType::Null))
    }

    fn read_undefined(&mut self) -> Result<(), BsonError> {
        self.enter(Invoked::ReadUndefined, Some(ElementType::Undefined))
    }

    fn read_boolean(&mut self) -> Result<bool, BsonError> {
        self.enter(Invoked::ReadBoolean, Some(ElementType::Boolean))?;
        Ok(self.boolean.unwrap_or_default())
    }

    fn read_int32(&mut self) -> Result<i32, BsonError> {
        self.enter(Invoked::ReadInt32, Some(ElementType::Int32))?;
        Ok(self.int32.unwrap_or_default())
    }

    fn read_int64(&mut self) -> Result<i64, BsonError> {
        self.enter(Invoked::ReadInt64, Some(ElementType::Int64))?;
        Ok(self.int64.unwrap_or_default())
    }

    fn read_double(&mut self) -> Result<f64, BsonError> {
        self.enter(Invoked::ReadDouble, Some(ElementType::Double))?;
        Ok(self.double.unwrap_or_default())
    }

    fn skip(&mut self) -> Result<(), BsonError> {
        self.enter(Invoked::Skip, None)
    }
}

impl ValueWriter for ValueReaderWriter {
    fn write_binary_with_subtype(&mut self, data: &[u8], subtype: u8) -> Result<(), BsonError> {
        self.enter(Invoked::WriteBinaryWithSubtype, None)?;
        self.binary = Some((data.to_vec(), subtype));
        Ok(())
    }

    fn write_string(&mut self, s: &str) -> Result<(), BsonError> {
        self.enter(Invoked::WriteString, None)?;
        self.string = Some(s.to_owned());
        Ok(())
    }

    fn write_null(&mut self) -> Result<(), BsonError> {
        self.enter(Invoked::WriteNull, None)
    }

    fn write_undefined(&mut self) -> Result<(), BsonError> {
        self.enter(Invoked::WriteUndefined, None)
    }

    fn write_boolean(&mut self, b: bool) -> Result<(), BsonError> {
        self.enter(Invoked::WriteBoolean, None)?;
        self.boolean = Some(b);
        Ok(())
    }

    fn write_int32(&mut self, i: i32) -> Result<(), BsonError> {
        self.enter(Invoked::WriteInt32, None)?;
        self.int32 = Some(i);
        Ok(())
    }

    fn write_int64(&mut self, i: i64) -> Result<(), BsonError> {
        self.enter(Invoked::WriteInt64, None)?;
        self.int64 = Some(i);
        Ok(())
    }

    fn write_double(&mut self, f: f64) -> Result<(), BsonError> {
        self.enter(Invoked::WriteDouble, None)?;
        self.double = Some(f);
        Ok(())
    }
}
