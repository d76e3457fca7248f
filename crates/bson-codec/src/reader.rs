//! Little-endian byte reader with cursor tracking.

use std::str;

use crate::BsonError;

/// A binary reader over a byte slice.
///
/// Every read is bounds-checked and reports [`BsonError::UnexpectedEof`]
/// instead of panicking. Multi-byte integers are little-endian, as BSON
/// requires.
///
/// # Example
///
/// ```
/// use bson_codec::Reader;
///
/// let data = [0x05, 0x00, 0x00, 0x00, b'a', 0x00];
/// let mut reader = Reader::new(&data);
///
/// assert_eq!(reader.i32().unwrap(), 5);
/// assert_eq!(reader.cstring().unwrap(), "a");
/// assert_eq!(reader.size(), 0);
/// ```
#[derive(Debug, Clone)]
pub struct Reader<'a> {
    /// The underlying byte slice.
    pub uint8: &'a [u8],
    /// Current cursor position.
    pub x: usize,
    /// End position (exclusive).
    pub end: usize,
}

impl<'a> Reader<'a> {
    /// Creates a new reader for the given byte slice.
    pub fn new(uint8: &'a [u8]) -> Self {
        let end = uint8.len();
        Self { uint8, x: 0, end }
    }

    /// Returns the number of remaining bytes.
    pub fn size(&self) -> usize {
        self.end - self.x
    }

    fn assert_size(&self, n: usize) -> Result<(), BsonError> {
        if n > self.size() {
            return Err(BsonError::UnexpectedEof);
        }
        Ok(())
    }

    /// Advances the cursor by the given number of bytes.
    pub fn skip(&mut self, length: usize) -> Result<(), BsonError> {
        self.assert_size(length)?;
        self.x += length;
        Ok(())
    }

    /// Returns a subarray of the given size and advances the cursor.
    pub fn buf(&mut self, size: usize) -> Result<&'a [u8], BsonError> {
        self.assert_size(size)?;
        let bin = &self.uint8[self.x..self.x + size];
        self.x += size;
        Ok(bin)
    }

    fn array<const N: usize>(&mut self) -> Result<[u8; N], BsonError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.buf(N)?);
        Ok(out)
    }

    #[inline]
    pub fn u8(&mut self) -> Result<u8, BsonError> {
        self.assert_size(1)?;
        let val = self.uint8[self.x];
        self.x += 1;
        Ok(val)
    }

    #[inline]
    pub fn i32(&mut self) -> Result<i32, BsonError> {
        Ok(i32::from_le_bytes(self.array()?))
    }

    #[inline]
    pub fn i64(&mut self) -> Result<i64, BsonError> {
        Ok(i64::from_le_bytes(self.array()?))
    }

    #[inline]
    pub fn f64(&mut self) -> Result<f64, BsonError> {
        Ok(f64::from_le_bytes(self.array()?))
    }

    /// Reads an int32 length that must not be negative.
    pub fn length(&mut self) -> Result<usize, BsonError> {
        let len = self.i32()?;
        usize::try_from(len).map_err(|_| BsonError::InvalidLength(len))
    }

    /// Reads a null-terminated UTF-8 string.
    pub fn cstring(&mut self) -> Result<&'a str, BsonError> {
        let rest = &self.uint8[self.x..self.end];
        let nul = rest
            .iter()
            .position(|&b| b == 0)
            .ok_or(BsonError::UnexpectedEof)?;
        let s = str::from_utf8(&rest[..nul]).map_err(|_| BsonError::InvalidUtf8)?;
        self.x += nul + 1;
        Ok(s)
    }

    /// Reads a BSON string: int32 length (including the trailing null),
    /// UTF-8 bytes, then a null byte.
    pub fn string(&mut self) -> Result<&'a str, BsonError> {
        let len = self.i32()?;
        if len < 1 {
            return Err(BsonError::InvalidLength(len));
        }
        let bytes = self.buf(len as usize)?;
        let (body, nul) = bytes.split_at(bytes.len() - 1);
        if nul[0] != 0 {
            return Err(BsonError::MissingTerminator);
        }
        str::from_utf8(body).map_err(|_| BsonError::InvalidUtf8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_little_endian_integers() {
        let data = [
            0x01, 0x00, 0x00, 0x00, // i32 1
            0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, // i64 -1
        ];
        let mut r = Reader::new(&data);
        assert_eq!(r.i32().unwrap(), 1);
        assert_eq!(r.i64().unwrap(), -1);
        assert_eq!(r.size(), 0);
    }

    #[test]
    fn short_input_is_eof_not_panic() {
        let data = [0x01, 0x02];
        let mut r = Reader::new(&data);
        assert!(matches!(r.i32(), Err(BsonError::UnexpectedEof)));
        // A failed read does not move the cursor.
        assert_eq!(r.x, 0);
        assert!(matches!(r.buf(3), Err(BsonError::UnexpectedEof)));
        assert!(matches!(r.skip(3), Err(BsonError::UnexpectedEof)));
    }

    #[test]
    fn negative_length_is_rejected() {
        let data = (-5i32).to_le_bytes();
        let mut r = Reader::new(&data);
        assert!(matches!(r.length(), Err(BsonError::InvalidLength(-5))));
    }

    #[test]
    fn string_matrix() {
        let mut data = 3i32.to_le_bytes().to_vec();
        data.extend_from_slice(b"hi\0");
        assert_eq!(Reader::new(&data).string().unwrap(), "hi");

        let mut missing_nul = 3i32.to_le_bytes().to_vec();
        missing_nul.extend_from_slice(b"hi!");
        assert!(matches!(
            Reader::new(&missing_nul).string(),
            Err(BsonError::MissingTerminator)
        ));

        let zero = 0i32.to_le_bytes();
        assert!(matches!(
            Reader::new(&zero).string(),
            Err(BsonError::InvalidLength(0))
        ));

        let mut bad_utf8 = 2i32.to_le_bytes().to_vec();
        bad_utf8.extend_from_slice(&[0xff, 0x00]);
        assert!(matches!(
            Reader::new(&bad_utf8).string(),
            Err(BsonError::InvalidUtf8)
        ));
    }

    #[test]
    fn cstring_without_terminator_is_eof() {
        let data = *b"abc";
        assert!(matches!(
            Reader::new(&data).cstring(),
            Err(BsonError::UnexpectedEof)
        ));
    }
}
