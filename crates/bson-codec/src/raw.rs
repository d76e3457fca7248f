//! Low-level builders that append raw BSON to a byte vector.
//!
//! The element writers used by [`crate::Encoder`] are built on these, and
//! tests use them to assemble expected documents by hand.

use crate::element::{ElementType, BINARY_BINARY_OLD};

/// Reserves the int32 length prefix of a document and returns its index.
pub fn append_document_start(dst: &mut Vec<u8>) -> usize {
    let idx = dst.len();
    dst.extend_from_slice(&[0, 0, 0, 0]);
    idx
}

/// Writes the terminating null and patches the length prefix at `idx`.
pub fn append_document_end(dst: &mut Vec<u8>, idx: usize) {
    dst.push(0x00);
    let len = (dst.len() - idx) as i32;
    dst[idx..idx + 4].copy_from_slice(&len.to_le_bytes());
}

/// Writes an element header: the type tag followed by the key as a cstring.
pub fn append_header(dst: &mut Vec<u8>, ty: ElementType, key: &str) {
    dst.push(ty.as_u8());
    dst.extend_from_slice(key.as_bytes());
    dst.push(0x00);
}

pub fn append_string(dst: &mut Vec<u8>, s: &str) {
    dst.extend_from_slice(&((s.len() + 1) as i32).to_le_bytes());
    dst.extend_from_slice(s.as_bytes());
    dst.push(0x00);
}

/// Appends a binary payload. Subtype 0x02 carries an extra inner length.
pub fn append_binary(dst: &mut Vec<u8>, subtype: u8, data: &[u8]) {
    if subtype == BINARY_BINARY_OLD {
        dst.extend_from_slice(&((data.len() + 4) as i32).to_le_bytes());
        dst.push(subtype);
        dst.extend_from_slice(&(data.len() as i32).to_le_bytes());
    } else {
        dst.extend_from_slice(&(data.len() as i32).to_le_bytes());
        dst.push(subtype);
    }
    dst.extend_from_slice(data);
}

pub fn append_string_element(dst: &mut Vec<u8>, key: &str, s: &str) {
    append_header(dst, ElementType::String, key);
    append_string(dst, s);
}

pub fn append_binary_element(dst: &mut Vec<u8>, key: &str, subtype: u8, data: &[u8]) {
    append_header(dst, ElementType::Binary, key);
    append_binary(dst, subtype, data);
}

pub fn append_null_element(dst: &mut Vec<u8>, key: &str) {
    append_header(dst, ElementType::Null, key);
}

pub fn append_undefined_element(dst: &mut Vec<u8>, key: &str) {
    append_header(dst, ElementType::Undefined, key);
}

pub fn append_boolean_element(dst: &mut Vec<u8>, key: &str, b: bool) {
    append_header(dst, ElementType::Boolean, key);
    dst.push(u8::from(b));
}

pub fn append_int32_element(dst: &mut Vec<u8>, key: &str, i: i32) {
    append_header(dst, ElementType::Int32, key);
    dst.extend_from_slice(&i.to_le_bytes());
}

pub fn append_int64_element(dst: &mut Vec<u8>, key: &str, i: i64) {
    append_header(dst, ElementType::Int64, key);
    dst.extend_from_slice(&i.to_le_bytes());
}

pub fn append_double_element(dst: &mut Vec<u8>, key: &str, f: f64) {
    append_header(dst, ElementType::Double, key);
    dst.extend_from_slice(&f.to_le_bytes());
}

/// Wraps already-encoded elements in a document.
pub fn build_document(elems: &[u8]) -> Vec<u8> {
    let mut doc = Vec::with_capacity(elems.len() + 5);
    let idx = append_document_start(&mut doc);
    doc.extend_from_slice(elems);
    append_document_end(&mut doc, idx);
    doc
}
