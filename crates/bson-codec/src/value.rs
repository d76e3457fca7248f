//! Type-erased values handed to pluggable codecs.

use std::any::{type_name, Any, TypeId};
use std::fmt;

use crate::BsonError;

/// Runtime identity of a type, used as the registry key.
#[derive(Clone, Copy)]
pub struct TypeKey {
    id: TypeId,
    name: &'static str,
}

impl TypeKey {
    pub fn of<T: Any>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: type_name::<T>(),
        }
    }

    pub fn id(&self) -> TypeId {
        self.id
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for TypeKey {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeKey {}

impl fmt::Debug for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// A borrowed value of some concrete type, as seen by an encoder.
#[derive(Clone, Copy)]
pub struct ValueRef<'a> {
    inner: &'a (dyn Any + 'static),
    type_name: &'static str,
}

impl<'a> ValueRef<'a> {
    pub fn new<T: Any>(value: &'a T) -> Self {
        Self {
            inner: value,
            type_name: type_name::<T>(),
        }
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn is<T: Any>(&self) -> bool {
        self.inner.is::<T>()
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&'a T> {
        self.inner.downcast_ref::<T>()
    }

    /// Downcasts or reports a [`BsonError::ValueEncoder`] naming `codec`.
    pub fn expect<T: Any>(&self, codec: &'static str) -> Result<&'a T, BsonError> {
        self.downcast_ref::<T>().ok_or_else(|| BsonError::ValueEncoder {
            name: codec,
            types: vec![type_name::<T>()],
            received: self.type_name,
        })
    }
}

impl fmt::Debug for ValueRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ValueRef<{}>", self.type_name)
    }
}

/// A mutable destination slot of some concrete type, as seen by a decoder.
pub struct ValueMut<'a> {
    inner: &'a mut (dyn Any + 'static),
    type_name: &'static str,
}

impl<'a> ValueMut<'a> {
    pub fn new<T: Any>(slot: &'a mut T) -> Self {
        Self {
            inner: slot,
            type_name: type_name::<T>(),
        }
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn is<T: Any>(&self) -> bool {
        self.inner.is::<T>()
    }

    pub fn downcast_mut<T: Any>(&mut self) -> Option<&mut T> {
        self.inner.downcast_mut::<T>()
    }

    /// Converts into the typed slot or reports a [`BsonError::ValueDecoder`]
    /// naming `codec`.
    pub fn expect<T: Any>(self, codec: &'static str) -> Result<&'a mut T, BsonError> {
        let received = self.type_name;
        let inner = self.inner;
        inner
            .downcast_mut::<T>()
            .ok_or_else(|| BsonError::ValueDecoder {
                name: codec,
                types: vec![type_name::<T>()],
                received,
            })
    }
}

impl fmt::Debug for ValueMut<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ValueMut<{}>", self.type_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_key_equality_is_by_id() {
        assert_eq!(TypeKey::of::<i32>(), TypeKey::of::<i32>());
        assert_ne!(TypeKey::of::<i32>(), TypeKey::of::<i64>());
        assert_eq!(TypeKey::of::<String>().name(), type_name::<String>());
    }

    #[test]
    fn value_ref_expect() {
        let v = 7i32;
        let r = ValueRef::new(&v);
        assert_eq!(*r.expect::<i32>("Int32EncodeValue").unwrap(), 7);
        let err = r.expect::<String>("StringEncodeValue").unwrap_err();
        assert!(matches!(
            err,
            BsonError::ValueEncoder { name: "StringEncodeValue", received: "i32", .. }
        ));
    }

    #[test]
    fn value_mut_expect_writes_through() {
        let mut slot = 0i64;
        *ValueMut::new(&mut slot).expect::<i64>("Int64DecodeValue").unwrap() = 9;
        assert_eq!(slot, 9);

        let mut other = false;
        let err = ValueMut::new(&mut other)
            .expect::<i64>("Int64DecodeValue")
            .unwrap_err();
        assert!(matches!(
            err,
            BsonError::ValueDecoder { name: "Int64DecodeValue", received: "bool", .. }
        ));
    }
}
