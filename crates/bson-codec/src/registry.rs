//! Codec registry keyed by runtime type.

use std::any::TypeId;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::value::{TypeKey, ValueMut, ValueRef};
use crate::{default_codecs, BsonError, ValueReader, ValueWriter};

/// Context passed to every encoder call.
#[derive(Clone, Copy)]
pub struct EncodeContext<'r> {
    pub registry: &'r Registry,
}

/// Context passed to every decoder call.
#[derive(Clone, Copy)]
pub struct DecodeContext<'r> {
    pub registry: &'r Registry,
}

/// Converts a type-erased value into one BSON value.
pub trait ValueEncoder: Send + Sync {
    fn encode_value(
        &self,
        ctx: &EncodeContext<'_>,
        vw: &mut dyn ValueWriter,
        val: ValueRef<'_>,
    ) -> Result<(), BsonError>;
}

impl<F> ValueEncoder for F
where
    F: Fn(&EncodeContext<'_>, &mut dyn ValueWriter, ValueRef<'_>) -> Result<(), BsonError>
        + Send
        + Sync,
{
    fn encode_value(
        &self,
        ctx: &EncodeContext<'_>,
        vw: &mut dyn ValueWriter,
        val: ValueRef<'_>,
    ) -> Result<(), BsonError> {
        self(ctx, vw, val)
    }
}

/// Populates a type-erased slot from one BSON value.
pub trait ValueDecoder: Send + Sync {
    fn decode_value(
        &self,
        ctx: &DecodeContext<'_>,
        vr: &mut dyn ValueReader,
        val: ValueMut<'_>,
    ) -> Result<(), BsonError>;
}

impl<F> ValueDecoder for F
where
    F: Fn(&DecodeContext<'_>, &mut dyn ValueReader, ValueMut<'_>) -> Result<(), BsonError>
        + Send
        + Sync,
{
    fn decode_value(
        &self,
        ctx: &DecodeContext<'_>,
        vr: &mut dyn ValueReader,
        val: ValueMut<'_>,
    ) -> Result<(), BsonError> {
        self(ctx, vr, val)
    }
}

/// Capability to install codecs for a type.
///
/// Codec crates depend on this rather than on [`Registry`] so they can be
/// wired into any host that exposes the same two operations.
pub trait CodecRegistrar {
    fn register_type_encoder(&mut self, key: TypeKey, encoder: Arc<dyn ValueEncoder>);

    fn register_type_decoder(&mut self, key: TypeKey, decoder: Arc<dyn ValueDecoder>);
}

/// Mapping from runtime type to encoder and decoder.
///
/// Cloning is cheap; entries are shared. A registry is immutable once it has
/// been handed to an [`crate::Encoder`] or [`crate::Decoder`].
#[derive(Clone)]
pub struct Registry {
    encoders: HashMap<TypeId, (TypeKey, Arc<dyn ValueEncoder>)>,
    decoders: HashMap<TypeId, (TypeKey, Arc<dyn ValueDecoder>)>,
}

impl Registry {
    /// Creates an empty registry with no codecs at all.
    pub fn empty() -> Self {
        Self {
            encoders: HashMap::new(),
            decoders: HashMap::new(),
        }
    }

    /// Creates a registry seeded with the built-in codecs.
    pub fn new() -> Self {
        let mut registry = Self::empty();
        default_codecs::register_defaults(&mut registry);
        tracing::debug!(
            encoders = registry.encoders.len(),
            decoders = registry.decoders.len(),
            "built default BSON registry"
        );
        registry
    }

    pub fn lookup_encoder(&self, key: TypeKey) -> Result<&dyn ValueEncoder, BsonError> {
        self.encoders
            .get(&key.id())
            .map(|(_, enc)| enc.as_ref())
            .ok_or(BsonError::NoEncoder(key.name()))
    }

    pub fn lookup_decoder(&self, key: TypeKey) -> Result<&dyn ValueDecoder, BsonError> {
        self.decoders
            .get(&key.id())
            .map(|(_, dec)| dec.as_ref())
            .ok_or(BsonError::NoDecoder(key.name()))
    }

    pub fn has_encoder(&self, key: TypeKey) -> bool {
        self.encoders.contains_key(&key.id())
    }

    pub fn has_decoder(&self, key: TypeKey) -> bool {
        self.decoders.contains_key(&key.id())
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl CodecRegistrar for Registry {
    fn register_type_encoder(&mut self, key: TypeKey, encoder: Arc<dyn ValueEncoder>) {
        self.encoders.insert(key.id(), (key, encoder));
    }

    fn register_type_decoder(&mut self, key: TypeKey, decoder: Arc<dyn ValueDecoder>) {
        self.decoders.insert(key.id(), (key, decoder));
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut encoders: Vec<_> = self.encoders.values().map(|(k, _)| k.name()).collect();
        let mut decoders: Vec<_> = self.decoders.values().map(|(k, _)| k.name()).collect();
        encoders.sort_unstable();
        decoders.sort_unstable();
        f.debug_struct("Registry")
            .field("encoders", &encoders)
            .field("decoders", &decoders)
            .finish()
    }
}
