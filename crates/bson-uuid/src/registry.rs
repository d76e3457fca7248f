//! Installing the UUID codec into a registry.

use std::sync::Arc;

use bson_codec::{CodecRegistrar, Registry};

use crate::{type_uuid, uuid_decode_value, uuid_encode_value};

/// Installs [`uuid_encode_value`] and [`uuid_decode_value`] for
/// [`uuid::Uuid`], replacing any entry already present.
pub fn register_uuid_codec<R: CodecRegistrar + ?Sized>(registrar: &mut R) {
    registrar.register_type_encoder(type_uuid(), Arc::new(uuid_encode_value));
    registrar.register_type_decoder(type_uuid(), Arc::new(uuid_decode_value));
    tracing::debug!(ty = type_uuid().name(), "registered uuid codec");
}

/// Returns the default registry with the UUID codec installed.
pub fn build_registry() -> Registry {
    let mut registry = Registry::default();
    register_uuid_codec(&mut registry);
    registry
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson_codec::{TypeKey, ValueDecoder, ValueEncoder};
    use uuid::Uuid;

    #[derive(Default)]
    struct Recording {
        encoders: Vec<TypeKey>,
        decoders: Vec<TypeKey>,
    }

    impl CodecRegistrar for Recording {
        fn register_type_encoder(&mut self, key: TypeKey, _: Arc<dyn ValueEncoder>) {
            self.encoders.push(key);
        }

        fn register_type_decoder(&mut self, key: TypeKey, _: Arc<dyn ValueDecoder>) {
            self.decoders.push(key);
        }
    }

    #[test]
    fn registers_exactly_one_pair_for_uuid() {
        let mut rec = Recording::default();
        register_uuid_codec(&mut rec);
        assert_eq!(rec.encoders, vec![TypeKey::of::<Uuid>()]);
        assert_eq!(rec.decoders, vec![TypeKey::of::<Uuid>()]);
    }

    #[test]
    fn build_registry_extends_defaults() {
        let reg = build_registry();
        assert!(reg.has_encoder(type_uuid()));
        assert!(reg.has_decoder(type_uuid()));
        assert!(reg.has_encoder(TypeKey::of::<String>()));

        let plain = Registry::default();
        assert!(!plain.has_encoder(type_uuid()));
    }
}
