// In: src/bridge/registry.rs

//! Process-wide cache of default-configured codecs, one per flags type.
//!
//! The first request for a type builds its table; every later request, from
//! any thread, gets a clone of the same `Arc`. This is the only global state
//! in the crate.

use std::any::{Any, TypeId};
use std::sync::{Arc, OnceLock, RwLock};

use hashbrown::HashMap;

use crate::bridge::codec::FlagsCodec;
use crate::config::CodecConfig;
use crate::error::FlagsError;
use crate::traits::FlagEnum;

type Registry = RwLock<HashMap<TypeId, Arc<dyn Any + Send + Sync>>>;

fn registry() -> &'static Registry {
    static REGISTRY: OnceLock<Registry> = OnceLock::new();
    REGISTRY.get_or_init(|| RwLock::new(HashMap::new()))
}

/// Returns the shared codec for `E`, building it on first use.
///
/// A type whose table cannot be built is not cached; every call reports the
/// same configuration error.
pub fn shared_codec<E: FlagEnum>() -> Result<Arc<FlagsCodec<E>>, FlagsError> {
    let key = TypeId::of::<E>();
    {
        let codecs = registry().read().unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some(codec) = codecs.get(&key) {
            return downcast(Arc::clone(codec));
        }
    }

    let mut codecs = registry().write().unwrap_or_else(|poisoned| poisoned.into_inner());
    if let Some(codec) = codecs.get(&key) {
        return downcast(Arc::clone(codec));
    }
    let codec = Arc::new(FlagsCodec::<E>::new(&CodecConfig::default())?);
    codecs.insert(key, codec.clone() as Arc<dyn Any + Send + Sync>);
    Ok(codec)
}

fn downcast<E: FlagEnum>(codec: Arc<dyn Any + Send + Sync>) -> Result<Arc<FlagsCodec<E>>, FlagsError> {
    codec.downcast::<FlagsCodec<E>>().map_err(|_| {
        FlagsError::InternalError(format!(
            "Codec registry entry for '{}' has the wrong type",
            E::type_name()
        ))
    })
}
