//! TTL-bounded in-memory caches.

mod coordinate_key;
mod ttl_cache;

pub use self::coordinate_key::CoordinateKey;
pub use self::ttl_cache::TtlCache;
