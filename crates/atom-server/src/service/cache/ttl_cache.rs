use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;

/// Tracing target for cache operations.
const TRACING_TARGET: &str = "atom_server::service::cache";

#[derive(Debug, Clone)]
struct CacheEntry<V> {
    value: V,
    stored_at: Instant,
}

/// Key-value map whose entries go stale `ttl` after they were stored.
///
/// Staleness is checked lazily on read, and a read that finds a stale entry
/// evicts it. The lock only guards map access and is never held while a
/// value is being fetched.
pub struct TtlCache<K, V> {
    entries: Arc<Mutex<HashMap<K, CacheEntry<V>>>>,
    ttl: Duration,
}

impl<K, V> TtlCache<K, V>
where
    K: Eq + Hash,
    V: Clone,
{
    /// Creates an empty cache.
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: Arc::default(),
            ttl,
        }
    }

    /// Freshness window of every entry.
    #[inline]
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Returns a copy of the value under `key` if it is younger than the TTL.
    ///
    /// A stale entry is evicted on the way out.
    pub async fn get_fresh(&self, key: &K) -> Option<V> {
        let mut entries = self.entries.lock().await;
        let age = entries.get(key)?.stored_at.elapsed();

        if age < self.ttl {
            return entries.get(key).map(|entry| entry.value.clone());
        }

        tracing::trace!(
            target: TRACING_TARGET,
            age_ms = age.as_millis(),
            "evicting stale cache entry"
        );
        entries.remove(key);
        None
    }

    /// Stores `value` under `key`, stamped now, replacing any earlier entry.
    pub async fn insert(&self, key: K, value: V) {
        let entry = CacheEntry {
            value,
            stored_at: Instant::now(),
        };
        self.entries.lock().await.insert(key, entry);
    }

    /// When the entry under `key` was stored, fresh or not.
    pub async fn stored_at(&self, key: &K) -> Option<Instant> {
        self.entries.lock().await.get(key).map(|entry| entry.stored_at)
    }

    /// Number of entries, including stale ones not yet read.
    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    /// Returns `true` if nothing has been stored yet.
    pub async fn is_empty(&self) -> bool {
        self.entries.lock().await.is_empty()
    }
}

impl<K, V> Clone for TtlCache<K, V> {
    fn clone(&self) -> Self {
        Self {
            entries: self.entries.clone(),
            ttl: self.ttl,
        }
    }
}

impl<K, V> fmt::Debug for TtlCache<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TtlCache")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}
