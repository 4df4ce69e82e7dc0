//! Cached proxies in front of third-party data APIs.
//!
//! Every lookup follows the same path: serve a fresh cache entry if there is
//! one, otherwise fetch upstream under a timeout and cache the result,
//! otherwise hand the failure to the proxy's [`Fallback`]. Fallback values
//! are never cached and failed fetches are never retried. A proxy may also
//! decline to cache some upstream values, see [`CachedProxy::caching_only`].
//!
//! Two concurrent misses for the same key both go upstream; the later write
//! wins.

mod fallback;
mod news;
mod weather;

use std::fmt;
use std::future::Future;
use std::hash::Hash;
use std::time::Duration;

use atom_core::{Error, Result};

pub use self::fallback::{Fallback, NewsPlaceholder, Surface};
pub use self::news::NewsProxy;
pub use self::weather::WeatherProxy;
use crate::service::cache::TtlCache;

/// Tracing target for proxy operations.
const TRACING_TARGET: &str = "atom_server::service::proxy";

/// Where a proxied value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display, strum::AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum ProxySource {
    /// A fresh cache entry.
    Cache,
    /// A successful upstream fetch.
    Upstream,
    /// The fallback policy, after an upstream failure.
    Fallback,
}

/// A value together with its [`ProxySource`].
#[derive(Debug, Clone, PartialEq)]
pub struct Proxied<V> {
    pub value: V,
    pub source: ProxySource,
}

impl<V> Proxied<V> {
    #[inline]
    fn new(value: V, source: ProxySource) -> Self {
        Self { value, source }
    }

    /// Drops the source.
    #[inline]
    pub fn into_value(self) -> V {
        self.value
    }
}

/// Read-through cache with a fetch timeout.
pub struct CachedProxy<K, V> {
    name: &'static str,
    cache: TtlCache<K, V>,
    timeout: Duration,
    cacheable: fn(&V) -> bool,
}

impl<K, V> CachedProxy<K, V>
where
    K: Eq + Hash + Clone + fmt::Debug,
    V: Clone,
{
    /// Creates a proxy named `name` (used in logs and timeout messages).
    pub fn new(name: &'static str, ttl: Duration, timeout: Duration) -> Self {
        Self {
            name,
            cache: TtlCache::new(ttl),
            timeout,
            cacheable: |_| true,
        }
    }

    /// Caches an upstream value only when `cacheable` accepts it.
    ///
    /// Rejected values are still served, and the next lookup goes upstream
    /// again.
    pub fn caching_only(mut self, cacheable: fn(&V) -> bool) -> Self {
        self.cacheable = cacheable;
        self
    }

    /// The underlying cache.
    #[inline]
    pub fn cache(&self) -> &TtlCache<K, V> {
        &self.cache
    }

    /// Serves `key` from cache, else from `fetch`, else from `fallback`.
    pub async fn get_or_fetch<F, Fut>(
        &self,
        key: K,
        fetch: F,
        fallback: &impl Fallback<V>,
    ) -> Result<Proxied<V>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V>>,
    {
        if let Some(value) = self.cache.get_fresh(&key).await {
            tracing::debug!(target: TRACING_TARGET, proxy = self.name, key = ?key, "cache hit");
            return Ok(Proxied::new(value, ProxySource::Cache));
        }

        tracing::debug!(target: TRACING_TARGET, proxy = self.name, key = ?key, "cache miss");

        let fetched = match tokio::time::timeout(self.timeout, fetch()).await {
            Ok(result) => result,
            Err(_) => Err(Error::timeout().with_message(format!(
                "{} request timed out after {}s",
                self.name,
                self.timeout.as_secs()
            ))),
        };

        match fetched {
            Ok(value) => {
                if (self.cacheable)(&value) {
                    self.cache.insert(key, value.clone()).await;
                } else {
                    tracing::debug!(
                        target: TRACING_TARGET,
                        proxy = self.name,
                        key = ?key,
                        "upstream value not cached"
                    );
                }
                Ok(Proxied::new(value, ProxySource::Upstream))
            }
            Err(error) => {
                tracing::warn!(
                    target: TRACING_TARGET,
                    proxy = self.name,
                    key = ?key,
                    error = %error,
                    "upstream fetch failed, applying fallback"
                );
                fallback
                    .recover(error)
                    .map(|value| Proxied::new(value, ProxySource::Fallback))
            }
        }
    }
}

impl<K, V> Clone for CachedProxy<K, V> {
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            cache: self.cache.clone(),
            timeout: self.timeout,
            cacheable: self.cacheable,
        }
    }
}

impl<K, V> fmt::Debug for CachedProxy<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CachedProxy")
            .field("name", &self.name)
            .field("cache", &self.cache)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use atom_core::ErrorKind;
    use tokio::sync::Notify;

    use super::*;

    fn proxy() -> CachedProxy<&'static str, u32> {
        CachedProxy::new("test", Duration::from_secs(60), Duration::from_secs(10))
    }

    #[tokio::test(start_paused = true)]
    async fn second_lookup_is_served_from_cache() -> Result<()> {
        let proxy = proxy();
        let calls = Arc::new(AtomicUsize::new(0));
        let fetch = || {
            let calls = calls.clone();
            async move { Ok(calls.fetch_add(1, Ordering::SeqCst) as u32 + 1) }
        };

        let first = proxy.get_or_fetch("k", fetch, &Surface).await?;
        let second = proxy.get_or_fetch("k", fetch, &Surface).await?;

        assert_eq!(first.source, ProxySource::Upstream);
        assert_eq!(second, Proxied::new(1, ProxySource::Cache));
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        tokio::time::advance(Duration::from_secs(60)).await;
        let third = proxy.get_or_fetch("k", fetch, &Surface).await?;
        assert_eq!(third, Proxied::new(2, ProxySource::Upstream));
        Ok(())
    }

    #[tokio::test]
    async fn rejected_values_are_served_but_not_cached() -> Result<()> {
        let proxy = proxy().caching_only(|value| *value > 0);

        let zero = proxy.get_or_fetch("k", || async { Ok(0) }, &Surface).await?;
        assert_eq!(zero, Proxied::new(0, ProxySource::Upstream));
        assert!(proxy.cache().is_empty().await);

        let one = proxy.get_or_fetch("k", || async { Ok(1) }, &Surface).await?;
        assert_eq!(one.source, ProxySource::Upstream);
        assert_eq!(proxy.cache().get_fresh(&"k").await, Some(1));
        Ok(())
    }

    #[tokio::test]
    async fn failures_surface_and_are_not_cached() {
        let proxy = proxy();
        let error = proxy
            .get_or_fetch("k", || async { Err(Error::external_error()) }, &Surface)
            .await
            .unwrap_err();

        assert_eq!(error.kind, ErrorKind::ExternalError);
        assert!(proxy.cache().is_empty().await);
    }

    #[tokio::test(start_paused = true)]
    async fn slow_fetch_times_out() {
        let proxy = proxy();
        let error = proxy
            .get_or_fetch(
                "k",
                || async {
                    tokio::time::sleep(Duration::from_secs(30)).await;
                    Ok(1)
                },
                &Surface,
            )
            .await
            .unwrap_err();

        assert_eq!(error.kind, ErrorKind::Timeout);
        assert_eq!(error.to_string(), "test request timed out after 10s");
    }

    #[tokio::test]
    async fn slow_fetch_does_not_hold_the_cache() -> anyhow::Result<()> {
        let proxy = proxy();
        let gate = Arc::new(Notify::new());
        let calls = Arc::new(AtomicUsize::new(0));

        let blocked = |proxy: CachedProxy<&'static str, u32>| {
            let gate = gate.clone();
            let calls = calls.clone();
            tokio::spawn(async move {
                let fetch = || async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    gate.notified().await;
                    Ok(1)
                };
                proxy.get_or_fetch("a", fetch, &Surface).await
            })
        };

        let first = blocked(proxy.clone());
        let second = blocked(proxy.clone());
        while calls.load(Ordering::SeqCst) < 2 {
            tokio::task::yield_now().await;
        }

        let other = proxy.get_or_fetch("b", || async { Ok(2) }, &Surface).await?;
        assert_eq!(other, Proxied::new(2, ProxySource::Upstream));
        assert!(!first.is_finished());
        assert!(!second.is_finished());

        gate.notify_waiters();
        assert_eq!(first.await??.source, ProxySource::Upstream);
        assert_eq!(second.await??.source, ProxySource::Upstream);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(proxy.cache().get_fresh(&"a").await, Some(1));

        Ok(())
    }
}
