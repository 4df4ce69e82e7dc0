use std::time::Duration;

use atom_core::news::{Article, NewsService};

use super::{CachedProxy, NewsPlaceholder, Proxied, ProxySource};

/// NewsAPI headlines cached in a single global slot.
///
/// Never fails: an upstream failure yields the [`NewsPlaceholder`] article,
/// which is not cached so the next request tries upstream again. An empty
/// upstream list is served but not cached either.
#[derive(Debug, Clone)]
pub struct NewsProxy {
    news: NewsService,
    proxy: CachedProxy<(), Vec<Article>>,
}

impl NewsProxy {
    pub fn new(news: NewsService, ttl: Duration, timeout: Duration) -> Self {
        Self {
            news,
            proxy: CachedProxy::new("news", ttl, timeout)
                .caching_only(|articles| !articles.is_empty()),
        }
    }

    /// Current headlines from cache, upstream, or the placeholder.
    pub async fn headlines(&self) -> Proxied<Vec<Article>> {
        let news = self.news.clone();
        let fetched = self
            .proxy
            .get_or_fetch((), || async move { news.headlines().await }, &NewsPlaceholder)
            .await;

        match fetched {
            Ok(proxied) => proxied,
            // Unreachable with NewsPlaceholder, kept total for the type.
            Err(error) => Proxied {
                value: vec![NewsPlaceholder::article(&error)],
                source: ProxySource::Fallback,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use atom_test::MockNewsProvider;

    use super::*;

    fn proxy(provider: &MockNewsProvider) -> NewsProxy {
        NewsProxy::new(
            NewsService::new(provider.clone()),
            Duration::from_secs(300),
            Duration::from_secs(10),
        )
    }

    #[tokio::test(start_paused = true)]
    async fn headlines_are_cached_globally() {
        let provider = MockNewsProvider::default();
        let news = proxy(&provider);

        let first = news.headlines().await;
        let second = news.headlines().await;

        assert_eq!(provider.calls(), 1);
        assert_eq!(first.value, second.value);
        assert_eq!(second.source, ProxySource::Cache);
        assert_eq!(first.value[0].headline, "Mock headline");
    }

    #[tokio::test]
    async fn failure_yields_uncached_placeholder() {
        let provider = MockNewsProvider::failing("NEWS_API_KEY is not set");
        let news = proxy(&provider);

        let first = news.headlines().await;
        assert_eq!(first.source, ProxySource::Fallback);
        assert_eq!(first.value.len(), 1);
        assert_eq!(first.value[0].source, "System");
        assert_eq!(first.value[0].headline, "Live news temporarily unavailable");
        assert_eq!(first.value[0].summary, "NEWS_API_KEY is not set");

        let second = news.headlines().await;
        assert_eq!(provider.calls(), 2);
        assert_ne!(first.value[0].id, second.value[0].id);
    }

    #[tokio::test(start_paused = true)]
    async fn empty_feed_is_refetched() {
        let provider = MockNewsProvider::new(Vec::new());
        let news = proxy(&provider);

        let first = news.headlines().await;
        assert!(first.value.is_empty());
        assert_eq!(first.source, ProxySource::Upstream);

        let second = news.headlines().await;
        assert!(second.value.is_empty());
        assert_eq!(second.source, ProxySource::Upstream);
        assert_eq!(provider.calls(), 2);
    }
}
