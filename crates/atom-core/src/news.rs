//! News headlines provider.

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use jiff::Timestamp;
#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::Result;

/// Tracing target for news operations.
pub const TRACING_TARGET: &str = "atom_core::news";

/// A normalized news article.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct Article {
    /// Identifier assigned when the article was normalized.
    pub id: Uuid,
    /// Publisher name.
    pub source: String,
    /// Article title.
    pub headline: String,
    /// Short description.
    pub summary: String,
    /// Publication time as reported by the upstream (ISO-8601).
    pub timestamp: String,
}

impl Article {
    /// Creates an article with a fresh identifier.
    pub fn new(
        source: impl Into<String>,
        headline: impl Into<String>,
        summary: impl Into<String>,
        timestamp: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            source: source.into(),
            headline: headline.into(),
            summary: summary.into(),
            timestamp: timestamp.into(),
        }
    }

    /// Returns the current time formatted the way article timestamps are.
    pub fn now_timestamp() -> String {
        Timestamp::now().to_string()
    }
}

/// Core trait for headline providers.
#[async_trait::async_trait]
pub trait NewsProvider: Send + Sync {
    /// Fetches the current top headlines.
    async fn headlines(&self) -> Result<Vec<Article>>;
}

/// News provider wrapper with observability.
#[derive(Clone)]
pub struct NewsService {
    inner: Arc<dyn NewsProvider>,
}

impl fmt::Debug for NewsService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewsService").finish_non_exhaustive()
    }
}

impl NewsService {
    /// Creates a new news service wrapper.
    pub fn new<P>(provider: P) -> Self
    where
        P: NewsProvider + 'static,
    {
        Self {
            inner: Arc::new(provider),
        }
    }

    /// Fetches the current top headlines.
    pub async fn headlines(&self) -> Result<Vec<Article>> {
        let started_at = Instant::now();
        let result = self.inner.headlines().await;
        let elapsed = started_at.elapsed();

        match &result {
            Ok(articles) => tracing::debug!(
                target: TRACING_TARGET,
                article_count = articles.len(),
                elapsed_ms = elapsed.as_millis(),
                "headlines fetched"
            ),
            Err(error) => tracing::warn!(
                target: TRACING_TARGET,
                error = %error,
                elapsed_ms = elapsed.as_millis(),
                "headline fetch failed"
            ),
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn articles_get_distinct_ids() {
        let first = Article::new("Wire", "One", "First", Article::now_timestamp());
        let second = Article::new("Wire", "Two", "Second", Article::now_timestamp());
        assert_ne!(first.id, second.id);
    }

    #[test]
    fn now_timestamp_is_utc() {
        assert!(Article::now_timestamp().ends_with('Z'));
    }
}
