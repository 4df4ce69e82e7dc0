//! NewsAPI top-headlines client.

use atom_core::news::{Article, NewsProvider};
use serde::Deserialize;
use url::Url;

use crate::{Error, ReqwestClient};

/// Tracing target for news requests.
const TRACING_TARGET: &str = "atom_reqwest::news";

/// Number of headlines requested per fetch.
const PAGE_SIZE: u32 = 10;

/// Response body of the top-headlines endpoint.
#[derive(Debug, Deserialize)]
struct HeadlinesPayload {
    articles: Option<Vec<RawArticle>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawArticle {
    #[serde(default)]
    source: Option<RawSource>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    published_at: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawSource {
    #[serde(default)]
    name: Option<String>,
}

/// Treats empty strings the same as missing values.
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.is_empty())
}

impl From<RawArticle> for Article {
    fn from(raw: RawArticle) -> Self {
        let source = non_empty(raw.source.and_then(|source| source.name));
        Article::new(
            source.unwrap_or_else(|| "Unknown".to_owned()),
            non_empty(raw.title).unwrap_or_else(|| "Untitled".to_owned()),
            non_empty(raw.description).unwrap_or_else(|| "No summary available.".to_owned()),
            non_empty(raw.published_at).unwrap_or_else(Article::now_timestamp),
        )
    }
}

/// Normalizes a top-headlines response body into articles.
///
/// Fails if the body has no `articles` field.
fn articles_from_payload(body: serde_json::Value) -> atom_core::Result<Vec<Article>> {
    let payload: HeadlinesPayload = serde_json::from_value(body).map_err(Error::from)?;
    let articles = payload.articles.ok_or_else(|| {
        atom_core::Error::external_error().with_message("Invalid News API response")
    })?;

    Ok(articles.into_iter().map(Article::from).collect())
}

/// Headline client for NewsAPI.
#[derive(Clone)]
pub struct NewsApiClient {
    client: ReqwestClient,
    endpoint: Url,
    api_key: Option<String>,
    country: String,
}

impl std::fmt::Debug for NewsApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewsApiClient")
            .field("endpoint", &self.endpoint)
            .field("country", &self.country)
            .field("has_api_key", &self.api_key.is_some())
            .finish_non_exhaustive()
    }
}

impl NewsApiClient {
    /// Creates a client against the given endpoint with no API key.
    pub fn new(client: ReqwestClient, endpoint: &str) -> crate::Result<Self> {
        Ok(Self {
            client,
            endpoint: Url::parse(endpoint)?,
            api_key: None,
            country: "us".to_owned(),
        })
    }

    /// Sets the API key. Empty keys count as missing.
    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = non_empty(api_key);
        self
    }

    /// Sets the headline country.
    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = country.into();
        self
    }
}

#[async_trait::async_trait]
impl NewsProvider for NewsApiClient {
    async fn headlines(&self) -> atom_core::Result<Vec<Article>> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Err(atom_core::Error::configuration().with_message("NEWS_API_KEY is not set"));
        };

        tracing::debug!(
            target: TRACING_TARGET,
            endpoint = %self.endpoint,
            country = %self.country,
            "requesting headlines"
        );

        let page_size = PAGE_SIZE.to_string();
        let response = self
            .client
            .http()
            .get(self.endpoint.clone())
            .query(&[
                ("language", "en"),
                ("pageSize", page_size.as_str()),
                ("country", self.country.as_str()),
                ("apiKey", api_key),
            ])
            .send()
            .await
            .map_err(Error::from)?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(
                target: TRACING_TARGET,
                status = status.as_u16(),
                "headline request rejected"
            );
            return Err(
                atom_core::Error::external_error().with_message("Failed to fetch news feed")
            );
        }

        let body = response
            .json::<serde_json::Value>()
            .await
            .map_err(Error::from)?;
        articles_from_payload(body)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_articles_fill_missing_fields() -> anyhow::Result<()> {
        let body = json!({
            "status": "ok",
            "articles": [
                {
                    "source": { "id": null, "name": "Wire" },
                    "title": "Markets rally",
                    "description": "Stocks closed higher.",
                    "publishedAt": "2026-10-16T08:00:00Z"
                },
                {
                    "source": { "id": null, "name": null },
                    "title": "",
                    "description": null
                }
            ]
        });

        let articles = articles_from_payload(body)?;
        assert_eq!(articles.len(), 2);

        assert_eq!(articles[0].source, "Wire");
        assert_eq!(articles[0].headline, "Markets rally");
        assert_eq!(articles[0].timestamp, "2026-10-16T08:00:00Z");

        assert_eq!(articles[1].source, "Unknown");
        assert_eq!(articles[1].headline, "Untitled");
        assert_eq!(articles[1].summary, "No summary available.");
        assert!(articles[1].timestamp.ends_with('Z'));
        assert_ne!(articles[0].id, articles[1].id);
        Ok(())
    }

    #[test]
    fn test_missing_articles_field_is_invalid() {
        let err = articles_from_payload(json!({ "status": "error" })).unwrap_err();
        assert_eq!(err.to_string(), "Invalid News API response");
    }

    #[tokio::test]
    async fn test_missing_api_key_fails_without_request() -> anyhow::Result<()> {
        let client = ReqwestClient::new(Default::default())?;
        let news = NewsApiClient::new(client, "http://127.0.0.1:9/top-headlines")?
            .with_api_key(Some(String::new()));

        let err = news.headlines().await.unwrap_err();
        assert_eq!(err.to_string(), "NEWS_API_KEY is not set");
        Ok(())
    }
}
