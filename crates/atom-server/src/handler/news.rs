//! News headlines handler.

use aide::axum::ApiRouter;
use aide::transform::TransformOperation;
use axum::extract::State;
use axum::http::StatusCode;

use crate::extract::Json;
use crate::handler::Result;
use crate::handler::response::NewsFeed;
use crate::service::{NewsProxy, ProxySource, ServiceState};

/// Tracing target for news operations.
const TRACING_TARGET: &str = "atom_server::handler::news";

/// Returns the current headlines.
///
/// Never fails. When the upstream is down the feed holds a single placeholder
/// article from the `System` source.
#[tracing::instrument(skip_all)]
async fn get_news(State(news): State<NewsProxy>) -> Result<(StatusCode, Json<NewsFeed>)> {
    let headlines = news.headlines().await;

    if headlines.source == ProxySource::Fallback {
        tracing::warn!(target: TRACING_TARGET, "Serving placeholder headline");
    }

    tracing::debug!(
        target: TRACING_TARGET,
        source = %headlines.source,
        article_count = headlines.value.len(),
        "Headlines served"
    );

    let response = NewsFeed {
        articles: headlines.into_value(),
    };

    Ok((StatusCode::OK, Json(response)))
}

fn get_news_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Get news headlines")
        .description(
            "Returns the current top headlines. Responses are cached globally; when the \
             news provider is unavailable a single placeholder article is returned.",
        )
        .response::<200, Json<NewsFeed>>()
}

/// Returns routes for news headlines.
pub fn routes() -> ApiRouter<ServiceState> {
    use aide::axum::routing::*;

    ApiRouter::new()
        .api_route("/news", get_with(get_news, get_news_docs))
        .with_path_items(|item| item.tag("News"))
}

#[cfg(test)]
mod tests {
    use atom_test::MockNewsProvider;

    use super::*;
    use crate::handler::test::{TestCollaborators, create_test_server_with};
    use crate::service::NewsPlaceholder;

    #[tokio::test]
    async fn headlines_are_cached() -> anyhow::Result<()> {
        let provider = MockNewsProvider::default();
        let test = TestCollaborators::ready().with_news(provider.clone());
        let server = create_test_server_with(test, |_| routes())?;

        let first = server.get("/news").await;
        let second = server.get("/news").await;

        first.assert_status_ok();
        assert_eq!(first.text(), second.text());
        assert_eq!(first.json::<NewsFeed>().articles[0].headline, "Mock headline");
        assert_eq!(provider.calls(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn missing_api_key_serves_placeholder() -> anyhow::Result<()> {
        let provider = MockNewsProvider::failing("NEWS_API_KEY is not configured");
        let test = TestCollaborators::ready().with_news(provider.clone());
        let server = create_test_server_with(test, |_| routes())?;

        let response = server.get("/news").await;
        response.assert_status_ok();

        let feed = response.json::<NewsFeed>();
        assert_eq!(feed.articles.len(), 1);
        assert_eq!(feed.articles[0].source, NewsPlaceholder::SOURCE);
        assert_eq!(feed.articles[0].headline, NewsPlaceholder::HEADLINE);

        // The placeholder is never cached.
        server.get("/news").await.assert_status_ok();
        assert_eq!(provider.calls(), 2);

        Ok(())
    }
}
