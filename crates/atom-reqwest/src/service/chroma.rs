//! Chroma vector store client.

use atom_core::memory::{StoredDocument, VectorStore};
use serde::Deserialize;
use serde_json::{Map, Value, json};
use url::Url;

use crate::{Error, ReqwestClient};

/// Tracing target for vector store requests.
const TRACING_TARGET: &str = "atom_reqwest::chroma";

#[derive(Debug, Deserialize)]
struct CollectionPayload {
    id: String,
    name: String,
}

/// Response body of a collection `get` request.
#[derive(Debug, Default, Deserialize)]
struct RecordsPayload {
    #[serde(default)]
    documents: Option<Vec<Option<String>>>,
    #[serde(default)]
    metadatas: Option<Vec<Option<Map<String, Value>>>>,
}

impl RecordsPayload {
    /// Pairs documents with their metadata; missing entries become empty.
    fn into_documents(self) -> Vec<StoredDocument> {
        let documents = self.documents.unwrap_or_default();
        let mut metadatas = self.metadatas.unwrap_or_default().into_iter();

        documents
            .into_iter()
            .map(|content| StoredDocument {
                content: content.unwrap_or_default(),
                metadata: metadatas.next().flatten().unwrap_or_default(),
            })
            .collect()
    }
}

/// REST client for a Chroma server.
#[derive(Debug, Clone)]
pub struct ChromaClient {
    client: ReqwestClient,
    base_url: Url,
    collection: String,
}

impl ChromaClient {
    /// Creates a client for a single collection on the given server.
    pub fn new(
        client: ReqwestClient,
        base_url: &str,
        collection: impl Into<String>,
    ) -> crate::Result<Self> {
        let base_url = Url::parse(&format!("{}/", base_url.trim_end_matches('/')))?;
        Ok(Self {
            client,
            base_url,
            collection: collection.into(),
        })
    }

    fn endpoint(&self, path: &str) -> crate::Result<Url> {
        Ok(self.base_url.join(path)?)
    }

    async fn get_json<T>(&self, path: &str) -> crate::Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        let response = self
            .client
            .http()
            .get(self.endpoint(path)?)
            .send()
            .await?
            .error_for_status()?;
        Ok(response.json::<T>().await?)
    }

    async fn collection_id(&self) -> crate::Result<String> {
        let path = format!("api/v1/collections/{}", self.collection);
        let collection: CollectionPayload = self.get_json(&path).await?;

        tracing::trace!(
            target: TRACING_TARGET,
            collection = %collection.name,
            id = %collection.id,
            "resolved collection"
        );

        Ok(collection.id)
    }
}

#[async_trait::async_trait]
impl VectorStore for ChromaClient {
    async fn heartbeat(&self) -> atom_core::Result<()> {
        let _: Value = self.get_json("api/v1/heartbeat").await?;
        Ok(())
    }

    async fn list_collections(&self) -> atom_core::Result<Vec<String>> {
        let collections: Vec<CollectionPayload> = self.get_json("api/v1/collections").await?;
        Ok(collections.into_iter().map(|c| c.name).collect())
    }

    async fn documents(&self) -> atom_core::Result<Vec<StoredDocument>> {
        let id = self.collection_id().await?;
        let url = self
            .endpoint(&format!("api/v1/collections/{id}/get"))
            .map_err(Error::from)?;

        let records = self
            .client
            .http()
            .post(url)
            .json(&json!({ "include": ["documents", "metadatas"] }))
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(Error::from)?
            .json::<RecordsPayload>()
            .await
            .map_err(Error::from)?;

        let documents = records.into_documents();
        tracing::debug!(
            target: TRACING_TARGET,
            collection = %self.collection,
            count = documents.len(),
            "fetched documents"
        );

        Ok(documents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_pair_documents_with_metadata() -> anyhow::Result<()> {
        let payload: RecordsPayload = serde_json::from_value(json!({
            "ids": ["a", "b", "c"],
            "documents": ["first", null, "third"],
            "metadatas": [{ "timestamp": "2026-01-01T00:00:00Z" }, null]
        }))?;

        let documents = payload.into_documents();
        assert_eq!(documents.len(), 3);
        assert_eq!(documents[0].content, "first");
        assert_eq!(
            documents[0].timestamp().as_deref(),
            Some("2026-01-01T00:00:00Z")
        );
        assert_eq!(documents[1].content, "");
        assert!(documents[1].metadata.is_empty());
        assert!(documents[2].metadata.is_empty());
        Ok(())
    }

    #[test]
    fn test_endpoints_join_onto_base() -> anyhow::Result<()> {
        let client = ReqwestClient::new(Default::default())?;
        let chroma = ChromaClient::new(client, "http://localhost:8000/", "memory")?;
        let url = chroma.endpoint("api/v1/heartbeat")?;
        assert_eq!(url.as_str(), "http://localhost:8000/api/v1/heartbeat");
        Ok(())
    }
}
