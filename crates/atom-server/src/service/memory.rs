use atom_core::Result;
use atom_core::memory::{MemoryService, StoredDocument};
use jiff::Timestamp;

/// Number of entries returned by [`MemoryFeed::recent`].
const DEFAULT_LIMIT: usize = 15;

/// A remembered utterance with its timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecentMemory {
    pub content: String,
    pub timestamp: String,
}

impl RecentMemory {
    fn from_document(document: StoredDocument, now: &str) -> Self {
        let timestamp = document.timestamp().unwrap_or_else(|| now.to_owned());
        Self {
            content: document.content,
            timestamp,
        }
    }
}

/// Newest-first view over the vector store's documents.
#[derive(Debug, Clone)]
pub struct MemoryFeed {
    memory: Option<MemoryService>,
    limit: usize,
}

impl MemoryFeed {
    pub fn new(memory: Option<MemoryService>) -> Self {
        Self {
            memory,
            limit: DEFAULT_LIMIT,
        }
    }

    /// Overrides the number of returned entries.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// The most recent entries, newest first.
    ///
    /// Entries without a timestamp are stamped with the current time and so
    /// sort to the top.
    pub async fn recent(&self) -> Result<Vec<RecentMemory>> {
        let memory = self.memory.as_ref().ok_or_else(|| {
            atom_core::Error::service_unavailable().with_message("Memory store not initialized")
        })?;

        let now = Timestamp::now().to_string();
        let mut entries: Vec<RecentMemory> = memory
            .documents()
            .await?
            .into_iter()
            .map(|document| RecentMemory::from_document(document, &now))
            .collect();

        entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        entries.truncate(self.limit);
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use atom_test::MockVectorStore;

    use super::*;

    fn document(content: &str, timestamp: Option<&str>) -> StoredDocument {
        let document = StoredDocument::new(content);
        match timestamp {
            Some(timestamp) => document.with_metadata("timestamp", timestamp),
            None => document,
        }
    }

    #[tokio::test]
    async fn newest_first_and_limited() -> Result<()> {
        let documents = (1..=20)
            .map(|day| {
                let timestamp = format!("2026-01-{day:02}T00:00:00");
                document(&format!("note {day}"), Some(timestamp.as_str()))
            })
            .collect();
        let feed = MemoryFeed::new(Some(MemoryService::new(
            MockVectorStore::new().with_documents(documents),
        )));

        let recent = feed.recent().await?;
        assert_eq!(recent.len(), 15);
        assert_eq!(recent[0].content, "note 20");
        assert_eq!(recent[14].content, "note 6");
        Ok(())
    }

    #[tokio::test]
    async fn missing_timestamp_sorts_first() -> Result<()> {
        let documents = vec![
            document("old", Some("2020-01-01T00:00:00")),
            document("undated", None),
        ];
        let feed = MemoryFeed::new(Some(MemoryService::new(
            MockVectorStore::new().with_documents(documents),
        )))
        .with_limit(5);

        let recent = feed.recent().await?;
        assert_eq!(recent[0].content, "undated");
        assert!(recent[0].timestamp.starts_with("20"));
        Ok(())
    }

    #[tokio::test]
    async fn offline_store_fails() {
        let feed = MemoryFeed::new(Some(MemoryService::new(MockVectorStore::offline())));
        assert!(feed.recent().await.is_err());
        assert!(MemoryFeed::new(None).recent().await.is_err());
    }
}
