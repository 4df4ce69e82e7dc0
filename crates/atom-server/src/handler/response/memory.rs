//! Memory response types.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::service::RecentMemory;

/// One remembered utterance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct MemoryItem {
    pub content: String,
    pub timestamp: String,
}

impl From<RecentMemory> for MemoryItem {
    fn from(memory: RecentMemory) -> Self {
        Self {
            content: memory.content,
            timestamp: memory.timestamp,
        }
    }
}

/// Recent memory response.
///
/// A store failure is reported in `error` next to an empty list.
#[must_use]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct RecentMemories {
    pub memory: Vec<MemoryItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
