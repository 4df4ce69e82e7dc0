//! News response types.

use atom_core::news::Article;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Headline feed response.
#[must_use]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct NewsFeed {
    /// Current headlines, or a single placeholder when the feed is down.
    pub articles: Vec<Article>,
}
