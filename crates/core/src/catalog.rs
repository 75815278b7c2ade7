//! Content catalog types and the repository seam.
//!
//! The catalog backs resource suggestions. Indexing and persistence
//! are out of scope; the pipeline asks for published items matching a
//! keyword set and maps the top hits into the response.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::chat::ExperienceLevel;
use crate::error::SessionError;

/// A published content item (article, guide, video, ...).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentItem {
    pub id: String,
    pub title: String,
    pub body: String,

    /// Curated keyword list for matching.
    #[serde(default)]
    pub keywords: Vec<String>,

    /// "article", "guide", "video", ...
    pub resource_type: String,

    pub url: String,
    pub description: String,

    /// Experience levels this item targets; empty means all.
    #[serde(default)]
    pub experience_levels: Vec<ExperienceLevel>,

    pub published: bool,
    pub published_at: DateTime<Utc>,
}

impl ContentItem {
    /// Whether this item targets the given experience level.
    /// Items with no explicit targeting match everyone.
    pub fn targets(&self, level: ExperienceLevel) -> bool {
        self.experience_levels.is_empty() || self.experience_levels.contains(&level)
    }
}

/// Query seam for the content catalog.
#[async_trait]
pub trait ContentRepository: Send + Sync {
    /// Return published items matching any of the extracted keywords,
    /// optionally filtered by experience level, ranked by publish
    /// recency descending.
    async fn query_published(
        &self,
        level: Option<ExperienceLevel>,
        keywords: &[String],
    ) -> std::result::Result<Vec<ContentItem>, SessionError>;
}
