//! In-memory content catalog backing resource suggestions.

use async_trait::async_trait;
use beacon_core::catalog::{ContentItem, ContentRepository};
use beacon_core::chat::ExperienceLevel;
use beacon_core::error::SessionError;
use chrono::{Duration, Utc};
use std::sync::Arc;
use tokio::sync::RwLock;

/// A content repository that stores items in a Vec.
/// Useful for testing and deployments without a catalog database.
pub struct InMemoryContentRepository {
    items: Arc<RwLock<Vec<ContentItem>>>,
}

impl InMemoryContentRepository {
    pub fn new() -> Self {
        Self {
            items: Arc::new(RwLock::new(Vec::new())),
        }
    }

    pub fn with_items(items: Vec<ContentItem>) -> Self {
        Self {
            items: Arc::new(RwLock::new(items)),
        }
    }

    pub async fn insert(&self, item: ContentItem) {
        self.items.write().await.push(item);
    }
}

impl Default for InMemoryContentRepository {
    fn default() -> Self {
        Self::new()
    }
}

/// Whether an item matches any of the extracted keywords.
///
/// Keywords arrive lowercased; stored titles and bodies are compared
/// as stored, via substring containment. Intentionally ported as-is —
/// lowercase the stored side here if mixed-case matching is confirmed
/// as the intent.
fn matches_keywords(item: &ContentItem, keywords: &[String]) -> bool {
    keywords.iter().any(|kw| {
        item.title.contains(kw.as_str())
            || item.body.contains(kw.as_str())
            || item.keywords.iter().any(|k| k.contains(kw.as_str()))
    })
}

#[async_trait]
impl ContentRepository for InMemoryContentRepository {
    async fn query_published(
        &self,
        level: Option<ExperienceLevel>,
        keywords: &[String],
    ) -> Result<Vec<ContentItem>, SessionError> {
        let items = self.items.read().await;

        let mut results: Vec<ContentItem> = items
            .iter()
            .filter(|item| item.published)
            .filter(|item| level.is_none_or(|l| item.targets(l)))
            .filter(|item| matches_keywords(item, keywords))
            .cloned()
            .collect();

        // Most recently published first.
        results.sort_by(|a, b| b.published_at.cmp(&a.published_at));

        Ok(results)
    }
}

/// A small default catalog so a fresh deployment has something to
/// suggest.
pub fn seed_catalog() -> Vec<ContentItem> {
    let now = Utc::now();
    vec![
        ContentItem {
            id: "career-ladder-guide".into(),
            title: "Mapping your career ladder".into(),
            body: "How to plan promotion milestones, build visibility, and track growth goals."
                .into(),
            keywords: vec!["career".into(), "promotion".into(), "growth".into()],
            resource_type: "guide".into(),
            url: "/content/career-ladder-guide".into(),
            description: "A step-by-step guide to planning your next career move.".into(),
            experience_levels: vec![],
            published: true,
            published_at: now - Duration::days(3),
        },
        ContentItem {
            id: "feedback-conversations".into(),
            title: "Running difficult feedback conversations".into(),
            body: "Scripts and framing for giving feedback to peers and managers.".into(),
            keywords: vec!["feedback".into(), "communication".into(), "conflict".into()],
            resource_type: "article".into(),
            url: "/content/feedback-conversations".into(),
            description: "Practical framing for hard conversations at work.".into(),
            experience_levels: vec![
                ExperienceLevel::Mid,
                ExperienceLevel::Senior,
                ExperienceLevel::Principal,
            ],
            published: true,
            published_at: now - Duration::days(10),
        },
        ContentItem {
            id: "first-90-days".into(),
            title: "Your first 90 days in a new role".into(),
            body: "Onboarding priorities, early wins, and relationship building for a new job."
                .into(),
            keywords: vec!["onboarding".into(), "job".into(), "new role".into()],
            resource_type: "guide".into(),
            url: "/content/first-90-days".into(),
            description: "Make a strong start in a new position.".into(),
            experience_levels: vec![ExperienceLevel::Entry, ExperienceLevel::Junior],
            published: true,
            published_at: now - Duration::days(30),
        },
        ContentItem {
            id: "salary-negotiation".into(),
            title: "Negotiating salary with confidence".into(),
            body: "Research benchmarks, anchor high, and practice your negotiation script.".into(),
            keywords: vec!["salary".into(), "negotiation".into(), "compensation".into()],
            resource_type: "video".into(),
            url: "/content/salary-negotiation".into(),
            description: "A short course on compensation conversations.".into(),
            experience_levels: vec![],
            published: true,
            published_at: now - Duration::days(1),
        },
    ]
}
