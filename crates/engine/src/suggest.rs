//! Resource and action suggestions.
//!
//! Both run after the reply is final and are independent of the
//! validation outcome: a fallback reply still gets suggestions.

use beacon_core::catalog::ContentRepository;
use beacon_core::chat::{ExperienceLevel, SuggestedResource};
use std::sync::Arc;
use tracing::warn;

/// Tokens ignored during keyword extraction.
const STOP_WORDS: &[&str] = &[
    "the", "and", "for", "with", "that", "this", "what", "whats", "how", "why", "when", "where",
    "who", "your", "you", "are", "was", "were", "can", "could", "should", "would", "about", "like",
    "have", "has", "had", "will", "from", "but", "not", "all", "any", "get", "got", "its", "our",
    "out", "into", "them", "they", "there", "here", "been", "being", "does", "did", "doing",
];

const MAX_KEYWORDS: usize = 5;
const MAX_RESOURCES: usize = 3;
const MAX_ACTIONS: usize = 4;

/// Extract up to 5 search keywords from a message.
///
/// Lowercased, split on whitespace and punctuation, stop words and
/// short tokens dropped, first occurrence order preserved.
pub fn extract_keywords(message: &str) -> Vec<String> {
    let mut keywords: Vec<String> = Vec::new();
    for token in message
        .to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| t.len() > 2)
        .filter(|t| !STOP_WORDS.contains(t))
    {
        if !keywords.iter().any(|k| k == token) {
            keywords.push(token.to_string());
        }
        if keywords.len() == MAX_KEYWORDS {
            break;
        }
    }
    keywords
}

/// Looks up catalog content relevant to a message.
pub struct ResourceSuggester {
    repository: Arc<dyn ContentRepository>,
}

impl ResourceSuggester {
    pub fn new(repository: Arc<dyn ContentRepository>) -> Self {
        Self { repository }
    }

    /// Up to 3 published items matching the message keywords.
    ///
    /// Repository failures degrade to no suggestions; they never fail
    /// the request.
    pub async fn suggest(
        &self,
        message: &str,
        level: Option<ExperienceLevel>,
    ) -> Vec<SuggestedResource> {
        let keywords = extract_keywords(message);
        if keywords.is_empty() {
            return Vec::new();
        }

        let items = match self.repository.query_published(level, &keywords).await {
            Ok(items) => items,
            Err(e) => {
                warn!(error = %e, "Content query failed, returning no suggestions");
                return Vec::new();
            }
        };

        items
            .into_iter()
            .take(MAX_RESOURCES)
            .map(|item| SuggestedResource {
                id: item.id,
                title: item.title,
                resource_type: item.resource_type,
                url: item.url,
                description: item.description,
            })
            .collect()
    }
}

/// Keyword-triggered follow-up actions, capped at 4.
///
/// Fixed phrase mappings first, then an experience-level-specific
/// addition, then a generic prompt if nothing else matched.
pub fn suggest_actions(message: &str, level: Option<ExperienceLevel>) -> Vec<String> {
    let lowered = message.to_lowercase();
    let mut actions: Vec<String> = Vec::new();

    let phrase_map: &[(&[&str], &str)] = &[
        (&["interview"], "Practice common interview questions out loud"),
        (&["resume", "cv"], "Update your resume with recent accomplishments"),
        (
            &["salary", "compensation", "raise"],
            "Research market compensation benchmarks for your role",
        ),
        (
            &["promotion", "promoted"],
            "Draft a promotion case built on concrete wins",
        ),
        (
            &["feedback", "review"],
            "Ask a trusted colleague for candid feedback",
        ),
        (&["goal", "goals"], "Set one measurable goal for this quarter"),
    ];

    for (triggers, action) in phrase_map {
        if triggers.iter().any(|t| lowered.contains(t)) {
            actions.push((*action).to_string());
        }
    }

    let level_action = match level {
        Some(ExperienceLevel::Entry) | Some(ExperienceLevel::Junior) => {
            Some("Explore the foundations learning path")
        }
        Some(ExperienceLevel::Mid) => Some("Look for a stretch assignment on your team"),
        Some(ExperienceLevel::Senior) | Some(ExperienceLevel::Principal) => {
            Some("Consider mentoring a junior colleague")
        }
        Some(ExperienceLevel::Executive) => Some("Block time for strategic planning this week"),
        None => None,
    };
    if let Some(action) = level_action {
        actions.push(action.to_string());
    }

    if actions.is_empty() {
        actions.push("Share more detail so I can tailor suggestions".to_string());
    }

    actions.truncate(MAX_ACTIONS);
    actions
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use beacon_core::catalog::ContentItem;
    use beacon_core::error::SessionError;
    use chrono::Utc;

    #[test]
    fn keywords_are_lowercased_and_filtered() {
        let kws = extract_keywords("How should I prepare for my Salary Negotiation?");
        assert_eq!(kws, vec!["prepare", "salary", "negotiation"]);
    }

    #[test]
    fn keywords_capped_at_five() {
        let kws = extract_keywords("alpha bravo charlie delta echo foxtrot golf");
        assert_eq!(kws.len(), 5);
        assert_eq!(kws[0], "alpha");
    }

    #[test]
    fn keywords_deduplicated() {
        let kws = extract_keywords("career career career growth");
        assert_eq!(kws, vec!["career", "growth"]);
    }

    #[test]
    fn short_tokens_dropped() {
        let kws = extract_keywords("go to a UK job");
        assert_eq!(kws, vec!["job"]);
    }

    struct FixedRepo(Vec<ContentItem>);

    #[async_trait]
    impl ContentRepository for FixedRepo {
        async fn query_published(
            &self,
            _level: Option<ExperienceLevel>,
            _keywords: &[String],
        ) -> Result<Vec<ContentItem>, SessionError> {
            Ok(self.0.clone())
        }
    }

    struct FailingRepo;

    #[async_trait]
    impl ContentRepository for FailingRepo {
        async fn query_published(
            &self,
            _level: Option<ExperienceLevel>,
            _keywords: &[String],
        ) -> Result<Vec<ContentItem>, SessionError> {
            Err(SessionError::Storage("down".into()))
        }
    }

    fn item(id: &str) -> ContentItem {
        ContentItem {
            id: id.into(),
            title: format!("Title {id}"),
            body: String::new(),
            keywords: vec![],
            resource_type: "article".into(),
            url: format!("/content/{id}"),
            description: "desc".into(),
            experience_levels: vec![],
            published: true,
            published_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn suggestions_capped_at_three() {
        let repo = FixedRepo(vec![item("a"), item("b"), item("c"), item("d")]);
        let suggester = ResourceSuggester::new(Arc::new(repo));
        let results = suggester.suggest("career growth planning", None).await;
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].id, "a");
    }

    #[tokio::test]
    async fn no_keywords_means_no_query() {
        let suggester = ResourceSuggester::new(Arc::new(FailingRepo));
        // Every token is a stop word or too short, so the failing repo
        // is never reached.
        let results = suggester.suggest("how are you", None).await;
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn repository_failure_degrades_to_empty() {
        let suggester = ResourceSuggester::new(Arc::new(FailingRepo));
        let results = suggester.suggest("salary negotiation", None).await;
        assert!(results.is_empty());
    }

    #[test]
    fn phrase_mappings_fire() {
        let actions = suggest_actions("I want a promotion and a raise", None);
        assert!(actions.iter().any(|a| a.contains("compensation")));
        assert!(actions.iter().any(|a| a.contains("promotion case")));
    }

    #[test]
    fn level_specific_action_added() {
        let actions = suggest_actions("thinking about goals", Some(ExperienceLevel::Senior));
        assert!(actions.iter().any(|a| a.contains("mentoring")));
    }

    #[test]
    fn actions_capped_at_four() {
        let actions = suggest_actions(
            "interview resume salary promotion feedback goals",
            Some(ExperienceLevel::Mid),
        );
        assert_eq!(actions.len(), 4);
    }

    #[test]
    fn generic_action_when_nothing_matches() {
        let actions = suggest_actions("hello there", None);
        assert_eq!(actions.len(), 1);
        assert!(actions[0].contains("more detail"));
    }
}
