//! Chat request/response value objects.
//!
//! These are the wire-facing types for the `/chat` endpoints. Field
//! names are camelCase on the wire to match the web client.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::validation::ValidationResult;

/// The caller's self-reported experience level, ordered from most
/// junior to most senior. Drives prompt focus, content filtering, and
/// fallback tone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExperienceLevel {
    Entry,
    Junior,
    Mid,
    Senior,
    Principal,
    Executive,
}

/// Which assistant behavior the client asked for.
///
/// Modeled as an exhaustive enum rather than a free-form string so the
/// prompt builder dispatches over it exactly once.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentMode {
    /// Weather/forecast-augmented guidance
    Forecast,
    /// Personalized recommendations
    Recommendation,
    /// Learning-resource discovery
    Resources,
    /// General mentoring conversation
    #[default]
    Default,
}

/// An inbound chat message.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    /// The user's message text.
    pub message: String,

    /// Optional identity of the caller.
    #[serde(default)]
    pub user_id: Option<String>,

    /// Optional session identifier for conversation continuity.
    #[serde(default)]
    pub session_id: Option<String>,

    /// Optional experience level.
    #[serde(default)]
    pub experience_level: Option<ExperienceLevel>,

    /// Optional agent mode. Absent means `AgentMode::Default`.
    #[serde(default)]
    pub agent_mode: Option<AgentMode>,
}

/// A content item surfaced alongside a reply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestedResource {
    pub id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub resource_type: String,
    pub url: String,
    pub description: String,
}

/// Snapshot of the post-generation validation result attached to a
/// response. Read-only quality signal for the client.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentQuality {
    pub compliance_score: i32,
    pub quality_level: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

impl ContentQuality {
    /// Snapshot the fields a client cares about from a validation result.
    pub fn from_validation(result: &ValidationResult) -> Self {
        Self {
            compliance_score: result.compliance_score,
            quality_level: result.quality_level.clone(),
            warnings: result.warnings.clone(),
        }
    }
}

/// The assembled reply to a chat request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    /// The assistant's reply text.
    pub message: String,

    /// Always "assistant".
    pub role: String,

    /// When the reply was assembled.
    pub timestamp: DateTime<Utc>,

    /// Up to 3 relevant content items.
    pub suggested_resources: Vec<SuggestedResource>,

    /// Up to 4 follow-up action prompts.
    pub suggested_actions: Vec<String>,

    /// Quality snapshot from post-generation validation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_quality: Option<ContentQuality>,
}

impl ChatResponse {
    /// Build a response with the standard assistant role and a fresh
    /// timestamp.
    pub fn assistant(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            role: "assistant".into(),
            timestamp: Utc::now(),
            suggested_resources: Vec::new(),
            suggested_actions: Vec::new(),
            content_quality: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_deserializes_camel_case() {
        let json = r#"{
            "message": "How do I prepare for a promotion?",
            "userId": "u-1",
            "sessionId": "s-1",
            "experienceLevel": "senior",
            "agentMode": "recommendation"
        }"#;
        let req: ChatRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.user_id.as_deref(), Some("u-1"));
        assert_eq!(req.experience_level, Some(ExperienceLevel::Senior));
        assert_eq!(req.agent_mode, Some(AgentMode::Recommendation));
    }

    #[test]
    fn request_optional_fields_default() {
        let req: ChatRequest = serde_json::from_str(r#"{"message": "hi"}"#).unwrap();
        assert!(req.user_id.is_none());
        assert!(req.session_id.is_none());
        assert!(req.experience_level.is_none());
        assert!(req.agent_mode.is_none());
    }

    #[test]
    fn response_serializes_camel_case() {
        let mut resp = ChatResponse::assistant("hello");
        resp.suggested_actions.push("Explore the catalog".into());
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("suggestedResources"));
        assert!(json.contains("suggestedActions"));
        assert!(json.contains(r#""role":"assistant""#));
    }

    #[test]
    fn experience_levels_are_ordered() {
        assert!(ExperienceLevel::Entry < ExperienceLevel::Junior);
        assert!(ExperienceLevel::Senior < ExperienceLevel::Executive);
    }

    #[test]
    fn resource_type_serializes_as_type() {
        let res = SuggestedResource {
            id: "1".into(),
            title: "Negotiation basics".into(),
            resource_type: "article".into(),
            url: "/content/1".into(),
            description: "A primer".into(),
        };
        let json = serde_json::to_string(&res).unwrap();
        assert!(json.contains(r#""type":"article""#));
    }
}
