//! User profile types and the profile store seam.
//!
//! Profiles personalize prompt construction and post-validation tone.
//! How profiles are persisted is out of scope — the pipeline only
//! looks them up by user id.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::SessionError;

/// A user's business profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// Job role (e.g., "product manager").
    pub role: String,

    /// Department or team, if known.
    #[serde(default)]
    pub department: Option<String>,

    /// Free-text business context injected into the prompt.
    #[serde(default)]
    pub business_context: Option<String>,

    /// Free-text communication-preference hints.
    #[serde(default)]
    pub communication_preferences: Option<String>,

    /// When set, the user always gets simple-language replies.
    #[serde(default)]
    pub prefers_simple_language: bool,

    /// Preferred reading grade level (1–12-ish scale).
    #[serde(default)]
    pub preferred_reading_level: Option<u8>,
}

/// Lookup seam for user profiles.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Fetch the profile for a user id, if one exists.
    async fn get_by_user_id(
        &self,
        user_id: &str,
    ) -> std::result::Result<Option<UserProfile>, SessionError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_deserializes_with_defaults() {
        let json = r#"{"role": "engineer"}"#;
        let p: UserProfile = serde_json::from_str(json).unwrap();
        assert_eq!(p.role, "engineer");
        assert!(!p.prefers_simple_language);
        assert!(p.preferred_reading_level.is_none());
    }
}
