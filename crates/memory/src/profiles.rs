//! In-memory profile store.

use async_trait::async_trait;
use beacon_core::error::SessionError;
use beacon_core::profile::{ProfileStore, UserProfile};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Profile store backed by a map. Empty by default.
pub struct InMemoryProfileStore {
    profiles: Arc<RwLock<HashMap<String, UserProfile>>>,
}

impl InMemoryProfileStore {
    pub fn new() -> Self {
        Self {
            profiles: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub async fn insert(&self, user_id: impl Into<String>, profile: UserProfile) {
        self.profiles.write().await.insert(user_id.into(), profile);
    }
}

impl Default for InMemoryProfileStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProfileStore for InMemoryProfileStore {
    async fn get_by_user_id(&self, user_id: &str) -> Result<Option<UserProfile>, SessionError> {
        Ok(self.profiles.read().await.get(user_id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_profile_is_none() {
        let store = InMemoryProfileStore::new();
        assert!(store.get_by_user_id("u1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn insert_and_lookup() {
        let store = InMemoryProfileStore::new();
        store
            .insert(
                "u1",
                UserProfile {
                    role: "designer".into(),
                    department: None,
                    business_context: None,
                    communication_preferences: None,
                    prefers_simple_language: false,
                    preferred_reading_level: None,
                },
            )
            .await;

        let profile = store.get_by_user_id("u1").await.unwrap().unwrap();
        assert_eq!(profile.role, "designer");
    }
}
