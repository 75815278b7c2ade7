//! In-memory session store — sliding-expiry conversation history.

use async_trait::async_trait;
use beacon_core::error::SessionError;
use beacon_core::session::SessionStore;
use beacon_core::turn::Turn;
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

struct SessionEntry {
    turns: Vec<Turn>,
    expires_at: DateTime<Utc>,
}

/// Keyed, expiring store of recent conversation turns.
///
/// All mutation happens under one write lock over the map, which
/// serializes the read-modify-write per key and keeps the retention
/// and ordering invariants intact under concurrent appends. Expired
/// entries are reclaimed on the next append, so the map stays bounded
/// by the set of sessions active within one expiry window.
pub struct InMemorySessionStore {
    sessions: Arc<RwLock<HashMap<String, SessionEntry>>>,
    max_turns: usize,
    ttl: Duration,
}

impl InMemorySessionStore {
    /// Create a store with the standard retention (40 turns, 6 hours).
    pub fn new() -> Self {
        Self::with_limits(40, Duration::hours(6))
    }

    /// Create a store with explicit limits.
    pub fn with_limits(max_turns: usize, ttl: Duration) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            max_turns,
            ttl,
        }
    }

    /// Number of live (non-expired) sessions. Diagnostic only.
    pub async fn len(&self) -> usize {
        let now = Utc::now();
        self.sessions
            .read()
            .await
            .values()
            .filter(|e| e.expires_at > now)
            .count()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    fn name(&self) -> &str {
        "in_memory"
    }

    async fn get(&self, key: &str) -> Result<Vec<Turn>, SessionError> {
        let sessions = self.sessions.read().await;
        match sessions.get(key) {
            Some(entry) if entry.expires_at > Utc::now() => Ok(entry.turns.clone()),
            _ => Ok(Vec::new()),
        }
    }

    async fn append(
        &self,
        key: &str,
        user_turn: Turn,
        assistant_turn: Turn,
    ) -> Result<(), SessionError> {
        let mut sessions = self.sessions.write().await;
        let now = Utc::now();

        // Reclaim everything past its expiry while we hold the write
        // lock; an expired session is gone, not merely unreadable.
        sessions.retain(|_, entry| entry.expires_at > now);

        let entry = sessions.entry(key.to_string()).or_insert_with(|| {
            debug!(session = %key, "Creating session");
            SessionEntry {
                turns: Vec::new(),
                expires_at: now + self.ttl,
            }
        });

        entry.turns.push(user_turn);
        entry.turns.push(assistant_turn);

        // Trim oldest-first down to the retention limit.
        if entry.turns.len() > self.max_turns {
            let excess = entry.turns.len() - self.max_turns;
            entry.turns.drain(..excess);
        }

        // Sliding expiry: every append refreshes the window.
        entry.expires_at = now + self.ttl;

        Ok(())
    }
}
