//! Session store trait — short-term conversation memory.
//!
//! Sessions are keyed, expiring buckets of recent turns. The backing
//! store is injectable so orchestration logic never changes when the
//! store does (local map today, distributed cache later).

use async_trait::async_trait;

use crate::error::SessionError;
use crate::turn::Turn;

/// The shared bucket for callers with neither a session id nor a user
/// id. A documented collision: all anonymous callers converse in one
/// session.
pub const ANONYMOUS_SESSION_KEY: &str = "anonymous";

/// Derive the memory key for a request.
/// Priority: explicit session id, then user id, then the shared
/// anonymous key.
pub fn derive_session_key(session_id: Option<&str>, user_id: Option<&str>) -> String {
    session_id
        .filter(|s| !s.is_empty())
        .or(user_id.filter(|s| !s.is_empty()))
        .unwrap_or(ANONYMOUS_SESSION_KEY)
        .to_string()
}

/// Keyed, expiring store of recent conversation turns.
///
/// Implementations must serialize mutation per key so the turn-count
/// and ordering invariants hold under concurrent appends.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// A human-readable name for diagnostics.
    fn name(&self) -> &str;

    /// Get the ordered history for a key. Empty if absent or expired.
    async fn get(&self, key: &str) -> std::result::Result<Vec<Turn>, SessionError>;

    /// Append a user/assistant turn pair, trim to the retention limit
    /// (oldest first), and reset the sliding expiry.
    async fn append(
        &self,
        key: &str,
        user_turn: Turn,
        assistant_turn: Turn,
    ) -> std::result::Result<(), SessionError>;
}
