//! LLM gateway trait — the abstraction over chat-completion backends.
//!
//! The orchestrator builds an ordered message list (system prompt,
//! history, latest user message) and calls `complete()` without
//! knowing which provider is behind it.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::LlmError;
use crate::turn::{Turn, TurnRole};

/// Message role as the provider sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

/// One message in a completion request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }
}

impl From<&Turn> for ChatMessage {
    fn from(turn: &Turn) -> Self {
        match turn.role {
            TurnRole::User => Self::user(&turn.content),
            TurnRole::Assistant => Self::assistant(&turn.content),
        }
    }
}

/// The completion seam. One method: ordered messages in, reply text out.
#[async_trait]
pub trait LlmGateway: Send + Sync {
    /// A human-readable name for this backend.
    fn name(&self) -> &str;

    /// Execute a chat completion.
    async fn complete(
        &self,
        messages: &[ChatMessage],
    ) -> std::result::Result<String, LlmError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn turn_maps_to_chat_message() {
        let msg: ChatMessage = (&Turn::user("hi")).into();
        assert_eq!(msg.role, ChatRole::User);
        assert_eq!(msg.content, "hi");

        let msg: ChatMessage = (&Turn::assistant("hello")).into();
        assert_eq!(msg.role, ChatRole::Assistant);
    }

    #[test]
    fn role_serializes_lowercase() {
        let msg = ChatMessage::system("You are a mentor.");
        let json = serde_json::to_string(&msg).unwrap();
        assert!(json.contains(r#""role":"system""#));
    }
}
