//! Streaming protocol events and text chunking.
//!
//! The streaming path is two-phase by design: the reply is fully
//! generated and validated first, then framed as incremental events.
//! Upgrading to real provider token streaming is a future change.

use beacon_core::chat::SuggestedResource;
use serde_json::json;

/// Events emitted over the `/chat-stream` SSE connection.
///
/// Wire protocol, in order: one `message` per chunk, one
/// `suggestions`, one terminal `done`. A failure anywhere produces a
/// single `error` and ends the stream.
#[derive(Debug, Clone)]
pub enum ChatStreamEvent {
    /// One chunk of the reply text.
    Message { delta: String },

    /// The same resource/action payload as the synchronous path.
    Suggestions {
        suggested_resources: Vec<SuggestedResource>,
        suggested_actions: Vec<String>,
    },

    /// The stream completed normally.
    Done,

    /// The stream failed; no more events follow.
    Error { message: String },
}

impl ChatStreamEvent {
    /// SSE event name for this event type.
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::Message { .. } => "message",
            Self::Suggestions { .. } => "suggestions",
            Self::Done => "done",
            Self::Error { .. } => "error",
        }
    }

    /// JSON payload for the SSE `data:` line.
    pub fn data(&self) -> serde_json::Value {
        match self {
            Self::Message { delta } => json!({ "delta": delta }),
            Self::Suggestions {
                suggested_resources,
                suggested_actions,
            } => json!({
                "suggestedResources": suggested_resources,
                "suggestedActions": suggested_actions,
            }),
            Self::Done => json!({}),
            Self::Error { message } => json!({ "message": message }),
        }
    }
}

/// Split text into chunks by greedy word-packing.
///
/// Words are never split; a single word longer than `max_len` becomes
/// its own oversized chunk. Rejoining the chunks with single spaces
/// reproduces the whitespace-normalized input.
pub fn chunk_text(text: &str, max_len: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
        } else if current.len() + 1 + word.len() <= max_len {
            current.push(' ');
            current.push_str(word);
        } else {
            chunks.push(std::mem::take(&mut current));
            current.push_str(word);
        }
    }

    if !current.is_empty() {
        chunks.push(current);
    }

    chunks
}
