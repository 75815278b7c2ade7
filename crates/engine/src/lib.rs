//! Chat orchestration pipeline for Beacon.
//!
//! `ChatOrchestrator` drives the full request lifecycle: validate the
//! inbound message, load session history, build the system prompt
//! (with optional tool augmentation), call the LLM, validate the
//! output (substituting a safe fallback when it fails), persist the
//! turn pair, and assemble resource/action suggestions. Replies go
//! back synchronously or as a chunked event stream.

pub mod fallback;
pub mod orchestrator;
pub mod prompt;
pub mod stream;
pub mod suggest;

pub use fallback::FallbackPicker;
pub use orchestrator::{ChatError, ChatOrchestrator, GENERATION_FAILURE_MESSAGE};
pub use prompt::PromptBuilder;
pub use stream::{ChatStreamEvent, chunk_text};
pub use suggest::{ResourceSuggester, suggest_actions};
