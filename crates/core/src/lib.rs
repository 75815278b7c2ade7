//! Core domain types and traits for Beacon.
//!
//! This crate defines the value objects that flow through the chat
//! pipeline (requests, turns, validation results, responses) and the
//! trait seams behind which every external collaborator sits: the
//! session store, the guardrails validator, the LLM gateway, the
//! profile store, and the content catalog.
//!
//! No I/O happens here — implementations live in their own crates.

pub mod catalog;
pub mod chat;
pub mod error;
pub mod llm;
pub mod profile;
pub mod session;
pub mod turn;
pub mod validation;

pub use catalog::{ContentItem, ContentRepository};
pub use chat::{
    AgentMode, ChatRequest, ChatResponse, ContentQuality, ExperienceLevel, SuggestedResource,
};
pub use error::{GuardrailError, LlmError, SessionError, ToolError};
pub use llm::{ChatMessage, ChatRole, LlmGateway};
pub use profile::{ProfileStore, UserProfile};
pub use session::SessionStore;
pub use turn::{Turn, TurnRole};
pub use validation::{
    CommunicationLevel, ContentValidator, ValidationMetrics, ValidationRequest, ValidationResult,
};
