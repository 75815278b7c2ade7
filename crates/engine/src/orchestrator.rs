//! The chat request lifecycle.
//!
//! One request flows Received → PreValidated → HistoryLoaded →
//! PromptBuilt → Generated → PostValidated → Persisted → Assembled →
//! Returned (or Streamed). Pre-validation rejection short-circuits
//! everything after it: memory, tools, and the model are never touched
//! for a rejected message.

use beacon_core::chat::{ChatRequest, ChatResponse, ContentQuality};
use beacon_core::error::{GuardrailError, LlmError, SessionError};
use beacon_core::llm::{ChatMessage, LlmGateway};
use beacon_core::profile::ProfileStore;
use beacon_core::session::{SessionStore, derive_session_key};
use beacon_core::turn::Turn;
use beacon_core::validation::{CommunicationLevel, ContentValidator, ValidationRequest};
use beacon_tools::ToolAugmenter;
use chrono::Utc;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::mpsc;
use tracing::{error, info, warn};

use crate::fallback::FallbackPicker;
use crate::prompt::PromptBuilder;
use crate::stream::{ChatStreamEvent, chunk_text};
use crate::suggest::{ResourceSuggester, suggest_actions};

/// Fixed apologetic reply used when the model call fails.
pub const GENERATION_FAILURE_MESSAGE: &str = "I'm sorry, I wasn't able to put together a \
     response just now. Please try again in a moment.";

/// Fixed rephrasing suggestions returned with a validation rejection.
const REPHRASING_SUGGESTIONS: &[&str] = &[
    "Try rephrasing your question in different words",
    "Keep the message focused on a single topic",
    "Avoid including sensitive personal information",
];

/// Why a chat request did not produce a normal reply.
#[derive(Debug, Error)]
pub enum ChatError {
    /// The inbound message failed pre-validation. User-visible 400.
    #[error("message rejected by validation")]
    Rejected {
        errors: Vec<String>,
        suggestions: Vec<String>,
    },

    /// The model call failed. User-visible 500 with a fixed message.
    #[error("generation failed: {0}")]
    Generation(#[from] LlmError),

    /// Anything else. Details are logged, never exposed.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ChatError {
    /// The message safe to show a caller. Internal details stay in the
    /// logs.
    pub fn public_message(&self) -> String {
        match self {
            Self::Rejected { .. } => {
                "Your message could not be processed. Please try rephrasing it.".into()
            }
            Self::Generation(_) => GENERATION_FAILURE_MESSAGE.into(),
            Self::Internal(_) => "Something went wrong on our side. Please try again.".into(),
        }
    }
}

impl From<GuardrailError> for ChatError {
    fn from(e: GuardrailError) -> Self {
        Self::Internal(e.to_string())
    }
}

impl From<SessionError> for ChatError {
    fn from(e: SessionError) -> Self {
        Self::Internal(e.to_string())
    }
}

/// Output of the pipeline up to post-validation, before persistence.
struct Generated {
    session_key: String,
    text: String,
    quality: ContentQuality,
}

/// Drives the full request lifecycle using injected collaborators.
pub struct ChatOrchestrator {
    sessions: Arc<dyn SessionStore>,
    validator: Arc<dyn ContentValidator>,
    llm: Arc<dyn LlmGateway>,
    profiles: Arc<dyn ProfileStore>,
    suggester: ResourceSuggester,
    augmenter: ToolAugmenter,
    fallbacks: FallbackPicker,
    max_chunk_len: usize,
}

impl ChatOrchestrator {
    pub fn new(
        sessions: Arc<dyn SessionStore>,
        validator: Arc<dyn ContentValidator>,
        llm: Arc<dyn LlmGateway>,
        profiles: Arc<dyn ProfileStore>,
        suggester: ResourceSuggester,
        augmenter: ToolAugmenter,
    ) -> Self {
        Self {
            sessions,
            validator,
            llm,
            profiles,
            suggester,
            augmenter,
            fallbacks: FallbackPicker::new(),
            max_chunk_len: 60,
        }
    }

    /// Replace the fallback picker (seeded in tests).
    pub fn with_fallback_picker(mut self, picker: FallbackPicker) -> Self {
        self.fallbacks = picker;
        self
    }

    /// Override the streaming chunk length.
    pub fn with_max_chunk_len(mut self, max_chunk_len: usize) -> Self {
        self.max_chunk_len = max_chunk_len;
        self
    }

    /// Synchronous path: full pipeline, persisted, assembled response.
    pub async fn handle_chat(&self, request: &ChatRequest) -> Result<ChatResponse, ChatError> {
        let generated = self.run_pipeline(request).await?;

        self.sessions
            .append(
                &generated.session_key,
                Turn::user(&request.message),
                Turn::assistant(&generated.text),
            )
            .await?;

        let (resources, actions) = self.assemble_suggestions(request).await;

        Ok(ChatResponse {
            message: generated.text,
            role: "assistant".into(),
            timestamp: Utc::now(),
            suggested_resources: resources,
            suggested_actions: actions,
            content_quality: Some(generated.quality),
        })
    }

    /// Streaming path: the finished reply is framed as incremental
    /// events. Any failure produces a single `error` event and ends
    /// the stream.
    pub fn handle_stream(self: Arc<Self>, request: ChatRequest) -> mpsc::Receiver<ChatStreamEvent> {
        let (tx, rx) = mpsc::channel(32);

        tokio::spawn(async move {
            if let Err(e) = self.stream_inner(&request, &tx).await {
                error!(error = %e, "Stream failed");
                let _ = tx
                    .send(ChatStreamEvent::Error {
                        message: e.public_message(),
                    })
                    .await;
            }
        });

        rx
    }

    async fn stream_inner(
        &self,
        request: &ChatRequest,
        tx: &mpsc::Sender<ChatStreamEvent>,
    ) -> Result<(), ChatError> {
        let generated = self.run_pipeline(request).await?;

        for delta in chunk_text(&generated.text, self.max_chunk_len) {
            // A failed send means the client is gone; stop writing
            // immediately.
            if tx.send(ChatStreamEvent::Message { delta }).await.is_err() {
                return Ok(());
            }
        }

        let (resources, actions) = self.assemble_suggestions(request).await;
        if tx
            .send(ChatStreamEvent::Suggestions {
                suggested_resources: resources,
                suggested_actions: actions,
            })
            .await
            .is_err()
        {
            return Ok(());
        }

        self.sessions
            .append(
                &generated.session_key,
                Turn::user(&request.message),
                Turn::assistant(&generated.text),
            )
            .await?;

        let _ = tx.send(ChatStreamEvent::Done).await;
        Ok(())
    }

    /// Received through PostValidated. No side effects on rejection.
    async fn run_pipeline(&self, request: &ChatRequest) -> Result<Generated, ChatError> {
        let mode = request.agent_mode.unwrap_or_default();

        let pre = self
            .validator
            .validate(
                &request.message,
                &ValidationRequest {
                    content_type: "user_message".into(),
                    experience_level: request.experience_level,
                    communication_level: None,
                    business_context: None,
                    user_id: request.user_id.clone(),
                },
            )
            .await?;

        if !pre.is_valid {
            info!(errors = ?pre.errors, "Message rejected by pre-validation");
            return Err(ChatError::Rejected {
                errors: pre.errors,
                suggestions: REPHRASING_SUGGESTIONS
                    .iter()
                    .map(|s| s.to_string())
                    .collect(),
            });
        }

        let session_key =
            derive_session_key(request.session_id.as_deref(), request.user_id.as_deref());
        let history = self.sessions.get(&session_key).await?;

        let profile = match &request.user_id {
            Some(id) => self.profiles.get_by_user_id(id).await?,
            None => None,
        };

        let tool_context = self.augmenter.build_context(&request.message, mode).await;
        let system_prompt = PromptBuilder::build(
            request.experience_level,
            profile.as_ref(),
            mode,
            &tool_context,
        );

        let mut messages = Vec::with_capacity(history.len() + 2);
        messages.push(ChatMessage::system(system_prompt));
        messages.extend(history.iter().map(ChatMessage::from));
        messages.push(ChatMessage::user(&request.message));

        let generated_text = self.llm.complete(&messages).await.map_err(|e| {
            error!(error = %e, "LLM completion failed");
            ChatError::Generation(e)
        })?;

        let communication_level = match &profile {
            Some(p) => CommunicationLevel::from_profile(p),
            None => CommunicationLevel::from_experience(request.experience_level),
        };

        let post = self
            .validator
            .validate(
                &generated_text,
                &ValidationRequest {
                    content_type: "assistant_reply".into(),
                    experience_level: request.experience_level,
                    communication_level: Some(communication_level),
                    business_context: profile.as_ref().and_then(|p| p.business_context.clone()),
                    user_id: request.user_id.clone(),
                },
            )
            .await?;

        let quality = ContentQuality::from_validation(&post);

        let text = if post.is_valid {
            generated_text
        } else {
            // The generated text is discarded. Only its error codes
            // make it to the logs.
            warn!(errors = ?post.errors, "Generated reply failed validation, substituting fallback");
            self.fallbacks.pick(request.experience_level)
        };

        Ok(Generated {
            session_key,
            text,
            quality,
        })
    }

    /// Resources and actions are computed the same way for both
    /// terminal paths, independent of validation outcome.
    async fn assemble_suggestions(
        &self,
        request: &ChatRequest,
    ) -> (Vec<beacon_core::chat::SuggestedResource>, Vec<String>) {
        let resources = self
            .suggester
            .suggest(&request.message, request.experience_level)
            .await;
        let actions = suggest_actions(&request.message, request.experience_level);
        (resources, actions)
    }
}
