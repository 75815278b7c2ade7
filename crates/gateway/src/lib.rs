//! HTTP API gateway for Beacon.
//!
//! Endpoints:
//!
//! - `POST /chat`        — Send a message, get the full reply
//! - `POST /chat-stream` — Send a message, get an SSE event stream
//! - `POST /feedback`    — Record a thumbs up/down on a reply
//! - `GET  /health`      — Liveness probe
//!
//! Built on Axum. All request/response bodies are camelCase JSON.

use axum::{
    Router,
    extract::State,
    http::{HeaderName, StatusCode, header},
    response::sse::{Event as SseEvent, KeepAlive, Sse},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::sync::Arc;
use tokio_stream::StreamExt;
use tokio_stream::wrappers::ReceiverStream;
use tracing::{error, info};

use beacon_core::chat::{ChatRequest, ChatResponse};
use beacon_core::validation::ContentValidator;
use beacon_engine::{ChatError, ChatOrchestrator, FallbackPicker, ResourceSuggester};
use beacon_guardrails::{BuiltinValidator, RemoteValidator};
use beacon_memory::{
    InMemoryContentRepository, InMemoryProfileStore, InMemorySessionStore, seed_catalog,
};
use beacon_providers::OpenAiCompatGateway;
use beacon_tools::{HttpForecastClient, ToolAugmenter};

/// Shared application state for the gateway.
pub struct GatewayState {
    pub orchestrator: Arc<ChatOrchestrator>,
}

pub type SharedState = Arc<GatewayState>;

// ── Router ────────────────────────────────────────────────────────────────

/// Build the Axum router with all gateway routes.
pub fn build_router(state: SharedState) -> Router {
    Router::new()
        .route("/chat", post(chat_handler))
        .route("/chat-stream", post(chat_stream_handler))
        .route("/feedback", post(feedback_handler))
        .route("/health", get(health_handler))
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the gateway HTTP server.
pub async fn start(config: beacon_config::AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let addr = format!("{}:{}", config.gateway.host, config.gateway.port);
    let state = build_state(&config)?;
    let router = build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(%addr, "Beacon gateway listening");
    axum::serve(listener, router).await?;
    Ok(())
}

/// Wire the production collaborators from config.
pub fn build_state(
    config: &beacon_config::AppConfig,
) -> Result<SharedState, beacon_config::ConfigError> {
    let validator: Arc<dyn ContentValidator> = match config.guardrails.mode.as_str() {
        "remote" => {
            let url = config.guardrails.url.clone().ok_or_else(|| {
                beacon_config::ConfigError::Invalid(
                    "guardrails.url is required when guardrails.mode = \"remote\"".into(),
                )
            })?;
            info!(%url, "Using remote guardrails validator");
            Arc::new(RemoteValidator::new(url))
        }
        _ => Arc::new(BuiltinValidator::new()),
    };

    let llm = OpenAiCompatGateway::new(
        "openai-compat",
        &config.llm.base_url,
        config.llm.api_key.clone().unwrap_or_default(),
        &config.llm.model,
    )
    .with_temperature(config.llm.temperature)
    .with_max_tokens(config.llm.max_tokens);

    let sessions = InMemorySessionStore::with_limits(
        config.session.max_turns,
        chrono::Duration::hours(config.session.ttl_hours),
    );

    let repository = Arc::new(InMemoryContentRepository::with_items(seed_catalog()));

    let orchestrator = ChatOrchestrator::new(
        Arc::new(sessions),
        validator,
        Arc::new(llm),
        Arc::new(InMemoryProfileStore::new()),
        ResourceSuggester::new(repository),
        ToolAugmenter::new(Arc::new(HttpForecastClient::new(
            &config.tools.forecast_base_url,
        ))),
    )
    .with_fallback_picker(FallbackPicker::new())
    .with_max_chunk_len(config.streaming.max_chunk_len);

    Ok(Arc::new(GatewayState {
        orchestrator: Arc::new(orchestrator),
    }))
}

// ── Request / Response types ──────────────────────────────────────────────

/// Structured body for a 400 validation rejection.
#[derive(Serialize, Deserialize)]
struct RejectionBody {
    message: String,
    errors: Vec<String>,
    suggestions: Vec<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct FeedbackRequest {
    message_id: String,
    upvote: bool,
    #[serde(default)]
    comment: Option<String>,
    #[serde(default)]
    session_id: Option<String>,
}

#[derive(Serialize, Deserialize)]
struct FeedbackResponse {
    received: bool,
}

#[derive(Serialize, Deserialize)]
struct ErrorBody {
    error: String,
}

// ── Handlers ──────────────────────────────────────────────────────────────

async fn chat_handler(
    State(state): State<SharedState>,
    Json(payload): Json<ChatRequest>,
) -> Response {
    match state.orchestrator.handle_chat(&payload).await {
        Ok(response) => Json(response).into_response(),
        Err(e) => chat_error_response(e),
    }
}

/// Map a pipeline failure to an HTTP response.
///
/// Rejections become a structured 400. Everything else becomes a 500
/// whose body looks like a normal reply so clients render it inline;
/// the real cause stays in the logs.
fn chat_error_response(error: ChatError) -> Response {
    let message = error.public_message();
    match error {
        ChatError::Rejected {
            errors,
            suggestions,
        } => (
            StatusCode::BAD_REQUEST,
            Json(RejectionBody {
                message,
                errors,
                suggestions,
            }),
        )
            .into_response(),
        other => {
            error!(error = %other, "Chat request failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ChatResponse::assistant(message)),
            )
                .into_response()
        }
    }
}

/// `POST /chat-stream` — SSE stream of `message`/`suggestions`/`done`
/// events (or a single `error`).
async fn chat_stream_handler(
    State(state): State<SharedState>,
    Json(payload): Json<ChatRequest>,
) -> (
    [(HeaderName, &'static str); 2],
    Sse<impl futures::Stream<Item = Result<SseEvent, Infallible>>>,
) {
    let rx = state.orchestrator.clone().handle_stream(payload);

    let stream = ReceiverStream::new(rx).map(|event| {
        Ok(SseEvent::default()
            .event(event.event_type())
            .data(event.data().to_string()))
    });

    // Proxies must not buffer or cache the event stream.
    (
        [
            (header::CACHE_CONTROL, "no-cache"),
            (HeaderName::from_static("x-accel-buffering"), "no"),
        ],
        Sse::new(stream).keep_alive(KeepAlive::default()),
    )
}

async fn feedback_handler(Json(payload): Json<FeedbackRequest>) -> Response {
    if payload.message_id.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorBody {
                error: "messageId is required".into(),
            }),
        )
            .into_response();
    }

    info!(
        message_id = %payload.message_id,
        upvote = payload.upvote,
        session = payload.session_id.as_deref().unwrap_or("-"),
        comment = payload.comment.as_deref().unwrap_or(""),
        "Feedback received"
    );

    Json(FeedbackResponse { received: true }).into_response()
}

async fn health_handler() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::Request;
    use beacon_core::error::LlmError;
    use beacon_core::llm::{ChatMessage, LlmGateway};
    use beacon_tools::MockForecastClient;
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    /// Echoes a fixed reply without touching the network.
    struct FixedGateway {
        reply: Option<String>,
    }

    #[async_trait]
    impl LlmGateway for FixedGateway {
        fn name(&self) -> &str {
            "fixed"
        }

        async fn complete(&self, _messages: &[ChatMessage]) -> Result<String, LlmError> {
            match &self.reply {
                Some(reply) => Ok(reply.clone()),
                None => Err(LlmError::Network("connection refused".into())),
            }
        }
    }

    fn test_state(reply: Option<&str>) -> SharedState {
        let orchestrator = ChatOrchestrator::new(
            Arc::new(InMemorySessionStore::new()),
            Arc::new(BuiltinValidator::new()),
            Arc::new(FixedGateway {
                reply: reply.map(String::from),
            }),
            Arc::new(InMemoryProfileStore::new()),
            ResourceSuggester::new(Arc::new(InMemoryContentRepository::with_items(
                seed_catalog(),
            ))),
            ToolAugmenter::new(Arc::new(MockForecastClient::with_response("Clear, 18°C"))),
        )
        .with_fallback_picker(FallbackPicker::with_seed(3));

        Arc::new(GatewayState {
            orchestrator: Arc::new(orchestrator),
        })
    }

    fn json_request(uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&body).unwrap()))
            .unwrap()
    }

    #[test]
    fn build_state_rejects_remote_mode_without_url() {
        let mut config = beacon_config::AppConfig::default();
        config.guardrails.mode = "remote".into();
        assert!(build_state(&config).is_err());
    }

    #[test]
    fn build_state_accepts_default_config() {
        assert!(build_state(&beacon_config::AppConfig::default()).is_ok());
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let app = build_router(test_state(Some("hi")));

        let req = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["status"], "ok");
    }

    #[tokio::test]
    async fn chat_returns_full_reply() {
        let app = build_router(test_state(Some("Negotiate from data, not emotion.")));

        let req = json_request(
            "/chat",
            serde_json::json!({ "message": "How do I negotiate salary?" }),
        );

        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json: ChatResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(json.message, "Negotiate from data, not emotion.");
        assert_eq!(json.role, "assistant");
        assert!(!json.suggested_actions.is_empty());
    }

    #[tokio::test]
    async fn empty_message_is_rejected_with_suggestions() {
        let app = build_router(test_state(Some("never sent")));

        let req = json_request("/chat", serde_json::json!({ "message": "" }));

        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json: RejectionBody = serde_json::from_slice(&body).unwrap();
        assert!(!json.errors.is_empty());
        assert_eq!(json.suggestions.len(), 3);
    }

    #[tokio::test]
    async fn llm_failure_maps_to_reassuring_500() {
        let app = build_router(test_state(None));

        let req = json_request("/chat", serde_json::json!({ "message": "hello there" }));

        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json: ChatResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(json.message, beacon_engine::GENERATION_FAILURE_MESSAGE);
        assert_eq!(json.role, "assistant");
    }

    #[tokio::test]
    async fn chat_stream_emits_named_events() {
        let app = build_router(test_state(Some("A short streamed reply.")));

        let req = json_request(
            "/chat-stream",
            serde_json::json!({ "message": "stream this back to me" }),
        );

        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/event-stream"
        );
        assert_eq!(response.headers()[header::CACHE_CONTROL], "no-cache");
        assert_eq!(response.headers()["x-accel-buffering"], "no");

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let text = String::from_utf8(body.to_vec()).unwrap();
        assert!(text.contains("event: message"));
        assert!(text.contains("event: suggestions"));
        assert!(text.contains("event: done"));
    }

    #[tokio::test]
    async fn rejected_stream_emits_error_event() {
        let app = build_router(test_state(Some("never sent")));

        let req = json_request("/chat-stream", serde_json::json!({ "message": "" }));

        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let text = String::from_utf8(body.to_vec()).unwrap();
        assert!(text.contains("event: error"));
        assert!(!text.contains("event: done"));
    }

    #[tokio::test]
    async fn feedback_requires_message_id() {
        let app = build_router(test_state(Some("hi")));

        let req = json_request(
            "/feedback",
            serde_json::json!({ "messageId": "  ", "upvote": true }),
        );

        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn feedback_is_acknowledged() {
        let app = build_router(test_state(Some("hi")));

        let req = json_request(
            "/feedback",
            serde_json::json!({
                "messageId": "m-42",
                "upvote": false,
                "comment": "too generic",
                "sessionId": "s-1"
            }),
        );

        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json: FeedbackResponse = serde_json::from_slice(&body).unwrap();
        assert!(json.received);
    }
}
