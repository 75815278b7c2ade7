//! Error types for the Beacon domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each bounded context has its own error enum; the pipeline folds
//! them into `ChatError` at the orchestration layer.

use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum LlmError {
    #[error("API request failed: {message} (status: {status_code})")]
    ApiError { status_code: u16, message: String },

    #[error("Rate limited by provider, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Network error: {0}")]
    Network(String),
}

#[derive(Debug, Clone, Error)]
pub enum GuardrailError {
    #[error("Validator unreachable: {0}")]
    Unreachable(String),

    #[error("Validator returned malformed result: {0}")]
    MalformedResult(String),
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Storage error: {0}")]
    Storage(String),
}

#[derive(Debug, Error)]
pub enum ToolError {
    #[error("Tool fetch failed: {tool_name} — {reason}")]
    FetchFailed { tool_name: String, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn llm_error_displays_correctly() {
        let err = LlmError::ApiError {
            status_code: 429,
            message: "Too many requests".into(),
        };
        assert!(err.to_string().contains("429"));
        assert!(err.to_string().contains("Too many requests"));
    }

    #[test]
    fn tool_error_displays_correctly() {
        let err = ToolError::FetchFailed {
            tool_name: "forecast".into(),
            reason: "connection refused".into(),
        };
        assert!(err.to_string().contains("forecast"));
        assert!(err.to_string().contains("connection refused"));
    }
}
