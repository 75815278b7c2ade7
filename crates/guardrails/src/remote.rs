//! Remote validator — client for an HTTP guardrails service.
//!
//! Posts the text plus request context to `<base_url>/validate` and
//! maps the JSON result onto `ValidationResult`. The scoring algorithm
//! lives entirely on the other side of the wire.

use async_trait::async_trait;
use beacon_core::error::GuardrailError;
use beacon_core::validation::{ContentValidator, ValidationRequest, ValidationResult};
use tracing::debug;

pub struct RemoteValidator {
    base_url: String,
    client: reqwest::Client,
}

impl RemoteValidator {
    pub fn new(base_url: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(15))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        }
    }
}

#[async_trait]
impl ContentValidator for RemoteValidator {
    fn name(&self) -> &str {
        "remote"
    }

    async fn validate(
        &self,
        content: &str,
        request: &ValidationRequest,
    ) -> Result<ValidationResult, GuardrailError> {
        let url = format!("{}/validate", self.base_url);

        let mut body = serde_json::to_value(request)
            .map_err(|e| GuardrailError::MalformedResult(e.to_string()))?;
        body["content"] = serde_json::Value::String(content.to_string());

        debug!(url = %url, content_type = %request.content_type, "Validating content");

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| GuardrailError::Unreachable(e.to_string()))?;

        if !response.status().is_success() {
            return Err(GuardrailError::Unreachable(format!(
                "validator returned status {}",
                response.status()
            )));
        }

        response
            .json::<ValidationResult>()
            .await
            .map_err(|e| GuardrailError::MalformedResult(e.to_string()))
    }
}
