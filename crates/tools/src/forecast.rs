//! Forecast fetch — the one tool Beacon ships with.

use async_trait::async_trait;
use beacon_core::error::ToolError;
use tracing::debug;

/// Fetch seam for the weather forecast.
#[async_trait]
pub trait ForecastClient: Send + Sync {
    /// Fetch a short plain-text forecast.
    async fn fetch(&self) -> Result<String, ToolError>;
}

/// HTTP forecast client for wttr.in-style plain-text endpoints.
pub struct HttpForecastClient {
    base_url: String,
    client: reqwest::Client,
}

impl HttpForecastClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        }
    }
}

#[async_trait]
impl ForecastClient for HttpForecastClient {
    async fn fetch(&self) -> Result<String, ToolError> {
        let url = format!("{}/?format=3", self.base_url);
        debug!(url = %url, "Fetching forecast");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ToolError::FetchFailed {
                tool_name: "forecast".into(),
                reason: e.to_string(),
            })?;

        if !response.status().is_success() {
            return Err(ToolError::FetchFailed {
                tool_name: "forecast".into(),
                reason: format!("status {}", response.status()),
            });
        }

        let text = response.text().await.map_err(|e| ToolError::FetchFailed {
            tool_name: "forecast".into(),
            reason: e.to_string(),
        })?;

        Ok(text.trim().to_string())
    }
}

/// Mock forecast client for tests — either a fixed response or a
/// forced failure.
pub struct MockForecastClient {
    response: Option<String>,
}

impl MockForecastClient {
    pub fn with_response(text: impl Into<String>) -> Self {
        Self {
            response: Some(text.into()),
        }
    }

    pub fn failing() -> Self {
        Self { response: None }
    }
}

#[async_trait]
impl ForecastClient for MockForecastClient {
    async fn fetch(&self) -> Result<String, ToolError> {
        match &self.response {
            Some(text) => Ok(text.clone()),
            None => Err(ToolError::FetchFailed {
                tool_name: "forecast".into(),
                reason: "mock failure".into(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn mock_returns_response() {
        let client = MockForecastClient::with_response("Sunny, 21°C");
        assert_eq!(client.fetch().await.unwrap(), "Sunny, 21°C");
    }

    #[tokio::test]
    async fn mock_failure_is_an_error() {
        let client = MockForecastClient::failing();
        assert!(client.fetch().await.is_err());
    }
}
