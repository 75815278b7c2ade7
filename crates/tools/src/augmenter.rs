//! Tool augmentation — conditional context injection.

use beacon_core::chat::AgentMode;
use std::sync::Arc;
use tracing::warn;

use crate::forecast::ForecastClient;

/// Message substrings that trigger the forecast fetch regardless of
/// agent mode. Matched case-insensitively.
const FORECAST_TRIGGERS: &[&str] = &["weather", "forecast", "temperature"];

/// Decides which tools to run for a request and assembles their output
/// into a context block for the prompt.
pub struct ToolAugmenter {
    forecast: Arc<dyn ForecastClient>,
}

impl ToolAugmenter {
    pub fn new(forecast: Arc<dyn ForecastClient>) -> Self {
        Self { forecast }
    }

    /// Whether the forecast tool fires for this request.
    fn wants_forecast(message: &str, mode: AgentMode) -> bool {
        if mode == AgentMode::Forecast {
            return true;
        }
        let lowered = message.to_lowercase();
        FORECAST_TRIGGERS.iter().any(|t| lowered.contains(t))
    }

    /// Build the tool-context text for a request. Possibly empty.
    ///
    /// Tool failures never reach the caller: they are logged and the
    /// pipeline continues with no augmentation.
    pub async fn build_context(&self, message: &str, mode: AgentMode) -> String {
        if !Self::wants_forecast(message, mode) {
            return String::new();
        }

        match self.forecast.fetch().await {
            Ok(text) => format!("WeatherForecast: {text}"),
            Err(e) => {
                warn!(error = %e, "Forecast fetch failed, continuing without augmentation");
                String::new()
            }
        }
    }
}
