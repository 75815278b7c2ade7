//! Built-in validator — local checks, no network.
//!
//! Not a substitute for a real guardrails service; it exists so the
//! pipeline runs end-to-end in development and tests with the same
//! result shape the remote service produces.

use async_trait::async_trait;
use beacon_core::error::GuardrailError;
use beacon_core::validation::{
    ContentValidator, ValidationMetrics, ValidationRequest, ValidationResult,
};

const DEFAULT_MAX_LEN: usize = 4_000;

/// Terms that always fail validation.
const BLOCKED_TERMS: &[&str] = &["ssn", "social security number", "credit card number"];

pub struct BuiltinValidator {
    max_len: usize,
}

impl BuiltinValidator {
    pub fn new() -> Self {
        Self {
            max_len: DEFAULT_MAX_LEN,
        }
    }

    pub fn with_max_len(max_len: usize) -> Self {
        Self { max_len }
    }

    fn quality_level(score: i32) -> &'static str {
        match score {
            90..=100 => "excellent",
            70..=89 => "good",
            50..=69 => "acceptable",
            _ => "poor",
        }
    }

    /// Rough readability proxy: average words per sentence, inverted
    /// onto a 0–100 scale.
    fn readability(content: &str) -> f32 {
        let sentences = content
            .split(['.', '!', '?'])
            .filter(|s| !s.trim().is_empty())
            .count()
            .max(1);
        let words = content.split_whitespace().count();
        let avg = words as f32 / sentences as f32;
        (120.0 - avg * 4.0).clamp(0.0, 100.0)
    }
}

impl Default for BuiltinValidator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ContentValidator for BuiltinValidator {
    fn name(&self) -> &str {
        "builtin"
    }

    async fn validate(
        &self,
        content: &str,
        _request: &ValidationRequest,
    ) -> Result<ValidationResult, GuardrailError> {
        let mut errors = Vec::new();
        let mut warnings = Vec::new();

        if content.trim().is_empty() {
            errors.push("Message is empty".to_string());
        }

        if content.len() > self.max_len {
            errors.push(format!(
                "Message exceeds the {} character limit",
                self.max_len
            ));
        }

        let lowered = content.to_lowercase();
        for term in BLOCKED_TERMS {
            if lowered.contains(term) {
                errors.push(format!("Message references restricted content: {term}"));
            }
        }

        let word_count = content.split_whitespace().count();
        if word_count > 500 {
            warnings.push("Message is very long; consider splitting it".to_string());
        }

        let compliance_score = (100i32 - 40 * errors.len() as i32).max(0);

        Ok(ValidationResult {
            is_valid: errors.is_empty(),
            quality_level: Self::quality_level(compliance_score).to_string(),
            compliance_score,
            errors,
            warnings,
            metrics: ValidationMetrics {
                readability_score: Self::readability(content),
                word_count,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn accepts_ordinary_text() {
        let v = BuiltinValidator::new();
        let result = v
            .validate("How should I prepare for my review?", &ValidationRequest::default())
            .await
            .unwrap();
        assert!(result.is_valid);
        assert_eq!(result.compliance_score, 100);
        assert_eq!(result.quality_level, "excellent");
    }

    #[tokio::test]
    async fn rejects_empty_text() {
        let v = BuiltinValidator::new();
        let result = v
            .validate("   ", &ValidationRequest::default())
            .await
            .unwrap();
        assert!(!result.is_valid);
        assert!(!result.errors.is_empty());
    }

    #[tokio::test]
    async fn rejects_blocked_terms() {
        let v = BuiltinValidator::new();
        let result = v
            .validate(
                "Please store my SSN for later",
                &ValidationRequest::default(),
            )
            .await
            .unwrap();
        assert!(!result.is_valid);
        assert!(result.errors[0].contains("restricted"));
    }

    #[tokio::test]
    async fn rejects_oversized_text() {
        let v = BuiltinValidator::with_max_len(10);
        let result = v
            .validate("this is clearly longer than ten characters", &ValidationRequest::default())
            .await
            .unwrap();
        assert!(!result.is_valid);
    }

    #[tokio::test]
    async fn metrics_are_populated() {
        let v = BuiltinValidator::new();
        let result = v
            .validate("One two three. Four five.", &ValidationRequest::default())
            .await
            .unwrap();
        assert_eq!(result.metrics.word_count, 5);
        assert!(result.metrics.readability_score > 0.0);
    }
}
