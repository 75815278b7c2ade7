//! Guardrails validation — the safety/compliance seam.
//!
//! Beacon runs the validator twice per request: once on the raw user
//! message (pre-validation) and once on the generated reply
//! (post-validation). How scores are computed is the validator's
//! business; the pipeline only consumes the result.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::chat::ExperienceLevel;
use crate::error::GuardrailError;
use crate::profile::UserProfile;

/// Derived verbosity/complexity band used to tailor post-validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommunicationLevel {
    Simple,
    Standard,
    Advanced,
    Expert,
}

impl CommunicationLevel {
    /// Derive the level from profile preferences.
    ///
    /// The simple-language flag wins outright; otherwise the preferred
    /// reading level maps onto bands.
    pub fn from_profile(profile: &UserProfile) -> Self {
        if profile.prefers_simple_language {
            return Self::Simple;
        }
        match profile.preferred_reading_level {
            Some(level) if level <= 3 => Self::Simple,
            Some(level) if level <= 6 => Self::Standard,
            Some(level) if level <= 9 => Self::Advanced,
            Some(_) => Self::Expert,
            None => Self::Standard,
        }
    }

    /// Derive the level from an experience level when no profile exists.
    pub fn from_experience(level: Option<ExperienceLevel>) -> Self {
        match level {
            Some(ExperienceLevel::Entry) | Some(ExperienceLevel::Junior) => Self::Simple,
            Some(ExperienceLevel::Mid) => Self::Standard,
            Some(ExperienceLevel::Senior) | Some(ExperienceLevel::Principal) => Self::Advanced,
            _ => Self::Standard,
        }
    }
}

/// Quantitative signals attached to a validation result.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationMetrics {
    /// Flesch-style readability score, if computed.
    #[serde(default)]
    pub readability_score: f32,

    /// Word count of the validated text.
    #[serde(default)]
    pub word_count: usize,
}

/// The outcome of one validation pass. Produced twice per request,
/// never mutated, only read.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub is_valid: bool,

    /// Ordered list of blocking problems.
    pub errors: Vec<String>,

    /// Ordered list of non-blocking concerns.
    pub warnings: Vec<String>,

    /// 0–100 compliance score.
    pub compliance_score: i32,

    /// Coarse quality tag ("excellent", "good", "acceptable", "poor").
    pub quality_level: String,

    #[serde(default)]
    pub metrics: ValidationMetrics,
}

impl ValidationResult {
    /// A passing result with full marks, for validators that have
    /// nothing to say.
    pub fn pass() -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
            compliance_score: 100,
            quality_level: "excellent".into(),
            metrics: ValidationMetrics::default(),
        }
    }
}

/// Context passed alongside the text being validated.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationRequest {
    /// What kind of text this is ("user_message" or "assistant_reply").
    pub content_type: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub experience_level: Option<ExperienceLevel>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub communication_level: Option<CommunicationLevel>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub business_context: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

/// The validator seam. Implementations score arbitrary text for
/// safety and compliance; the algorithm is a black box to the pipeline.
#[async_trait]
pub trait ContentValidator: Send + Sync {
    /// A human-readable name for diagnostics.
    fn name(&self) -> &str;

    /// Score the given text.
    async fn validate(
        &self,
        content: &str,
        request: &ValidationRequest,
    ) -> std::result::Result<ValidationResult, GuardrailError>;
}
