//! System prompt construction.
//!
//! The prompt is assembled from fixed sections in a fixed order:
//!
//! 1. Static capability/policy preamble
//! 2. Experience-level focus areas (if a level was given)
//! 3. Profile-derived business context (if a profile exists)
//! 4. Fixed closing capability/resources note
//! 5. Agent-mode directive
//! 6. Tool results (if any)
//!
//! No randomness and no clock reads: identical inputs always yield a
//! byte-identical prompt.

use beacon_core::chat::{AgentMode, ExperienceLevel};
use beacon_core::profile::UserProfile;

const PREAMBLE: &str = "\
You are Beacon, a professional business mentor. You help people navigate \
careers, workplace challenges, and professional growth with practical, \
actionable guidance.

Ground rules:
- Stay on professional and workplace topics.
- Do not give legal, medical, or licensed financial advice.
- Be encouraging but honest; do not overpromise outcomes.
- Keep answers specific to the user's situation.";

const CLOSING_NOTE: &str = "\
When relevant, remind the user that Beacon can surface articles, guides, \
and videos from its resource library alongside your answer.";

/// Deterministic system prompt assembly.
pub struct PromptBuilder;

impl PromptBuilder {
    /// Build the system prompt for one request.
    pub fn build(
        level: Option<ExperienceLevel>,
        profile: Option<&UserProfile>,
        mode: AgentMode,
        tool_context: &str,
    ) -> String {
        let mut sections: Vec<String> = vec![PREAMBLE.to_string()];

        if let Some(level) = level {
            sections.push(format!(
                "Focus areas for this user:\n{}",
                Self::focus_text(level)
            ));
        }

        if let Some(profile) = profile {
            sections.push(Self::profile_block(profile));
        }

        sections.push(CLOSING_NOTE.to_string());
        sections.push(Self::mode_directive(mode).to_string());

        if !tool_context.is_empty() {
            sections.push(format!("Tool results:\n{tool_context}"));
        }

        sections.join("\n\n")
    }

    fn focus_text(level: ExperienceLevel) -> &'static str {
        match level {
            ExperienceLevel::Entry => {
                "Fundamentals, workplace norms, and building early confidence. \
                 Explain concepts from first principles."
            }
            ExperienceLevel::Junior => {
                "Skill development, acting on feedback, and growing scope. \
                 Favor concrete examples over theory."
            }
            ExperienceLevel::Mid => {
                "Ownership, cross-team collaboration, and choosing a growth \
                 direction. Balance tactics with longer-term framing."
            }
            ExperienceLevel::Senior => {
                "Leadership, mentoring others, and influence beyond the \
                 immediate team. Assume strong domain fluency."
            }
            ExperienceLevel::Principal => {
                "Organizational strategy, technical or functional direction, \
                 and multiplying others. Engage at a systems level."
            }
            ExperienceLevel::Executive => {
                "Vision, stakeholder management, and organizational health. \
                 Be concise and decision-oriented."
            }
        }
    }

    fn profile_block(profile: &UserProfile) -> String {
        let mut block = format!("Business context:\nRole: {}", profile.role);

        if let Some(department) = &profile.department {
            block.push_str(&format!("\nDepartment: {department}"));
        }
        if let Some(context) = &profile.business_context {
            block.push_str(&format!("\nContext: {context}"));
        }
        if let Some(prefs) = &profile.communication_preferences {
            block.push_str(&format!("\nCommunication preferences: {prefs}"));
        }
        if profile.prefers_simple_language {
            block.push_str("\nUse plain, simple language.");
        }

        block
    }

    fn mode_directive(mode: AgentMode) -> &'static str {
        match mode {
            AgentMode::Forecast => {
                "The user asked for forecast-aware guidance. Weave any \
                 provided weather data into your planning advice."
            }
            AgentMode::Recommendation => {
                "Prioritize concrete, personalized recommendations over \
                 open-ended discussion. Give the user clear next steps."
            }
            AgentMode::Resources => {
                "Focus on pointing the user toward learning resources and \
                 explain briefly why each one fits their situation."
            }
            AgentMode::Default => {
                "Answer conversationally, asking a clarifying question when \
                 the request is ambiguous."
            }
        }
    }
}
