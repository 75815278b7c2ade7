//! Safe fallback replies.
//!
//! When a generated reply fails post-validation it is discarded and
//! replaced with a sentence from a fixed pool, chosen by the request's
//! experience band. The randomness source is seedable so tests can pin
//! the selection.

use beacon_core::chat::ExperienceLevel;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Mutex;

/// Fallbacks for Entry/Junior users: gentle, fundamentals-oriented.
pub const FOUNDATION_POOL: &[&str] = &[
    "That's a great thing to be thinking about early in your career. Let's break it down into one small step you could take this week.",
    "Lots of people wrestle with this when they're starting out. A good first move is to talk it through with your manager or a trusted teammate.",
    "You're asking the right questions. Start small: pick one part of this to focus on and we can build from there.",
];

/// Fallbacks for Mid/Senior users: peer-toned, ownership-oriented.
pub const GROWTH_POOL: &[&str] = &[
    "This is a common inflection point at your stage. It may help to map out the stakeholders involved and what each of them needs from you.",
    "Worth stepping back here: what outcome would make this a win in six months? Working backward from that usually clarifies the next move.",
    "You've likely got more leverage here than it feels like. Consider which part of this you can influence directly and start there.",
];

/// Fallbacks for everyone else (Principal, Executive, or no level).
pub const GENERAL_POOL: &[&str] = &[
    "Let me take another run at that. Could you share a bit more about the situation so I can give you something more useful?",
    "I want to make sure I give you solid guidance here. Tell me more about the context and constraints you're working with.",
    "There are a few directions we could take this. What matters most to you about the outcome?",
];

/// Fixed supportive line appended to every fallback.
pub const CLOSING_LINE: &str = "I'm here whenever you want to keep working through it.";

/// Experience bands that key the fallback pools.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackBand {
    Foundation,
    Growth,
    General,
}

impl FallbackBand {
    pub fn for_level(level: Option<ExperienceLevel>) -> Self {
        match level {
            Some(ExperienceLevel::Entry) | Some(ExperienceLevel::Junior) => Self::Foundation,
            Some(ExperienceLevel::Mid) | Some(ExperienceLevel::Senior) => Self::Growth,
            _ => Self::General,
        }
    }

    pub fn pool(self) -> &'static [&'static str] {
        match self {
            Self::Foundation => FOUNDATION_POOL,
            Self::Growth => GROWTH_POOL,
            Self::General => GENERAL_POOL,
        }
    }
}

/// Picks fallback sentences from the band pools.
///
/// Wraps a seedable RNG behind a mutex; the lock is held only for the
/// index draw.
pub struct FallbackPicker {
    rng: Mutex<StdRng>,
}

impl FallbackPicker {
    /// OS-seeded picker for production.
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_os_rng()),
        }
    }

    /// Fixed-seed picker for reproducible tests.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    /// Draw a fallback reply for the given experience level.
    pub fn pick(&self, level: Option<ExperienceLevel>) -> String {
        let pool = FallbackBand::for_level(level).pool();
        let index = {
            let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
            rng.random_range(0..pool.len())
        };
        format!("{}\n\n{}", pool[index], CLOSING_LINE)
    }
}

impl Default for FallbackPicker {
    fn default() -> Self {
        Self::new()
    }
}
