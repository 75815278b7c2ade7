//! Tool augmentation for Beacon.
//!
//! Tools inject auxiliary fetched text into the prompt based on
//! message/agent triggers. One tool exists today (a weather forecast
//! fetch); extending means adding more trigger→fetch pairs behind the
//! same `ToolAugmenter` contract, not changing callers.

pub mod augmenter;
pub mod forecast;

pub use augmenter::ToolAugmenter;
pub use forecast::{ForecastClient, HttpForecastClient, MockForecastClient};
