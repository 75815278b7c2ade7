//! LLM gateway implementations for Beacon.
//!
//! `OpenAiCompatGateway` covers the vast majority of providers, since
//! most expose an OpenAI-compatible `/chat/completions` endpoint.

pub mod openai_compat;

pub use openai_compat::OpenAiCompatGateway;
