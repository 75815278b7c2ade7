//! Content validation backends for Beacon.
//!
//! The pipeline treats validation as a black box: text goes in, a
//! `ValidationResult` comes out. Two backends are provided — a local
//! heuristic validator for development and tests, and a client for a
//! remote guardrails service.

pub mod builtin;
pub mod remote;

pub use builtin::BuiltinValidator;
pub use remote::RemoteValidator;
