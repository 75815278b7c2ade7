//! In-memory store implementations for Beacon.
//!
//! Process-local by design: session memory, the content catalog, and
//! profiles all live behind trait seams defined in `beacon-core`, so a
//! persistent backend can replace any of them without touching the
//! orchestration pipeline.

pub mod catalog;
pub mod profiles;
pub mod session;

pub use catalog::{InMemoryContentRepository, seed_catalog};
pub use profiles::InMemoryProfileStore;
pub use session::InMemorySessionStore;
