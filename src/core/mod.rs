//! # Core Module
//!
//! Configuration, the per-turn response sink and the command journal.
//!
//! - **Version**: 2.0.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 2.0.0: Response sink and command journal
//! - 1.0.0: Initial creation with config module

pub mod config;
pub mod journal;
pub mod response;

// Re-export commonly used items
pub use config::Config;
pub use journal::{CommandJournal, JournalLevel};
pub use response::{split_for_speech, ResponseSink, SPEECH_CHUNK_LIMIT, TURN_SEPARATOR};
