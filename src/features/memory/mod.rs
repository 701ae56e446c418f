//! # Feature: Memory
//!
//! Persisted user identity and pending reminders.
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false

pub mod record;
pub mod store;

pub use record::{MemoryRecord, Reminder};
pub use store::MemoryStore;
