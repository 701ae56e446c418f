//! # Features
//!
//! Self-contained capabilities the command layer is built on.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0

pub mod calculator;
pub mod memory;
pub mod reminders;
pub mod services;
pub mod smalltalk;
pub mod speech;

// Calculator
pub use calculator::{evaluate, format_number};
// Memory
pub use memory::{MemoryRecord, MemoryStore, Reminder};
// Reminders
pub use reminders::{parse_delay_seconds, ReminderScheduler, SchedulerHandle};
// Services
pub use services::{
    JokeProvider, KnowledgeLookup, Launcher, Services, WeatherLookup,
};
// Speech
pub use speech::{
    normalize_heard, CommandVoice, ConsoleVoice, Listener, NoInputListener, RecordingVoice,
    ScriptedListener, SpeechOutput, StdinListener,
};
