// Core layer - configuration, response sink, command journal
pub mod core;

// Features layer - memory, reminders, speech, services, calculator, small talk
pub mod features;

// Application layer
pub mod agent;
pub mod commands;

// Front ends
pub mod server;
pub mod voice;

pub use agent::Agent;
pub use crate::core::Config;
pub use voice::VoiceLoop;

// Re-export feature items used by the binaries
pub use features::{
    // Memory
    MemoryRecord, MemoryStore, Reminder,
    // Reminders
    ReminderScheduler, SchedulerHandle,
    // Services
    Services,
    // Speech
    Listener, SpeechOutput,
};
