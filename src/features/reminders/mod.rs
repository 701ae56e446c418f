//! # Reminders Feature
//!
//! Background reminder delivery with spoken announcements.
//!
//! - **Version**: 2.0.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false

pub mod duration;
pub mod scheduler;

pub use duration::parse_delay_seconds;
pub use scheduler::{ReminderScheduler, SchedulerHandle};
