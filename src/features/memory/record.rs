//! Durable memory record: user profile plus pending reminders
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 1.1.0: Missing name and unreadable reminders no longer discard the whole record

use chrono::{DateTime, Utc};
use log::warn;
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// Name used when neither the record nor the caller supplies one
pub const PLACEHOLDER_NAME: &str = "User";

/// A pending reminder
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reminder {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub text: String,
    /// Absolute due time, stored as fractional unix seconds under `time`
    #[serde(rename = "time", with = "unix_seconds")]
    pub due_at: DateTime<Utc>,
}

impl Reminder {
    pub fn new(text: impl Into<String>, due_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: text.into(),
            due_at,
        }
    }

    /// Reminder due `seconds` after `now`; `None` if the time would overflow
    pub fn after(text: impl Into<String>, now: DateTime<Utc>, seconds: u64) -> Option<Self> {
        let delay = chrono::Duration::try_seconds(i64::try_from(seconds).ok()?)?;
        let due_at = now.checked_add_signed(delay)?;
        Some(Self::new(text, due_at))
    }

    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        self.due_at <= now
    }
}

/// Everything the assistant remembers between runs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryRecord {
    #[serde(default = "placeholder_name")]
    pub name: String,
    #[serde(default, deserialize_with = "readable_reminders")]
    pub reminders: Vec<Reminder>,
}

impl MemoryRecord {
    pub fn with_name(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            reminders: Vec::new(),
        }
    }

    /// Parse a stored record, keeping whatever is readable
    ///
    /// A missing or non-string `name` becomes `default_name`. Reminders that
    /// cannot be read are skipped with a warning.
    pub fn from_json(json: &str, default_name: &str) -> serde_json::Result<Self> {
        let mut value: serde_json::Value = serde_json::from_str(json)?;
        if let Some(fields) = value.as_object_mut() {
            if !fields.get("name").is_some_and(serde_json::Value::is_string) {
                fields.insert("name".to_string(), default_name.into());
            }
        }
        serde_json::from_value(value)
    }

    /// Reminders due at `now`, in collection order
    pub fn due_reminders(&self, now: DateTime<Utc>) -> Vec<Reminder> {
        self.reminders
            .iter()
            .filter(|r| r.is_due(now))
            .cloned()
            .collect()
    }
}

impl Default for MemoryRecord {
    fn default() -> Self {
        Self::with_name(PLACEHOLDER_NAME)
    }
}

fn placeholder_name() -> String {
    PLACEHOLDER_NAME.to_string()
}

fn readable_reminders<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Reminder>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Entry {
        Readable(Reminder),
        Unreadable(#[allow(dead_code)] serde::de::IgnoredAny),
    }

    let entries = Option::<Vec<Entry>>::deserialize(deserializer)?.unwrap_or_default();
    let total = entries.len();
    let reminders: Vec<Reminder> = entries
        .into_iter()
        .filter_map(|entry| match entry {
            Entry::Readable(reminder) => Some(reminder),
            Entry::Unreadable(_) => None,
        })
        .collect();

    if reminders.len() < total {
        warn!(
            "Skipped {} unreadable reminder(s) in memory record",
            total - reminders.len()
        );
    }
    Ok(reminders)
}

mod unix_seconds {
    use chrono::{DateTime, TimeZone, Utc};
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        let secs = value.timestamp() as f64 + f64::from(value.timestamp_subsec_micros()) / 1_000_000.0;
        serializer.serialize_f64(secs)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let secs = f64::deserialize(deserializer)?;
        if !secs.is_finite() {
            return Err(de::Error::custom("reminder time is not a finite number"));
        }
        let whole = secs.floor();
        let micros = ((secs - whole) * 1_000_000.0).round() as i64;
        Utc.timestamp_opt(whole as i64, 0)
            .single()
            .and_then(|t| t.checked_add_signed(chrono::Duration::microseconds(micros)))
            .ok_or_else(|| de::Error::custom(format!("reminder time out of range: {secs}")))
    }
}
