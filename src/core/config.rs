//! # Configuration
//!
//! Runtime settings for the assistant, loaded from the environment (with
//! `.env` support) or from a YAML file.
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.1.0: Add YAML loading and per-field defaults
//! - 1.0.0: Initial environment-based configuration

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Assistant configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Name the assistant uses when printing what it says
    pub assistant_name: String,
    /// Word that must appear in a voice-loop utterance before it is handled
    pub wake_word: String,
    /// Name used until the user introduces themselves
    pub default_user_name: String,
    /// Durable memory record (name + reminders)
    pub memory_path: PathBuf,
    /// Timestamped command history and error journal
    pub journal_path: PathBuf,
    /// Seconds between reminder scans
    pub reminder_interval_secs: u64,
    /// Seconds the voice loop waits for an utterance
    pub listen_timeout_secs: u64,
    /// Seconds a follow-up question (e.g. "Which city?") waits for an answer
    pub follow_up_timeout_secs: u64,
    /// Suppress speech output while still producing text
    pub silent_mode: bool,
    /// External text-to-speech program, invoked with the text as its last argument
    pub tts_command: Option<String>,
    /// Address the web boundary binds to
    pub bind_addr: String,
    /// Default log filter when RUST_LOG is unset
    pub log_level: String,
    pub weather_base_url: String,
    pub wikipedia_base_url: String,
    /// Timeout applied to outbound HTTP lookups
    pub http_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            assistant_name: "Alexa".to_string(),
            wake_word: "alexa".to_string(),
            default_user_name: "User".to_string(),
            memory_path: PathBuf::from("memory.json"),
            journal_path: PathBuf::from("assistant_log.txt"),
            reminder_interval_secs: 5,
            listen_timeout_secs: 8,
            follow_up_timeout_secs: 5,
            silent_mode: false,
            tts_command: None,
            bind_addr: "127.0.0.1:5000".to_string(),
            log_level: "info".to_string(),
            weather_base_url: "https://wttr.in".to_string(),
            wikipedia_base_url: "https://en.wikipedia.org/api/rest_v1".to_string(),
            http_timeout_secs: 10,
        }
    }
}

impl Config {
    /// Build configuration from `ASSISTANT_*` environment variables
    ///
    /// Unset variables keep their defaults. Call `dotenvy::dotenv()` first to
    /// pick up a `.env` file.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Some(v) = env_var("ASSISTANT_NAME") {
            config.assistant_name = v;
        }
        if let Some(v) = env_var("ASSISTANT_WAKE_WORD") {
            config.wake_word = v.to_lowercase();
        }
        if let Some(v) = env_var("ASSISTANT_DEFAULT_USER_NAME") {
            config.default_user_name = v;
        }
        if let Some(v) = env_var("ASSISTANT_MEMORY_PATH") {
            config.memory_path = PathBuf::from(v);
        }
        if let Some(v) = env_var("ASSISTANT_JOURNAL_PATH") {
            config.journal_path = PathBuf::from(v);
        }
        if let Some(v) = env_var("ASSISTANT_REMINDER_INTERVAL_SECS") {
            config.reminder_interval_secs = parse_number("ASSISTANT_REMINDER_INTERVAL_SECS", &v)?;
        }
        if let Some(v) = env_var("ASSISTANT_LISTEN_TIMEOUT_SECS") {
            config.listen_timeout_secs = parse_number("ASSISTANT_LISTEN_TIMEOUT_SECS", &v)?;
        }
        if let Some(v) = env_var("ASSISTANT_FOLLOW_UP_TIMEOUT_SECS") {
            config.follow_up_timeout_secs = parse_number("ASSISTANT_FOLLOW_UP_TIMEOUT_SECS", &v)?;
        }
        if let Some(v) = env_var("ASSISTANT_SILENT_MODE") {
            config.silent_mode = matches!(v.to_lowercase().as_str(), "1" | "true" | "yes" | "on");
        }
        if let Some(v) = env_var("ASSISTANT_TTS_COMMAND") {
            config.tts_command = Some(v);
        }
        if let Some(v) = env_var("ASSISTANT_BIND_ADDR") {
            config.bind_addr = v;
        }
        if let Some(v) = env_var("ASSISTANT_LOG_LEVEL") {
            config.log_level = v;
        }
        if let Some(v) = env_var("ASSISTANT_WEATHER_URL") {
            config.weather_base_url = v;
        }
        if let Some(v) = env_var("ASSISTANT_WIKIPEDIA_URL") {
            config.wikipedia_base_url = v;
        }
        if let Some(v) = env_var("ASSISTANT_HTTP_TIMEOUT_SECS") {
            config.http_timeout_secs = parse_number("ASSISTANT_HTTP_TIMEOUT_SECS", &v)?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a YAML file; missing keys keep their defaults
    pub fn load(path: &str) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {path}"))?;
        Self::from_yaml(&contents)
    }

    pub fn from_yaml(contents: &str) -> Result<Self> {
        let mut config: Config = serde_yaml::from_str(contents)?;
        config.wake_word = config.wake_word.to_lowercase();
        config.validate()?;
        Ok(config)
    }

    /// Load from `ASSISTANT_CONFIG` when set, otherwise from the environment
    pub fn resolve() -> Result<Self> {
        match env_var("ASSISTANT_CONFIG") {
            Some(path) => Self::load(&path),
            None => Self::from_env(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.wake_word.trim().is_empty() {
            return Err(anyhow::anyhow!("Wake word must not be empty"));
        }
        if self.reminder_interval_secs == 0 {
            return Err(anyhow::anyhow!("Reminder interval must be at least 1 second"));
        }
        if self.listen_timeout_secs == 0 || self.follow_up_timeout_secs == 0 {
            return Err(anyhow::anyhow!("Listen timeouts must be at least 1 second"));
        }
        Ok(())
    }

    pub fn reminder_interval(&self) -> Duration {
        Duration::from_secs(self.reminder_interval_secs)
    }

    pub fn listen_timeout(&self) -> Duration {
        Duration::from_secs(self.listen_timeout_secs)
    }

    pub fn follow_up_timeout(&self) -> Duration {
        Duration::from_secs(self.follow_up_timeout_secs)
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }
}

fn env_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_number(key: &str, value: &str) -> Result<u64> {
    value
        .trim()
        .parse()
        .with_context(|| format!("{key} must be a whole number, got '{value}'"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.wake_word, "alexa");
        assert_eq!(config.reminder_interval(), Duration::from_secs(5));
        assert_eq!(config.memory_path, PathBuf::from("memory.json"));
    }

    #[test]
    fn test_yaml_partial_overrides() {
        let yaml = "wake_word: Jarvis\nreminder_interval_secs: 2\nsilent_mode: true\n";
        let config = Config::from_yaml(yaml).unwrap();

        assert_eq!(config.wake_word, "jarvis");
        assert_eq!(config.reminder_interval_secs, 2);
        assert!(config.silent_mode);
        // Untouched fields keep defaults
        assert_eq!(config.default_user_name, "User");
        assert_eq!(config.follow_up_timeout_secs, 5);
    }

    #[test]
    fn test_zero_interval_rejected() {
        let yaml = "reminder_interval_secs: 0\n";
        assert!(Config::from_yaml(yaml).is_err());
    }

    #[test]
    fn test_empty_wake_word_rejected() {
        let config = Config {
            wake_word: "  ".to_string(),
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_parse_number_error_names_key() {
        let err = parse_number("ASSISTANT_X", "ten").unwrap_err();
        assert!(err.to_string().contains("ASSISTANT_X"));
    }
}
