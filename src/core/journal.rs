//! Command journal: timestamped history of commands and error events
//!
//! Owned by the agent and handed to whoever needs to record something, so two
//! agents in the same process write to their own files.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0

use chrono::Local;
use log::warn;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JournalLevel {
    Info,
    Error,
}

impl JournalLevel {
    fn as_str(self) -> &'static str {
        match self {
            JournalLevel::Info => "INFO",
            JournalLevel::Error => "ERROR",
        }
    }
}

/// Append-only journal file
pub struct CommandJournal {
    path: PathBuf,
    // Serializes appends so lines never interleave
    write_lock: Mutex<()>,
}

impl CommandJournal {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Record a user command
    pub async fn command(&self, query: &str) {
        self.write(JournalLevel::Info, &format!("User Command: {query}"))
            .await;
    }

    /// Record a failure with a short description of what was being attempted
    pub async fn error(&self, context: &str, err: &anyhow::Error) {
        self.write(JournalLevel::Error, &format!("{context}: {err:#}"))
            .await;
    }

    /// Append one line; failures are logged and swallowed
    pub async fn write(&self, level: JournalLevel, message: &str) {
        let line = format_line(level, message);
        let _guard = self.write_lock.lock().await;

        let result = async {
            let mut file = tokio::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(&self.path)
                .await?;
            file.write_all(line.as_bytes()).await?;
            file.flush().await
        }
        .await;

        if let Err(e) = result {
            warn!("Failed to write journal {}: {e}", self.path.display());
        }
    }
}

fn format_line(level: JournalLevel, message: &str) -> String {
    // Newlines would split one event across lines
    let message = message.replace(&['\n', '\r'][..], " ");
    format!(
        "{} - {} - {}\n",
        Local::now().format("%Y-%m-%d %H:%M:%S,%3f"),
        level.as_str(),
        message
    )
}
