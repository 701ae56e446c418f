//! Memory store: the single durable record shared by the interaction path and
//! the reminder scheduler
//!
//! - **Version**: 1.2.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 1.2.0: Partially readable records load instead of falling back to defaults
//! - 1.1.0: Atomic temp-file + rename saves; remove reminders by id
//! - 1.0.0: Initial JSON file persistence

use anyhow::{Context, Result};
use log::{debug, error, info};
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use uuid::Uuid;

use super::record::{MemoryRecord, Reminder};

/// Durable memory guarded by one async mutex
///
/// Every mutation is a read-modify-write under the lock followed by a full
/// save while the lock is still held, so two writers can never lose each
/// other's update. A failed save keeps the in-memory change; the error is
/// returned for the caller to report.
pub struct MemoryStore {
    path: PathBuf,
    record: Mutex<MemoryRecord>,
    load_error: Option<String>,
}

impl MemoryStore {
    /// Load the record at `path`, falling back to a fresh one named `default_name`
    pub async fn open(path: impl Into<PathBuf>, default_name: &str) -> Self {
        let path = path.into();
        let (record, load_error) = match Self::try_load(&path, default_name).await {
            Ok(record) => (record, None),
            Err(e) => {
                error!("Failed to load memory from {}: {e:#}", path.display());
                (MemoryRecord::with_name(default_name), Some(format!("{e:#}")))
            }
        };

        info!(
            "Memory loaded from {} (name: {}, {} pending reminders)",
            path.display(),
            record.name,
            record.reminders.len()
        );

        Self {
            path,
            record: Mutex::new(record),
            load_error,
        }
    }

    /// Read the durable record; a missing file yields the default record
    pub async fn try_load(path: &Path, default_name: &str) -> Result<MemoryRecord> {
        if !tokio::fs::try_exists(path).await.unwrap_or(false) {
            debug!("No memory file at {}, starting fresh", path.display());
            return Ok(MemoryRecord::with_name(default_name));
        }

        let contents = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("reading {}", path.display()))?;
        let record = MemoryRecord::from_json(&contents, default_name)
            .with_context(|| format!("parsing {}", path.display()))?;
        Ok(record)
    }

    /// Write the whole record to a temp file, then rename it into place
    pub async fn write_atomic(path: &Path, record: &MemoryRecord) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        let json = serde_json::to_vec(record)?;
        let temp_path = temp_path_for(path);
        tokio::fs::write(&temp_path, &json)
            .await
            .with_context(|| format!("writing {}", temp_path.display()))?;
        tokio::fs::rename(&temp_path, path)
            .await
            .with_context(|| format!("replacing {}", path.display()))?;

        debug!(
            "Saved memory to {} ({} reminders)",
            path.display(),
            record.reminders.len()
        );
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Description of the failure that forced a default record at startup
    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    /// Persist the current record
    pub async fn save(&self) -> Result<()> {
        let record = self.record.lock().await;
        Self::write_atomic(&self.path, &record).await
    }

    pub async fn snapshot(&self) -> MemoryRecord {
        self.record.lock().await.clone()
    }

    pub async fn user_name(&self) -> String {
        self.record.lock().await.name.clone()
    }

    pub async fn set_user_name(&self, name: &str) -> Result<()> {
        let mut record = self.record.lock().await;
        record.name = name.to_string();
        Self::write_atomic(&self.path, &record).await
    }

    /// Copy of the pending reminders
    pub async fn reminders(&self) -> Vec<Reminder> {
        self.record.lock().await.reminders.clone()
    }

    pub async fn add_reminder(&self, reminder: Reminder) -> Result<()> {
        let mut record = self.record.lock().await;
        record.reminders.push(reminder);
        Self::write_atomic(&self.path, &record).await
    }

    /// Remove one reminder by id and persist the remainder
    ///
    /// `Ok(false)` means the reminder was already gone and nothing was written.
    /// An error means the reminder was removed in memory but the save failed.
    pub async fn remove_reminder(&self, id: Uuid) -> Result<bool> {
        let mut record = self.record.lock().await;
        let before = record.reminders.len();
        record.reminders.retain(|r| r.id != id);
        if record.reminders.len() == before {
            return Ok(false);
        }
        Self::write_atomic(&self.path, &record).await?;
        Ok(true)
    }
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(".tmp");
    PathBuf::from(name)
}
