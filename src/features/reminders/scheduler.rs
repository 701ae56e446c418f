//! Reminder scheduler
//!
//! Polls the memory store on a fixed interval and announces reminders that
//! have come due.
//!
//! - **Version**: 2.0.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 2.0.0: Stop signal and join handle; remove-then-announce delivery
//! - 1.0.0: Initial polling loop

use chrono::{DateTime, Utc};
use log::{debug, error, info, warn};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};

use crate::core::{CommandJournal, ResponseSink};
use crate::features::memory::{MemoryStore, Reminder};

/// Delivers due reminders from a shared [`MemoryStore`]
#[derive(Clone)]
pub struct ReminderScheduler {
    store: Arc<MemoryStore>,
    sink: Arc<ResponseSink>,
    journal: Arc<CommandJournal>,
    interval: Duration,
}

impl ReminderScheduler {
    pub fn new(
        store: Arc<MemoryStore>,
        sink: Arc<ResponseSink>,
        journal: Arc<CommandJournal>,
        interval: Duration,
    ) -> Self {
        Self {
            store,
            sink,
            journal,
            interval,
        }
    }

    /// Spawn the polling loop; it runs until [`SchedulerHandle::shutdown`]
    pub fn start(self) -> SchedulerHandle {
        let (stop_tx, stop_rx) = watch::channel(false);
        let task = tokio::spawn(async move {
            self.run(stop_rx).await;
        });
        SchedulerHandle {
            stop_tx,
            task: Some(task),
        }
    }

    async fn run(self, mut stop_rx: watch::Receiver<bool>) {
        info!(
            "⏰ Reminder scheduler started (interval: {:?})",
            self.interval
        );

        let mut ticker = interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        // Skip the first immediate tick
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let delivered = self.tick(Utc::now()).await;
                    if !delivered.is_empty() {
                        debug!("Delivered {} reminder(s) this tick", delivered.len());
                    }
                }
                changed = stop_rx.changed() => {
                    // A dropped sender also means stop
                    if changed.is_err() || *stop_rx.borrow() {
                        break;
                    }
                }
            }
        }

        info!("⏰ Reminder scheduler stopped");
    }

    /// Run one scan as of `now` and return the reminders that were delivered
    ///
    /// Works on a snapshot, so reminders added while the scan runs are left
    /// for a later tick. Each due reminder is removed and persisted before it
    /// is announced; a reminder that another writer already removed is
    /// skipped.
    pub async fn tick(&self, now: DateTime<Utc>) -> Vec<Reminder> {
        let snapshot = self.store.snapshot().await;
        let due = snapshot.due_reminders(now);
        let mut delivered = Vec::with_capacity(due.len());

        for reminder in due {
            match self.store.remove_reminder(reminder.id).await {
                Ok(true) => {}
                Ok(false) => {
                    debug!("Reminder {} already removed, skipping", reminder.id);
                    continue;
                }
                Err(e) => {
                    // Removed in memory, so it still cannot fire twice in this process
                    error!("Failed to persist removal of reminder {}: {e:#}", reminder.id);
                    self.journal.error("Reminder persistence", &e).await;
                }
            }

            info!("Delivering reminder {}: {}", reminder.id, reminder.text);
            self.sink
                .announce(format!("Reminder! {}", reminder.text))
                .await;
            delivered.push(reminder);
        }

        delivered
    }
}

/// Owner's handle on a running scheduler
pub struct SchedulerHandle {
    stop_tx: watch::Sender<bool>,
    task: Option<JoinHandle<()>>,
}

impl SchedulerHandle {
    pub fn is_finished(&self) -> bool {
        self.task.as_ref().map_or(true, |t| t.is_finished())
    }

    /// Signal the loop to stop and wait for it to exit
    pub async fn shutdown(mut self) {
        let _ = self.stop_tx.send(true);
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                warn!("Reminder scheduler task ended abnormally: {e}");
            }
        }
    }
}

impl Drop for SchedulerHandle {
    fn drop(&mut self) {
        // Never leave a detached loop behind
        if let Some(task) = self.task.take() {
            let _ = self.stop_tx.send(true);
            task.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::speech::RecordingVoice;
    use chrono::TimeZone;

    struct Fixture {
        _dir: tempfile::TempDir,
        store: Arc<MemoryStore>,
        voice: Arc<RecordingVoice>,
        scheduler: ReminderScheduler,
    }

    async fn fixture(interval: Duration) -> Fixture {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(MemoryStore::open(dir.path().join("memory.json"), "User").await);
        let voice = Arc::new(RecordingVoice::default());
        let sink = Arc::new(ResponseSink::new(voice.clone(), false));
        let journal = Arc::new(CommandJournal::new(dir.path().join("log.txt")));
        let scheduler = ReminderScheduler::new(store.clone(), sink, journal, interval);
        Fixture {
            _dir: dir,
            store,
            voice,
            scheduler,
        }
    }

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
    }

    #[tokio::test]
    async fn test_reminder_delivered_exactly_once() {
        let f = fixture(Duration::from_secs(5)).await;
        f.store
            .add_reminder(Reminder::after("T", at(0), 1).unwrap())
            .await
            .unwrap();

        // Not yet due
        assert!(f.scheduler.tick(at(0)).await.is_empty());

        let delivered = f.scheduler.tick(at(5)).await;
        assert_eq!(delivered.len(), 1);
        assert_eq!(delivered[0].text, "T");
        assert!(f.store.reminders().await.is_empty());

        // A second tick does not redeliver
        assert!(f.scheduler.tick(at(10)).await.is_empty());
        assert_eq!(f.voice.spoken().await, vec!["Reminder! T"]);
    }

    #[tokio::test]
    async fn test_two_past_due_reminders_in_one_tick() {
        let f = fixture(Duration::from_secs(5)).await;
        f.store.add_reminder(Reminder::new("a", at(-10))).await.unwrap();
        f.store.add_reminder(Reminder::new("b", at(-5))).await.unwrap();
        f.store
            .add_reminder(Reminder::after("later", at(0), 600).unwrap())
            .await
            .unwrap();

        let delivered = f.scheduler.tick(at(0)).await;
        let mut texts: Vec<String> = delivered.into_iter().map(|r| r.text).collect();
        texts.sort();
        assert_eq!(texts, vec!["a", "b"]);

        // Persisted: a reload sees only the pending one
        let reloaded = MemoryStore::open(f.store.path(), "User").await;
        let remaining: Vec<String> = reloaded
            .reminders()
            .await
            .into_iter()
            .map(|r| r.text)
            .collect();
        assert_eq!(remaining, vec!["later"]);
    }

    #[tokio::test]
    async fn test_reminder_added_after_snapshot_is_kept() {
        let f = fixture(Duration::from_secs(5)).await;
        f.store.add_reminder(Reminder::new("due", at(-1))).await.unwrap();

        f.scheduler.tick(at(0)).await;
        f.store
            .add_reminder(Reminder::after("new", at(0), 30).unwrap())
            .await
            .unwrap();

        let remaining = f.store.reminders().await;
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].text, "new");
    }

    #[tokio::test]
    async fn test_running_loop_delivers_and_stops() {
        let f = fixture(Duration::from_millis(20)).await;
        f.store
            .add_reminder(Reminder::new("stretch", Utc::now()))
            .await
            .unwrap();

        let handle = f.scheduler.clone().start();
        for _ in 0..100 {
            if f.store.reminders().await.is_empty() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        handle.shutdown().await;

        assert!(f.store.reminders().await.is_empty());
        assert_eq!(f.voice.spoken().await, vec!["Reminder! stretch"]);
    }

    #[tokio::test]
    async fn test_shutdown_is_prompt() {
        let f = fixture(Duration::from_secs(3600)).await;
        let handle = f.scheduler.clone().start();
        assert!(!handle.is_finished());

        tokio::time::timeout(Duration::from_secs(2), handle.shutdown())
            .await
            .expect("scheduler should stop promptly");
    }
}
