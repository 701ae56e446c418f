//! Shared context for intent handlers
//!
//! - **Version**: 2.0.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 2.0.0: Memory store, response sink, listener and journal are explicit fields
//! - 1.0.0: Initial implementation with core shared state

use log::error;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::core::{CommandJournal, Config, ResponseSink};
use crate::features::memory::MemoryStore;
use crate::features::services::Services;
use crate::features::speech::Listener;

/// Everything a handler may touch while processing one utterance
///
/// Owned by the agent; nothing here is process-global, so several agents can
/// live side by side (as they do in tests).
pub struct CommandContext {
    pub memory: Arc<MemoryStore>,
    pub sink: Arc<ResponseSink>,
    pub listener: Arc<dyn Listener>,
    pub services: Services,
    pub journal: Arc<CommandJournal>,
    pub assistant_name: String,
    /// Wait for the answer to "Which city?"
    pub follow_up_timeout: Duration,
    /// Wait for a regular utterance (reminder text and duration)
    pub listen_timeout: Duration,
    running: Arc<AtomicBool>,
}

impl CommandContext {
    pub fn new(
        config: &Config,
        memory: Arc<MemoryStore>,
        sink: Arc<ResponseSink>,
        listener: Arc<dyn Listener>,
        services: Services,
        journal: Arc<CommandJournal>,
    ) -> Self {
        Self {
            memory,
            sink,
            listener,
            services,
            journal,
            assistant_name: config.assistant_name.clone(),
            follow_up_timeout: config.follow_up_timeout(),
            listen_timeout: config.listen_timeout(),
            running: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Add a line to the current turn (and speak it)
    pub async fn say(&self, text: impl Into<String>) {
        self.sink.emit(text).await;
    }

    /// Say `question`, then block for the next utterance from the same listener
    pub async fn ask(&self, question: &str, timeout: Duration) -> Option<String> {
        self.say(question).await;
        self.listener.listen(timeout).await
    }

    /// Log and journal a degraded collaborator or persistence failure
    pub async fn report_error(&self, what: &str, err: &anyhow::Error) {
        error!("{what} failed: {err:#}");
        self.journal.error(what, err).await;
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Clear the running flag; the voice loop exits before its next utterance
    pub fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);
    }
}
