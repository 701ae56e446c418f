//! # Feature: Agent
//!
//! One assistant instance: memory store, response sink, reminder scheduler and
//! intent registry wired together behind `handle(utterance) -> response`.
//! Both the voice loop and the web boundary drive an `Agent`.
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.1.0: Turn lock so concurrent callers get their own responses
//! - 1.0.0: Initial implementation

use log::info;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::commands::{default_registry, CommandContext, IntentRegistry};
use crate::core::{CommandJournal, Config, JournalLevel, ResponseSink};
use crate::features::memory::MemoryStore;
use crate::features::reminders::{ReminderScheduler, SchedulerHandle};
use crate::features::services::Services;
use crate::features::speech::{Listener, SpeechOutput};

pub struct Agent {
    config: Config,
    ctx: CommandContext,
    registry: IntentRegistry,
    scheduler: Mutex<Option<SchedulerHandle>>,
    // Held for a whole turn so buffered output never mixes between callers
    turn: Mutex<()>,
}

impl Agent {
    /// Load memory, start the reminder scheduler and register every intent
    ///
    /// Must be called inside a tokio runtime. A corrupt or unreadable memory
    /// file does not fail startup; it is journaled and a fresh record is used.
    pub async fn start(
        config: Config,
        voice: Arc<dyn SpeechOutput>,
        listener: Arc<dyn Listener>,
        services: Services,
    ) -> Self {
        let journal = Arc::new(CommandJournal::new(config.journal_path.clone()));

        let memory = Arc::new(
            MemoryStore::open(config.memory_path.clone(), &config.default_user_name).await,
        );
        if let Some(err) = memory.load_error() {
            journal
                .write(JournalLevel::Error, &format!("Loading memory: {err}"))
                .await;
        }

        let sink = Arc::new(ResponseSink::new(voice, config.silent_mode));

        let scheduler = ReminderScheduler::new(
            memory.clone(),
            sink.clone(),
            journal.clone(),
            config.reminder_interval(),
        )
        .start();

        let ctx = CommandContext::new(&config, memory, sink, listener, services, journal);
        let registry = default_registry();

        info!(
            "🤖 {} started with {} intents (silent: {})",
            config.assistant_name,
            registry.len(),
            config.silent_mode
        );

        Self {
            config,
            ctx,
            registry,
            scheduler: Mutex::new(Some(scheduler)),
            turn: Mutex::new(()),
        }
    }

    /// Process one utterance and return everything said in response
    ///
    /// The utterance is lower-cased and trimmed before matching. Lines are
    /// joined with a single space.
    pub async fn handle(&self, utterance: &str) -> String {
        let query = utterance.trim().to_lowercase();

        let _turn = self.turn.lock().await;
        self.ctx.sink.clear().await;
        self.registry.dispatch(&self.ctx, &query).await;
        self.ctx.sink.drain().await
    }

    /// Say a single line as its own turn
    pub async fn say(&self, text: &str) -> String {
        let _turn = self.turn.lock().await;
        self.ctx.sink.clear().await;
        self.ctx.say(text).await;
        self.ctx.sink.drain().await
    }

    /// Startup greeting addressed to the remembered user
    pub async fn greeting(&self) -> String {
        let name = self.ctx.memory.user_name().await;
        self.say(&format!("System online. Hello {name}, I am ready."))
            .await
    }

    /// False once a shutdown intent has run
    pub fn is_running(&self) -> bool {
        self.ctx.is_running()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn memory(&self) -> &Arc<MemoryStore> {
        &self.ctx.memory
    }

    pub fn sink(&self) -> &Arc<ResponseSink> {
        &self.ctx.sink
    }

    pub fn listener(&self) -> &Arc<dyn Listener> {
        &self.ctx.listener
    }

    pub fn journal(&self) -> &Arc<CommandJournal> {
        &self.ctx.journal
    }

    /// Stop the reminder scheduler and wait for it; idempotent
    pub async fn shutdown(&self) {
        if let Some(handle) = self.scheduler.lock().await.take() {
            handle.shutdown().await;
            info!("🤖 {} shut down", self.config.assistant_name);
        }
    }
}
