//! Context fixture for handler tests

use std::path::PathBuf;
use std::sync::Arc;

use tempfile::TempDir;

use super::context::CommandContext;
use crate::core::{CommandJournal, Config, ResponseSink};
use crate::features::memory::MemoryStore;
use crate::features::services::{
    BuiltinJokes, FixedKnowledge, FixedWeather, RecordingLauncher, Services,
};
use crate::features::speech::{RecordingVoice, ScriptedListener};

pub(crate) struct Fixture {
    pub dir: TempDir,
    pub voice: Arc<RecordingVoice>,
    pub listener: Arc<ScriptedListener>,
    pub launcher: RecordingLauncher,
}

impl Fixture {
    pub fn memory_path(&self) -> PathBuf {
        self.dir.path().join("memory.json")
    }

    pub fn journal_path(&self) -> PathBuf {
        self.dir.path().join("journal.txt")
    }
}

/// Offline services whose launcher is shared with the fixture
pub(crate) fn offline_services(launcher: &RecordingLauncher) -> Services {
    Services {
        weather: Arc::new(FixedWeather(None)),
        knowledge: Arc::new(FixedKnowledge(None)),
        jokes: Arc::new(BuiltinJokes),
        launcher: Arc::new(launcher.clone()),
    }
}

pub(crate) async fn test_context(replies: &[&str]) -> (CommandContext, Fixture) {
    let launcher = RecordingLauncher::default();
    let services = offline_services(&launcher);
    test_context_with(replies, services, launcher).await
}

pub(crate) async fn test_context_with(
    replies: &[&str],
    services: Services,
    launcher: RecordingLauncher,
) -> (CommandContext, Fixture) {
    let dir = tempfile::tempdir().unwrap();
    let config = Config::default();
    let voice = Arc::new(RecordingVoice::default());
    let listener = Arc::new(ScriptedListener::new(replies.iter().copied()));

    let memory = Arc::new(MemoryStore::open(dir.path().join("memory.json"), "User").await);
    let journal = Arc::new(CommandJournal::new(dir.path().join("journal.txt")));
    let sink = Arc::new(ResponseSink::new(voice.clone(), true));

    let ctx = CommandContext::new(
        &config,
        memory,
        sink,
        listener.clone(),
        services,
        journal,
    );

    (
        ctx,
        Fixture {
            dir,
            voice,
            listener,
            launcher,
        },
    )
}
