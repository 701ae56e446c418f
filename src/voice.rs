//! # Feature: Voice Loop
//!
//! Wake-word gated listen/handle loop driving an [`Agent`] from its listener.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false

use log::{debug, info};
use std::sync::Arc;
use std::time::Duration;

use crate::agent::Agent;

/// What to do with one heard utterance
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WakeOutcome {
    /// Wake word absent; ignore
    Ignored,
    /// Only the wake word was heard
    Summoned,
    /// Wake word plus a command
    Command(String),
}

/// Classify an utterance by the presence of `wake_word`
///
/// Every occurrence of the wake word is removed and the rest trimmed.
pub fn split_wake_word(utterance: &str, wake_word: &str) -> WakeOutcome {
    if !utterance.contains(wake_word) {
        return WakeOutcome::Ignored;
    }
    let command = utterance.replace(wake_word, "");
    let command = command.trim();
    if command.is_empty() {
        WakeOutcome::Summoned
    } else {
        WakeOutcome::Command(command.to_string())
    }
}

pub struct VoiceLoop {
    agent: Arc<Agent>,
    wake_word: String,
    listen_timeout: Duration,
}

impl VoiceLoop {
    pub fn new(agent: Arc<Agent>) -> Self {
        let wake_word = agent.config().wake_word.trim().to_lowercase();
        let listen_timeout = agent.config().listen_timeout();
        Self {
            agent,
            wake_word,
            listen_timeout,
        }
    }

    /// Greet, then serve utterances until a shutdown intent runs or the
    /// listener closes
    pub async fn run(&self) {
        self.agent.greeting().await;
        info!("🎙️ Listening (say '{}' to wake me)", self.wake_word);

        while self.agent.is_running() {
            let listener = self.agent.listener();
            if listener.is_closed() {
                info!("🎙️ Input closed, leaving voice loop");
                break;
            }

            let Some(heard) = listener.listen(self.listen_timeout).await else {
                continue;
            };

            let command = match split_wake_word(&heard, &self.wake_word) {
                WakeOutcome::Ignored => {
                    debug!("No wake word in '{heard}', ignoring");
                    continue;
                }
                WakeOutcome::Command(command) => command,
                WakeOutcome::Summoned => {
                    self.agent.say("Yes?").await;
                    match listener.listen(self.listen_timeout).await {
                        Some(command) => command,
                        None => continue,
                    }
                }
            };

            self.agent.handle(&command).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Config;
    use crate::features::services::{RecordingLauncher, Services};
    use crate::features::speech::{RecordingVoice, ScriptedListener};

    #[test]
    fn test_split_wake_word() {
        assert_eq!(split_wake_word("what time is it", "alexa"), WakeOutcome::Ignored);
        assert_eq!(split_wake_word("alexa", "alexa"), WakeOutcome::Summoned);
        assert_eq!(
            split_wake_word("alexa what time is it", "alexa"),
            WakeOutcome::Command("what time is it".to_string())
        );
        assert_eq!(
            split_wake_word("tell me a joke alexa", "alexa"),
            WakeOutcome::Command("tell me a joke".to_string())
        );
    }

    async fn run_script(script: ScriptedListener) -> (Arc<Agent>, Vec<String>, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            memory_path: dir.path().join("memory.json"),
            journal_path: dir.path().join("journal.txt"),
            ..Config::default()
        };
        let voice = Arc::new(RecordingVoice::default());
        let services = Services {
            launcher: Arc::new(RecordingLauncher::default()),
            ..Services::offline()
        };
        let agent = Arc::new(Agent::start(config, voice.clone(), Arc::new(script), services).await);

        VoiceLoop::new(agent.clone()).run().await;
        agent.shutdown().await;

        let spoken = voice.spoken().await;
        (agent, spoken, dir)
    }

    #[tokio::test]
    async fn test_loop_handles_wake_word_commands() {
        let script = ScriptedListener::new(["background chatter", "alexa my name is ada"]);
        script.push_silence();
        script.push("alexa what is my name");

        let (agent, spoken, _dir) = run_script(script).await;
        assert_eq!(
            spoken,
            vec![
                "System online. Hello User, I am ready.",
                "Nice to meet you, ada. I'll remember that.",
                "Your name is ada.",
            ]
        );
        assert!(agent.is_running());
    }

    #[tokio::test]
    async fn test_bare_wake_word_prompts() {
        let script = ScriptedListener::new(["alexa", "flip a coin"]);

        let (_agent, spoken, _dir) = run_script(script).await;
        assert_eq!(spoken[1], "Yes?");
        assert!(spoken[2].starts_with("It's "));
    }

    #[tokio::test]
    async fn test_stop_ends_loop() {
        let script = ScriptedListener::new(["alexa stop", "alexa tell me a joke"]);

        let (agent, spoken, _dir) = run_script(script).await;
        assert_eq!(spoken.last().map(String::as_str), Some("Goodbye!"));
        assert!(!agent.is_running());
    }
}
