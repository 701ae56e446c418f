//! Speech output implementations
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 1.1.0: CommandVoice runs an external TTS program with a timeout
//! - 1.0.0: Console voice

use anyhow::Result;
use async_trait::async_trait;
use log::debug;
use std::sync::Arc;
use std::time::Duration;
use tokio::process::Command;
use tokio::sync::Mutex;
use tokio::time::timeout;

use super::SpeechOutput;

/// Upper bound for one TTS invocation
const TTS_TIMEOUT: Duration = Duration::from_secs(60);

/// Prints what the assistant says
#[derive(Debug, Clone)]
pub struct ConsoleVoice {
    label: String,
}

impl ConsoleVoice {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }
}

#[async_trait]
impl SpeechOutput for ConsoleVoice {
    async fn speak(&self, text: &str) -> Result<()> {
        println!("[{}]: {}", self.label, text);
        Ok(())
    }
}

/// Prints, then pipes the text through an external TTS program (e.g. `espeak`)
#[derive(Debug, Clone)]
pub struct CommandVoice {
    console: ConsoleVoice,
    program: String,
    args: Vec<String>,
}

impl CommandVoice {
    /// Parse a command line such as `"espeak -s 150"`; the text is appended as
    /// the final argument on each call
    pub fn from_command_line(label: impl Into<String>, command_line: &str) -> Result<Self> {
        let mut parts = command_line.split_whitespace().map(str::to_string);
        let program = parts
            .next()
            .ok_or_else(|| anyhow::anyhow!("TTS command is empty"))?;

        Ok(Self {
            console: ConsoleVoice::new(label),
            program,
            args: parts.collect(),
        })
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }
}

#[async_trait]
impl SpeechOutput for CommandVoice {
    async fn speak(&self, text: &str) -> Result<()> {
        self.console.speak(text).await?;

        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args)
            .arg(text)
            .stdout(std::process::Stdio::null())
            .stderr(std::process::Stdio::piped())
            .kill_on_drop(true);

        debug!("Speaking via {} ({} chars)", self.program, text.len());

        let output = timeout(TTS_TIMEOUT, cmd.output())
            .await
            .map_err(|_| anyhow::anyhow!("TTS command timed out after {}s", TTS_TIMEOUT.as_secs()))??;

        if output.status.success() {
            Ok(())
        } else {
            Err(anyhow::anyhow!(
                "TTS command exited with {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            ))
        }
    }
}

/// Remembers everything it is asked to say
#[derive(Default, Clone)]
pub struct RecordingVoice {
    spoken: Arc<Mutex<Vec<String>>>,
    fail: bool,
}

impl RecordingVoice {
    /// Records, then reports failure on every call
    pub fn failing() -> Self {
        Self {
            spoken: Arc::default(),
            fail: true,
        }
    }

    pub async fn spoken(&self) -> Vec<String> {
        self.spoken.lock().await.clone()
    }
}

#[async_trait]
impl SpeechOutput for RecordingVoice {
    async fn speak(&self, text: &str) -> Result<()> {
        self.spoken.lock().await.push(text.to_string());
        if self.fail {
            return Err(anyhow::anyhow!("speech engine unavailable"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_voice_parsing() {
        let voice = CommandVoice::from_command_line("Alexa", "espeak -s 150").unwrap();
        assert_eq!(voice.program(), "espeak");
        assert_eq!(voice.args(), &["-s".to_string(), "150".to_string()]);
    }

    #[test]
    fn test_command_voice_rejects_empty() {
        assert!(CommandVoice::from_command_line("Alexa", "   ").is_err());
    }

    #[tokio::test]
    async fn test_command_voice_missing_program_errors() {
        let voice =
            CommandVoice::from_command_line("Alexa", "definitely-not-a-tts-binary-xyz").unwrap();
        assert!(voice.speak("hello").await.is_err());
    }

    #[tokio::test]
    async fn test_recording_voice() {
        let voice = RecordingVoice::default();
        voice.speak("one").await.unwrap();
        voice.speak("two").await.unwrap();
        assert_eq!(voice.spoken().await, vec!["one", "two"]);
    }
}
