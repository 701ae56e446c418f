//! # Feature: Speech
//!
//! Speech capture and speech output seams. The core only ever talks to the
//! [`Listener`] and [`SpeechOutput`] traits; concrete engines live here.
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.1.0
//! - **Toggleable**: true (silent mode suppresses output)
//!
//! ## Changelog
//! - 1.1.0: Add external TTS command voice
//! - 1.0.0: Console voice, stdin listener, scripted listener

pub mod listener;
pub mod voice;

use anyhow::Result;
use async_trait::async_trait;
use std::time::Duration;

pub use listener::{NoInputListener, ScriptedListener, StdinListener};
pub use voice::{CommandVoice, ConsoleVoice, RecordingVoice};

/// Text-to-speech playback, best-effort
#[async_trait]
pub trait SpeechOutput: Send + Sync {
    async fn speak(&self, text: &str) -> Result<()>;
}

/// Speech (or typed) capture
///
/// `None` means no input: timeout, recognition failure or a closed source are
/// all treated the same way.
#[async_trait]
pub trait Listener: Send + Sync {
    async fn listen(&self, timeout: Duration) -> Option<String>;

    /// True once the source can never produce input again
    fn is_closed(&self) -> bool {
        false
    }
}

/// Lower-case and trim captured text, mapping blank input to `None`
pub fn normalize_heard(raw: &str) -> Option<String> {
    let text = raw.trim().to_lowercase();
    if text.is_empty() || text == "none" {
        None
    } else {
        Some(text)
    }
}
