//! Response sink for a single turn plus the scheduler's speech channel
//!
//! - **Version**: 2.0.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 2.0.0: Turn buffer with silent mode; sentence-aware speech splitting
//! - 1.0.0: Initial line-aware text chunking

use log::{info, warn};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::features::speech::SpeechOutput;

/// Longest piece handed to the speech collaborator in one call
pub const SPEECH_CHUNK_LIMIT: usize = 400;

/// Separator used when a turn's output is joined into one response
pub const TURN_SEPARATOR: &str = " ";

/// Collects what the assistant says during a turn and forwards it to speech
///
/// The turn buffer is only touched by the interaction path. The scheduler uses
/// [`ResponseSink::announce`], which speaks without touching the buffer.
pub struct ResponseSink {
    turn: Mutex<Vec<String>>,
    voice: Arc<dyn SpeechOutput>,
    silent: AtomicBool,
}

impl ResponseSink {
    pub fn new(voice: Arc<dyn SpeechOutput>, silent: bool) -> Self {
        Self {
            turn: Mutex::new(Vec::new()),
            voice,
            silent: AtomicBool::new(silent),
        }
    }

    pub fn is_silent(&self) -> bool {
        self.silent.load(Ordering::SeqCst)
    }

    pub fn set_silent(&self, silent: bool) {
        self.silent.store(silent, Ordering::SeqCst);
    }

    /// Append to the current turn and speak it unless silent
    pub async fn emit(&self, text: impl Into<String>) {
        let text = text.into();
        info!("Assistant: {text}");
        self.turn.lock().await.push(text.clone());
        self.speak(&text).await;
    }

    /// Speak outside of any turn (reminder delivery)
    pub async fn announce(&self, text: impl Into<String>) {
        let text = text.into();
        info!("Announcement: {text}");
        self.speak(&text).await;
    }

    /// Join the turn buffer and clear it
    pub async fn drain(&self) -> String {
        let mut turn = self.turn.lock().await;
        let joined = turn.join(TURN_SEPARATOR);
        turn.clear();
        joined
    }

    pub async fn clear(&self) {
        self.turn.lock().await.clear();
    }

    async fn speak(&self, text: &str) {
        if self.is_silent() {
            return;
        }
        for piece in split_for_speech(text, SPEECH_CHUNK_LIMIT) {
            if let Err(e) = self.voice.speak(&piece).await {
                warn!("Speech output failed: {e}");
            }
        }
    }
}

/// Split text into speakable pieces no longer than `max_chars` characters
///
/// Prefers sentence boundaries (`.`, `!`, `?` followed by whitespace) and
/// falls back to whitespace, then to a hard character split.
pub fn split_for_speech(text: &str, max_chars: usize) -> Vec<String> {
    let text = text.trim();
    if text.is_empty() {
        return Vec::new();
    }
    if text.chars().count() <= max_chars {
        return vec![text.to_string()];
    }

    let mut pieces = Vec::new();
    let mut current = String::new();

    for sentence in sentences(text) {
        let candidate_len = current.chars().count() + 1 + sentence.chars().count();
        if !current.is_empty() && candidate_len > max_chars {
            pieces.push(std::mem::take(&mut current));
        }
        if sentence.chars().count() > max_chars {
            pieces.extend(split_long_sentence(sentence, max_chars));
            continue;
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(sentence);
    }

    if !current.is_empty() {
        pieces.push(current);
    }
    pieces
}

fn sentences(text: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut start = 0;
    let mut prev_terminal = false;

    for (idx, ch) in text.char_indices() {
        if prev_terminal && ch.is_whitespace() {
            let sentence = text[start..idx].trim();
            if !sentence.is_empty() {
                out.push(sentence);
            }
            start = idx;
        }
        prev_terminal = matches!(ch, '.' | '!' | '?');
    }

    let tail = text[start..].trim();
    if !tail.is_empty() {
        out.push(tail);
    }
    out
}

fn split_long_sentence(sentence: &str, max_chars: usize) -> Vec<String> {
    let mut out = Vec::new();
    let mut current = String::new();

    for word in sentence.split_whitespace() {
        let word_len = word.chars().count();
        if word_len > max_chars {
            if !current.is_empty() {
                out.push(std::mem::take(&mut current));
            }
            let chars: Vec<char> = word.chars().collect();
            out.extend(chars.chunks(max_chars).map(|c| c.iter().collect::<String>()));
            continue;
        }
        let needed = if current.is_empty() { word_len } else { current.chars().count() + 1 + word_len };
        if needed > max_chars {
            out.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }

    if !current.is_empty() {
        out.push(current);
    }
    out
}
