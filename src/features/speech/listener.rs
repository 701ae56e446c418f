//! Listener implementations
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0

use async_trait::async_trait;
use log::{debug, warn};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

use super::{normalize_heard, Listener};

const STDIN_CHANNEL_CAPACITY: usize = 16;

/// Reads typed (or externally transcribed) utterances from standard input
///
/// A background task forwards lines into a channel so that `listen` can apply
/// a timeout without losing a half-read line.
pub struct StdinListener {
    lines: tokio::sync::Mutex<mpsc::Receiver<String>>,
    closed: AtomicBool,
}

impl StdinListener {
    /// Start reading stdin; must be called inside a tokio runtime
    pub fn spawn() -> Self {
        let (tx, rx) = mpsc::channel(STDIN_CHANNEL_CAPACITY);

        tokio::spawn(async move {
            let mut reader = BufReader::new(tokio::io::stdin()).lines();
            loop {
                match reader.next_line().await {
                    Ok(Some(line)) => {
                        if tx.send(line).await.is_err() {
                            break;
                        }
                    }
                    Ok(None) => {
                        debug!("stdin closed");
                        break;
                    }
                    Err(e) => {
                        warn!("Failed to read stdin: {e}");
                        break;
                    }
                }
            }
        });

        Self {
            lines: tokio::sync::Mutex::new(rx),
            closed: AtomicBool::new(false),
        }
    }
}

#[async_trait]
impl Listener for StdinListener {
    async fn listen(&self, timeout: Duration) -> Option<String> {
        if self.is_closed() {
            return None;
        }

        let mut lines = self.lines.lock().await;
        match tokio::time::timeout(timeout, lines.recv()).await {
            Ok(Some(line)) => normalize_heard(&line),
            Ok(None) => {
                self.closed.store(true, Ordering::SeqCst);
                None
            }
            Err(_) => None,
        }
    }

    fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}

/// Never hears anything; used behind the web boundary
#[derive(Debug, Default, Clone, Copy)]
pub struct NoInputListener;

#[async_trait]
impl Listener for NoInputListener {
    async fn listen(&self, _timeout: Duration) -> Option<String> {
        None
    }
}

/// Replays a fixed queue of answers, one per `listen` call
///
/// `None` entries simulate a timeout. Once the queue is empty every call
/// yields no input and the listener reports itself closed.
#[derive(Default)]
pub struct ScriptedListener {
    replies: Mutex<VecDeque<Option<String>>>,
}

impl ScriptedListener {
    pub fn new<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            replies: Mutex::new(replies.into_iter().map(|s| Some(s.into())).collect()),
        }
    }

    /// Queue another answer
    pub fn push(&self, reply: impl Into<String>) {
        self.queue().push_back(Some(reply.into()));
    }

    /// Queue a timeout
    pub fn push_silence(&self) {
        self.queue().push_back(None);
    }

    pub fn remaining(&self) -> usize {
        self.queue().len()
    }

    fn queue(&self) -> std::sync::MutexGuard<'_, VecDeque<Option<String>>> {
        self.replies.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl Listener for ScriptedListener {
    async fn listen(&self, _timeout: Duration) -> Option<String> {
        self.queue()
            .pop_front()
            .flatten()
            .and_then(|reply| normalize_heard(&reply))
    }

    fn is_closed(&self) -> bool {
        self.queue().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_scripted_listener_replays_in_order() {
        let listener = ScriptedListener::new(["Paris", "  ten seconds "]);
        let t = Duration::from_millis(10);

        assert_eq!(listener.listen(t).await, Some("paris".to_string()));
        assert!(!listener.is_closed());
        assert_eq!(listener.listen(t).await, Some("ten seconds".to_string()));
        assert!(listener.is_closed());
        assert_eq!(listener.listen(t).await, None);
    }

    #[tokio::test]
    async fn test_scripted_silence() {
        let listener = ScriptedListener::default();
        listener.push_silence();
        listener.push("yes");

        assert_eq!(listener.remaining(), 2);
        assert_eq!(listener.listen(Duration::ZERO).await, None);
        assert_eq!(listener.listen(Duration::ZERO).await, Some("yes".to_string()));
    }

    #[tokio::test]
    async fn test_no_input_listener() {
        let listener = NoInputListener;
        assert_eq!(listener.listen(Duration::from_secs(1)).await, None);
        assert!(!listener.is_closed());
    }
}
