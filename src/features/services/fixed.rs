//! Canned collaborators for offline runs and tests
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.2.0

use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;

use super::{JokeProvider, KnowledgeLookup, Launcher, WeatherLookup};

/// Answers every weather request with the same summary, or always fails
#[derive(Debug, Clone)]
pub struct FixedWeather(pub Option<String>);

#[async_trait]
impl WeatherLookup for FixedWeather {
    async fn fetch(&self, city: &str) -> Result<String> {
        self.0
            .clone()
            .ok_or_else(|| anyhow::anyhow!("weather unavailable for {city}"))
    }
}

/// Answers every lookup with the same summary, or always fails
#[derive(Debug, Clone)]
pub struct FixedKnowledge(pub Option<String>);

#[async_trait]
impl KnowledgeLookup for FixedKnowledge {
    async fn summary(&self, topic: &str) -> Result<String> {
        self.0
            .clone()
            .ok_or_else(|| anyhow::anyhow!("no article for {topic}"))
    }
}

#[derive(Debug, Clone)]
pub struct FixedJoke(pub String);

impl JokeProvider for FixedJoke {
    fn joke(&self) -> String {
        self.0.clone()
    }
}

/// What a [`RecordingLauncher`] was asked to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LaunchRequest {
    Url(String),
    Shutdown,
}

/// Records launch requests instead of touching the system
#[derive(Default, Clone)]
pub struct RecordingLauncher {
    requests: Arc<Mutex<Vec<LaunchRequest>>>,
    fail: bool,
}

impl RecordingLauncher {
    /// Records, then reports failure on every call
    pub fn failing() -> Self {
        Self {
            requests: Arc::default(),
            fail: true,
        }
    }

    pub async fn requests(&self) -> Vec<LaunchRequest> {
        self.requests.lock().await.clone()
    }

    async fn record(&self, request: LaunchRequest) -> Result<()> {
        self.requests.lock().await.push(request);
        if self.fail {
            return Err(anyhow::anyhow!("launcher unavailable"));
        }
        Ok(())
    }
}

#[async_trait]
impl Launcher for RecordingLauncher {
    async fn open_url(&self, url: &str) -> Result<()> {
        self.record(LaunchRequest::Url(url.to_string())).await
    }

    async fn shutdown_system(&self) -> Result<()> {
        self.record(LaunchRequest::Shutdown).await
    }
}
