//! # Feature: External Services
//!
//! Capability seams for everything the assistant delegates: weather,
//! encyclopedia lookups, jokes, and launching the browser or shutting the
//! machine down. Every call is best-effort; callers turn failures into an
//! apology.
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.1.0: Canned collaborators for offline runs
//! - 1.0.0: wttr.in weather, Wikipedia summaries, built-in jokes, system launcher

pub mod fixed;
pub mod jokes;
pub mod knowledge;
pub mod launcher;
pub mod weather;

use anyhow::Result;
use std::sync::Arc;

use crate::core::Config;

pub use fixed::{FixedJoke, FixedKnowledge, FixedWeather, LaunchRequest, RecordingLauncher};
pub use jokes::{BuiltinJokes, JokeProvider};
pub use knowledge::{first_sentences, KnowledgeLookup, WikipediaSummary};
pub use launcher::{Launcher, SystemLauncher};
pub use weather::{WeatherLookup, WttrWeather};

/// The external collaborators one agent talks to
#[derive(Clone)]
pub struct Services {
    pub weather: Arc<dyn WeatherLookup>,
    pub knowledge: Arc<dyn KnowledgeLookup>,
    pub jokes: Arc<dyn JokeProvider>,
    pub launcher: Arc<dyn Launcher>,
}

impl Services {
    /// Real network and system collaborators
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self {
            weather: Arc::new(WttrWeather::new(
                config.weather_base_url.clone(),
                config.http_timeout(),
            )?),
            knowledge: Arc::new(WikipediaSummary::new(
                config.wikipedia_base_url.clone(),
                config.http_timeout(),
            )?),
            jokes: Arc::new(BuiltinJokes),
            launcher: Arc::new(SystemLauncher),
        })
    }

    /// Collaborators that never leave the process
    pub fn offline() -> Self {
        Self {
            weather: Arc::new(FixedWeather(None)),
            knowledge: Arc::new(FixedKnowledge(None)),
            jokes: Arc::new(BuiltinJokes),
            launcher: Arc::new(RecordingLauncher::default()),
        }
    }
}
