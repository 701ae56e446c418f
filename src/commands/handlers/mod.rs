//! Per-intent handler implementations
//!
//! - **Version**: 3.0.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 3.0.0: Keyword intents for the voice assistant, registered in dispatch order
//! - 2.0.0: Consolidated handlers
//! - 1.0.0: Initial extraction from the monolithic command handler

pub mod identity;
pub mod info;
pub mod remind;
pub mod smalltalk;
pub mod system;
pub mod utility;
pub mod weather;

use std::sync::Arc;

use super::handler::IntentHandler;
use super::registry::IntentRegistry;

/// Create all intent handlers in dispatch order
///
/// Order matters: the first intent whose keywords appear in the utterance
/// wins, and small talk claims everything that is left.
pub fn create_all_handlers() -> Vec<Arc<dyn IntentHandler>> {
    vec![
        Arc::new(system::ShutdownIntent),
        Arc::new(identity::SetNameIntent),
        Arc::new(identity::GetNameIntent),
        Arc::new(weather::WeatherIntent),
        Arc::new(remind::RemindMeIntent),
        Arc::new(info::WikipediaIntent),
        Arc::new(info::PlayIntent),
        Arc::new(info::TimeIntent),
        Arc::new(info::JokeIntent),
        Arc::new(info::OpenSiteIntent),
        Arc::new(utility::CalculateIntent),
        Arc::new(utility::CoinFlipIntent),
        Arc::new(utility::DiceRollIntent),
        Arc::new(info::DateIntent),
        Arc::new(info::SearchIntent),
        Arc::new(smalltalk::SmallTalkIntent),
    ]
}

/// Registry holding every intent in dispatch order
pub fn default_registry() -> IntentRegistry {
    let mut registry = IntentRegistry::new();
    for handler in create_all_handlers() {
        registry.register(handler);
    }
    registry
}
