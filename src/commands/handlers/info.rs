//! Lookup and browser intents
//!
//! Handles: wikipedia, play, time, joke, open google/youtube, date, search
//!
//! - **Version**: 2.0.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 2.0.0: Split into one intent per keyword with ordered matching
//! - 1.0.0: Initial implementation

use anyhow::Result;
use async_trait::async_trait;
use chrono::Local;
use log::info;
use reqwest::Url;

use crate::commands::context::CommandContext;
use crate::commands::handler::IntentHandler;

const YOUTUBE_SEARCH_URL: &str = "https://www.youtube.com/results";
const GOOGLE_SEARCH_URL: &str = "https://www.google.com/search";

/// The utterance with every occurrence of `keyword` removed, trimmed
fn strip_keyword(query: &str, keyword: &str) -> String {
    query.replace(keyword, "").trim().to_string()
}

fn search_url(base: &str, param: &str, term: &str) -> Result<Url> {
    Ok(Url::parse_with_params(base, &[(param, term)])?)
}

/// Short encyclopedia summary of a topic
pub struct WikipediaIntent;

#[async_trait]
impl IntentHandler for WikipediaIntent {
    fn name(&self) -> &'static str {
        "wikipedia"
    }

    fn matches(&self, query: &str) -> bool {
        query.contains("wikipedia")
    }

    async fn handle(&self, ctx: &CommandContext, query: &str) -> Result<()> {
        ctx.say("Searching Wikipedia...").await;
        let topic = strip_keyword(query, "wikipedia");

        match ctx.services.knowledge.summary(&topic).await {
            Ok(summary) => {
                ctx.say("According to Wikipedia").await;
                ctx.say(summary).await;
            }
            Err(e) => {
                info!("No Wikipedia result for '{topic}': {e:#}");
                ctx.say("No results found.").await;
            }
        }
        Ok(())
    }
}

/// Plays media by opening a video search for it
pub struct PlayIntent;

#[async_trait]
impl IntentHandler for PlayIntent {
    fn name(&self) -> &'static str {
        "play"
    }

    fn matches(&self, query: &str) -> bool {
        query.contains("play")
    }

    async fn handle(&self, ctx: &CommandContext, query: &str) -> Result<()> {
        let song = strip_keyword(query, "play");
        if song.is_empty() {
            ctx.say("What should I play?").await;
            return Ok(());
        }

        ctx.say(format!("Playing {song}")).await;
        let url = search_url(YOUTUBE_SEARCH_URL, "search_query", &song)?;
        if let Err(e) = ctx.services.launcher.open_url(url.as_str()).await {
            ctx.report_error(&format!("Playing {song}"), &e).await;
            ctx.say("Sorry, I couldn't play that.").await;
        }
        Ok(())
    }
}

pub struct TimeIntent;

#[async_trait]
impl IntentHandler for TimeIntent {
    fn name(&self) -> &'static str {
        "time"
    }

    fn matches(&self, query: &str) -> bool {
        query.contains("time")
    }

    async fn handle(&self, ctx: &CommandContext, _query: &str) -> Result<()> {
        let now = Local::now().format("%H:%M:%S");
        ctx.say(format!("The time is {now}")).await;
        Ok(())
    }
}

pub struct JokeIntent;

#[async_trait]
impl IntentHandler for JokeIntent {
    fn name(&self) -> &'static str {
        "joke"
    }

    fn matches(&self, query: &str) -> bool {
        query.contains("joke")
    }

    async fn handle(&self, ctx: &CommandContext, _query: &str) -> Result<()> {
        ctx.say(ctx.services.jokes.joke()).await;
        Ok(())
    }
}

/// Phrase, display name, URL
const SITES: &[(&str, &str, &str)] = &[
    ("open google", "Google", "https://www.google.com"),
    ("open youtube", "Youtube", "https://www.youtube.com"),
];

/// Opens a well-known site in the browser
pub struct OpenSiteIntent;

impl OpenSiteIntent {
    fn site_for(query: &str) -> Option<(&'static str, &'static str)> {
        SITES
            .iter()
            .find(|(phrase, _, _)| query.contains(phrase))
            .map(|(_, name, url)| (*name, *url))
    }
}

#[async_trait]
impl IntentHandler for OpenSiteIntent {
    fn name(&self) -> &'static str {
        "open_site"
    }

    fn matches(&self, query: &str) -> bool {
        Self::site_for(query).is_some()
    }

    async fn handle(&self, ctx: &CommandContext, query: &str) -> Result<()> {
        let Some((name, url)) = Self::site_for(query) else {
            return Ok(());
        };

        ctx.say(format!("Opening {name}")).await;
        if let Err(e) = ctx.services.launcher.open_url(url).await {
            ctx.report_error(&format!("Opening {name}"), &e).await;
            ctx.say("Sorry, I couldn't open the browser.").await;
        }
        Ok(())
    }
}

pub struct DateIntent;

#[async_trait]
impl IntentHandler for DateIntent {
    fn name(&self) -> &'static str {
        "date"
    }

    fn matches(&self, query: &str) -> bool {
        query.contains("what is the date") || query.contains("what date is it")
    }

    async fn handle(&self, ctx: &CommandContext, _query: &str) -> Result<()> {
        let today = Local::now().format("%B %d, %Y");
        ctx.say(format!("Today's date is {today}")).await;
        Ok(())
    }
}

/// Web search for whatever follows "search"
pub struct SearchIntent;

#[async_trait]
impl IntentHandler for SearchIntent {
    fn name(&self) -> &'static str {
        "search"
    }

    fn matches(&self, query: &str) -> bool {
        query.contains("search")
    }

    async fn handle(&self, ctx: &CommandContext, query: &str) -> Result<()> {
        let term = strip_keyword(query, "search");
        if term.is_empty() {
            ctx.say("What do you want to search for?").await;
            return Ok(());
        }

        ctx.say(format!("Searching for {term}")).await;
        let url = search_url(GOOGLE_SEARCH_URL, "q", &term)?;
        if let Err(e) = ctx.services.launcher.open_url(url.as_str()).await {
            ctx.report_error(&format!("Searching for {term}"), &e).await;
            ctx.say("Sorry, I couldn't open the browser.").await;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::{offline_services, test_context, test_context_with};
    use crate::features::services::{FixedJoke, FixedKnowledge, LaunchRequest, RecordingLauncher};
    use std::sync::Arc;

    #[test]
    fn test_strip_keyword() {
        assert_eq!(strip_keyword("play never gonna give you up", "play"), "never gonna give you up");
        assert_eq!(strip_keyword("  search  ", "search"), "");
    }

    #[tokio::test]
    async fn test_wikipedia_summary() {
        let launcher = RecordingLauncher::default();
        let mut services = offline_services(&launcher);
        services.knowledge = Arc::new(FixedKnowledge(Some(
            "Rust is a programming language. It is fast.".to_string(),
        )));
        let (ctx, _fixture) = test_context_with(&[], services, launcher).await;

        WikipediaIntent.handle(&ctx, "wikipedia rust").await.unwrap();
        assert_eq!(
            ctx.sink.drain().await,
            "Searching Wikipedia... According to Wikipedia Rust is a programming language. It is fast."
        );
    }

    #[tokio::test]
    async fn test_wikipedia_no_results() {
        let (ctx, _fixture) = test_context(&[]).await;

        WikipediaIntent.handle(&ctx, "wikipedia xyzzy").await.unwrap();
        assert_eq!(ctx.sink.drain().await, "Searching Wikipedia... No results found.");
    }

    #[tokio::test]
    async fn test_play_opens_video_search() {
        let (ctx, fixture) = test_context(&[]).await;

        PlayIntent.handle(&ctx, "play lofi beats").await.unwrap();
        assert_eq!(ctx.sink.drain().await, "Playing lofi beats");
        assert_eq!(
            fixture.launcher.requests().await,
            vec![LaunchRequest::Url(
                "https://www.youtube.com/results?search_query=lofi+beats".to_string()
            )]
        );
    }

    #[tokio::test]
    async fn test_play_without_title() {
        let (ctx, fixture) = test_context(&[]).await;

        PlayIntent.handle(&ctx, "play").await.unwrap();
        assert_eq!(ctx.sink.drain().await, "What should I play?");
        assert!(fixture.launcher.requests().await.is_empty());
    }

    #[tokio::test]
    async fn test_time_format() {
        let (ctx, _fixture) = test_context(&[]).await;

        TimeIntent.handle(&ctx, "what time is it").await.unwrap();
        let said = ctx.sink.drain().await;
        let clock = said.strip_prefix("The time is ").unwrap();
        assert_eq!(clock.len(), 8);
        assert_eq!(clock.matches(':').count(), 2);
    }

    #[tokio::test]
    async fn test_joke_comes_from_provider() {
        let launcher = RecordingLauncher::default();
        let mut services = offline_services(&launcher);
        services.jokes = Arc::new(FixedJoke("Knock knock.".to_string()));
        let (ctx, _fixture) = test_context_with(&[], services, launcher).await;

        JokeIntent.handle(&ctx, "tell me a joke").await.unwrap();
        assert_eq!(ctx.sink.drain().await, "Knock knock.");
    }

    #[tokio::test]
    async fn test_open_site() {
        let (ctx, fixture) = test_context(&[]).await;

        assert!(OpenSiteIntent.matches("open youtube"));
        assert!(!OpenSiteIntent.matches("open the door"));

        OpenSiteIntent.handle(&ctx, "open google").await.unwrap();
        assert_eq!(ctx.sink.drain().await, "Opening Google");
        assert_eq!(
            fixture.launcher.requests().await,
            vec![LaunchRequest::Url("https://www.google.com".to_string())]
        );
    }

    #[tokio::test]
    async fn test_open_site_launcher_failure() {
        let launcher = RecordingLauncher::failing();
        let (ctx, _fixture) =
            test_context_with(&[], offline_services(&launcher), launcher).await;

        OpenSiteIntent.handle(&ctx, "open youtube").await.unwrap();
        assert_eq!(
            ctx.sink.drain().await,
            "Opening Youtube Sorry, I couldn't open the browser."
        );
    }

    #[tokio::test]
    async fn test_date_phrases() {
        let (ctx, _fixture) = test_context(&[]).await;

        assert!(DateIntent.matches("what date is it"));
        assert!(!DateIntent.matches("date night ideas"));

        DateIntent.handle(&ctx, "what is the date").await.unwrap();
        let said = ctx.sink.drain().await;
        assert!(said.starts_with("Today's date is "));
        assert!(said.ends_with(&Local::now().format("%Y").to_string()));
    }

    #[tokio::test]
    async fn test_search() {
        let (ctx, fixture) = test_context(&[]).await;

        SearchIntent.handle(&ctx, "search rust traits").await.unwrap();
        assert_eq!(ctx.sink.drain().await, "Searching for rust traits");
        assert_eq!(
            fixture.launcher.requests().await,
            vec![LaunchRequest::Url(
                "https://www.google.com/search?q=rust+traits".to_string()
            )]
        );
    }

    #[tokio::test]
    async fn test_search_without_term() {
        let (ctx, fixture) = test_context(&[]).await;

        SearchIntent.handle(&ctx, "search").await.unwrap();
        assert_eq!(ctx.sink.drain().await, "What do you want to search for?");
        assert!(fixture.launcher.requests().await.is_empty());
    }
}
