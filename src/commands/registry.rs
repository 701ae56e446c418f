//! Ordered intent registry and dispatcher
//!
//! - **Version**: 2.0.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 2.0.0: Ordered list with first-match-wins dispatch (replaces name lookup)
//! - 1.0.0: Initial implementation for handler dispatch

use log::{debug, info};
use std::sync::Arc;

use super::context::CommandContext;
use super::handler::IntentHandler;

/// Said when a handler fails unexpectedly
pub const HANDLER_FAILURE_REPLY: &str = "Sorry, I ran into a problem with that.";

/// Intents in evaluation order
///
/// Order is part of the behavior: an utterance that several predicates accept
/// is handled by whichever was registered first.
///
/// # Example
///
/// ```ignore
/// let mut registry = IntentRegistry::new();
/// registry.register(Arc::new(ShutdownIntent));
/// registry.register(Arc::new(SmallTalkIntent));
///
/// registry.dispatch(&ctx, "please stop").await; // handled by "shutdown"
/// ```
#[derive(Clone, Default)]
pub struct IntentRegistry {
    handlers: Vec<Arc<dyn IntentHandler>>,
}

impl IntentRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a handler after all previously registered ones
    pub fn register(&mut self, handler: Arc<dyn IntentHandler>) {
        self.handlers.push(handler);
    }

    /// First handler that claims `query`
    pub fn find(&self, query: &str) -> Option<Arc<dyn IntentHandler>> {
        self.handlers.iter().find(|h| h.matches(query)).cloned()
    }

    /// Intent names in evaluation order
    pub fn names(&self) -> Vec<&'static str> {
        self.handlers.iter().map(|h| h.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Journal the command, run the first matching intent, and answer any
    /// unexpected failure with an apology
    ///
    /// Returns the name of the intent that ran, if any.
    pub async fn dispatch(&self, ctx: &CommandContext, query: &str) -> Option<&'static str> {
        ctx.journal.command(query).await;

        let Some(handler) = self.find(query) else {
            debug!("No intent matched: {query}");
            return None;
        };

        let name = handler.name();
        info!("Intent '{name}' matched: {query}");

        if let Err(e) = handler.handle(ctx, query).await {
            ctx.report_error(&format!("Intent '{name}'"), &e).await;
            ctx.say(HANDLER_FAILURE_REPLY).await;
        }

        Some(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::test_context;
    use anyhow::Result;
    use async_trait::async_trait;

    // Mock handler for testing
    struct MockHandler {
        name: &'static str,
        keyword: &'static str,
        fail: bool,
    }

    #[async_trait]
    impl IntentHandler for MockHandler {
        fn name(&self) -> &'static str {
            self.name
        }

        fn matches(&self, query: &str) -> bool {
            query.contains(self.keyword)
        }

        async fn handle(&self, ctx: &CommandContext, _query: &str) -> Result<()> {
            if self.fail {
                return Err(anyhow::anyhow!("boom"));
            }
            ctx.say(self.name).await;
            Ok(())
        }
    }

    fn mock(name: &'static str, keyword: &'static str) -> Arc<dyn IntentHandler> {
        Arc::new(MockHandler {
            name,
            keyword,
            fail: false,
        })
    }

    #[test]
    fn test_registry_new_is_empty() {
        let registry = IntentRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.len(), 0);
    }

    #[test]
    fn test_registry_keeps_order() {
        let mut registry = IntentRegistry::new();
        registry.register(mock("first", "a"));
        registry.register(mock("second", "b"));

        assert_eq!(registry.names(), vec!["first", "second"]);
    }

    #[test]
    fn test_first_match_wins() {
        let mut registry = IntentRegistry::new();
        registry.register(mock("name", "name"));
        registry.register(mock("greeting", "hello"));

        let handler = registry.find("hello what is my name").unwrap();
        assert_eq!(handler.name(), "name");
        assert!(registry.find("nothing here").is_none());
    }

    #[tokio::test]
    async fn test_dispatch_runs_only_first_match() {
        let (ctx, fixture) = test_context(&[]).await;
        let mut registry = IntentRegistry::new();
        registry.register(mock("alpha", "x"));
        registry.register(mock("beta", "x"));

        assert_eq!(registry.dispatch(&ctx, "x").await, Some("alpha"));
        assert_eq!(ctx.sink.drain().await, "alpha");
        // Fixture sink is silent
        assert!(fixture.voice.spoken().await.is_empty());
    }

    #[tokio::test]
    async fn test_dispatch_failure_becomes_apology() {
        let (ctx, fixture) = test_context(&[]).await;
        let mut registry = IntentRegistry::new();
        registry.register(Arc::new(MockHandler {
            name: "broken",
            keyword: "",
            fail: true,
        }));

        assert_eq!(registry.dispatch(&ctx, "anything").await, Some("broken"));
        assert_eq!(ctx.sink.drain().await, HANDLER_FAILURE_REPLY);

        let journal = std::fs::read_to_string(fixture.journal_path()).unwrap();
        assert!(journal.contains("User Command: anything"));
        assert!(journal.contains("ERROR - Intent 'broken': boom"));
    }

    #[tokio::test]
    async fn test_dispatch_without_match() {
        let (ctx, _fixture) = test_context(&[]).await;
        let registry = IntentRegistry::new();
        assert_eq!(registry.dispatch(&ctx, "hello").await, None);
        assert_eq!(ctx.sink.drain().await, "");
    }
}
