//! Intent handler trait
//!
//! - **Version**: 2.0.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 2.0.0: Handlers own their keyword predicate; dispatch is first-match-wins
//! - 1.0.0: Initial implementation for modular command handling

use anyhow::Result;
use async_trait::async_trait;

use super::context::CommandContext;

/// One intent: a keyword predicate plus the action it triggers
///
/// Handlers are registered with an [`IntentRegistry`](super::IntentRegistry)
/// in a fixed order. The first handler whose `matches` returns true handles
/// the utterance and no other handler runs.
///
/// # Example
///
/// ```ignore
/// pub struct PingIntent;
///
/// #[async_trait]
/// impl IntentHandler for PingIntent {
///     fn name(&self) -> &'static str {
///         "ping"
///     }
///
///     fn matches(&self, query: &str) -> bool {
///         query.contains("ping")
///     }
///
///     async fn handle(&self, ctx: &CommandContext, _query: &str) -> Result<()> {
///         ctx.say("Pong!").await;
///         Ok(())
///     }
/// }
/// ```
#[async_trait]
pub trait IntentHandler: Send + Sync {
    /// Stable intent name used in logs
    fn name(&self) -> &'static str;

    /// Whether this intent claims the (lower-cased) utterance
    fn matches(&self, query: &str) -> bool;

    /// Run the intent; output goes through `ctx.say`
    ///
    /// Expected failures (bad input, unavailable services) are answered inside
    /// the handler. An `Err` is reserved for the unexpected and is turned into
    /// a generic apology by the registry.
    async fn handle(&self, ctx: &CommandContext, query: &str) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    // Test that the trait is object-safe (can be used with dyn)
    fn _assert_object_safe(_: &dyn IntentHandler) {}
}
