//! Name intents
//!
//! Handles: "my name is ...", "what is my name"
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0

use anyhow::Result;
use async_trait::async_trait;
use log::info;

use crate::commands::context::CommandContext;
use crate::commands::handler::IntentHandler;

const SET_NAME_PHRASE: &str = "my name is";

/// Remembers the user's name
pub struct SetNameIntent;

impl SetNameIntent {
    /// Whatever follows "my name is", without trailing punctuation
    pub fn extract_name(query: &str) -> Option<&str> {
        let (_, rest) = query.split_once(SET_NAME_PHRASE)?;
        let name = rest.trim().trim_end_matches(&['.', '!', '?', ','][..]).trim();
        (!name.is_empty()).then_some(name)
    }
}

#[async_trait]
impl IntentHandler for SetNameIntent {
    fn name(&self) -> &'static str {
        "set_name"
    }

    fn matches(&self, query: &str) -> bool {
        query.contains(SET_NAME_PHRASE)
    }

    async fn handle(&self, ctx: &CommandContext, query: &str) -> Result<()> {
        let Some(name) = Self::extract_name(query) else {
            ctx.say("I didn't catch your name.").await;
            return Ok(());
        };

        // The in-memory name is updated even when the save fails
        if let Err(e) = ctx.memory.set_user_name(name).await {
            ctx.report_error("Saving user name", &e).await;
        }

        info!("User name set to {name}");
        ctx.say(format!("Nice to meet you, {name}. I'll remember that."))
            .await;
        Ok(())
    }
}

/// Recalls the user's name
pub struct GetNameIntent;

#[async_trait]
impl IntentHandler for GetNameIntent {
    fn name(&self) -> &'static str {
        "get_name"
    }

    fn matches(&self, query: &str) -> bool {
        query.contains("what is my name")
    }

    async fn handle(&self, ctx: &CommandContext, _query: &str) -> Result<()> {
        let name = ctx.memory.user_name().await;
        ctx.say(format!("Your name is {name}.")).await;
        Ok(())
    }
}
