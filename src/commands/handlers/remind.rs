//! Reminder intent
//!
//! Handles: "remind me"
//!
//! - **Version**: 2.0.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 2.0.0: Conversational flow (text, then delay in seconds) backed by the memory store
//! - 1.0.0: Initial implementation

use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use log::info;

use crate::commands::context::CommandContext;
use crate::commands::handler::IntentHandler;
use crate::features::memory::Reminder;
use crate::features::reminders::parse_delay_seconds;

const BAD_DURATION_REPLY: &str = "Sorry, I didn't understand the time duration.";

/// Collects reminder text and a delay, then persists the reminder
pub struct RemindMeIntent;

#[async_trait]
impl IntentHandler for RemindMeIntent {
    fn name(&self) -> &'static str {
        "remind_me"
    }

    fn matches(&self, query: &str) -> bool {
        query.contains("remind me")
    }

    async fn handle(&self, ctx: &CommandContext, _query: &str) -> Result<()> {
        let Some(text) = ctx
            .ask("What should I remind you about?", ctx.listen_timeout)
            .await
        else {
            ctx.say("I didn't catch that.").await;
            return Ok(());
        };

        let reply = ctx.ask("In how many seconds?", ctx.listen_timeout).await;
        let Some(seconds) = reply.as_deref().and_then(parse_delay_seconds) else {
            ctx.say(BAD_DURATION_REPLY).await;
            return Ok(());
        };

        let Some(reminder) = Reminder::after(text.as_str(), Utc::now(), seconds) else {
            ctx.say(BAD_DURATION_REPLY).await;
            return Ok(());
        };

        // Kept in memory (and delivered this session) even if the save fails
        if let Err(e) = ctx.memory.add_reminder(reminder).await {
            ctx.report_error("Saving reminder", &e).await;
        }

        info!("⏰ Reminder set: '{text}' in {seconds}s");
        ctx.say(format!("I've set a reminder for {text} in {seconds} seconds."))
            .await;
        Ok(())
    }
}
