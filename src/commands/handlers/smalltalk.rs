//! Small-talk fallback intent
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0

use anyhow::Result;
use async_trait::async_trait;

use crate::commands::context::CommandContext;
use crate::commands::handler::IntentHandler;
use crate::features::smalltalk;

/// Claims every utterance; must be registered last
pub struct SmallTalkIntent;

#[async_trait]
impl IntentHandler for SmallTalkIntent {
    fn name(&self) -> &'static str {
        "small_talk"
    }

    fn matches(&self, _query: &str) -> bool {
        true
    }

    async fn handle(&self, ctx: &CommandContext, query: &str) -> Result<()> {
        let reply = smalltalk::reply(query).replace("{assistant}", &ctx.assistant_name);
        ctx.say(reply).await;
        Ok(())
    }
}
