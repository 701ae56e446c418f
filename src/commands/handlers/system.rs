//! Shutdown intent
//!
//! Handles: stop, exit, shutdown (and "shutdown ... computer")
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0

use anyhow::Result;
use async_trait::async_trait;
use log::{info, warn};

use crate::commands::context::CommandContext;
use crate::commands::handler::IntentHandler;
use crate::features::services::launcher::SHUTDOWN_DELAY_SECS;

/// Ends the session; optionally asks the OS to power off first
pub struct ShutdownIntent;

impl ShutdownIntent {
    fn wants_computer_off(query: &str) -> bool {
        query.contains("shutdown") && query.contains("computer")
    }
}

#[async_trait]
impl IntentHandler for ShutdownIntent {
    fn name(&self) -> &'static str {
        "shutdown"
    }

    fn matches(&self, query: &str) -> bool {
        ["stop", "exit", "shutdown"]
            .iter()
            .any(|word| query.contains(word))
    }

    async fn handle(&self, ctx: &CommandContext, query: &str) -> Result<()> {
        if Self::wants_computer_off(query) {
            ctx.say(format!(
                "Shutting down the computer in {SHUTDOWN_DELAY_SECS} seconds. Cancel with Ctrl+C if this is a mistake."
            ))
            .await;

            if let Err(e) = ctx.services.launcher.shutdown_system().await {
                warn!("System shutdown request failed");
                ctx.report_error("System shutdown", &e).await;
                ctx.say("Sorry, I couldn't shut down the computer.").await;
            }
        }

        ctx.say("Goodbye!").await;
        ctx.stop();
        info!("👋 Shutdown requested");
        Ok(())
    }
}
