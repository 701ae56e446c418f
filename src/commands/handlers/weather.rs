//! Weather intent
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0

use anyhow::Result;
use async_trait::async_trait;

use crate::commands::context::CommandContext;
use crate::commands::handler::IntentHandler;

/// Asks for a city and reports its current conditions
pub struct WeatherIntent;

#[async_trait]
impl IntentHandler for WeatherIntent {
    fn name(&self) -> &'static str {
        "weather"
    }

    fn matches(&self, query: &str) -> bool {
        query.contains("weather")
    }

    async fn handle(&self, ctx: &CommandContext, _query: &str) -> Result<()> {
        let Some(city) = ctx.ask("Which city?", ctx.follow_up_timeout).await else {
            ctx.say("I didn't catch the city name.").await;
            return Ok(());
        };

        match ctx.services.weather.fetch(&city).await {
            Ok(summary) => {
                ctx.say(format!("Current weather in {city}: {summary}"))
                    .await;
            }
            Err(e) => {
                ctx.report_error(&format!("Weather lookup for {city}"), &e)
                    .await;
                ctx.say("Sorry, I couldn't fetch the weather right now.")
                    .await;
            }
        }
        Ok(())
    }
}
