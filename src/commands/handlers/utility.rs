//! Utility intents
//!
//! Handles: calculate, flip a coin, roll a dice
//!
//! - **Version**: 2.0.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 2.0.0: Arithmetic goes through the restricted calculator
//! - 1.0.0: Initial implementation

use anyhow::Result;
use async_trait::async_trait;
use log::debug;
use rand::Rng;
use regex::Regex;
use std::sync::OnceLock;

use crate::commands::context::CommandContext;
use crate::commands::handler::IntentHandler;
use crate::features::calculator::{evaluate, format_number};

/// Arithmetic on whatever follows "calculate"
pub struct CalculateIntent;

impl CalculateIntent {
    pub fn expression(query: &str) -> String {
        static KEYWORD: OnceLock<Regex> = OnceLock::new();
        let keyword =
            KEYWORD.get_or_init(|| Regex::new(r"calculate\s*").expect("static regex"));
        keyword.replace_all(query, "").trim().to_string()
    }
}

#[async_trait]
impl IntentHandler for CalculateIntent {
    fn name(&self) -> &'static str {
        "calculate"
    }

    fn matches(&self, query: &str) -> bool {
        query.contains("calculate")
    }

    async fn handle(&self, ctx: &CommandContext, query: &str) -> Result<()> {
        let expression = Self::expression(query);
        match evaluate(&expression) {
            Ok(value) => {
                ctx.say(format!("The result is {}", format_number(value)))
                    .await;
            }
            Err(e) => {
                debug!("Could not evaluate '{expression}': {e}");
                ctx.say("I can't calculate that.").await;
            }
        }
        Ok(())
    }
}

pub struct CoinFlipIntent;

#[async_trait]
impl IntentHandler for CoinFlipIntent {
    fn name(&self) -> &'static str {
        "coin_flip"
    }

    fn matches(&self, query: &str) -> bool {
        query.contains("flip a coin")
    }

    async fn handle(&self, ctx: &CommandContext, _query: &str) -> Result<()> {
        let side = if rand::rng().random_bool(0.5) {
            "Heads"
        } else {
            "Tails"
        };
        ctx.say(format!("It's {side}")).await;
        Ok(())
    }
}

pub struct DiceRollIntent;

#[async_trait]
impl IntentHandler for DiceRollIntent {
    fn name(&self) -> &'static str {
        "dice_roll"
    }

    fn matches(&self, query: &str) -> bool {
        query.contains("roll a dice") || query.contains("roll dice")
    }

    async fn handle(&self, ctx: &CommandContext, _query: &str) -> Result<()> {
        let roll = rand::rng().random_range(1..=6);
        ctx.say(format!("You rolled a {roll}")).await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::test_context;

    #[test]
    fn test_expression_strips_keyword() {
        assert_eq!(CalculateIntent::expression("calculate 2+2"), "2+2");
        assert_eq!(
            CalculateIntent::expression("please calculate (1 + 2) * 3"),
            "please (1 + 2) * 3"
        );
    }

    #[tokio::test]
    async fn test_calculate() {
        let (ctx, _fixture) = test_context(&[]).await;

        CalculateIntent.handle(&ctx, "calculate 2+2").await.unwrap();
        assert_eq!(ctx.sink.drain().await, "The result is 4");

        CalculateIntent
            .handle(&ctx, "calculate 7 divided by 2")
            .await
            .unwrap();
        assert_eq!(ctx.sink.drain().await, "The result is 3.5");
    }

    #[tokio::test]
    async fn test_calculate_rejects_garbage() {
        let (ctx, _fixture) = test_context(&[]).await;

        CalculateIntent
            .handle(&ctx, "calculate import os")
            .await
            .unwrap();
        assert_eq!(ctx.sink.drain().await, "I can't calculate that.");

        CalculateIntent.handle(&ctx, "calculate 1/0").await.unwrap();
        assert_eq!(ctx.sink.drain().await, "I can't calculate that.");
    }

    #[tokio::test]
    async fn test_coin_flip() {
        let (ctx, _fixture) = test_context(&[]).await;

        CoinFlipIntent.handle(&ctx, "flip a coin").await.unwrap();
        let said = ctx.sink.drain().await;
        assert!(said == "It's Heads" || said == "It's Tails");
    }

    #[tokio::test]
    async fn test_dice_roll_in_range() {
        let (ctx, _fixture) = test_context(&[]).await;

        assert!(DiceRollIntent.matches("roll dice"));
        for _ in 0..20 {
            DiceRollIntent.handle(&ctx, "roll a dice").await.unwrap();
            let said = ctx.sink.drain().await;
            let n: u32 = said.strip_prefix("You rolled a ").unwrap().parse().unwrap();
            assert!((1..=6).contains(&n));
        }
    }
}
