//! Built-in joke provider
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0

use rand::seq::IndexedRandom;

pub trait JokeProvider: Send + Sync {
    fn joke(&self) -> String;
}

const JOKES: &[&str] = &[
    "Why do programmers prefer dark mode? Because light attracts bugs.",
    "There are 10 kinds of people: those who understand binary and those who don't.",
    "A SQL query walks into a bar, walks up to two tables and asks: can I join you?",
    "Why did the developer go broke? Because he used up all his cache.",
    "I would tell you a UDP joke, but you might not get it.",
    "How many programmers does it take to change a light bulb? None, that's a hardware problem.",
    "Debugging is like being the detective in a crime movie where you are also the murderer.",
    "Why was the function sad after the party? It didn't get called back.",
    "The best thing about a boolean is that even if you are wrong, you are only off by a bit.",
    "Knock knock. Race condition. Who's there?",
];

/// Picks a random joke from a fixed list
#[derive(Debug, Default, Clone, Copy)]
pub struct BuiltinJokes;

impl JokeProvider for BuiltinJokes {
    fn joke(&self) -> String {
        JOKES
            .choose(&mut rand::rng())
            .copied()
            .unwrap_or("I forgot the punchline.")
            .to_string()
    }
}
