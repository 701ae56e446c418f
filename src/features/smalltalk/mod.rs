//! # Feature: Small Talk
//!
//! Canned replies for chit-chat that matched no other intent.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false

/// Reply when nothing in the table matches
pub const FALLBACK_REPLY: &str = "I'm not sure how to answer that, but I'm learning every day.";

/// Phrase → reply, checked top to bottom. `{assistant}` is replaced with the
/// assistant's configured name.
pub const SMALL_TALK: &[(&str, &str)] = &[
    ("how are you", "I'm just a computer program, but I'm running perfectly!"),
    ("who made you", "I was built by a brilliant developer using Rust."),
    ("what is love", "Baby don't hurt me, don't hurt me, no more."),
    ("are you real", "I am as real as the code that defines me."),
    ("what is your name", "My name is {assistant}."),
    ("how old are you", "I don't have an age, but I was created recently."),
    ("where are you from", "I'm from the digital world, built with Rust."),
    (
        "what can you do",
        "I can tell you the time, date, weather, play music, search Wikipedia/Google, set reminders, calculate math, flip coins, roll dice, and chat with you.",
    ),
    ("hello", "Hello! How can I help you?"),
    ("hi", "Hi there!"),
    ("bye", "Goodbye!"),
    ("goodbye", "See you later!"),
    ("thank you", "You're welcome!"),
    ("thanks", "No problem!"),
    ("what is the meaning of life", "42, according to Douglas Adams."),
    ("tell me something interesting", "Did you know that octopuses have three hearts?"),
    ("are you smart", "I'm getting smarter every day!"),
    (
        "do you have feelings",
        "As an AI, I don't have feelings, but I can simulate empathy.",
    ),
];

/// First table entry whose phrase occurs in `query`
pub fn lookup(query: &str) -> Option<&'static str> {
    SMALL_TALK
        .iter()
        .find(|(phrase, _)| query.contains(phrase))
        .map(|(_, reply)| *reply)
}

/// Table reply, or the generic fallback
pub fn reply(query: &str) -> &'static str {
    lookup(query).unwrap_or(FALLBACK_REPLY)
}
