//! Spoken-duration parsing
//!
//! - **Version**: 2.0.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 2.0.0: Spoken replies are parsed as the first run of digits (seconds); drop formatting helper
//! - 1.0.0: Unit-suffixed durations ("1h30m")

use regex::Regex;
use std::sync::OnceLock;

fn digit_run() -> &'static Regex {
    static DIGITS: OnceLock<Regex> = OnceLock::new();
    DIGITS.get_or_init(|| Regex::new(r"[0-9]+").expect("static regex"))
}

/// Delay in seconds from a reply like "10", "10 seconds" or "in 45 please"
///
/// Only the first run of digits counts. Returns `None` when there are no
/// digits or the number does not fit.
pub fn parse_delay_seconds(reply: &str) -> Option<u64> {
    digit_run().find(reply)?.as_str().parse().ok()
}
