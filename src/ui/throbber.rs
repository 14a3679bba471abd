//! Shared throbber/spinner utilities for UI animations.

use std::time::{SystemTime, UNIX_EPOCH};

/// Braille spinner characters for animated loading indicators.
const SPINNER: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

/// Lines shown while the announcer is thinking up commentary.
const WAITING_MESSAGES: [&str; 8] = [
    "The announcer clears their throat...",
    "Consulting the luck spirits...",
    "Typing up a hot take...",
    "Polishing the punchline...",
    "Reading the prize's aura...",
    "Checking the resale market...",
    "Dramatic pause...",
    "Warming up the microphone...",
];

/// Returns the current time in milliseconds since UNIX epoch.
fn current_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis()
}

/// Returns the current spinner character based on system time.
/// The spinner cycles every 100ms, completing a full rotation every second.
pub fn spinner_char() -> char {
    let millis = current_millis();
    SPINNER[((millis / 100) % 10) as usize]
}

/// Returns a waiting message based on a seed value.
/// The message stays stable for the same seed, changing only when the seed changes.
pub fn waiting_message(seed: u64) -> &'static str {
    WAITING_MESSAGES[(seed.wrapping_mul(7) as usize) % WAITING_MESSAGES.len()]
}
