//! AI commentary for single-draw results.
//!
//! The request runs on a background thread so the result modal never waits on
//! the network: the host polls [`CommentaryTask`] each frame and shows a
//! throbber until the line arrives. Every failure mode resolves to a canned
//! line - commentary can be late or bland, never an error.

use crate::prizes::{Prize, Rarity};
use serde::Deserialize;
use std::env;
use std::error::Error;
use std::thread::{self, JoinHandle};

const GEMINI_MODEL: &str = "gemini-2.5-flash";
const API_KEY_VARS: [&str; 2] = ["LUCKY_DROP_API_KEY", "GEMINI_API_KEY"];

/// Shown when no API key is configured.
const OFFLINE_LINE: &str = "Offline mode: ooh, not bad at all!";
/// Shown when the request fails or returns nothing usable.
const FALLBACK_LINE: &str = "Lost the cosmic signal... but the loot is yours!";

/// What the commentary service needs to know about the drawn prize.
#[derive(Debug, Clone, PartialEq)]
pub struct CommentaryRequest {
    pub name: String,
    pub rarity: Rarity,
    pub description: String,
}

impl From<&Prize> for CommentaryRequest {
    fn from(prize: &Prize) -> Self {
        Self {
            name: prize.name.clone(),
            rarity: prize.rarity,
            description: prize.description.clone(),
        }
    }
}

#[derive(Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Deserialize)]
struct GeminiCandidate {
    content: GeminiContent,
}

#[derive(Deserialize)]
struct GeminiContent {
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Deserialize)]
struct GeminiPart {
    #[serde(default)]
    text: String,
}

fn api_key() -> Option<String> {
    API_KEY_VARS
        .iter()
        .find_map(|var| env::var(var).ok())
        .filter(|key| !key.is_empty())
}

fn build_prompt(request: &CommentaryRequest) -> String {
    format!(
        "You are the in-house announcer of an over-the-top mystery box machine. \
         Your style is young, trendy, a little snarky and very dramatic.\n\n\
         The player just pulled:\n\
         Prize: {}\n\
         Rarity: {}\n\
         Description: {}\n\n\
         Reply with one short reaction (under 20 words):\n\
         - Legendary: gush wildly, lots of exclamation marks, call them blessed by luck.\n\
         - Rare: approve, tell them the pull was worth it.\n\
         - Common: gently roast or console them.\n\
         Emoji welcome.",
        request.name,
        request.rarity.name(),
        request.description
    )
}

fn request_reaction(request: &CommentaryRequest, key: &str) -> Result<String, Box<dyn Error>> {
    let url = format!(
        "https://generativelanguage.googleapis.com/v1beta/models/{}:generateContent?key={}",
        GEMINI_MODEL, key
    );

    let response: GeminiResponse = ureq::post(&url)
        .send_json(serde_json::json!({
            "contents": [{ "parts": [{ "text": build_prompt(request) }] }]
        }))?
        .into_json()?;

    let text = response
        .candidates
        .first()
        .and_then(|c| c.content.parts.first())
        .map(|p| p.text.trim().to_string())
        .unwrap_or_default();

    if text.is_empty() {
        return Err("empty commentary response".into());
    }
    Ok(text)
}

/// Produces the commentary line, degrading to canned text on any failure.
/// Blocking; run it through [`CommentaryTask::spawn`] from UI code.
pub fn generate_reaction(request: &CommentaryRequest) -> String {
    match api_key() {
        None => OFFLINE_LINE.to_string(),
        Some(key) => {
            request_reaction(request, &key).unwrap_or_else(|_| FALLBACK_LINE.to_string())
        }
    }
}

/// A detached commentary request in flight.
///
/// Dropping the task abandons it: the worker thread finishes on its own and
/// its result is never applied, which is exactly what closing the result
/// modal early should do.
#[derive(Debug)]
pub struct CommentaryTask {
    handle: Option<JoinHandle<String>>,
}

impl CommentaryTask {
    pub fn spawn(request: CommentaryRequest) -> Self {
        Self {
            handle: Some(thread::spawn(move || generate_reaction(&request))),
        }
    }

    pub fn is_pending(&self) -> bool {
        self.handle.is_some()
    }

    /// Returns the commentary line once the background thread has finished,
    /// `None` while it is still running. Yields at most once.
    pub fn try_take(&mut self) -> Option<String> {
        if self.handle.as_ref()?.is_finished() {
            let handle = self.handle.take()?;
            return Some(
                handle
                    .join()
                    .unwrap_or_else(|_| FALLBACK_LINE.to_string()),
            );
        }
        None
    }
}
