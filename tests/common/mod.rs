use async_trait::async_trait;
use cineinfo::{CineInfoError, MovieInfo, MovieInfoProvider, Result, TextGenerator};
use serde_json::Value;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

#[allow(dead_code)]
pub const INTERSTELLAR_REPLY: &str = r#"{"title":"Interstellar","release_date":"2014-11-07","box_office":"$677,471,339","synopsis":"A team of explorers travels through a wormhole near Saturn to ensure humanity's survival."}"#;

/// Text generator returning a canned reply and recording every prompt.
#[allow(dead_code)]
pub struct StubGenerator {
    reply: std::result::Result<String, String>,
    pub prompts: Arc<Mutex<Vec<String>>>,
}

#[allow(dead_code)]
impl StubGenerator {
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: Ok(reply.to_string()),
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Fails every call with `CineInfoError::ApiError(message)`.
    pub fn failing(message: &str) -> Self {
        Self {
            reply: Err(message.to_string()),
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

#[async_trait]
impl TextGenerator for StubGenerator {
    async fn generate(&self, prompt: &str) -> Result<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.reply.clone().map_err(CineInfoError::ApiError)
    }
}

/// Provider that counts calls and always answers with the same movie.
#[allow(dead_code)]
#[derive(Default)]
pub struct CountingProvider {
    pub calls: AtomicUsize,
}

#[async_trait]
impl MovieInfoProvider for CountingProvider {
    async fn get_movie_info(&self, title: &str) -> Result<MovieInfo> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(MovieInfo {
            title: title.to_string(),
            release_date: "unknown".to_string(),
            box_office: "unknown".to_string(),
            synopsis: "unknown".to_string(),
        })
    }
}

/// Gemini `generateContent` reply with one candidate made of the given text parts.
#[allow(dead_code)]
pub fn candidate_reply(parts: &[&str]) -> Value {
    let parts: Vec<Value> = parts
        .iter()
        .map(|text| serde_json::json!({ "text": text }))
        .collect();
    serde_json::json!({
        "candidates": [{
            "content": { "role": "model", "parts": parts },
            "finishReason": "STOP"
        }]
    })
}
