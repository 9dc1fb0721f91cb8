use std::future::Future;
use std::time::Duration;

use log::{debug, warn};
use serde::Deserialize;

use crate::{Error, GenerationFailure, Result};

pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";
pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com";

/// Fixed instruction prepended to every transcript. The trailing spaces are part of it.
pub const PROMPT: &str = "You are a YouTube video summarizer. You will be taking the transcript text
and summarizing the entire video and providing the important summary in points
within 250 words. Please provide the summary of the text given here:  ";

/// A text-generation backend: one input string in, the model's text out
pub trait Generator {
    fn generate(&self, input: &str) -> impl Future<Output = std::result::Result<String, GenerationFailure>>;
}

/// Credential for the generative API. Never printed, not even by `Debug`.
#[derive(Clone)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ApiKey(****)")
    }
}

/// Summarize a transcript: `prompt + transcript` sent as a single request, no retries.
///
/// Transcripts longer than `max_input_chars` are cut down first. If nothing but
/// whitespace is left, this short-circuits with [`Error::NoInput`] without touching
/// the generator.
pub async fn summarize<G: Generator>(
    generator: &G,
    transcript: &str,
    prompt: &str,
    max_input_chars: usize,
) -> Result<String> {
    let transcript = truncate(transcript, max_input_chars);
    if transcript.trim().is_empty() {
        return Err(Error::NoInput);
    }

    let input = format!("{prompt}{transcript}");
    debug!("Requesting summary ({} chars of input)", input.len());

    let summary = generator.generate(&input).await?;
    Ok(summary)
}

fn truncate(transcript: &str, max_input_chars: usize) -> &str {
    match transcript.char_indices().nth(max_input_chars) {
        Some((cut, _)) => {
            warn!(
                "Transcript exceeds {max_input_chars} chars; truncating {} bytes",
                transcript.len() - cut
            );
            &transcript[..cut]
        }
        None => transcript,
    }
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

/// Google Gemini `generateContent` client
pub struct Gemini {
    client: reqwest::Client,
    api_key: ApiKey,
    model: String,
    api_base: String,
}

impl Gemini {
    pub fn new(client: reqwest::Client, api_key: ApiKey, model: impl Into<String>) -> Self {
        Self {
            client,
            api_key,
            model: model.into(),
            api_base: DEFAULT_API_BASE.to_string(),
        }
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.api_base.trim_end_matches('/'),
            self.model
        )
    }

    // Key goes in a header so it never shows up in a reqwest error's URL
    fn request(&self, input: &str) -> reqwest::RequestBuilder {
        self.client
            .post(self.endpoint())
            .header("x-goog-api-key", self.api_key.expose())
            .json(&request_body(input))
    }
}

impl Generator for Gemini {
    async fn generate(&self, input: &str) -> std::result::Result<String, GenerationFailure> {
        debug!("Generating content via Gemini with model {}", self.model);

        let resp = self.request(input).send().await?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(GenerationFailure::Api { status, body });
        }

        let resp: GenerateContentResponse = resp.json().await?;
        extract_text(resp)
    }
}

fn request_body(input: &str) -> serde_json::Value {
    serde_json::json!({
        "contents": [
            {
                "parts": [
                    { "text": input }
                ]
            }
        ]
    })
}

fn extract_text(resp: GenerateContentResponse) -> std::result::Result<String, GenerationFailure> {
    let text: String = resp
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();

    if text.is_empty() {
        return Err(GenerationFailure::EmptyResponse);
    }
    Ok(text)
}

/// Build the shared HTTP client. No timeout unless one is configured.
pub fn http_client(timeout: Option<Duration>) -> reqwest::Result<reqwest::Client> {
    let mut builder = reqwest::Client::builder();
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    builder.build()
}
